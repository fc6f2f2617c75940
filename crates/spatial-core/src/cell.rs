//! The [`Cell`] type: a named-property record stored at one coordinate.
//!
//! A cell is an open map of properties. The builder fills in the ones the
//! cost model understands (`cost`, `items`, `obstacles`, `isEntrance`,
//! `isExit`); anything else is carried along untouched.

use serde_json::{Map, Value};

/// Sentinel cost marking an impassable cell.
pub const WALL_COST: u32 = 0xFFFF;

/// Property name of the traversal cost.
pub const COST: &str = "cost";
/// Property name of the item list.
pub const ITEMS: &str = "items";
/// Property name of the obstacle list.
pub const OBSTACLES: &str = "obstacles";
/// Property name of the entrance flag.
pub const IS_ENTRANCE: &str = "isEntrance";
/// Property name of the exit flag.
pub const IS_EXIT: &str = "isExit";

/// Read and write access to named properties.
///
/// This is what [`Matching::apply_property`](crate::store::Matching::apply_property)
/// needs from a cell value.
pub trait Properties {
    /// The current value of `name`, if set.
    fn property(&self, name: &str) -> Option<&Value>;

    /// Overwrite (or create) `name`.
    fn set_property(&mut self, name: &str, value: Value);
}

/// A cell of a spatial grid.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cell(Map<String, Value>);

impl Cell {
    /// An empty cell with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    /// Traversal cost, if the cell carries a non-negative integer cost.
    pub fn cost(&self) -> Option<u32> {
        let v = self.0.get(COST)?;
        if let Some(n) = v.as_u64() {
            return Some(u32::try_from(n).unwrap_or(u32::MAX));
        }
        // Fractional costs round up so a cheap cell never becomes free.
        v.as_f64()
            .filter(|f| *f >= 0.0)
            .map(|f| f.ceil().min(u32::MAX as f64) as u32)
    }

    pub fn set_cost(&mut self, cost: u32) {
        self.0.insert(COST.to_string(), Value::from(cost));
    }

    /// Items placed on the cell, in placement order.
    pub fn items(&self) -> &[Value] {
        self.list(ITEMS)
    }

    /// Obstacles placed on the cell, in placement order.
    pub fn obstacles(&self) -> &[Value] {
        self.list(OBSTACLES)
    }

    pub fn is_entrance(&self) -> bool {
        self.flag(IS_ENTRANCE)
    }

    pub fn is_exit(&self) -> bool {
        self.flag(IS_EXIT)
    }

    /// Whether the cell carries the wall sentinel cost (or anything above it).
    pub fn is_wall(&self) -> bool {
        self.cost().is_some_and(|c| c >= WALL_COST)
    }

    /// Whether the cell has been dug out: its cost is missing or at most 1.
    pub fn is_dug(&self) -> bool {
        self.cost().unwrap_or(1) <= 1
    }

    /// Append `value` to the list property `name`, creating the list if the
    /// property is missing or not a list.
    pub fn push_to(&mut self, name: &str, value: Value) {
        let slot = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(list) => list.push(value),
            other => *other = Value::Array(vec![value]),
        }
    }

    /// Iterate over all properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    fn list(&self, name: &str) -> &[Value] {
        match self.0.get(name) {
            Some(Value::Array(list)) => list,
            _ => &[],
        }
    }

    fn flag(&self, name: &str) -> bool {
        self.0.get(name).and_then(Value::as_bool).unwrap_or(false)
    }
}

impl Properties for Cell {
    fn property(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }
}

impl From<Map<String, Value>> for Cell {
    fn from(m: Map<String, Value>) -> Self {
        Self(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_cell_defaults() {
        let c = Cell::new();
        assert_eq!(c.cost(), None);
        assert!(c.items().is_empty());
        assert!(!c.is_entrance());
        assert!(!c.is_exit());
        assert!(!c.is_wall());
        assert!(c.is_dug());
    }

    #[test]
    fn cost_accessors() {
        let mut c = Cell::new();
        c.set_cost(7);
        assert_eq!(c.cost(), Some(7));
        assert!(!c.is_dug());
        c.set_cost(WALL_COST);
        assert!(c.is_wall());
        let frac = Cell::new().with(COST, 1.2);
        assert_eq!(frac.cost(), Some(2));
        let neg = Cell::new().with(COST, -3);
        assert_eq!(neg.cost(), None);
    }

    #[test]
    fn push_appends() {
        let mut c = Cell::new();
        c.push_to(ITEMS, json!("key"));
        c.push_to(ITEMS, json!("lamp"));
        assert_eq!(c.items(), &[json!("key"), json!("lamp")]);
        c.set_property(OBSTACLES, json!(null));
        c.push_to(OBSTACLES, json!(3));
        assert_eq!(c.obstacles(), &[json!(3)]);
    }

    #[test]
    fn flags_read_bools_only() {
        let c = Cell::new().with(IS_ENTRANCE, true).with(IS_EXIT, "yes");
        assert!(c.is_entrance());
        assert!(!c.is_exit());
    }
}
