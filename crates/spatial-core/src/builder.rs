//! Grid construction from declarative [`Settings`].

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::cell::{COST, Cell, IS_ENTRANCE, IS_EXIT, ITEMS, OBSTACLES, Properties, WALL_COST};
use crate::error::{Error, Result};
use crate::geom::{Coord, Size};
use crate::store::GridStore;

/// Maps a cell's current cost and coordinate to its new cost.
pub type CostFn = Arc<dyn Fn(u32, Coord) -> u32 + Send + Sync>;

/// Something placed on a single cell: an item or an obstacle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub i: usize,
    pub j: usize,
    #[cfg_attr(feature = "serde", serde(alias = "item", alias = "obstacle"))]
    pub payload: Value,
}

impl Placement {
    pub fn new(at: Coord, payload: impl Into<Value>) -> Self {
        Self {
            i: at.i,
            j: at.j,
            payload: payload.into(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.i, self.j)
    }
}

/// Where local `(0, 0)` sits in the caller's world frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub i: i64,
    pub j: i64,
}

impl Offset {
    #[inline]
    pub const fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }
}

/// Builder input describing a grid.
///
/// Only `size` is required; everything else defaults to empty. The cost
/// function defaults to keeping the current cost.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub offset: Offset,
    pub size: Size,
    /// [`GridStore::entrances`] reads these back row-major with repeats
    /// collapsed, so only a row-major list without repeats round-trips.
    pub entrances: Vec<Coord>,
    /// Same ordering caveat as `entrances`.
    pub exits: Vec<Coord>,
    pub items: Vec<Placement>,
    pub obstacles: Vec<Placement>,
    pub walls: Vec<Coord>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cost_function: Option<CostFn>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("entrances", &self.entrances)
            .field("exits", &self.exits)
            .field("items", &self.items)
            .field("obstacles", &self.obstacles)
            .field("walls", &self.walls)
            .field("cost_function", &self.cost_function.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Settings {
    /// Settings for a `width x height` grid with nothing else configured.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, i: i64, j: i64) -> Self {
        self.offset = Offset::new(i, j);
        self
    }

    pub fn with_entrance(mut self, c: Coord) -> Self {
        self.entrances.push(c);
        self
    }

    pub fn with_exit(mut self, c: Coord) -> Self {
        self.exits.push(c);
        self
    }

    pub fn with_item(mut self, at: Coord, item: impl Into<Value>) -> Self {
        self.items.push(Placement::new(at, item));
        self
    }

    pub fn with_obstacle(mut self, at: Coord, obstacle: impl Into<Value>) -> Self {
        self.obstacles.push(Placement::new(at, obstacle));
        self
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Coord>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_cost_function(
        mut self,
        f: impl Fn(u32, Coord) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.cost_function = Some(Arc::new(f));
        self
    }

    /// Map a local grid coordinate into the offset world frame.
    pub fn to_world(&self, c: Coord) -> (i64, i64) {
        (c.i as i64 + self.offset.i, c.j as i64 + self.offset.j)
    }

    /// Build the grid these settings describe. See [`build`].
    pub fn build(&self) -> Result<GridStore<Cell>> {
        build(self)
    }
}

/// Build a dense `height x width` grid of cells from `settings`.
///
/// Mutations happen in a fixed order: default cost and items, the cost
/// function, entrance/exit flags, items, obstacles and finally walls. Walls
/// are applied last so nothing can un-wall a cell.
pub fn build(settings: &Settings) -> Result<GridStore<Cell>> {
    let Size { width, height } = settings.size;
    let mut grid = GridStore::create(height, width, Cell::new())?;

    grid.each().apply_property(COST, |_, _| Value::from(1));
    grid.each().apply_property(ITEMS, |_, _| Value::Array(Vec::new()));

    if let Some(f) = &settings.cost_function {
        grid.each().apply_property(COST, |old, c| {
            let old = old.as_u64().map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX));
            Value::from(f(old, c))
        });
    }

    for &c in &settings.entrances {
        cell_at(&mut grid, c)?.set_property(IS_ENTRANCE, Value::Bool(true));
    }
    for &c in &settings.exits {
        cell_at(&mut grid, c)?.set_property(IS_EXIT, Value::Bool(true));
    }
    for p in &settings.items {
        cell_at(&mut grid, p.coord())?.push_to(ITEMS, p.payload.clone());
    }
    for p in &settings.obstacles {
        cell_at(&mut grid, p.coord())?.push_to(OBSTACLES, p.payload.clone());
    }
    for &c in &settings.walls {
        cell_at(&mut grid, c)?.set_property(COST, Value::from(WALL_COST));
    }

    debug!(
        "built {width}x{height} grid: {} entrances, {} exits, {} walls",
        settings.entrances.len(),
        settings.exits.len(),
        settings.walls.len()
    );
    Ok(grid)
}

fn cell_at(grid: &mut GridStore<Cell>, c: Coord) -> Result<&mut Cell> {
    grid.get_mut(c).ok_or(Error::out_of_bounds(c))
}

impl GridStore<Cell> {
    /// Coordinates flagged as entrances, row-major. This is not the order
    /// of [`Settings::entrances`] unless that list was row-major too.
    pub fn entrances(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_entrance())
            .map(|(c, _)| c)
            .collect()
    }

    /// Coordinates flagged as exits, row-major.
    pub fn exits(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_exit())
            .map(|(c, _)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_empty_size() {
        let err = build(&Settings::new(0, 4)).unwrap_err();
        assert_eq!(err, Error::InvalidDimensions { rows: 4, cols: 0 });
    }

    #[test]
    fn defaults_every_cell() {
        let g = build(&Settings::new(3, 2)).unwrap();
        assert_eq!(g.len(), 6);
        assert!(g.has(Coord::new(2, 1)));
        assert!(!g.has(Coord::new(1, 2)));
        for (_, cell) in g.iter() {
            assert_eq!(cell.cost(), Some(1));
            assert!(cell.items().is_empty());
            assert!(!cell.is_entrance());
        }
    }

    #[test]
    fn cost_function_sees_default_cost() {
        let s = Settings::new(4, 4).with_cost_function(|old, c| old + (c.i * 10 + c.j) as u32);
        let g = build(&s).unwrap();
        assert_eq!(g.get(Coord::new(0, 0)).unwrap().cost(), Some(1));
        assert_eq!(g.get(Coord::new(2, 3)).unwrap().cost(), Some(24));
    }

    #[test]
    fn walls_override_cost_function() {
        let s = Settings::new(3, 3)
            .with_cost_function(|_, _| 5)
            .with_walls([Coord::new(1, 1), Coord::new(2, 0)]);
        let g = build(&s).unwrap();
        assert_eq!(g.get(Coord::new(1, 1)).unwrap().cost(), Some(WALL_COST));
        assert_eq!(g.get(Coord::new(2, 0)).unwrap().cost(), Some(WALL_COST));
        assert_eq!(g.get(Coord::new(0, 0)).unwrap().cost(), Some(5));
    }

    #[test]
    fn walls_win_over_items() {
        let s = Settings::new(2, 2)
            .with_walls([Coord::new(0, 1)])
            .with_item(Coord::new(0, 1), "rock");
        let g = build(&s).unwrap();
        let cell = g.get(Coord::new(0, 1)).unwrap();
        assert!(cell.is_wall());
        assert_eq!(cell.items(), &[json!("rock")]);
    }

    #[test]
    fn items_accumulate() {
        let s = Settings::new(2, 2)
            .with_item(Coord::new(1, 0), "key")
            .with_item(Coord::new(1, 0), "coin")
            .with_obstacle(Coord::new(0, 0), json!({"kind": "boulder"}));
        let g = build(&s).unwrap();
        assert_eq!(g.get(Coord::new(1, 0)).unwrap().items(), &[json!("key"), json!("coin")]);
        assert_eq!(
            g.get(Coord::new(0, 0)).unwrap().obstacles(),
            &[json!({"kind": "boulder"})]
        );
        assert!(g.get(Coord::new(1, 1)).unwrap().obstacles().is_empty());
    }

    #[test]
    fn entrances_and_exits_round_trip() {
        let s = Settings::new(5, 5)
            .with_entrance(Coord::new(0, 0))
            .with_entrance(Coord::new(3, 0))
            .with_exit(Coord::new(1, 4))
            .with_exit(Coord::new(4, 4));
        let g = build(&s).unwrap();
        assert_eq!(g.entrances(), s.entrances);
        assert_eq!(g.exits(), s.exits);
    }

    #[test]
    fn entrances_come_back_row_major() {
        let s = Settings::new(4, 4)
            .with_entrance(Coord::new(2, 3))
            .with_entrance(Coord::new(1, 0))
            .with_entrance(Coord::new(1, 0));
        let g = build(&s).unwrap();
        assert_eq!(g.entrances(), vec![Coord::new(1, 0), Coord::new(2, 3)]);
    }

    #[test]
    fn placement_outside_grid_fails() {
        let s = Settings::new(2, 2).with_exit(Coord::new(2, 0));
        assert_eq!(build(&s).unwrap_err(), Error::OutOfBounds { i: 2, j: 0 });
        let s = Settings::new(2, 2).with_walls([Coord::new(0, 9)]);
        assert!(build(&s).is_err());
    }

    #[test]
    fn offset_maps_to_world() {
        let s = Settings::new(2, 2).with_offset(100, -5);
        assert_eq!(s.offset, Offset::new(100, -5));
        assert_eq!(s.to_world(Coord::new(1, 1)), (101, -4));
    }
}
