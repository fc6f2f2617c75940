//! Persistence boundary.
//!
//! Storage backends implement [`GridPersistence`]. The only contract is that
//! `load` hands back cells deep-equal to what `save` was given for the
//! selected coordinates. [`MemoryStore`] is an in-process backend.

use std::collections::BTreeMap;

use log::debug;

use crate::cell::Cell;
use crate::error::Result;
use crate::geom::{Bounds, Coord};
use crate::store::GridStore;

/// One stored cell. `u` is the column and `v` the row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub u: usize,
    pub v: usize,
    pub data: Cell,
}

impl Record {
    #[inline]
    pub fn coord(&self) -> Coord {
        Coord::new(self.u, self.v)
    }
}

/// A backend that can store cells of a grid and read them back.
pub trait GridPersistence {
    /// Store every cell for which `select(cell, coord)` holds, replacing any
    /// record already kept for the same coordinate. Returns the number of
    /// cells written.
    fn save<P>(&mut self, grid: &GridStore<Cell>, select: P) -> Result<usize>
    where
        P: FnMut(&Cell, Coord) -> bool;

    /// Rebuild a grid from the stored records, restricted to `bounds` when
    /// given.
    fn load(&self, bounds: Option<Bounds>) -> Result<GridStore<Cell>>;

    /// Store every cell of `grid`.
    fn save_all(&mut self, grid: &GridStore<Cell>) -> Result<usize> {
        self.save(grid, |_, _| true)
    }
}

/// Records kept in memory, keyed by coordinate.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<Coord, Record>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored records, row-major.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }
}

impl GridPersistence for MemoryStore {
    fn save<P>(&mut self, grid: &GridStore<Cell>, mut select: P) -> Result<usize>
    where
        P: FnMut(&Cell, Coord) -> bool,
    {
        let mut n = 0;
        for (c, cell) in grid.iter().filter(|&(c, cell)| select(cell, c)) {
            let record = Record {
                u: c.i,
                v: c.j,
                data: cell.clone(),
            };
            self.records.insert(c, record);
            n += 1;
        }
        debug!("saved {n} cells ({} stored)", self.records.len());
        Ok(n)
    }

    fn load(&self, bounds: Option<Bounds>) -> Result<GridStore<Cell>> {
        let mut grid = GridStore::new();
        for rec in self.records.values() {
            let c = rec.coord();
            if bounds.is_none_or(|b| b.contains(c)) {
                grid.set(c, rec.data.clone());
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Settings;
    use serde_json::json;

    fn sample() -> GridStore<Cell> {
        Settings::new(4, 3)
            .with_entrance(Coord::new(0, 0))
            .with_exit(Coord::new(3, 2))
            .with_item(Coord::new(1, 1), json!({"name": "lamp", "lit": false}))
            .with_walls([Coord::new(2, 1)])
            .build()
            .unwrap()
    }

    #[test]
    fn save_all_load_all() {
        let grid = sample();
        let mut store = MemoryStore::new();
        assert_eq!(store.save_all(&grid).unwrap(), 12);
        assert_eq!(store.load(None).unwrap(), grid);
    }

    #[test]
    fn save_selected() {
        let grid = sample();
        let mut store = MemoryStore::new();
        let n = store.save(&grid, |cell, _| cell.is_wall()).unwrap();
        assert_eq!(n, 1);
        let loaded = store.load(None).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(Coord::new(2, 1)), grid.get(Coord::new(2, 1)));
    }

    #[test]
    fn save_upserts() {
        let mut grid = sample();
        let mut store = MemoryStore::new();
        store.save_all(&grid).unwrap();
        grid.get_mut(Coord::new(0, 0)).unwrap().set_cost(3);
        store.save(&grid, |_, c| c == Coord::new(0, 0)).unwrap();
        assert_eq!(store.len(), 12);
        let loaded = store.load(None).unwrap();
        assert_eq!(loaded.get(Coord::new(0, 0)).unwrap().cost(), Some(3));
    }

    #[test]
    fn load_within_bounds() {
        let grid = sample();
        let mut store = MemoryStore::new();
        store.save_all(&grid).unwrap();
        let b = Bounds::new(Coord::new(1, 1), Coord::new(3, 2));
        let part = store.load(Some(b)).unwrap();
        assert_eq!(part.len(), 6);
        assert!(!part.has(Coord::new(0, 0)));
        assert_eq!(part.get(Coord::new(1, 1)), grid.get(Coord::new(1, 1)));
        assert_eq!(part.exits(), vec![Coord::new(3, 2)]);
    }
}
