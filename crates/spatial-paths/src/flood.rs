//! Reachability by flood fill.

use std::collections::BTreeSet;

use log::trace;
use spatial_core::{Cell, Coord, GridStore};

use crate::traits::Pather;

/// Every coordinate connected to `start` through cells accepted by
/// `accessible`.
///
/// A cell is filled (and its siblings explored) only when `accessible`
/// holds for it, so an inaccessible or absent `start` yields an empty set.
/// Each coordinate is examined at most once.
pub fn flood_fill<T, F>(grid: &GridStore<T>, start: Coord, mut accessible: F) -> BTreeSet<Coord>
where
    F: FnMut(&T, Coord) -> bool,
{
    let mut visited = grid.duplicate_structure(false);
    let mut filled = BTreeSet::new();
    let mut stack = vec![start];

    // Iterative DFS.
    while let Some(c) = stack.pop() {
        let Some(seen) = visited.get_mut(c) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;

        let Some(cell) = grid.get(c) else {
            continue;
        };
        if !accessible(cell, c) {
            continue;
        }
        filled.insert(c);
        stack.extend(grid.siblings(c));
    }

    trace!("flood fill from {start} covered {} cells", filled.len());
    filled
}

/// Whether `to` can be reached from `from` through dug cells.
pub fn is_accessible(grid: &GridStore<Cell>, from: Coord, to: Coord) -> bool {
    flood_fill(grid, from, |cell, _| cell.is_dug()).contains(&to)
}

/// Whether any exit can be reached from `from` through dug cells.
pub fn is_exit_accessible(grid: &GridStore<Cell>, from: Coord) -> bool {
    flood_fill(grid, from, |cell, _| cell.is_dug())
        .into_iter()
        .any(|c| grid.get(c).is_some_and(Cell::is_exit))
}

/// Number of cells `pather` considers walkable.
pub fn walkable_count<T, P: Pather<T>>(grid: &GridStore<T>, pather: &P) -> usize {
    grid.iter().filter(|&(c, cell)| pather.walkable(cell, c)).count()
}
