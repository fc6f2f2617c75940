use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};
use spatial_core::{Coord, Error, GridStore, Result};

use crate::traits::WeightedPather;

/// Frontier entry, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Frontier {
    g: u64,
    seq: u64,
    at: Coord,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest, and among equal
        // costs the earliest discovered, first.
        other.g.cmp(&self.g).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest route from `start` to `end` by best-first search.
///
/// The frontier is ordered by accumulated cost alone: entering a cell costs
/// `pather.cost(cell)` and no heuristic is added. Ties go to the entry
/// discovered first. The start is never checked for walkability.
pub fn best_first_route<T, P: WeightedPather<T>>(
    grid: &GridStore<T>,
    start: Coord,
    end: Coord,
    pather: &P,
) -> Result<Vec<Coord>> {
    for c in [start, end] {
        if !grid.has(c) {
            return Err(Error::out_of_bounds(c));
        }
    }
    if start == end {
        return Ok(vec![start]);
    }

    let mut best: GridStore<Option<u64>> = grid.duplicate_structure(None);
    let mut closed = grid.duplicate_structure(false);
    let mut came_from: GridStore<Option<Coord>> = grid.duplicate_structure(None);

    best.set(start, Some(0));
    let mut seq = 0;
    let mut open = BinaryHeap::from([Frontier {
        g: 0,
        seq,
        at: start,
    }]);

    let found = 'search: loop {
        let Some(current) = open.pop() else {
            break 'search false;
        };
        let cur = current.at;

        // Skip stale entries.
        if closed.get(cur) != Some(&false) {
            continue;
        }
        if cur == end {
            break 'search true;
        }
        closed.set(cur, true);
        trace!("closing {cur} at cost {}", current.g);

        for sib in grid.siblings(cur) {
            if closed.get(sib) != Some(&false) {
                continue;
            }
            let Some(cell) = grid.get(sib) else {
                continue;
            };
            if !pather.walkable(cell, sib) {
                continue;
            }
            let g = current.g + u64::from(pather.cost(cell, sib));
            let known = best.get(sib).copied().flatten();
            if known.is_some_and(|k| g >= k) {
                continue;
            }
            best.set(sib, Some(g));
            came_from.set(sib, Some(cur));
            seq += 1;
            open.push(Frontier { g, seq, at: sib });
        }
    };

    if !found {
        debug!("no best-first route {start} -> {end}");
        return Err(Error::RouteNotFound { start, end });
    }

    // Reconstruct path.
    let mut route = vec![end];
    let mut cur = end;
    while cur != start {
        let Some(prev) = came_from.get(cur).copied().flatten() else {
            return Err(Error::RouteReconstructionError { at: cur });
        };
        route.push(prev);
        cur = prev;
    }
    route.reverse();

    debug!(
        "best-first route {start} -> {end}: {} cells, cost {}",
        route.len(),
        best.get(end).copied().flatten().unwrap_or_default()
    );
    Ok(route)
}
