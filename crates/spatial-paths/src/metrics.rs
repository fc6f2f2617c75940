//! Measurements over computed routes.

use spatial_core::{Cell, Coord, Direction, Error, GridStore, Result};

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.distance(b)
}

/// Sum of the cell costs along `route`. A missing cost (or a coordinate
/// outside the grid) counts as 0.
pub fn sum_cost(grid: &GridStore<Cell>, route: &[Coord]) -> u64 {
    route
        .iter()
        .filter_map(|&c| grid.get(c)?.cost())
        .map(u64::from)
        .sum()
}

/// The move taken between each consecutive pair of `route`.
///
/// Fails with [`Error::DisjointSteps`] at the first pair that is not
/// grid-adjacent. A route of zero or one coordinate has no moves.
pub fn directions(route: &[Coord]) -> Result<Vec<Direction>> {
    route
        .windows(2)
        .map(|w| {
            Direction::between(w[0], w[1]).ok_or(Error::DisjointSteps {
                from: w[0],
                to: w[1],
            })
        })
        .collect()
}

/// Apply `moves` to `start` one at a time, returning every visited
/// coordinate (start included).
///
/// Fails with [`Error::OutOfBounds`] as soon as a position is not in the
/// grid, including when a move would leave the non-negative quadrant.
pub fn walk<T>(grid: &GridStore<T>, start: Coord, moves: &[Direction]) -> Result<Vec<Coord>> {
    if !grid.has(start) {
        return Err(Error::out_of_bounds(start));
    }
    let mut route = Vec::with_capacity(moves.len() + 1);
    route.push(start);
    let mut pos = start;
    for &d in moves {
        pos = match pos.step(d) {
            Some(next) if grid.has(next) => next,
            Some(next) => return Err(Error::out_of_bounds(next)),
            None => {
                let (i, j) = match d {
                    Direction::Left => (-1, pos.j as i64),
                    _ => (pos.i as i64, -1),
                };
                return Err(Error::OutOfBounds { i, j });
            }
        };
        route.push(pos);
    }
    Ok(route)
}

/// The L-shaped route from `from` to `to`: rows first, then columns.
/// Both endpoints are included.
pub fn straight_route(from: Coord, to: Coord) -> Vec<Coord> {
    let mut route = Vec::with_capacity(from.distance(to) + 1);
    let mut pos = from;
    route.push(pos);
    while pos.j != to.j {
        pos.j = if pos.j < to.j { pos.j + 1 } else { pos.j - 1 };
        route.push(pos);
    }
    while pos.i != to.i {
        pos.i = if pos.i < to.i { pos.i + 1 } else { pos.i - 1 };
        route.push(pos);
    }
    route
}
