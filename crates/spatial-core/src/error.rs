//! Error taxonomy shared by every spatial crate.

use thiserror::Error;

use crate::geom::Coord;

/// Convenient result alias for spatial operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, editing or searching a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid was requested with a non-positive number of cells.
    #[error("grid dimensions must be positive, got {rows} rows x {cols} columns")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A coordinate could not be interpreted as a pair of non-negative integers.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A coordinate fell outside the grid.
    #[error("coordinate ({i}, {j}) is outside the grid")]
    OutOfBounds { i: i64, j: i64 },

    /// No walkable route connects the two endpoints.
    #[error("no route found between {start} and {end}")]
    RouteNotFound { start: Coord, end: Coord },

    /// The search left a hole in its predecessor chain. This is a defect,
    /// not a normal outcome.
    #[error("route breaks at {at}")]
    RouteReconstructionError { at: Coord },

    /// Two consecutive route coordinates are not grid-adjacent.
    #[error("route steps from {from} to {to} are not adjacent")]
    DisjointSteps { from: Coord, to: Coord },

    /// An ASCII layout contained an unknown character or ragged rows.
    #[error("invalid layout character {ch:?} at ({i}, {j})")]
    InvalidLayout { ch: char, i: usize, j: usize },
}

impl Error {
    /// Out-of-bounds error for an unsigned coordinate.
    pub fn out_of_bounds(c: Coord) -> Self {
        Self::OutOfBounds {
            i: c.i as i64,
            j: c.j as i64,
        }
    }

    /// Whether this is the ordinary "no route" outcome of a search.
    pub fn is_route_not_found(&self) -> bool {
        matches!(self, Self::RouteNotFound { .. })
    }
}
