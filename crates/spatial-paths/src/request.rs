//! Route requests: one immutable value describing what to search for.

use std::fmt;
use std::str::FromStr;

use spatial_core::{Cell, Coord, Error, GridStore, Result};

use crate::astar::best_first_route;
use crate::lee::wave_route;
use crate::traits::WeightedPather;

/// Which search [`solve`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Wave expansion. Ignores step costs; finds a route with the fewest
    /// steps through walkable cells.
    Wave,
    /// Cost-ordered best-first search.
    #[default]
    BestFirst,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wave => "wave",
            Self::BestFirst => "best_first",
        })
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wave" | "lee" => Ok(Self::Wave),
            "best_first" | "astar" | "a*" => Ok(Self::BestFirst),
            _ => Err(Error::InvalidCoordinate(format!("unknown strategy {s:?}"))),
        }
    }
}

/// Endpoints plus the pather that decides walkability and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRequest<P> {
    pub start: Coord,
    pub end: Coord,
    pub pather: P,
}

impl<P> RouteRequest<P> {
    pub fn new(start: Coord, end: Coord, pather: P) -> Self {
        Self { start, end, pather }
    }

    /// Request from the grid's first entrance to its first exit
    /// (row-major).
    pub fn entrance_to_exit(grid: &GridStore<Cell>, pather: P) -> Result<Self> {
        let start = grid
            .entrances()
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidCoordinate("grid has no entrance".into()))?;
        let end = grid
            .exits()
            .first()
            .copied()
            .ok_or_else(|| Error::InvalidCoordinate("grid has no exit".into()))?;
        Ok(Self::new(start, end, pather))
    }

    /// Same endpoints, swapped.
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            pather: self.pather,
        }
    }
}

/// Run `strategy` for `request` over `grid`.
///
/// Each call computes the route from scratch. "No route" is reported as
/// [`Error::RouteNotFound`].
pub fn solve<T, P>(grid: &GridStore<T>, request: &RouteRequest<P>, strategy: Strategy) -> Result<Vec<Coord>>
where
    P: WeightedPather<T>,
{
    let RouteRequest { start, end, pather } = request;
    match strategy {
        Strategy::Wave => wave_route(grid, *start, *end, pather),
        Strategy::BestFirst => best_first_route(grid, *start, *end, pather),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{CostModel, Dug};
    use spatial_core::Settings;

    const MAZE: &str = "
        E.#...
        .##.#.
        ....#X
    ";

    #[test]
    fn entrance_to_exit_defaults() {
        let g = Settings::from_layout(MAZE).unwrap().build().unwrap();
        let req = RouteRequest::entrance_to_exit(&g, CostModel).unwrap();
        assert_eq!(req.start, Coord::ZERO);
        assert_eq!(req.end, Coord::new(5, 2));

        let bare = Settings::new(2, 2).build().unwrap();
        assert!(RouteRequest::entrance_to_exit(&bare, CostModel).is_err());
    }

    #[test]
    fn both_strategies_agree_on_length() {
        let g = Settings::from_layout(MAZE).unwrap().build().unwrap();
        let req = RouteRequest::entrance_to_exit(&g, CostModel).unwrap();
        let wave = solve(&g, &req, Strategy::Wave).unwrap();
        let best = solve(&g, &req, Strategy::BestFirst).unwrap();
        assert_eq!(wave.len(), best.len());
        assert_eq!(wave.len(), 12);
        assert_eq!(wave.first(), Some(&req.start));
        assert_eq!(best.last(), Some(&req.end));
    }

    #[test]
    fn reversed_request() {
        let g = Settings::new(4, 4).build().unwrap();
        let req = RouteRequest::new(Coord::ZERO, Coord::new(3, 1), Dug);
        let there = solve(&g, &req, Strategy::default()).unwrap();
        let back = solve(&g, &req.reversed(), Strategy::default()).unwrap();
        assert_eq!(there.len(), back.len());
        assert_eq!(back[0], Coord::new(3, 1));
    }

    #[test]
    fn strategy_names() {
        for s in [Strategy::Wave, Strategy::BestFirst] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
        assert_eq!("Lee".parse::<Strategy>().unwrap(), Strategy::Wave);
        assert!(matches!(
            "dfs".parse::<Strategy>(),
            Err(Error::InvalidCoordinate(msg)) if msg.contains("dfs")
        ));
    }
}
