//! Route search and reachability over `spatial-core` grids.
//!
//! This crate provides the algorithms of the *spatial* workspace:
//!
//! - **Flood fill** reachability ([`flood_fill`], [`is_accessible`], [`is_exit_accessible`])
//! - **Wave expansion** (Lee's algorithm) with dead-end recovery ([`wave_route`], [`WaveField`])
//! - **Best-first** cost-ordered search ([`best_first_route`])
//! - **Route metrics** ([`sum_cost`], [`directions`], [`walk`], [`straight_route`])
//!
//! Searches are read-only over the grid; every call allocates its own
//! scratch state and discards it on return. [`solve`] runs either search
//! from a [`RouteRequest`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | flood fill counts, wave expansion |
//! | [`WeightedPather`] : [`Pather`] | best-first search, [`solve`] |
//!
//! ```
//! use spatial_core::{Coord, Settings};
//! use spatial_paths::{CostModel, RouteRequest, Strategy, solve, sum_cost};
//!
//! let grid = Settings::new(5, 5).build()?;
//! let req = RouteRequest::new(Coord::new(0, 0), Coord::new(4, 4), CostModel);
//! let route = solve(&grid, &req, Strategy::BestFirst)?;
//! assert_eq!(route.len(), 9);
//! assert_eq!(sum_cost(&grid, &route), 9);
//! # Ok::<(), spatial_core::Error>(())
//! ```

mod astar;
mod flood;
mod lee;
mod metrics;
mod request;
mod traits;

pub use astar::best_first_route;
pub use flood::{flood_fill, is_accessible, is_exit_accessible, walkable_count};
pub use lee::{WaveField, wave_route};
pub use metrics::{directions, manhattan, straight_route, sum_cost, walk};
pub use request::{RouteRequest, Strategy, solve};
pub use traits::{CostModel, Dug, FnPather, Open, Pather, WeightedPather};
