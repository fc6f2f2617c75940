//! **spatial-core**: sparse 2D grids whose cells carry traversal metadata.
//!
//! This crate provides the data side of the *spatial* workspace: geometry
//! primitives, the property-map [`Cell`], the [`GridStore`] container, the
//! settings-driven grid [`build`]er and a persistence boundary. Route search
//! lives in `spatial-paths`.
//!
//! ```
//! use spatial_core::{Coord, Settings};
//!
//! let grid = Settings::new(3, 3)
//!     .with_entrance(Coord::new(0, 0))
//!     .with_walls([Coord::new(1, 1)])
//!     .build()?;
//! assert!(grid.get(Coord::new(1, 1)).is_some_and(|c| c.is_wall()));
//! # Ok::<(), spatial_core::Error>(())
//! ```

pub mod builder;
pub mod cell;
pub mod error;
pub mod geom;
pub mod layout;
pub mod persist;
pub mod store;

pub use builder::{CostFn, Offset, Placement, Settings, build};
pub use cell::{COST, Cell, IS_ENTRANCE, IS_EXIT, ITEMS, OBSTACLES, Properties, WALL_COST};
pub use error::{Error, Result};
pub use geom::{Bounds, Coord, Direction, Size};
pub use layout::LAYOUT_RUNES;
pub use persist::{GridPersistence, MemoryStore, Record};
pub use store::{GridStore, Matching};
