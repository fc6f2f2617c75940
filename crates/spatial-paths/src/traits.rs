use spatial_core::{Cell, Coord};

/// Minimal search interface: decides which cells a route may enter.
pub trait Pather<T> {
    /// Whether `cell`, stored at `at`, may be entered.
    fn walkable(&self, cell: &T, at: Coord) -> bool;
}

/// Pather that also prices each step.
pub trait WeightedPather<T>: Pather<T> {
    /// Cost of stepping onto `cell` at `at`.
    fn cost(&self, cell: &T, at: Coord) -> u32;
}

// ---------------------------------------------------------------------------
// Provided pathers
// ---------------------------------------------------------------------------

/// The cell cost model: anything below the wall sentinel is walkable and a
/// step costs the entered cell's `cost` (0 when missing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostModel;

impl Pather<Cell> for CostModel {
    #[inline]
    fn walkable(&self, cell: &Cell, _at: Coord) -> bool {
        !cell.is_wall()
    }
}

impl WeightedPather<Cell> for CostModel {
    #[inline]
    fn cost(&self, cell: &Cell, _at: Coord) -> u32 {
        cell.cost().unwrap_or(0)
    }
}

/// Only dug cells (cost missing or at most 1) are walkable; every step
/// costs 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dug;

impl Pather<Cell> for Dug {
    #[inline]
    fn walkable(&self, cell: &Cell, _at: Coord) -> bool {
        cell.is_dug()
    }
}

impl WeightedPather<Cell> for Dug {
    #[inline]
    fn cost(&self, _cell: &Cell, _at: Coord) -> u32 {
        1
    }
}

/// Everything is walkable at cost 1. Works on grids of any value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Open;

impl<T> Pather<T> for Open {
    #[inline]
    fn walkable(&self, _cell: &T, _at: Coord) -> bool {
        true
    }
}

impl<T> WeightedPather<T> for Open {
    #[inline]
    fn cost(&self, _cell: &T, _at: Coord) -> u32 {
        1
    }
}

/// A pather assembled from a walkability closure and a cost closure.
#[derive(Clone, Copy)]
pub struct FnPather<W, C> {
    walkable: W,
    cost: C,
}

impl<W, C> FnPather<W, C> {
    pub fn new(walkable: W, cost: C) -> Self {
        Self { walkable, cost }
    }
}

impl<T, W, C> Pather<T> for FnPather<W, C>
where
    W: Fn(&T, Coord) -> bool,
{
    #[inline]
    fn walkable(&self, cell: &T, at: Coord) -> bool {
        (self.walkable)(cell, at)
    }
}

impl<T, W, C> WeightedPather<T> for FnPather<W, C>
where
    W: Fn(&T, Coord) -> bool,
    C: Fn(&T, Coord) -> u32,
{
    #[inline]
    fn cost(&self, cell: &T, at: Coord) -> u32 {
        (self.cost)(cell, at)
    }
}

impl<P: Pather<T> + ?Sized, T> Pather<T> for &P {
    #[inline]
    fn walkable(&self, cell: &T, at: Coord) -> bool {
        (**self).walkable(cell, at)
    }
}

impl<P: WeightedPather<T> + ?Sized, T> WeightedPather<T> for &P {
    #[inline]
    fn cost(&self, cell: &T, at: Coord) -> u32 {
        (**self).cost(cell, at)
    }
}
