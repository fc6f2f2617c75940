//! Wave expansion (Lee's algorithm).
//!
//! The search runs in two phases. [`WaveField::expand`] labels every cell
//! reachable from the start with its wave magnitude (start = 1, FIFO
//! order). [`WaveField::route_to`] then walks from the destination down the
//! magnitudes. A cell with no adjacent `magnitude - 1` candidate is a dead
//! end: it is evicted from its bucket for good, and the walk retreats one
//! step and tries again.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};
use spatial_core::{Coord, Error, GridStore, Result};

use crate::traits::Pather;

/// Wave state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unreached,
    /// `seq` is the labelling order, used to try candidates first-labelled
    /// first.
    Reached { magnitude: u32, seq: usize },
    /// Dead end found during backtrace. Never a candidate again.
    Evicted { magnitude: u32 },
}

/// Magnitude labels produced by wave expansion.
#[derive(Debug, Clone)]
pub struct WaveField {
    start: Coord,
    labels: GridStore<Label>,
    buckets: BTreeMap<u32, Vec<Coord>>,
    evicted: Vec<Coord>,
    seq: usize,
}

impl WaveField {
    /// Expand a wave from `start` over every cell `pather` accepts.
    ///
    /// The start itself is labelled regardless of its walkability. The whole
    /// reachable region is labelled; expansion does not stop early.
    pub fn expand<T, P: Pather<T>>(grid: &GridStore<T>, start: Coord, pather: &P) -> Result<Self> {
        if !grid.has(start) {
            return Err(Error::out_of_bounds(start));
        }

        let mut field = Self::unlabelled(start, grid.duplicate_structure(Label::Unreached));
        field.label(start, 1);

        let mut queue = VecDeque::from([(start, 1_u32)]);
        while let Some((c, m)) = queue.pop_front() {
            for sib in grid.siblings(c) {
                if field.labels.get(sib) != Some(&Label::Unreached) {
                    continue;
                }
                let Some(cell) = grid.get(sib) else {
                    continue;
                };
                if !pather.walkable(cell, sib) {
                    continue;
                }
                field.label(sib, m + 1);
                queue.push_back((sib, m + 1));
            }
        }

        trace!(
            "wave from {start}: {} magnitudes over {} cells",
            field.buckets.len(),
            field.reached()
        );
        Ok(field)
    }

    fn unlabelled(start: Coord, labels: GridStore<Label>) -> Self {
        Self {
            start,
            labels,
            buckets: BTreeMap::new(),
            evicted: Vec::new(),
            seq: 0,
        }
    }

    /// The coordinate the wave was expanded from.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Magnitude of `c`, or `None` if the wave never reached it. Evicted
    /// cells keep the magnitude they were labelled with.
    pub fn magnitude(&self, c: Coord) -> Option<u32> {
        match self.labels.get(c)? {
            Label::Unreached => None,
            Label::Reached { magnitude, .. } | Label::Evicted { magnitude } => Some(*magnitude),
        }
    }

    /// Whether backtrace evicted `c` as a dead end.
    pub fn is_evicted(&self, c: Coord) -> bool {
        matches!(self.labels.get(c), Some(Label::Evicted { .. }))
    }

    /// Cells evicted as dead ends, in eviction order.
    pub fn evicted(&self) -> &[Coord] {
        &self.evicted
    }

    /// Cells still holding magnitude `m`, in the order they were labelled.
    pub fn bucket(&self, m: u32) -> impl Iterator<Item = Coord> + '_ {
        self.buckets
            .get(&m)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&c| !self.is_evicted(c))
    }

    /// Number of labelled cells, evicted ones included.
    pub fn reached(&self) -> usize {
        self.seq
    }

    /// Backtrace from `end` to the start, returning the route start→end.
    ///
    /// Fails with [`Error::RouteNotFound`] when `end` was never reached or
    /// when dead-end recovery retreats past `end` itself.
    pub fn route_to(&mut self, end: Coord) -> Result<Vec<Coord>> {
        let not_found = Error::RouteNotFound {
            start: self.start,
            end,
        };
        if !matches!(self.labels.get(end), Some(Label::Reached { .. })) {
            return Err(not_found);
        }

        // A cell only leaves the route by being evicted, and is never pushed
        // again afterwards: each labelled cell is pushed and popped at most
        // once.
        let mut budget = 2 * self.reached() + 1;
        let mut route = vec![end];

        while let Some(&pos) = route.last() {
            if pos == self.start {
                route.reverse();
                debug!("wave route {} -> {end}: {} cells", self.start, route.len());
                return Ok(route);
            }
            if budget == 0 {
                break;
            }
            budget -= 1;

            match self.descend(pos) {
                Some(c) => route.push(c),
                None => {
                    trace!("dead end at {pos}, receding");
                    self.evict(pos);
                    route.pop();
                }
            }
        }

        debug!("no wave route {} -> {end}", self.start);
        Err(not_found)
    }

    /// The earliest-labelled live neighbour of `pos` one magnitude lower.
    fn descend(&self, pos: Coord) -> Option<Coord> {
        let Some(&Label::Reached { magnitude, .. }) = self.labels.get(pos) else {
            return None;
        };
        self.labels
            .siblings(pos)
            .into_iter()
            .filter_map(|c| match self.labels.get(c) {
                Some(&Label::Reached { magnitude: m, seq }) if m + 1 == magnitude => Some((seq, c)),
                _ => None,
            })
            .min()
            .map(|(_, c)| c)
    }

    fn label(&mut self, c: Coord, magnitude: u32) {
        self.labels.set(
            c,
            Label::Reached {
                magnitude,
                seq: self.seq,
            },
        );
        self.seq += 1;
        self.buckets.entry(magnitude).or_default().push(c);
    }

    fn evict(&mut self, c: Coord) {
        if let Some(&Label::Reached { magnitude, .. }) = self.labels.get(c) {
            self.labels.set(c, Label::Evicted { magnitude });
            self.evicted.push(c);
        }
    }
}

/// Shortest route from `start` to `end` by wave expansion.
///
/// Both endpoints must be in the grid. The start is never checked for
/// walkability; the end must be reachable through cells `pather` accepts.
pub fn wave_route<T, P: Pather<T>>(
    grid: &GridStore<T>,
    start: Coord,
    end: Coord,
    pather: &P,
) -> Result<Vec<Coord>> {
    if !grid.has(end) {
        return Err(Error::out_of_bounds(end));
    }
    let mut field = WaveField::expand(grid, start, pather)?;
    field.route_to(end)
}
