//! The [`GridStore`] type: a sparse 2D container keyed by [`Coord`].
//!
//! Cells live in a map of rows, each row a map of columns. A coordinate is
//! in the grid iff its row exists and that row holds the column. Nothing
//! forces the store to be rectangular; [`crate::build`] just happens to
//! always produce a dense rectangle.
//!
//! Traversal is row-major: ascending `j`, then ascending `i` within a row.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::cell::Properties;
use crate::error::{Error, Result};
use crate::geom::{Bounds, Coord, Size};

type Row<T> = BTreeMap<usize, T>;

/// A sparse grid of `T` values.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStore<T> {
    rows: BTreeMap<usize, Row<T>>,
}

impl<T> Default for GridStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GridStore<T> {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// A dense `rows x cols` store where every cell is its own clone of
    /// `value`. Cells never share a mutable instance.
    pub fn create(rows: usize, cols: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        match rows.checked_mul(cols) {
            Some(n) if n > 0 => {}
            _ => return Err(Error::InvalidDimensions { rows, cols }),
        }
        let rows = (0..rows)
            .map(|j| (j, (0..cols).map(|i| (i, value.clone())).collect::<Row<T>>()))
            .collect();
        Ok(Self { rows })
    }

    /// Whether `c` holds a cell.
    #[inline]
    pub fn has(&self, c: Coord) -> bool {
        self.rows.get(&c.j).is_some_and(|row| row.contains_key(&c.i))
    }

    /// Alias for [`has`](Self::has).
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.has(c)
    }

    /// The cell at `c`, or `None` when `c` is not in the grid.
    pub fn get(&self, c: Coord) -> Option<&T> {
        self.rows.get(&c.j)?.get(&c.i)
    }

    pub fn get_mut(&mut self, c: Coord) -> Option<&mut T> {
        self.rows.get_mut(&c.j)?.get_mut(&c.i)
    }

    /// Store `value` at `c`, creating the row if needed. Returns the
    /// previous value.
    pub fn set(&mut self, c: Coord, value: T) -> Option<T> {
        self.rows.entry(c.j).or_default().insert(c.i, value)
    }

    /// Take the cell at `c` out of the grid. The row itself is kept.
    pub fn remove(&mut self, c: Coord) -> Option<T> {
        self.rows.get_mut(&c.j)?.remove(&c.i)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width (distinct columns) and height (rows) of the stored cells.
    pub fn size(&self) -> Size {
        let mut cols: Vec<usize> = self.rows.values().flat_map(|r| r.keys().copied()).collect();
        cols.sort_unstable();
        cols.dedup();
        Size::new(cols.len(), self.rows.len())
    }

    /// Bounding box of every stored cell, or `None` for an empty store.
    pub fn extent(&self) -> Option<Bounds> {
        let mut it = self.coords();
        let first = it.next()?;
        Some(it.fold(Bounds::new(first, first), Bounds::include))
    }

    /// Row-major iterator over `(Coord, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&j, row)| row.iter().map(move |(&i, v)| (Coord::new(i, j), v)))
    }

    /// Row-major iterator over `(Coord, &mut T)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coord, &mut T)> + '_ {
        self.rows
            .iter_mut()
            .flat_map(|(&j, row)| row.iter_mut().map(move |(&i, v)| (Coord::new(i, j), v)))
    }

    /// Row-major iterator over the stored coordinates.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter().map(|(c, _)| c)
    }

    /// Select the cells for which `pred(cell, coord)` holds.
    ///
    /// Nothing is evaluated until a terminal operation runs; each terminal
    /// operation re-walks the grid, so the selection can be reused.
    pub fn each_matching<P>(&mut self, pred: P) -> Matching<'_, T, P>
    where
        P: FnMut(&T, Coord) -> bool,
    {
        Matching { grid: self, pred }
    }

    /// Select every cell.
    pub fn each(&mut self) -> Matching<'_, T, impl FnMut(&T, Coord) -> bool> {
        self.each_matching(|_, _| true)
    }

    /// Deep copy. Mutating the copy never touches `self`.
    pub fn duplicate(&self) -> Self
    where
        T: Clone,
    {
        self.clone()
    }

    /// Same coordinate set, every cell replaced with a clone of `value`.
    pub fn duplicate_structure<U: Clone>(&self, value: U) -> GridStore<U> {
        self.map(|_, _| value.clone())
    }

    /// Same coordinate set, every cell mapped through `f`.
    pub fn map<U>(&self, mut f: impl FnMut(&T, Coord) -> U) -> GridStore<U> {
        let rows = self
            .rows
            .iter()
            .map(|(&j, row)| {
                let row: Row<U> = row
                    .iter()
                    .map(|(&i, v)| (i, f(v, Coord::new(i, j))))
                    .collect();
                (j, row)
            })
            .collect();
        GridStore { rows }
    }

    /// Translate every cell by `(di, dj)`. Cells that would land on a
    /// negative coordinate are dropped.
    pub fn shifted(&self, di: i64, dj: i64) -> Self
    where
        T: Clone,
    {
        let mut out = Self::new();
        for (c, v) in self.iter() {
            let target = (c.i as i64 + di, c.j as i64 + dj);
            if let Ok(c) = Coord::try_from(target) {
                out.set(c, v.clone());
            }
        }
        out
    }

    /// Combine several grids into one. Where grids overlap, the earlier
    /// grid wins.
    pub fn merge<'a, I>(grids: I) -> Self
    where
        I: IntoIterator<Item = &'a GridStore<T>>,
        T: Clone + 'a,
    {
        let mut out = Self::new();
        for g in grids {
            for (c, v) in g.iter() {
                if !out.has(c) {
                    out.set(c, v.clone());
                }
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Insert row `n` holding `len` default cells at columns `0..len`.
    /// No-op (returns `false`) if the row already exists.
    pub fn add_row(&mut self, n: usize, len: usize) -> bool
    where
        T: Default,
    {
        if self.rows.contains_key(&n) {
            return false;
        }
        self.rows
            .insert(n, (0..len).map(|i| (i, T::default())).collect());
        true
    }

    /// Remove row `n`; the rows below move up by one.
    pub fn remove_row(&mut self, n: usize) -> bool {
        if self.rows.remove(&n).is_none() {
            return false;
        }
        let tail = self.rows.split_off(&n);
        self.rows.extend(tail.into_iter().map(|(j, row)| (j - 1, row)));
        true
    }

    /// Insert column `n` holding `len` default cells at rows `0..len`.
    /// No-op (returns `false`) if any row already holds column `n`.
    pub fn add_col(&mut self, n: usize, len: usize) -> bool
    where
        T: Default,
    {
        if self.rows.values().any(|row| row.contains_key(&n)) {
            return false;
        }
        for j in 0..len {
            self.rows.entry(j).or_default().insert(n, T::default());
        }
        true
    }

    /// Remove column `n` from every row; the columns to the right move
    /// left by one.
    pub fn remove_col(&mut self, n: usize) -> bool {
        let mut removed = false;
        for row in self.rows.values_mut() {
            if row.remove(&n).is_none() {
                continue;
            }
            removed = true;
            let tail = row.split_off(&n);
            row.extend(tail.into_iter().map(|(i, v)| (i - 1, v)));
        }
        removed
    }

    /// The axis neighbours of `c` that are in the grid, in the order
    /// left, right, up, down.
    pub fn siblings(&self, c: Coord) -> Vec<Coord> {
        c.neighbors_4().filter(|&n| self.has(n)).collect()
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// A filtered view over a [`GridStore`], created by
/// [`GridStore::each_matching`].
pub struct Matching<'a, T, P> {
    grid: &'a mut GridStore<T>,
    pred: P,
}

impl<T, P> Matching<'_, T, P>
where
    P: FnMut(&T, Coord) -> bool,
{
    /// Number of matching cells.
    pub fn count(&mut self) -> usize {
        self.visit(|_, _| {})
    }

    /// Coordinates of the matching cells, row-major.
    pub fn coords(&mut self) -> Vec<Coord> {
        let mut out = Vec::new();
        self.visit(|_, c| out.push(c));
        out
    }

    /// Row-major iterator over the matching cells.
    pub fn iter(&mut self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let pred = &mut self.pred;
        self.grid.iter().filter(move |(c, v)| pred(*v, *c))
    }

    /// Overwrite every matching cell with a clone of `value`. Returns the
    /// number of cells written.
    pub fn set_to(&mut self, value: T) -> usize
    where
        T: Clone,
    {
        self.visit(|cell, _| *cell = value.clone())
    }

    /// Run `f` on every matching cell. When `f` returns `Some`, the cell is
    /// replaced with it. Returns the number of cells visited.
    pub fn for_each(&mut self, mut f: impl FnMut(&T, Coord) -> Option<T>) -> usize {
        self.visit(|cell, c| {
            if let Some(v) = f(&*cell, c) {
                *cell = v;
            }
        })
    }

    fn visit(&mut self, mut f: impl FnMut(&mut T, Coord)) -> usize {
        let mut n = 0;
        for (&j, row) in self.grid.rows.iter_mut() {
            for (&i, cell) in row.iter_mut() {
                let c = Coord::new(i, j);
                if (self.pred)(&*cell, c) {
                    f(cell, c);
                    n += 1;
                }
            }
        }
        n
    }
}

impl<T, P> Matching<'_, T, P>
where
    T: Properties,
    P: FnMut(&T, Coord) -> bool,
{
    /// Replace property `name` of every matching cell with
    /// `f(old, coord)`, where `old` is `Value::Null` when the property was
    /// unset. Returns the number of cells updated.
    pub fn apply_property(
        &mut self,
        name: &str,
        mut f: impl FnMut(Value, Coord) -> Value,
    ) -> usize {
        self.visit(|cell, c| {
            let old = cell.property(name).cloned().unwrap_or(Value::Null);
            cell.set_property(name, f(old, c));
        })
    }
}
