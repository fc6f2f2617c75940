//! Geometry primitives: [`Coord`], [`Direction`], [`Size`] and [`Bounds`].
//!
//! `i` is the column and `j` is the row. Both are non-negative; anything
//! that can step off the top or left edge returns an `Option` or an error
//! instead of wrapping.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate. `i` grows right (column), `j` grows down (row).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { i: 0, j: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// The coordinate one step away in direction `d`, or `None` when the
    /// step would leave the non-negative quadrant.
    #[inline]
    pub fn step(self, d: Direction) -> Option<Self> {
        match d {
            Direction::Up => self.j.checked_sub(1).map(|j| Self::new(self.i, j)),
            Direction::Down => Some(Self::new(self.i, self.j + 1)),
            Direction::Left => self.i.checked_sub(1).map(|i| Self::new(i, self.j)),
            Direction::Right => Some(Self::new(self.i + 1, self.j)),
        }
    }

    /// The four axis neighbours in sibling order: left, right, up, down.
    /// Neighbours that would be negative are omitted.
    pub fn neighbors_4(self) -> impl Iterator<Item = Coord> {
        [Direction::Left, Direction::Right, Direction::Up, Direction::Down]
            .into_iter()
            .filter_map(move |d| self.step(d))
    }

    /// Block (Manhattan) distance to `other`.
    #[inline]
    pub fn distance(self, other: Coord) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }
}

// --- trait impls for Coord ---

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    // Row-major: traversal order of a grid.
    fn cmp(&self, other: &Self) -> Ordering {
        self.j.cmp(&other.j).then(self.i.cmp(&other.i))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((i, j): (usize, usize)) -> Self {
        Self::new(i, j)
    }
}

impl TryFrom<(i64, i64)> for Coord {
    type Error = Error;

    fn try_from((i, j): (i64, i64)) -> Result<Self> {
        match (usize::try_from(i), usize::try_from(j)) {
            (Ok(i), Ok(j)) => Ok(Self::new(i, j)),
            _ => Err(Error::InvalidCoordinate(format!("({i}, {j})"))),
        }
    }
}

impl FromStr for Coord {
    type Err = Error;

    /// Parse `"i,j"`. Surrounding whitespace and parentheses are accepted.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate(s.to_string());
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (i, j) = inner.split_once(',').ok_or_else(invalid)?;
        let i = i.trim().parse::<usize>().map_err(|_| invalid())?;
        let j = j.trim().parse::<usize>().map_err(|_| invalid())?;
        Ok(Self::new(i, j))
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four axis-aligned moves between adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The direction of a single move from `from` to `to`, or `None` when
    /// the two are not grid-adjacent.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        if from.distance(to) != 1 {
            return None;
        }
        let d = if from.i < to.i {
            Self::Right
        } else if from.i > to.i {
            Self::Left
        } else if from.j < to.j {
            Self::Down
        } else {
            Self::Up
        };
        Some(d)
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        };
        f.write_str(s)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            "LEFT" => Ok(Self::Left),
            "RIGHT" => Ok(Self::Right),
            _ => Err(Error::InvalidCoordinate(format!("unknown direction {s:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Size / Bounds
// ---------------------------------------------------------------------------

/// Width (columns) and height (rows) of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(self) -> usize {
        self.width * self.height
    }
}

/// An inclusive bounding box `[i0, i_n] x [j0, j_n]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub i0: usize,
    pub j0: usize,
    pub i_n: usize,
    pub j_n: usize,
}

impl Bounds {
    /// Create a bounding box from two corners, canonicalised so that the
    /// first corner is the minimum on each axis.
    pub fn new(a: Coord, b: Coord) -> Self {
        Self {
            i0: a.i.min(b.i),
            j0: a.j.min(b.j),
            i_n: a.i.max(b.i),
            j_n: a.j.max(b.j),
        }
    }

    /// Whether `c` lies inside the box (edges included).
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        (self.i0..=self.i_n).contains(&c.i) && (self.j0..=self.j_n).contains(&c.j)
    }

    /// Smallest box that contains both `self` and `c`.
    pub fn include(self, c: Coord) -> Self {
        Self {
            i0: self.i0.min(c.i),
            j0: self.j0.min(c.j),
            i_n: self.i_n.max(c.i),
            j_n: self.j_n.max(c.j),
        }
    }

    /// Width and height of the box.
    pub fn size(self) -> Size {
        Size::new(self.i_n - self.i0 + 1, self.j_n - self.j0 + 1)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[({}, {})-({}, {})]", self.i0, self.j0, self.i_n, self.j_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_step_stays_non_negative() {
        let c = Coord::new(0, 0);
        assert_eq!(c.step(Direction::Up), None);
        assert_eq!(c.step(Direction::Left), None);
        assert_eq!(c.step(Direction::Down), Some(Coord::new(0, 1)));
        assert_eq!(c.step(Direction::Right), Some(Coord::new(1, 0)));
    }

    #[test]
    fn coord_order_is_row_major() {
        let mut v = vec![Coord::new(2, 0), Coord::new(0, 1), Coord::new(1, 0)];
        v.sort();
        assert_eq!(v, vec![Coord::new(1, 0), Coord::new(2, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn coord_neighbors_in_sibling_order() {
        let n: Vec<_> = Coord::new(1, 1).neighbors_4().collect();
        assert_eq!(
            n,
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2)
            ]
        );
        assert_eq!(Coord::ZERO.neighbors_4().count(), 2);
    }

    #[test]
    fn coord_parse() {
        assert_eq!("3,4".parse::<Coord>().unwrap(), Coord::new(3, 4));
        assert_eq!(" (7, 0) ".parse::<Coord>().unwrap(), Coord::new(7, 0));
        assert!(matches!(
            "1.5,2".parse::<Coord>(),
            Err(Error::InvalidCoordinate(_))
        ));
        assert!("-1,2".parse::<Coord>().is_err());
        assert!("12".parse::<Coord>().is_err());
    }

    #[test]
    fn coord_try_from_signed() {
        assert_eq!(Coord::try_from((2_i64, 5_i64)).unwrap(), Coord::new(2, 5));
        assert!(matches!(
            Coord::try_from((-1_i64, 0_i64)),
            Err(Error::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn direction_between_adjacent() {
        let c = Coord::new(3, 3);
        assert_eq!(Direction::between(c, Coord::new(4, 3)), Some(Direction::Right));
        assert_eq!(Direction::between(c, Coord::new(2, 3)), Some(Direction::Left));
        assert_eq!(Direction::between(c, Coord::new(3, 4)), Some(Direction::Down));
        assert_eq!(Direction::between(c, Coord::new(3, 2)), Some(Direction::Up));
        assert_eq!(Direction::between(c, Coord::new(4, 4)), None);
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn direction_parse_and_display() {
        for d in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert!("NORTH".parse::<Direction>().is_err());
    }

    #[test]
    fn bounds_contains_edges() {
        let b = Bounds::new(Coord::new(4, 5), Coord::new(1, 2));
        assert_eq!((b.i0, b.j0, b.i_n, b.j_n), (1, 2, 4, 5));
        assert!(b.contains(Coord::new(1, 2)));
        assert!(b.contains(Coord::new(4, 5)));
        assert!(!b.contains(Coord::new(5, 5)));
        assert_eq!(b.size(), Size::new(4, 4));
        assert_eq!(b.include(Coord::new(0, 9)).size(), Size::new(5, 8));
    }
}
