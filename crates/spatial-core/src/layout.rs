//! Grid settings drawn as ASCII art.
//!
//! Each line is a row, each character a cell:
//!
//! | Char | Meaning |
//! |---|---|
//! | `#` | wall |
//! | `.` | open floor |
//! | `E` | entrance |
//! | `X` | exit |
//!
//! Leading/trailing whitespace of the whole string is trimmed, and so is
//! leading indentation on each line; every row must end up the same width.

use crate::builder::Settings;
use crate::error::{Error, Result};
use crate::geom::Coord;

/// Characters accepted by [`Settings::from_layout`].
pub const LAYOUT_RUNES: &str = "#.EX";

impl Settings {
    /// Parse an ASCII layout into settings. Size, walls, entrances and
    /// exits are filled in; entrances and exits are listed row-major.
    pub fn from_layout(s: &str) -> Result<Self> {
        let mut settings = Settings::default();
        let mut width: Option<usize> = None;
        let mut height = 0;

        for (j, line) in s.trim().lines().enumerate() {
            let line = line.trim_start();
            let mut i = 0;
            for ch in line.chars() {
                let c = Coord::new(i, j);
                match ch {
                    '#' => settings.walls.push(c),
                    '.' => {}
                    'E' => settings.entrances.push(c),
                    'X' => settings.exits.push(c),
                    _ => return Err(Error::InvalidLayout { ch, i, j }),
                }
                i += 1;
            }
            match width {
                None => width = Some(i),
                // Ragged row: report the first column past the shorter edge.
                Some(w) if w != i => {
                    return Err(Error::InvalidLayout {
                        ch: '\n',
                        i: w.min(i),
                        j,
                    });
                }
                Some(_) => {}
            }
            height = j + 1;
        }

        settings.size.width = width.unwrap_or(0);
        settings.size.height = height;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Size;

    const ROOM: &str = "
        E..#
        .#.#
        ...X
    ";

    #[test]
    fn parse_room() {
        let s = Settings::from_layout(ROOM).unwrap();
        assert_eq!(s.size, Size::new(4, 3));
        assert_eq!(s.entrances, vec![Coord::new(0, 0)]);
        assert_eq!(s.exits, vec![Coord::new(3, 2)]);
        assert_eq!(
            s.walls,
            vec![Coord::new(3, 0), Coord::new(1, 1), Coord::new(3, 1)]
        );
    }

    #[test]
    fn layout_builds() {
        let g = Settings::from_layout(ROOM).unwrap().build().unwrap();
        assert_eq!(g.len(), 12);
        assert!(g.get(Coord::new(1, 1)).unwrap().is_wall());
        assert!(g.get(Coord::new(0, 0)).unwrap().is_entrance());
    }

    #[test]
    fn invalid_rune() {
        let err = Settings::from_layout("..\n.?").unwrap_err();
        assert_eq!(err, Error::InvalidLayout { ch: '?', i: 1, j: 1 });
    }

    #[test]
    fn ragged_rows() {
        assert!(matches!(
            Settings::from_layout("...\n.."),
            Err(Error::InvalidLayout { j: 1, .. })
        ));
    }

    #[test]
    fn empty_layout_fails_to_build() {
        let s = Settings::from_layout("   ").unwrap();
        assert_eq!(s.size.area(), 0);
        assert!(s.build().is_err());
    }
}
