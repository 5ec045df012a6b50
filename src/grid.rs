//! Binary occupancy grid the rays are cast against.
//!
//! Cell `(x, y)` covers `[x, x + 1) x [y, y + 1)` in world units, with `y`
//! growing "south". The outer ring of every grid is solid, so any point the
//! player can stand on lies strictly inside `(1, W - 1) x (1, H - 1)` and
//! every ray stops before it can leave the table.

use crate::error::GridError;
use crate::geometry::Point;

/// The 13x11 demo level.
pub const DEMO_MAP: [&str; 11] = [
    "1111111111111",
    "1000100000111",
    "1000100000111",
    "1000100000111",
    "1101111110111",
    "1101110110111",
    "1101100010111",
    "1101110110111",
    "1101110110111",
    "1100000000111",
    "1111111111111",
];

#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GridMap {
    /// Builds a grid from row-major cells, rejecting open boundaries.
    pub fn new(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, GridError> {
        if width < 3 || height < 3 {
            return Err(GridError::TooSmall { width, height });
        }
        if cells.len() != width * height {
            return Err(GridError::SizeMismatch {
                width,
                height,
                len: cells.len(),
            });
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        if let Some((x, y)) = grid.ring().find(|&(x, y)| !grid.is_solid(x, y)) {
            return Err(GridError::OpenBoundary { x, y });
        }
        Ok(grid)
    }

    /// Parses textual rows: `1` or `#` is solid, `0`, `.` or space is empty.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, symbol) in row.chars().enumerate() {
                let solid = match symbol {
                    '1' | '#' => true,
                    '0' | '.' | ' ' => false,
                    _ => return Err(GridError::UnknownSymbol { symbol, x, y }),
                };
                cells.push(solid);
            }
        }

        Self::new(width, height, cells)
    }

    pub fn demo() -> Self {
        // The demo table is a compile-time constant known to be closed.
        match Self::from_rows(&DEMO_MAP) {
            Ok(grid) => grid,
            Err(err) => unreachable!("demo map is malformed: {err}"),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// Whether cell `(x, y)` is occupied. Cells outside the table count as
    /// solid; the closed ring means the core never asks for one.
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.get(x, y).unwrap_or(true)
    }

    /// Solidity of the cell containing a world-space point.
    pub fn is_solid_at(&self, p: Point) -> bool {
        match (cell_index(p.x), cell_index(p.y)) {
            (Some(x), Some(y)) => self.get(x, y).unwrap_or(true),
            _ => true,
        }
    }

    fn ring(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (w, h) = (self.width, self.height);
        let rows = (0..w).flat_map(move |x| [(x, 0), (x, h - 1)]);
        let cols = (1..h - 1).flat_map(move |y| [(0, y), (w - 1, y)]);
        rows.chain(cols)
    }
}

/// `floor(v)` as a cell index, `None` for negative or non-finite values.
#[inline]
pub(crate) fn cell_index(v: f64) -> Option<usize> {
    let f = v.floor();
    if f.is_finite() && f >= 0.0 && f < usize::MAX as f64 {
        Some(f as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_map_is_closed() {
        let grid = GridMap::demo();
        assert_eq!(grid.width(), 13);
        assert_eq!(grid.height(), 11);
        assert!(grid.is_solid(4, 2));
        assert!(!grid.is_solid(3, 2));
        assert!(grid.is_solid(12, 5));
    }

    #[test]
    fn open_boundary_is_rejected() {
        let err = GridMap::from_rows(&["111", "100", "111"]).unwrap_err();
        assert_eq!(err, GridError::OpenBoundary { x: 2, y: 1 });

        let err = GridMap::from_rows(&["101", "101", "111"]).unwrap_err();
        assert_eq!(err, GridError::OpenBoundary { x: 1, y: 0 });
    }

    #[test]
    fn too_small_is_rejected() {
        let err = GridMap::from_rows(&["11", "11"]).unwrap_err();
        assert_eq!(err, GridError::TooSmall { width: 2, height: 2 });
        assert!(GridMap::new(0, 0, Vec::new()).is_err());
    }

    #[test]
    fn ragged_and_unknown_rows_are_rejected() {
        let err = GridMap::from_rows(&["111", "1.1", "11"]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRow {
                row: 2,
                len: 2,
                expected: 3
            }
        );

        let err = GridMap::from_rows(&["111", "1x1", "111"]).unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownSymbol {
                symbol: 'x',
                x: 1,
                y: 1
            }
        );
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let err = GridMap::new(3, 3, vec![true; 8]).unwrap_err();
        assert_eq!(
            err,
            GridError::SizeMismatch {
                width: 3,
                height: 3,
                len: 8
            }
        );
    }

    #[test]
    fn point_queries_floor_coordinates() {
        let grid = GridMap::demo();
        assert!(!grid.is_solid_at(Point::new(2.525, 2.5)));
        assert!(grid.is_solid_at(Point::new(4.015, 2.5)));
        assert!(grid.is_solid_at(Point::new(-0.5, 2.5)));
        assert!(grid.is_solid_at(Point::new(2.5, 99.0)));
        assert!(grid.is_solid_at(Point::new(f64::NAN, 2.5)));
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid = GridMap::demo();
        assert_eq!(grid.get(13, 0), None);
        assert_eq!(grid.get(1, 1), Some(false));
    }
}
