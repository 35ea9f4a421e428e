use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{MazeError, Result};

/// Value of a cell that can not be walked on. Everything else is walkable.
pub const OBSTACLE: u8 = 0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The point one step away in `direction`, or `None` if that would leave
    /// the non-negative quadrant.
    pub fn step(self, direction: Direction) -> Option<Point> {
        let (d_row, d_col) = direction.delta();
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// The direction leading from `self` to an adjacent `other`.
    pub fn direction_to(self, other: Point) -> Option<Direction> {
        let d_row = other.row as isize - self.row as isize;
        let d_col = other.col as isize - self.col as isize;
        Direction::from_delta(d_row, d_col)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Point { row, col }
    }
}

/// A rectangular raster of 8-bit classification values, stored row-major with
/// the origin in the top left corner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Wrap a row-major buffer. Fails if it does not hold exactly
    /// `rows * columns` values.
    pub fn new(rows: usize, columns: usize, cells: Vec<u8>) -> Result<Self> {
        if rows.checked_mul(columns) != Some(cells.len()) {
            return Err(MazeError::MalformedGrid {
                rows,
                columns,
                found: cells.len(),
            });
        }

        Ok(Self {
            rows,
            columns,
            cells,
        })
    }

    /// Build a grid from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.iter().map(Vec::len).sum());

        for (row, values) in rows.iter().enumerate() {
            if values.len() != columns {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Self::new(rows.len(), columns, cells)
    }

    pub fn filled(rows: usize, columns: usize, value: u8) -> Result<Self> {
        let count = rows
            .checked_mul(columns)
            .ok_or(MazeError::TooLarge { rows, columns })?;

        Ok(Self {
            rows,
            columns,
            cells: vec![value; count],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(height, width)` of the grid
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.columns
    }

    /// True for cells off the one-cell-thick outer ring.
    pub fn is_interior(&self, point: Point) -> bool {
        point.row > 0 && point.row + 1 < self.rows && point.col > 0 && point.col + 1 < self.columns
    }

    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| point.row * self.columns + point.col)
    }

    pub fn point_at(&self, index: usize) -> Point {
        Point {
            row: index / self.columns,
            col: index % self.columns,
        }
    }

    pub fn get(&self, point: Point) -> Option<u8> {
        self.index_of(point).map(|i| self.cells[i])
    }

    pub fn is_walkable(&self, point: Point) -> bool {
        self.get(point).is_some_and(|v| v != OBSTACLE)
    }

    /// Overwrite a single cell. Points outside the grid are ignored.
    pub fn set(&mut self, point: Point, value: u8) {
        if let Some(i) = self.index_of(point) {
            self.cells[i] = value;
        }
    }

    /// Iterate over every cell together with its value, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.point_at(i), v))
    }

    /// Scales the grid by the given factor, i.e. to make it twice as large, pass 2.
    /// Every cell is repeated in a `factor` x `factor` block. The grid is left
    /// untouched if the scaled size does not fit in memory addressing.
    pub fn scale_up(&mut self, factor: usize) -> Result<()> {
        let too_large = MazeError::TooLarge {
            rows: self.rows.saturating_mul(factor),
            columns: self.columns.saturating_mul(factor),
        };
        let (Some(rows), Some(columns)) = (
            self.rows.checked_mul(factor),
            self.columns.checked_mul(factor),
        ) else {
            return Err(too_large);
        };
        let count = rows.checked_mul(columns).ok_or(too_large)?;
        let mut new_cells = vec![OBSTACLE; count];

        for (i, &value) in self.cells.iter().enumerate() {
            let Point { row, col } = self.point_at(i);
            for r in 0..factor {
                for c in 0..factor {
                    new_cells[(row * factor + r) * columns + col * factor + c] = value;
                }
            }
        }

        self.rows = rows;
        self.columns = columns;
        self.cells = new_cells;

        Ok(())
    }

    /// Render the grid like `Display` does, with the cells of `path` drawn as `*`.
    pub fn render_path(&self, path: &[Point]) -> String {
        let mut out = String::with_capacity((self.columns + 1) * self.rows);

        for row in 0..self.rows {
            for col in 0..self.columns {
                let point = Point { row, col };
                out.push(if path.contains(&point) {
                    '*'
                } else if self.is_walkable(point) {
                    ' '
                } else {
                    'X'
                });
            }
            out.push('\n');
        }

        out
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render_path(&[]))
    }
}
