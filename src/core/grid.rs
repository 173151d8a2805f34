use std::fmt;
use std::ops::Index;

pub type Color = u8;

pub const BACKGROUND: Color = 0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
}

/// Rectangular R×C array of colors, row-major.
///
/// Cells live in one flat buffer, so every row has the same length by
/// construction. Equality compares shape and cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Color>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Color>>) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged { row: i, expected: cols, found: row.len() });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> Color,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Ok(Self { rows, cols, cells })
    }

    pub fn filled(rows: usize, cols: usize, color: Color) -> Result<Self, GridError> {
        Self::from_fn(rows, cols, |_, _| color)
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.shape() == other.shape()
    }

    pub fn get(&self, r: usize, c: usize) -> Option<Color> {
        if r < self.rows && c < self.cols {
            Some(self.cells[r * self.cols + c])
        } else {
            None
        }
    }

    pub fn row(&self, r: usize) -> &[Color] {
        assert!(r < self.rows, "row {r} outside {}x{} grid", self.rows, self.cols);
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks_exact(self.cols)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Color;

    fn index(&self, (r, c): (usize, usize)) -> &Color {
        assert!(r < self.rows && c < self.cols, "cell ({r}, {c}) outside {}x{} grid", self.rows, self.cols);
        &self.cells[r * self.cols + c]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, c) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_row_major_order() {
        let g = Grid::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g[(1, 0)], 4);
        assert_eq!(g.row(0), &[1, 2, 3]);
        assert_eq!(g.cells(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(g.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Grid::new(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err, GridError::Ragged { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Grid::new(Vec::new()).unwrap_err(), GridError::Empty);
        assert_eq!(Grid::new(vec![vec![]]).unwrap_err(), GridError::Empty);
        assert_eq!(Grid::filled(0, 3, 0).unwrap_err(), GridError::Empty);
    }

    #[test]
    fn get_is_bounds_checked() {
        let g = Grid::filled(2, 2, 7).unwrap();
        assert_eq!(g.get(1, 1), Some(7));
        assert_eq!(g.get(2, 0), None);
        assert_eq!(g.get(0, 2), None);
    }

    #[test]
    #[should_panic(expected = "row 2 outside 2x3 grid")]
    fn row_out_of_range_panics_with_shape() {
        let g = Grid::filled(2, 3, 1).unwrap();
        let _ = g.row(2);
    }

    #[test]
    fn equality_needs_same_shape() {
        let row = Grid::new(vec![vec![1, 2, 3, 4]]).unwrap();
        let square = Grid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(row.cells(), square.cells());
        assert_ne!(row, square);
        assert!(!row.same_shape(&square));
    }

    #[test]
    fn display_space_separated_rows() {
        let g = Grid::new(vec![vec![0, 1], vec![2, 3]]).unwrap();
        assert_eq!(g.to_string(), "0 1\n2 3");
    }
}
