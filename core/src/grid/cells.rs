use crate::grid::shape::MatrixShape;
use crate::prelude::{MatrixError, MatrixResult};
use serde::Serialize;

/// Operand grid of textual cells.
///
/// Grids are values: editing a cell or resizing returns a new grid and
/// leaves the original untouched. `rows.len() == shape.rows()` and every
/// row has `shape.cols()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixGrid {
    shape: MatrixShape,
    rows: Vec<Vec<String>>,
}

impl MatrixGrid {
    /// Grid of the given shape with every cell empty.
    pub fn empty(shape: MatrixShape) -> Self {
        Self {
            shape,
            rows: vec![vec![String::new(); shape.cols()]; shape.rows()],
        }
    }

    /// Builds a grid from rectangular rows of cell text.
    pub fn from_rows<R, C>(rows: R) -> MatrixResult<Self>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(MatrixError::EmptyGrid);
        }
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(MatrixError::RaggedGrid {
                row,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            shape: MatrixShape::new(rows.len(), expected),
            rows,
        })
    }

    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copy of this grid with one cell replaced.
    pub fn with_cell(&self, row: usize, col: usize, value: impl Into<String>) -> MatrixResult<Self> {
        if !self.shape.contains(row, col) {
            return Err(MatrixError::CellOutOfRange {
                row,
                col,
                rows: self.shape.rows(),
                cols: self.shape.cols(),
            });
        }
        let mut next = self.clone();
        next.rows[row][col] = value.into();
        Ok(next)
    }

    /// Grid of `shape` that keeps every cell present in both shapes and
    /// leaves the rest empty.
    pub fn reconcile(&self, shape: MatrixShape) -> Self {
        let rows = (0..shape.rows())
            .map(|i| {
                (0..shape.cols())
                    .map(|j| self.cell(i, j).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        Self { shape, rows }
    }
}

impl Default for MatrixGrid {
    fn default() -> Self {
        Self::empty(MatrixShape::default())
    }
}
