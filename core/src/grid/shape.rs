use serde::Serialize;
use std::fmt;

/// Largest side a requested shape may have. Grids built from existing rows
/// are not limited.
pub const MAX_REQUESTED_DIMENSION: usize = 100;

/// Dimensions of an operand grid. Both sides are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MatrixShape {
    rows: usize,
    cols: usize,
}

impl MatrixShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Shape for a requested size; zero or negative requests become 1 and
    /// requests above [`MAX_REQUESTED_DIMENSION`] are capped.
    pub fn from_request(rows: i64, cols: i64) -> Self {
        Self::new(floor_dimension(rows), floor_dimension(cols))
    }

    /// Shape for dimension text as typed by a user; text that does not parse
    /// as an integer counts as a request for 1. Bounds follow
    /// [`MatrixShape::from_request`].
    pub fn parse_request(rows: &str, cols: &str) -> Self {
        Self::from_request(parse_dimension(rows), parse_dimension(cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for MatrixShape {
    fn default() -> Self {
        Self::new(2, 2)
    }
}

impl fmt::Display for MatrixShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn floor_dimension(requested: i64) -> usize {
    usize::try_from(requested.max(1))
        .unwrap_or(MAX_REQUESTED_DIMENSION)
        .min(MAX_REQUESTED_DIMENSION)
}

fn parse_dimension(text: &str) -> i64 {
    text.trim().parse().unwrap_or(1)
}
