use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matrix operation requested from the engine, carried on the wire as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Fourth engine operation. What "divide" means is decided by the
    /// [`MatrixOperationEngine`] implementation, not by this crate.
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn code(self) -> i32 {
        match self {
            Operation::Add => 0,
            Operation::Subtract => 1,
            Operation::Multiply => 2,
            Operation::Divide => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        };
        f.write_str(name)
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" | "x" | "×" => Ok(Operation::Multiply),
            "divide" | "div" | "/" | "÷" => Ok(Operation::Divide),
            other => Err(MatrixError::UnknownOperation(other.to_string())),
        }
    }
}

/// Errors raised while reconciling, validating or dispatching matrix operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("Invalid value at Matrix {label}[{}][{}]", .row + 1, .col + 1)]
    InvalidCell { label: char, row: usize, col: usize },
    #[error("Matrices must have the same dimensions for addition or subtraction ({rows_a}x{cols_a} vs {rows_b}x{cols_b})")]
    ShapeMismatch {
        rows_a: usize,
        cols_a: usize,
        rows_b: usize,
        cols_b: usize,
    },
    #[error("Number of columns in Matrix A ({cols_a}) must equal number of rows in Matrix B ({rows_b})")]
    InnerDimensionMismatch { cols_a: usize, rows_b: usize },
    #[error("Matrix B must be square for division ({rows}x{cols})")]
    NonSquareDivisor { rows: usize, cols: usize },
    #[error("{0}")]
    ExternalComputation(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} grid")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

pub type MatrixResult<T> = Result<T, MatrixError>;

/// Arguments handed across the engine boundary: both operands in grid
/// grammar, their dimensions and the operation code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest {
    pub matrix_a: String,
    pub matrix_b: String,
    pub rows_a: i32,
    pub cols_a: i32,
    pub rows_b: i32,
    pub cols_b: i32,
    pub operation: i32,
}

/// Pluggable computation routine behind the matrix calculator.
///
/// Implementations reply with grid-grammar text on success or with a string
/// starting with `"Error:"` followed by a human-readable message.
pub trait MatrixOperationEngine {
    fn perform(&self, request: &EngineRequest) -> String;
}

impl<E: MatrixOperationEngine + ?Sized> MatrixOperationEngine for &E {
    fn perform(&self, request: &EngineRequest) -> String {
        (**self).perform(request)
    }
}

impl<E: MatrixOperationEngine + ?Sized> MatrixOperationEngine for Box<E> {
    fn perform(&self, request: &EngineRequest) -> String {
        (**self).perform(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_codes_match_engine_contract() {
        assert_eq!(Operation::Add.code(), 0);
        assert_eq!(Operation::Subtract.code(), 1);
        assert_eq!(Operation::Multiply.code(), 2);
        assert_eq!(Operation::Divide.code(), 3);
        assert_eq!(Operation::from_code(2), Some(Operation::Multiply));
        assert_eq!(Operation::from_code(7), None);
    }

    #[test]
    fn operation_parses_names_and_symbols() {
        assert_eq!("Multiply".parse::<Operation>().unwrap(), Operation::Multiply);
        assert_eq!("/".parse::<Operation>().unwrap(), Operation::Divide);
        assert_eq!(
            "pow".parse::<Operation>(),
            Err(MatrixError::UnknownOperation("pow".into()))
        );
    }

    #[test]
    fn operation_serializes_snake_case() {
        let json = serde_json::to_string(&Operation::Subtract).unwrap();
        assert_eq!(json, "\"subtract\"");
    }

    #[test]
    fn invalid_cell_message_is_one_based() {
        let err = MatrixError::InvalidCell {
            label: 'B',
            row: 0,
            col: 2,
        };
        assert_eq!(err.to_string(), "Invalid value at Matrix B[1][3]");
    }
}
