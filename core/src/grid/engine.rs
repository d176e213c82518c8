use crate::grid::wire::{encode_rows, ERROR_PREFIX, ROW_SEPARATOR};
use crate::math::matrix::{ArithmeticError, MatrixHelper};
use crate::prelude::{EngineRequest, MatrixOperationEngine, Operation};
use log::debug;
use ndarray::Array2;

#[derive(thiserror::Error, Debug)]
enum EngineFailure {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
    #[error("Invalid operation code")]
    InvalidOperation,
    #[error("Invalid matrix dimensions {0}x{1}")]
    InvalidDimensions(i32, i32),
}

/// In-process engine built on `ndarray`.
///
/// Divide is `A · B⁻¹` and fails on a singular divisor. Operand text is
/// read leniently: missing or unreadable trailing values stay zero and
/// extra values are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdarrayEngine;

impl NdarrayEngine {
    pub fn new() -> Self {
        Self
    }

    fn compute(&self, request: &EngineRequest) -> Result<Array2<f64>, EngineFailure> {
        let a = decode_operand(&request.matrix_a, request.rows_a, request.cols_a)?;
        let b = decode_operand(&request.matrix_b, request.rows_b, request.cols_b)?;

        let operation =
            Operation::from_code(request.operation).ok_or(EngineFailure::InvalidOperation)?;
        let result = match operation {
            Operation::Add => MatrixHelper::add(a.view(), b.view())?,
            Operation::Subtract => MatrixHelper::subtract(a.view(), b.view())?,
            Operation::Multiply => MatrixHelper::multiply(a.view(), b.view())?,
            Operation::Divide => MatrixHelper::divide(a.view(), b.view())?,
        };
        Ok(result)
    }
}

impl MatrixOperationEngine for NdarrayEngine {
    fn perform(&self, request: &EngineRequest) -> String {
        match self.compute(request) {
            Ok(result) => {
                let rows: Vec<Vec<f64>> = result.rows().into_iter().map(|row| row.to_vec()).collect();
                encode_rows(&rows)
            }
            Err(err) => {
                debug!("engine rejected operation {}: {}", request.operation, err);
                format!("{} {}", ERROR_PREFIX, err)
            }
        }
    }
}

fn decode_operand(text: &str, rows: i32, cols: i32) -> Result<Array2<f64>, EngineFailure> {
    let (Ok(row_count), Ok(col_count)) = (usize::try_from(rows), usize::try_from(cols)) else {
        return Err(EngineFailure::InvalidDimensions(rows, cols));
    };
    if row_count == 0 || col_count == 0 {
        return Err(EngineFailure::InvalidDimensions(rows, cols));
    }

    let mut matrix = Array2::<f64>::zeros((row_count, col_count));
    for (i, row) in text.split(ROW_SEPARATOR).take(row_count).enumerate() {
        let values = row.split_whitespace().map_while(|token| token.parse::<f64>().ok());
        for (j, value) in values.take(col_count).enumerate() {
            matrix[[i, j]] = value;
        }
    }
    Ok(matrix)
}
