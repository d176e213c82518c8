use crate::grid::cells::MatrixGrid;
use crate::grid::shape::MatrixShape;
use crate::grid::wire::encode_rows;
use crate::prelude::{EngineRequest, MatrixError, MatrixResult, Operation};

/// Operand pair that passed validation, serialized for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedOperation {
    pub operation: Operation,
    pub shape_a: MatrixShape,
    pub shape_b: MatrixShape,
    pub matrix_a: String,
    pub matrix_b: String,
}

impl PreparedOperation {
    pub fn to_request(&self) -> EngineRequest {
        EngineRequest {
            matrix_a: self.matrix_a.clone(),
            matrix_b: self.matrix_b.clone(),
            rows_a: dimension(self.shape_a.rows()),
            cols_a: dimension(self.shape_a.cols()),
            rows_b: dimension(self.shape_b.rows()),
            cols_b: dimension(self.shape_b.cols()),
            operation: self.operation.code(),
        }
    }
}

fn dimension(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Parses one cell as a finite decimal number.
pub fn parse_cell(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_values(grid: &MatrixGrid, label: char) -> MatrixResult<Vec<Vec<f64>>> {
    grid.rows()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, text)| {
                    parse_cell(text).ok_or(MatrixError::InvalidCell { label, row, col })
                })
                .collect::<MatrixResult<Vec<f64>>>()
        })
        .collect()
}

/// Checks the dimension rule of `operation` for the two shapes.
pub fn check_shapes(
    shape_a: MatrixShape,
    shape_b: MatrixShape,
    operation: Operation,
) -> MatrixResult<()> {
    match operation {
        Operation::Add | Operation::Subtract if shape_a != shape_b => {
            Err(MatrixError::ShapeMismatch {
                rows_a: shape_a.rows(),
                cols_a: shape_a.cols(),
                rows_b: shape_b.rows(),
                cols_b: shape_b.cols(),
            })
        }
        Operation::Multiply if shape_a.cols() != shape_b.rows() => {
            Err(MatrixError::InnerDimensionMismatch {
                cols_a: shape_a.cols(),
                rows_b: shape_b.rows(),
            })
        }
        Operation::Divide if !shape_b.is_square() => Err(MatrixError::NonSquareDivisor {
            rows: shape_b.rows(),
            cols: shape_b.cols(),
        }),
        _ => Ok(()),
    }
}

/// Validates both operands and serializes them for the engine.
///
/// Cells are checked first, A before B in row-major order, and the first
/// offending cell is reported. The shape rule of the operation is checked
/// after that.
pub fn validate_and_prepare(
    grid_a: &MatrixGrid,
    grid_b: &MatrixGrid,
    operation: Operation,
) -> MatrixResult<PreparedOperation> {
    let values_a = parse_values(grid_a, 'A')?;
    let values_b = parse_values(grid_b, 'B')?;
    check_shapes(grid_a.shape(), grid_b.shape(), operation)?;

    Ok(PreparedOperation {
        operation,
        shape_a: grid_a.shape(),
        shape_b: grid_b.shape(),
        matrix_a: encode_rows(&values_a),
        matrix_b: encode_rows(&values_b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(rows: usize, cols: usize) -> MatrixGrid {
        let cells = (0..rows).map(move |i| (0..cols).map(move |j| (i * cols + j + 1).to_string()));
        MatrixGrid::from_rows(cells).unwrap()
    }

    #[test]
    fn add_requires_equal_shapes() {
        let err = validate_and_prepare(&filled(2, 2), &filled(2, 3), Operation::Add).unwrap_err();
        assert!(matches!(err, MatrixError::ShapeMismatch { cols_b: 3, .. }));
        assert!(validate_and_prepare(&filled(2, 2), &filled(2, 2), Operation::Subtract).is_ok());
    }

    #[test]
    fn multiply_requires_inner_dimension_match() {
        let err =
            validate_and_prepare(&filled(2, 3), &filled(4, 2), Operation::Multiply).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InnerDimensionMismatch {
                cols_a: 3,
                rows_b: 4
            }
        );
        assert!(validate_and_prepare(&filled(2, 3), &filled(3, 1), Operation::Multiply).is_ok());
    }

    #[test]
    fn divide_requires_square_divisor() {
        let err = validate_and_prepare(&filled(2, 2), &filled(2, 3), Operation::Divide).unwrap_err();
        assert_eq!(err, MatrixError::NonSquareDivisor { rows: 2, cols: 3 });
        assert!(validate_and_prepare(&filled(4, 3), &filled(3, 3), Operation::Divide).is_ok());
    }

    #[test]
    fn first_invalid_cell_is_reported_before_shape() {
        let a = filled(2, 2).with_cell(1, 0, "x").unwrap().with_cell(1, 1, "").unwrap();
        let b = filled(3, 3).with_cell(0, 0, "").unwrap();
        let err = validate_and_prepare(&a, &b, Operation::Add).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidCell {
                label: 'A',
                row: 1,
                col: 0
            }
        );

        let err = validate_and_prepare(&filled(2, 2), &b, Operation::Add).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidCell {
                label: 'B',
                row: 0,
                col: 0
            }
        );
    }

    #[test]
    fn non_finite_cells_are_invalid() {
        assert_eq!(parse_cell(" 2.5 "), Some(2.5));
        assert_eq!(parse_cell("inf"), None);
        assert_eq!(parse_cell("NaN"), None);
        assert_eq!(parse_cell(""), None);
    }

    #[test]
    fn prepared_operands_use_grid_grammar() {
        let a = MatrixGrid::from_rows([["1", "2"], ["3", "4.0"]]).unwrap();
        let prepared = validate_and_prepare(&a, &a, Operation::Multiply).unwrap();
        assert_eq!(prepared.matrix_a, "1 2;3 4");

        let request = prepared.to_request();
        assert_eq!(request.operation, 2);
        assert_eq!((request.rows_a, request.cols_b), (2, 2));
    }
}
