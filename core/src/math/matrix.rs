use ndarray::{Array2, ArrayView2};

/// Failures of the dense matrix arithmetic behind the reference engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("Matrix dimensions don't match for {0}")]
    DimensionMismatch(&'static str),
    #[error("Divisor matrix must be square for division")]
    NonSquare,
    #[error("Matrix is singular, cannot be inverted")]
    Singular,
}

pub struct MatrixHelper;

impl MatrixHelper {
    pub fn add(lhs: ArrayView2<f64>, rhs: ArrayView2<f64>) -> Result<Array2<f64>, ArithmeticError> {
        if lhs.dim() != rhs.dim() {
            return Err(ArithmeticError::DimensionMismatch("addition"));
        }
        Ok(&lhs + &rhs)
    }

    pub fn subtract(
        lhs: ArrayView2<f64>,
        rhs: ArrayView2<f64>,
    ) -> Result<Array2<f64>, ArithmeticError> {
        if lhs.dim() != rhs.dim() {
            return Err(ArithmeticError::DimensionMismatch("subtraction"));
        }
        Ok(&lhs - &rhs)
    }

    pub fn multiply(
        lhs: ArrayView2<f64>,
        rhs: ArrayView2<f64>,
    ) -> Result<Array2<f64>, ArithmeticError> {
        if lhs.ncols() != rhs.nrows() {
            return Err(ArithmeticError::DimensionMismatch("multiplication"));
        }
        Ok(lhs.dot(&rhs))
    }

    /// Gauss-Jordan inverse with partial pivoting.
    pub fn inverse(matrix: ArrayView2<f64>) -> Result<Array2<f64>, ArithmeticError> {
        let n = matrix.nrows();
        if n != matrix.ncols() {
            return Err(ArithmeticError::NonSquare);
        }

        let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if scale == 0.0 {
            return Err(ArithmeticError::Singular);
        }
        let tolerance = scale * f64::EPSILON * n as f64;

        let mut work = matrix.to_owned();
        let mut inverse = Array2::<f64>::eye(n);

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&a, &b| work[[a, col]].abs().total_cmp(&work[[b, col]].abs()))
                .unwrap_or(col);
            let pivot = work[[pivot_row, col]];
            if pivot.abs() <= tolerance {
                return Err(ArithmeticError::Singular);
            }

            if pivot_row != col {
                for k in 0..n {
                    work.swap([pivot_row, k], [col, k]);
                    inverse.swap([pivot_row, k], [col, k]);
                }
            }

            for k in 0..n {
                work[[col, k]] /= pivot;
                inverse[[col, k]] /= pivot;
            }

            for row in (0..n).filter(|&row| row != col) {
                let factor = work[[row, col]];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    let work_delta = factor * work[[col, k]];
                    let inverse_delta = factor * inverse[[col, k]];
                    work[[row, k]] -= work_delta;
                    inverse[[row, k]] -= inverse_delta;
                }
            }
        }

        Ok(inverse)
    }

    /// `lhs · rhs⁻¹`.
    pub fn divide(lhs: ArrayView2<f64>, rhs: ArrayView2<f64>) -> Result<Array2<f64>, ArithmeticError> {
        let inverse = Self::inverse(rhs)?;
        Self::multiply(lhs, inverse.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn assert_close(actual: &Array2<f64>, expected: &Array2<f64>) {
        assert_eq!(actual.dim(), expected.dim());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn multiply_follows_row_by_column() {
        let lhs = array![[1.0, 2.0], [3.0, 4.0]];
        let rhs = array![[5.0, 6.0], [7.0, 8.0]];
        let product = MatrixHelper::multiply(lhs.view(), rhs.view()).unwrap();
        assert_eq!(product, array![[19.0, 22.0], [43.0, 50.0]]);
    }

    #[test]
    fn add_rejects_mismatched_dimensions() {
        let lhs = array![[1.0, 2.0]];
        let rhs = array![[1.0], [2.0]];
        assert_eq!(
            MatrixHelper::add(lhs.view(), rhs.view()),
            Err(ArithmeticError::DimensionMismatch("addition"))
        );
    }

    #[test]
    fn inverse_of_invertible_matrix() {
        let matrix = array![[4.0, 7.0], [2.0, 6.0]];
        let inverse = MatrixHelper::inverse(matrix.view()).unwrap();
        assert_close(&inverse, &array![[0.6, -0.7], [-0.2, 0.4]]);
    }

    #[test]
    fn inverse_needs_row_swap() {
        let matrix = array![[0.0, 1.0], [1.0, 0.0]];
        let inverse = MatrixHelper::inverse(matrix.view()).unwrap();
        assert_close(&inverse, &matrix);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let matrix = array![[1.0, 2.0], [2.0, 4.0]];
        assert_eq!(
            MatrixHelper::inverse(matrix.view()),
            Err(ArithmeticError::Singular)
        );
        assert_eq!(
            MatrixHelper::inverse(Array2::<f64>::zeros((2, 2)).view()),
            Err(ArithmeticError::Singular)
        );
    }

    #[test]
    fn divide_by_identity_is_noop() {
        let lhs = array![[1.0, 2.0, 3.0]];
        let quotient = MatrixHelper::divide(lhs.view(), Array2::eye(3).view()).unwrap();
        assert_close(&quotient, &lhs);
    }
}
