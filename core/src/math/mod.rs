pub mod matrix;
pub mod stats;

pub use matrix::{ArithmeticError, MatrixHelper};
pub use stats::StatsHelper;
