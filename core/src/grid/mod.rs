//! Operand grids for the matrix calculator: resizing, validation, the
//! engine wire format and a reference engine.

pub mod calculator;
pub mod cells;
pub mod engine;
pub mod shape;
pub mod validate;
pub mod wire;
pub mod workspace;

pub use calculator::MatrixCalculator;
pub use cells::MatrixGrid;
pub use engine::NdarrayEngine;
pub use shape::{MatrixShape, MAX_REQUESTED_DIMENSION};
pub use validate::{validate_and_prepare, PreparedOperation};
pub use wire::{decode_reply, format_cell, ComputedMatrix, ResultCell};
pub use workspace::{Axis, MatrixWorkspace, Operand};
