//! Core logic for the WiFi survey and matrix calculator tools.
//!
//! `signal` turns raw scan captures into fixed-length series and display
//! values, `survey` keeps named locations for comparison, and `grid`
//! reconciles, validates and dispatches matrix operands to a pluggable
//! [`MatrixOperationEngine`].

pub mod grid;
pub mod math;
pub mod prelude;
pub mod signal;
pub mod survey;
pub mod telemetry;

pub use prelude::{EngineRequest, MatrixError, MatrixOperationEngine, MatrixResult, Operation};
