//! Grid grammar shared with the computation engine.
//!
//! Values within a row are separated by a single space and rows by `;`,
//! so a 2x2 grid with rows (1, 2) and (3, 4) reads `"1 2;3 4"`. Engine
//! failures are replies starting with [`ERROR_PREFIX`].

use crate::grid::cells::MatrixGrid;
use crate::prelude::{MatrixError, MatrixResult};
use serde::Serialize;

pub const ROW_SEPARATOR: char = ';';
pub const VALUE_SEPARATOR: char = ' ';
pub const ERROR_PREFIX: &str = "Error:";

/// Encodes numeric rows in grid grammar.
pub fn encode_rows<R: AsRef<[f64]>>(rows: &[R]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push(ROW_SEPARATOR);
        }
        for (j, value) in row.as_ref().iter().enumerate() {
            if j > 0 {
                out.push(VALUE_SEPARATOR);
            }
            out.push_str(&value.to_string());
        }
    }
    out
}

/// Splits grid-grammar text into a grid of unvalidated cell text.
pub fn parse_grid_text(text: &str) -> MatrixResult<MatrixGrid> {
    MatrixGrid::from_rows(
        text.split(ROW_SEPARATOR)
            .map(|row| row.split_whitespace().map(str::to_string).collect::<Vec<_>>()),
    )
}

/// Renders a result value: whole numbers without a decimal point, anything
/// else (including infinities) with four decimals.
pub fn format_cell(value: f64) -> String {
    if value.is_finite() && value == value.trunc() {
        // `+ 0.0` turns -0.0 into 0.0.
        format!("{:.0}", value + 0.0)
    } else {
        format!("{:.4}", value)
    }
}

/// One cell of an engine reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultCell {
    Number(f64),
    /// Token that did not parse as a number, kept verbatim.
    Raw(String),
}

impl ResultCell {
    pub fn display(&self) -> String {
        match self {
            ResultCell::Number(value) => format_cell(*value),
            ResultCell::Raw(token) => token.clone(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ResultCell::Number(value) => Some(*value),
            ResultCell::Raw(_) => None,
        }
    }
}

/// Decoded successful engine reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedMatrix {
    rows: Vec<Vec<ResultCell>>,
}

impl ComputedMatrix {
    pub fn parse(text: &str) -> Self {
        let rows = text
            .split(ROW_SEPARATOR)
            .map(|row| {
                row.split_whitespace()
                    .map(|token| match token.parse::<f64>() {
                        Ok(value) => ResultCell::Number(value),
                        Err(_) => ResultCell::Raw(token.to_string()),
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<ResultCell>] {
        &self.rows
    }

    /// Cell text ready for display, row by row.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(ResultCell::display).collect())
            .collect()
    }
}

/// Interprets raw engine output, surfacing `"Error: ..."` replies as
/// [`MatrixError::ExternalComputation`].
pub fn decode_reply(reply: &str) -> MatrixResult<ComputedMatrix> {
    match reply.strip_prefix(ERROR_PREFIX) {
        Some(message) => Err(MatrixError::ExternalComputation(
            message.trim_start().to_string(),
        )),
        None => Ok(ComputedMatrix::parse(reply)),
    }
}
