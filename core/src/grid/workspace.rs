use crate::grid::calculator::MatrixCalculator;
use crate::grid::cells::MatrixGrid;
use crate::grid::shape::MatrixShape;
use crate::grid::wire::ComputedMatrix;
use crate::prelude::{MatrixOperationEngine, MatrixResult, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// Editing state of the calculator: two operand grids and the selected
/// operation. Every edit swaps in a new grid value.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixWorkspace {
    a: MatrixGrid,
    b: MatrixGrid,
    operation: Operation,
}

impl MatrixWorkspace {
    pub fn new() -> Self {
        Self {
            a: MatrixGrid::default(),
            b: MatrixGrid::default(),
            operation: Operation::Add,
        }
    }

    pub fn grid(&self, operand: Operand) -> &MatrixGrid {
        match operand {
            Operand::A => &self.a,
            Operand::B => &self.b,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn select_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    /// Reconciles both grids against the requested shapes.
    pub fn resize(&mut self, shape_a: MatrixShape, shape_b: MatrixShape) {
        self.a = self.a.reconcile(shape_a);
        self.b = self.b.reconcile(shape_b);
    }

    /// Applies a typed dimension edit to one operand. Text that is not a
    /// positive integer yields a dimension of 1.
    pub fn set_dimension(&mut self, operand: Operand, axis: Axis, text: &str) {
        let current = self.grid(operand).shape();
        let (rows, cols) = match axis {
            Axis::Rows => (text.to_string(), current.cols().to_string()),
            Axis::Cols => (current.rows().to_string(), text.to_string()),
        };
        let requested = MatrixShape::parse_request(&rows, &cols);

        let (shape_a, shape_b) = match operand {
            Operand::A => (requested, self.b.shape()),
            Operand::B => (self.a.shape(), requested),
        };
        self.resize(shape_a, shape_b);
    }

    pub fn set_cell(
        &mut self,
        operand: Operand,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> MatrixResult<()> {
        let next = self.grid(operand).with_cell(row, col, value)?;
        match operand {
            Operand::A => self.a = next,
            Operand::B => self.b = next,
        }
        Ok(())
    }

    pub fn calculate<E: MatrixOperationEngine>(
        &self,
        calculator: &MatrixCalculator<E>,
    ) -> MatrixResult<ComputedMatrix> {
        calculator.calculate(&self.a, &self.b, self.operation)
    }
}

impl Default for MatrixWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
