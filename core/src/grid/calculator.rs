use crate::grid::cells::MatrixGrid;
use crate::grid::validate::validate_and_prepare;
use crate::grid::wire::{decode_reply, ComputedMatrix};
use crate::prelude::{MatrixOperationEngine, MatrixResult, Operation};
use crate::telemetry::{CalculationCounts, LogManager, MetricsRecorder};

/// Validates operands, dispatches them to an engine and decodes the reply.
pub struct MatrixCalculator<E> {
    engine: E,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<E: MatrixOperationEngine> MatrixCalculator<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("matrix"),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn calculate(
        &self,
        grid_a: &MatrixGrid,
        grid_b: &MatrixGrid,
        operation: Operation,
    ) -> MatrixResult<ComputedMatrix> {
        let prepared = match validate_and_prepare(grid_a, grid_b, operation) {
            Ok(prepared) => prepared,
            Err(err) => {
                self.metrics.record_rejected();
                self.logger.warn(&format!("{} rejected: {}", operation, err));
                return Err(err);
            }
        };

        let reply = self.engine.perform(&prepared.to_request());
        match decode_reply(&reply) {
            Ok(matrix) => {
                self.metrics.record_completed();
                self.logger.record(&format!(
                    "{} {} {} -> {} rows",
                    prepared.shape_a,
                    operation.symbol(),
                    prepared.shape_b,
                    matrix.rows().len()
                ));
                Ok(matrix)
            }
            Err(err) => {
                self.metrics.record_engine_error();
                self.logger.warn(&format!("engine error: {}", err));
                Err(err)
            }
        }
    }

    pub fn counts(&self) -> CalculationCounts {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::engine::NdarrayEngine;
    use crate::prelude::{EngineRequest, MatrixError};
    use std::cell::RefCell;

    struct ScriptedEngine {
        reply: String,
        seen: RefCell<Vec<EngineRequest>>,
    }

    impl MatrixOperationEngine for ScriptedEngine {
        fn perform(&self, request: &EngineRequest) -> String {
            self.seen.borrow_mut().push(request.clone());
            self.reply.clone()
        }
    }

    fn grid(text: &[&[&str]]) -> MatrixGrid {
        MatrixGrid::from_rows(text.iter().map(|row| row.iter().copied())).unwrap()
    }

    #[test]
    fn engine_receives_serialized_operands() {
        let engine = ScriptedEngine {
            reply: "2.5 2;1 0.3333333".into(),
            seen: RefCell::new(Vec::new()),
        };
        let calculator = MatrixCalculator::new(engine);
        let a = grid(&[&["1", "2"], &["3", "4"]]);
        let b = grid(&[&["5"], &["6"]]);

        let result = calculator.calculate(&a, &b, Operation::Multiply).unwrap();
        assert_eq!(
            result.display_rows(),
            vec![vec!["2.5000", "2"], vec!["1", "0.3333"]]
        );

        let seen = calculator.engine().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].matrix_a, "1 2;3 4");
        assert_eq!(seen[0].matrix_b, "5;6");
        assert_eq!(
            (seen[0].rows_a, seen[0].cols_a, seen[0].rows_b, seen[0].cols_b),
            (2, 2, 2, 1)
        );
        assert_eq!(seen[0].operation, 2);
    }

    #[test]
    fn validation_failure_never_reaches_engine() {
        let engine = ScriptedEngine {
            reply: "1".into(),
            seen: RefCell::new(Vec::new()),
        };
        let calculator = MatrixCalculator::new(engine);
        let a = grid(&[&["1", "2"]]);

        let err = calculator.calculate(&a, &a, Operation::Multiply).unwrap_err();
        assert!(matches!(err, MatrixError::InnerDimensionMismatch { .. }));
        assert!(calculator.engine().seen.borrow().is_empty());
        assert_eq!(calculator.counts().rejected, 1);
    }

    #[test]
    fn engine_error_is_surfaced_verbatim() {
        let calculator = MatrixCalculator::new(NdarrayEngine::new());
        let a = grid(&[&["1", "0"], &["0", "1"]]);
        let singular = grid(&[&["0", "0"], &["0", "0"]]);

        let err = calculator
            .calculate(&a, &singular, Operation::Divide)
            .unwrap_err();
        assert_eq!(
            err,
            MatrixError::ExternalComputation("Matrix is singular, cannot be inverted".into())
        );
        assert_eq!(calculator.counts().engine_errors, 1);
    }

    #[test]
    fn reference_engine_round_trip() {
        let calculator = MatrixCalculator::new(NdarrayEngine::new());
        let a = grid(&[&["1", "2"], &["3", "4"]]);
        let b = grid(&[&["1", "0"], &["0", "3"]]);

        let result = calculator.calculate(&a, &b, Operation::Divide).unwrap();
        assert_eq!(
            result.display_rows(),
            vec![vec!["1", "0.6667"], vec!["3", "1.3333"]]
        );
        assert_eq!(calculator.counts().completed, 1);
    }
}
