use serde::Serialize;
use std::sync::Mutex;

/// Counters for matrix calculations, shareable across threads.
pub struct MetricsRecorder {
    inner: Mutex<CalculationCounts>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CalculationCounts {
    pub completed: usize,
    /// Requests refused before reaching the engine.
    pub rejected: usize,
    pub engine_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CalculationCounts::default()),
        }
    }

    pub fn record_completed(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.completed += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.rejected += 1;
        }
    }

    pub fn record_engine_error(&self) {
        if let Ok(mut counts) = self.inner.lock() {
            counts.engine_errors += 1;
        }
    }

    pub fn snapshot(&self) -> CalculationCounts {
        self.inner.lock().map(|counts| *counts).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let metrics = MetricsRecorder::new();
        metrics.record_completed();
        metrics.record_completed();
        metrics.record_rejected();
        assert_eq!(
            metrics.snapshot(),
            CalculationCounts {
                completed: 2,
                rejected: 1,
                engine_errors: 0
            }
        );
    }
}
