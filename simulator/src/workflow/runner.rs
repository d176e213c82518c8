use crate::capture::session::{CaptureError, CaptureSession, ScanSource};
use crate::generator::fallback::fallback_capture;
use crate::workflow::config::{CaptureMode, MatrixJob, WorkflowConfig};
use anyhow::Context;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use sigmatcore::grid::wire::parse_grid_text;
use sigmatcore::grid::{MatrixCalculator, NdarrayEngine};
use sigmatcore::signal::{SignalQuality, SignalStats};
use sigmatcore::survey::{ComparisonRow, LocationBook, SurveyState};
use sigmatcore::telemetry::CalculationCounts;
use sigmatcore::Operation;

#[derive(Debug, Clone, Serialize)]
pub struct LocationSummary {
    pub name: String,
    pub source: &'static str,
    pub access_points: Vec<String>,
    pub stats: SignalStats,
    pub quality: SignalQuality,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    pub captured: Vec<LocationSummary>,
    pub skipped: Vec<String>,
    pub comparison: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixJobReport {
    pub operation: Operation,
    pub a: String,
    pub b: String,
    pub result: Option<Vec<Vec<String>>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub survey: Option<SurveyReport>,
    pub matrix_jobs: Vec<MatrixJobReport>,
    pub matrix_counts: CalculationCounts,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute<S: ScanSource>(&self, source: &mut S) -> anyhow::Result<WorkflowResult> {
        let survey = if self.config.locations.is_empty() && !self.config.demo_locations {
            None
        } else {
            Some(self.survey(source).context("running location survey")?)
        };

        let calculator = MatrixCalculator::new(NdarrayEngine::new());
        let matrix_jobs = self
            .config
            .matrix_jobs
            .iter()
            .enumerate()
            .map(|(index, job)| {
                run_matrix_job(&calculator, job)
                    .with_context(|| format!("reading operands of matrix job {}", index + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(WorkflowResult {
            survey,
            matrix_jobs,
            matrix_counts: calculator.counts(),
        })
    }

    pub fn survey<S: ScanSource>(&self, source: &mut S) -> anyhow::Result<SurveyReport> {
        let book = if self.config.demo_locations {
            LocationBook::with_demo_locations()
        } else {
            LocationBook::new()
        };
        let mut state = SurveyState::new(book);
        let mut fallback_rng = StdRng::seed_from_u64(self.config.profile.seed);
        let mut captured = Vec::new();
        let mut skipped = Vec::new();

        for name in &self.config.locations {
            source.move_to(name);
            let summary = match self.config.mode {
                CaptureMode::Track => {
                    let outcome = CaptureSession::new(source, self.config.capture.clone()).run(name);
                    let (capture, origin) = match outcome {
                        Ok(capture) => (capture, "scan"),
                        Err(CaptureError::ScanRefused) => {
                            warn!("scan refused for {}, using fallback data", name);
                            (fallback_capture(name, &mut fallback_rng), "fallback")
                        }
                        Err(err) => {
                            warn!("skipping {}: {}", name, err);
                            skipped.push(name.clone());
                            continue;
                        }
                    };
                    state.book_mut().save(capture.into_location());
                    summarize(&state, name, origin)
                }
                CaptureMode::Snapshot => {
                    source.trigger_scan();
                    let results = source.scan_results();
                    if results.is_empty() {
                        warn!("skipping {}: no WiFi access points found", name);
                        skipped.push(name.clone());
                        continue;
                    }
                    state.record_scan(&results);
                    state
                        .save_current(name)
                        .context("saving snapshot without a recorded scan")?;
                    summarize(&state, name, "snapshot")
                }
            };

            if let Some(summary) = summary {
                info!(
                    "{}: avg {} dBm over {} access points",
                    summary.name,
                    summary.stats.average_dbm,
                    summary.access_points.len()
                );
                captured.push(summary);
            }
        }

        Ok(SurveyReport {
            captured,
            skipped,
            comparison: state.book().comparison(),
        })
    }
}

fn summarize(state: &SurveyState, name: &str, source: &'static str) -> Option<LocationSummary> {
    state.book().get(name).map(|location| {
        let stats = location.stats();
        LocationSummary {
            name: location.name.clone(),
            source,
            access_points: location.access_points.clone(),
            stats,
            quality: stats.quality(),
        }
    })
}

fn run_matrix_job(
    calculator: &MatrixCalculator<NdarrayEngine>,
    job: &MatrixJob,
) -> anyhow::Result<MatrixJobReport> {
    let a = parse_grid_text(&job.a).with_context(|| format!("matrix A {:?}", job.a))?;
    let b = parse_grid_text(&job.b).with_context(|| format!("matrix B {:?}", job.b))?;

    let (result, error) = match calculator.calculate(&a, &b, job.operation) {
        Ok(matrix) => (Some(matrix.display_rows()), None),
        Err(err) => (None, Some(err.to_string())),
    };

    Ok(MatrixJobReport {
        operation: job.operation,
        a: job.a.clone(),
        b: job.b.clone(),
        result,
        error,
    })
}
