use crate::capture::session::CaptureConfig;
use crate::generator::profile::ScanProfile;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sigmatcore::Operation;
use std::fs;
use std::path::Path;

/// How each location is sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Poll the strongest access point repeatedly.
    #[default]
    Track,
    /// Take one scan and keep every visible access point's level.
    Snapshot,
}

/// One matrix calculation; operands use grid grammar (`"1 2;3 4"`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixJob {
    pub operation: Operation,
    pub a: String,
    pub b: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub mode: CaptureMode,
    pub capture: CaptureConfig,
    pub profile: ScanProfile,
    /// Start from the sample rooms instead of an empty book.
    pub demo_locations: bool,
    pub locations: Vec<String>,
    pub matrix_jobs: Vec<MatrixJob>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn for_survey(
        locations: Vec<String>,
        mode: CaptureMode,
        seed: u64,
        poll_interval_ms: u64,
        timeout_secs: u64,
        demo_locations: bool,
    ) -> Self {
        Self {
            mode,
            capture: CaptureConfig {
                poll_interval_ms,
                timeout_secs,
                ..Default::default()
            },
            profile: ScanProfile {
                seed,
                ..Default::default()
            },
            demo_locations,
            locations,
            matrix_jobs: Vec::new(),
        }
    }

    pub fn for_matrix(job: MatrixJob) -> Self {
        Self {
            matrix_jobs: vec![job],
            ..Default::default()
        }
    }
}
