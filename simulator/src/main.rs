use anyhow::Context;
use clap::{Parser, Subcommand};
use generator::profile::SimulatedScanner;
use sigmatcore::Operation;
use std::path::PathBuf;
use workflow::config::{CaptureMode, MatrixJob, WorkflowConfig};
use workflow::runner::{Runner, WorkflowResult};

mod capture;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "WiFi survey and matrix calculator driver")]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Print the full report as JSON instead of a summary
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Capture signal series for named locations from the simulated scanner
    Survey {
        /// Location to capture; repeat for several
        #[arg(long = "location")]
        locations: Vec<String>,
        #[arg(long, value_enum, default_value_t = CaptureMode::Track)]
        mode: CaptureMode,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100)]
        poll_ms: u64,
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
        /// Include the sample rooms in the comparison
        #[arg(long, default_value_t = false)]
        demo: bool,
    },
    /// Run one matrix operation; operands use "1 2;3 4" row syntax
    Matrix {
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
        #[arg(long, default_value = "add")]
        op: Operation,
    },
    /// Run the locations and matrix jobs listed in a YAML workflow file
    Workflow { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = match args.command {
        Command::Survey {
            locations,
            mode,
            seed,
            poll_ms,
            timeout_secs,
            demo,
        } => WorkflowConfig::for_survey(locations, mode, seed, poll_ms, timeout_secs, demo),
        Command::Matrix { a, b, op } => WorkflowConfig::for_matrix(MatrixJob {
            operation: op,
            a,
            b,
        }),
        Command::Workflow { path } => WorkflowConfig::load(path)?,
    };

    let mut scanner = SimulatedScanner::new(workflow_config.profile.clone());
    let result = Runner::new(workflow_config).execute(&mut scanner)?;

    if args.json {
        let report =
            serde_json::to_string_pretty(&result).context("serializing workflow report")?;
        println!("{}", report);
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &WorkflowResult) {
    if let Some(survey) = &result.survey {
        for summary in &survey.captured {
            println!(
                "[survey] {} ({}) min {} / max {} / avg {} dBm ({}), APs: {}",
                summary.name,
                summary.source,
                summary.stats.min,
                summary.stats.max,
                summary.stats.average_dbm,
                summary.quality,
                summary.access_points.join(", ")
            );
        }
        for name in &survey.skipped {
            println!("[survey] {} skipped: no access points", name);
        }
        for row in &survey.comparison {
            println!(
                "[compare] {:<16} {:>5} dBm {:>3} APs",
                row.name, row.average_dbm, row.access_point_count
            );
        }
    }

    for job in &result.matrix_jobs {
        match (&job.result, &job.error) {
            (Some(rows), _) => {
                println!("[matrix] {} {} {} =", job.a, job.operation.symbol(), job.b);
                for row in rows {
                    println!("  {}", row.join("  "));
                }
            }
            (None, Some(error)) => println!("[matrix] {} failed: {}", job.operation, error),
            (None, None) => {}
        }
    }
}
