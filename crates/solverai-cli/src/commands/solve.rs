use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::Args;
use colored::Colorize;
use solverai_client::{ComputeInput, Fields};

use super::problem::ProblemArgs;
use crate::context::CliContext;
use crate::print_info;

#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(flatten)]
    pub problem: ProblemArgs,
    /// Solve parameters as a JSON object. The problem id is added to it.
    #[arg(long, default_value = "{}")]
    pub input: String,
    /// Stop waiting for the problem setup after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Write the CSV to this file instead of the standard output.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn handle_command(args: SolveArgs, context: &CliContext) -> anyhow::Result<()> {
    let parameters: Fields =
        serde_json::from_str(&args.input).context("--input must be a JSON object")?;
    let problem_id = context.problem_id(args.problem.problem_id)?;

    let mut compute = context.solverai()?.compute(problem_id.clone());
    if let Some(secs) = args.timeout_secs {
        compute = compute.with_deadline(Duration::from_secs(secs));
    }

    print_info!("Solving problem {problem_id}");
    let results = compute.submit_and_await(&ComputeInput::from(parameters))?;
    let csv = results.to_table()?.to_csv_string()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            print_info!(
                "{} {} results to {}",
                "Wrote".green().bold(),
                results.number_of_results(),
                path.display()
            );
        }
        None => print!("{csv}"),
    }
    Ok(())
}
