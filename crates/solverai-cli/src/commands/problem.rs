use clap::Args;
use solverai_client::ResourceId;
use solverai_client::compute::{ComputeError, ProblemIoSchema};

use crate::context::CliContext;
use crate::print_info;

#[derive(Args, Debug)]
pub struct ProblemArgs {
    /// Problem to look at. Defaults to the problem of the ids file.
    #[arg(long)]
    pub problem_id: Option<ResourceId>,
}

pub fn handle_status(args: ProblemArgs, context: &CliContext) -> anyhow::Result<()> {
    let problem_id = context.problem_id(args.problem_id)?;
    let compute = context.solverai()?.compute(problem_id);
    print_io("Status", compute.get_status())
}

pub fn handle_setup(args: ProblemArgs, context: &CliContext) -> anyhow::Result<()> {
    let problem_id = context.problem_id(args.problem_id)?;
    let compute = context.solverai()?.compute(problem_id);
    print_io("Setup", compute.get_setup())
}

fn print_io(
    title: &str,
    io: Result<ProblemIoSchema, ComputeError>,
) -> anyhow::Result<()> {
    let io = io?;
    print_info!("{title} inputs:\n{}", serde_json::to_string_pretty(&io.inputs)?);
    print_info!("{title} outputs:\n{}", serde_json::to_string_pretty(&io.outputs)?);
    Ok(())
}
