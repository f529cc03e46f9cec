use anyhow::Context as _;
use clap::Args;
use colored::Colorize;
use solverai_client::{ResourceIds, ResourceKind};

use super::print_ids;
use crate::context::CliContext;
use crate::{print_info, print_warn};

#[derive(Args, Debug)]
pub struct DeleteAllArgs {
    /// Maximum number of concurrent deletions.
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// One of equations, code, hard-datas, soft-datas, problems.
    pub kind: ResourceKind,
    /// Regular expression searched in the resource names.
    #[arg(long, default_value = ".*")]
    pub pattern: String,
}

pub fn handle_delete_all(args: DeleteAllArgs, context: &CliContext) -> anyhow::Result<()> {
    let file = context.ids_file();
    let ids: ResourceIds = file
        .read()
        .with_context(|| format!("Failed to read {}", file.path().display()))?
        .into();
    if ids.is_empty() {
        print_warn!("{} records no resource", file.path().display());
    } else {
        print_info!("Deleting:");
        print_ids(&ids);

        let mut setup = context.solverai()?.setup();
        if let Some(workers) = args.workers {
            setup = setup.with_delete_workers(workers);
        }
        setup.delete_all(&ids)?;
    }

    file.remove()
        .with_context(|| format!("Failed to remove {}", file.path().display()))?;
    print_info!("{} {} resources", "Deleted".green().bold(), ids.len());
    Ok(())
}

pub fn handle_command(args: DeleteArgs, context: &CliContext) -> anyhow::Result<()> {
    let deleted = context
        .solverai()?
        .setup()
        .delete_matching(args.kind, &args.pattern)?;

    if deleted.is_empty() {
        print_warn!("No {} matches '{}'", args.kind, args.pattern);
    } else {
        let listed: Vec<String> = deleted.iter().map(ToString::to_string).collect();
        print_info!(
            "{} {} {}: {}",
            "Deleted".green().bold(),
            deleted.len(),
            args.kind,
            listed.join(", ")
        );
    }
    Ok(())
}
