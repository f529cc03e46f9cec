use anyhow::Context as _;
use clap::Args;
use solverai_client::IdsRecord;

use super::print_ids;
use crate::context::CliContext;
use crate::print_info;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Exact, case-sensitive problem name.
    pub name: String,
    /// Record the identifiers found in the ids file.
    #[arg(long)]
    pub save: bool,
}

pub fn handle_command(args: FindArgs, context: &CliContext) -> anyhow::Result<()> {
    let ids = context
        .solverai()?
        .setup()
        .problem_modules_by_name(&args.name)?;

    print_info!("Problem '{}':", args.name);
    print_ids(&ids);

    if args.save {
        let file = context.ids_file();
        file.write(&IdsRecord::from(&ids))
            .with_context(|| format!("Failed to write {}", file.path().display()))?;
        print_info!("Saved to {}", file.path().display());
    }
    Ok(())
}
