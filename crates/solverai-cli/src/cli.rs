use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands;
use crate::context::CliContext;
use crate::logging::init_logger;
use crate::{print_err, print_info};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Settings file with `token`, `datamanagerUrl` and `computerUrl`. When it does not exist,
    /// the SOLVERAI_* environment variables are used.
    #[arg(long, global = true, default_value = "solverai.conf")]
    pub config: PathBuf,

    /// File holding the identifiers of the current problem setup.
    #[arg(long, global = true, default_value = "ids.json")]
    pub ids_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the data manager accepts the token.
    ValidateToken,
    /// Show the inputs and outputs the compute service knows for a problem.
    Status(commands::problem::ProblemArgs),
    /// Show the setup of a problem.
    SetupInfo(commands::problem::ProblemArgs),
    /// Find the most recent problem with the given name, and its modules.
    FindProblem(commands::find::FindArgs),
    /// Delete every resource recorded in the ids file, then the file itself.
    DeleteAll(commands::delete::DeleteAllArgs),
    /// Delete the resources of one kind whose name matches a pattern.
    Delete(commands::delete::DeleteArgs),
    /// Solve a problem and print the results as CSV.
    Solve(commands::solve::SolveArgs),
}

pub fn cli_main() -> ExitCode {
    init_logger();
    let args = CliArgs::parse();
    let context = CliContext::new(args.config, args.ids_file);

    match handle_command(args.command, &context) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_command(command: Commands, context: &CliContext) -> anyhow::Result<()> {
    match command {
        Commands::ValidateToken => {
            context.solverai()?.validate_token()?;
            print_info!("Token accepted");
            Ok(())
        }
        Commands::Status(args) => commands::problem::handle_status(args, context),
        Commands::SetupInfo(args) => commands::problem::handle_setup(args, context),
        Commands::FindProblem(args) => commands::find::handle_command(args, context),
        Commands::DeleteAll(args) => commands::delete::handle_delete_all(args, context),
        Commands::Delete(args) => commands::delete::handle_command(args, context),
        Commands::Solve(args) => commands::solve::handle_command(args, context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solverai_client::{ResourceId, ResourceKind};

    #[test]
    fn global_options_have_defaults() {
        let args = CliArgs::try_parse_from(["solverai", "validate-token"]).unwrap();
        assert_eq!(args.config, PathBuf::from("solverai.conf"));
        assert_eq!(args.ids_file, PathBuf::from("ids.json"));
        assert!(matches!(args.command, Commands::ValidateToken));
    }

    #[test]
    fn delete_takes_a_kind_and_an_optional_pattern() {
        let args =
            CliArgs::try_parse_from(["solverai", "delete", "soft-datas", "--pattern", "^tmp"])
                .unwrap();
        let Commands::Delete(delete) = args.command else {
            panic!("expected the delete command");
        };
        assert_eq!(delete.kind, ResourceKind::SoftData);
        assert_eq!(delete.pattern, "^tmp");

        assert!(CliArgs::try_parse_from(["solverai", "delete", "widgets"]).is_err());
    }

    #[test]
    fn solve_options() {
        let args = CliArgs::try_parse_from([
            "solverai",
            "--ids-file",
            "other.json",
            "solve",
            "--problem-id",
            "17",
            "--input",
            r#"{"inputs": {}}"#,
            "--timeout-secs",
            "60",
        ])
        .unwrap();
        assert_eq!(args.ids_file, PathBuf::from("other.json"));
        let Commands::Solve(solve) = args.command else {
            panic!("expected the solve command");
        };
        assert_eq!(solve.problem.problem_id, Some(ResourceId::Int(17)));
        assert_eq!(solve.timeout_secs, Some(60));
        assert!(solve.output.is_none());
    }
}
