use std::process::ExitCode;

fn main() -> ExitCode {
    solverai_cli::cli::cli_main()
}
