use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::utils::init_tracing(cli.verbose);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n{err:#}\n");
            ExitCode::from(cli::utils::exit_code(&err))
        }
    }
}
