//! Pycontext CLI entry point.

use clap::Parser;
use pycontext::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Analyze(args) => match cli::run_analyze(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Commands::List(args) => match cli::run_list(&args) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
    };

    std::process::exit(exit_code);
}
