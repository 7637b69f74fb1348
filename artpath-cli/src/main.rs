//! Main entry point for the artpath CLI.
//!
//! This is the command-line interface for the artpath library.
//! It provides commands for inspecting how repository URLs resolve:
//! - `split`: Show root, directory marker and tail
//! - `parts`: Show components and derived names
//! - `lookup`: Show the registered root matching a URL
//! - `encode-matrix`, `encode-props`, `decode-props`: Parameter encodings

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let logger = artpath::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
        format: cli.format,
        logger,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Split(cmd) => cmd.execute(&global),
        cli::Command::Parts(cmd) => cmd.execute(&global),
        cli::Command::Lookup(cmd) => cmd.execute(&global),
        cli::Command::EncodeMatrix(cmd) => cmd.execute(&global),
        cli::Command::EncodeProps(cmd) => cmd.execute(&global),
        cli::Command::DecodeProps(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
