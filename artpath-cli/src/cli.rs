//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, DecodePropsCommand, EncodeMatrixCommand, EncodePropsCommand,
    LookupCommand, PartsCommand, SplitCommand, ValidateCommand,
};
use crate::utils::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for inspecting Artifactory path resolution.
#[derive(Parser)]
#[command(name = "artpath")]
#[command(
    version,
    about = "Inspect Artifactory path resolution and parameter encoding",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Load repository roots from this file instead of ~/.artpath/config.yaml
    #[arg(long, value_name = "PATH", global = true, env = "ARTPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Split a path into root, directory marker and tail
    Split(SplitCommand),

    /// Show the components and derived names of a path
    Parts(PartsCommand),

    /// Show the registered root and settings matching a URL
    Lookup(LookupCommand),

    /// Encode KEY=VALUE pairs as matrix parameters
    EncodeMatrix(EncodeMatrixCommand),

    /// Encode KEY=VALUE pairs as an item property string
    EncodeProps(EncodePropsCommand),

    /// Decode an item property string
    DecodeProps(DecodePropsCommand),

    /// Validate a root configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
