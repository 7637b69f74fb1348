//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including registry loading, `KEY=VALUE` argument parsing, and output
//! formatting.

use crate::error::CliError;
use artpath::codec::{ParamValue, Parameters};
use artpath::config::{ConfigLoader, RootRegistry};
use artpath::Logger;
use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// JSON document on stdout.
    Json,
}

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // `verbose` is consumed by the logger in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Configuration file overriding the per-user default.
    pub config: Option<PathBuf>,

    /// Output format.
    pub format: OutputFormat,

    /// Logger configured from the verbosity flags.
    pub logger: Logger,
}

/// Build the root registry.
///
/// Roots come from `--config` when given, otherwise from
/// `~/.artpath/config.yaml` if it exists. A missing default file is not an
/// error; the registry is simply empty.
pub fn load_registry(global: &GlobalOptions) -> Result<RootRegistry, CliError> {
    let mut registry = RootRegistry::new();

    match &global.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            registry
                .load_file(path)
                .map_err(|e| CliError::Config(e.to_string()))?;
            global
                .logger
                .debug(&format!("Loaded {} root(s) from {}", registry.len(), path.display()));
        }
        None => {
            let table = ConfigLoader::load_default().map_err(|e| CliError::Config(e.to_string()))?;
            if let Some(table) = table {
                registry
                    .load(table)
                    .map_err(|e| CliError::Config(e.to_string()))?;
                global
                    .logger
                    .debug(&format!("Loaded {} root(s) from the default configuration", registry.len()));
            }
        }
    }

    if registry.is_empty() {
        global
            .logger
            .debug("No repository roots registered; using heuristics only");
    }
    Ok(registry)
}

/// Parse a `KEY=VALUE` argument.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("empty key in {s:?}")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got {s:?}")),
    }
}

/// Collect `KEY=VALUE` pairs into parameters. A repeated key accumulates
/// its values in order.
pub fn collect_parameters(pairs: Vec<(String, String)>) -> Parameters {
    let mut parameters = Parameters::new();
    for (key, value) in pairs {
        let merged = match parameters.remove(&key) {
            None => ParamValue::Single(value),
            Some(ParamValue::Single(first)) => ParamValue::Multi(vec![first, value]),
            Some(ParamValue::Multi(mut values)) => {
                values.push(value);
                ParamValue::Multi(values)
            }
        };
        parameters.insert(key, merged);
    }
    parameters
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
