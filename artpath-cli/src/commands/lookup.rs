//! Command to show the registered root matching a URL.

use crate::error::CliError;
use crate::utils::{load_registry, print_json, GlobalOptions, OutputFormat};
use clap::Args;
use serde::Serialize;
use std::path::Path;

/// Show the registered root and settings that apply to a URL.
#[derive(Args)]
pub struct LookupCommand {
    /// URL or path to look up
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(Serialize)]
struct LookupOutput<'a> {
    root: &'a str,
    username: Option<&'a str>,
    password_set: bool,
    verify: bool,
    cert: Option<&'a Path>,
}

impl LookupCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = load_registry(global)?;

        let entry = registry.lookup(&self.url).ok_or_else(|| {
            CliError::SemanticFailure(format!("No registered root matches {}", self.url))
        })?;

        let config = entry.config();
        let output = LookupOutput {
            root: entry.url(),
            username: config.username.as_deref(),
            password_set: config.password.is_some(),
            verify: config.verifies(),
            cert: config.cert.as_deref(),
        };

        match global.format {
            OutputFormat::Json => print_json(&output),
            OutputFormat::Text => {
                let yaml = serde_yaml::to_string(&output)
                    .map_err(|e| CliError::Library(artpath::Error::Configuration(e)))?;
                print!("{yaml}");
                Ok(())
            }
        }
    }
}
