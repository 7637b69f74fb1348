//! Command to validate a root configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use artpath::config::RootRegistry;
use clap::Args;
use std::path::PathBuf;

/// Validate a root configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Check file exists
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        // 2. Parse and resolve every record into a scratch registry
        let mut registry = RootRegistry::new();
        if let Err(e) = registry.load_file(&self.config_path) {
            eprintln!("Validation error: {e}");
            return Err(CliError::SemanticFailure(
                "Configuration validation failed".to_string(),
            ));
        }

        // 3. Warn about roots that can never match because an earlier one wins
        for (idx, entry) in registry.iter().enumerate() {
            let shadowed_by = registry
                .iter()
                .take(idx)
                .find(|earlier| earlier.match_len(entry.normalized()).is_some());
            if let Some(earlier) = shadowed_by {
                global.logger.warn(&format!(
                    "Root {} is shadowed by earlier root {}",
                    entry.url(),
                    earlier.url()
                ));
            }
        }

        if !global.quiet {
            println!("Configuration is valid ({} root(s))", registry.len());
        }
        Ok(())
    }
}
