//! Command to show the components and derived names of a path.

use crate::error::CliError;
use crate::utils::{load_registry, print_json, GlobalOptions, OutputFormat};
use artpath::ArtifactoryPath;
use clap::Args;
use serde::Serialize;

/// Show the components and derived names of a path.
#[derive(Args)]
pub struct PartsCommand {
    /// Path segments, joined with `/` before parsing
    #[arg(value_name = "SEGMENT", required = true)]
    pub segments: Vec<String>,

    /// Show the path relative to this ancestor instead
    #[arg(long, value_name = "BASE")]
    pub relative_to: Option<String>,
}

#[derive(Serialize)]
struct PartsOutput<'a> {
    path: String,
    drive: &'a str,
    root: &'a str,
    anchor: &'a str,
    name: &'a str,
    stem: &'a str,
    suffix: &'a str,
    parts: &'a [String],
}

impl PartsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = load_registry(global)?;
        let mut path = ArtifactoryPath::from_parts(&registry, &self.segments);

        if let Some(base) = &self.relative_to {
            path = path.relative_to(base)?;
        }

        match global.format {
            OutputFormat::Json => print_json(&PartsOutput {
                path: path.to_string(),
                drive: path.drive(),
                root: path.root(),
                anchor: path.anchor(),
                name: path.name(),
                stem: path.stem(),
                suffix: path.suffix(),
                parts: path.parts(),
            }),
            OutputFormat::Text => {
                for part in path.parts() {
                    println!("{part}");
                }
                Ok(())
            }
        }
    }
}
