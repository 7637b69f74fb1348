//! Command to show how a path splits into root, marker and tail.

use crate::error::CliError;
use crate::utils::{load_registry, print_json, GlobalOptions, OutputFormat};
use artpath::path::Flavour;
use clap::Args;
use serde::Serialize;

/// Split a path into root, directory marker and tail.
#[derive(Args)]
pub struct SplitCommand {
    /// Path or URL to split
    #[arg(value_name = "PATH")]
    pub path: String,
}

#[derive(Serialize)]
struct SplitOutput<'a> {
    path: &'a str,
    root: &'a str,
    dir_marker: &'a str,
    tail: &'a str,
    strategy: String,
}

impl SplitCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let registry = load_registry(global)?;
        let split = Flavour::new(&registry).split_root(&self.path);
        global
            .logger
            .debug(&format!("Resolved {:?} via {}", self.path, split.strategy));

        match global.format {
            OutputFormat::Json => print_json(&SplitOutput {
                path: &self.path,
                root: &split.root,
                dir_marker: &split.dir_marker,
                tail: &split.tail,
                strategy: split.strategy.to_string(),
            }),
            OutputFormat::Text => {
                println!("root:       {}", split.root);
                println!("dir_marker: {}", split.dir_marker);
                println!("tail:       {}", split.tail);
                println!("strategy:   {}", split.strategy);
                Ok(())
            }
        }
    }
}
