//! Command to decode an item property string.

use crate::error::CliError;
use crate::utils::{print_json, GlobalOptions, OutputFormat};
use artpath::codec::decode_properties;
use clap::Args;

/// Decode an item property string into KEY=VALUE lines.
#[derive(Args)]
pub struct DecodePropsCommand {
    /// Encoded property string, e.g. `foo=a\,b|bar=x,y`
    #[arg(value_name = "PROPERTIES")]
    pub encoded: String,
}

impl DecodePropsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let properties = decode_properties(&self.encoded);

        match global.format {
            OutputFormat::Json => print_json(&properties),
            OutputFormat::Text => {
                for (key, value) in &properties {
                    for v in value.values() {
                        println!("{key}={v}");
                    }
                }
                Ok(())
            }
        }
    }
}
