//! Command to encode an item property string.

use crate::error::CliError;
use crate::utils::{collect_parameters, parse_key_value, print_json, GlobalOptions, OutputFormat};
use artpath::codec::encode_properties;
use clap::Args;

/// Encode KEY=VALUE pairs as an item property string.
///
/// Repeating a key gives it several values. `=`, `|` and `,` inside values
/// are escaped.
#[derive(Args)]
pub struct EncodePropsCommand {
    /// Properties to encode
    #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub pairs: Vec<(String, String)>,
}

impl EncodePropsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let encoded = encode_properties(&collect_parameters(self.pairs));

        match global.format {
            OutputFormat::Json => print_json(&encoded),
            OutputFormat::Text => {
                println!("{encoded}");
                Ok(())
            }
        }
    }
}
