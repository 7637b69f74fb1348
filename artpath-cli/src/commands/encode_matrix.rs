//! Command to encode matrix parameters.

use crate::error::CliError;
use crate::utils::{collect_parameters, parse_key_value, print_json, GlobalOptions, OutputFormat};
use artpath::codec::encode_matrix_parameters;
use clap::Args;

/// Encode KEY=VALUE pairs as matrix parameters.
///
/// Repeating a key gives it several values.
#[derive(Args)]
pub struct EncodeMatrixCommand {
    /// Parameters to encode
    #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub pairs: Vec<(String, String)>,
}

impl EncodeMatrixCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let parameters = collect_parameters(self.pairs);
        let encoded = encode_matrix_parameters(&parameters);

        match global.format {
            OutputFormat::Json => print_json(&encoded),
            OutputFormat::Text => {
                println!("{encoded}");
                Ok(())
            }
        }
    }
}
