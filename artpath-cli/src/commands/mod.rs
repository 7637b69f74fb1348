//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `split`: Split a path into root, directory marker and tail
//! - `parts`: Show the components and derived names of a path
//! - `lookup`: Show the registered root matching a URL
//! - `encode_matrix`: Encode matrix parameters
//! - `encode_props`: Encode an item property string
//! - `decode_props`: Decode an item property string
//! - `validate`: Validate a root configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod decode_props;
pub mod encode_matrix;
pub mod encode_props;
pub mod lookup;
pub mod parts;
pub mod split;
pub mod validate;

pub use completions::CompletionsCommand;
pub use decode_props::DecodePropsCommand;
pub use encode_matrix::EncodeMatrixCommand;
pub use encode_props::EncodePropsCommand;
pub use lookup::LookupCommand;
pub use parts::PartsCommand;
pub use split::SplitCommand;
pub use validate::ValidateCommand;
