//! Configuration
//!
//! Eye layout types and a small TOML reader for them.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
