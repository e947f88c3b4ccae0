//! TOML language configuration
//!
//! Built-in profiles are embedded at compile time; external profiles can be
//! parsed from any file with the same schema.

pub mod loader;
pub mod types;

pub use loader::{get_language_config, list_available_languages};
pub use types::LanguageConfig;
