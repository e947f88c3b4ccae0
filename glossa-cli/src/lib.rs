//! glossa CLI library
//!
//! Command-line front end for the glossa text preprocessing pipeline:
//! input resolution, configuration, progress reporting and output formats.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod language_source;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
