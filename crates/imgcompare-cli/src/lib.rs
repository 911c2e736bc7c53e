//! imgcompare CLI library
//!
//! Command-line front end for the `imgcompare` engine.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{Cli, Commands, CompositeArgs, CompressionArg, OutputFormat, SimilarityArgs};
pub use config::{load_engine_config, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
