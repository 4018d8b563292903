//! Parley CLI library
//!
//! Command-line front end for generating, validating and inspecting
//! negotiation-analysis datasets.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::{Formatter, Summary};
