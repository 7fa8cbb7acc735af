//! CLI command implementations.
//!
//! - `generate` - Build a map and write it as SVG, JSON or PNG
//! - `defaults` - Print the default map config

pub mod common;
pub mod config;
pub mod generate;
pub mod render;

pub use common::CliError;
pub use config::cmd_defaults;
pub use generate::cmd_generate;
