//! CLI module
//!
//! Command-line interface for searching annotations.
//!
//! # Commands
//!
//! - `search` - Stream matching annotations to stdout
//! - `profile` - Show the token owner's profile

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use runner::Runner;
