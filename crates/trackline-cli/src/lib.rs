//! Trackline CLI library.
//!
//! Everyday tracker workflow from the terminal: list and inspect stories,
//! move them through their states, generate changelogs, run scrum and
//! planning sessions. All remote access goes through `trackline-sdk`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
