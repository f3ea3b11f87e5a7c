//! # lectern-cli
//!
//! Command-line tooling for Lectern curricula.
//!
//! - [`cli`]: argument definitions for the `lectern` binary
//! - [`config`]: `lectern.toml` loading
//! - [`loader`]: reading a content directory or a JSON file map
//! - [`commands`]: the `validate` and `process` commands

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;

pub use cli::{Cli, Command, OutputFormat, SourceArgs};
pub use config::{LecternConfig, OutputConfig};
