//! Argument definitions for the `lectern` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::loader::Source;

/// Lectern - curriculum markup compiler
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LECTERN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a curriculum and report every diagnostic
    Validate {
        #[command(flatten)]
        source: SourceArgs,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compile a curriculum into JSON
    Process {
        #[command(flatten)]
        source: SourceArgs,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON, overriding `[output] pretty`
        #[arg(long)]
        compact: bool,
    },
}

impl Command {
    /// The content source this command reads.
    pub fn source(&self) -> &SourceArgs {
        match self {
            Command::Validate { source, .. } | Command::Process { source, .. } => source,
        }
    }
}

/// Where the content files come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Content root directory (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Read a JSON object of `{"relative/path.md": "text"}` from stdin
    #[arg(long, conflicts_with = "dir")]
    pub stdin: bool,
}

impl SourceArgs {
    /// Resolve the arguments into a [`Source`].
    pub fn source(&self) -> Source {
        if self.stdin {
            Source::Stdin
        } else {
            Source::Directory(self.dir.clone().unwrap_or_else(|| PathBuf::from(".")))
        }
    }

    /// Content root used to look for `lectern.toml`, if reading a directory.
    pub fn root(&self) -> Option<PathBuf> {
        match self.source() {
            Source::Directory(dir) => Some(dir),
            Source::Stdin => None,
        }
    }
}

/// Report format for `validate`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `file:line: severity: message` line per diagnostic
    #[default]
    Text,
    /// The diagnostics array as JSON
    Json,
}
