//! Command-line interface definitions for the errmark binary

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse build output into error records and preview buffer annotations
#[derive(Parser, Debug)]
#[command(name = "errmark", version, about)]
pub struct Cli {
    /// Configuration file (defaults to .errmark.toml, then the global
    /// config directory)
    #[arg(long, global = true, env = "ERRMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extraction pattern override: a regex capturing
    /// filename, line, [column,] message
    #[arg(long, global = true)]
    pub pattern: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a build log and print the extracted records
    Parse {
        /// Build log file, or `-` for stdin
        log: PathBuf,

        /// Emit records as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse a build log and render resolved spans for one source file
    Annotate {
        /// Build log file, or `-` for stdin
        log: PathBuf,

        /// Source file to resolve annotations against
        file: PathBuf,
    },
}
