//! Command-line argument definitions for the Introspector CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. The records file and the [`Command`] select what is
//! rendered; the remaining options control output, configuration file
//! selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Introspector diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the annotation records file (TOML, or JSON with a `.json` extension)
    #[arg(help = "Path to the annotation records file")]
    pub records: String,

    /// What to render
    #[command(subcommand)]
    pub command: Command,

    /// Write the output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List every use case, one `name<TAB>text` line per case
    Cases {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the use-case diagram
    UseCases,

    /// Render the sequence diagram of one use case
    Sequence {
        /// Exact name of the use case
        #[arg(long)]
        case: String,

        /// Hide components whose scale is above this threshold
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Render the component diagram of one use case, or of the whole map
    Components {
        /// Exact name of the use case; the whole map when absent
        #[arg(long)]
        case: Option<String>,

        /// Hide components whose scale is above this threshold
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Render every diagram
    All,
}
