//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tabsense: detect domain, infer schema, score quality and summarize tabular data
#[derive(Parser)]
#[command(name = "tabsense")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline on a data file
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Skip classification and assume this domain (surgery, logistics, insurance, general)
        #[arg(short, long)]
        domain: Option<String>,

        /// Write the JSON result to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON result instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print the inferred schema of a data file
    Schema {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Skip classification and assume this domain
        #[arg(short, long)]
        domain: Option<String>,
    },
}
