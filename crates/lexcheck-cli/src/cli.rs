use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lexcheck")]
#[command(
    author,
    version,
    about = "Classify extracted document text as legal or illegal and flag compliance issues"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "lexcheck.yaml", env = "LEXCHECK_CONFIG")]
    pub config: PathBuf,

    /// Statistical model artifact path
    #[arg(short, long, global = true, env = "LEXCHECK_MODEL")]
    pub model: Option<PathBuf>,

    /// Compliance rule catalogue (YAML)
    #[arg(long, global = true)]
    pub catalogue: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true)]
    pub pretty: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a document as legal or illegal
    Classify {
        /// Extracted text file
        file: PathBuf,
    },

    /// List compliance issues found in a document
    Comply {
        /// Extracted text file
        file: PathBuf,
    },

    /// Classify and check compliance, emitting a full report
    Analyze {
        /// Extracted text file
        file: PathBuf,
    },

    /// Retrain the statistical model from the seed corpus and persist it
    Train,
}
