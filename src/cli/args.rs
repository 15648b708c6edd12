//! Command line argument parsing for the Falx CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Falx - an online text classifier that can forget
#[derive(Parser, Debug, Clone)]
#[command(name = "falx")]
#[command(about = "Train, query and prune a text classifier stored in a JSON snapshot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FalxArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FalxArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create an empty classifier snapshot
    Init(InitArgs),

    /// Add a labeled document
    Add(AddArgs),

    /// Remove a labeled document and roll back its counts
    Remove(RemoveArgs),

    /// Train every pending document
    Train(ModelArgs),

    /// Rebuild the model from all stored documents
    Retrain(ModelArgs),

    /// Classify a text
    Classify(ClassifyArgs),

    /// Show classifier statistics
    Stats(ModelArgs),
}

/// Arguments for creating a classifier
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Path of the snapshot file to create
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Additive smoothing constant of the naive Bayes model
    #[arg(short, long, default_value = "1.0")]
    pub smoothing: f64,

    /// Classifier configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "FALX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing snapshot
    #[arg(long)]
    pub force: bool,
}

/// Arguments for adding a document
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Path of the snapshot file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Class label
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Document text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Train pending documents right after adding
    #[arg(short, long)]
    pub train: bool,
}

/// Arguments for removing a document
#[derive(Parser, Debug, Clone)]
pub struct RemoveArgs {
    /// Path of the snapshot file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Class label the document was added with
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Document text as it was added
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for commands that only need a snapshot
#[derive(Parser, Debug, Clone)]
pub struct ModelArgs {
    /// Path of the snapshot file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,
}

/// Arguments for classifying a text
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Path of the snapshot file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Show every label with its score
    #[arg(short, long)]
    pub all: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
