//! # Falx
//!
//! An online text classifier that can forget.
//!
//! ## Features
//!
//! - Binary feature vectors over a vocabulary discovered while documents arrive
//! - Incremental training from a watermark instead of full retrains
//! - Removal of a trained document by rolling back the model counts
//! - Pluggable count models (naive Bayes included) and text analyzers
//! - JSON snapshots with async save and load

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod model;
pub mod removal;
pub mod snapshot;
pub mod training;

pub mod prelude {
    pub use crate::classifier::{Observation, TextClassifier};
    pub use crate::config::{AnalyzerKind, ClassifierConfig};
    pub use crate::error::{FalxError, Result};
    pub use crate::model::{Classification, CountModel, NaiveBayes};
    pub use crate::removal::{Removal, RetractionPolicy, RollbackPolicy};
    pub use crate::training::events::{TrainingEvent, TrainingObserver};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
