//! Multinomial naive Bayes over binary features with additive smoothing.
//!
//! Counts follow the usual "add-one" bookkeeping: every label starts with a
//! total of 1, the global example total starts at 1, and the first sighting
//! of a feature for a label stores `1 + smoothing` so later increments stay
//! above the smoothing floor.
//!
//! # Examples
//!
//! ```
//! use falx::feature::FeatureVector;
//! use falx::model::{CountModel, NaiveBayes};
//!
//! let mut model = NaiveBayes::new();
//! model.add_example(&FeatureVector::from(vec![1, 0]), "spam");
//! model.add_example(&FeatureVector::from(vec![0, 1]), "ham");
//! model.train();
//!
//! let label = model.classify(&FeatureVector::from(vec![1, 0]));
//! assert_eq!(label.as_deref(), Some("spam"));
//! ```

use indexmap::map::Entry;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{FalxError, Result};
use crate::feature::FeatureVector;
use crate::model::{Classification, CountModel, ModelCounts};

/// Default additive smoothing constant.
pub const DEFAULT_SMOOTHING: f64 = 1.0;

/// Naive Bayes classifier backed by [`ModelCounts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NaiveBayes {
    counts: ModelCounts,
}

impl NaiveBayes {
    /// Create a model with [`DEFAULT_SMOOTHING`].
    pub fn new() -> Self {
        NaiveBayes {
            counts: ModelCounts::new(DEFAULT_SMOOTHING),
        }
    }

    /// Create a model with a custom smoothing constant.
    ///
    /// The constant must be finite and non-negative.
    pub fn with_smoothing(smoothing: f64) -> Result<Self> {
        if !smoothing.is_finite() || smoothing < 0.0 {
            return Err(FalxError::config(format!(
                "smoothing must be a finite non-negative number, got {smoothing}"
            )));
        }

        Ok(NaiveBayes {
            counts: ModelCounts::new(smoothing),
        })
    }

    pub fn smoothing(&self) -> f64 {
        self.counts.smoothing
    }

    /// Score of `label` for the observation: the label prior times the
    /// product of the smoothed per-feature likelihoods.
    pub fn probability_of_class(&self, features: &FeatureVector, label: &str) -> f64 {
        let counts = &self.counts;
        let class_total = counts.class_totals.get(label).copied().unwrap_or(0.0);
        if class_total <= 0.0 || counts.total_examples <= 0.0 {
            return 0.0;
        }

        let log_likelihood: f64 = features
            .active()
            .map(|index| {
                let count = counts.feature_count(label, index);
                let count = if count == 0.0 { counts.smoothing } else { count };
                (count / class_total).ln()
            })
            .sum();

        (class_total / counts.total_examples) * log_likelihood.exp()
    }
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl CountModel for NaiveBayes {
    fn add_example(&mut self, features: &FeatureVector, label: &str) {
        let counts = &mut self.counts;
        let smoothing = counts.smoothing;

        let feature_counts = match counts.class_features.entry(label.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                counts.class_totals.insert(label.to_string(), 1.0);
                entry.insert(Vec::new())
            }
        };

        counts.total_examples += 1.0;
        *counts.class_totals.entry(label.to_string()).or_insert(1.0) += 1.0;

        if feature_counts.len() < features.len() {
            feature_counts.resize(features.len(), 0.0);
        }
        for index in features.active() {
            let count = &mut feature_counts[index];
            if *count != 0.0 {
                *count += 1.0;
            } else {
                *count = 1.0 + smoothing;
            }
        }
    }

    fn train(&mut self) {
        // Probabilities are derived from the counts on demand.
        trace!(
            "naive bayes holds {} labels over {} examples",
            self.counts.class_totals.len(),
            self.counts.total_examples
        );
    }

    fn classifications(&self, features: &FeatureVector) -> Vec<Classification> {
        let mut classifications: Vec<Classification> = self
            .counts
            .labels()
            .map(|label| Classification {
                label: label.to_string(),
                value: self.probability_of_class(features, label),
            })
            .collect();

        // Stable: ties keep label order.
        classifications.sort_by(|a, b| b.value.total_cmp(&a.value));
        classifications
    }

    fn counts(&self) -> &ModelCounts {
        &self.counts
    }

    fn counts_mut(&mut self) -> &mut ModelCounts {
        &mut self.counts
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }

    fn fresh(&self) -> Self {
        NaiveBayes {
            counts: ModelCounts::new(self.counts.smoothing),
        }
    }
}
