//! Count-based statistical models consumed by the classifier.
//!
//! A [`CountModel`] learns from binary feature vectors and keeps its state as
//! plain counts ([`ModelCounts`]) so a single example can be rolled back
//! without retraining from scratch.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;

pub mod naive_bayes;

pub use naive_bayes::NaiveBayes;

/// A label with the model's score for an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub value: f64,
}

/// Raw counts of a count-based model.
///
/// `class_features[label][i]` is the count of feature column `i` for `label`.
/// A column beyond the end of a label's counts has never been seen with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCounts {
    pub total_examples: f64,
    pub class_totals: IndexMap<String, f64>,
    pub class_features: IndexMap<String, Vec<f64>>,
    pub smoothing: f64,
}

impl ModelCounts {
    /// Empty counts with the given smoothing constant.
    pub fn new(smoothing: f64) -> Self {
        ModelCounts {
            total_examples: 1.0,
            class_totals: IndexMap::new(),
            class_features: IndexMap::new(),
            smoothing,
        }
    }

    /// Count of column `index` for `label`, 0 when never seen.
    pub fn feature_count(&self, label: &str, index: usize) -> f64 {
        self.class_features
            .get(label)
            .and_then(|counts| counts.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Labels in the order they were first trained.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.class_features.keys().map(String::as_str)
    }
}

/// A statistical classifier whose state is exposed as [`ModelCounts`].
///
/// `Default` builds a no-argument instance; [`CountModel::fresh`] builds an
/// empty instance of the same kind for retraining.
pub trait CountModel: Default + Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Record one training example.
    fn add_example(&mut self, features: &FeatureVector, label: &str);

    /// Finalize after a batch of examples.
    fn train(&mut self);

    /// All labels with their scores, highest first.
    fn classifications(&self, features: &FeatureVector) -> Vec<Classification>;

    fn counts(&self) -> &ModelCounts;

    fn counts_mut(&mut self) -> &mut ModelCounts;

    /// Name for logging.
    fn name(&self) -> &'static str;

    /// Best label, or `None` when the model knows no labels.
    fn classify(&self, features: &FeatureVector) -> Option<String> {
        self.classifications(features)
            .into_iter()
            .next()
            .map(|classification| classification.label)
    }

    /// An untrained instance of the same kind.
    fn fresh(&self) -> Self {
        Self::default()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use serde::{Deserialize, Serialize};

    use super::{Classification, CountModel, ModelCounts, NaiveBayes};
    use crate::feature::FeatureVector;

    /// Naive Bayes that records how often it was finalized and rebuilt.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub(crate) struct CountingModel {
        pub(crate) inner: NaiveBayes,
        pub(crate) train_calls: usize,
        pub(crate) generation: usize,
    }

    impl CountModel for CountingModel {
        fn add_example(&mut self, features: &FeatureVector, label: &str) {
            self.inner.add_example(features, label);
        }

        fn train(&mut self) {
            self.train_calls += 1;
            self.inner.train();
        }

        fn classifications(&self, features: &FeatureVector) -> Vec<Classification> {
            self.inner.classifications(features)
        }

        fn counts(&self) -> &ModelCounts {
            self.inner.counts()
        }

        fn counts_mut(&mut self) -> &mut ModelCounts {
            self.inner.counts_mut()
        }

        fn name(&self) -> &'static str {
            "counting"
        }

        fn fresh(&self) -> Self {
            CountingModel {
                inner: self.inner.fresh(),
                train_calls: 0,
                generation: self.generation + 1,
            }
        }
    }
}
