//! Undoing a trained document without retraining.
//!
//! Removal deletes the matching document from the store, retracts its tokens
//! from the vocabulary and subtracts its contribution from the model counts.
//! Two steps carry a policy so their historical behavior can be tightened
//! independently:
//!
//! - [`RetractionPolicy`]: which tokens leave the vocabulary.
//! - [`RollbackPolicy`]: whether counts are rolled back when no stored
//!   document matched.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentStore};
use crate::feature::{FeatureVector, FeatureVocabulary};
use crate::model::{CountModel, ModelCounts};
use crate::training::IncrementalTrainer;

/// Which tokens of a removed document are retracted from the vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetractionPolicy {
    /// Every token of the removed document, even ones other documents use.
    #[default]
    Aggressive,
    /// Only tokens no remaining document contains.
    Unreferenced,
}

impl RetractionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RetractionPolicy::Aggressive => "aggressive",
            RetractionPolicy::Unreferenced => "unreferenced",
        }
    }
}

/// When model counts are rolled back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackPolicy {
    /// On every removal request, matched or not.
    #[default]
    Unconditional,
    /// Only when a stored document was actually removed.
    MatchOnly,
}

impl RollbackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RollbackPolicy::Unconditional => "unconditional",
            RollbackPolicy::MatchOnly => "match_only",
        }
    }
}

/// Outcome of a removal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The document taken out of the store, if one matched.
    pub removed: Option<Document>,
    /// Whether model counts were rolled back.
    pub rolled_back: bool,
}

impl Removal {
    pub fn matched(&self) -> bool {
        self.removed.is_some()
    }
}

/// Removes documents and rolls back their model contribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentRemover {
    retraction: RetractionPolicy,
    rollback: RollbackPolicy,
}

impl DocumentRemover {
    pub fn new(retraction: RetractionPolicy, rollback: RollbackPolicy) -> Self {
        DocumentRemover {
            retraction,
            rollback,
        }
    }

    pub fn retraction(&self) -> RetractionPolicy {
        self.retraction
    }

    pub fn rollback(&self) -> RollbackPolicy {
        self.rollback
    }

    /// Remove the document with these `tokens` and `label`.
    ///
    /// The feature vector used for the count rollback is computed before the
    /// vocabulary shrinks. Training is not re-run; the watermark steps back by
    /// one and the model's finalize step is invoked once.
    pub fn remove<M: CountModel>(
        &self,
        tokens: &[String],
        label: &str,
        documents: &mut DocumentStore,
        vocabulary: &mut FeatureVocabulary,
        model: &mut M,
        trainer: &mut IncrementalTrainer,
    ) -> Removal {
        let removed = documents.find_and_remove(tokens, label);
        let features = vocabulary.vectorize(tokens);

        match &removed {
            Some(document) => {
                self.retract(document, documents, vocabulary);
                debug!(
                    "removed {:?} document with {} tokens, vocabulary now {} features",
                    label,
                    document.tokens.len(),
                    vocabulary.len()
                );
            }
            None => warn!("no stored {label:?} document matches {:?}", tokens.join(" ")),
        }

        let rolled_back = match self.rollback {
            RollbackPolicy::Unconditional => true,
            RollbackPolicy::MatchOnly => removed.is_some(),
        };

        if rolled_back {
            rollback_counts(model.counts_mut(), &features, label);
            trainer.step_back();
        }
        model.train();

        Removal {
            removed,
            rolled_back,
        }
    }

    fn retract(
        &self,
        document: &Document,
        documents: &DocumentStore,
        vocabulary: &mut FeatureVocabulary,
    ) {
        match self.retraction {
            RetractionPolicy::Aggressive => vocabulary.retract(&document.tokens),
            RetractionPolicy::Unreferenced => {
                let unreferenced: Vec<&str> = document
                    .tokens
                    .iter()
                    .map(String::as_str)
                    .filter(|token| !documents.contains_token(token))
                    .collect();
                vocabulary.retract(&unreferenced);
            }
        }
    }
}

/// Subtract one example with `features` and `label` from `counts`.
///
/// Counts at or below the smoothing floor (`smoothing + 1`) are reset to 0
/// instead of decremented. When a single active feature count is at the
/// floor, the *whole* per-label feature row is zeroed. A label the counts have
/// never seen gets no entries.
pub fn rollback_counts(counts: &mut ModelCounts, features: &FeatureVector, label: &str) {
    let floor = counts.smoothing + 1.0;

    counts.total_examples = decrement_to_floor(counts.total_examples, floor);

    if let Some(total) = counts.class_totals.get_mut(label) {
        *total = decrement_to_floor(*total, floor);
    }

    let Some(row) = counts.class_features.get_mut(label) else {
        return;
    };
    for index in features.active() {
        match row.get_mut(index) {
            Some(count) if *count > floor => *count -= 1.0,
            _ => {
                row.iter_mut().for_each(|count| *count = 0.0);
            }
        }
    }
}

fn decrement_to_floor(count: f64, floor: f64) -> f64 {
    if count > floor { count - 1.0 } else { 0.0 }
}
