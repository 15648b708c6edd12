//! Incremental training from a watermark.
//!
//! The trainer remembers how many stored documents the model has already
//! seen. Each pass vectorizes only the documents past that watermark against
//! the vocabulary as it is *now*, feeds them to the model and then runs the
//! model's finalize step once.

use log::{debug, info};

use crate::document::DocumentStore;
use crate::feature::FeatureVocabulary;
use crate::model::CountModel;
use crate::training::events::{TrainingEvent, TrainingEvents};

pub mod events;

/// Watermark over the document store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncrementalTrainer {
    last_trained: usize,
}

impl IncrementalTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted watermark.
    pub fn with_watermark(last_trained: usize) -> Self {
        IncrementalTrainer { last_trained }
    }

    /// Index of the next untrained document.
    pub fn watermark(&self) -> usize {
        self.last_trained
    }

    /// Feed every document at or past the watermark to `model`.
    ///
    /// Emits one [`TrainingEvent::DocumentTrained`] per document, then
    /// [`TrainingEvent::TrainingComplete`], then calls `model.train()`
    /// exactly once, even when nothing was pending. Returns the number of
    /// documents fed.
    pub fn train_pending<M: CountModel>(
        &mut self,
        documents: &DocumentStore,
        vocabulary: &FeatureVocabulary,
        model: &mut M,
        events: &TrainingEvents,
    ) -> usize {
        let total = documents.len();
        // Removals may have shrunk the store below the watermark.
        self.last_trained = self.last_trained.min(total);
        let start = self.last_trained;

        for (offset, document) in documents.tail(start).iter().enumerate() {
            let index = start + offset;
            let features = vocabulary.vectorize(&document.tokens);
            model.add_example(&features, &document.label);
            self.last_trained = index + 1;

            debug!(
                "trained document {}/{} with label {:?} ({} active features)",
                index + 1,
                total,
                document.label,
                features.active().count()
            );
            events.emit(&TrainingEvent::DocumentTrained {
                index,
                total,
                document,
            });
        }

        let trained = total - start;
        events.emit(&TrainingEvent::TrainingComplete { trained, total });
        model.train();

        info!(
            "{} training pass fed {} of {} documents over {} features",
            model.name(),
            trained,
            total,
            vocabulary.len()
        );
        trained
    }

    /// Forget everything trained so far.
    pub fn reset(&mut self) {
        self.last_trained = 0;
    }

    /// Move the watermark back by one, stopping at 0.
    pub fn step_back(&mut self) {
        self.last_trained = self.last_trained.saturating_sub(1);
    }
}
