//! The text classifier facade.
//!
//! [`TextClassifier`] owns the document store, the feature vocabulary, the
//! training watermark and one [`CountModel`]. Mutating operations take
//! `&mut self`, so at most one writer exists at a time; `save` borrows the
//! classifier immutably for the whole write.
//!
//! # Examples
//!
//! ```
//! use falx::classifier::TextClassifier;
//!
//! let mut classifier = TextClassifier::new().unwrap();
//! classifier.add_document("buy cheap watches now", "spam").unwrap();
//! classifier.add_document("meeting at noon", "ham").unwrap();
//! classifier.train();
//!
//! let label = classifier.classify("cheap watches").unwrap();
//! assert_eq!(label.as_deref(), Some("spam"));
//! ```

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::Analyzer;
use crate::config::ClassifierConfig;
use crate::document::{Document, DocumentStore};
use crate::error::Result;
use crate::feature::{FeatureVector, FeatureVocabulary};
use crate::model::{Classification, CountModel, NaiveBayes};
use crate::removal::Removal;
use crate::snapshot::{ClassifierSnapshot, SNAPSHOT_FORMAT_VERSION};
use crate::training::IncrementalTrainer;
use crate::training::events::{TrainingEvent, TrainingEvents, TrainingObserver};

/// Input to the classifier: raw text to analyze, or tokens already analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation<'a> {
    Text(&'a str),
    Tokens(&'a [String]),
}

impl<'a> From<&'a str> for Observation<'a> {
    fn from(text: &'a str) -> Self {
        Observation::Text(text)
    }
}

impl<'a> From<&'a String> for Observation<'a> {
    fn from(text: &'a String) -> Self {
        Observation::Text(text)
    }
}

impl<'a> From<&'a [String]> for Observation<'a> {
    fn from(tokens: &'a [String]) -> Self {
        Observation::Tokens(tokens)
    }
}

impl<'a> From<&'a Vec<String>> for Observation<'a> {
    fn from(tokens: &'a Vec<String>) -> Self {
        Observation::Tokens(tokens)
    }
}

/// Online text classifier with incremental training and document removal.
pub struct TextClassifier<M: CountModel = NaiveBayes> {
    model: M,
    documents: DocumentStore,
    vocabulary: FeatureVocabulary,
    trainer: IncrementalTrainer,
    config: ClassifierConfig,
    analyzer: Arc<dyn Analyzer>,
    events: TrainingEvents,
}

impl TextClassifier<NaiveBayes> {
    /// Naive Bayes classifier with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_model(NaiveBayes::new(), ClassifierConfig::default())
    }
}

impl<M: CountModel> TextClassifier<M> {
    /// Classifier around `model`, analyzing with the configured analyzer.
    pub fn with_model(model: M, config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = config.analyzer.build()?;

        Ok(TextClassifier {
            model,
            documents: DocumentStore::new(),
            vocabulary: FeatureVocabulary::new(),
            trainer: IncrementalTrainer::new(),
            config,
            analyzer,
            events: TrainingEvents::new(),
        })
    }

    /// Replace the analyzer.
    ///
    /// Documents already stored keep their tokens; only new observations
    /// are analyzed with `analyzer`.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Tokens of an observation.
    pub fn tokens<'a, O: Into<Observation<'a>>>(&self, observation: O) -> Result<Vec<String>> {
        match observation.into() {
            Observation::Text(text) => self.analyzer.terms(text),
            Observation::Tokens(tokens) => Ok(tokens.to_vec()),
        }
    }

    /// Store a labeled document and merge its tokens into the vocabulary.
    ///
    /// Returns `Ok(false)` when the observation has no tokens; nothing is
    /// stored in that case. The document is not trained until the next
    /// [`train`](Self::train).
    pub fn add_document<'a, O: Into<Observation<'a>>>(&mut self, observation: O, label: &str) -> Result<bool> {
        let tokens = self.tokens(observation)?;
        if tokens.is_empty() {
            debug!("ignoring {label:?} document without tokens");
            return Ok(false);
        }

        self.vocabulary.observe(&tokens);
        let accepted = self.documents.append(Document::new(tokens, label));
        debug!(
            "added {label:?} document, {} stored, {} features",
            self.documents.len(),
            self.vocabulary.len()
        );
        Ok(accepted)
    }

    /// Remove a stored document and roll back its contribution to the model.
    ///
    /// Follows the configured retraction and rollback policies; see
    /// [`DocumentRemover::remove`](crate::removal::DocumentRemover::remove).
    pub fn remove_document<'a, O: Into<Observation<'a>>>(&mut self, observation: O, label: &str) -> Result<Removal> {
        let tokens = self.tokens(observation)?;
        let removal = self.config.remover().remove(
            &tokens,
            label,
            &mut self.documents,
            &mut self.vocabulary,
            &mut self.model,
            &mut self.trainer,
        );
        Ok(removal)
    }

    /// Feed every untrained document to the model.
    ///
    /// Returns the number of documents trained by this call.
    pub fn train(&mut self) -> usize {
        self.trainer.train_pending(
            &self.documents,
            &self.vocabulary,
            &mut self.model,
            &self.events,
        )
    }

    /// Discard the model and train a fresh one on every stored document.
    pub fn retrain(&mut self) -> usize {
        let fresh = self.model.fresh();
        let previous = std::mem::replace(&mut self.model, fresh);
        drop(previous);
        self.trainer.reset();

        info!(
            "retraining {} from scratch on {} documents",
            self.model.name(),
            self.documents.len()
        );
        self.train()
    }

    /// Feature vector of an observation against the current vocabulary.
    pub fn text_to_features<'a, O: Into<Observation<'a>>>(&self, observation: O) -> Result<FeatureVector> {
        let tokens = self.tokens(observation)?;
        Ok(self.vocabulary.vectorize(&tokens))
    }

    /// Best label for the observation, `None` before anything was trained.
    pub fn classify<'a, O: Into<Observation<'a>>>(&self, observation: O) -> Result<Option<String>> {
        let features = self.text_to_features(observation)?;
        Ok(self.model.classify(&features))
    }

    /// Every known label with its score, highest first.
    pub fn classifications<'a, O: Into<Observation<'a>>>(&self, observation: O) -> Result<Vec<Classification>> {
        let features = self.text_to_features(observation)?;
        Ok(self.model.classifications(&features))
    }

    /// Register a training observer.
    pub fn subscribe(&mut self, observer: Arc<dyn TrainingObserver>) {
        self.events.subscribe(observer);
    }

    /// Register a closure as a training observer.
    pub fn subscribe_fn<F>(&mut self, observer: F)
    where
        F: Fn(&TrainingEvent<'_>) + Send + Sync + 'static,
    {
        self.events.subscribe_fn(observer);
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn vocabulary(&self) -> &FeatureVocabulary {
        &self.vocabulary
    }

    /// Index of the next untrained document.
    pub fn watermark(&self) -> usize {
        self.trainer.watermark()
    }

    /// Documents added but not yet trained.
    pub fn pending(&self) -> usize {
        self.documents.len().saturating_sub(self.trainer.watermark())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Copy of the persistent state.
    pub fn snapshot(&self) -> ClassifierSnapshot<M> {
        ClassifierSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            documents: self.documents.clone(),
            features: self.vocabulary.clone(),
            last_added: self.trainer.watermark(),
            classifier: self.model.clone(),
            config: self.config.clone(),
        }
    }

    /// Rebuild a classifier from a snapshot without retraining.
    ///
    /// Binds `analyzer`, or a new instance of the configured analyzer when
    /// `None`, and starts with no observers.
    pub fn restore(snapshot: ClassifierSnapshot<M>, analyzer: Option<Arc<dyn Analyzer>>) -> Result<Self> {
        snapshot.validate()?;
        let analyzer = match analyzer {
            Some(analyzer) => analyzer,
            None => snapshot.config.analyzer.build()?,
        };

        Ok(TextClassifier {
            model: snapshot.classifier,
            documents: snapshot.documents,
            vocabulary: snapshot.features,
            trainer: IncrementalTrainer::with_watermark(snapshot.last_added),
            config: snapshot.config,
            analyzer,
            events: TrainingEvents::new(),
        })
    }

    /// Write the snapshot as JSON to `path`.
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.snapshot().to_json(false)?;
        tokio::fs::write(path, json).await?;

        info!(
            "saved {} documents and {} features to {}",
            self.documents.len(),
            self.vocabulary.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot written by [`save`](Self::save) and restore it.
    ///
    /// Nothing is returned unless the whole snapshot parses and validates.
    pub async fn load<P: AsRef<Path>>(path: P, analyzer: Option<Arc<dyn Analyzer>>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        let classifier = Self::restore(ClassifierSnapshot::from_json(&json)?, analyzer)?;

        info!(
            "loaded {} documents and {} features from {}",
            classifier.documents.len(),
            classifier.vocabulary.len(),
            path.display()
        );
        Ok(classifier)
    }
}

impl<M: CountModel + std::fmt::Debug> std::fmt::Debug for TextClassifier<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextClassifier")
            .field("model", &self.model)
            .field("documents", &self.documents.len())
            .field("features", &self.vocabulary.len())
            .field("watermark", &self.trainer.watermark())
            .field("config", &self.config)
            .field("analyzer", &self.analyzer.name())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerKind;
    use crate::removal::RollbackPolicy;

    fn spam_ham() -> TextClassifier {
        let mut classifier = TextClassifier::new().unwrap();
        classifier.add_document("buy cheap watches now", "spam").unwrap();
        classifier.add_document("cheap pills online", "spam").unwrap();
        classifier.add_document("meeting at noon", "ham").unwrap();
        classifier.add_document("lunch meeting tomorrow", "ham").unwrap();
        classifier
    }

    #[test]
    fn test_add_document_analyzes_text() {
        let classifier = spam_ham();

        assert_eq!(classifier.documents().len(), 4);
        assert_eq!(classifier.documents().get(0).unwrap().tokens, vec!["bui", "cheap", "watch"]);
        assert!(classifier.vocabulary().contains("meet"));
        assert_eq!(classifier.pending(), 4);
    }

    #[test]
    fn test_add_document_ignores_empty() {
        let mut classifier = TextClassifier::new().unwrap();

        assert!(!classifier.add_document("the and of", "spam").unwrap());
        assert!(!classifier.add_document("", "spam").unwrap());
        assert!(classifier.documents().is_empty());
        assert!(classifier.vocabulary().is_empty());
    }

    #[test]
    fn test_add_pre_tokenized() {
        let mut classifier = TextClassifier::new().unwrap();
        let tokens = vec!["Already".to_string(), "Tokens".to_string()];

        assert!(classifier.add_document(&tokens, "x").unwrap());
        assert_eq!(classifier.documents().get(0).unwrap().tokens, tokens);
    }

    #[test]
    fn test_classify_before_training() {
        let classifier = spam_ham();
        assert_eq!(classifier.classify("cheap").unwrap(), None);
        assert!(classifier.classifications("cheap").unwrap().is_empty());
    }

    #[test]
    fn test_train_and_classify() {
        let mut classifier = spam_ham();

        assert_eq!(classifier.train(), 4);
        assert_eq!(classifier.watermark(), 4);
        assert_eq!(classifier.classify("cheap watches").unwrap().as_deref(), Some("spam"));
        assert_eq!(classifier.classify("noon meeting").unwrap().as_deref(), Some("ham"));

        let ranked = classifier.classifications("cheap pills").unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "spam");
    }

    #[test]
    fn test_unknown_observation_is_zero_vector() {
        let mut classifier = spam_ham();
        classifier.train();

        let features = classifier.text_to_features("zebra quantum").unwrap();
        assert_eq!(features.len(), classifier.vocabulary().len());
        assert!(features.is_zero());
        assert!(classifier.classify("zebra quantum").unwrap().is_some());
    }

    #[test]
    fn test_retrain_swaps_model() {
        let mut classifier = spam_ham();
        classifier.train();
        let trained = classifier.model().clone();

        assert_eq!(classifier.retrain(), 4);
        assert_eq!(classifier.model(), &trained);
        assert_eq!(classifier.watermark(), 4);
    }

    #[test]
    fn test_remove_document_with_text() {
        let mut classifier = spam_ham();
        classifier.train();

        let removal = classifier.remove_document("cheap pills online", "spam").unwrap();

        assert!(removal.matched());
        assert_eq!(classifier.documents().len(), 3);
        assert_eq!(classifier.watermark(), 3);
        assert!(!classifier.vocabulary().contains("pill"));
    }

    #[test]
    fn test_match_only_config() {
        let config = ClassifierConfig {
            rollback: RollbackPolicy::MatchOnly,
            analyzer: AnalyzerKind::Whitespace,
            ..ClassifierConfig::default()
        };
        let mut classifier = TextClassifier::with_model(NaiveBayes::new(), config).unwrap();
        classifier.add_document("a b", "x").unwrap();
        classifier.train();
        let before = classifier.model().clone();

        let removal = classifier.remove_document("c d", "x").unwrap();

        assert!(!removal.rolled_back);
        assert_eq!(classifier.model(), &before);
        assert_eq!(classifier.analyzer().name(), "whitespace");
    }

    #[test]
    fn test_restore_from_snapshot() {
        let mut classifier = spam_ham();
        classifier.train();
        classifier.add_document("cheap offer", "spam").unwrap();

        let snapshot = classifier.snapshot();
        let restored = TextClassifier::restore(snapshot.clone(), None).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.pending(), 1);
        assert_eq!(restored.analyzer().name(), "english");
        assert_eq!(
            restored.classifications("cheap meeting").unwrap(),
            classifier.classifications("cheap meeting").unwrap()
        );
    }
}
