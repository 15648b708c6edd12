//! Serialized classifier state.
//!
//! A snapshot holds everything needed to resume a classifier except the
//! analyzer and the training observers, which are bound again on restore.

use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::document::DocumentStore;
use crate::error::{FalxError, Result};
use crate::feature::FeatureVocabulary;
use crate::model::CountModel;

/// Current snapshot layout version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Full persisted state of a [`TextClassifier`](crate::classifier::TextClassifier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierSnapshot<M> {
    pub format_version: u32,
    /// Stored documents in training order.
    #[serde(rename = "docs")]
    pub documents: DocumentStore,
    pub features: FeatureVocabulary,
    /// Training watermark.
    pub last_added: usize,
    /// Model counts.
    pub classifier: M,
    #[serde(default)]
    pub config: ClassifierConfig,
}

impl<M: CountModel> ClassifierSnapshot<M> {
    /// Parse a snapshot and check its consistency.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Reject snapshots a classifier could not resume from.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(FalxError::snapshot(format!(
                "unsupported format version {} (expected {SNAPSHOT_FORMAT_VERSION})",
                self.format_version
            )));
        }

        if self.last_added > self.documents.len() {
            return Err(FalxError::snapshot(format!(
                "watermark {} is beyond the {} stored documents",
                self.last_added,
                self.documents.len()
            )));
        }

        let smoothing = self.classifier.counts().smoothing;
        if !smoothing.is_finite() || smoothing < 0.0 {
            return Err(FalxError::snapshot(format!(
                "invalid smoothing constant {smoothing}"
            )));
        }

        Ok(())
    }
}
