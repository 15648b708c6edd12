//! Feature vocabulary and binary feature vectors.
//!
//! The vocabulary is the implicit schema of every feature vector: column `i`
//! of a vector is the `i`-th token of the vocabulary at the moment the vector
//! was built. Any [`FeatureVocabulary::observe`] or
//! [`FeatureVocabulary::retract`] call invalidates previously built vectors,
//! so vectors are recomputed per call and never cached.
//!
//! # Examples
//!
//! ```
//! use falx::feature::FeatureVocabulary;
//!
//! let mut vocabulary = FeatureVocabulary::new();
//! vocabulary.observe(&["buy", "cheap"]);
//! vocabulary.observe(&["cheap", "meet"]);
//!
//! let vector = vocabulary.vectorize(&["meet", "unknown"]);
//! assert_eq!(vector.as_slice(), &[0, 0, 1]);
//! ```

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexSet;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered set of every distinct token seen in an added document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVocabulary {
    tokens: IndexSet<String>,
}

impl FeatureVocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every token as present. Known tokens keep their column.
    pub fn observe<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            let token = token.as_ref();
            if !self.tokens.contains(token) {
                self.tokens.insert(token.to_string());
            }
        }
    }

    /// Remove every given token, whether or not other documents still use it.
    ///
    /// Remaining tokens keep their relative order.
    pub fn retract<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            self.tokens.shift_remove(token.as_ref());
        }
    }

    /// Build the 0/1 presence vector of `tokens` against the current columns.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> FeatureVector {
        let present: HashSet<&str> = tokens.iter().map(AsRef::as_ref).collect();

        FeatureVector(
            self.tokens
                .iter()
                .map(|token| u8::from(present.contains(token.as_str())))
                .collect(),
        )
    }

    /// Number of tokens, which is also the width of every vector built now.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Column of `token`, if present.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    /// Tokens in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureVocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FeatureVocabulary {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// Persisted as a JSON object mapping each token to 1, in column order.
impl Serialize for FeatureVocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tokens.len()))?;
        for token in &self.tokens {
            map.serialize_entry(token, &1u8)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureVocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VocabularyVisitor;

        impl<'de> Visitor<'de> for VocabularyVisitor {
            type Value = FeatureVocabulary;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of feature tokens")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tokens = IndexSet::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((token, _marker)) = access.next_entry::<String, IgnoredAny>()? {
                    tokens.insert(token);
                }
                Ok(FeatureVocabulary { tokens })
            }
        }

        deserializer.deserialize_map(VocabularyVisitor)
    }
}

/// Binary presence vector, one entry per vocabulary column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeatureVector(Vec<u8>);

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Indices of the 1-valued entries.
    pub fn active(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(|(index, _)| index)
    }

    /// Whether no entry is set.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|value| *value == 0)
    }
}

impl From<Vec<u8>> for FeatureVector {
    fn from(values: Vec<u8>) -> Self {
        FeatureVector(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_keeps_first_seen_order() {
        let mut vocabulary = FeatureVocabulary::new();
        vocabulary.observe(&["b", "a", "b"]);
        vocabulary.observe(&["c", "a"]);

        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(vocabulary.position("c"), Some(2));
        assert_eq!(vocabulary.len(), 3);
    }

    #[test]
    fn test_retract_shifts_columns() {
        let mut vocabulary: FeatureVocabulary = ["a", "b", "c"].into_iter().collect();
        vocabulary.retract(&["b", "missing"]);

        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(vocabulary.position("c"), Some(1));

        vocabulary.observe(&["b"]);
        assert_eq!(vocabulary.position("b"), Some(2));
    }

    #[test]
    fn test_vectorize() {
        let vocabulary: FeatureVocabulary = ["buy", "cheap", "meet"].into_iter().collect();

        let vector = vocabulary.vectorize(&["cheap", "meet", "cheap"]);
        assert_eq!(vector.as_slice(), &[0, 1, 1]);
        assert_eq!(vector.active().collect::<Vec<_>>(), vec![1, 2]);

        let empty = vocabulary.vectorize::<&str>(&[]);
        assert_eq!(empty.len(), 3);
        assert!(empty.is_zero());
    }

    #[test]
    fn test_vectorize_empty_vocabulary() {
        let vocabulary = FeatureVocabulary::new();
        assert!(vocabulary.vectorize(&["anything"]).is_empty());
    }

    #[test]
    fn test_serde_preserves_order() {
        let vocabulary: FeatureVocabulary = ["zeta", "alpha", "mid"].into_iter().collect();

        let json = serde_json::to_string(&vocabulary).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":1,"mid":1}"#);

        let restored: FeatureVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vocabulary);
    }

    #[test]
    fn test_deserialize_rejects_non_map() {
        assert!(serde_json::from_str::<FeatureVocabulary>("[1, 2]").is_err());
    }
}
