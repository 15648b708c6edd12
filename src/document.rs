//! Labeled training documents and their ordered store.
//!
//! Store order is training order: the trainer's watermark is an index into
//! [`DocumentStore`].

use serde::{Deserialize, Serialize};

/// An analyzed training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Token sequence produced by the analyzer.
    #[serde(rename = "text")]
    pub tokens: Vec<String>,
    /// Class label.
    pub label: String,
}

impl Document {
    pub fn new<L: Into<String>>(tokens: Vec<String>, label: L) -> Self {
        Document {
            tokens,
            label: label.into(),
        }
    }

    /// Tokens joined by a single space, the form documents are matched on.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Ordered collection of accepted documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document. Documents without tokens are rejected and `false`
    /// is returned.
    pub fn append(&mut self, document: Document) -> bool {
        if document.tokens.is_empty() {
            return false;
        }

        self.documents.push(document);
        true
    }

    /// Remove the document whose space-joined tokens and label both match.
    ///
    /// The whole store is scanned and the last match wins.
    pub fn find_and_remove<S: AsRef<str>>(&mut self, tokens: &[S], label: &str) -> Option<Document> {
        let wanted = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(" ");

        let mut matched = None;
        for (index, document) in self.documents.iter().enumerate() {
            if document.label == label && document.joined() == wanted {
                matched = Some(index);
            }
        }

        matched.map(|index| self.documents.remove(index))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Whether any stored document contains `token`.
    pub fn contains_token(&self, token: &str) -> bool {
        self.documents.iter().any(|document| document.contains_token(token))
    }

    /// Documents from `start` to the end of the store.
    pub fn tail(&self, start: usize) -> &[Document] {
        self.documents.get(start..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a DocumentStore {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
