//! Simple analyzer: Unicode word tokenization plus lowercasing.
//!
//! No stop words are removed and nothing is stemmed, so every word of the
//! input becomes a feature.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// An analyzer that splits on Unicode word boundaries and lowercases.
#[derive(Clone, Debug)]
pub struct SimpleAnalyzer {
    inner: PipelineAnalyzer,
}

impl SimpleAnalyzer {
    /// Create a new simple analyzer.
    pub fn new() -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("simple");
        SimpleAnalyzer { inner }
    }
}

impl Default for SimpleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_analyzer() {
        let analyzer = SimpleAnalyzer::new();
        let terms = analyzer.terms("The Meeting, at NOON").unwrap();
        assert_eq!(terms, vec!["the", "meeting", "at", "noon"]);
    }
}
