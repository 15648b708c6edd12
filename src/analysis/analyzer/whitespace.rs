//! Whitespace analyzer: split on whitespace, then lowercase.
//!
//! Punctuation stays attached to its word. Useful for input that was already
//! tokenized and joined by spaces.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct WhitespaceAnalyzer {
    inner: PipelineAnalyzer,
}

impl WhitespaceAnalyzer {
    pub fn new() -> Self {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("whitespace");
        WhitespaceAnalyzer { inner }
    }
}

impl Default for WhitespaceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
