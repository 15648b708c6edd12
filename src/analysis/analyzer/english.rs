use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Tokenize-and-stem analyzer for English text.
///
/// Splits on runs of non-word characters, lowercases, removes the default
/// English stop words and applies the Porter stemmer.
pub struct EnglishAnalyzer {
    inner: PipelineAnalyzer,
}

impl EnglishAnalyzer {
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::default()))
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("english");

        Ok(Self { inner: analyzer })
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "english"
    }
}

impl Debug for EnglishAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnglishAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_analyzer() {
        let analyzer = EnglishAnalyzer::new().unwrap();

        let terms = analyzer.terms("Buy CHEAP watches now!!").unwrap();
        assert_eq!(terms, vec!["bui", "cheap", "watch"]);
    }

    #[test]
    fn test_english_analyzer_is_deterministic() {
        let analyzer = EnglishAnalyzer::new().unwrap();
        let text = "Meeting at noon about the quarterly reports";

        assert_eq!(analyzer.terms(text).unwrap(), analyzer.terms(text).unwrap());
        assert_eq!(
            analyzer.terms(text).unwrap(),
            vec!["meet", "noon", "quarterli", "report"]
        );
    }

    #[test]
    fn test_only_stop_words() {
        let analyzer = EnglishAnalyzer::new().unwrap();
        assert!(analyzer.terms("the and of a").unwrap().is_empty());
    }

    #[test]
    fn test_english_analyzer_name() {
        assert_eq!(EnglishAnalyzer::new().unwrap().name(), "english");
    }
}
