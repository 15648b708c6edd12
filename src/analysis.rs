//! Text analysis for the classifier.
//!
//! Raw observations are turned into token sequences by an
//! [`Analyzer`](analyzer::Analyzer): a tokenizer followed by a chain of token
//! filters. The default [`EnglishAnalyzer`](analyzer::EnglishAnalyzer)
//! lowercases, drops stop words and Porter-stems.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
