//! Analyzers turn raw text into the token sequence a document is stored as.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Document tokens
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```
//!
//! # Available Implementations
//!
//! - [`EnglishAnalyzer`] - lowercase, split on non-word characters, drop stop
//!   words, Porter-stem (the default)
//! - [`SimpleAnalyzer`] - Unicode word tokenization plus lowercasing
//! - [`WhitespaceAnalyzer`] - Whitespace splitting plus lowercasing
//! - [`PipelineAnalyzer`] - Custom tokenizer + filter chains
//!
//! # Examples
//!
//! ```
//! use falx::analysis::analyzer::{Analyzer, EnglishAnalyzer};
//!
//! let analyzer = EnglishAnalyzer::new().unwrap();
//! let terms = analyzer.terms("The meetings are running").unwrap();
//! assert_eq!(terms, vec!["meet", "run"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

mod english;
mod pipeline;
mod simple;
mod whitespace;

pub use english::EnglishAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
pub use whitespace::WhitespaceAnalyzer;

/// Trait for analyzers that convert text into processed tokens.
///
/// The classifier only consumes [`Analyzer::terms`], so an analyzer is the
/// "tokenize and stem" capability: it must be deterministic for identical
/// input.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &'static str;

    /// Analyze the text and keep the text of every token that was not stopped.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect())
    }
}
