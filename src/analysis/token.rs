//! Token types for text analysis.
//!
//! A [`Token`] is the unit flowing through the analysis pipeline: the
//! tokenizer produces them from raw text and filters rewrite or stop them.
//! Only the text of tokens that were not stopped ends up in a document.
//!
//! # Examples
//!
//! ```
//! use falx::analysis::token::Token;
//!
//! let token = Token::new("Running").with_text("run");
//! assert_eq!(token.text, "run");
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Whether this token has been marked as stopped by a filter
    pub stopped: bool,
}

impl Token {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            stopped: false,
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Replace the token text, keeping the stopped flag.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("hello");
        assert_eq!(token.text, "hello");
        assert_eq!(token.len(), 5);
        assert!(!token.is_stopped());
    }

    #[test]
    fn test_token_rewrite_keeps_stop_flag() {
        let token = Token::new("Meetings").stop().with_text("meet");
        assert_eq!(token.text, "meet");
        assert!(token.is_stopped());
    }

    #[test]
    fn test_token_stop() {
        let token = Token::new("the").stop();
        assert!(token.is_stopped());
        assert_eq!(token.to_string(), "the");
    }
}
