//! Golden scanner fixtures.
//!
//! A fixture pairs an input with the tokens the scanner is expected to
//! produce for it, end-of-input excluded, and is stored as JSON:
//!
//! ```json
//! {
//!   "input": "BEGIN;",
//!   "output": [
//!     { "kind": { "Keyword": "Begin" }, "value": "BEGIN", "line": 1, "column": 1, "offset": 0, "length": 5 },
//!     { "kind": "StatementSeparator", "value": ";", "line": 1, "column": 6, "offset": 5, "length": 1 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::{RuleSet, Scanner, Token};

/// Errors from loading, saving or verifying a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed fixture file.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A token differs from the recorded one.
    #[error("token {index} differs: expected {expected}, got {actual}")]
    TokenMismatch {
        index: usize,
        expected: Box<Token>,
        actual: Box<Token>,
    },

    /// The scanner produced more or fewer tokens than recorded.
    #[error("expected {expected} tokens, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Result type for fixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// An input and its expected token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub input: String,
    pub output: Vec<Token>,
}

impl Fixture {
    /// Scans `input` with `ruleset` and records the result.
    #[must_use]
    pub fn generate(input: &str, ruleset: &RuleSet) -> Self {
        Self {
            input: input.to_string(),
            output: scan(input, ruleset),
        }
    }

    /// Reads a fixture from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a fixture.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes the fixture as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Rescans the input and compares the tokens with the recorded ones.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found.
    pub fn verify(&self, ruleset: &RuleSet) -> Result<()> {
        let actual = scan(&self.input, ruleset);
        if let Some((index, (expected, actual))) = self
            .output
            .iter()
            .zip(&actual)
            .enumerate()
            .find(|(_, (expected, actual))| expected != actual)
        {
            return Err(FixtureError::TokenMismatch {
                index,
                expected: Box::new(expected.clone()),
                actual: Box::new(actual.clone()),
            });
        }
        if self.output.len() != actual.len() {
            return Err(FixtureError::LengthMismatch {
                expected: self.output.len(),
                actual: actual.len(),
            });
        }
        Ok(())
    }
}

fn scan(input: &str, ruleset: &RuleSet) -> Vec<Token> {
    let mut tokens = Scanner::new(input, ruleset.clone()).tokenize();
    tokens.pop();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_generate_excludes_eof() {
        let fixture = Fixture::generate("VACUUM;", &RuleSet::default());
        assert_eq!(fixture.output.len(), 2);
        assert!(fixture.output.iter().all(|t| !t.is_eof()));
    }

    #[test]
    fn test_verify_detects_token_mismatch() {
        let mut fixture = Fixture::generate("DETACH aux", &RuleSet::default());
        fixture.output[1] = Token::new(TokenKind::Literal, "main", 1, 8, 7, 4);
        let err = fixture.verify(&RuleSet::default()).unwrap_err();
        assert!(matches!(err, FixtureError::TokenMismatch { index: 1, .. }));
    }

    #[test]
    fn test_verify_detects_length_mismatch() {
        let mut fixture = Fixture::generate("BEGIN", &RuleSet::default());
        fixture.output.clear();
        let err = fixture.verify(&RuleSet::default()).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::LengthMismatch {
                expected: 0,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("begin.json");
        let fixture = Fixture::generate("BEGIN TRANSACTION;", &RuleSet::default());
        fixture.save(&path).unwrap();
        let loaded = Fixture::load(&path).unwrap();
        assert_eq!(loaded, fixture);
        loaded.verify(&RuleSet::default()).unwrap();
    }
}
