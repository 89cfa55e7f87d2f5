//! Diagnostic reporters.
//!
//! The parser calls a [`Reporter`] at the exact point an expectation is
//! violated. Reporters only record; recovery is up to the parser.

use super::{Diagnostic, DiagnosticKind};
use crate::lexer::{Token, TokenKind};

/// Receives the diagnostics of a parse, one method per kind.
pub trait Reporter {
    /// Records a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// `found` is none of the `expected` kinds.
    fn unexpected_token(&mut self, found: &Token, expected: &[TokenKind]) {
        self.report(Diagnostic::new(
            DiagnosticKind::UnexpectedToken {
                expected: expected.to_vec(),
            },
            found.clone(),
        ));
    }

    /// `found` is not the single-character token `rune` of kind `kind`.
    fn unexpected_single_rune_token(&mut self, found: &Token, kind: TokenKind, rune: char) {
        self.report(Diagnostic::new(
            DiagnosticKind::UnexpectedSingleRuneToken { kind, rune },
            found.clone(),
        ));
    }

    /// `token` starts a construct that is not implemented.
    fn unsupported_construct(&mut self, token: &Token) {
        self.report(Diagnostic::new(
            DiagnosticKind::UnsupportedConstruct,
            token.clone(),
        ));
    }

    /// The input ended at `eof` where a token was mandatory.
    fn incomplete_statement(&mut self, eof: &Token) {
        self.report(Diagnostic::new(
            DiagnosticKind::IncompleteStatement,
            eof.clone(),
        ));
    }

    /// The scanner produced an error token.
    fn error_token(&mut self, token: &Token) {
        self.report(Diagnostic::new(DiagnosticKind::ErrorToken, token.clone()));
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Accumulates diagnostics in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    /// The diagnostics reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Removes and returns the diagnostics reported so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Consumes the reporter, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Panics on the first diagnostic. Meant for tests and for inputs that are
/// known to be well-formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFastReporter;

impl Reporter for FailFastReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        panic!("unexpected diagnostic: {diagnostic}");
    }
}
