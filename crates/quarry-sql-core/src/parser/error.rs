//! Diagnostics produced while parsing.

use std::fmt;

use serde::Serialize;

use crate::lexer::{Token, TokenKind};

/// The kind of a grammar violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum DiagnosticKind {
    /// None of the expected kinds of token was found.
    #[error("expected {}", one_of(.expected))]
    UnexpectedToken {
        /// The kinds that would have been accepted.
        expected: Vec<TokenKind>,
    },
    /// A specific single-character token, such as `(`, was not found.
    #[error("expected {kind} {rune:?}")]
    UnexpectedSingleRuneToken {
        /// The kind of the missing token.
        kind: TokenKind,
        /// The missing character.
        rune: char,
    },
    /// Valid syntax that is not implemented yet.
    #[error("unsupported construct")]
    UnsupportedConstruct,
    /// The input ended where a token was mandatory.
    #[error("incomplete statement")]
    IncompleteStatement,
    /// The scanner could not classify this input.
    #[error("unrecognized input")]
    ErrorToken,
}

fn one_of(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::from("nothing"),
        [kind] => kind.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("one of {} or {last}", init.join(", "))
        }
    }
}

/// A grammar violation, attached to the token at which it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// The offending token. For incomplete statements this is the
    /// end-of-input token.
    pub token: Token,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub const fn new(kind: DiagnosticKind, token: Token) -> Self {
        Self { kind, token }
    }

    /// 1-based line of the offending token.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.token.line()
    }

    /// 1-based column of the offending token.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.token.column()
    }

    /// Character offset of the offending token.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.token.offset()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line(), self.column(), self.kind)?;
        if self.token.is_eof() {
            Ok(())
        } else {
            write!(f, ", found {} {:?}", self.token.kind(), self.token.value())
        }
    }
}

impl std::error::Error for Diagnostic {}
