//! Expression nodes.

use serde::Serialize;

use super::SyntaxNode;
use crate::lexer::Token;

/// An expression.
///
/// Only bare literal operands are recognized so far. Any other expression is
/// reported as an unsupported construct and kept verbatim, up to the end of
/// the statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    /// A literal value or a name.
    Literal(Token),
    /// An expression the parser does not understand.
    Unsupported(Vec<Token>),
}

impl Expr {
    /// Returns the literal token if this is a literal expression.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Token> {
        match self {
            Self::Literal(token) => Some(token),
            Self::Unsupported(_) => None,
        }
    }

    /// Returns true if the expression was skipped rather than parsed.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl SyntaxNode for Expr {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::Literal(token) => out.push(token),
            Self::Unsupported(tokens) => tokens.collect_tokens(out),
        }
    }
}
