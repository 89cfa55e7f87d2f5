//! SQL scanner
//!
//! This module provides a rule-based scanner that turns SQL source text into
//! a stream of positioned tokens.

mod ruleset;
mod scanner;
mod span;
mod token;

pub use ruleset::{Rule, RuleSet};
pub use scanner::Scanner;
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};

/// The individual rules of the default rule set, for composing custom sets.
pub mod rules {
    pub use super::ruleset::{
        binary_operator, delimiter, keyword, numeric_literal, quoted_literal, sql_trivia,
        statement_separator, unary_operator, unquoted_literal, whitespace,
    };
}
