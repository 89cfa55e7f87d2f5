//! # quarry-sql-core
//!
//! The front end of a SQLite-dialect SQL engine.
//!
//! This crate provides:
//! - A rule-based scanner with a pluggable [`RuleSet`]
//! - An error-tolerant recursive descent parser that reports every grammar
//!   violation to a [`Reporter`] and keeps going
//! - A concrete syntax tree that retains every consumed token
//! - Golden scanner fixtures for regression testing
//!
//! ## Parsing
//!
//! ```rust
//! use quarry_sql_core::ast::Statement;
//! use quarry_sql_core::parse;
//!
//! let (stmt, diagnostics) = parse("ALTER TABLE t RENAME TO u;");
//! assert!(diagnostics.is_empty());
//! assert!(matches!(stmt.statement, Some(Statement::AlterTable(_))));
//! assert_eq!(stmt.to_string(), "ALTER TABLE t RENAME TO u;");
//! ```
//!
//! ## Recovery
//!
//! Malformed input yields diagnostics and a partial tree instead of an
//! error:
//!
//! ```rust
//! use quarry_sql_core::{CollectingReporter, Parser};
//!
//! let mut parser = Parser::from_sql("DETACH; BEGIN;", CollectingReporter::new());
//! let detach = parser.parse_statement();
//! let begin = parser.parse_statement();
//! assert_eq!(parser.reporter().diagnostics().len(), 1);
//! assert!(begin.statement.is_some());
//! assert!(parser.is_exhausted());
//! # let _ = detach;
//! ```

pub mod ast;
pub mod fixture;
pub mod lexer;
pub mod parser;

pub use ast::{SqlStmt, Statement, SyntaxNode};
pub use fixture::{Fixture, FixtureError};
pub use lexer::{Keyword, RuleSet, Scanner, Token, TokenKind};
pub use parser::{
    parse, CollectingReporter, Diagnostic, DiagnosticKind, FailFastReporter, Parser, Reporter,
};
