#![allow(dead_code)]

use quarry_sql_core::ast::{SqlStmt, Statement};
use quarry_sql_core::{
    CollectingReporter, Diagnostic, DiagnosticKind, FailFastReporter, Parser, SyntaxNode,
};

/// Parses the first statement, panicking on any diagnostic.
pub fn parse(sql: &str) -> SqlStmt {
    Parser::from_sql(sql, FailFastReporter).parse_statement()
}

/// Parses the first statement, returning it with its diagnostics.
pub fn parse_with_diagnostics(sql: &str) -> (SqlStmt, Vec<Diagnostic>) {
    quarry_sql_core::parse(sql)
}

/// Parses the first statement and unwraps its payload.
pub fn parse_statement(sql: &str) -> Statement {
    parse(sql)
        .statement
        .unwrap_or_else(|| panic!("No statement parsed from: {sql}"))
}

/// Parses statements until the input is exhausted.
pub fn parse_all(sql: &str) -> Vec<(SqlStmt, Vec<Diagnostic>)> {
    let mut parser = Parser::from_sql(sql, CollectingReporter::new());
    let mut out = Vec::new();
    while !parser.is_exhausted() {
        let stmt = parser.parse_statement();
        let diagnostics = parser.reporter_mut().take();
        out.push((stmt, diagnostics));
    }
    out
}

pub fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(|d| d.kind.clone()).collect()
}

/// The concatenated source slices of every token in the tree.
pub fn retained_text(sql: &str, stmt: &SqlStmt) -> String {
    let chars: Vec<char> = sql.chars().collect();
    stmt.tokens()
        .iter()
        .flat_map(|t| t.span().slice(&chars).to_vec())
        .collect()
}

/// `sql` without whitespace and comments.
pub fn significant_text(sql: &str) -> String {
    let mut out = String::new();
    for line in sql.lines() {
        let line = line.split("--").next().unwrap_or_default();
        out.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    out
}
