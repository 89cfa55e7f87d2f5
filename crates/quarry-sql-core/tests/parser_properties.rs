//! Whole-pipeline properties: losslessness and determinism.

mod common;
use common::*;

use quarry_sql_core::{Keyword, RuleSet, Scanner, TokenKind};

const WELL_FORMED: &[&str] = &[
    "BEGIN;",
    "ALTER TABLE t RENAME TO u;",
    "ALTER TABLE main.t RENAME COLUMN a TO b",
    "ALTER TABLE t ADD COLUMN price DECIMAL(10, -2) NOT NULL ON CONFLICT ABORT DEFAULT 0",
    "ANALYZE main.idx;",
    "ATTACH DATABASE 'file.db' AS aux",
    "DETACH DATABASE aux;",
    "VACUUM aux INTO 'copy.db'",
    "ROLLBACK TRANSACTION TO SAVEPOINT s1",
    "EXPLAIN QUERY PLAN COMMIT",
    "CREATE UNIQUE INDEX IF NOT EXISTS i ON t (a COLLATE binary DESC, b) WHERE c;",
    "-- leading comment\nBEGIN EXCLUSIVE; -- trailing",
];

#[test]
fn select_is_one_keyword_token() {
    let tokens = Scanner::new("SELECT", RuleSet::default()).tokenize();
    assert_eq!(tokens.len(), 2);
    let select = &tokens[0];
    assert_eq!(select.kind(), TokenKind::Keyword(Keyword::Select));
    assert_eq!(select.value(), "SELECT");
    assert_eq!(
        (select.line(), select.column(), select.offset(), select.length()),
        (1, 1, 0, 6)
    );
    assert!(tokens[1].is_eof());
}

#[test]
fn peek_is_pure() {
    let mut scanner = Scanner::new("ATTACH 'a' AS b", RuleSet::default());
    let first = scanner.peek().clone();
    assert_eq!(scanner.peek(), &first);
    assert_eq!(scanner.next(), first);
}

#[test]
fn scanning_is_deterministic() {
    for sql in WELL_FORMED {
        let first = Scanner::new(sql, RuleSet::default()).tokenize();
        let second = Scanner::new(sql, RuleSet::default()).tokenize();
        assert_eq!(first, second);
    }
}

#[test]
fn well_formed_statements_round_trip() {
    for sql in WELL_FORMED {
        let (stmt, diagnostics) = parse_with_diagnostics(sql);
        assert!(diagnostics.is_empty(), "{sql}: {diagnostics:?}");
        assert_eq!(retained_text(sql, &stmt), significant_text(sql), "{sql}");
    }
}

#[test]
fn rendering_is_a_fixed_point() {
    for sql in WELL_FORMED {
        let rendered = parse(sql).to_string();
        assert_eq!(parse(&rendered).to_string(), rendered, "{sql}");
    }
}

#[test]
fn parsing_is_deterministic() {
    let inputs = WELL_FORMED
        .iter()
        .copied()
        .chain(["ALTER TABLE RENAME TO u", "CREATE INDEX ON (", "PRAGMA x; ;"]);
    for sql in inputs {
        assert_eq!(parse_all(sql), parse_all(sql), "{sql}");
    }
}
