//! Tests for each supported statement kind.

mod common;
use common::*;

use quarry_sql_core::ast::{
    AlterTableAction, AnalyzeStmt, IndexedColumnTarget, RenameTarget, Statement,
};
use quarry_sql_core::{SyntaxNode, Token};

fn value(token: Option<&Token>) -> Option<&str> {
    token.map(Token::value)
}

#[test]
fn begin_plain() {
    let stmt = parse("BEGIN;");
    let Some(Statement::Begin(begin)) = &stmt.statement else {
        panic!("Expected BEGIN, got {stmt:?}");
    };
    assert_eq!(begin.begin.value(), "BEGIN");
    assert!(begin.mode.is_none());
    assert!(begin.transaction.is_none());
    assert!(stmt.separator.is_some());
}

#[test]
fn begin_modes() {
    for mode in ["DEFERRED", "IMMEDIATE", "EXCLUSIVE"] {
        let Statement::Begin(begin) = parse_statement(&format!("BEGIN {mode} TRANSACTION"))
        else {
            panic!("Expected BEGIN");
        };
        assert_eq!(value(begin.mode.as_ref()), Some(mode));
        assert!(begin.transaction.is_some());
    }
}

#[test]
fn commit_and_end() {
    let Statement::Commit(commit) = parse_statement("COMMIT TRANSACTION") else {
        panic!("Expected COMMIT");
    };
    assert!(commit.transaction.is_some());
    let Statement::Commit(end) = parse_statement("end") else {
        panic!("Expected END");
    };
    assert_eq!(end.commit.value(), "end");
}

#[test]
fn rollback_forms() {
    let Statement::Rollback(plain) = parse_statement("ROLLBACK") else {
        panic!("Expected ROLLBACK");
    };
    assert!(plain.to_savepoint.is_none());

    let Statement::Rollback(to) = parse_statement("ROLLBACK TO sp") else {
        panic!("Expected ROLLBACK");
    };
    let target = to.to_savepoint.expect("savepoint target");
    assert!(target.savepoint.is_none());
    assert_eq!(value(target.savepoint_name.as_ref()), Some("sp"));
}

#[test]
fn alter_table_rename_to() {
    let (stmt, diagnostics) = parse_with_diagnostics("ALTER TABLE t RENAME TO u;");
    assert!(diagnostics.is_empty());
    let Some(Statement::AlterTable(alter)) = &stmt.statement else {
        panic!("Expected ALTER TABLE");
    };
    assert!(alter.table.is_some());
    assert_eq!(value(alter.table_name.as_ref()), Some("t"));
    let Some(AlterTableAction::Rename(rename)) = &alter.action else {
        panic!("Expected RENAME");
    };
    let Some(RenameTarget::Table(target)) = &rename.target else {
        panic!("Expected RENAME TO");
    };
    assert_eq!(target.to.value(), "TO");
    assert_eq!(value(target.new_table_name.as_ref()), Some("u"));
}

#[test]
fn alter_table_rename_bare_column() {
    let Statement::AlterTable(alter) = parse_statement("ALTER TABLE t RENAME a TO b") else {
        panic!("Expected ALTER TABLE");
    };
    let Some(AlterTableAction::Rename(rename)) = alter.action else {
        panic!("Expected RENAME");
    };
    let Some(RenameTarget::Column(column)) = rename.target else {
        panic!("Expected RENAME column");
    };
    assert!(column.column.is_none());
    assert_eq!(value(column.column_name.as_ref()), Some("a"));
    assert_eq!(value(column.new_column_name.as_ref()), Some("b"));
}

#[test]
fn alter_table_add_bare_column() {
    let Statement::AlterTable(alter) =
        parse_statement("ALTER TABLE \"my table\" ADD c VARCHAR(255) COLLATE nocase")
    else {
        panic!("Expected ALTER TABLE");
    };
    assert_eq!(value(alter.table_name.as_ref()), Some("\"my table\""));
    let Some(AlterTableAction::AddColumn(add)) = alter.action else {
        panic!("Expected ADD");
    };
    assert!(add.column.is_none());
    let def = add.column_def.expect("column def");
    let type_name = def.type_name.expect("type name");
    assert_eq!(type_name.names[0].value(), "VARCHAR");
    assert_eq!(def.constraints.len(), 1);
}

#[test]
fn analyze_forms() {
    let analyze = |sql: &str| -> AnalyzeStmt {
        match parse_statement(sql) {
            Statement::Analyze(a) => a,
            other => panic!("Expected ANALYZE, got {other:?}"),
        }
    };
    assert!(analyze("ANALYZE").table_or_index_name.is_none());
    assert!(analyze("ANALYZE;").table_or_index_name.is_none());
    let lone = analyze("ANALYZE main");
    assert!(lone.schema.is_none());
    assert_eq!(value(lone.table_or_index_name.as_ref()), Some("main"));
    let qualified = analyze("ANALYZE main.idx");
    assert!(qualified.schema.is_some());
    assert_eq!(value(qualified.table_or_index_name.as_ref()), Some("idx"));
}

#[test]
fn attach_and_detach() {
    let Statement::Attach(attach) = parse_statement("ATTACH DATABASE 'other.db' AS other")
    else {
        panic!("Expected ATTACH");
    };
    assert!(attach.database.is_some());
    assert!(attach.expr.is_some());
    assert_eq!(value(attach.schema_name.as_ref()), Some("other"));

    let Statement::Detach(detach) = parse_statement("DETACH other") else {
        panic!("Expected DETACH");
    };
    assert!(detach.database.is_none());
    assert_eq!(value(detach.schema_name.as_ref()), Some("other"));
}

#[test]
fn vacuum_forms() {
    let Statement::Vacuum(vacuum) = parse_statement("VACUUM") else {
        panic!("Expected VACUUM");
    };
    assert!(vacuum.schema_name.is_none() && vacuum.into.is_none());

    let Statement::Vacuum(vacuum) = parse_statement("VACUUM main INTO 'backup.db';") else {
        panic!("Expected VACUUM");
    };
    assert_eq!(value(vacuum.schema_name.as_ref()), Some("main"));
    let into = vacuum.into.expect("INTO");
    assert_eq!(value(into.filename.as_ref()), Some("'backup.db'"));
}

#[test]
fn create_index_three_columns() {
    let (stmt, diagnostics) = parse_with_diagnostics("CREATE INDEX idx ON t ( a, b, c )");
    assert!(diagnostics.is_empty());
    let Some(Statement::CreateIndex(index)) = &stmt.statement else {
        panic!("Expected CREATE INDEX");
    };
    assert_eq!(index.indexed_columns.len(), 3);
    let names: Vec<_> = index
        .indexed_columns
        .iter()
        .map(|item| match &item.column.target {
            IndexedColumnTarget::ColumnName(name) => name.value(),
            IndexedColumnTarget::Expr(_) => panic!("Expected column name"),
        })
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(index.right_paren.is_some());
}

#[test]
fn create_index_qualified_name() {
    let Statement::CreateIndex(index) =
        parse_statement("CREATE UNIQUE INDEX IF NOT EXISTS main.idx ON t (a ASC) WHERE b")
    else {
        panic!("Expected CREATE INDEX");
    };
    assert!(index.unique.is_some());
    let if_not_exists = index.if_not_exists.expect("IF NOT EXISTS");
    assert!(if_not_exists.not.is_some() && if_not_exists.exists.is_some());
    assert_eq!(
        index.schema.as_ref().map(|s| s.schema_name.value()),
        Some("main")
    );
    assert_eq!(value(index.index_name.as_ref()), Some("idx"));
    assert!(index.indexed_columns[0].column.direction.is_some());
    assert!(index.where_clause.is_some());
}

#[test]
fn create_stubs_keep_their_tokens() {
    let cases = [
        ("CREATE TABLE t (a INTEGER)", "CREATE TABLE"),
        ("CREATE TEMPORARY VIEW v AS SELECT 1", "CREATE VIEW"),
        ("CREATE TEMP TRIGGER tr AFTER INSERT ON t BEGIN SELECT 1; END", "CREATE TRIGGER"),
        ("CREATE VIRTUAL TABLE f USING fts5(body)", "CREATE VIRTUAL TABLE"),
    ];
    for (sql, name) in cases {
        let (stmt, diagnostics) = parse_with_diagnostics(sql);
        let statement = stmt.statement.as_ref().expect("statement");
        assert_eq!(statement.name(), name);
        assert_eq!(diagnostics.len(), 1, "{sql}: {diagnostics:?}");
        assert!(statement.tokens().len() > 2);
    }
}

#[test]
fn explain_prefix() {
    let stmt = parse("EXPLAIN BEGIN");
    let explain = stmt.explain.as_ref().expect("EXPLAIN");
    assert!(explain.query.is_none());
    assert!(matches!(stmt.statement, Some(Statement::Begin(_))));
}

#[test]
fn display_renders_tokens() {
    let sql = "create   unique index\n i on t(a,b desc) ;";
    assert_eq!(parse(sql).to_string(), "create unique index i on t (a, b desc);");
}

#[test]
fn multiple_statements() {
    let results = parse_all("BEGIN; ALTER TABLE t ADD COLUMN c; COMMIT;");
    let names: Vec<_> = results
        .iter()
        .map(|(stmt, _)| stmt.statement.as_ref().map(Statement::name))
        .collect();
    assert_eq!(
        names,
        vec![Some("BEGIN"), Some("ALTER TABLE"), Some("COMMIT")]
    );
    assert!(results.iter().all(|(_, diagnostics)| diagnostics.is_empty()));
}
