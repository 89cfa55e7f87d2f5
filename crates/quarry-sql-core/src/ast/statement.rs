//! Statement nodes.

use std::fmt;

use serde::Serialize;

use super::node::{render_tokens, syntax_node};
use super::{ColumnDef, Expr, IndexedColumn, SchemaQualifier, SyntaxNode};
use crate::lexer::Token;

/// The root of one parsed statement.
///
/// At most one statement is present. A statement that could not be
/// recognized at all leaves `statement` empty; diagnostics describe why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SqlStmt {
    pub explain: Option<ExplainPrefix>,
    pub statement: Option<Statement>,
    /// The `;` that terminated the statement, if any.
    pub separator: Option<Token>,
}

impl SqlStmt {
    /// Returns true if neither a statement nor a prefix was parsed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.explain.is_none() && self.statement.is_none()
    }
}

impl fmt::Display for SqlStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_tokens(&self.tokens()))
    }
}

/// `EXPLAIN [QUERY PLAN]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainPrefix {
    pub explain: Token,
    pub query: Option<Token>,
    pub plan: Option<Token>,
}

/// A statement of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    AlterTable(AlterTableStmt),
    Analyze(AnalyzeStmt),
    Attach(AttachStmt),
    Begin(BeginStmt),
    Commit(CommitStmt),
    CreateIndex(CreateIndexStmt),
    CreateTable(CreateTableStmt),
    CreateTrigger(CreateTriggerStmt),
    CreateView(CreateViewStmt),
    CreateVirtualTable(CreateVirtualTableStmt),
    Detach(DetachStmt),
    Rollback(RollbackStmt),
    Vacuum(VacuumStmt),
    /// A statement kind the parser does not understand.
    Unsupported(UnsupportedStmt),
}

impl Statement {
    /// A short human-readable name of the statement kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AlterTable(_) => "ALTER TABLE",
            Self::Analyze(_) => "ANALYZE",
            Self::Attach(_) => "ATTACH",
            Self::Begin(_) => "BEGIN",
            Self::Commit(_) => "COMMIT",
            Self::CreateIndex(_) => "CREATE INDEX",
            Self::CreateTable(_) => "CREATE TABLE",
            Self::CreateTrigger(_) => "CREATE TRIGGER",
            Self::CreateView(_) => "CREATE VIEW",
            Self::CreateVirtualTable(_) => "CREATE VIRTUAL TABLE",
            Self::Detach(_) => "DETACH",
            Self::Rollback(_) => "ROLLBACK",
            Self::Vacuum(_) => "VACUUM",
            Self::Unsupported(_) => "UNSUPPORTED",
        }
    }
}

/// `ALTER TABLE [schema.]table-name action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlterTableStmt {
    pub alter: Token,
    pub table: Option<Token>,
    pub schema: Option<SchemaQualifier>,
    pub table_name: Option<Token>,
    pub action: Option<AlterTableAction>,
}

/// What an `ALTER TABLE` statement does to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlterTableAction {
    Rename(RenameClause),
    AddColumn(AddColumnClause),
}

/// `RENAME (TO new-table-name | [COLUMN] column-name TO new-column-name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameClause {
    pub rename: Token,
    pub target: Option<RenameTarget>,
}

/// The two forms of `RENAME`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenameTarget {
    Table(RenameTable),
    Column(RenameColumn),
}

/// `TO new-table-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameTable {
    pub to: Token,
    pub new_table_name: Option<Token>,
}

/// `[COLUMN] column-name TO new-column-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameColumn {
    pub column: Option<Token>,
    pub column_name: Option<Token>,
    pub to: Option<Token>,
    pub new_column_name: Option<Token>,
}

/// `ADD [COLUMN] column-def`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddColumnClause {
    pub add: Token,
    pub column: Option<Token>,
    pub column_def: Option<ColumnDef>,
}

/// `ANALYZE [[schema.]table-or-index-name]`
///
/// A lone name is stored in `table_or_index_name`; it may equally name a
/// schema, which only name resolution can decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeStmt {
    pub analyze: Token,
    pub schema: Option<SchemaQualifier>,
    pub table_or_index_name: Option<Token>,
}

/// `ATTACH [DATABASE] expr AS schema-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachStmt {
    pub attach: Token,
    pub database: Option<Token>,
    pub expr: Option<Expr>,
    pub as_: Option<Token>,
    pub schema_name: Option<Token>,
}

/// `BEGIN [DEFERRED|IMMEDIATE|EXCLUSIVE] [TRANSACTION]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BeginStmt {
    pub begin: Token,
    /// `DEFERRED`, `IMMEDIATE` or `EXCLUSIVE`.
    pub mode: Option<Token>,
    pub transaction: Option<Token>,
}

/// `(COMMIT|END) [TRANSACTION]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStmt {
    /// The `COMMIT` or `END` keyword.
    pub commit: Token,
    pub transaction: Option<Token>,
}

/// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] [schema.]index-name
/// ON table-name ( indexed-column {, indexed-column} ) [WHERE expr]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIndexStmt {
    pub create: Token,
    pub unique: Option<Token>,
    pub index: Option<Token>,
    pub if_not_exists: Option<IfNotExists>,
    pub schema: Option<SchemaQualifier>,
    pub index_name: Option<Token>,
    pub on: Option<Token>,
    pub table_name: Option<Token>,
    pub left_paren: Option<Token>,
    /// The indexed columns, each followed by its `,` separator if one was
    /// present.
    pub indexed_columns: Vec<IndexedColumnItem>,
    pub right_paren: Option<Token>,
    pub where_clause: Option<WhereClause>,
}

/// One entry of an indexed column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedColumnItem {
    pub column: IndexedColumn,
    pub comma: Option<Token>,
}

/// `IF NOT EXISTS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IfNotExists {
    pub if_: Token,
    pub not: Option<Token>,
    pub exists: Option<Token>,
}

/// `WHERE expr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereClause {
    pub where_: Token,
    pub expr: Option<Expr>,
}

/// `CREATE [TEMP|TEMPORARY] TABLE ...`. The body is not parsed yet and is
/// retained verbatim, starting at the `TABLE` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTableStmt {
    pub create: Token,
    pub temporary: Option<Token>,
    pub body: Vec<Token>,
}

/// `CREATE [TEMP|TEMPORARY] TRIGGER ...`, body retained verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTriggerStmt {
    pub create: Token,
    pub temporary: Option<Token>,
    pub body: Vec<Token>,
}

/// `CREATE [TEMP|TEMPORARY] VIEW ...`, body retained verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateViewStmt {
    pub create: Token,
    pub temporary: Option<Token>,
    pub body: Vec<Token>,
}

/// `CREATE VIRTUAL TABLE ...`, body retained verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateVirtualTableStmt {
    pub create: Token,
    pub body: Vec<Token>,
}

/// `DETACH [DATABASE] schema-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetachStmt {
    pub detach: Token,
    pub database: Option<Token>,
    pub schema_name: Option<Token>,
}

/// `ROLLBACK [TRANSACTION] [TO [SAVEPOINT] savepoint-name]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollbackStmt {
    pub rollback: Token,
    pub transaction: Option<Token>,
    pub to_savepoint: Option<SavepointTarget>,
}

/// `TO [SAVEPOINT] savepoint-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavepointTarget {
    pub to: Token,
    pub savepoint: Option<Token>,
    pub savepoint_name: Option<Token>,
}

/// `VACUUM [schema-name] [INTO filename]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacuumStmt {
    pub vacuum: Token,
    pub schema_name: Option<Token>,
    pub into: Option<VacuumInto>,
}

/// `INTO filename`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacuumInto {
    pub into: Token,
    pub filename: Option<Token>,
}

/// A statement that was skipped, its tokens retained verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedStmt {
    pub tokens: Vec<Token>,
}

syntax_node!(SqlStmt { explain, statement, separator });
syntax_node!(ExplainPrefix { explain, query, plan });
syntax_node!(AlterTableStmt { alter, table, schema, table_name, action });
syntax_node!(RenameClause { rename, target });
syntax_node!(RenameTable { to, new_table_name });
syntax_node!(RenameColumn { column, column_name, to, new_column_name });
syntax_node!(AddColumnClause { add, column, column_def });
syntax_node!(AnalyzeStmt { analyze, schema, table_or_index_name });
syntax_node!(AttachStmt { attach, database, expr, as_, schema_name });
syntax_node!(BeginStmt { begin, mode, transaction });
syntax_node!(CommitStmt { commit, transaction });
syntax_node!(CreateIndexStmt {
    create,
    unique,
    index,
    if_not_exists,
    schema,
    index_name,
    on,
    table_name,
    left_paren,
    indexed_columns,
    right_paren,
    where_clause,
});
syntax_node!(IndexedColumnItem { column, comma });
syntax_node!(IfNotExists { if_, not, exists });
syntax_node!(WhereClause { where_, expr });
syntax_node!(CreateTableStmt { create, temporary, body });
syntax_node!(CreateTriggerStmt { create, temporary, body });
syntax_node!(CreateViewStmt { create, temporary, body });
syntax_node!(CreateVirtualTableStmt { create, body });
syntax_node!(DetachStmt { detach, database, schema_name });
syntax_node!(RollbackStmt { rollback, transaction, to_savepoint });
syntax_node!(SavepointTarget { to, savepoint, savepoint_name });
syntax_node!(VacuumStmt { vacuum, schema_name, into });
syntax_node!(VacuumInto { into, filename });
syntax_node!(UnsupportedStmt { tokens });

impl SyntaxNode for Statement {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::AlterTable(stmt) => stmt.collect_tokens(out),
            Self::Analyze(stmt) => stmt.collect_tokens(out),
            Self::Attach(stmt) => stmt.collect_tokens(out),
            Self::Begin(stmt) => stmt.collect_tokens(out),
            Self::Commit(stmt) => stmt.collect_tokens(out),
            Self::CreateIndex(stmt) => stmt.collect_tokens(out),
            Self::CreateTable(stmt) => stmt.collect_tokens(out),
            Self::CreateTrigger(stmt) => stmt.collect_tokens(out),
            Self::CreateView(stmt) => stmt.collect_tokens(out),
            Self::CreateVirtualTable(stmt) => stmt.collect_tokens(out),
            Self::Detach(stmt) => stmt.collect_tokens(out),
            Self::Rollback(stmt) => stmt.collect_tokens(out),
            Self::Vacuum(stmt) => stmt.collect_tokens(out),
            Self::Unsupported(stmt) => stmt.collect_tokens(out),
        }
    }
}

impl SyntaxNode for AlterTableAction {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::Rename(clause) => clause.collect_tokens(out),
            Self::AddColumn(clause) => clause.collect_tokens(out),
        }
    }
}

impl SyntaxNode for RenameTarget {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::Table(target) => target.collect_tokens(out),
            Self::Column(target) => target.collect_tokens(out),
        }
    }
}
