//! Concrete syntax tree types for SQL statements.
//!
//! Every node keeps the tokens it was built from, so the source text of a
//! well-formed statement can be recovered from its tree.

mod expression;
mod node;
mod statement;
mod types;

pub use expression::Expr;
pub use node::{render_tokens, SyntaxNode};
pub use statement::{
    AddColumnClause, AlterTableAction, AlterTableStmt, AnalyzeStmt, AttachStmt, BeginStmt,
    CommitStmt, CreateIndexStmt, CreateTableStmt, CreateTriggerStmt, CreateViewStmt,
    CreateVirtualTableStmt, DetachStmt, ExplainPrefix, IfNotExists, IndexedColumnItem,
    RenameClause, RenameColumn, RenameTable, RenameTarget, RollbackStmt, SavepointTarget,
    SqlStmt, Statement, UnsupportedStmt, VacuumInto, VacuumStmt, WhereClause,
};
pub use types::{
    CheckConstraint, Collation, ColumnConstraint, ColumnDef, ConflictClause, ConstraintBody,
    ConstraintName, DefaultConstraint, DefaultValue, ForeignKeyClause, GeneratedConstraint,
    IndexedColumn, IndexedColumnTarget, NotNullConstraint, PrimaryKeyConstraint,
    SchemaQualifier, SecondTypeArgument, SignedNumber, TypeArguments, TypeName,
    UniqueConstraint,
};
