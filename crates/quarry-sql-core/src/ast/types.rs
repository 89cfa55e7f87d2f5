//! Shared sub-productions: qualified names, column definitions, type names
//! and column constraints.

use serde::Serialize;

use super::node::syntax_node;
use super::{Expr, SyntaxNode};
use crate::lexer::Token;

/// A `schema-name .` qualifier. The name and the period are always present
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaQualifier {
    /// The schema name.
    pub schema_name: Token,
    /// The `.` delimiter.
    pub period: Token,
}

/// `[+|-] numeric-literal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SignedNumber {
    pub sign: Option<Token>,
    pub numeric_literal: Option<Token>,
}

/// `name {name} [( signed-number [, signed-number] )]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeName {
    /// One or more names, e.g. `UNSIGNED BIG INT`.
    pub names: Vec<Token>,
    /// The parenthesized size arguments.
    pub arguments: Option<TypeArguments>,
}

/// `( signed-number [, signed-number] )` of a type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeArguments {
    pub left_paren: Token,
    pub first: SignedNumber,
    pub second: Option<SecondTypeArgument>,
    pub right_paren: Option<Token>,
}

/// `, signed-number`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondTypeArgument {
    pub comma: Token,
    pub number: SignedNumber,
}

/// `column-name [type-name] {column-constraint}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub column_name: Token,
    pub type_name: Option<TypeName>,
    pub constraints: Vec<ColumnConstraint>,
}

/// `CONSTRAINT name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintName {
    pub constraint: Token,
    pub name: Option<Token>,
}

/// `[CONSTRAINT name] constraint-body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnConstraint {
    pub name: Option<ConstraintName>,
    /// Absent if the constraint name was not followed by a constraint.
    pub body: Option<ConstraintBody>,
}

/// The constraint proper, after the optional `CONSTRAINT name` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConstraintBody {
    PrimaryKey(PrimaryKeyConstraint),
    NotNull(NotNullConstraint),
    Unique(UniqueConstraint),
    Check(CheckConstraint),
    Default(DefaultConstraint),
    Collate(Collation),
    Generated(GeneratedConstraint),
    ForeignKey(ForeignKeyClause),
}

/// `PRIMARY KEY [ASC|DESC] [conflict-clause] [AUTOINCREMENT]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyConstraint {
    pub primary: Token,
    pub key: Option<Token>,
    /// `ASC` or `DESC`.
    pub direction: Option<Token>,
    pub conflict_clause: Option<ConflictClause>,
    pub autoincrement: Option<Token>,
}

/// `NOT NULL [conflict-clause]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotNullConstraint {
    pub not: Token,
    pub null: Option<Token>,
    pub conflict_clause: Option<ConflictClause>,
}

/// `UNIQUE [conflict-clause]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueConstraint {
    pub unique: Token,
    pub conflict_clause: Option<ConflictClause>,
}

/// `CHECK ( expr )`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckConstraint {
    pub check: Token,
    pub left_paren: Option<Token>,
    pub expr: Option<Expr>,
    pub right_paren: Option<Token>,
}

/// `DEFAULT default-value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultConstraint {
    pub default: Token,
    pub value: Option<DefaultValue>,
}

/// The value of a `DEFAULT` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DefaultValue {
    /// `+1`, `-2.5`
    SignedNumber(SignedNumber),
    /// A literal, `NULL`, or one of the `CURRENT_*` keywords.
    Literal(Token),
    /// `( expr )`
    Parenthesized {
        left_paren: Token,
        expr: Option<Expr>,
        right_paren: Option<Token>,
    },
}

/// `COLLATE collation-name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collation {
    pub collate: Token,
    pub collation_name: Option<Token>,
}

/// `GENERATED ALWAYS AS ( expr ) [STORED|VIRTUAL]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedConstraint {
    pub generated: Token,
    pub always: Option<Token>,
    pub as_: Option<Token>,
    pub left_paren: Option<Token>,
    pub expr: Option<Expr>,
    pub right_paren: Option<Token>,
    /// `STORED` or `VIRTUAL`.
    pub storage: Option<Token>,
}

/// A foreign key clause. Not parsed yet: the tokens up to the end of the
/// statement are retained verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyClause {
    pub tokens: Vec<Token>,
}

/// `ON CONFLICT (ROLLBACK|ABORT|FAIL|IGNORE|REPLACE)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictClause {
    pub on: Token,
    pub conflict: Option<Token>,
    pub resolution: Option<Token>,
}

/// `(column-name | expr) [COLLATE collation-name] [ASC|DESC]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedColumn {
    pub target: IndexedColumnTarget,
    pub collation: Option<Collation>,
    /// `ASC` or `DESC`.
    pub direction: Option<Token>,
}

/// What an indexed column refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IndexedColumnTarget {
    ColumnName(Token),
    Expr(Expr),
}

impl IndexedColumn {
    /// Returns true if the column is an expression that was skipped.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(&self.target, IndexedColumnTarget::Expr(expr) if expr.is_unsupported())
    }
}

syntax_node!(SchemaQualifier { schema_name, period });
syntax_node!(SignedNumber { sign, numeric_literal });
syntax_node!(TypeName { names, arguments });
syntax_node!(TypeArguments { left_paren, first, second, right_paren });
syntax_node!(SecondTypeArgument { comma, number });
syntax_node!(ColumnDef { column_name, type_name, constraints });
syntax_node!(ConstraintName { constraint, name });
syntax_node!(ColumnConstraint { name, body });
syntax_node!(PrimaryKeyConstraint { primary, key, direction, conflict_clause, autoincrement });
syntax_node!(NotNullConstraint { not, null, conflict_clause });
syntax_node!(UniqueConstraint { unique, conflict_clause });
syntax_node!(CheckConstraint { check, left_paren, expr, right_paren });
syntax_node!(DefaultConstraint { default, value });
syntax_node!(Collation { collate, collation_name });
syntax_node!(GeneratedConstraint { generated, always, as_, left_paren, expr, right_paren, storage });
syntax_node!(ForeignKeyClause { tokens });
syntax_node!(ConflictClause { on, conflict, resolution });
syntax_node!(IndexedColumn { target, collation, direction });

impl SyntaxNode for ConstraintBody {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::PrimaryKey(c) => c.collect_tokens(out),
            Self::NotNull(c) => c.collect_tokens(out),
            Self::Unique(c) => c.collect_tokens(out),
            Self::Check(c) => c.collect_tokens(out),
            Self::Default(c) => c.collect_tokens(out),
            Self::Collate(c) => c.collect_tokens(out),
            Self::Generated(c) => c.collect_tokens(out),
            Self::ForeignKey(c) => c.collect_tokens(out),
        }
    }
}

impl SyntaxNode for DefaultValue {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::SignedNumber(number) => number.collect_tokens(out),
            Self::Literal(token) => out.push(token),
            Self::Parenthesized {
                left_paren,
                expr,
                right_paren,
            } => {
                out.push(left_paren);
                expr.collect_tokens(out);
                right_paren.collect_tokens(out);
            }
        }
    }
}

impl SyntaxNode for IndexedColumnTarget {
    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Self::ColumnName(token) => out.push(token),
            Self::Expr(expr) => expr.collect_tokens(out),
        }
    }
}
