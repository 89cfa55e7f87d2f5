//! Token types produced by the scanner.

use serde::{Deserialize, Serialize};

use super::Span;

/// SQL keywords, one variant per reserved word of the SQLite grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    Abort,
    Action,
    Add,
    After,
    All,
    Alter,
    Always,
    Analyze,
    And,
    As,
    Asc,
    Attach,
    Autoincrement,
    Before,
    Begin,
    Between,
    By,
    Cascade,
    Case,
    Cast,
    Check,
    Collate,
    Column,
    Commit,
    Conflict,
    Constraint,
    Create,
    Cross,
    Current,
    CurrentDate,
    CurrentTime,
    CurrentTimestamp,
    Database,
    Default,
    Deferrable,
    Deferred,
    Delete,
    Desc,
    Detach,
    Distinct,
    Do,
    Drop,
    Each,
    Else,
    End,
    Escape,
    Except,
    Exclude,
    Exclusive,
    Exists,
    Explain,
    Fail,
    Filter,
    First,
    Following,
    For,
    Foreign,
    From,
    Full,
    Generated,
    Glob,
    Group,
    Groups,
    Having,
    If,
    Ignore,
    Immediate,
    In,
    Index,
    Indexed,
    Initially,
    Inner,
    Insert,
    Instead,
    Intersect,
    Into,
    Is,
    Isnull,
    Join,
    Key,
    Last,
    Left,
    Like,
    Limit,
    Match,
    Materialized,
    Natural,
    No,
    Not,
    Nothing,
    Notnull,
    Null,
    Nulls,
    Of,
    Offset,
    On,
    Or,
    Order,
    Others,
    Outer,
    Over,
    Partition,
    Plan,
    Pragma,
    Preceding,
    Primary,
    Query,
    Raise,
    Range,
    Recursive,
    References,
    Regexp,
    Reindex,
    Release,
    Rename,
    Replace,
    Restrict,
    Returning,
    Right,
    Rollback,
    Row,
    Rows,
    Savepoint,
    Select,
    Set,
    Table,
    Temp,
    Temporary,
    Then,
    Ties,
    To,
    Transaction,
    Trigger,
    Unbounded,
    Union,
    Unique,
    Update,
    Using,
    Vacuum,
    Values,
    View,
    Virtual,
    When,
    Where,
    Window,
    With,
    Without,
}

impl Keyword {
    /// Every keyword, in alphabetical order.
    pub const ALL: &'static [Self] = &[
        Self::Abort,
        Self::Action,
        Self::Add,
        Self::After,
        Self::All,
        Self::Alter,
        Self::Always,
        Self::Analyze,
        Self::And,
        Self::As,
        Self::Asc,
        Self::Attach,
        Self::Autoincrement,
        Self::Before,
        Self::Begin,
        Self::Between,
        Self::By,
        Self::Cascade,
        Self::Case,
        Self::Cast,
        Self::Check,
        Self::Collate,
        Self::Column,
        Self::Commit,
        Self::Conflict,
        Self::Constraint,
        Self::Create,
        Self::Cross,
        Self::Current,
        Self::CurrentDate,
        Self::CurrentTime,
        Self::CurrentTimestamp,
        Self::Database,
        Self::Default,
        Self::Deferrable,
        Self::Deferred,
        Self::Delete,
        Self::Desc,
        Self::Detach,
        Self::Distinct,
        Self::Do,
        Self::Drop,
        Self::Each,
        Self::Else,
        Self::End,
        Self::Escape,
        Self::Except,
        Self::Exclude,
        Self::Exclusive,
        Self::Exists,
        Self::Explain,
        Self::Fail,
        Self::Filter,
        Self::First,
        Self::Following,
        Self::For,
        Self::Foreign,
        Self::From,
        Self::Full,
        Self::Generated,
        Self::Glob,
        Self::Group,
        Self::Groups,
        Self::Having,
        Self::If,
        Self::Ignore,
        Self::Immediate,
        Self::In,
        Self::Index,
        Self::Indexed,
        Self::Initially,
        Self::Inner,
        Self::Insert,
        Self::Instead,
        Self::Intersect,
        Self::Into,
        Self::Is,
        Self::Isnull,
        Self::Join,
        Self::Key,
        Self::Last,
        Self::Left,
        Self::Like,
        Self::Limit,
        Self::Match,
        Self::Materialized,
        Self::Natural,
        Self::No,
        Self::Not,
        Self::Nothing,
        Self::Notnull,
        Self::Null,
        Self::Nulls,
        Self::Of,
        Self::Offset,
        Self::On,
        Self::Or,
        Self::Order,
        Self::Others,
        Self::Outer,
        Self::Over,
        Self::Partition,
        Self::Plan,
        Self::Pragma,
        Self::Preceding,
        Self::Primary,
        Self::Query,
        Self::Raise,
        Self::Range,
        Self::Recursive,
        Self::References,
        Self::Regexp,
        Self::Reindex,
        Self::Release,
        Self::Rename,
        Self::Replace,
        Self::Restrict,
        Self::Returning,
        Self::Right,
        Self::Rollback,
        Self::Row,
        Self::Rows,
        Self::Savepoint,
        Self::Select,
        Self::Set,
        Self::Table,
        Self::Temp,
        Self::Temporary,
        Self::Then,
        Self::Ties,
        Self::To,
        Self::Transaction,
        Self::Trigger,
        Self::Unbounded,
        Self::Union,
        Self::Unique,
        Self::Update,
        Self::Using,
        Self::Vacuum,
        Self::Values,
        Self::View,
        Self::Virtual,
        Self::When,
        Self::Where,
        Self::Window,
        Self::With,
        Self::Without,
    ];

    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait, clippy::too_many_lines)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "ABORT" => Some(Self::Abort),
            "ACTION" => Some(Self::Action),
            "ADD" => Some(Self::Add),
            "AFTER" => Some(Self::After),
            "ALL" => Some(Self::All),
            "ALTER" => Some(Self::Alter),
            "ALWAYS" => Some(Self::Always),
            "ANALYZE" => Some(Self::Analyze),
            "AND" => Some(Self::And),
            "AS" => Some(Self::As),
            "ASC" => Some(Self::Asc),
            "ATTACH" => Some(Self::Attach),
            "AUTOINCREMENT" => Some(Self::Autoincrement),
            "BEFORE" => Some(Self::Before),
            "BEGIN" => Some(Self::Begin),
            "BETWEEN" => Some(Self::Between),
            "BY" => Some(Self::By),
            "CASCADE" => Some(Self::Cascade),
            "CASE" => Some(Self::Case),
            "CAST" => Some(Self::Cast),
            "CHECK" => Some(Self::Check),
            "COLLATE" => Some(Self::Collate),
            "COLUMN" => Some(Self::Column),
            "COMMIT" => Some(Self::Commit),
            "CONFLICT" => Some(Self::Conflict),
            "CONSTRAINT" => Some(Self::Constraint),
            "CREATE" => Some(Self::Create),
            "CROSS" => Some(Self::Cross),
            "CURRENT" => Some(Self::Current),
            "CURRENT_DATE" => Some(Self::CurrentDate),
            "CURRENT_TIME" => Some(Self::CurrentTime),
            "CURRENT_TIMESTAMP" => Some(Self::CurrentTimestamp),
            "DATABASE" => Some(Self::Database),
            "DEFAULT" => Some(Self::Default),
            "DEFERRABLE" => Some(Self::Deferrable),
            "DEFERRED" => Some(Self::Deferred),
            "DELETE" => Some(Self::Delete),
            "DESC" => Some(Self::Desc),
            "DETACH" => Some(Self::Detach),
            "DISTINCT" => Some(Self::Distinct),
            "DO" => Some(Self::Do),
            "DROP" => Some(Self::Drop),
            "EACH" => Some(Self::Each),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "ESCAPE" => Some(Self::Escape),
            "EXCEPT" => Some(Self::Except),
            "EXCLUDE" => Some(Self::Exclude),
            "EXCLUSIVE" => Some(Self::Exclusive),
            "EXISTS" => Some(Self::Exists),
            "EXPLAIN" => Some(Self::Explain),
            "FAIL" => Some(Self::Fail),
            "FILTER" => Some(Self::Filter),
            "FIRST" => Some(Self::First),
            "FOLLOWING" => Some(Self::Following),
            "FOR" => Some(Self::For),
            "FOREIGN" => Some(Self::Foreign),
            "FROM" => Some(Self::From),
            "FULL" => Some(Self::Full),
            "GENERATED" => Some(Self::Generated),
            "GLOB" => Some(Self::Glob),
            "GROUP" => Some(Self::Group),
            "GROUPS" => Some(Self::Groups),
            "HAVING" => Some(Self::Having),
            "IF" => Some(Self::If),
            "IGNORE" => Some(Self::Ignore),
            "IMMEDIATE" => Some(Self::Immediate),
            "IN" => Some(Self::In),
            "INDEX" => Some(Self::Index),
            "INDEXED" => Some(Self::Indexed),
            "INITIALLY" => Some(Self::Initially),
            "INNER" => Some(Self::Inner),
            "INSERT" => Some(Self::Insert),
            "INSTEAD" => Some(Self::Instead),
            "INTERSECT" => Some(Self::Intersect),
            "INTO" => Some(Self::Into),
            "IS" => Some(Self::Is),
            "ISNULL" => Some(Self::Isnull),
            "JOIN" => Some(Self::Join),
            "KEY" => Some(Self::Key),
            "LAST" => Some(Self::Last),
            "LEFT" => Some(Self::Left),
            "LIKE" => Some(Self::Like),
            "LIMIT" => Some(Self::Limit),
            "MATCH" => Some(Self::Match),
            "MATERIALIZED" => Some(Self::Materialized),
            "NATURAL" => Some(Self::Natural),
            "NO" => Some(Self::No),
            "NOT" => Some(Self::Not),
            "NOTHING" => Some(Self::Nothing),
            "NOTNULL" => Some(Self::Notnull),
            "NULL" => Some(Self::Null),
            "NULLS" => Some(Self::Nulls),
            "OF" => Some(Self::Of),
            "OFFSET" => Some(Self::Offset),
            "ON" => Some(Self::On),
            "OR" => Some(Self::Or),
            "ORDER" => Some(Self::Order),
            "OTHERS" => Some(Self::Others),
            "OUTER" => Some(Self::Outer),
            "OVER" => Some(Self::Over),
            "PARTITION" => Some(Self::Partition),
            "PLAN" => Some(Self::Plan),
            "PRAGMA" => Some(Self::Pragma),
            "PRECEDING" => Some(Self::Preceding),
            "PRIMARY" => Some(Self::Primary),
            "QUERY" => Some(Self::Query),
            "RAISE" => Some(Self::Raise),
            "RANGE" => Some(Self::Range),
            "RECURSIVE" => Some(Self::Recursive),
            "REFERENCES" => Some(Self::References),
            "REGEXP" => Some(Self::Regexp),
            "REINDEX" => Some(Self::Reindex),
            "RELEASE" => Some(Self::Release),
            "RENAME" => Some(Self::Rename),
            "REPLACE" => Some(Self::Replace),
            "RESTRICT" => Some(Self::Restrict),
            "RETURNING" => Some(Self::Returning),
            "RIGHT" => Some(Self::Right),
            "ROLLBACK" => Some(Self::Rollback),
            "ROW" => Some(Self::Row),
            "ROWS" => Some(Self::Rows),
            "SAVEPOINT" => Some(Self::Savepoint),
            "SELECT" => Some(Self::Select),
            "SET" => Some(Self::Set),
            "TABLE" => Some(Self::Table),
            "TEMP" => Some(Self::Temp),
            "TEMPORARY" => Some(Self::Temporary),
            "THEN" => Some(Self::Then),
            "TIES" => Some(Self::Ties),
            "TO" => Some(Self::To),
            "TRANSACTION" => Some(Self::Transaction),
            "TRIGGER" => Some(Self::Trigger),
            "UNBOUNDED" => Some(Self::Unbounded),
            "UNION" => Some(Self::Union),
            "UNIQUE" => Some(Self::Unique),
            "UPDATE" => Some(Self::Update),
            "USING" => Some(Self::Using),
            "VACUUM" => Some(Self::Vacuum),
            "VALUES" => Some(Self::Values),
            "VIEW" => Some(Self::View),
            "VIRTUAL" => Some(Self::Virtual),
            "WHEN" => Some(Self::When),
            "WHERE" => Some(Self::Where),
            "WINDOW" => Some(Self::Window),
            "WITH" => Some(Self::With),
            "WITHOUT" => Some(Self::Without),
            _ => None,
        }
    }

    /// Returns the keyword as it is spelled in SQL.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "ABORT",
            Self::Action => "ACTION",
            Self::Add => "ADD",
            Self::After => "AFTER",
            Self::All => "ALL",
            Self::Alter => "ALTER",
            Self::Always => "ALWAYS",
            Self::Analyze => "ANALYZE",
            Self::And => "AND",
            Self::As => "AS",
            Self::Asc => "ASC",
            Self::Attach => "ATTACH",
            Self::Autoincrement => "AUTOINCREMENT",
            Self::Before => "BEFORE",
            Self::Begin => "BEGIN",
            Self::Between => "BETWEEN",
            Self::By => "BY",
            Self::Cascade => "CASCADE",
            Self::Case => "CASE",
            Self::Cast => "CAST",
            Self::Check => "CHECK",
            Self::Collate => "COLLATE",
            Self::Column => "COLUMN",
            Self::Commit => "COMMIT",
            Self::Conflict => "CONFLICT",
            Self::Constraint => "CONSTRAINT",
            Self::Create => "CREATE",
            Self::Cross => "CROSS",
            Self::Current => "CURRENT",
            Self::CurrentDate => "CURRENT_DATE",
            Self::CurrentTime => "CURRENT_TIME",
            Self::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Self::Database => "DATABASE",
            Self::Default => "DEFAULT",
            Self::Deferrable => "DEFERRABLE",
            Self::Deferred => "DEFERRED",
            Self::Delete => "DELETE",
            Self::Desc => "DESC",
            Self::Detach => "DETACH",
            Self::Distinct => "DISTINCT",
            Self::Do => "DO",
            Self::Drop => "DROP",
            Self::Each => "EACH",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Escape => "ESCAPE",
            Self::Except => "EXCEPT",
            Self::Exclude => "EXCLUDE",
            Self::Exclusive => "EXCLUSIVE",
            Self::Exists => "EXISTS",
            Self::Explain => "EXPLAIN",
            Self::Fail => "FAIL",
            Self::Filter => "FILTER",
            Self::First => "FIRST",
            Self::Following => "FOLLOWING",
            Self::For => "FOR",
            Self::Foreign => "FOREIGN",
            Self::From => "FROM",
            Self::Full => "FULL",
            Self::Generated => "GENERATED",
            Self::Glob => "GLOB",
            Self::Group => "GROUP",
            Self::Groups => "GROUPS",
            Self::Having => "HAVING",
            Self::If => "IF",
            Self::Ignore => "IGNORE",
            Self::Immediate => "IMMEDIATE",
            Self::In => "IN",
            Self::Index => "INDEX",
            Self::Indexed => "INDEXED",
            Self::Initially => "INITIALLY",
            Self::Inner => "INNER",
            Self::Insert => "INSERT",
            Self::Instead => "INSTEAD",
            Self::Intersect => "INTERSECT",
            Self::Into => "INTO",
            Self::Is => "IS",
            Self::Isnull => "ISNULL",
            Self::Join => "JOIN",
            Self::Key => "KEY",
            Self::Last => "LAST",
            Self::Left => "LEFT",
            Self::Like => "LIKE",
            Self::Limit => "LIMIT",
            Self::Match => "MATCH",
            Self::Materialized => "MATERIALIZED",
            Self::Natural => "NATURAL",
            Self::No => "NO",
            Self::Not => "NOT",
            Self::Nothing => "NOTHING",
            Self::Notnull => "NOTNULL",
            Self::Null => "NULL",
            Self::Nulls => "NULLS",
            Self::Of => "OF",
            Self::Offset => "OFFSET",
            Self::On => "ON",
            Self::Or => "OR",
            Self::Order => "ORDER",
            Self::Others => "OTHERS",
            Self::Outer => "OUTER",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Plan => "PLAN",
            Self::Pragma => "PRAGMA",
            Self::Preceding => "PRECEDING",
            Self::Primary => "PRIMARY",
            Self::Query => "QUERY",
            Self::Raise => "RAISE",
            Self::Range => "RANGE",
            Self::Recursive => "RECURSIVE",
            Self::References => "REFERENCES",
            Self::Regexp => "REGEXP",
            Self::Reindex => "REINDEX",
            Self::Release => "RELEASE",
            Self::Rename => "RENAME",
            Self::Replace => "REPLACE",
            Self::Restrict => "RESTRICT",
            Self::Returning => "RETURNING",
            Self::Right => "RIGHT",
            Self::Rollback => "ROLLBACK",
            Self::Row => "ROW",
            Self::Rows => "ROWS",
            Self::Savepoint => "SAVEPOINT",
            Self::Select => "SELECT",
            Self::Set => "SET",
            Self::Table => "TABLE",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::Then => "THEN",
            Self::Ties => "TIES",
            Self::To => "TO",
            Self::Transaction => "TRANSACTION",
            Self::Trigger => "TRIGGER",
            Self::Unbounded => "UNBOUNDED",
            Self::Union => "UNION",
            Self::Unique => "UNIQUE",
            Self::Update => "UPDATE",
            Self::Using => "USING",
            Self::Vacuum => "VACUUM",
            Self::Values => "VALUES",
            Self::View => "VIEW",
            Self::Virtual => "VIRTUAL",
            Self::When => "WHEN",
            Self::Where => "WHERE",
            Self::Window => "WINDOW",
            Self::With => "WITH",
            Self::Without => "WITHOUT",
        }
    }
}

/// The classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Input the ruleset could not classify.
    Error,
    /// End of input. Exactly one is produced per scanner.
    Eof,
    /// `;`
    StatementSeparator,
    /// Identifiers, quoted identifiers, strings, blobs, numbers and parameters.
    Literal,
    /// `-`, `+` or `~`
    UnaryOperator,
    /// `||`, `*`, `/`, `%`, `<<`, `>>`, `&`, `|`, comparisons and equality.
    BinaryOperator,
    /// `(`, `)`, `,` or `.`
    Delimiter,
    /// SQL keyword
    Keyword(Keyword),
}

impl TokenKind {
    /// Returns true if this kind is the given keyword.
    #[must_use]
    pub fn is_keyword(self, keyword: Keyword) -> bool {
        self == Self::Keyword(keyword)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Eof => f.write_str("end of input"),
            Self::StatementSeparator => f.write_str("statement separator"),
            Self::Literal => f.write_str("literal"),
            Self::UnaryOperator => f.write_str("unary operator"),
            Self::BinaryOperator => f.write_str("binary operator"),
            Self::Delimiter => f.write_str("delimiter"),
            Self::Keyword(keyword) => write!(f, "keyword {}", keyword.as_str()),
        }
    }
}

/// A classified slice of the input together with its position.
///
/// Tokens are immutable once produced. `value` is exactly the source text
/// between `offset` and `offset + length`, where both are counted in
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    value: String,
    line: usize,
    column: usize,
    offset: usize,
    length: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        line: usize,
        column: usize,
        offset: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
            column,
            offset,
            length,
        }
    }

    /// The classification of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal source text of this token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// 1-based line of the first character.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the first character.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Absolute character index of the first character.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of characters covered by this token.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// The character range covered by this token.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.length)
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if this is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind.is_keyword(keyword)
    }

    /// Returns true if this is a delimiter spelled `delimiter`.
    #[must_use]
    pub fn is_delimiter(&self, delimiter: char) -> bool {
        self.kind == TokenKind::Delimiter && self.value.chars().eq(std::iter::once(delimiter))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({:?}) at {}:{}",
            self.kind, self.value, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(
            Keyword::from_str("current_timestamp"),
            Some(Keyword::CurrentTimestamp)
        );
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(*keyword));
        }
    }

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenKind::Keyword(Keyword::Select), "SELECT", 1, 1, 0, 6);
        assert_eq!(token.kind(), TokenKind::Keyword(Keyword::Select));
        assert_eq!(token.value(), "SELECT");
        assert_eq!(token.line(), 1);
        assert_eq!(token.column(), 1);
        assert_eq!(token.offset(), 0);
        assert_eq!(token.length(), 6);
        assert_eq!(token.span(), Span::new(0, 6));
        assert_eq!(token.as_keyword(), Some(Keyword::Select));
        assert!(!token.is_eof());
    }

    #[test]
    fn test_token_is_delimiter() {
        let paren = Token::new(TokenKind::Delimiter, "(", 1, 1, 0, 1);
        let literal = Token::new(TokenKind::Literal, "(", 1, 1, 0, 1);
        assert!(paren.is_delimiter('('));
        assert!(!paren.is_delimiter(')'));
        assert!(!literal.is_delimiter('('));
    }
}
