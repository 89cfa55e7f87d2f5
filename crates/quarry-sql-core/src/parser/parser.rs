//! Error-tolerant recursive descent parser.

use tracing::{debug, trace};

use super::{CollectingReporter, Diagnostic, Reporter};
use crate::ast::{
    AddColumnClause, AlterTableAction, AlterTableStmt, AnalyzeStmt, AttachStmt, BeginStmt,
    CommitStmt, CreateIndexStmt, CreateTableStmt, CreateTriggerStmt, CreateViewStmt,
    CreateVirtualTableStmt, DetachStmt, ExplainPrefix, Expr, IfNotExists, IndexedColumnItem,
    RenameClause, RenameColumn, RenameTable, RenameTarget, RollbackStmt, SavepointTarget,
    SchemaQualifier, SqlStmt, Statement, UnsupportedStmt, VacuumInto, VacuumStmt, WhereClause,
};
use crate::lexer::{Keyword, RuleSet, Scanner, Token, TokenKind};

/// Tokens at which a statement ends.
const STATEMENT_END: &[TokenKind] = &[TokenKind::StatementSeparator, TokenKind::Eof];

/// Tokens at which parsing resynchronizes before a statement.
const STATEMENT_START: &[TokenKind] = &[
    TokenKind::StatementSeparator,
    TokenKind::Eof,
    TokenKind::Keyword(Keyword::Alter),
    TokenKind::Keyword(Keyword::Analyze),
    TokenKind::Keyword(Keyword::Attach),
    TokenKind::Keyword(Keyword::Begin),
    TokenKind::Keyword(Keyword::Commit),
    TokenKind::Keyword(Keyword::Create),
    TokenKind::Keyword(Keyword::Delete),
    TokenKind::Keyword(Keyword::Detach),
    TokenKind::Keyword(Keyword::Drop),
    TokenKind::Keyword(Keyword::End),
    TokenKind::Keyword(Keyword::Insert),
    TokenKind::Keyword(Keyword::Pragma),
    TokenKind::Keyword(Keyword::Reindex),
    TokenKind::Keyword(Keyword::Release),
    TokenKind::Keyword(Keyword::Rollback),
    TokenKind::Keyword(Keyword::Savepoint),
    TokenKind::Keyword(Keyword::Select),
    TokenKind::Keyword(Keyword::Update),
    TokenKind::Keyword(Keyword::Vacuum),
];

/// Objects that may follow `CREATE`.
const CREATE_OBJECT: &[TokenKind] = &[
    TokenKind::Keyword(Keyword::Index),
    TokenKind::Keyword(Keyword::Unique),
    TokenKind::Keyword(Keyword::Table),
    TokenKind::Keyword(Keyword::Trigger),
    TokenKind::Keyword(Keyword::View),
    TokenKind::Keyword(Keyword::Temp),
    TokenKind::Keyword(Keyword::Temporary),
    TokenKind::Keyword(Keyword::Virtual),
];

/// Objects that may follow `CREATE TEMP`.
const CREATE_TEMP_OBJECT: &[TokenKind] = &[
    TokenKind::Keyword(Keyword::Table),
    TokenKind::Keyword(Keyword::Trigger),
    TokenKind::Keyword(Keyword::View),
];

/// SQL parser.
///
/// Parses one statement per call to [`Parser::parse_statement`]. Grammar
/// violations never abort the parse: they are passed to the [`Reporter`] and
/// the parser recovers, either by assuming a missing token was present or by
/// skipping to a token it can continue from. The tree returned alongside is
/// partial where recovery dropped input.
pub struct Parser<R> {
    scanner: Scanner,
    reporter: R,
    /// Set once the end-of-input token has been consumed.
    exhausted: bool,
}

impl<R: Reporter> Parser<R> {
    /// Creates a parser reading from `scanner`.
    #[must_use]
    pub const fn new(scanner: Scanner, reporter: R) -> Self {
        Self {
            scanner,
            reporter,
            exhausted: false,
        }
    }

    /// Creates a parser over `input` using the default rule set.
    #[must_use]
    pub fn from_sql(input: &str, reporter: R) -> Self {
        Self::new(Scanner::new(input, RuleSet::default()), reporter)
    }

    /// Returns true once the whole input, end-of-input token included, has
    /// been consumed. Further calls to `parse_statement` return empty
    /// statements without reporting.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The reporter receiving diagnostics.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Mutable access to the reporter, e.g. to drain it between statements.
    pub const fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Consumes the parser, returning its reporter.
    #[must_use]
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Parses the next statement, including an optional `EXPLAIN` prefix and
    /// the terminating `;`.
    pub fn parse_statement(&mut self) -> SqlStmt {
        let mut stmt = SqlStmt {
            explain: self.parse_explain_prefix(),
            ..SqlStmt::default()
        };

        self.search_next(STATEMENT_START);
        let Some(next) = self.unsafe_low_level_lookahead() else {
            return stmt;
        };
        debug!(token = %next, "parsing statement");

        stmt.statement = match next.kind() {
            TokenKind::Keyword(Keyword::Alter) => {
                self.consume_token();
                Some(Statement::AlterTable(self.parse_alter_table_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Analyze) => {
                self.consume_token();
                Some(Statement::Analyze(self.parse_analyze_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Attach) => {
                self.consume_token();
                Some(Statement::Attach(self.parse_attach_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Begin) => {
                self.consume_token();
                Some(Statement::Begin(self.parse_begin_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Commit | Keyword::End) => {
                self.consume_token();
                Some(Statement::Commit(self.parse_commit_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Create) => {
                self.consume_token();
                Some(self.parse_create_stmt(next))
            }
            TokenKind::Keyword(Keyword::Detach) => {
                self.consume_token();
                Some(Statement::Detach(self.parse_detach_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Rollback) => {
                self.consume_token();
                Some(Statement::Rollback(self.parse_rollback_stmt(next)))
            }
            TokenKind::Keyword(Keyword::Vacuum) => {
                self.consume_token();
                Some(Statement::Vacuum(self.parse_vacuum_stmt(next)))
            }
            TokenKind::StatementSeparator => {
                // An empty statement
                self.incomplete_statement();
                self.consume_token();
                stmt.separator = Some(next);
                self.consume_trailing_eof();
                return stmt;
            }
            TokenKind::Eof => {
                self.incomplete_statement();
                None
            }
            _ => {
                // PRAGMA and every other statement kind
                self.unsupported_construct(&next);
                Some(Statement::Unsupported(UnsupportedStmt {
                    tokens: self.skip_until(STATEMENT_END),
                }))
            }
        };

        self.parse_statement_end(&mut stmt);
        stmt
    }

    /// `EXPLAIN [QUERY PLAN]`
    fn parse_explain_prefix(&mut self) -> Option<ExplainPrefix> {
        let explain = self
            .optional_lookahead()
            .filter(|t| t.is_keyword(Keyword::Explain))?;
        self.consume_token();

        let mut prefix = ExplainPrefix {
            explain,
            query: None,
            plan: None,
        };
        if let Some(query) = self
            .optional_lookahead()
            .filter(|t| t.is_keyword(Keyword::Query))
        {
            self.consume_token();
            prefix.query = Some(query);
            match self
                .optional_lookahead()
                .filter(|t| t.is_keyword(Keyword::Plan))
            {
                Some(plan) => {
                    self.consume_token();
                    prefix.plan = Some(plan);
                }
                None => self.unexpected_token(&[TokenKind::Keyword(Keyword::Plan)]),
            }
        }
        Some(prefix)
    }

    /// Skips whatever is left of the statement and consumes its `;`, and
    /// the end of input if nothing follows.
    fn parse_statement_end(&mut self, stmt: &mut SqlStmt) {
        self.search_next(STATEMENT_END);
        if let Some(separator) = self
            .unsafe_low_level_lookahead()
            .filter(|t| t.kind() == TokenKind::StatementSeparator)
        {
            self.consume_token();
            stmt.separator = Some(separator);
        }
        self.consume_trailing_eof();
    }

    fn consume_trailing_eof(&mut self) {
        if self
            .unsafe_low_level_lookahead()
            .is_some_and(|t| t.is_eof())
        {
            self.consume_token();
        }
    }

    // ==================== Statements ====================

    /// `ALTER TABLE [schema.]table-name (RENAME ... | ADD ...)`
    fn parse_alter_table_stmt(&mut self, alter: Token) -> AlterTableStmt {
        let mut stmt = AlterTableStmt {
            alter,
            table: None,
            schema: None,
            table_name: None,
            action: None,
        };

        let Some(next) = self.lookahead() else {
            return stmt;
        };
        stmt.table = self.accept_keyword(&next, Keyword::Table);

        let Some(name) = self.lookahead() else {
            return stmt;
        };
        if name.kind() != TokenKind::Literal {
            self.unexpected_token(&[TokenKind::Literal]);
            return stmt;
        }
        self.consume_token();

        let Some(next) = self.lookahead() else {
            stmt.table_name = Some(name);
            return stmt;
        };
        if next.is_delimiter('.') {
            self.consume_token();
            stmt.schema = Some(SchemaQualifier {
                schema_name: name,
                period: next,
            });
            let Some(table_name) = self.lookahead() else {
                return stmt;
            };
            if table_name.kind() != TokenKind::Literal {
                self.unexpected_token(&[TokenKind::Literal]);
                return stmt;
            }
            self.consume_token();
            stmt.table_name = Some(table_name);
        } else {
            stmt.table_name = Some(name);
        }

        let Some(next) = self.lookahead() else {
            return stmt;
        };
        match next.kind() {
            TokenKind::Keyword(Keyword::Rename) => {
                self.consume_token();
                stmt.action = Some(AlterTableAction::Rename(self.parse_rename_clause(next)));
            }
            TokenKind::Keyword(Keyword::Add) => {
                self.consume_token();
                stmt.action = Some(AlterTableAction::AddColumn(
                    self.parse_add_column_clause(next),
                ));
            }
            _ => self.unexpected_token(&[
                TokenKind::Keyword(Keyword::Rename),
                TokenKind::Keyword(Keyword::Add),
            ]),
        }
        stmt
    }

    /// `RENAME (TO new-table-name | [COLUMN] column-name TO new-column-name)`
    fn parse_rename_clause(&mut self, rename: Token) -> RenameClause {
        let mut clause = RenameClause {
            rename,
            target: None,
        };
        let Some(next) = self.lookahead() else {
            return clause;
        };
        match next.kind() {
            TokenKind::Keyword(Keyword::To) => {
                self.consume_token();
                clause.target = Some(RenameTarget::Table(RenameTable {
                    to: next,
                    new_table_name: self.literal_or_discard(),
                }));
            }
            TokenKind::Keyword(Keyword::Column) => {
                self.consume_token();
                clause.target = Some(RenameTarget::Column(self.parse_rename_column(Some(next))));
            }
            TokenKind::Literal => {
                clause.target = Some(RenameTarget::Column(self.parse_rename_column(None)));
            }
            _ => self.unexpected_token(&[
                TokenKind::Keyword(Keyword::To),
                TokenKind::Keyword(Keyword::Column),
                TokenKind::Literal,
            ]),
        }
        clause
    }

    /// `column-name TO new-column-name`, after an optional `COLUMN`.
    fn parse_rename_column(&mut self, column: Option<Token>) -> RenameColumn {
        let mut target = RenameColumn {
            column,
            column_name: None,
            to: None,
            new_column_name: None,
        };
        target.column_name = self.literal_or_discard();
        if target.column_name.is_none() {
            return target;
        }

        let Some(next) = self.lookahead() else {
            return target;
        };
        if !next.is_keyword(Keyword::To) {
            self.unexpected_token(&[TokenKind::Keyword(Keyword::To)]);
            self.consume_token();
            return target;
        }
        self.consume_token();
        target.to = Some(next);
        target.new_column_name = self.literal_or_discard();
        target
    }

    /// `ADD [COLUMN] column-def`
    fn parse_add_column_clause(&mut self, add: Token) -> AddColumnClause {
        let mut clause = AddColumnClause {
            add,
            column: None,
            column_def: None,
        };
        let Some(next) = self.lookahead() else {
            return clause;
        };
        match next.kind() {
            TokenKind::Keyword(Keyword::Column) => {
                self.consume_token();
                clause.column = Some(next);
                clause.column_def = self.parse_column_def();
            }
            TokenKind::Literal => clause.column_def = self.parse_column_def(),
            _ => self.unexpected_token(&[TokenKind::Keyword(Keyword::Column), TokenKind::Literal]),
        }
        clause
    }

    /// `ANALYZE [schema-name | [schema-name.]table-or-index-name]`
    fn parse_analyze_stmt(&mut self, analyze: Token) -> AnalyzeStmt {
        let mut stmt = AnalyzeStmt {
            analyze,
            schema: None,
            table_or_index_name: None,
        };
        let Some(name) = self.optional_lookahead() else {
            return stmt;
        };
        if name.kind() == TokenKind::StatementSeparator {
            return stmt;
        }
        if name.kind() != TokenKind::Literal {
            self.unexpected_token(&[TokenKind::Literal]);
            return stmt;
        }
        self.consume_token();

        match self.optional_lookahead().filter(|t| t.is_delimiter('.')) {
            Some(period) => {
                self.consume_token();
                stmt.schema = Some(SchemaQualifier {
                    schema_name: name,
                    period,
                });
                stmt.table_or_index_name = self.expect_literal();
            }
            None => stmt.table_or_index_name = Some(name),
        }
        stmt
    }

    /// `ATTACH [DATABASE] expr AS schema-name`
    fn parse_attach_stmt(&mut self, attach: Token) -> AttachStmt {
        let mut stmt = AttachStmt {
            attach,
            database: None,
            expr: None,
            as_: None,
            schema_name: None,
        };
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        if next.is_keyword(Keyword::Database) {
            self.consume_token();
            stmt.database = Some(next);
        }

        stmt.expr = self.parse_expression();
        if stmt.expr.as_ref().is_none_or(Expr::is_unsupported) {
            return stmt;
        }

        let Some(next) = self.lookahead() else {
            return stmt;
        };
        if !next.is_keyword(Keyword::As) {
            self.unexpected_token(&[TokenKind::Keyword(Keyword::As)]);
            return stmt;
        }
        self.consume_token();
        stmt.as_ = Some(next);
        stmt.schema_name = self.expect_literal();
        stmt
    }

    /// `BEGIN [DEFERRED|IMMEDIATE|EXCLUSIVE] [TRANSACTION]`
    fn parse_begin_stmt(&mut self, begin: Token) -> BeginStmt {
        let mut stmt = BeginStmt {
            begin,
            mode: None,
            transaction: None,
        };
        stmt.mode = self.optional_lookahead().filter(|t| {
            matches!(
                t.kind(),
                TokenKind::Keyword(Keyword::Deferred | Keyword::Immediate | Keyword::Exclusive)
            )
        });
        if stmt.mode.is_some() {
            self.consume_token();
        }
        stmt.transaction = self.optional_keyword(Keyword::Transaction);
        stmt
    }

    /// `(COMMIT|END) [TRANSACTION]`
    fn parse_commit_stmt(&mut self, commit: Token) -> CommitStmt {
        CommitStmt {
            commit,
            transaction: self.optional_keyword(Keyword::Transaction),
        }
    }

    /// `DETACH [DATABASE] schema-name`
    fn parse_detach_stmt(&mut self, detach: Token) -> DetachStmt {
        let mut stmt = DetachStmt {
            detach,
            database: None,
            schema_name: None,
        };
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        if next.is_keyword(Keyword::Database) {
            self.consume_token();
            stmt.database = Some(next);
        }
        stmt.schema_name = self.expect_literal();
        stmt
    }

    /// `ROLLBACK [TRANSACTION] [TO [SAVEPOINT] savepoint-name]`
    fn parse_rollback_stmt(&mut self, rollback: Token) -> RollbackStmt {
        let mut stmt = RollbackStmt {
            rollback,
            transaction: self.optional_keyword(Keyword::Transaction),
            to_savepoint: None,
        };
        let Some(to) = self.optional_keyword(Keyword::To) else {
            return stmt;
        };

        let mut target = SavepointTarget {
            to,
            savepoint: None,
            savepoint_name: None,
        };
        if let Some(next) = self.lookahead() {
            if next.is_keyword(Keyword::Savepoint) {
                self.consume_token();
                target.savepoint = Some(next);
            }
            target.savepoint_name = self.expect_literal();
        }
        stmt.to_savepoint = Some(target);
        stmt
    }

    /// `VACUUM [schema-name] [INTO filename]`
    fn parse_vacuum_stmt(&mut self, vacuum: Token) -> VacuumStmt {
        let mut stmt = VacuumStmt {
            vacuum,
            schema_name: None,
            into: None,
        };
        stmt.schema_name = self
            .optional_lookahead()
            .filter(|t| t.kind() == TokenKind::Literal);
        if stmt.schema_name.is_some() {
            self.consume_token();
        }
        if let Some(into) = self.optional_keyword(Keyword::Into) {
            stmt.into = Some(VacuumInto {
                into,
                filename: self.expect_literal(),
            });
        }
        stmt
    }

    /// Dispatches on what follows `CREATE`. A `CREATE` that names no known
    /// object keeps its leading tokens as an unsupported statement.
    fn parse_create_stmt(&mut self, create: Token) -> Statement {
        let Some(next) = self.lookahead() else {
            return Statement::Unsupported(UnsupportedStmt {
                tokens: vec![create],
            });
        };
        match next.kind() {
            TokenKind::Keyword(Keyword::Index | Keyword::Unique) => {
                Statement::CreateIndex(self.parse_create_index_stmt(create))
            }
            TokenKind::Keyword(Keyword::Table | Keyword::Trigger | Keyword::View) => {
                self.parse_create_stub(create, None, next.kind())
            }
            TokenKind::Keyword(Keyword::Temp | Keyword::Temporary) => {
                self.consume_token();
                match self.lookahead().as_ref().map(Token::kind) {
                    Some(
                        object @ TokenKind::Keyword(
                            Keyword::Table | Keyword::Trigger | Keyword::View,
                        ),
                    ) => self.parse_create_stub(create, Some(next), object),
                    found => {
                        if found.is_some() {
                            self.unexpected_token(CREATE_TEMP_OBJECT);
                        }
                        Statement::Unsupported(UnsupportedStmt {
                            tokens: vec![create, next],
                        })
                    }
                }
            }
            TokenKind::Keyword(Keyword::Virtual) => {
                Statement::CreateVirtualTable(CreateVirtualTableStmt {
                    create,
                    body: self.skip_unsupported(),
                })
            }
            _ => {
                self.unexpected_token(CREATE_OBJECT);
                Statement::Unsupported(UnsupportedStmt {
                    tokens: vec![create],
                })
            }
        }
    }

    /// `CREATE [TEMP] TABLE|TRIGGER|VIEW ...`, of which only the leading
    /// keywords are understood.
    fn parse_create_stub(
        &mut self,
        create: Token,
        temporary: Option<Token>,
        object: TokenKind,
    ) -> Statement {
        let body = self.skip_unsupported();
        match object {
            TokenKind::Keyword(Keyword::Trigger) => Statement::CreateTrigger(CreateTriggerStmt {
                create,
                temporary,
                body,
            }),
            TokenKind::Keyword(Keyword::View) => Statement::CreateView(CreateViewStmt {
                create,
                temporary,
                body,
            }),
            _ => Statement::CreateTable(CreateTableStmt {
                create,
                temporary,
                body,
            }),
        }
    }

    /// `CREATE [UNIQUE] INDEX [IF NOT EXISTS] [schema.]index-name ON
    /// table-name ( indexed-column {, indexed-column} ) [WHERE expr]`
    fn parse_create_index_stmt(&mut self, create: Token) -> CreateIndexStmt {
        let mut stmt = CreateIndexStmt {
            create,
            unique: None,
            index: None,
            if_not_exists: None,
            schema: None,
            index_name: None,
            on: None,
            table_name: None,
            left_paren: None,
            indexed_columns: Vec::new(),
            right_paren: None,
            where_clause: None,
        };

        stmt.unique = self.optional_keyword(Keyword::Unique);
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        stmt.index = self.accept_keyword(&next, Keyword::Index);

        // IF NOT EXISTS
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        if next.is_keyword(Keyword::If) {
            self.consume_token();
            let mut if_not_exists = IfNotExists {
                if_: next,
                not: None,
                exists: None,
            };
            if let Some(next) = self.lookahead() {
                if_not_exists.not = self.accept_keyword(&next, Keyword::Not);
                if let Some(next) = self.lookahead() {
                    if_not_exists.exists = self.accept_keyword(&next, Keyword::Exists);
                }
            }
            stmt.if_not_exists = Some(if_not_exists);
        }

        // [schema.]index-name
        let Some(name) = self.lookahead() else {
            return stmt;
        };
        if name.kind() == TokenKind::Literal {
            self.consume_token();
            match self.optional_lookahead().filter(|t| t.is_delimiter('.')) {
                Some(period) => {
                    self.consume_token();
                    stmt.schema = Some(SchemaQualifier {
                        schema_name: name,
                        period,
                    });
                    let Some(next) = self.lookahead() else {
                        return stmt;
                    };
                    stmt.index_name = self.accept_literal(&next);
                }
                None => stmt.index_name = Some(name),
            }
        } else {
            self.unexpected_token(&[TokenKind::Literal]);
        }

        let Some(next) = self.lookahead() else {
            return stmt;
        };
        stmt.on = self.accept_keyword(&next, Keyword::On);
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        stmt.table_name = self.accept_literal(&next);
        let Some(next) = self.lookahead() else {
            return stmt;
        };
        stmt.left_paren = self.accept_delimiter(&next, '(');

        loop {
            let Some(next) = self.lookahead() else {
                return stmt;
            };
            if next.is_delimiter(')') {
                // Empty list or trailing comma
                if stmt
                    .indexed_columns
                    .last()
                    .is_none_or(|item| item.comma.is_some())
                {
                    self.unexpected_token(&[TokenKind::Literal]);
                }
                self.consume_token();
                stmt.right_paren = Some(next);
                break;
            }
            if next.kind() == TokenKind::StatementSeparator {
                self.unexpected_single_rune_token(TokenKind::Delimiter, ')');
                return stmt;
            }

            let Some(column) = self.parse_indexed_column() else {
                return stmt;
            };
            if column.is_unsupported() {
                stmt.indexed_columns.push(IndexedColumnItem { column, comma: None });
                return stmt;
            }
            let comma = self.optional_lookahead().filter(|t| t.is_delimiter(','));
            let has_comma = comma.is_some();
            if has_comma {
                self.consume_token();
            }
            stmt.indexed_columns.push(IndexedColumnItem { column, comma });
            if !has_comma
                && !self
                    .optional_lookahead()
                    .is_some_and(|t| t.is_delimiter(')'))
            {
                self.unexpected_single_rune_token(TokenKind::Delimiter, ')');
                return stmt;
            }
        }

        if let Some(where_) = self.optional_keyword(Keyword::Where) {
            stmt.where_clause = Some(WhereClause {
                where_,
                expr: self.parse_expression(),
            });
        }
        stmt
    }

    /// Reports the construct starting at the next token as unsupported and
    /// skips to the end of the statement, returning the skipped tokens.
    pub(super) fn skip_unsupported(&mut self) -> Vec<Token> {
        if let Some(next) = self.lookahead() {
            self.unsupported_construct(&next);
        }
        self.skip_until(STATEMENT_END)
    }

    // ==================== Token primitives ====================

    /// The next token, error tokens included, or `None` once the input is
    /// exhausted.
    pub(super) fn unsafe_low_level_lookahead(&mut self) -> Option<Token> {
        if self.exhausted {
            None
        } else {
            Some(self.scanner.peek().clone())
        }
    }

    /// The next meaningful token, or `None` at the end of input. Error tokens
    /// are reported and skipped.
    pub(super) fn optional_lookahead(&mut self) -> Option<Token> {
        loop {
            let next = self.unsafe_low_level_lookahead()?;
            match next.kind() {
                TokenKind::Error => {
                    self.reporter.error_token(&next);
                    self.consume_token();
                }
                TokenKind::Eof => return None,
                _ => return Some(next),
            }
        }
    }

    /// Like [`Self::optional_lookahead`], for positions where a token is
    /// mandatory: reaching the end of input reports an incomplete
    /// statement.
    pub(super) fn lookahead(&mut self) -> Option<Token> {
        let next = self.optional_lookahead();
        if next.is_none() {
            self.incomplete_statement();
        }
        next
    }

    /// Consumes the next token.
    pub(super) fn consume_token(&mut self) {
        if self.exhausted {
            return;
        }
        if self.scanner.next().is_eof() {
            self.exhausted = true;
        }
    }

    /// Consumes and returns the next token if it is `keyword`.
    pub(super) fn optional_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        let next = self
            .optional_lookahead()
            .filter(|t| t.is_keyword(keyword))?;
        self.consume_token();
        Some(next)
    }

    /// Skips tokens until one of `expected` is next, reporting each skipped
    /// token.
    pub(super) fn search_next(&mut self, expected: &[TokenKind]) {
        while let Some(next) = self.unsafe_low_level_lookahead() {
            if expected.contains(&next.kind()) {
                return;
            }
            trace!(token = %next, "skipping token");
            if next.kind() == TokenKind::Error {
                self.reporter.error_token(&next);
            } else {
                self.reporter.unexpected_token(&next, expected);
            }
            self.consume_token();
        }
    }

    /// Skips tokens until one of `kinds` is next, without reporting.
    pub(super) fn skip_until(&mut self, kinds: &[TokenKind]) -> Vec<Token> {
        let mut skipped = Vec::new();
        while let Some(next) = self.unsafe_low_level_lookahead() {
            if kinds.contains(&next.kind()) {
                break;
            }
            trace!(token = %next, "skipping token");
            self.consume_token();
            skipped.push(next);
        }
        skipped
    }

    /// Consumes `next` if it is `keyword`; reports it otherwise and carries
    /// on as if the keyword had been present.
    pub(super) fn accept_keyword(&mut self, next: &Token, keyword: Keyword) -> Option<Token> {
        if next.is_keyword(keyword) {
            self.consume_token();
            Some(next.clone())
        } else {
            self.unexpected_token(&[TokenKind::Keyword(keyword)]);
            None
        }
    }

    /// Consumes `next` if it is a literal; reports it otherwise.
    pub(super) fn accept_literal(&mut self, next: &Token) -> Option<Token> {
        if next.kind() == TokenKind::Literal {
            self.consume_token();
            Some(next.clone())
        } else {
            self.unexpected_token(&[TokenKind::Literal]);
            None
        }
    }

    /// Consumes `next` if it is the delimiter `rune`; reports it otherwise.
    pub(super) fn accept_delimiter(&mut self, next: &Token, rune: char) -> Option<Token> {
        if next.is_delimiter(rune) {
            self.consume_token();
            Some(next.clone())
        } else {
            self.unexpected_single_rune_token(TokenKind::Delimiter, rune);
            None
        }
    }

    /// A mandatory literal. Anything else is reported and left in place.
    pub(super) fn expect_literal(&mut self) -> Option<Token> {
        let next = self.lookahead()?;
        self.accept_literal(&next)
    }

    /// A mandatory literal. Anything else is reported and consumed.
    pub(super) fn literal_or_discard(&mut self) -> Option<Token> {
        let next = self.lookahead()?;
        if next.kind() == TokenKind::Literal {
            self.consume_token();
            return Some(next);
        }
        self.unexpected_token(&[TokenKind::Literal]);
        self.consume_token();
        None
    }

    // ==================== Diagnostics ====================

    pub(super) fn unexpected_token(&mut self, expected: &[TokenKind]) {
        let found = self.scanner.peek().clone();
        self.reporter.unexpected_token(&found, expected);
    }

    pub(super) fn unexpected_single_rune_token(&mut self, kind: TokenKind, rune: char) {
        let found = self.scanner.peek().clone();
        self.reporter.unexpected_single_rune_token(&found, kind, rune);
    }

    pub(super) fn unsupported_construct(&mut self, token: &Token) {
        self.reporter.unsupported_construct(token);
    }

    fn incomplete_statement(&mut self) {
        let eof = self.scanner.peek().clone();
        self.reporter.incomplete_statement(&eof);
    }
}

/// Parses the first statement of `input` with the default rule set,
/// returning it together with every diagnostic reported.
#[must_use]
pub fn parse(input: &str) -> (SqlStmt, Vec<Diagnostic>) {
    let mut parser = Parser::from_sql(input, CollectingReporter::new());
    let stmt = parser.parse_statement();
    (stmt, parser.into_reporter().into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{IndexedColumnTarget, SyntaxNode};
    use crate::parser::{DiagnosticKind, FailFastReporter};

    fn parse_clean(input: &str) -> SqlStmt {
        let mut parser = Parser::from_sql(input, FailFastReporter);
        parser.parse_statement()
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind.clone()).collect()
    }

    #[test]
    fn test_begin() {
        let stmt = parse_clean("BEGIN;");
        let Some(Statement::Begin(begin)) = &stmt.statement else {
            panic!("expected BEGIN, got {stmt:?}");
        };
        assert!(begin.mode.is_none());
        assert!(begin.transaction.is_none());
        assert!(stmt.separator.is_some());
    }

    #[test]
    fn test_begin_exhausts_input() {
        let mut parser = Parser::from_sql("BEGIN;", CollectingReporter::new());
        parser.parse_statement();
        assert!(parser.is_exhausted());
        assert!(parser.reporter().is_empty());
    }

    #[test]
    fn test_begin_immediate_transaction() {
        let stmt = parse_clean("BEGIN IMMEDIATE TRANSACTION");
        let Some(Statement::Begin(begin)) = &stmt.statement else {
            panic!("expected BEGIN");
        };
        assert_eq!(begin.mode.as_ref().map(Token::value), Some("IMMEDIATE"));
        assert!(begin.transaction.is_some());
    }

    #[test]
    fn test_commit_and_end() {
        for input in ["COMMIT", "END TRANSACTION;"] {
            let stmt = parse_clean(input);
            assert!(matches!(stmt.statement, Some(Statement::Commit(_))));
        }
    }

    #[test]
    fn test_rollback_to_savepoint() {
        let stmt = parse_clean("ROLLBACK TRANSACTION TO SAVEPOINT sp1;");
        let Some(Statement::Rollback(rollback)) = &stmt.statement else {
            panic!("expected ROLLBACK");
        };
        let target = rollback.to_savepoint.as_ref().expect("savepoint target");
        assert!(target.savepoint.is_some());
        assert_eq!(target.savepoint_name.as_ref().map(Token::value), Some("sp1"));
        assert!(stmt.separator.is_some());
    }

    #[test]
    fn test_rollback_without_target_keeps_separator() {
        let stmt = parse_clean("ROLLBACK;");
        assert!(stmt.separator.is_some());
    }

    #[test]
    fn test_alter_table_rename_to() {
        let stmt = parse_clean("ALTER TABLE t RENAME TO u;");
        let Some(Statement::AlterTable(alter)) = &stmt.statement else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(alter.table_name.as_ref().map(Token::value), Some("t"));
        let Some(AlterTableAction::Rename(RenameClause {
            target: Some(RenameTarget::Table(target)),
            ..
        })) = &alter.action
        else {
            panic!("expected RENAME TO");
        };
        assert_eq!(target.new_table_name.as_ref().map(Token::value), Some("u"));
    }

    #[test]
    fn test_alter_table_with_schema() {
        let stmt = parse_clean("ALTER TABLE main.t RENAME COLUMN a TO b");
        let Some(Statement::AlterTable(alter)) = &stmt.statement else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(
            alter.schema.as_ref().map(|s| s.schema_name.value()),
            Some("main")
        );
        assert_eq!(alter.table_name.as_ref().map(Token::value), Some("t"));
        let Some(AlterTableAction::Rename(RenameClause {
            target: Some(RenameTarget::Column(target)),
            ..
        })) = &alter.action
        else {
            panic!("expected RENAME COLUMN");
        };
        assert!(target.column.is_some());
        assert_eq!(target.new_column_name.as_ref().map(Token::value), Some("b"));
    }

    #[test]
    fn test_alter_table_missing_name() {
        let (stmt, diagnostics) = parse("ALTER TABLE RENAME TO u");
        let Some(Statement::AlterTable(alter)) = &stmt.statement else {
            panic!("expected ALTER TABLE");
        };
        assert!(alter.table_name.is_none());
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Literal]
            }
        );
        assert_eq!(diagnostics[0].token.value(), "RENAME");
    }

    #[test]
    fn test_alter_table_add_column() {
        let stmt = parse_clean("ALTER TABLE t ADD COLUMN c INTEGER NOT NULL DEFAULT 0");
        let Some(Statement::AlterTable(alter)) = &stmt.statement else {
            panic!("expected ALTER TABLE");
        };
        let Some(AlterTableAction::AddColumn(add)) = &alter.action else {
            panic!("expected ADD COLUMN");
        };
        let def = add.column_def.as_ref().expect("column def");
        assert_eq!(def.column_name.value(), "c");
        assert_eq!(def.constraints.len(), 2);
    }

    #[test]
    fn test_create_index() {
        let stmt = parse_clean("CREATE UNIQUE INDEX IF NOT EXISTS s.i ON t (a, b COLLATE nocase, c DESC) WHERE a;");
        let Some(Statement::CreateIndex(index)) = &stmt.statement else {
            panic!("expected CREATE INDEX");
        };
        assert!(index.unique.is_some());
        assert!(index.if_not_exists.is_some());
        assert_eq!(index.index_name.as_ref().map(Token::value), Some("i"));
        assert_eq!(index.indexed_columns.len(), 3);
        assert!(matches!(
            index.indexed_columns[0].column.target,
            IndexedColumnTarget::ColumnName(_)
        ));
        assert!(index.indexed_columns[1].column.collation.is_some());
        assert!(index.indexed_columns[2].column.direction.is_some());
        assert!(index.where_clause.is_some());
    }

    #[test]
    fn test_create_index_trailing_comma() {
        let (_, diagnostics) = parse("CREATE INDEX i ON t (a,)");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Literal]
            }]
        );
    }

    #[test]
    fn test_create_index_unclosed_list() {
        let (stmt, diagnostics) = parse("CREATE INDEX i ON t (a b)");
        let Some(Statement::CreateIndex(index)) = &stmt.statement else {
            panic!("expected CREATE INDEX");
        };
        assert_eq!(index.indexed_columns.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnexpectedSingleRuneToken {
                kind: TokenKind::Delimiter,
                rune: ')'
            }
        );
    }

    #[test]
    fn test_create_table_is_unsupported_but_lossless() {
        let input = "CREATE TEMP TABLE t (a, b);";
        let (stmt, diagnostics) = parse(input);
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::UnsupportedConstruct]);
        let Some(Statement::CreateTable(create)) = &stmt.statement else {
            panic!("expected CREATE TABLE");
        };
        assert!(create.temporary.is_some());
        assert_eq!(stmt.tokens().len(), 10);
    }

    #[test]
    fn test_pragma_is_unsupported_but_lossless() {
        let (stmt, diagnostics) = parse("PRAGMA foreign_keys = ON;");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::UnsupportedConstruct]);
        let Some(Statement::Unsupported(pragma)) = &stmt.statement else {
            panic!("expected an unsupported statement");
        };
        assert_eq!(pragma.tokens.len(), 4);
        assert!(stmt.separator.is_some());
        assert_eq!(stmt.to_string(), "PRAGMA foreign_keys = ON;");
    }

    #[test]
    fn test_alter_table_without_action() {
        let (stmt, diagnostics) = parse("ALTER TABLE t;");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: vec![
                    TokenKind::Keyword(Keyword::Rename),
                    TokenKind::Keyword(Keyword::Add)
                ]
            }]
        );
        assert_eq!(diagnostics[0].token.value(), ";");
        let Some(Statement::AlterTable(alter)) = &stmt.statement else {
            panic!("expected ALTER TABLE");
        };
        assert!(alter.action.is_none());
    }

    #[test]
    fn test_create_without_object() {
        let (stmt, diagnostics) = parse("CREATE;");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: CREATE_OBJECT.to_vec()
            }]
        );
        assert!(matches!(stmt.statement, Some(Statement::Unsupported(_))));
        assert_eq!(stmt.to_string(), "CREATE;");

        let (stmt, diagnostics) = parse("CREATE TEMP;");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: CREATE_TEMP_OBJECT.to_vec()
            }]
        );
        assert_eq!(stmt.to_string(), "CREATE TEMP;");
    }

    #[test]
    fn test_error_tokens_during_resync() {
        let (_, diagnostics) = parse("DETACH aux !;");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ErrorToken]);

        let (stmt, diagnostics) = parse("foo ! BEGIN");
        assert_eq!(
            kinds(&diagnostics),
            vec![
                DiagnosticKind::UnexpectedToken {
                    expected: STATEMENT_START.to_vec()
                },
                DiagnosticKind::ErrorToken,
            ]
        );
        assert!(matches!(stmt.statement, Some(Statement::Begin(_))));
    }

    #[test]
    fn test_explain_query_plan() {
        let stmt = parse_clean("EXPLAIN QUERY PLAN VACUUM");
        let prefix = stmt.explain.as_ref().expect("explain prefix");
        assert!(prefix.query.is_some());
        assert!(prefix.plan.is_some());
        assert!(matches!(stmt.statement, Some(Statement::Vacuum(_))));
    }

    #[test]
    fn test_explain_query_without_plan() {
        let (stmt, diagnostics) = parse("EXPLAIN QUERY BEGIN");
        assert!(matches!(stmt.statement, Some(Statement::Begin(_))));
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Keyword(Keyword::Plan)]
            }]
        );
    }

    #[test]
    fn test_empty_input_is_incomplete() {
        let mut parser = Parser::from_sql("  -- nothing\n", CollectingReporter::new());
        let stmt = parser.parse_statement();
        assert!(stmt.is_empty());
        assert!(parser.is_exhausted());
        assert_eq!(
            kinds(parser.reporter().diagnostics()),
            vec![DiagnosticKind::IncompleteStatement]
        );
    }

    #[test]
    fn test_lone_separator_is_incomplete() {
        let (stmt, diagnostics) = parse(";");
        assert!(stmt.separator.is_some());
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::IncompleteStatement]);
    }

    #[test]
    fn test_error_token_is_reported_and_skipped() {
        let (stmt, diagnostics) = parse("VACUUM ! INTO 'x.db'");
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::ErrorToken]);
        let Some(Statement::Vacuum(vacuum)) = &stmt.statement else {
            panic!("expected VACUUM");
        };
        assert!(vacuum.into.is_some());
    }

    #[test]
    fn test_resynchronizes_on_trailing_garbage() {
        let (_, diagnostics) = parse("DETACH aux extra;");
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::UnexpectedToken {
                expected: STATEMENT_END.to_vec()
            }]
        );
        assert_eq!(diagnostics[0].token.value(), "extra");
    }

    #[test]
    fn test_multiple_statements() {
        let mut parser = Parser::from_sql("BEGIN; VACUUM; COMMIT;", FailFastReporter);
        let mut names = Vec::new();
        while !parser.is_exhausted() {
            let stmt = parser.parse_statement();
            names.extend(stmt.statement.as_ref().map(Statement::name));
        }
        assert_eq!(names, vec!["BEGIN", "VACUUM", "COMMIT"]);
    }
}
