//! Sub-productions shared between statements.

use super::parser::Parser;
use super::Reporter;
use crate::ast::{
    CheckConstraint, Collation, ColumnConstraint, ColumnDef, ConflictClause, ConstraintBody,
    ConstraintName, DefaultConstraint, DefaultValue, Expr, ForeignKeyClause, GeneratedConstraint,
    IndexedColumn, IndexedColumnTarget, NotNullConstraint, PrimaryKeyConstraint,
    SecondTypeArgument, SignedNumber, TypeArguments, TypeName, UniqueConstraint,
};
use crate::lexer::{Keyword, Token, TokenKind};

/// Keywords that may start a column constraint.
const CONSTRAINT_START: &[TokenKind] = &[
    TokenKind::Keyword(Keyword::Constraint),
    TokenKind::Keyword(Keyword::Primary),
    TokenKind::Keyword(Keyword::Not),
    TokenKind::Keyword(Keyword::Unique),
    TokenKind::Keyword(Keyword::Check),
    TokenKind::Keyword(Keyword::Default),
    TokenKind::Keyword(Keyword::Collate),
    TokenKind::Keyword(Keyword::Generated),
    TokenKind::Keyword(Keyword::References),
];

impl<R: Reporter> Parser<R> {
    /// `column-name [type-name] {column-constraint}`
    ///
    /// A missing column name is reported and the offending token consumed.
    pub(super) fn parse_column_def(&mut self) -> Option<ColumnDef> {
        let column_name = self.literal_or_discard()?;
        let mut def = ColumnDef {
            column_name,
            type_name: None,
            constraints: Vec::new(),
        };

        if self
            .optional_lookahead()
            .is_some_and(|t| t.kind() == TokenKind::Literal)
        {
            def.type_name = Some(self.parse_type_name());
        }

        while self
            .optional_lookahead()
            .is_some_and(|t| CONSTRAINT_START.contains(&t.kind()))
        {
            def.constraints.push(self.parse_column_constraint());
        }
        Some(def)
    }

    /// `name {name} [( signed-number [, signed-number] )]`
    fn parse_type_name(&mut self) -> TypeName {
        let mut type_name = TypeName {
            names: Vec::new(),
            arguments: None,
        };
        while let Some(name) = self
            .optional_lookahead()
            .filter(|t| t.kind() == TokenKind::Literal)
        {
            self.consume_token();
            type_name.names.push(name);
        }

        let Some(left_paren) = self.optional_lookahead().filter(|t| t.is_delimiter('(')) else {
            return type_name;
        };
        self.consume_token();
        let mut arguments = TypeArguments {
            left_paren,
            first: self.parse_signed_number(),
            second: None,
            right_paren: None,
        };
        let mut complete = arguments.first.numeric_literal.is_some();
        if complete {
            if let Some(comma) = self.optional_lookahead().filter(|t| t.is_delimiter(',')) {
                self.consume_token();
                let number = self.parse_signed_number();
                complete = number.numeric_literal.is_some();
                arguments.second = Some(SecondTypeArgument { comma, number });
            }
        }
        if complete {
            if let Some(next) = self.lookahead() {
                arguments.right_paren = self.accept_delimiter(&next, ')');
            }
        }
        type_name.arguments = Some(arguments);
        type_name
    }

    /// `[+|-] numeric-literal`
    fn parse_signed_number(&mut self) -> SignedNumber {
        let mut number = SignedNumber::default();
        let Some(next) = self.lookahead() else {
            return number;
        };
        match next.kind() {
            TokenKind::UnaryOperator => {
                self.consume_token();
                number.sign = Some(next);
            }
            TokenKind::Literal => {}
            _ => {
                self.unexpected_token(&[TokenKind::UnaryOperator, TokenKind::Literal]);
                return number;
            }
        }
        number.numeric_literal = self.expect_literal();
        number
    }

    /// `[CONSTRAINT name] constraint`
    fn parse_column_constraint(&mut self) -> ColumnConstraint {
        let mut constraint = ColumnConstraint {
            name: None,
            body: None,
        };
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        if next.is_keyword(Keyword::Constraint) {
            self.consume_token();
            let mut name = ConstraintName {
                constraint: next,
                name: None,
            };
            let Some(next) = self.lookahead() else {
                constraint.name = Some(name);
                return constraint;
            };
            // A missing name is assumed, the constraint may still follow
            name.name = self.accept_literal(&next);
            constraint.name = Some(name);
        }

        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.body = match next.kind() {
            TokenKind::Keyword(Keyword::Primary) => {
                self.consume_token();
                Some(ConstraintBody::PrimaryKey(self.parse_primary_key(next)))
            }
            TokenKind::Keyword(Keyword::Not) => {
                self.consume_token();
                let mut not_null = NotNullConstraint {
                    not: next,
                    null: None,
                    conflict_clause: None,
                };
                if let Some(next) = self.lookahead() {
                    not_null.null = self.accept_keyword(&next, Keyword::Null);
                    not_null.conflict_clause = self.parse_optional_conflict_clause();
                }
                Some(ConstraintBody::NotNull(not_null))
            }
            TokenKind::Keyword(Keyword::Unique) => {
                self.consume_token();
                Some(ConstraintBody::Unique(UniqueConstraint {
                    unique: next,
                    conflict_clause: self.parse_optional_conflict_clause(),
                }))
            }
            TokenKind::Keyword(Keyword::Check) => {
                self.consume_token();
                Some(ConstraintBody::Check(self.parse_check_constraint(next)))
            }
            TokenKind::Keyword(Keyword::Default) => {
                self.consume_token();
                Some(ConstraintBody::Default(DefaultConstraint {
                    default: next,
                    value: self.parse_default_value(),
                }))
            }
            TokenKind::Keyword(Keyword::Collate) => {
                self.consume_token();
                Some(ConstraintBody::Collate(Collation {
                    collate: next,
                    collation_name: self.expect_literal(),
                }))
            }
            TokenKind::Keyword(Keyword::Generated) => {
                self.consume_token();
                Some(ConstraintBody::Generated(self.parse_generated_constraint(next)))
            }
            TokenKind::Keyword(Keyword::References) => {
                Some(ConstraintBody::ForeignKey(self.parse_foreign_key_clause()))
            }
            _ => {
                self.unexpected_token(&CONSTRAINT_START[1..]);
                None
            }
        };
        constraint
    }

    /// `PRIMARY KEY [ASC|DESC] [conflict-clause] [AUTOINCREMENT]`
    fn parse_primary_key(&mut self, primary: Token) -> PrimaryKeyConstraint {
        let mut constraint = PrimaryKeyConstraint {
            primary,
            key: None,
            direction: None,
            conflict_clause: None,
            autoincrement: None,
        };
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.key = self.accept_keyword(&next, Keyword::Key);

        constraint.direction = self.optional_lookahead().filter(|t| {
            t.is_keyword(Keyword::Asc) || t.is_keyword(Keyword::Desc)
        });
        if constraint.direction.is_some() {
            self.consume_token();
        }
        constraint.conflict_clause = self.parse_optional_conflict_clause();
        constraint.autoincrement = self.optional_keyword(Keyword::Autoincrement);
        constraint
    }

    /// `CHECK ( expr )`
    fn parse_check_constraint(&mut self, check: Token) -> CheckConstraint {
        let mut constraint = CheckConstraint {
            check,
            left_paren: None,
            expr: None,
            right_paren: None,
        };
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.left_paren = self.accept_delimiter(&next, '(');
        constraint.expr = self.parse_expression();
        if constraint.expr.as_ref().is_none_or(Expr::is_unsupported) {
            return constraint;
        }
        if let Some(next) = self.lookahead() {
            constraint.right_paren = self.accept_delimiter(&next, ')');
        }
        constraint
    }

    /// `signed-number | literal | NULL | CURRENT_* | ( expr )`
    fn parse_default_value(&mut self) -> Option<DefaultValue> {
        let next = self.lookahead()?;
        match next.kind() {
            TokenKind::UnaryOperator => Some(DefaultValue::SignedNumber(self.parse_signed_number())),
            TokenKind::Literal
            | TokenKind::Keyword(
                Keyword::Null
                | Keyword::CurrentDate
                | Keyword::CurrentTime
                | Keyword::CurrentTimestamp,
            ) => {
                self.consume_token();
                Some(DefaultValue::Literal(next))
            }
            TokenKind::Delimiter if next.is_delimiter('(') => {
                self.consume_token();
                let expr = self.parse_expression();
                let mut right_paren = None;
                if expr.as_ref().is_some_and(|e| !e.is_unsupported()) {
                    if let Some(close) = self.lookahead() {
                        right_paren = self.accept_delimiter(&close, ')');
                    }
                }
                Some(DefaultValue::Parenthesized {
                    left_paren: next,
                    expr,
                    right_paren,
                })
            }
            _ => {
                self.unexpected_token(&[
                    TokenKind::Literal,
                    TokenKind::UnaryOperator,
                    TokenKind::Delimiter,
                ]);
                None
            }
        }
    }

    /// `[GENERATED ALWAYS] AS ( expr ) [STORED|VIRTUAL]`
    fn parse_generated_constraint(&mut self, generated: Token) -> GeneratedConstraint {
        let mut constraint = GeneratedConstraint {
            generated,
            always: None,
            as_: None,
            left_paren: None,
            expr: None,
            right_paren: None,
            storage: None,
        };
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.always = self.accept_keyword(&next, Keyword::Always);
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.as_ = self.accept_keyword(&next, Keyword::As);
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.left_paren = self.accept_delimiter(&next, '(');
        constraint.expr = self.parse_expression();
        if constraint.expr.as_ref().is_none_or(Expr::is_unsupported) {
            return constraint;
        }
        let Some(next) = self.lookahead() else {
            return constraint;
        };
        constraint.right_paren = self.accept_delimiter(&next, ')');

        // STORED is not a keyword
        constraint.storage = self.optional_lookahead().filter(|t| {
            t.is_keyword(Keyword::Virtual)
                || (t.kind() == TokenKind::Literal && t.value().eq_ignore_ascii_case("STORED"))
        });
        if constraint.storage.is_some() {
            self.consume_token();
        }
        constraint
    }

    /// `ON CONFLICT (ROLLBACK|ABORT|FAIL|IGNORE|REPLACE)`, if `ON` is next.
    fn parse_optional_conflict_clause(&mut self) -> Option<ConflictClause> {
        let on = self.optional_keyword(Keyword::On)?;
        let mut clause = ConflictClause {
            on,
            conflict: None,
            resolution: None,
        };
        let Some(next) = self.lookahead() else {
            return Some(clause);
        };
        if !next.is_keyword(Keyword::Conflict) {
            self.unexpected_token(&[TokenKind::Keyword(Keyword::Conflict)]);
            return Some(clause);
        }
        self.consume_token();
        clause.conflict = Some(next);

        let Some(next) = self.lookahead() else {
            return Some(clause);
        };
        match next.kind() {
            TokenKind::Keyword(
                Keyword::Rollback
                | Keyword::Abort
                | Keyword::Fail
                | Keyword::Ignore
                | Keyword::Replace,
            ) => {
                self.consume_token();
                clause.resolution = Some(next);
            }
            _ => self.unexpected_token(&[
                TokenKind::Keyword(Keyword::Rollback),
                TokenKind::Keyword(Keyword::Abort),
                TokenKind::Keyword(Keyword::Fail),
                TokenKind::Keyword(Keyword::Ignore),
                TokenKind::Keyword(Keyword::Replace),
            ]),
        }
        Some(clause)
    }

    /// `REFERENCES ...`, retained verbatim.
    fn parse_foreign_key_clause(&mut self) -> ForeignKeyClause {
        ForeignKeyClause {
            tokens: self.skip_unsupported(),
        }
    }

    /// `(column-name | expr) [COLLATE collation-name] [ASC|DESC]`
    pub(super) fn parse_indexed_column(&mut self) -> Option<IndexedColumn> {
        let next = self.lookahead()?;
        let target = if next.kind() == TokenKind::Literal {
            self.consume_token();
            IndexedColumnTarget::ColumnName(next)
        } else {
            IndexedColumnTarget::Expr(self.parse_expression()?)
        };

        let mut column = IndexedColumn {
            target,
            collation: None,
            direction: None,
        };
        if column.is_unsupported() {
            return Some(column);
        }
        if let Some(collate) = self.optional_keyword(Keyword::Collate) {
            column.collation = Some(Collation {
                collate,
                collation_name: self.expect_literal(),
            });
        }
        column.direction = self
            .optional_lookahead()
            .filter(|t| t.is_keyword(Keyword::Asc) || t.is_keyword(Keyword::Desc));
        if column.direction.is_some() {
            self.consume_token();
        }
        Some(column)
    }

    /// An expression. Only single literals are understood; anything else is
    /// reported as unsupported and kept verbatim up to the end of the
    /// statement.
    pub(super) fn parse_expression(&mut self) -> Option<Expr> {
        let next = self.lookahead()?;
        match next.kind() {
            TokenKind::Literal => {
                self.consume_token();
                Some(Expr::Literal(next))
            }
            TokenKind::StatementSeparator => {
                self.unexpected_token(&[TokenKind::Literal]);
                None
            }
            _ => Some(Expr::Unsupported(self.skip_unsupported())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AlterTableAction, ColumnDef, ConstraintBody, DefaultValue, Expr, Statement,
    };
    use crate::lexer::{Keyword, TokenKind};
    use crate::parser::{parse, Diagnostic, DiagnosticKind};

    fn column_def(sql: &str) -> (Option<ColumnDef>, Vec<Diagnostic>) {
        let (stmt, diagnostics) = parse(&format!("ALTER TABLE t ADD {sql}"));
        let def = match stmt.statement {
            Some(Statement::AlterTable(alter)) => match alter.action {
                Some(AlterTableAction::AddColumn(add)) => add.column_def,
                _ => None,
            },
            _ => None,
        };
        (def, diagnostics)
    }

    #[test]
    fn test_type_name_with_arguments() {
        let (def, diagnostics) = column_def("price UNSIGNED DECIMAL(-10, 2)");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let type_name = def.and_then(|d| d.type_name).expect("type name");
        assert_eq!(type_name.names.len(), 2);
        let arguments = type_name.arguments.expect("arguments");
        assert!(arguments.first.sign.is_some());
        assert!(arguments.second.is_some());
        assert!(arguments.right_paren.is_some());
    }

    #[test]
    fn test_column_without_type() {
        let (def, diagnostics) = column_def("COLUMN c");
        assert!(diagnostics.is_empty());
        let def = def.expect("column def");
        assert!(def.type_name.is_none());
        assert!(def.constraints.is_empty());
    }

    #[test]
    fn test_primary_key_constraint() {
        let (def, diagnostics) =
            column_def("id INTEGER CONSTRAINT pk PRIMARY KEY DESC ON CONFLICT REPLACE AUTOINCREMENT");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let def = def.expect("column def");
        assert_eq!(def.constraints.len(), 1);
        let constraint = &def.constraints[0];
        assert!(constraint.name.as_ref().is_some_and(|n| n.name.is_some()));
        let Some(ConstraintBody::PrimaryKey(pk)) = &constraint.body else {
            panic!("expected PRIMARY KEY");
        };
        assert!(pk.direction.is_some());
        assert!(pk
            .conflict_clause
            .as_ref()
            .is_some_and(|c| c.resolution.is_some()));
        assert!(pk.autoincrement.is_some());
    }

    #[test]
    fn test_primary_without_key() {
        let (_, diagnostics) = column_def("id PRIMARY UNIQUE");
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Keyword(Keyword::Key)]
            }
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_conflict_clause_without_conflict() {
        let (_, diagnostics) = column_def("id UNIQUE ON ABORT");
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Keyword(Keyword::Conflict)]
            }
        );
    }

    #[test]
    fn test_default_values() {
        let (def, diagnostics) = column_def("a DEFAULT -1 DEFAULT 'x' DEFAULT NULL DEFAULT CURRENT_TIMESTAMP DEFAULT (0)");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let values: Vec<_> = def
            .expect("column def")
            .constraints
            .into_iter()
            .map(|c| match c.body {
                Some(ConstraintBody::Default(d)) => d.value,
                _ => None,
            })
            .collect();
        assert!(matches!(values[0], Some(DefaultValue::SignedNumber(_))));
        assert!(matches!(values[1], Some(DefaultValue::Literal(_))));
        assert!(matches!(values[2], Some(DefaultValue::Literal(_))));
        assert!(matches!(values[3], Some(DefaultValue::Literal(_))));
        assert!(matches!(
            values[4],
            Some(DefaultValue::Parenthesized {
                expr: Some(Expr::Literal(_)),
                right_paren: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn test_check_without_parentheses() {
        let (def, diagnostics) = column_def("a CHECK 1");
        assert_eq!(
            diagnostics
                .iter()
                .map(|d| d.kind.clone())
                .collect::<Vec<_>>(),
            vec![
                DiagnosticKind::UnexpectedSingleRuneToken {
                    kind: TokenKind::Delimiter,
                    rune: '('
                },
                DiagnosticKind::IncompleteStatement,
            ]
        );
        let Some(ConstraintBody::Check(check)) = &def.expect("column def").constraints[0].body
        else {
            panic!("expected CHECK");
        };
        assert!(check.expr.is_some());
    }

    #[test]
    fn test_generated_column() {
        let (def, diagnostics) = column_def("b INT GENERATED ALWAYS AS (a) stored");
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let Some(ConstraintBody::Generated(generated)) = &def.expect("column def").constraints[0].body
        else {
            panic!("expected GENERATED");
        };
        assert_eq!(generated.storage.as_ref().map(|t| t.value()), Some("stored"));
    }

    #[test]
    fn test_references_is_unsupported() {
        let (def, diagnostics) = column_def("a REFERENCES p(id)");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnsupportedConstruct);
        let Some(ConstraintBody::ForeignKey(fk)) = &def.expect("column def").constraints[0].body
        else {
            panic!("expected REFERENCES");
        };
        assert_eq!(fk.tokens.len(), 5);
    }

    #[test]
    fn test_non_literal_expression_is_unsupported() {
        let (stmt, diagnostics) = parse("ATTACH (1) AS aux");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnsupportedConstruct);
        assert_eq!(diagnostics[0].token.value(), "(");
        let Some(Statement::Attach(attach)) = stmt.statement else {
            panic!("expected ATTACH");
        };
        let Some(Expr::Unsupported(tokens)) = &attach.expr else {
            panic!("expected an unsupported expression");
        };
        let values: Vec<_> = tokens.iter().map(|t| t.value()).collect();
        assert_eq!(values, vec!["(", "1", ")", "AS", "aux"]);
        assert!(attach.as_.is_none());
    }

    #[test]
    fn test_missing_expression_before_separator() {
        let (_, diagnostics) = parse("ATTACH DATABASE;");
        assert_eq!(
            diagnostics.iter().map(|d| d.kind.clone()).collect::<Vec<_>>(),
            vec![DiagnosticKind::UnexpectedToken {
                expected: vec![TokenKind::Literal]
            }]
        );
    }

    #[test]
    fn test_unsupported_check_expression_is_kept() {
        let (def, diagnostics) = column_def("a CHECK (-a)");
        assert_eq!(diagnostics.len(), 1);
        let Some(ConstraintBody::Check(check)) = &def.expect("column def").constraints[0].body
        else {
            panic!("expected CHECK");
        };
        assert!(check.left_paren.is_some());
        assert!(check.right_paren.is_none());
        assert!(check.expr.as_ref().is_some_and(Expr::is_unsupported));
    }

    #[test]
    fn test_truncated_type_arguments_report_once() {
        let (def, diagnostics) = column_def("c VARCHAR(");
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].kind, DiagnosticKind::IncompleteStatement);
        let arguments = def
            .and_then(|d| d.type_name)
            .and_then(|t| t.arguments)
            .expect("type arguments");
        assert!(arguments.right_paren.is_none());

        let (_, diagnostics) = column_def("c DECIMAL(10,");
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    }
}
