//! Translation of syntax trees into commands.

use quarry_sql_core::ast::{SchemaQualifier, SqlStmt, Statement};
use quarry_sql_core::{Token, TokenKind};
use tracing::debug;

use crate::command::{Command, CommandType, DataSource};
use crate::error::CompileError;

/// Compiles a parsed statement into a command.
///
/// `CREATE` statements become [`CommandType::Create`] commands targeting the
/// created object; a `CREATE INDEX` also reads its table. Every other
/// statement compiles to [`CommandType::Unknown`].
///
/// # Errors
///
/// Returns an error if the tree holds no statement or one the parser only
/// skipped, or if a `CREATE` statement does not name the object it creates.
pub fn compile(stmt: &SqlStmt) -> Result<Command, CompileError> {
    let statement = stmt
        .statement
        .as_ref()
        .ok_or(CompileError::EmptyStatement)?;

    let command = match statement {
        Statement::CreateIndex(index) => {
            let name = index
                .index_name
                .as_ref()
                .ok_or(CompileError::MissingName {
                    statement: statement.name(),
                    what: "index name",
                })?;
            let mut command =
                Command::new(CommandType::Create).target(qualified(index.schema.as_ref(), name));
            if let Some(table) = &index.table_name {
                command = command.source(DataSource::new(table.value()));
            }
            command
        }
        Statement::CreateTable(create) => create_object(statement, &create.body)?,
        Statement::CreateTrigger(create) => create_object(statement, &create.body)?,
        Statement::CreateView(create) => create_object(statement, &create.body)?,
        Statement::CreateVirtualTable(create) => create_object(statement, &create.body)?,
        Statement::Unsupported(_) => {
            return Err(CompileError::UnsupportedStatement(stmt.to_string()));
        }
        _ => Command::new(CommandType::Unknown),
    };

    debug!(
        id = %command.id,
        kind = %command.kind,
        statement = statement.name(),
        "compiled statement"
    );
    Ok(command)
}

fn qualified(schema: Option<&SchemaQualifier>, name: &Token) -> String {
    match schema {
        Some(schema) => format!("{}.{}", schema.schema_name.value(), name.value()),
        None => name.value().to_string(),
    }
}

/// A `CREATE` command for a statement whose body was kept unparsed. The
/// object name is the first literal of the body, qualified if a `.` and a
/// second literal follow.
fn create_object(statement: &Statement, body: &[Token]) -> Result<Command, CompileError> {
    let mut tokens = body.iter().skip_while(|t| t.kind() != TokenKind::Literal);
    let first = tokens.next().ok_or(CompileError::MissingName {
        statement: statement.name(),
        what: "object name",
    })?;
    let name = match (tokens.next(), tokens.next()) {
        (Some(period), Some(second))
            if period.is_delimiter('.') && second.kind() == TokenKind::Literal =>
        {
            format!("{}.{}", first.value(), second.value())
        }
        _ => first.value().to_string(),
    };
    Ok(Command::new(CommandType::Create).target(name))
}
