//! Error types for compiling and executing commands.

use uuid::Uuid;

use crate::command::CommandType;

/// Errors that can occur while compiling a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The tree holds no statement.
    #[error("Nothing to compile: the statement is empty")]
    EmptyStatement,

    /// The parser kept the statement verbatim without understanding it.
    #[error("Unsupported statement: {0}")]
    UnsupportedStatement(String),

    /// The statement lacks a name the command needs.
    #[error("{statement} statement has no {what}")]
    MissingName {
        /// The statement kind.
        statement: &'static str,
        /// What is missing, e.g. "index name".
        what: &'static str,
    },
}

/// Errors that can occur while executing a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    /// Commands of this type cannot be executed yet.
    #[error("Executing {0} commands is not implemented")]
    Unimplemented(CommandType),

    /// A dependency of the command failed.
    #[error("Dependency {id} failed: {source}")]
    Dependency {
        /// The failed dependency.
        id: Uuid,
        /// Why it failed.
        source: Box<ExecuteError>,
    },
}

/// Result type for execution.
pub type Result<T> = std::result::Result<T, ExecuteError>;
