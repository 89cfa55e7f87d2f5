//! Command execution.

use tracing::{debug, warn};

use crate::command::{Command, CommandType};
use crate::error::{ExecuteError, Result};

/// Executes commands.
pub trait Executor {
    /// Executes `command` after all of its dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error if the command or one of its dependencies fails.
    fn execute(&self, command: &Command) -> Result<()>;
}

/// An executor that runs commands one at a time, dependencies first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleExecutor;

impl SimpleExecutor {
    /// Creates a new executor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Executor for SimpleExecutor {
    fn execute(&self, command: &Command) -> Result<()> {
        for dependency in &command.dependencies {
            self.execute(dependency)
                .map_err(|source| ExecuteError::Dependency {
                    id: dependency.id,
                    source: Box::new(source),
                })?;
        }

        debug!(id = %command.id, kind = %command.kind, "executing command");
        match command.kind {
            CommandType::Select
            | CommandType::Create
            | CommandType::Insert
            | CommandType::Drop
            | CommandType::Unknown => {
                warn!(kind = %command.kind, "execution not implemented");
                Err(ExecuteError::Unimplemented(command.kind))
            }
        }
    }
}
