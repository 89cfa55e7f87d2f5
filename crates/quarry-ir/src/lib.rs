//! # quarry-ir
//!
//! The boundary between the SQL front end and execution: parsed statements
//! are compiled into [`Command`]s, which an [`Executor`] runs.
//!
//! ```rust
//! use quarry_ir::{compile, CommandType};
//!
//! let (stmt, _) = quarry_sql_core::parse("CREATE INDEX idx ON users (email);");
//! let command = compile(&stmt).unwrap();
//! assert_eq!(command.kind, CommandType::Create);
//! assert_eq!(command.data_target.name, "idx");
//! ```

pub mod command;
pub mod compile;
pub mod error;
pub mod executor;

pub use command::{Command, CommandType, DataSource, DataTarget};
pub use compile::compile;
pub use error::{CompileError, ExecuteError};
pub use executor::{Executor, SimpleExecutor};
