//! SQL parser
//!
//! A hand-written, error-tolerant recursive descent parser. Diagnostics are
//! delivered to a [`Reporter`] as they are found, and parsing always runs to
//! the end of the statement.

mod clauses;
mod error;
mod parser;
mod reporter;

pub use error::{Diagnostic, DiagnosticKind};
pub use parser::{parse, Parser};
pub use reporter::{CollectingReporter, FailFastReporter, Reporter};
