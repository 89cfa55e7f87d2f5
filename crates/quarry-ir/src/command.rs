//! Commands: the intermediate representation of a statement.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum CommandType {
    #[default]
    Unknown,
    Select,
    Create,
    Insert,
    Drop,
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "UNKNOWN",
            Self::Select => "SELECT",
            Self::Create => "CREATE",
            Self::Insert => "INSERT",
            Self::Drop => "DROP",
        };
        f.write_str(name)
    }
}

/// A table or view read by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSource {
    pub name: String,
    /// Created by one of the command's dependencies and dropped with it.
    pub temporary: bool,
}

impl DataSource {
    /// A persistent data source.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: false,
        }
    }

    /// A data source produced by a dependency.
    #[must_use]
    pub fn temporary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: true,
        }
    }
}

/// The object written by a command. Empty when nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct DataTarget {
    pub name: String,
}

/// A compiled statement.
///
/// Dependencies are executed before the command itself, and their results
/// are visible to it as temporary data sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: CommandType,
    pub data_sources: Vec<DataSource>,
    pub data_target: DataTarget,
    pub dependencies: Vec<Command>,
}

impl Command {
    /// Creates a command with a fresh identifier.
    #[must_use]
    pub fn new(kind: CommandType) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            data_sources: Vec::new(),
            data_target: DataTarget::default(),
            dependencies: Vec::new(),
        }
    }

    /// Sets the data target.
    #[must_use]
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.data_target = DataTarget { name: name.into() };
        self
    }

    /// Adds a data source.
    #[must_use]
    pub fn source(mut self, source: DataSource) -> Self {
        self.data_sources.push(source);
        self
    }

    /// Adds a dependency.
    #[must_use]
    pub fn depends_on(mut self, dependency: Self) -> Self {
        self.dependencies.push(dependency);
        self
    }
}
