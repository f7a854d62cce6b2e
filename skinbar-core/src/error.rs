//! Error types for the menu engine.

use std::path::PathBuf;
use thiserror::Error;

use crate::menu::commands::CommandId;

/// Errors raised while loading menus or configuration.
#[derive(Error, Debug)]
pub enum MenuError {
    /// The serialized menu description could not be parsed.
    #[error("Failed to parse menu description: {0}")]
    Description(#[from] serde_json::Error),

    /// Two leaves of the same description share a command id.
    #[error("Command id {command} is used by both '{first}' and '{second}'")]
    DuplicateCommand {
        /// The duplicated id.
        command: CommandId,
        /// Label of the first leaf carrying the id.
        first: String,
        /// Label of the second leaf carrying the id.
        second: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse config file {path:?}: {details}")]
    ConfigParse {
        /// The offending file.
        path: PathBuf,
        /// Parser message.
        details: String,
    },

    /// XDG base directories could not be determined.
    #[error("Failed to locate config directories: {0}")]
    ConfigDirs(#[from] xdg::BaseDirectoriesError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Style loading failed.
    #[error(transparent)]
    Theme(#[from] skinbar_theme::ThemeError),
}

/// Result type alias for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;

impl MenuError {
    /// Create a config parse error.
    pub fn config_parse(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            details: details.into(),
        }
    }
}

/// Returned by a [CommandDispatcher](crate::dispatch::CommandDispatcher) that
/// refused or failed to run a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Nothing is registered for the command.
    #[error("No handler registered for command {0}")]
    Unhandled(CommandId),

    /// The handler ran and rejected the command.
    #[error("Command {command} rejected: {reason}")]
    Rejected {
        /// The rejected command.
        command: CommandId,
        /// Why it was rejected.
        reason: String,
    },
}

impl DispatchError {
    /// Create a rejection error.
    pub fn rejected(command: CommandId, reason: impl Into<String>) -> Self {
        Self::Rejected {
            command,
            reason: reason.into(),
        }
    }
}
