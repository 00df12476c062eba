//! Error taxonomy for path resolution, command parsing, and scripts.

use thiserror::Error;

/// Path resolution failures. Syntactic errors surface before any device is
/// touched; existence errors after the lexical walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("malformed path '{0}'")]
    MalformedPath(String),
    #[error("path '{0}' escapes the device root")]
    EscapesRoot(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("'{0}' is not a directory")]
    NotADirectory(String),
}

/// Command line interpretation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{0}")]
    BadArguments(String),
}

/// Script execution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("script '{0}' not found")]
    NotFound(String),
    #[error("script recursion too deep")]
    TooDeep,
}
