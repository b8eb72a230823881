//! Session error types.

use thiserror::Error;

use labyrinth_procedural::AssemblyError;

/// Errors surfaced to whoever drives a [`crate::GameSession`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The assembler refused or could not answer.
    #[error("Maze assembly: {0}")]
    Assembly(#[from] AssemblyError),

    /// A reset was requested before the session started.
    #[error("Session has not been started")]
    NotStarted,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
