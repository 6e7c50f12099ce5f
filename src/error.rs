//! Error types returned by this crate

use thiserror::Error;

/// The errors a task API operation can surface.
///
/// Parsing is deliberately tolerant, so [`Error::Format`] only shows up when
/// the input cannot be treated as iCal data at all (or a component is left
/// unterminated). Everything recoverable is logged and skipped instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be parsed as an iCal component
    #[error("invalid iCal data: {0}")]
    Format(String),

    /// The operation requires the task to have a UID, and it has none
    #[error("task has no UID, which is required to {0}")]
    MissingUid(&'static str),

    /// A write operation was attempted while the API is in read-only mode
    #[error("'{0}' is not allowed in read-only mode")]
    ReadOnly(&'static str),

    /// No task list with this UID is known
    #[error("no task list with UID '{0}'")]
    UnknownList(String),

    /// No task with this UID is known
    #[error("no task with UID '{0}'")]
    UnknownTask(String),

    /// The CalDAV transport reported a failure
    #[error("transport error: {0}")]
    Transport(String),
}
