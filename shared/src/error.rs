//! Error types.

use thiserror::Error;

/// Errors raised while decoding task-queue responses.
#[derive(Debug, Error)]
pub enum TaskAdminError {
    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Local validation failures for actions that need operator input.
///
/// These abort an action before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionInputError {
    /// Completing a task needs a non-blank result summary.
    #[error("A result summary is required to complete a task")]
    MissingResultSummary,
    /// Failing a task needs a non-blank error message.
    #[error("An error message is required to fail a task")]
    MissingErrorMessage,
}
