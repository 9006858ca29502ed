use crate::domain::TaskId;
use thiserror::Error;

/// Why a piece of task text was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Empty,
    TooLong,
    ForbiddenCharacters,
}

impl InvalidReason {
    /// Message shown in the notification banner
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Empty => "Task cannot be empty",
            Self::TooLong => "Max 100 characters is allowed",
            Self::ForbiddenCharacters => "Special characters are not allowed",
        }
    }
}

/// Every way a task command can be turned down. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("invalid task text: {0:?}")]
    InvalidText(InvalidReason),

    #[error("a task with the same text already exists")]
    DuplicateTask,

    #[error("task text is empty")]
    EmptyAfterEdit,

    #[error("confirmation was cancelled")]
    ConfirmationCancelled,

    #[error("no task with id {0}")]
    NotFound(TaskId),

    #[error("failed to persist tasks: {0}")]
    PersistenceFailed(String),
}

impl TaskError {
    /// Message shown in the notification banner
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidText(reason) => reason.user_message(),
            Self::DuplicateTask => "Task already exists",
            Self::EmptyAfterEdit => "Task cannot be empty",
            Self::ConfirmationCancelled => "Action cancelled",
            Self::NotFound(_) => "Task no longer exists",
            Self::PersistenceFailed(_) => "Could not save your tasks",
        }
    }
}
