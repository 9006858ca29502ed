use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable task identity, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single entry in the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Unique ID (not persisted; reassigned on load)
    pub id: TaskId,
    /// Normalized task text
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(text: String, completed: bool) -> Self {
        Self {
            id: TaskId::new(),
            text,
            completed,
        }
    }
}
