pub mod enums;
pub mod task;
pub mod views;

pub use enums::{Filter, Severity, UiMode};
pub use task::{Task, TaskId};
pub use views::{
    checkbox_glyph, filter_label, project, Counts, Overlay, TaskListView, TaskRow, EMPTY_STATE_MESSAGE,
};
