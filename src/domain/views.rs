use super::enums::Filter;
use super::task::{Task, TaskId};
use std::collections::HashMap;

/// Shown when the active filter leaves nothing visible
pub const EMPTY_STATE_MESSAGE: &str = "You don't have any tasks here.";

/// Badge counts; independent of the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub all: usize,
    pub completed: usize,
    pub uncompleted: usize,
}

impl Counts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            all: tasks.len(),
            completed,
            uncompleted: tasks.len() - completed,
        }
    }

    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Completed => self.completed,
            Filter::Uncompleted => self.uncompleted,
        }
    }
}

/// One visible row of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    /// Stored text, or the live draft while the row is being edited
    pub text: String,
    pub completed: bool,
    /// What the checkbox shows; differs from `completed` while a toggle waits
    pub checked: bool,
    pub editing: bool,
}

/// Everything the renderer needs after a change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub rows: Vec<TaskRow>,
    pub counts: Counts,
    pub filter: Filter,
    pub empty_state: bool,
}

/// State not yet applied to the store, layered over it for display
#[derive(Debug, Clone, Default)]
pub struct Overlay<'a> {
    /// Target value of a queued or unconfirmed toggle
    pub checked: HashMap<TaskId, bool>,
    /// Text of the newest queued edit
    pub text: HashMap<TaskId, String>,
    /// Task whose edit field is open, with the live draft
    pub draft: Option<(TaskId, &'a str)>,
}

/// Project the store into its visible form.
///
/// Filtering looks at the stored `completed` flag only; a provisionally
/// checked box does not move a row between filters until the toggle applies.
pub fn project(tasks: &[Task], filter: Filter, overlay: &Overlay) -> TaskListView {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .filter(|task| filter.admits(task.completed))
        .map(|task| {
            let (text, editing) = match overlay.draft {
                Some((id, draft)) if id == task.id => (draft.to_string(), true),
                _ => {
                    let text = overlay.text.get(&task.id).unwrap_or(&task.text);
                    (text.clone(), false)
                }
            };
            TaskRow {
                id: task.id,
                text,
                completed: task.completed,
                checked: overlay.checked.get(&task.id).copied().unwrap_or(task.completed),
                editing,
            }
        })
        .collect();

    TaskListView {
        empty_state: rows.is_empty(),
        rows,
        counts: Counts::from_tasks(tasks),
        filter,
    }
}

/// Tab label such as "In-Progress (3)"
pub fn filter_label(filter: Filter, counts: &Counts) -> String {
    format!("{} ({})", filter.label(), counts.for_filter(filter))
}

/// Checkbox glyph for a row
pub fn checkbox_glyph(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("Walk dog".to_string(), true),
            Task::new("Buy milk".to_string(), false),
            Task::new("Call mom".to_string(), false),
        ]
    }

    #[test]
    fn test_counts_from_tasks() {
        let counts = Counts::from_tasks(&tasks());
        assert_eq!(
            counts,
            Counts {
                all: 3,
                completed: 1,
                uncompleted: 2
            }
        );
    }

    #[test]
    fn test_project_filters_rows_but_not_counts() {
        let tasks = tasks();
        let view = project(&tasks, Filter::Completed, &Overlay::default());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].text, "Walk dog");
        assert_eq!(view.counts.all, 3);
        assert!(!view.empty_state);
    }

    #[test]
    fn test_project_empty_state() {
        let tasks = vec![Task::new("Buy milk".to_string(), false)];
        let view = project(&tasks, Filter::Completed, &Overlay::default());
        assert!(view.rows.is_empty());
        assert!(view.empty_state);
    }

    #[test]
    fn test_project_shows_provisional_checkbox_and_draft() {
        let tasks = tasks();
        let mut overlay = Overlay {
            draft: Some((tasks[2].id, "Call da")),
            ..Overlay::default()
        };
        overlay.checked.insert(tasks[1].id, true);
        let view = project(&tasks, Filter::All, &overlay);

        assert!(view.rows[1].checked);
        assert!(!view.rows[1].completed);
        assert!(view.rows[2].editing);
        assert_eq!(view.rows[2].text, "Call da");
    }

    #[test]
    fn test_project_shows_queued_edit_text() {
        let tasks = tasks();
        let mut overlay = Overlay::default();
        overlay.text.insert(tasks[1].id, "Buy oat milk".to_string());
        overlay.text.insert(tasks[2].id, "Call dad".to_string());
        overlay.draft = Some((tasks[2].id, "Call dad now"));
        let view = project(&tasks, Filter::All, &overlay);

        assert_eq!(view.rows[1].text, "Buy oat milk");
        assert!(!view.rows[1].editing);
        // The open field wins over a queued edit
        assert_eq!(view.rows[2].text, "Call dad now");
    }

    #[test]
    fn test_filter_label() {
        let counts = Counts::from_tasks(&tasks());
        assert_eq!(filter_label(Filter::Uncompleted, &counts), "In-Progress (2)");
        assert_eq!(filter_label(Filter::All, &counts), "All (3)");
    }
}
