use crate::domain::{Counts, Filter, Task, TaskId};
use crate::error::TaskError;
use crate::validation::{collapse_whitespace, is_duplicate, validate};

/// What `set_completed` did to the task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    Updated,
    /// The task had empty text and was dropped instead of reopened
    Removed,
}

/// Ordered task collection (newest first) plus the active filter.
///
/// Every mutation is all-or-nothing: on `Err` the store is untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filter: Filter,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new task
    pub fn add(&mut self, text: &str, completed: bool) -> Result<&Task, TaskError> {
        let text = collapse_whitespace(text);
        validate(&text).map_err(TaskError::InvalidText)?;
        if is_duplicate(&self.tasks, &text, None) {
            return Err(TaskError::DuplicateTask);
        }

        self.tasks.insert(0, Task::new(text, completed));
        Ok(&self.tasks[0])
    }

    pub fn remove(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self.position(id)?;
        Ok(self.tasks.remove(idx))
    }

    /// Replace a task's text in place, keeping its id, position and completion
    pub fn set_text(&mut self, id: TaskId, text: &str) -> Result<&Task, TaskError> {
        let idx = self.position(id)?;
        let text = collapse_whitespace(text);
        validate(&text).map_err(TaskError::InvalidText)?;
        if is_duplicate(&self.tasks, &text, Some(id)) {
            return Err(TaskError::DuplicateTask);
        }

        self.tasks[idx].text = text;
        Ok(&self.tasks[idx])
    }

    /// Completing a task needs non-empty text; reopening an empty one removes it
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<CompletionChange, TaskError> {
        let idx = self.position(id)?;
        let empty = self.tasks[idx].text.trim().is_empty();

        match (completed, empty) {
            (true, true) => Err(TaskError::EmptyAfterEdit),
            (false, true) => {
                self.tasks.remove(idx);
                Ok(CompletionChange::Removed)
            }
            (_, false) => {
                self.tasks[idx].completed = completed;
                Ok(CompletionChange::Updated)
            }
        }
    }

    /// Remove every task, returning how many there were
    pub fn clear(&mut self) -> usize {
        let removed = self.tasks.len();
        self.tasks.clear();
        removed
    }

    /// Tasks visible under `filter`, in display order
    pub fn list(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.admits(t.completed)).collect()
    }

    pub fn counts(&self) -> Counts {
        Counts::from_tasks(&self.tasks)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidReason;
    use pretty_assertions::assert_eq;

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_prepends() {
        let mut store = TaskStore::new();
        store.add("A", false).unwrap();
        store.add("B", false).unwrap();
        store.add("C", false).unwrap();
        assert_eq!(texts(&store), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_add_single_task_counts() {
        let mut store = TaskStore::new();
        let task = store.add("Buy milk", false).unwrap().clone();
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(
            store.counts(),
            Counts {
                all: 1,
                completed: 0,
                uncompleted: 1
            }
        );
    }

    #[test]
    fn test_add_rejects_duplicate_case_insensitive() {
        let mut store = TaskStore::new();
        store.add("Buy milk", false).unwrap();
        assert_eq!(store.add("Buy milk", false).unwrap_err(), TaskError::DuplicateTask);
        assert_eq!(store.add("  buy   MILK ", true).unwrap_err(), TaskError::DuplicateTask);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_text() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.add("Buy milk!", false).unwrap_err(),
            TaskError::InvalidText(InvalidReason::ForbiddenCharacters)
        );
        assert_eq!(
            store.add("   ", false).unwrap_err(),
            TaskError::InvalidText(InvalidReason::Empty)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_stores_collapsed_text() {
        let mut store = TaskStore::new();
        store.add("  Buy   milk ", false).unwrap();
        assert_eq!(texts(&store), vec!["Buy milk"]);
    }

    #[test]
    fn test_remove() {
        let mut store = TaskStore::new();
        let id = store.add("A", false).unwrap().id;
        store.add("B", false).unwrap();

        let removed = store.remove(id).unwrap();
        assert_eq!(removed.text, "A");
        assert_eq!(texts(&store), vec!["B"]);
        assert_eq!(store.remove(id).unwrap_err(), TaskError::NotFound(id));
    }

    #[test]
    fn test_set_text_keeps_identity_position_and_completion() {
        let mut store = TaskStore::new();
        let id = store.add("A", true).unwrap().id;
        store.add("B", false).unwrap();

        let task = store.set_text(id, "Alpha").unwrap().clone();
        assert_eq!(task.id, id);
        assert!(task.completed);
        assert_eq!(texts(&store), vec!["B", "Alpha"]);
    }

    #[test]
    fn test_set_text_rejects_duplicate_of_other_task() {
        let mut store = TaskStore::new();
        let id = store.add("A", false).unwrap().id;
        store.add("B", false).unwrap();

        assert_eq!(store.set_text(id, "b").unwrap_err(), TaskError::DuplicateTask);
        assert_eq!(texts(&store), vec!["B", "A"]);

        // Changing only the case of itself is fine
        store.set_text(id, "a").unwrap();
        assert_eq!(texts(&store), vec!["B", "a"]);
    }

    #[test]
    fn test_set_completed() {
        let mut store = TaskStore::new();
        let id = store.add("A", false).unwrap().id;

        assert_eq!(store.set_completed(id, true), Ok(CompletionChange::Updated));
        assert!(store.get(id).unwrap().completed);
        assert_eq!(store.set_completed(id, false), Ok(CompletionChange::Updated));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_set_completed_on_empty_text() {
        let mut store = TaskStore::new();
        let task = Task::new(String::new(), false);
        let id = task.id;
        store.tasks.push(task);

        assert_eq!(store.set_completed(id, true), Err(TaskError::EmptyAfterEdit));
        assert_eq!(store.len(), 1);
        assert!(!store.tasks()[0].completed);

        assert_eq!(store.set_completed(id, false), Ok(CompletionChange::Removed));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_and_counts_with_filter() {
        let mut store = TaskStore::new();
        for (text, done) in [("A", true), ("B", false), ("C", true), ("D", false), ("E", false)] {
            store.add(text, done).unwrap();
        }

        let completed: Vec<&str> = store.list(Filter::Completed).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(completed, vec!["C", "A"]);
        assert_eq!(store.list(Filter::Uncompleted).len(), 3);
        assert_eq!(
            store.counts(),
            Counts {
                all: 5,
                completed: 2,
                uncompleted: 3
            }
        );
    }

    #[test]
    fn test_clear() {
        let mut store = TaskStore::new();
        store.add("A", false).unwrap();
        store.add("B", true).unwrap();
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
    }
}
