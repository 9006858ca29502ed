use super::kv::KeyValueStore;
use crate::domain::{Filter, Task};
use crate::store::TaskStore;
use crate::validation::is_acceptable_text;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const TASKS_KEY: &str = "tasks";
pub const FILTER_KEY: &str = "filterOption";

/// A task as it is written to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTask {
    pub text: String,
    pub completed: bool,
}

impl From<&Task> for PersistedTask {
    fn from(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            completed: task.completed,
        }
    }
}

/// Tasks (newest first, like the store) plus the filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedSnapshot {
    pub tasks: Vec<PersistedTask>,
    pub filter: Filter,
}

impl PersistedSnapshot {
    pub fn capture(store: &TaskStore) -> Self {
        Self {
            tasks: store.tasks().iter().map(PersistedTask::from).collect(),
            filter: store.filter(),
        }
    }

    /// Tasks oldest first; prepending them one by one rebuilds the newest-first order
    pub fn replay_order(&self) -> impl Iterator<Item = &PersistedTask> {
        self.tasks.iter().rev()
    }
}

/// Translates snapshots to and from a key-value store.
///
/// Storage keeps tasks oldest-first; `save` reverses before writing and
/// `load` reverses after reading.
pub struct PersistenceAdapter<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Read the snapshot. Missing keys mean no tasks and the `all` filter.
    /// Entries whose text would be refused on input are dropped.
    pub fn load(&self) -> Result<PersistedSnapshot> {
        let mut tasks: Vec<PersistedTask> = match self.kv.get(TASKS_KEY)? {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).context("Stored task list is not valid JSON")?
            }
            _ => Vec::new(),
        };
        tasks.retain(|task| {
            let keep = is_acceptable_text(&task.text);
            if !keep {
                log::warn!("event=load_entry_dropped text={:?} reason=invalid_text", task.text);
            }
            keep
        });
        tasks.reverse();

        let filter = match self.kv.get(FILTER_KEY)? {
            Some(value) => Filter::from_wire(&value).unwrap_or_else(|| {
                log::warn!("event=unknown_filter value={:?} fallback=all", value);
                Filter::All
            }),
            None => Filter::All,
        };

        Ok(PersistedSnapshot { tasks, filter })
    }

    pub fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()> {
        self.save_tasks(&snapshot.tasks)?;
        self.save_filter(snapshot.filter)
    }

    /// Write the task list; `tasks` is newest-first
    pub fn save_tasks(&mut self, tasks: &[PersistedTask]) -> Result<()> {
        let oldest_first: Vec<&PersistedTask> = tasks.iter().rev().collect();
        let json = serde_json::to_string(&oldest_first)?;
        self.kv.set(TASKS_KEY, &json)
    }

    pub fn save_filter(&mut self, filter: Filter) -> Result<()> {
        self.kv.set(FILTER_KEY, filter.as_wire())
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::kv::MemoryKvStore;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[(&str, bool)]) -> TaskStore {
        let mut store = TaskStore::new();
        for (text, done) in texts {
            store.add(text, *done).unwrap();
        }
        store
    }

    #[test]
    fn test_save_writes_oldest_first() {
        let store = store_with(&[("A", false), ("B", true)]);
        let mut adapter = PersistenceAdapter::new(MemoryKvStore::new());
        adapter.save(&PersistedSnapshot::capture(&store)).unwrap();

        let raw = adapter.kv().get(TASKS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"text":"A","completed":false},{"text":"B","completed":true}]"#
        );
        assert_eq!(adapter.kv().get(FILTER_KEY).unwrap(), Some("all".to_string()));
    }

    #[test]
    fn test_save_load_readd_reproduces_order() {
        let mut original = store_with(&[("A", false), ("B", true), ("C", false)]);
        original.set_filter(Filter::Completed);
        let mut adapter = PersistenceAdapter::new(MemoryKvStore::new());
        adapter.save(&PersistedSnapshot::capture(&original)).unwrap();

        let snapshot = adapter.load().unwrap();
        let mut restored = TaskStore::new();
        for task in snapshot.replay_order() {
            restored.add(&task.text, task.completed).unwrap();
        }

        assert_eq!(
            PersistedSnapshot::capture(&restored).tasks,
            PersistedSnapshot::capture(&original).tasks
        );
        assert_eq!(snapshot.filter, Filter::Completed);
    }

    #[test]
    fn test_load_missing_keys_defaults() {
        let adapter = PersistenceAdapter::new(MemoryKvStore::new());
        let snapshot = adapter.load().unwrap();
        assert!(snapshot.tasks.is_empty());
        assert_eq!(snapshot.filter, Filter::All);
    }

    #[test]
    fn test_load_unknown_filter_falls_back_to_all() {
        let mut kv = MemoryKvStore::new();
        kv.set(FILTER_KEY, "someday").unwrap();
        let adapter = PersistenceAdapter::new(kv);
        assert_eq!(adapter.load().unwrap().filter, Filter::All);
    }

    #[test]
    fn test_load_rejects_malformed_tasks() {
        let mut kv = MemoryKvStore::new();
        kv.set(TASKS_KEY, "{oops").unwrap();
        let adapter = PersistenceAdapter::new(kv);
        assert!(adapter.load().is_err());
    }

    #[test]
    fn test_load_drops_unacceptable_text() {
        let mut kv = MemoryKvStore::new();
        kv.set(
            TASKS_KEY,
            r#"[{"text":"Buy milk","completed":false},{"text":"bad!","completed":true},{"text":"  ","completed":false},{"text":"Walk dog","completed":true}]"#,
        )
        .unwrap();
        let adapter = PersistenceAdapter::new(kv);

        let texts: Vec<String> = adapter.load().unwrap().tasks.into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["Walk dog".to_string(), "Buy milk".to_string()]);
    }
}
