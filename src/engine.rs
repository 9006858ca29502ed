//! Task list engine: runs user intents one at a time against the store.
//!
//! Every mutating intent goes through the `CommandSerializer`. A command moves
//! `Validating -> (AwaitingConfirmation)? -> Applying` and the queue does not
//! advance until it has finished, so confirmations never interleave and each
//! command sees a settled store.

use crate::dialog::{ConfirmPrompt, ConfirmationChannel};
use crate::domain::{project, Filter, Overlay, Severity, TaskId, TaskListView};
use crate::error::TaskError;
use crate::notifications::{Notifier, DEFAULT_NOTIFICATION_MS};
use crate::persistence::{KeyValueStore, PersistedSnapshot, PersistenceAdapter};
use crate::queue::CommandSerializer;
use crate::store::TaskStore;
use crate::validation::{is_duplicate, normalize, validate};
use std::time::{Duration, Instant};

pub const TRUNCATED_MESSAGE: &str = "Maximum character limit reached (max 100 characters)";

/// A user request to change the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add { text: String },
    Edit { id: TaskId, text: String },
    Delete { id: TaskId },
    ClearAll,
    Toggle { id: TaskId, completed: bool },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Edit { .. } => "edit",
            Self::Delete { .. } => "delete",
            Self::ClearAll => "clear_all",
            Self::Toggle { .. } => "toggle",
        }
    }
}

/// How a command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The store changed; `persisted` is false when the snapshot write failed
    Applied { persisted: bool },
    Unchanged,
    Rejected(TaskError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    AwaitingConfirmation,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// How long a notification stays up
    pub notification_duration: Duration,
    /// Hold the next command until the previous command's notification clears
    pub gate_on_notification: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            notification_duration: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
            gate_on_notification: true,
        }
    }
}

#[derive(Debug, Clone)]
struct EditDraft {
    id: TaskId,
    text: String,
}

enum Step {
    Apply,
    Confirm(String),
    /// Nothing to do; optionally tell the user why
    Skip(Option<&'static str>),
}

pub struct TaskListEngine<S: KeyValueStore, N: Notifier> {
    store: TaskStore,
    persistence: PersistenceAdapter<S>,
    notifier: N,
    queue: CommandSerializer<Intent>,
    dialog: ConfirmationChannel,
    awaiting: Option<Intent>,
    draft: Option<EditDraft>,
    options: EngineOptions,
    /// Current command has shown a notification
    notified: bool,
    outcomes: Vec<(Intent, Outcome)>,
}

impl<S: KeyValueStore, N: Notifier> TaskListEngine<S, N> {
    /// Build the engine and restore whatever `kv` holds
    pub fn new(kv: S, notifier: N, options: EngineOptions) -> Self {
        let mut engine = Self {
            store: TaskStore::new(),
            persistence: PersistenceAdapter::new(kv),
            notifier,
            queue: CommandSerializer::new(),
            dialog: ConfirmationChannel::new(),
            awaiting: None,
            draft: None,
            options,
            notified: false,
            outcomes: Vec::new(),
        };
        engine.restore();
        engine
    }

    /// Re-add saved tasks through the normal add path (oldest first, so the
    /// newest ends up on top). Entries the store refuses are dropped.
    fn restore(&mut self) {
        let snapshot = match self.persistence.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::error!("event=load_failed error={:#}", err);
                self.notifier.notify("Could not load saved tasks", Severity::Danger);
                return;
            }
        };

        for task in snapshot.replay_order() {
            if let Err(err) = self.store.add(&task.text, task.completed) {
                log::warn!("event=load_entry_dropped text={:?} reason={}", task.text, err);
            }
        }
        self.store.set_filter(snapshot.filter);

        log::info!(
            "event=tasks_loaded count={} filter={}",
            self.store.len(),
            snapshot.filter.as_wire()
        );
    }

    pub fn submit(&mut self, intent: Intent) {
        log::debug!("event=intent_queued intent={} pending={}", intent.name(), self.queue.pending());
        self.queue.submit(intent);
        self.pump(Instant::now());
    }

    pub fn add(&mut self, text: &str) {
        self.submit(Intent::Add {
            text: text.to_string(),
        });
    }

    pub fn delete(&mut self, id: TaskId) {
        self.submit(Intent::Delete { id });
    }

    pub fn clear_all(&mut self) {
        self.submit(Intent::ClearAll);
    }

    pub fn toggle(&mut self, id: TaskId, completed: bool) {
        self.submit(Intent::Toggle { id, completed });
    }

    /// Filter changes skip the queue: they never touch the task list
    pub fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        if let Err(err) = self.persistence.save_filter(filter) {
            log::error!("event=persist_failed what=filter error={:#}", err);
            self.notifier.notify(
                TaskError::PersistenceFailed(err.to_string()).user_message(),
                Severity::Danger,
            );
        }
        log::info!("event=filter_changed filter={}", filter.as_wire());
    }

    /// Open the editable field for a task. Completed tasks cannot be edited.
    /// An edit already open on another task is committed first.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        if self.draft.as_ref().map(|d| d.id) == Some(id) {
            return true;
        }
        if self.store.get(id).map_or(true, |t| t.completed) {
            return false;
        }

        self.commit_edit();

        match self.store.get(id) {
            Some(task) if !task.completed => {
                // Start from the newest queued edit so committing again builds on it
                let text = self.pending_text(id).unwrap_or_else(|| task.text.clone());
                self.draft = Some(EditDraft { id, text });
                true
            }
            _ => false,
        }
    }

    /// Track what is currently typed in the editable field
    pub fn update_draft(&mut self, text: &str) -> bool {
        match &mut self.draft {
            Some(draft) => {
                draft.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Leave the editable field; the draft becomes an Edit intent
    pub fn commit_edit(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.submit(Intent::Edit {
                id: draft.id,
                text: draft.text,
            });
        }
    }

    pub fn editing(&self) -> Option<(TaskId, &str)> {
        self.draft.as_ref().map(|d| (d.id, d.text.as_str()))
    }

    pub fn pending_confirmation(&self) -> Option<&ConfirmPrompt> {
        self.dialog.outstanding()
    }

    /// Answer the prompt with `prompt_id`. Returns false for stale answers.
    pub fn resolve(&mut self, prompt_id: u64, confirmed: bool) -> bool {
        if self.dialog.answer(prompt_id).is_none() {
            log::debug!("event=stale_confirmation prompt={}", prompt_id);
            return false;
        }
        let Some(intent) = self.awaiting.take() else {
            return false;
        };

        if confirmed {
            let outcome = self.apply(&intent);
            self.complete(intent, outcome);
        } else {
            log::info!("event=confirmation_cancelled intent={}", intent.name());
            self.complete(intent, Outcome::Rejected(TaskError::ConfirmationCancelled));
        }

        self.pump(Instant::now());
        true
    }

    /// Answer whatever prompt is open
    pub fn answer(&mut self, confirmed: bool) -> bool {
        match self.dialog.outstanding().map(|p| p.id) {
            Some(id) => self.resolve(id, confirmed),
            None => false,
        }
    }

    /// Run everything still queued without waiting on notification holds.
    /// An open edit is committed first and any prompt is answered "no".
    pub fn drain(&mut self) {
        self.commit_edit();

        let pending = self.pending_commands();
        let mut cancelled = 0;
        while !self.is_settled() {
            if let Some(prompt_id) = self.dialog.outstanding().map(|p| p.id) {
                self.resolve(prompt_id, false);
                cancelled += 1;
            }
            self.queue.release();
            self.pump(Instant::now());
        }

        log::info!("event=queue_drained pending={} cancelled_prompts={}", pending, cancelled);
    }

    /// Release the queue once a notification hold has passed
    pub fn tick_at(&mut self, now: Instant) {
        self.pump(now);
    }

    pub fn state(&self) -> EngineState {
        if self.awaiting.is_some() {
            EngineState::AwaitingConfirmation
        } else {
            EngineState::Idle
        }
    }

    /// No command running, waiting, or queued
    pub fn is_settled(&self) -> bool {
        self.awaiting.is_none() && self.queue.is_idle()
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.pending()
    }

    /// Queued or unconfirmed toggles show their target checkbox value and
    /// queued edits show their text until they apply
    pub fn view(&self) -> TaskListView {
        let mut overlay = Overlay {
            draft: self.editing(),
            ..Overlay::default()
        };
        for intent in self.awaiting.iter().chain(self.queue.iter()) {
            match intent {
                Intent::Toggle { id, completed } => {
                    overlay.checked.insert(*id, *completed);
                }
                Intent::Edit { id, text } => {
                    overlay.text.insert(*id, normalize(text).text);
                }
                _ => {}
            }
        }
        project(self.store.tasks(), self.store.filter(), &overlay)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn storage(&self) -> &S {
        self.persistence.kv()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Finished commands since the last call, oldest first
    pub fn take_outcomes(&mut self) -> Vec<(Intent, Outcome)> {
        std::mem::take(&mut self.outcomes)
    }

    fn pump(&mut self, now: Instant) {
        while self.awaiting.is_none() {
            let Some(intent) = self.queue.begin(now) else {
                break;
            };
            self.notified = false;
            self.run(intent);
        }
    }

    fn run(&mut self, intent: Intent) {
        match self.check(&intent) {
            Err(err) => self.reject(intent, err),
            Ok(Step::Skip(message)) => {
                if let Some(message) = message {
                    self.notify(message, Severity::Danger);
                }
                self.complete(intent, Outcome::Unchanged);
            }
            Ok(Step::Confirm(message)) => match self.dialog.request(message) {
                Some(prompt_id) => {
                    log::debug!("event=awaiting_confirmation intent={} prompt={}", intent.name(), prompt_id);
                    self.awaiting = Some(intent);
                }
                None => {
                    log::error!("event=dialog_busy intent={}", intent.name());
                    self.complete(intent, Outcome::Rejected(TaskError::ConfirmationCancelled));
                }
            },
            Ok(Step::Apply) => {
                let outcome = self.apply(&intent);
                self.complete(intent, outcome);
            }
        }
    }

    /// Validating state: decide what the intent needs without touching the store
    fn check(&mut self, intent: &Intent) -> Result<Step, TaskError> {
        match intent {
            Intent::Add { text } => {
                let normalized = normalize(text);
                if normalized.truncated {
                    self.notify(TRUNCATED_MESSAGE, Severity::Danger);
                }
                validate(&normalized.text).map_err(TaskError::InvalidText)?;
                if is_duplicate(self.store.tasks(), &normalized.text, None) {
                    return Err(TaskError::DuplicateTask);
                }
                Ok(Step::Apply)
            }
            Intent::Edit { id, text } => {
                let current = self.existing_text(*id)?;
                let normalized = normalize(text);
                if normalized.truncated {
                    self.notify(TRUNCATED_MESSAGE, Severity::Danger);
                }
                if normalized.text == current {
                    return Ok(Step::Skip(None));
                }
                if normalized.text.is_empty() {
                    return Ok(Step::Apply);
                }
                validate(&normalized.text).map_err(TaskError::InvalidText)?;
                if is_duplicate(self.store.tasks(), &normalized.text, Some(*id)) {
                    return Err(TaskError::DuplicateTask);
                }
                Ok(Step::Apply)
            }
            Intent::Delete { id } => {
                let text = self.existing_text(*id)?;
                Ok(Step::Confirm(format!(
                    "Are you sure you want to delete the task?<br><br><b>\"{}\"</b>",
                    text
                )))
            }
            Intent::ClearAll => {
                if self.store.is_empty() {
                    return Ok(Step::Skip(Some("No tasks to clear")));
                }
                Ok(Step::Confirm("Are you sure you want to clear all tasks?".to_string()))
            }
            Intent::Toggle { id, completed } => {
                let stored = self.store.get(*id).ok_or(TaskError::NotFound(*id))?;
                if stored.completed == *completed {
                    return Ok(Step::Skip(None));
                }
                if *completed && self.effective_text(*id)?.trim().is_empty() {
                    return Err(TaskError::EmptyAfterEdit);
                }
                let message = if *completed {
                    "Are you sure you want to complete this task?"
                } else {
                    "Are you sure you want to mark this task as in-progress?"
                };
                Ok(Step::Confirm(message.to_string()))
            }
        }
    }

    /// Applying state: mutate, persist, notify
    fn apply(&mut self, intent: &Intent) -> Outcome {
        match self.mutate(intent) {
            Ok((message, severity)) => {
                let persisted = self.persist();
                self.notify(message, severity);
                if !persisted {
                    self.notify("Could not save your tasks", Severity::Danger);
                }
                Outcome::Applied { persisted }
            }
            Err(err) => {
                self.notify_rejection(&err);
                Outcome::Rejected(err)
            }
        }
    }

    fn mutate(&mut self, intent: &Intent) -> Result<(&'static str, Severity), TaskError> {
        match intent {
            Intent::Add { text } => {
                let text = normalize(text).text;
                let id = self.store.add(&text, false)?.id;
                self.store.set_filter(Filter::All);
                log::info!("event=task_added id={}", id);
                Ok(("Your task is added", Severity::Success))
            }
            Intent::Edit { id, text } => {
                let text = normalize(text).text;
                if text.is_empty() {
                    self.store.remove(*id)?;
                    self.drop_draft(*id);
                    log::info!("event=task_removed reason=empty_edit id={}", id);
                    return Ok((TaskError::EmptyAfterEdit.user_message(), Severity::Danger));
                }
                self.store.set_text(*id, &text)?;
                log::info!("event=task_edited id={}", id);
                Ok(("Your task is updated", Severity::Success))
            }
            Intent::Delete { id } => {
                self.store.remove(*id)?;
                self.drop_draft(*id);
                log::info!("event=task_deleted id={}", id);
                Ok(("Task has been deleted", Severity::Danger))
            }
            Intent::ClearAll => {
                let removed = self.store.clear();
                self.draft = None;
                log::info!("event=tasks_cleared count={}", removed);
                Ok(("Your list is cleared", Severity::Danger))
            }
            Intent::Toggle { id, completed } => {
                // The draft may have been emptied while the prompt was open
                if self.effective_text(*id)?.trim().is_empty() {
                    if *completed {
                        return Err(TaskError::EmptyAfterEdit);
                    }
                    self.store.remove(*id)?;
                    self.drop_draft(*id);
                    log::info!("event=task_removed reason=empty_toggle id={}", id);
                    return Ok((TaskError::EmptyAfterEdit.user_message(), Severity::Danger));
                }

                self.store.set_completed(*id, *completed)?;
                log::info!("event=task_toggled id={} completed={}", id, completed);

                // Completed tasks are not editable; an open draft is committed behind this command
                if *completed {
                    if self.draft.as_ref().map(|d| d.id) == Some(*id) {
                        if let Some(draft) = self.draft.take() {
                            self.queue.submit(Intent::Edit {
                                id: draft.id,
                                text: draft.text,
                            });
                        }
                    }
                }

                Ok(if *completed {
                    ("Task is marked as completed", Severity::Success)
                } else {
                    ("Task is marked as in-progress", Severity::Success)
                })
            }
        }
    }

    fn persist(&mut self) -> bool {
        let snapshot = PersistedSnapshot::capture(&self.store);
        match self.persistence.save(&snapshot) {
            Ok(()) => true,
            Err(err) => {
                let err = TaskError::PersistenceFailed(format!("{:#}", err));
                log::error!("event=persist_failed what=snapshot error={}", err);
                false
            }
        }
    }

    fn reject(&mut self, intent: Intent, err: TaskError) {
        log::info!("event=intent_rejected intent={} reason={}", intent.name(), err);
        self.notify_rejection(&err);
        self.complete(intent, Outcome::Rejected(err));
    }

    fn notify_rejection(&mut self, err: &TaskError) {
        match err {
            // The target vanished under an earlier command; nothing to tell
            TaskError::NotFound(_) | TaskError::ConfirmationCancelled => {}
            _ => self.notify(err.user_message(), Severity::Danger),
        }
    }

    fn complete(&mut self, intent: Intent, outcome: Outcome) {
        let hold = if self.options.gate_on_notification
            && self.notified
            && !self.options.notification_duration.is_zero()
        {
            Some(Instant::now() + self.options.notification_duration)
        } else {
            None
        };
        self.queue.finish(hold);

        log::debug!("event=command_finished intent={} outcome={:?}", intent.name(), outcome);
        self.outcomes.push((intent, outcome));
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notified = true;
        self.notifier.notify(message, severity);
    }

    fn existing_text(&self, id: TaskId) -> Result<String, TaskError> {
        self.store
            .get(id)
            .map(|t| t.text.clone())
            .ok_or(TaskError::NotFound(id))
    }

    /// Text of the newest edit for `id` that has not applied yet
    fn pending_text(&self, id: TaskId) -> Option<String> {
        self.awaiting
            .iter()
            .chain(self.queue.iter())
            .filter_map(|intent| match intent {
                Intent::Edit { id: target, text } if *target == id => Some(normalize(text).text),
                _ => None,
            })
            .last()
    }

    /// The live draft when the task is being edited, else its stored text
    fn effective_text(&self, id: TaskId) -> Result<String, TaskError> {
        match &self.draft {
            Some(draft) if draft.id == id => Ok(draft.text.clone()),
            _ => self.existing_text(id),
        }
    }

    fn drop_draft(&mut self, id: TaskId) {
        if self.draft.as_ref().map(|d| d.id) == Some(id) {
            self.draft = None;
        }
    }
}
