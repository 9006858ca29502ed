use crate::config::AppConfig;
use crate::dialog::ConfirmPrompt;
use crate::domain::{Filter, Severity, TaskListView, TaskRow, UiMode};
use crate::engine::{Intent, Outcome, TaskListEngine};
use crate::error::{InvalidReason, TaskError};
use crate::notifications::{Banner, Notification, Notifier};
use crate::persistence::KeyValueStore;
use crate::validation::{accepts_char, at_length_limit, sanitize_paste, MAX_TASK_LEN};
use std::time::Instant;

pub const LENGTH_LIMIT_MESSAGE: &str = "Max 100 characters is allowed";

/// Main application state for the terminal front-end
pub struct AppState {
    pub engine: TaskListEngine<Box<dyn KeyValueStore>, Banner>,
    pub ui_mode: UiMode,
    /// Text in the "add task" bar
    pub compose: String,
    pub selected_index: usize,
}

impl AppState {
    pub fn new(kv: Box<dyn KeyValueStore>, config: &AppConfig) -> Self {
        let banner = Banner::new(config.notification_duration());
        let engine = TaskListEngine::new(kv, banner, config.engine_options());

        Self {
            engine,
            ui_mode: UiMode::Normal,
            compose: String::new(),
            selected_index: 0,
        }
    }

    pub fn view(&self) -> TaskListView {
        self.engine.view()
    }

    pub fn banner(&self) -> Option<&Notification> {
        self.engine.notifier().current()
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.engine.pending_confirmation()
    }

    pub fn selected_row(&self) -> Option<TaskRow> {
        self.view().rows.into_iter().nth(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let rows = self.view().rows.len();
        if self.selected_index + 1 < rows {
            self.selected_index += 1;
        }
    }

    pub fn start_compose(&mut self) {
        self.ui_mode = UiMode::Composing;
    }

    pub fn cancel_compose(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Enter in the add bar. Blank input is ignored.
    pub fn submit_compose(&mut self) {
        if self.compose.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.compose);
        self.engine.add(&text);
        self.selected_index = 0;
        self.ui_mode = UiMode::Normal;
        self.after_command();
    }

    /// Type into whichever field has focus
    pub fn type_char(&mut self, c: char) {
        let current = match self.ui_mode {
            UiMode::Composing => self.compose.as_str(),
            UiMode::Editing => match self.engine.editing() {
                Some((_, text)) => text,
                None => return,
            },
            _ => return,
        };

        if at_length_limit(current) {
            self.warn(LENGTH_LIMIT_MESSAGE);
            return;
        }
        if !accepts_char(c) {
            self.warn(InvalidReason::ForbiddenCharacters.user_message());
            return;
        }

        let mut next = current.to_string();
        next.push(c);
        self.replace_field(next);
    }

    pub fn backspace(&mut self) {
        let mut next = match self.ui_mode {
            UiMode::Composing => self.compose.clone(),
            UiMode::Editing => match self.engine.editing() {
                Some((_, text)) => text.to_string(),
                None => return,
            },
            _ => return,
        };
        next.pop();
        self.replace_field(next);
    }

    /// Insert pasted text with anything untypeable stripped
    pub fn paste(&mut self, raw: &str) {
        let clean = sanitize_paste(raw);
        if clean.is_empty() {
            return;
        }

        match self.ui_mode {
            // Lands after whatever the add bar still holds
            UiMode::Normal | UiMode::Composing => {
                self.ui_mode = UiMode::Composing;
                let next = format!("{}{}", self.compose, clean);
                self.replace_field(next);
            }
            UiMode::Editing => {
                if let Some((_, text)) = self.engine.editing() {
                    let next = format!("{}{}", text, clean);
                    self.replace_field(next);
                }
            }
            UiMode::Confirming => {}
        }
    }

    fn replace_field(&mut self, text: String) {
        match self.ui_mode {
            UiMode::Composing => self.compose = text,
            UiMode::Editing => {
                self.engine.update_draft(&text);
            }
            _ => {}
        }
    }

    /// Open the selected task for editing; completed tasks stay read-only
    pub fn start_edit(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if self.engine.begin_edit(row.id) {
            self.ui_mode = UiMode::Editing;
        }
        self.after_command();
    }

    /// Leave the edit field; the draft is submitted as an edit
    pub fn commit_edit(&mut self) {
        self.engine.commit_edit();
        self.ui_mode = UiMode::Normal;
        self.after_command();
    }

    /// Flip the selected row's checkbox (or the row being edited)
    pub fn toggle_selected(&mut self) {
        let target = match self.engine.editing() {
            Some((id, _)) => self.view().rows.into_iter().find(|row| row.id == id),
            None => self.selected_row(),
        };
        if let Some(row) = target {
            self.engine.toggle(row.id, !row.checked);
        }
        self.after_command();
    }

    pub fn delete_selected(&mut self) {
        if let Some(row) = self.selected_row() {
            self.engine.delete(row.id);
        }
        self.after_command();
    }

    pub fn clear_all(&mut self) {
        self.engine.clear_all();
        self.after_command();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.engine.set_filter(filter);
        self.selected_index = 0;
        self.after_command();
    }

    pub fn cycle_filter(&mut self) {
        let next = self.engine.store().filter().next();
        self.set_filter(next);
    }

    /// Yes/no on the open confirmation dialog
    pub fn answer(&mut self, confirmed: bool) {
        self.engine.answer(confirmed);
        self.after_command();
    }

    /// Timer tick: release paced commands and expire the banner
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        self.engine.tick_at(now);
        self.engine.notifier_mut().expire(now);
        self.after_command();
    }

    /// Before exit: commit the open edit and run every queued command
    pub fn shutdown(&mut self) {
        self.engine.drain();
        self.after_command();
    }

    fn warn(&mut self, message: &str) {
        self.engine.notifier_mut().notify(message, Severity::Danger);
    }

    /// Bring the front-end in line with whatever the engine just did
    fn after_command(&mut self) {
        for (intent, outcome) in self.engine.take_outcomes() {
            // A refused add hands its text back to the add bar
            if let (Intent::Add { text }, Outcome::Rejected(err)) = (&intent, &outcome) {
                if self.compose.is_empty() && !matches!(err, TaskError::NotFound(_)) {
                    self.compose = text.chars().take(MAX_TASK_LEN).collect();
                }
            }
        }

        if self.engine.pending_confirmation().is_some() {
            self.ui_mode = UiMode::Confirming;
        } else if self.engine.editing().is_some() {
            if self.ui_mode != UiMode::Composing {
                self.ui_mode = UiMode::Editing;
            }
        } else if matches!(self.ui_mode, UiMode::Confirming | UiMode::Editing) {
            self.ui_mode = UiMode::Normal;
        }

        let rows = self.view().rows.len();
        if rows == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= rows {
            self.selected_index = rows - 1;
        }
    }
}
