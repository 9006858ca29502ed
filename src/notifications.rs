//! User-facing feedback: a short message in a banner that clears itself

use crate::domain::Severity;
use std::time::{Duration, Instant};

/// Default banner display time in milliseconds
pub const DEFAULT_NOTIFICATION_MS: u64 = 1500;

/// Receives every success/danger message the engine emits
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// In-terminal banner; a new message replaces the current one
#[derive(Debug)]
pub struct Banner {
    current: Option<Notification>,
    duration: Duration,
}

impl Banner {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Clear the banner once its display time has passed
    pub fn expire(&mut self, now: Instant) {
        if let Some(note) = &self.current {
            if now.duration_since(note.shown_at) >= self.duration {
                self.current = None;
            }
        }
    }
}

impl Notifier for Banner {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.current = Some(Notification {
            message: message.to_string(),
            severity,
            shown_at: Instant::now(),
        });
    }
}

/// Prints to stderr; used by the one-shot CLI commands
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => eprintln!("{}", message),
            Severity::Danger => eprintln!("! {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_replaces_and_expires() {
        let mut banner = Banner::new(Duration::from_millis(1500));
        banner.notify("Your task is added", Severity::Success);
        banner.notify("Task already exists", Severity::Danger);

        let current = banner.current().unwrap();
        assert_eq!(current.message, "Task already exists");
        assert_eq!(current.severity, Severity::Danger);

        let shown_at = current.shown_at;
        banner.expire(shown_at + Duration::from_millis(1000));
        assert!(banner.current().is_some());
        banner.expire(shown_at + Duration::from_millis(1500));
        assert!(banner.current().is_none());
    }
}
