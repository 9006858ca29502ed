//! Text rules for tasks. Everything here is pure.

use crate::domain::{Task, TaskId};
use crate::error::InvalidReason;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum task length in characters
pub const MAX_TASK_LEN: usize = 100;

static ALLOWED_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]*$").expect("failed to compile task text pattern"));

/// Result of normalizing user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Input was longer than `MAX_TASK_LEN` and got cut
    pub truncated: bool,
}

/// Trim and collapse every whitespace run to a single space
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim, collapse whitespace and truncate to `MAX_TASK_LEN` characters
pub fn normalize(s: &str) -> Normalized {
    let collapsed = collapse_whitespace(s);
    if collapsed.chars().count() <= MAX_TASK_LEN {
        return Normalized {
            text: collapsed,
            truncated: false,
        };
    }

    let cut: String = collapsed.chars().take(MAX_TASK_LEN).collect();
    Normalized {
        text: cut.trim_end().to_string(),
        truncated: true,
    }
}

/// Check text against the emptiness, length and character rules.
/// The text is judged after trimming and collapsing whitespace.
pub fn validate(s: &str) -> Result<(), InvalidReason> {
    let collapsed = collapse_whitespace(s);
    if collapsed.is_empty() {
        return Err(InvalidReason::Empty);
    }
    if collapsed.chars().count() > MAX_TASK_LEN {
        return Err(InvalidReason::TooLong);
    }
    if !ALLOWED_TEXT.is_match(&collapsed) {
        return Err(InvalidReason::ForbiddenCharacters);
    }
    Ok(())
}

pub fn is_acceptable_text(s: &str) -> bool {
    validate(s).is_ok()
}

/// Key used for duplicate detection (case-insensitive, whitespace-collapsed)
pub fn duplicate_key(s: &str) -> String {
    collapse_whitespace(s).to_lowercase()
}

/// Whether `text` matches any task other than `excluding`
pub fn is_duplicate(tasks: &[Task], text: &str, excluding: Option<TaskId>) -> bool {
    let key = duplicate_key(text);
    tasks
        .iter()
        .filter(|task| Some(task.id) != excluding)
        .any(|task| duplicate_key(&task.text) == key)
}

/// Whether a typed character may enter an input field
pub fn accepts_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' '
}

/// Typing stops once the trimmed input is this long
pub fn at_length_limit(s: &str) -> bool {
    s.trim().chars().count() >= MAX_TASK_LEN
}

/// Drop everything a user could not have typed
pub fn sanitize_paste(s: &str) -> String {
    s.chars().filter(|c| accepts_char(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        let n = normalize("  Buy   milk \t now ");
        assert_eq!(n.text, "Buy milk now");
        assert!(!n.truncated);
    }

    #[test]
    fn test_normalize_truncates_and_reports() {
        let long = "a".repeat(120);
        let n = normalize(&long);
        assert_eq!(n.text.len(), MAX_TASK_LEN);
        assert!(n.truncated);
    }

    #[test]
    fn test_normalize_truncation_does_not_leave_trailing_space() {
        let input = format!("{} {}", "a".repeat(99), "b".repeat(10));
        let n = normalize(&input);
        assert_eq!(n.text, "a".repeat(99));
        assert!(n.truncated);
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate("Buy milk"), Ok(()));
        assert_eq!(validate("   "), Err(InvalidReason::Empty));
        assert_eq!(validate("Buy milk!"), Err(InvalidReason::ForbiddenCharacters));
        assert_eq!(validate(&"x".repeat(101)), Err(InvalidReason::TooLong));
        assert_eq!(validate(&"x".repeat(100)), Ok(()));
    }

    #[test]
    fn test_is_acceptable_text_collapses_first() {
        assert!(is_acceptable_text("  Buy    milk  "));
        assert!(!is_acceptable_text("caf\u{e9}"));
    }

    #[test]
    fn test_is_duplicate_is_case_insensitive() {
        let tasks = vec![Task::new("Buy milk".to_string(), false)];
        assert!(is_duplicate(&tasks, "buy MILK", None));
        assert!(is_duplicate(&tasks, " Buy  milk ", None));
        assert!(!is_duplicate(&tasks, "Buy bread", None));
    }

    #[test]
    fn test_is_duplicate_excludes_task_being_edited() {
        let tasks = vec![Task::new("Buy milk".to_string(), false)];
        assert!(!is_duplicate(&tasks, "buy milk", Some(tasks[0].id)));
    }

    #[test]
    fn test_keystroke_rules() {
        assert!(accepts_char('a'));
        assert!(accepts_char('7'));
        assert!(accepts_char(' '));
        assert!(!accepts_char('!'));
        assert!(!accepts_char('\u{e9}'));
        assert!(at_length_limit(&"a".repeat(100)));
        assert!(!at_length_limit(&format!("{}   ", "a".repeat(99))));
    }

    #[test]
    fn test_sanitize_paste() {
        assert_eq!(sanitize_paste("Buy milk, eggs & bread!\n"), "Buy milk eggs  bread");
    }
}
