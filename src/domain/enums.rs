use serde::{Deserialize, Serialize};

/// Which tasks the list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl Filter {
    /// Parse the stored filter value ("all", "completed", "uncompleted")
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "completed" => Some(Self::Completed),
            "uncompleted" => Some(Self::Uncompleted),
            _ => None,
        }
    }

    /// Convert filter to its stored value
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Uncompleted => "uncompleted",
        }
    }

    /// Label used by the filter tabs
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Uncompleted => "In-Progress",
        }
    }

    /// Whether a task with this completion state is visible
    pub fn admits(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Uncompleted => !completed,
        }
    }

    /// Next filter in tab order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Completed,
            Self::Completed => Self::Uncompleted,
            Self::Uncompleted => Self::All,
        }
    }

    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Completed, Filter::Uncompleted]
    }
}

/// Notification banner severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

/// UI mode for the terminal front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Composing,
    Editing,
    Confirming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_wire() {
        assert_eq!(Filter::from_wire("all"), Some(Filter::All));
        assert_eq!(Filter::from_wire("completed"), Some(Filter::Completed));
        assert_eq!(Filter::from_wire("Uncompleted"), Some(Filter::Uncompleted));
        assert_eq!(Filter::from_wire("done"), None);
    }

    #[test]
    fn test_filter_admits() {
        assert!(Filter::All.admits(true));
        assert!(Filter::All.admits(false));
        assert!(Filter::Completed.admits(true));
        assert!(!Filter::Completed.admits(false));
        assert!(Filter::Uncompleted.admits(false));
        assert!(!Filter::Uncompleted.admits(true));
    }

    #[test]
    fn test_filter_next_cycles() {
        assert_eq!(Filter::All.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::Uncompleted);
        assert_eq!(Filter::Uncompleted.next(), Filter::All);
    }
}
