//! Confirmation request/response channel. At most one prompt is outstanding.

/// A question waiting for a yes/no answer.
///
/// `message` may carry `<b>`/`<br>` markup; the engine never looks inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub id: u64,
    pub message: String,
}

impl ConfirmPrompt {
    /// Message with markup removed, for plain terminals
    pub fn plain_text(&self) -> String {
        self.message
            .replace("<br>", "\n")
            .replace("<b>", "")
            .replace("</b>", "")
    }
}

#[derive(Debug, Default)]
pub struct ConfirmationChannel {
    next_id: u64,
    outstanding: Option<ConfirmPrompt>,
}

impl ConfirmationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a prompt. Returns `None` if another prompt is still open.
    pub fn request(&mut self, message: String) -> Option<u64> {
        if self.outstanding.is_some() {
            return None;
        }
        self.next_id += 1;
        self.outstanding = Some(ConfirmPrompt {
            id: self.next_id,
            message,
        });
        Some(self.next_id)
    }

    pub fn outstanding(&self) -> Option<&ConfirmPrompt> {
        self.outstanding.as_ref()
    }

    /// Close the prompt with `id`. Stale or repeated answers return `None`.
    pub fn answer(&mut self, id: u64) -> Option<ConfirmPrompt> {
        match &self.outstanding {
            Some(prompt) if prompt.id == id => self.outstanding.take(),
            _ => None,
        }
    }
}
