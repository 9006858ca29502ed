//! Single-flight FIFO admission for user commands.
//!
//! A command is taken with `begin`, and nothing else is handed out until
//! `finish` is called for it. `finish` may set a hold so the next command waits
//! for the previous command's feedback to clear.

use std::collections::VecDeque;
use std::time::Instant;

#[derive(Debug)]
pub struct CommandSerializer<C> {
    queue: VecDeque<C>,
    in_flight: bool,
    held_until: Option<Instant>,
}

impl<C> Default for CommandSerializer<C> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            in_flight: false,
            held_until: None,
        }
    }
}

impl<C> CommandSerializer<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command; it runs once everything ahead of it has finished
    pub fn submit(&mut self, command: C) {
        self.queue.push_back(command);
    }

    /// Hand out the next command if none is in flight and no hold is active
    pub fn begin(&mut self, now: Instant) -> Option<C> {
        if self.in_flight || self.is_held(now) {
            return None;
        }
        self.held_until = None;

        let command = self.queue.pop_front()?;
        self.in_flight = true;
        Some(command)
    }

    /// Mark the in-flight command done, optionally holding the queue until `hold`
    pub fn finish(&mut self, hold: Option<Instant>) {
        self.in_flight = false;
        self.held_until = hold;
    }

    /// Drop any hold so the next `begin` runs right away
    pub fn release(&mut self) {
        self.held_until = None;
    }

    pub fn is_held(&self, now: Instant) -> bool {
        matches!(self.held_until, Some(until) if now < until)
    }

    /// Nothing running and nothing waiting
    pub fn is_idle(&self) -> bool {
        !self.in_flight && self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Waiting commands, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let now = Instant::now();
        let mut queue = CommandSerializer::new();
        queue.submit(1);
        queue.submit(2);
        queue.submit(3);

        let mut seen = Vec::new();
        while let Some(cmd) = queue.begin(now) {
            seen.push(cmd);
            queue.finish(None);
        }
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_single_flight() {
        let now = Instant::now();
        let mut queue = CommandSerializer::new();
        queue.submit("delete a");
        queue.submit("delete b");

        assert_eq!(queue.begin(now), Some("delete a"));
        assert_eq!(queue.begin(now), None);
        assert_eq!(queue.pending(), 1);

        queue.finish(None);
        assert_eq!(queue.begin(now), Some("delete b"));
    }

    #[test]
    fn test_hold_delays_next_command() {
        let now = Instant::now();
        let mut queue = CommandSerializer::new();
        queue.submit("add");
        queue.submit("delete");

        assert_eq!(queue.begin(now), Some("add"));
        queue.finish(Some(now + Duration::from_millis(1500)));

        assert!(queue.is_held(now));
        assert_eq!(queue.begin(now + Duration::from_millis(1000)), None);
        assert_eq!(queue.begin(now + Duration::from_millis(1500)), Some("delete"));
    }

    #[test]
    fn test_release_lifts_hold() {
        let now = Instant::now();
        let mut queue = CommandSerializer::new();
        queue.submit("add");
        queue.submit("edit");

        assert_eq!(queue.begin(now), Some("add"));
        queue.finish(Some(now + Duration::from_millis(1500)));
        assert_eq!(queue.begin(now), None);

        queue.release();
        assert!(!queue.is_held(now));
        assert_eq!(queue.begin(now), Some("edit"));
    }
}
