//! Keyed scheduled tasks.
//!
//! Each key has at most one pending deadline. Scheduling a key again replaces
//! the previous deadline, so a stale callback can never fire after state has
//! moved on. Owners drain due keys from their own `tick(now)`.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Timers<K> {
    pending: Vec<(K, Instant)>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `key` to fire at `at`, replacing any pending task for it
    pub fn schedule(&mut self, key: K, at: Instant) {
        match self.pending.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = at,
            None => self.pending.push((key, at)),
        }
    }

    /// Schedule `key` to fire `delay` after `now`
    pub fn schedule_in(&mut self, key: K, now: Instant, delay: Duration) {
        self.schedule(key, now + delay);
    }

    /// Cancel a pending task. Returns whether one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != key);
        self.pending.len() != before
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest task due at `now`.
    /// Ties fire in the order keys were first scheduled; rescheduling a
    /// pending key keeps its place.
    pub fn pop_due(&mut self, now: Instant) -> Option<K> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= now)
            .min_by_key(|(_, (_, at))| *at)
            .map(|(idx, _)| idx)?;
        Some(self.pending.remove(idx).0)
    }

    /// Remove and return the key together with its deadline
    pub fn pop_due_with_deadline(&mut self, now: Instant) -> Option<(K, Instant)> {
        let at = self.next_deadline().filter(|at| *at <= now)?;
        self.pop_due(now).map(|key| (key, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Decay,
        Unlock,
    }

    #[test]
    fn test_schedule_replaces_same_key() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule_in(Task::Decay, t0, Duration::from_millis(300));
        timers.schedule_in(Task::Decay, t0, Duration::from_millis(500));

        assert_eq!(timers.pop_due(t0 + Duration::from_millis(300)), None);
        assert_eq!(timers.pop_due(t0 + Duration::from_millis(500)), Some(Task::Decay));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_pop_due_in_deadline_order() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule_in(Task::Unlock, t0, Duration::from_millis(1200));
        timers.schedule_in(Task::Decay, t0, Duration::from_millis(300));

        let late = t0 + Duration::from_secs(2);
        assert_eq!(timers.pop_due(late), Some(Task::Decay));
        assert_eq!(timers.pop_due(late), Some(Task::Unlock));
        assert_eq!(timers.pop_due(late), None);
    }

    #[test]
    fn test_ties_keep_first_scheduled_order() {
        let t0 = Instant::now();
        let at = t0 + Duration::from_millis(200);
        let mut timers = Timers::new();
        timers.schedule(Task::Decay, t0);
        timers.schedule(Task::Unlock, at);
        timers.schedule(Task::Decay, at);

        assert_eq!(timers.pop_due(at), Some(Task::Decay));
        assert_eq!(timers.pop_due(at), Some(Task::Unlock));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut timers = Timers::new();
        timers.schedule_in(Task::Decay, t0, Duration::from_millis(300));
        assert!(timers.cancel(Task::Decay));
        assert!(!timers.cancel(Task::Decay));
        assert_eq!(timers.next_deadline(), None);
    }
}
