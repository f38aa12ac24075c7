//! Cancellable one-shot timers keyed by purpose.
//!
//! The engine is driven by a host clock in milliseconds. Scheduling a key
//! that is already pending replaces its deadline, so a burst of offset
//! changes leaves exactly one debounce pending: the latest wins.

/// A set of pending one-shot timers.
#[derive(Debug, Clone)]
pub struct TimerSet<K> {
    /// `(key, deadline, sequence)`; the sequence breaks deadline ties in
    /// scheduling order.
    entries: Vec<(K, u64, u64)>,
    next_seq: u64,
}

impl<K> Default for TimerSet<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<K: Copy + PartialEq> TimerSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key` to fire `delay_ms` after `now`, replacing any pending
    /// deadline for the same key.
    pub fn schedule(&mut self, key: K, now: u64, delay_ms: u64) {
        self.cancel(key);
        let deadline = now.saturating_add(delay_ms);
        self.entries.push((key, deadline, self.next_seq));
        self.next_seq += 1;
    }

    /// Cancel `key`. Returns whether it was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _, _)| *k != key);
        self.entries.len() != before
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|(_, d, _)| *d).min()
    }

    /// Remove and return the earliest timer due at `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<K> {
        let (idx, _) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (_, deadline, _))| *deadline <= now)
            .min_by_key(|(_, (_, deadline, seq))| (*deadline, *seq))?;
        Some(self.entries.remove(idx).0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Debounce,
        Settle,
    }

    #[test]
    fn fires_at_deadline() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Debounce, 100, 700);
        assert_eq!(t.pop_due(799), None);
        assert_eq!(t.pop_due(800), Some(Kind::Debounce));
        assert!(t.is_empty());
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Debounce, 0, 700);
        t.schedule(Kind::Debounce, 300, 700);
        assert_eq!(t.next_deadline(), Some(1000));
        assert_eq!(t.pop_due(700), None);
        assert_eq!(t.pop_due(1000), Some(Kind::Debounce));
        assert_eq!(t.pop_due(5000), None);
    }

    #[test]
    fn cancel_reports_pending() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Settle, 0, 500);
        assert!(t.cancel(Kind::Settle));
        assert!(!t.cancel(Kind::Settle));
        assert!(t.is_empty());
    }

    #[test]
    fn due_timers_pop_in_deadline_order() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Settle, 0, 500);
        t.schedule(Kind::Debounce, 0, 100);
        assert_eq!(t.next_deadline(), Some(100));
        assert_eq!(t.pop_due(1000), Some(Kind::Debounce));
        assert_eq!(t.pop_due(1000), Some(Kind::Settle));
    }

    #[test]
    fn ties_pop_in_scheduling_order() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Settle, 0, 100);
        t.schedule(Kind::Debounce, 0, 100);
        assert_eq!(t.pop_due(100), Some(Kind::Settle));
        assert_eq!(t.pop_due(100), Some(Kind::Debounce));
    }

    #[test]
    fn deadline_saturates() {
        let mut t = TimerSet::new();
        t.schedule(Kind::Settle, u64::MAX - 1, 10);
        assert_eq!(t.next_deadline(), Some(u64::MAX));
    }
}
