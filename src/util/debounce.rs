// src/util/debounce.rs

use std::time::{Duration, Instant};

/// Holds the last committed value and at most one pending value.
///
/// Every `push` restarts the delay and replaces whatever was pending. `poll`
/// commits the pending value once its deadline has passed, and only reports
/// it when it differs from the previous commit.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    committed: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            committed: initial,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {}
            _ => return None,
        }

        let (value, _) = self.pending.take()?;
        if value == self.committed {
            return None;
        }
        self.committed = value.clone();
        Some(value)
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(450);

    #[test]
    fn test_commits_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        debouncer.push("adm".to_string(), start);
        assert_eq!(debouncer.poll(start + Duration::from_millis(449)), None);
        assert_eq!(
            debouncer.poll(start + DELAY),
            Some("adm".to_string())
        );
        assert_eq!(debouncer.committed(), "adm");
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_keystroke_restarts_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(String::new(), DELAY);

        debouncer.push("a".to_string(), start);
        debouncer.push("ad".to_string(), start + Duration::from_millis(300));

        // First deadline has passed, but the restart pushed it out
        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(750)),
            Some("ad".to_string())
        );
    }

    #[test]
    fn test_unchanged_value_is_not_reported() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new("admin".to_string(), DELAY);

        debouncer.push("admi".to_string(), start);
        debouncer.push("admin".to_string(), start + Duration::from_millis(100));

        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
        assert!(!debouncer.is_pending());
    }
}
