use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(16);
pub const DEFAULT_HEARTBEAT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendReason {
    Change,
    Heartbeat,
}

/// Trailing debounce for store changes plus a fixed heartbeat.
///
/// The two run independently: a burst of changes collapses into one send
/// once the store has been quiet for `debounce`, and a full snapshot goes out
/// every `heartbeat` regardless.
#[derive(Debug, Clone)]
pub struct SyncSchedule {
    debounce: Duration,
    heartbeat: Duration,
    pending_until: Option<Instant>,
    last_heartbeat: Option<Instant>,
}

impl Default for SyncSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, DEFAULT_HEARTBEAT)
    }
}

impl SyncSchedule {
    pub fn new(debounce: Duration, heartbeat: Duration) -> Self {
        Self {
            debounce,
            heartbeat: heartbeat.max(Duration::from_millis(1)),
            pending_until: None,
            last_heartbeat: None,
        }
    }

    /// Start the heartbeat clock.
    pub fn start(&mut self, now: Instant) {
        self.pending_until = None;
        self.last_heartbeat = Some(now);
    }

    pub fn reset(&mut self) {
        self.pending_until = None;
        self.last_heartbeat = None;
    }

    pub fn is_active(&self) -> bool {
        self.last_heartbeat.is_some()
    }

    pub fn has_pending_change(&self) -> bool {
        self.pending_until.is_some()
    }

    /// Record a change; restarts the debounce window.
    pub fn note_change(&mut self, now: Instant) {
        if self.is_active() {
            self.pending_until = Some(now + self.debounce);
        }
    }

    pub fn poll(&mut self, now: Instant) -> Option<SendReason> {
        let last_heartbeat = self.last_heartbeat?;
        if self.pending_until.is_some_and(|deadline| now >= deadline) {
            self.pending_until = None;
            return Some(SendReason::Change);
        }
        if now.saturating_duration_since(last_heartbeat) >= self.heartbeat {
            self.last_heartbeat = Some(now);
            return Some(SendReason::Heartbeat);
        }
        None
    }
}
