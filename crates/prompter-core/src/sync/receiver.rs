use super::snapshot::{DisplayCommand, SyncSnapshot};
use crate::store::PromptStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { seq: u64 },
    Stale { seq: u64, last_applied: u64 },
    Focus,
    Shutdown,
    Rejected,
}

/// External-display side: commits incoming snapshots to the local store.
#[derive(Debug, Clone, Default)]
pub struct SnapshotReceiver {
    last_seq: Option<u64>,
}

impl SnapshotReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    pub fn apply(
        &mut self,
        snapshot: SyncSnapshot,
        store: &mut PromptStore,
        now_ms: u64,
    ) -> ApplyOutcome {
        if let Some(last_applied) = self.last_seq {
            if snapshot.seq <= last_applied {
                debug!(seq = snapshot.seq, last_applied, "Dropping stale snapshot");
                return ApplyOutcome::Stale {
                    seq: snapshot.seq,
                    last_applied,
                };
            }
        }
        if let Err(err) = snapshot.validate() {
            warn!(seq = snapshot.seq, "Rejected snapshot: {err}");
            return ApplyOutcome::Rejected;
        }

        let seq = snapshot.seq;
        self.last_seq = Some(seq);
        store.apply_snapshot(
            snapshot.playback,
            snapshot.settings,
            snapshot.active_script_id,
            snapshot.script_content,
            now_ms,
        );
        ApplyOutcome::Applied { seq }
    }

    pub fn receive_line(&mut self, line: &str, store: &mut PromptStore, now_ms: u64) -> ApplyOutcome {
        if line.trim().is_empty() {
            return ApplyOutcome::Rejected;
        }
        match DisplayCommand::decode_line(line) {
            Ok(command) => self.handle(command, store, now_ms),
            Err(err) => {
                warn!("Ignoring display command: {err}");
                ApplyOutcome::Rejected
            }
        }
    }

    /// Apply an already decoded command.
    pub fn handle(
        &mut self,
        command: DisplayCommand,
        store: &mut PromptStore,
        now_ms: u64,
    ) -> ApplyOutcome {
        match command {
            DisplayCommand::Snapshot(snapshot) => self.apply(snapshot, store, now_ms),
            DisplayCommand::Focus => ApplyOutcome::Focus,
            DisplayCommand::Shutdown => ApplyOutcome::Shutdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::ScrollAnimator;
    use crate::model::SYNCED_SCRIPT_NAME;
    use crate::store::AppState;
    use crate::sync::schedule::SyncSchedule;
    use crate::sync::testing::RecordingHost;
    use crate::sync::transport::SyncPublisher;
    use std::time::{Duration, Instant};

    fn deliver(
        publisher: &SyncPublisher<RecordingHost>,
        receiver: &mut SnapshotReceiver,
        store: &mut PromptStore,
    ) -> Vec<ApplyOutcome> {
        publisher
            .host()
            .lines()
            .iter()
            .map(|line| receiver.receive_line(line, store, 0))
            .collect()
    }

    #[test]
    fn stale_snapshots_are_dropped() {
        let mut store = PromptStore::default();
        let mut receiver = SnapshotReceiver::new();
        let mut newer = SyncSnapshot::capture(&AppState::default(), 5);
        newer.playback.scroll_position = 50.0;
        let mut older = SyncSnapshot::capture(&AppState::default(), 4);
        older.playback.scroll_position = 10.0;

        assert_eq!(
            receiver.apply(newer, &mut store, 0),
            ApplyOutcome::Applied { seq: 5 }
        );
        assert_eq!(
            receiver.apply(older, &mut store, 0),
            ApplyOutcome::Stale {
                seq: 4,
                last_applied: 5
            }
        );
        assert_eq!(store.get().playback.scroll_position, 50.0);
    }

    #[test]
    fn rejected_lines_leave_the_store_untouched() {
        let mut store = PromptStore::default();
        let mut receiver = SnapshotReceiver::new();
        let line = r#"{"kind":"snapshot","version":9,"seq":1}"#;

        assert_eq!(receiver.receive_line(line, &mut store, 0), ApplyOutcome::Rejected);
        assert_eq!(receiver.receive_line("", &mut store, 0), ApplyOutcome::Rejected);
        assert_eq!(store.revision(), 0);
        assert_eq!(receiver.last_seq(), None);
    }

    #[test]
    fn control_lines_are_reported() {
        let mut store = PromptStore::default();
        let mut receiver = SnapshotReceiver::new();
        assert_eq!(
            receiver.receive_line(r#"{"kind":"focus"}"#, &mut store, 0),
            ApplyOutcome::Focus
        );
        assert_eq!(
            receiver.receive_line(r#"{"kind":"shutdown"}"#, &mut store, 0),
            ApplyOutcome::Shutdown
        );
    }

    #[test]
    fn play_and_one_frame_reach_the_external_store() {
        let mut primary = PromptStore::default();
        let mut external = PromptStore::default();
        let mut animator = ScrollAnimator::default();
        animator.set_max_scroll(5_000.0, &mut primary);
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let mut receiver = SnapshotReceiver::new();
        let start = Instant::now();
        publisher.open_secondary(&mut primary, start).expect("open");

        primary.toggle_play();
        animator.tick(start, &mut primary);
        publisher.poll(&mut primary, start);
        publisher.poll(&mut primary, start + Duration::from_millis(20));

        let outcomes = deliver(&publisher, &mut receiver, &mut external);
        assert_eq!(
            outcomes.last(),
            Some(&ApplyOutcome::Applied { seq: 2 })
        );
        assert!(external.get().playback.is_playing);
        assert_eq!(external.get().playback.scroll_position, 1.6);
    }

    #[test]
    fn unknown_active_script_becomes_a_placeholder() {
        let mut primary = PromptStore::default();
        let mut external = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let mut receiver = SnapshotReceiver::new();
        let start = Instant::now();

        let id = primary.import_script("Keynote".to_string(), "Hello >>> there".to_string(), 500);
        publisher.open_secondary(&mut primary, start).expect("open");
        deliver(&publisher, &mut receiver, &mut external);

        let state = external.get();
        assert_eq!(state.active_script_id, id);
        let script = state.active_script().expect("placeholder script");
        assert_eq!(script.name, SYNCED_SCRIPT_NAME);
        assert_eq!(script.content, "Hello >>> there");
        assert_eq!(external.revision(), 1);
    }

    #[test]
    fn known_active_script_gets_its_content_patched() {
        let mut external = PromptStore::default();
        let mut receiver = SnapshotReceiver::new();
        let mut snapshot = SyncSnapshot::capture(&AppState::default(), 1);
        snapshot.playback.scroll_position = 120.0;
        snapshot.active_script_id = "1".to_string();
        snapshot.script_content = Some("X".to_string());

        assert_eq!(
            receiver.apply(snapshot, &mut external, 0),
            ApplyOutcome::Applied { seq: 1 }
        );
        let state = external.get();
        assert_eq!(state.scripts.len(), 1);
        assert_eq!(state.active_script_id, "1");
        assert_eq!(state.active_content(), "X");
        assert_eq!(state.playback.scroll_position, 120.0);
        assert_eq!(external.revision(), 1);
    }
}
