use super::host::{HostError, SecondaryStatus, WindowHost};
use super::schedule::{SendReason, SyncSchedule};
use super::signal::ChangeSignal;
use super::snapshot::{DisplayCommand, SyncSnapshot};
use crate::store::{AppState, PromptStore, SubscriptionId};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Primary-side replication to the external display.
///
/// While the display is open the publisher holds one store subscription whose
/// only job is to raise a [`ChangeSignal`]; [`SyncPublisher::poll`] turns that
/// flag into debounced snapshot sends and adds the heartbeat.
pub struct SyncPublisher<H> {
    host: H,
    schedule: SyncSchedule,
    signal: ChangeSignal,
    subscription: Option<SubscriptionId>,
    seq: u64,
}

impl<H: WindowHost> SyncPublisher<H> {
    pub fn new(host: H, schedule: SyncSchedule) -> Self {
        Self {
            host,
            schedule,
            signal: ChangeSignal::new(),
            subscription: None,
            seq: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some() && self.host.is_open()
    }

    /// Still subscribed to the store, even if the host has gone quiet.
    /// [`SyncPublisher::poll`] detaches once it notices.
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    /// Open the display, or bring it forward if it is already open.
    pub fn open_secondary(
        &mut self,
        store: &mut PromptStore,
        now: Instant,
    ) -> Result<SecondaryStatus, HostError> {
        if self.is_open() {
            if let Err(err) = self.host.send_to_secondary(&DisplayCommand::Focus) {
                debug!("Focus request not delivered: {err}");
            }
            return Ok(SecondaryStatus::Focused);
        }
        self.detach(store);

        let status = match self.host.create_secondary() {
            Ok(status) => status,
            Err(err) => {
                warn!("Unable to open external display: {err}");
                return Err(err);
            }
        };

        let signal = self.signal.clone();
        self.subscription = Some(store.subscribe(move |_| signal.raise()));
        self.signal.take();
        self.schedule.start(now);
        self.send_snapshot(store.get(), "initial");
        info!(seq = self.seq, "External display attached");
        Ok(status)
    }

    pub fn close_secondary(&mut self, store: &mut PromptStore) {
        if self.host.is_open() {
            if let Err(err) = self.host.send_to_secondary(&DisplayCommand::Shutdown) {
                debug!("Shutdown request not delivered: {err}");
            }
            self.host.close_secondary();
        }
        if self.subscription.is_some() {
            info!("External display closed from the primary window");
        }
        self.detach(store);
    }

    /// Drive the schedule. Returns the reason if a snapshot went out.
    pub fn poll(&mut self, store: &mut PromptStore, now: Instant) -> Option<SendReason> {
        self.subscription?;

        if self.host.poll_closed() || !self.host.is_open() {
            info!("External display went away; detaching");
            self.detach(store);
            return None;
        }

        if self.signal.take() {
            self.schedule.note_change(now);
        }
        let reason = self.schedule.poll(now)?;
        let label = match reason {
            SendReason::Change => "change",
            SendReason::Heartbeat => "heartbeat",
        };
        self.send_snapshot(store.get(), label);
        Some(reason)
    }

    fn send_snapshot(&mut self, state: &AppState, reason: &'static str) {
        self.seq += 1;
        let command = DisplayCommand::Snapshot(SyncSnapshot::capture(state, self.seq));
        match self.host.send_to_secondary(&command) {
            Ok(()) => debug!(seq = self.seq, reason, "Sent snapshot"),
            Err(err) => debug!(seq = self.seq, reason, "Snapshot not delivered: {err}"),
        }
    }

    fn detach(&mut self, store: &mut PromptStore) {
        if let Some(id) = self.subscription.take() {
            store.unsubscribe(id);
        }
        self.schedule.reset();
        self.signal.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::host::DetachedHost;
    use crate::sync::testing::RecordingHost;
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn snapshot_seqs(host: &RecordingHost) -> Vec<u64> {
        host.sent
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::Snapshot(snapshot) => Some(snapshot.seq),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn opening_sends_an_immediate_snapshot_and_reopen_only_focuses() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let now = Instant::now();

        assert_eq!(
            publisher.open_secondary(&mut store, now).expect("open"),
            SecondaryStatus::Created
        );
        assert_eq!(
            publisher.open_secondary(&mut store, now).expect("refocus"),
            SecondaryStatus::Focused
        );

        let host = publisher.host();
        assert_eq!(host.created, 1);
        assert_eq!(snapshot_seqs(host), vec![1]);
        assert_eq!(host.sent.last(), Some(&DisplayCommand::Focus));
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn store_changes_are_debounced() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let start = Instant::now();
        publisher.open_secondary(&mut store, start).expect("open");

        for step in 0..4 {
            store.speed_up();
            assert_eq!(publisher.poll(&mut store, start + ms(step * 4)), None);
        }
        assert_eq!(
            publisher.poll(&mut store, start + ms(30)),
            Some(SendReason::Change)
        );
        assert_eq!(publisher.poll(&mut store, start + ms(40)), None);

        let host = publisher.host();
        assert_eq!(snapshot_seqs(host), vec![1, 2]);
        let Some(DisplayCommand::Snapshot(latest)) = host.sent.last() else {
            panic!("expected a snapshot");
        };
        assert_eq!(latest.playback.speed, 4.0);
    }

    #[test]
    fn heartbeat_resends_without_changes() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let start = Instant::now();
        publisher.open_secondary(&mut store, start).expect("open");

        assert_eq!(publisher.poll(&mut store, start + ms(250)), None);
        assert_eq!(
            publisher.poll(&mut store, start + ms(500)),
            Some(SendReason::Heartbeat)
        );
        assert_eq!(snapshot_seqs(publisher.host()), vec![1, 2]);
    }

    #[test]
    fn external_close_unsubscribes_and_stops_sending() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let start = Instant::now();
        publisher.open_secondary(&mut store, start).expect("open");

        publisher.host.simulate_user_close();
        assert_eq!(publisher.poll(&mut store, start + ms(5)), None);
        assert_eq!(store.listener_count(), 0);
        assert!(!publisher.is_open());

        store.toggle_play();
        assert_eq!(publisher.poll(&mut store, start + ms(600)), None);
        assert_eq!(snapshot_seqs(publisher.host()), vec![1]);
    }

    #[test]
    fn reopening_after_close_creates_a_fresh_window() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let start = Instant::now();
        publisher.open_secondary(&mut store, start).expect("open");
        publisher.close_secondary(&mut store);
        assert_eq!(store.listener_count(), 0);

        assert_eq!(
            publisher.open_secondary(&mut store, start + ms(100)).expect("reopen"),
            SecondaryStatus::Created
        );
        let host = publisher.host();
        assert_eq!(host.created, 2);
        assert!(host.sent.contains(&DisplayCommand::Shutdown));
        assert_eq!(snapshot_seqs(host), vec![1, 2]);
    }

    #[test]
    fn reopening_a_silently_dead_host_keeps_one_listener() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(RecordingHost::default(), SyncSchedule::default());
        let start = Instant::now();
        publisher.open_secondary(&mut store, start).expect("open");

        // Pipe broke; no close notification was observed yet.
        publisher.host.open = false;
        assert!(publisher.is_attached());
        assert!(!publisher.is_open());

        publisher.open_secondary(&mut store, start + ms(50)).expect("reopen");
        assert_eq!(store.listener_count(), 1);
        assert_eq!(publisher.host().created, 2);
    }

    #[test]
    fn detached_host_is_a_quiet_noop() {
        let mut store = PromptStore::default();
        let mut publisher = SyncPublisher::new(DetachedHost, SyncSchedule::default());
        let now = Instant::now();

        assert!(matches!(
            publisher.open_secondary(&mut store, now),
            Err(HostError::Unavailable)
        ));
        assert_eq!(store.listener_count(), 0);
        store.toggle_play();
        assert_eq!(publisher.poll(&mut store, now + ms(1_000)), None);
        publisher.close_secondary(&mut store);
    }
}
