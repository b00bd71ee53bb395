//! Replication of playback state from the primary window to the external
//! display process.
//!
//! The primary side ([`SyncPublisher`]) watches the store through a change
//! flag and writes snapshots through a [`WindowHost`]. The external side
//! ([`SnapshotReceiver`]) decodes them and commits each one to its own store.

pub mod host;
pub mod receiver;
pub mod schedule;
pub mod signal;
pub mod snapshot;
pub mod transport;

pub use host::{DetachedHost, HostError, SecondaryStatus, WindowHost};
pub use receiver::{ApplyOutcome, SnapshotReceiver};
pub use schedule::{SendReason, SyncSchedule};
pub use signal::ChangeSignal;
pub use snapshot::{DisplayCommand, SNAPSHOT_SCHEMA_VERSION, SnapshotError, SyncSnapshot};
pub use transport::SyncPublisher;

#[cfg(test)]
pub(crate) mod testing {
    use super::host::{HostError, SecondaryStatus, WindowHost};
    use super::snapshot::DisplayCommand;

    /// In-memory host that keeps every command it was asked to deliver.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub(crate) open: bool,
        pub(crate) created: usize,
        pub(crate) sent: Vec<DisplayCommand>,
        closed_by_user: bool,
    }

    impl RecordingHost {
        pub(crate) fn simulate_user_close(&mut self) {
            self.open = false;
            self.closed_by_user = true;
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.sent
                .iter()
                .map(|command| command.encode_line().expect("encode recorded command"))
                .collect()
        }
    }

    impl WindowHost for RecordingHost {
        fn create_secondary(&mut self) -> Result<SecondaryStatus, HostError> {
            if self.open {
                return Ok(SecondaryStatus::Focused);
            }
            self.open = true;
            self.created += 1;
            Ok(SecondaryStatus::Created)
        }

        fn close_secondary(&mut self) {
            self.open = false;
        }

        fn send_to_secondary(&mut self, command: &DisplayCommand) -> Result<(), HostError> {
            if !self.open {
                return Err(HostError::Closed);
            }
            self.sent.push(command.clone());
            Ok(())
        }

        fn poll_closed(&mut self) -> bool {
            std::mem::take(&mut self.closed_by_user)
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }
}
