use super::super::state::{App, now_ms};
use super::Effect;
use crate::external::InboxEvent;
use prompter_core::sync::{ApplyOutcome, HostError, SecondaryStatus};
use std::time::Instant;
use tracing::{debug, info, trace};

impl App {
    pub(super) fn open_external_display(&mut self, now: Instant) {
        let Some(publisher) = self.publisher.as_mut() else {
            return;
        };
        self.ui.status = Some(match publisher.open_secondary(&mut self.store, now) {
            Ok(SecondaryStatus::Created) => "External display opened".to_string(),
            Ok(SecondaryStatus::Focused) => "External display already open".to_string(),
            Err(HostError::Unavailable) => "No external display available".to_string(),
            Err(err) => format!("Could not open external display: {err}"),
        });
    }

    pub(super) fn close_external_display(&mut self) {
        let Some(publisher) = self.publisher.as_mut() else {
            return;
        };
        if publisher.is_attached() {
            publisher.close_secondary(&mut self.store);
            self.ui.status = Some("External display closed".to_string());
        }
    }

    pub(super) fn handle_sync_tick(&mut self, now: Instant) {
        let Some(publisher) = self.publisher.as_mut() else {
            return;
        };
        if let Some(reason) = publisher.poll(&mut self.store, now) {
            trace!(?reason, seq = publisher.last_seq(), "Published snapshot");
        }
        if !publisher.is_attached() {
            self.ui.status = Some("External display closed".to_string());
        }
    }

    /// External side: apply one command from the primary.
    pub(super) fn handle_display_inbox(&mut self, event: InboxEvent, effects: &mut Vec<Effect>) {
        let command = match event {
            InboxEvent::Command(command) => command,
            InboxEvent::Malformed(reason) => {
                debug!(%reason, "Rejected display command");
                return;
            }
            InboxEvent::Closed => {
                info!("Primary window went away; closing external display");
                effects.push(Effect::QuitSafely);
                return;
            }
        };
        match self.receiver.handle(command, &mut self.store, now_ms()) {
            ApplyOutcome::Applied { seq } => trace!(seq, "Applied snapshot"),
            ApplyOutcome::Stale { seq, last_applied } => {
                debug!(seq, last_applied, "Ignored stale snapshot");
            }
            ApplyOutcome::Focus => effects.push(Effect::FocusWindow),
            ApplyOutcome::Shutdown => {
                info!("Shutdown requested by the primary window");
                effects.push(Effect::QuitSafely);
            }
            ApplyOutcome::Rejected => debug!("Rejected display command"),
        }
    }
}
