use iced::Subscription;
use iced::advanced::subscription::{self, EventStream, Hasher, Recipe};
use iced::futures::StreamExt;
use iced::futures::channel::mpsc::{self, Sender};
use iced::futures::stream::{self, BoxStream};
use prompter_core::sync::DisplayCommand;
use std::any::TypeId;
use std::collections::VecDeque;
use std::hash::Hash;
use std::io::BufRead;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum InboxEvent {
    Command(DisplayCommand),
    /// A line that did not decode; carries the reason.
    Malformed(String),
    /// Stdin reached EOF: the primary window is gone.
    Closed,
}

impl InboxEvent {
    fn from_line(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }
        Some(match DisplayCommand::decode_line(line) {
            Ok(command) => InboxEvent::Command(command),
            Err(err) => InboxEvent::Malformed(err.to_string()),
        })
    }
}

/// Events waiting for the UI. Only the newest snapshot is kept; control
/// commands are never dropped.
#[derive(Debug, Default)]
struct InboxQueue {
    snapshot: Option<InboxEvent>,
    controls: VecDeque<InboxEvent>,
    closed: bool,
}

impl InboxQueue {
    fn push(&mut self, event: InboxEvent) {
        match event {
            InboxEvent::Command(DisplayCommand::Snapshot(_)) => {
                if self.snapshot.replace(event).is_some() {
                    trace!("Replaced pending snapshot");
                }
            }
            InboxEvent::Closed => self.closed = true,
            other => self.controls.push_back(other),
        }
    }

    /// Newest snapshot first, then controls in arrival order, then `Closed`.
    fn drain(&mut self) -> Vec<InboxEvent> {
        let mut events: Vec<InboxEvent> = self.snapshot.take().into_iter().collect();
        events.extend(self.controls.drain(..));
        if std::mem::take(&mut self.closed) {
            events.push(InboxEvent::Closed);
        }
        events
    }
}

fn lock(queue: &Mutex<InboxQueue>) -> MutexGuard<'_, InboxQueue> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Stdin of the external display process as a subscription.
struct StdinRecipe;

impl Recipe for StdinRecipe {
    type Output = InboxEvent;

    fn hash(&self, state: &mut Hasher) {
        TypeId::of::<Self>().hash(state);
    }

    fn stream(self: Box<Self>, _input: EventStream) -> BoxStream<'static, Self::Output> {
        let queue = Arc::new(Mutex::new(InboxQueue::default()));
        let (wake, woken) = mpsc::channel(1);
        let reader_queue = Arc::clone(&queue);
        let spawned = std::thread::Builder::new()
            .name("display-inbox".to_string())
            .spawn(move || forward_lines(std::io::stdin().lock(), &reader_queue, wake));
        match spawned {
            Ok(_) => woken
                .flat_map(move |()| stream::iter(lock(&queue).drain()))
                .boxed(),
            Err(err) => {
                warn!("Unable to start stdin reader: {err}");
                stream::iter([InboxEvent::Closed]).boxed()
            }
        }
    }
}

pub fn display_inbox() -> Subscription<InboxEvent> {
    subscription::from_recipe(StdinRecipe)
}

/// Queue every decoded line and wake the UI, then queue a final `Closed`.
/// A full wake channel means a drain is already pending.
fn forward_lines(reader: impl BufRead, queue: &Mutex<InboxQueue>, mut wake: Sender<()>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("Failed to read from stdin: {err}");
                break;
            }
        };
        let Some(event) = InboxEvent::from_line(&line) else {
            continue;
        };
        lock(queue).push(event);
        if let Err(err) = wake.try_send(()) {
            if err.is_disconnected() {
                debug!("Inbox receiver dropped; stopping stdin reader");
                return;
            }
        }
    }
    lock(queue).push(InboxEvent::Closed);
    let _ = wake.try_send(());
}
