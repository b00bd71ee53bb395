//! Frame-driven scroll advancement.
//!
//! The animator owns the paint position. Every frame moves it locally; the
//! store only sees the position at a bounded cadence so listeners (and the
//! external display publisher) are not flooded at frame rate.

use crate::store::{PlaybackPatch, PromptStore};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Pixels advanced per frame for each unit of speed.
pub const FRAME_ADVANCE_FACTOR: f32 = 0.8;
pub const WHEEL_FACTOR: f32 = 0.5;
pub const DEFAULT_COMMIT_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Idle,
    Advanced { position: f32, committed: bool },
    /// Reached the end; playback was stopped and the final position committed.
    Finished { position: f32 },
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    position: f32,
    /// Last position this animator wrote to the store.
    committed: f32,
    max_scroll: f32,
    commit_interval: Duration,
    last_commit: Option<Instant>,
    running: bool,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_COMMIT_INTERVAL)
    }
}

impl ScrollAnimator {
    pub fn new(commit_interval: Duration) -> Self {
        Self {
            position: 0.0,
            committed: 0.0,
            max_scroll: 0.0,
            commit_interval,
            last_commit: None,
            running: false,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the scrollable range already covered.
    pub fn progress(&self) -> f32 {
        if self.max_scroll > 0.0 {
            (self.position / self.max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn tick(&mut self, now: Instant, store: &mut PromptStore) -> FrameOutcome {
        let playback = &store.get().playback;
        if !playback.is_playing {
            self.running = false;
            return FrameOutcome::Idle;
        }
        if !self.running {
            self.running = true;
            self.last_commit = None;
        }

        let next = self.position + playback.speed * FRAME_ADVANCE_FACTOR;
        if next >= self.max_scroll {
            self.position = self.max_scroll;
            self.running = false;
            self.write_position(store, now, Some(false));
            debug!(position = self.position, "Reached end of script; playback stopped");
            return FrameOutcome::Finished {
                position: self.position,
            };
        }

        self.position = next;
        let due = self
            .last_commit
            .is_none_or(|last| now.saturating_duration_since(last) >= self.commit_interval);
        if due {
            self.write_position(store, now, None);
        }
        trace!(position = self.position, committed = due, "Scroll frame");
        FrameOutcome::Advanced {
            position: self.position,
            committed: due,
        }
    }

    /// Manual scroll. Moves and commits immediately without touching play state.
    pub fn wheel(&mut self, delta_y: f32, store: &mut PromptStore) -> f32 {
        if !delta_y.is_finite() {
            return self.position;
        }
        self.position = (self.position + delta_y * WHEEL_FACTOR).clamp(0.0, self.max_scroll);
        self.committed = self.position;
        store.update_playback(PlaybackPatch {
            scroll_position: Some(self.position),
            ..PlaybackPatch::default()
        });
        self.position
    }

    /// Bring the local position in line with the store after a change the
    /// animator did not make.
    pub fn reconcile(&mut self, store: &mut PromptStore) {
        let playback = &store.get().playback;
        let stored = playback.scroll_position;
        let is_playing = playback.is_playing;

        if stored != self.committed {
            self.position = stored.clamp(0.0, self.max_scroll);
            self.committed = stored;
            trace!(position = self.position, "Adopted external scroll position");
        }

        if is_playing && !self.running {
            self.running = true;
            self.last_commit = None;
        } else if !is_playing && self.running {
            self.running = false;
            self.last_commit = None;
            if self.position != stored {
                self.committed = self.position;
                store.update_playback(PlaybackPatch {
                    scroll_position: Some(self.position),
                    ..PlaybackPatch::default()
                });
            }
        }
    }

    /// New scroll bound after a layout or viewport change.
    pub fn set_max_scroll(&mut self, max_scroll: f32, store: &mut PromptStore) {
        self.max_scroll = if max_scroll.is_finite() {
            max_scroll.max(0.0)
        } else {
            0.0
        };
        if self.position > self.max_scroll {
            self.position = self.max_scroll;
        }
        if store.get().playback.scroll_position > self.max_scroll {
            self.committed = self.position;
            store.update_playback(PlaybackPatch {
                scroll_position: Some(self.position),
                ..PlaybackPatch::default()
            });
        }
    }

    fn write_position(&mut self, store: &mut PromptStore, now: Instant, is_playing: Option<bool>) {
        self.committed = self.position;
        self.last_commit = Some(now);
        store.update_playback(PlaybackPatch {
            is_playing,
            scroll_position: Some(self.position),
            ..PlaybackPatch::default()
        });
    }
}
