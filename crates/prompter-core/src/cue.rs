//! Jumping between `>>>` cue points.

use crate::model::CueDirection;
use crate::store::{PlaybackPatch, PromptStore};
use tracing::debug;

/// Markers closer than this to the current position count as "here".
pub const CUE_EPSILON: f32 = 20.0;

/// Where a navigation request should land, or `None` to stay put.
///
/// `offsets` are marker centres in document order.
pub fn resolve_cue_target(direction: CueDirection, offsets: &[f32], current: f32) -> Option<f32> {
    let (first, last) = (offsets.first()?, offsets.last()?);
    match direction {
        CueDirection::Next => offsets
            .iter()
            .copied()
            .find(|offset| *offset > current + CUE_EPSILON)
            .or_else(|| (current >= *last).then_some(*first)),
        CueDirection::Prev => Some(
            offsets
                .iter()
                .rev()
                .copied()
                .find(|offset| *offset < current - CUE_EPSILON)
                .unwrap_or(0.0),
        ),
    }
}

/// Applies each store-issued cue request exactly once.
#[derive(Debug, Clone, Default)]
pub struct CueNavigator {
    last_request: Option<u64>,
}

impl CueNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position written to the store, if a jump happened.
    pub fn process(
        &mut self,
        store: &mut PromptStore,
        offsets: &[f32],
        max_scroll: f32,
    ) -> Option<f32> {
        let action = store.get().playback.cue_action?;
        if self.last_request == Some(action.request_id) {
            return None;
        }
        self.last_request = Some(action.request_id);

        let current = store.get().playback.scroll_position;
        // Markers past the scroll bound are reached at the bound, so the last
        // one still counts as "here" and Next can wrap.
        let bound = max_scroll.max(0.0);
        let reachable: Vec<f32> = offsets
            .iter()
            .map(|offset| offset.clamp(0.0, bound))
            .collect();
        let Some(target) = resolve_cue_target(action.direction, &reachable, current) else {
            debug!(
                request_id = action.request_id,
                markers = offsets.len(),
                "No cue target; staying put"
            );
            return None;
        };
        let target = target.clamp(0.0, bound);
        debug!(
            request_id = action.request_id,
            direction = ?action.direction,
            from = current,
            to = target,
            "Jumping to cue"
        );
        store.update_playback(PlaybackPatch {
            is_playing: Some(false),
            scroll_position: Some(target),
            ..PlaybackPatch::default()
        });
        Some(target)
    }
}
