use super::super::state::App;
use prompter_core::{CueDirection, FrameOutcome, PlaybackPatch};
use std::time::Instant;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_toggle_play_pause(&mut self) {
        self.store.toggle_play();
        info!(
            playing = self.store.get().playback.is_playing,
            position = self.animator.position(),
            "Toggled playback"
        );
    }

    pub(super) fn handle_speed_up(&mut self) {
        self.store.speed_up();
        debug!(speed = self.store.get().playback.speed, "Speed up");
    }

    pub(super) fn handle_slow_down(&mut self) {
        self.store.slow_down();
        debug!(speed = self.store.get().playback.speed, "Slow down");
    }

    pub(super) fn handle_set_speed(&mut self, speed: f32) {
        self.store.update_playback(PlaybackPatch {
            speed: Some(speed),
            ..PlaybackPatch::default()
        });
    }

    pub(super) fn handle_reset_playback(&mut self) {
        self.store.reset_playback();
        info!("Playback reset");
    }

    pub(super) fn handle_next_cue(&mut self) {
        self.store.trigger_cue(CueDirection::Next);
    }

    pub(super) fn handle_prev_cue(&mut self) {
        self.store.trigger_cue(CueDirection::Prev);
    }

    pub(super) fn handle_frame(&mut self, now: Instant) {
        if let FrameOutcome::Finished { position } = self.animator.tick(now, &mut self.store) {
            info!(position, "Reached end of script");
        }
    }

    pub(super) fn handle_elapsed_tick(&mut self) {
        self.store.tick_elapsed();
    }

    pub(super) fn handle_wheel(&mut self, delta_y: f32) {
        if self.editor.visible {
            return;
        }
        self.animator.wheel(delta_y, &mut self.store);
    }

    /// Clicking a cue label starts or pauses playback.
    pub(super) fn handle_marker_clicked(&mut self, index: usize) {
        debug!(index, "Cue marker clicked");
        self.store.toggle_play();
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::messages::Message;
    use super::super::super::state::fixtures::build_test_app;
    use prompter_core::animator::FRAME_ADVANCE_FACTOR;
    use std::time::{Duration, Instant};

    #[test]
    fn frames_advance_only_while_playing() {
        let mut app = build_test_app();
        let start = Instant::now();
        let _ = app.reduce(Message::Frame(start));
        assert_eq!(app.paint_position(), 0.0);

        let _ = app.reduce(Message::TogglePlayPause);
        let _ = app.reduce(Message::Frame(start + Duration::from_millis(16)));
        let step = app.store.get().playback.speed * FRAME_ADVANCE_FACTOR;
        assert!((app.paint_position() - step).abs() < 1e-4);
        assert!((app.store.get().playback.scroll_position - step).abs() < 1e-4);
    }

    #[test]
    fn playback_stops_at_the_end() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::TogglePlayPause);
        for _ in 0..10 {
            let _ = app.reduce(Message::SpeedUp);
        }
        let mut now = Instant::now();
        for _ in 0..20_000 {
            if !app.store.get().playback.is_playing {
                break;
            }
            now += Duration::from_millis(16);
            let _ = app.reduce(Message::Frame(now));
        }
        let playback = &app.store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.scroll_position, app.animator.max_scroll());
    }

    #[test]
    fn reset_returns_to_top_and_clears_timer() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::TogglePlayPause);
        let _ = app.reduce(Message::ElapsedTick);
        let _ = app.reduce(Message::Wheel(400.0));
        assert!(app.paint_position() > 0.0);

        let _ = app.reduce(Message::ResetPlayback);
        let playback = &app.store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.elapsed_time, 0);
        assert_eq!(app.paint_position(), 0.0);
    }

    #[test]
    fn next_cue_jumps_to_first_marker_and_pauses() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::TogglePlayPause);
        let _ = app.reduce(Message::NextCue);

        let first = app.surface.marker_centers[0].min(app.animator.max_scroll());
        let playback = &app.store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.scroll_position, first);
        assert_eq!(app.paint_position(), first);
    }

    #[test]
    fn marker_click_toggles_playback() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::MarkerClicked(1));
        assert!(app.store.get().playback.is_playing);
        let _ = app.reduce(Message::MarkerClicked(1));
        assert!(!app.store.get().playback.is_playing);
    }
}
