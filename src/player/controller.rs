//! プレイヤーコントローラ
//!
//! Owns the player state and turns every operation into the widget commands
//! to emit. The Tauri layer stays a thin shell and the playback logic tests
//! without a webview. Commands are fire-and-forget: `is_playing` only flips
//! once the widget reports its own state change.

use rand::Rng;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::types::{PlayerState, Preferences, WidgetCommand, WidgetPlaybackState};

pub struct PlayerController {
    state: PlayerState,
    ready: bool,
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            state: PlayerState::default(),
            ready: false,
        }
    }

    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn snapshot(&self) -> PlayerState {
        self.state.clone()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Restore persisted preferences; the preset list seeds the playlist.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        self.state.volume = prefs.volume.clamp(0.0, 1.0);
        self.state.muted = prefs.muted;
        self.state.repeat = prefs.repeat;
        self.state.shuffle = prefs.shuffle;
        if self.state.playlist.is_empty() {
            self.state.playlist = prefs
                .presets
                .iter()
                .map(|preset| preset.video_id.clone())
                .collect();
        }
    }

    /// Widget session established; push the stored volume/mute state down.
    pub fn mark_ready(&mut self) -> Vec<WidgetCommand> {
        self.ready = true;
        let mut commands = vec![WidgetCommand::SetVolume {
            percent: volume_to_percent(self.state.volume),
        }];
        if self.state.muted {
            commands.push(WidgetCommand::Mute);
        }
        commands
    }

    fn ensure_ready(&self) -> AppResult<()> {
        if self.ready {
            Ok(())
        } else {
            Err(AppError::NotReady)
        }
    }

    // ========================================
    // 再生制御
    // ========================================

    /// Request a load. A new load simply supersedes any pending one.
    pub fn load(&mut self, video_id: &str, gate_open: bool) -> AppResult<Vec<WidgetCommand>> {
        self.ensure_ready()?;
        if !gate_open {
            return Err(AppError::Restricted);
        }

        self.state.current_video = Some(video_id.to_string());
        self.state.progress = 0.0;
        self.state.duration = 0.0;
        if !self.state.playlist.iter().any(|id| id == video_id) {
            self.state.playlist.push(video_id.to_string());
        }
        self.state.current_index = self.state.playlist.iter().position(|id| id == video_id);

        Ok(vec![WidgetCommand::LoadVideo {
            video_id: video_id.to_string(),
        }])
    }

    pub fn toggle_play_pause(&mut self, gate_open: bool) -> AppResult<Vec<WidgetCommand>> {
        self.ensure_ready()?;
        if !gate_open {
            return Err(AppError::Restricted);
        }

        // Target flips; confirmation arrives via the widget state report.
        let command = if self.state.is_playing {
            WidgetCommand::Pause
        } else {
            WidgetCommand::Play
        };
        Ok(vec![command])
    }

    pub fn stop(&mut self) -> AppResult<Vec<WidgetCommand>> {
        self.ensure_ready()?;
        self.state.is_playing = false;
        self.state.progress = 0.0;
        Ok(vec![WidgetCommand::Stop])
    }

    /// Emergency path: bypasses the ready check so state resets even
    /// without a widget session.
    pub fn force_stop(&mut self) -> Vec<WidgetCommand> {
        self.state.is_playing = false;
        self.state.progress = 0.0;
        if self.ready {
            vec![WidgetCommand::Stop]
        } else {
            Vec::new()
        }
    }

    pub fn next_track(&mut self, gate_open: bool) -> AppResult<Vec<WidgetCommand>> {
        self.advance(1, gate_open)
    }

    pub fn previous_track(&mut self, gate_open: bool) -> AppResult<Vec<WidgetCommand>> {
        self.advance(-1, gate_open)
    }

    fn advance(&mut self, step: i64, gate_open: bool) -> AppResult<Vec<WidgetCommand>> {
        self.ensure_ready()?;
        let len = self.state.playlist.len();
        if len == 0 {
            return Err(AppError::InvalidInput("Playlist is empty".to_string()));
        }

        let next = if self.state.shuffle && len > 1 {
            // pick a different entry than the current one
            let current = self.state.current_index.unwrap_or(0);
            let mut index = rand::thread_rng().gen_range(0..len - 1);
            if index >= current {
                index += 1;
            }
            index
        } else {
            match self.state.current_index {
                Some(current) => (current as i64 + step).rem_euclid(len as i64) as usize,
                None if step >= 0 => 0,
                None => len - 1,
            }
        };

        let video_id = self.state.playlist[next].clone();
        self.load(&video_id, gate_open)
    }

    // ========================================
    // 音量・シーク
    // ========================================

    /// Clamps to [0, 1]; always allowed. The stored value is the user
    /// volume, propagated to the widget's native 0..100 range.
    pub fn set_volume(&mut self, value: f64) -> Vec<WidgetCommand> {
        let value = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.state.volume = value;
        if self.ready {
            vec![WidgetCommand::SetVolume {
                percent: volume_to_percent(value),
            }]
        } else {
            Vec::new()
        }
    }

    pub fn toggle_mute(&mut self) -> Vec<WidgetCommand> {
        if !self.ready {
            return Vec::new();
        }
        self.state.muted = !self.state.muted;
        let command = if self.state.muted {
            WidgetCommand::Mute
        } else {
            WidgetCommand::Unmute
        };
        vec![command]
    }

    /// No-op while the widget is absent or the duration is unknown.
    pub fn seek(&mut self, fraction: f64) -> Vec<WidgetCommand> {
        if !self.ready || self.state.duration <= 0.0 {
            return Vec::new();
        }
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            return Vec::new();
        };
        vec![WidgetCommand::Seek {
            seconds: fraction * self.state.duration,
        }]
    }

    /// RPM-based ducking: scale the widget volume without touching the
    /// stored user volume.
    pub fn engine_adjusted_volume(&self, rpm: f64) -> Option<WidgetCommand> {
        if !self.ready {
            return None;
        }
        let factor = (rpm / 3000.0).min(1.0);
        let adjusted = (self.state.volume * (1.0 + factor * 0.2)).min(1.0);
        Some(WidgetCommand::SetVolume {
            percent: volume_to_percent(adjusted),
        })
    }

    // ========================================
    // ウィジェットからの報告
    // ========================================

    /// Apply a widget state-change report. On `Ended`, repeat restarts the
    /// video and otherwise playback advances to the next playlist entry.
    pub fn handle_widget_state(
        &mut self,
        widget_state: WidgetPlaybackState,
        gate_open: bool,
    ) -> Vec<WidgetCommand> {
        match widget_state {
            WidgetPlaybackState::Playing if !gate_open => {
                // The widget started against a closed gate (a race with an
                // emergency stop); shut it back down.
                self.state.is_playing = false;
                vec![WidgetCommand::Stop]
            }
            WidgetPlaybackState::Playing => {
                self.state.is_playing = true;
                Vec::new()
            }
            WidgetPlaybackState::Ended => {
                self.state.is_playing = false;
                if self.state.repeat {
                    vec![WidgetCommand::Play]
                } else {
                    match self.advance(1, gate_open) {
                        Ok(commands) => commands,
                        Err(e) => {
                            debug!(error = %e, "auto-advance skipped");
                            Vec::new()
                        }
                    }
                }
            }
            _ => {
                self.state.is_playing = false;
                Vec::new()
            }
        }
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.state.repeat = repeat;
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.state.shuffle = shuffle;
    }

    pub fn set_progress(&mut self, position: f64, duration: f64) {
        if duration > 0.0 && position.is_finite() {
            self.state.duration = duration;
            self.state.progress = (position / duration).clamp(0.0, 1.0);
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

fn volume_to_percent(value: f64) -> u8 {
    (value * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_controller() -> PlayerController {
        let mut controller = PlayerController::new();
        controller.mark_ready();
        controller
    }

    #[test]
    fn load_before_ready_is_rejected_without_side_effects() {
        let mut controller = PlayerController::new();
        let result = controller.load("dQw4w9WgXcQ", true);
        assert!(matches!(result, Err(AppError::NotReady)));
        assert_eq!(controller.state().current_video, None);
    }

    #[test]
    fn load_against_a_closed_gate_is_restricted() {
        let mut controller = ready_controller();
        let result = controller.load("dQw4w9WgXcQ", false);
        assert!(matches!(result, Err(AppError::Restricted)));
        assert_eq!(controller.state().current_video, None);
    }

    #[test]
    fn load_sets_video_and_clears_progress() {
        let mut controller = ready_controller();
        controller.set_progress(30.0, 60.0);

        let commands = controller.load("dQw4w9WgXcQ", true).unwrap();
        assert_eq!(
            commands,
            vec![WidgetCommand::LoadVideo {
                video_id: "dQw4w9WgXcQ".to_string()
            }]
        );
        assert_eq!(
            controller.state().current_video.as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(controller.state().progress, 0.0);
        assert_eq!(controller.state().duration, 0.0);
        assert_eq!(controller.state().playlist, vec!["dQw4w9WgXcQ"]);
    }

    #[test]
    fn set_volume_clamps_and_is_idempotent() {
        let mut controller = ready_controller();

        controller.set_volume(-1.0);
        let below = controller.state().volume;
        controller.set_volume(0.0);
        assert_eq!(controller.state().volume, below);
        assert_eq!(below, 0.0);

        let commands = controller.set_volume(5.0);
        assert_eq!(controller.state().volume, 1.0);
        assert_eq!(commands, vec![WidgetCommand::SetVolume { percent: 100 }]);

        // repeated application yields the same result
        let again = controller.set_volume(5.0);
        assert_eq!(controller.state().volume, 1.0);
        assert_eq!(again, vec![WidgetCommand::SetVolume { percent: 100 }]);
    }

    #[test]
    fn seek_is_a_noop_without_a_known_duration() {
        let mut controller = ready_controller();
        assert!(controller.seek(0.5).is_empty());

        controller.set_progress(0.0, 200.0);
        assert_eq!(
            controller.seek(0.5),
            vec![WidgetCommand::Seek { seconds: 100.0 }]
        );
        // clamped above 1.0
        assert_eq!(
            controller.seek(7.0),
            vec![WidgetCommand::Seek { seconds: 200.0 }]
        );
    }

    #[test]
    fn mute_toggles_only_once_ready() {
        let mut controller = PlayerController::new();
        assert!(controller.toggle_mute().is_empty());
        assert!(!controller.state().muted);

        controller.mark_ready();
        assert_eq!(controller.toggle_mute(), vec![WidgetCommand::Mute]);
        assert_eq!(controller.toggle_mute(), vec![WidgetCommand::Unmute]);
    }

    #[test]
    fn playing_report_flips_is_playing_until_contradicted() {
        let mut controller = ready_controller();
        controller.handle_widget_state(WidgetPlaybackState::Playing, true);
        assert!(controller.state().is_playing);

        controller.handle_widget_state(WidgetPlaybackState::Paused, true);
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn playing_report_against_closed_gate_forces_stop() {
        let mut controller = ready_controller();
        let commands = controller.handle_widget_state(WidgetPlaybackState::Playing, false);
        assert_eq!(commands, vec![WidgetCommand::Stop]);
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn ended_with_repeat_restarts_playback() {
        let mut controller = ready_controller();
        controller.load("dQw4w9WgXcQ", true).unwrap();
        controller.state.repeat = true;

        let commands = controller.handle_widget_state(WidgetPlaybackState::Ended, true);
        assert_eq!(commands, vec![WidgetCommand::Play]);
    }

    #[test]
    fn ended_without_repeat_advances_to_the_next_entry() {
        let mut controller = ready_controller();
        controller.load("aaaaaaaaaaa", true).unwrap();
        controller.load("bbbbbbbbbbb", true).unwrap();
        // back on the first entry
        controller.load("aaaaaaaaaaa", true).unwrap();

        let commands = controller.handle_widget_state(WidgetPlaybackState::Ended, true);
        assert_eq!(
            commands,
            vec![WidgetCommand::LoadVideo {
                video_id: "bbbbbbbbbbb".to_string()
            }]
        );
        assert_eq!(
            controller.state().current_video.as_deref(),
            Some("bbbbbbbbbbb")
        );
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let mut controller = ready_controller();
        controller.load("aaaaaaaaaaa", true).unwrap();
        controller.load("bbbbbbbbbbb", true).unwrap();

        controller.next_track(true).unwrap();
        assert_eq!(
            controller.state().current_video.as_deref(),
            Some("aaaaaaaaaaa")
        );

        controller.previous_track(true).unwrap();
        assert_eq!(
            controller.state().current_video.as_deref(),
            Some("bbbbbbbbbbb")
        );
    }

    #[test]
    fn shuffle_picks_a_different_entry() {
        let mut controller = ready_controller();
        controller.load("aaaaaaaaaaa", true).unwrap();
        controller.load("bbbbbbbbbbb", true).unwrap();
        controller.load("ccccccccccc", true).unwrap();
        controller.state.shuffle = true;

        for _ in 0..20 {
            let before = controller.state().current_video.clone();
            controller.next_track(true).unwrap();
            assert_ne!(controller.state().current_video, before);
        }
    }

    #[test]
    fn force_stop_clears_playback_even_after_a_fresh_load() {
        let mut controller = ready_controller();
        controller.load("dQw4w9WgXcQ", true).unwrap();
        controller.handle_widget_state(WidgetPlaybackState::Playing, true);
        assert!(controller.state().is_playing);

        let commands = controller.force_stop();
        assert_eq!(commands, vec![WidgetCommand::Stop]);
        assert!(!controller.state().is_playing);
        assert_eq!(controller.state().progress, 0.0);
    }

    #[test]
    fn force_stop_without_a_widget_still_resets_state() {
        let mut controller = PlayerController::new();
        assert!(controller.force_stop().is_empty());
        assert!(!controller.state().is_playing);
    }

    #[test]
    fn empty_playlist_cannot_advance() {
        let mut controller = ready_controller();
        controller.state.playlist.clear();
        assert!(matches!(
            controller.next_track(true),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn engine_ducking_never_exceeds_full_volume() {
        let mut controller = ready_controller();
        controller.set_volume(0.5);

        assert_eq!(
            controller.engine_adjusted_volume(1500.0),
            Some(WidgetCommand::SetVolume { percent: 55 })
        );
        // factor saturates at rpm 3000
        assert_eq!(
            controller.engine_adjusted_volume(9000.0),
            Some(WidgetCommand::SetVolume { percent: 60 })
        );

        controller.set_volume(1.0);
        assert_eq!(
            controller.engine_adjusted_volume(9000.0),
            Some(WidgetCommand::SetVolume { percent: 100 })
        );
    }
}
