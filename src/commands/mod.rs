//! Tauri コマンド

pub mod host;
pub mod player;
pub mod settings;
pub mod widget;

use crate::player::gate;
use crate::state::AppState;

/// Gate for transitions into a playing state: the pure predicate plus the
/// Emergency latch. Evaluated fresh on every attempt.
pub(crate) fn playback_gate(state: &AppState) -> bool {
    let open = {
        let telemetry = state.telemetry.lock();
        let prefs = state.prefs.lock();
        gate::can_play(&telemetry, &prefs.audio_settings)
    };
    open && !state.safety.lock().blocks_playback()
}

/// Gate for loading: driver mode additionally blocks new loads.
pub(crate) fn load_gate(state: &AppState) -> bool {
    let open = {
        let telemetry = state.telemetry.lock();
        let prefs = state.prefs.lock();
        gate::can_play(&telemetry, &prefs.audio_settings)
    };
    open && !state.safety.lock().restricts_loading()
}
