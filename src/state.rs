use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::player::PlayerController;
use crate::safety::SafetyMonitor;
use crate::types::{Preferences, SystemStatus, TelemetrySnapshot};

pub struct AppState {
    pub telemetry: Mutex<TelemetrySnapshot>,
    pub system: Mutex<SystemStatus>,
    pub player: Mutex<PlayerController>,
    pub safety: Mutex<SafetyMonitor>,
    pub prefs: Mutex<Preferences>,
    pub prefs_path: Mutex<Option<PathBuf>>,
    /// Set on the first host push; the telemetry simulator idles while true.
    pub host_connected: AtomicBool,
    pub session_id: Uuid,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            telemetry: Mutex::new(TelemetrySnapshot::default()),
            system: Mutex::new(SystemStatus::default()),
            player: Mutex::new(PlayerController::new()),
            safety: Mutex::new(SafetyMonitor::new()),
            prefs: Mutex::new(Preferences::default()),
            prefs_path: Mutex::new(None),
            host_connected: AtomicBool::new(false),
            session_id: Uuid::new_v4(),
        }
    }

    /// The record written at teardown: stored settings plus the live
    /// player-side fields.
    pub fn current_preferences(&self) -> Preferences {
        let mut prefs = self.prefs.lock().clone();
        let player = self.player.lock();
        let state = player.state();
        prefs.volume = state.volume;
        prefs.muted = state.muted;
        prefs.repeat = state.repeat;
        prefs.shuffle = state.shuffle;
        prefs
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
