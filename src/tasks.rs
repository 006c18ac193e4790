//! 周期タスク
//!
//! telemetry simulation (10 Hz), safety evaluation (1 Hz), heartbeat (1 Hz)
//! and progress polling (1 Hz while playing). All mutation goes through the
//! shared state's locks; nothing here blocks.

use std::sync::atomic::Ordering;
use std::time::Duration;

use tauri::{AppHandle, Manager};
use tokio::time;
use tracing::info;

use crate::bridge;
use crate::safety::SafetyTransition;
use crate::state::AppState;
use crate::telemetry;
use crate::types::{SafetyEvent, WidgetCommand};

const TELEMETRY_INTERVAL: Duration = Duration::from_millis(100);
const SAFETY_INTERVAL: Duration = Duration::from_secs(1);
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);
const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

pub fn spawn_all(app: AppHandle) {
    spawn_telemetry_simulation(app.clone());
    spawn_safety_tick(app.clone());
    spawn_heartbeat(app.clone());
    spawn_progress_poll(app);
}

fn spawn_telemetry_simulation(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = time::interval(TELEMETRY_INTERVAL);
        loop {
            ticker.tick().await;
            let state = app.state::<AppState>();
            if state.host_connected.load(Ordering::Relaxed) {
                continue;
            }
            telemetry::simulate_step(&mut state.telemetry.lock());
        }
    });
}

fn spawn_safety_tick(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = time::interval(SAFETY_INTERVAL);
        loop {
            ticker.tick().await;
            let state = app.state::<AppState>();
            let speed = state.telemetry.lock().speed;
            let transition = state.safety.lock().tick(speed);

            match transition {
                SafetyTransition::EmergencyEntered { speed, reason } => {
                    bridge::emergency_stop(&app, &state, speed, &reason);
                }
                SafetyTransition::Changed { from, to } => {
                    info!(?from, ?to, speed, "safety level changed");
                    bridge::emit_safety_event(
                        &app,
                        SafetyEvent {
                            level: to,
                            speed: Some(speed),
                            reason: None,
                        },
                    );
                }
                SafetyTransition::Unchanged => {}
            }
        }
    });
}

fn spawn_heartbeat(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = time::interval(HEARTBEAT_INTERVAL);
        loop {
            ticker.tick().await;
            let state = app.state::<AppState>();
            bridge::send_heartbeat(&app, &state);
        }
    });
}

fn spawn_progress_poll(app: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = time::interval(PROGRESS_INTERVAL);
        loop {
            ticker.tick().await;
            let state = app.state::<AppState>();
            let poll = {
                let player = state.player.lock();
                player.is_ready() && player.state().is_playing
            };
            if poll {
                bridge::emit_widget_commands(&app, vec![WidgetCommand::QueryProgress]);
            }
        }
    });
}
