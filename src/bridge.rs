//! ホストブリッジ
//!
//! Outbound: best-effort, fire-and-forget notifications to the enclosing
//! application; failures are logged and dropped, never retried. Inbound:
//! exhaustive dispatch of host-pushed events onto the shared state.

use std::sync::atomic::Ordering;

use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::safety::{SafetyLevel, SafetyTransition};
use crate::state::AppState;
use crate::types::{
    EmergencyStopPayload, Heartbeat, HostEvent, HostMessage, PlayerState, SafetyEvent,
    TransientError, VolumeChangedPayload, WidgetCommand,
};

// ========================================
// チャンネル名
// ========================================

/// Outbound host notifications.
pub const HOST_CHANNEL: &str = "host://message";
/// Commands for the embedded video widget.
pub const WIDGET_CHANNEL: &str = "player://command";
/// Player-state snapshots for the UI.
pub const PLAYER_STATE_CHANNEL: &str = "player://state";
/// Transient, auto-dismissing user messages.
pub const PLAYER_ERROR_CHANNEL: &str = "player://error";
/// Safety-level changes and emergency alerts.
pub const SAFETY_CHANNEL: &str = "safety://state";

// ========================================
// 送信側
// ========================================

/// Fire-and-forget notification to the host.
pub fn notify<T: Serialize + Clone>(app: &AppHandle, action: &'static str, data: T) {
    let message = HostMessage { action, data };
    if let Err(e) = app.emit(HOST_CHANNEL, message) {
        let e = AppError::Bridge(e.to_string());
        warn!(action, error = %e, "host notification dropped");
    }
}

pub fn emit_widget_commands(app: &AppHandle, commands: Vec<WidgetCommand>) {
    for command in commands {
        debug!(?command, "widget command");
        if let Err(e) = app.emit(WIDGET_CHANNEL, command) {
            warn!(error = %e, "widget command dropped");
        }
    }
}

pub fn emit_player_state(app: &AppHandle, state: PlayerState) {
    if let Err(e) = app.emit(PLAYER_STATE_CHANNEL, state) {
        warn!(error = %e, "player state event dropped");
    }
}

pub fn emit_transient_error(app: &AppHandle, message: &str) {
    let payload = TransientError {
        message: message.to_string(),
    };
    if let Err(e) = app.emit(PLAYER_ERROR_CHANNEL, payload) {
        warn!(error = %e, "error event dropped");
    }
}

pub fn emit_safety_event(app: &AppHandle, event: SafetyEvent) {
    if let Err(e) = app.emit(SAFETY_CHANNEL, event) {
        warn!(error = %e, "safety event dropped");
    }
}

/// 1 Hz heartbeat: version, session id and the full player state.
pub fn send_heartbeat(app: &AppHandle, state: &AppState) {
    let heartbeat = Heartbeat {
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        session_id: state.session_id,
        initialized: true,
        player: state.player.lock().snapshot(),
    };
    notify(app, "heartbeat", heartbeat);
}

// ========================================
// 受信側
// ========================================

/// Dispatch one host push. Handlers are idempotent; duplicate or
/// out-of-order delivery only re-applies a merge.
pub fn dispatch(app: &AppHandle, state: &AppState, event: HostEvent) {
    state.host_connected.store(true, Ordering::Relaxed);

    match event {
        HostEvent::VehicleStateUpdate(update) => {
            let (rpm, engine_running) = {
                let mut telemetry = state.telemetry.lock();
                update.apply_to(&mut telemetry);
                (telemetry.rpm, telemetry.engine_running)
            };

            let rpm_adjust = state.prefs.lock().audio_settings.rpm_volume_adjust;
            if rpm_adjust && engine_running {
                if let Some(command) = state.player.lock().engine_adjusted_volume(rpm) {
                    emit_widget_commands(app, vec![command]);
                }
            }
        }
        HostEvent::SystemStatusUpdate(update) => {
            state.system.lock().merge(&update);
        }
        HostEvent::SafetyAlert(alert) => {
            let speed = state.telemetry.lock().speed;
            let reason = alert.reason.unwrap_or_else(|| "Safety alert".to_string());
            let transition = state.safety.lock().force_emergency(speed, &reason);
            if let SafetyTransition::EmergencyEntered { speed, reason } = transition {
                emergency_stop(app, state, speed, &reason);
            }
        }
        HostEvent::AudioSystemUpdate(update) => {
            if let Some(volume) = update.volume {
                let commands = state.player.lock().set_volume(volume);
                emit_widget_commands(app, commands);
                let volume = state.player.lock().state().volume;
                notify(app, "volumeChanged", VolumeChangedPayload { volume });
            }
        }
    }
}

/// Shared emergency entry: force-stop playback in the same tick, alert the
/// UI and notify the host.
pub fn emergency_stop(app: &AppHandle, state: &AppState, speed: f64, reason: &str) {
    info!(speed, reason, "emergency stop");

    let commands = state.player.lock().force_stop();
    emit_widget_commands(app, commands);

    emit_safety_event(
        app,
        SafetyEvent {
            level: SafetyLevel::Emergency,
            speed: Some(speed),
            reason: Some(reason.to_string()),
        },
    );
    notify(
        app,
        "emergencyStop",
        EmergencyStopPayload {
            speed,
            reason: reason.to_string(),
        },
    );
}
