//! ホストからのプッシュと安全状態の操作

use tauri::{AppHandle, State};
use tracing::{debug, info};

use crate::bridge;
use crate::error::AppError;
use crate::safety::SafetyLevel;
use crate::state::AppState;
use crate::types::*;

/// ホストイベントの受け口。cadence や順序の保証はない。
#[tauri::command]
pub async fn host_push(
    state: State<'_, AppState>,
    app: AppHandle,
    event: HostEvent,
) -> Result<(), AppError> {
    debug!(?event, "host push");
    bridge::dispatch(&app, &state, event);
    Ok(())
}

#[tauri::command]
pub async fn get_vehicle_state(
    state: State<'_, AppState>,
) -> Result<TelemetrySnapshot, AppError> {
    Ok(state.telemetry.lock().clone())
}

#[tauri::command]
pub async fn get_system_status(state: State<'_, AppState>) -> Result<SystemStatus, AppError> {
    Ok(state.system.lock().clone())
}

#[tauri::command]
pub async fn get_safety_state(state: State<'_, AppState>) -> Result<SafetyLevel, AppError> {
    Ok(state.safety.lock().level())
}

/// 緊急アラートの確認。再生は自動で再開しない。
#[tauri::command]
pub async fn acknowledge_emergency(state: State<'_, AppState>) -> Result<(), AppError> {
    state.safety.lock().acknowledge();
    info!("emergency alert acknowledged");
    Ok(())
}
