//! ビデオウィジェットからの報告 (webview → バックエンド)

use tauri::{AppHandle, State};
use tracing::{info, warn};

use crate::bridge;
use crate::error::AppError;
use crate::state::AppState;
use crate::types::*;

use super::playback_gate;

/// ウィジェット準備完了
#[tauri::command]
pub async fn widget_ready(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    info!("video widget ready");
    let commands = state.player.lock().mark_ready();
    bridge::emit_widget_commands(&app, commands);
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(())
}

#[tauri::command]
pub async fn widget_state_changed(
    state: State<'_, AppState>,
    app: AppHandle,
    code: i32,
) -> Result<(), AppError> {
    let widget_state = WidgetPlaybackState::from_code(code);

    let gate_open = playback_gate(&state);
    let commands = state
        .player
        .lock()
        .handle_widget_state(widget_state, gate_open);
    bridge::emit_widget_commands(&app, commands);

    let snapshot = state.player.lock().snapshot();
    bridge::notify(
        &app,
        "playerStateChanged",
        PlayerStateChangedPayload {
            state: widget_state,
            is_playing: snapshot.is_playing,
            current_video: snapshot.current_video.clone(),
        },
    );
    bridge::emit_player_state(&app, snapshot);
    Ok(())
}

/// ウィジェットのエラー報告。安全状態には決して影響しない。
#[tauri::command]
pub async fn widget_error(app: AppHandle, code: i32) -> Result<(), AppError> {
    let error = AppError::Widget(WidgetErrorKind::from_code(code));
    warn!(code, "widget reported an error: {error}");
    bridge::emit_transient_error(&app, &error.to_string());
    Ok(())
}

/// 再生位置の報告 (QueryProgress への応答)
#[tauri::command]
pub async fn report_progress(
    state: State<'_, AppState>,
    app: AppHandle,
    position: f64,
    duration: f64,
) -> Result<(), AppError> {
    state.player.lock().set_progress(position, duration);
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(())
}
