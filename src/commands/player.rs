use tauri::{AppHandle, State};
use tracing::info;

use crate::bridge;
use crate::error::AppError;
use crate::player::video_id::extract_video_id;
use crate::state::AppState;
use crate::types::*;

use super::{load_gate, playback_gate};

/// URL または 11 文字の動画 ID を受けて読み込みをリクエスト
#[tauri::command]
pub async fn load_video(
    state: State<'_, AppState>,
    app: AppHandle,
    input: String,
) -> Result<PlayerState, AppError> {
    let video_id = extract_video_id(&input)
        .ok_or_else(|| AppError::InvalidInput(format!("Not a YouTube URL or video id: {input}")))?;

    info!(%video_id, "loading video");

    let gate_open = load_gate(&state);
    let commands = state.player.lock().load(&video_id, gate_open)?;
    bridge::emit_widget_commands(&app, commands);
    bridge::notify(
        &app,
        "videoLoaded",
        VideoLoadedPayload {
            video_id: video_id.clone(),
        },
    );

    let snapshot = state.player.lock().snapshot();
    bridge::emit_player_state(&app, snapshot.clone());
    Ok(snapshot)
}

#[tauri::command]
pub async fn toggle_play_pause(
    state: State<'_, AppState>,
    app: AppHandle,
) -> Result<(), AppError> {
    let gate_open = playback_gate(&state);
    let commands = state.player.lock().toggle_play_pause(gate_open)?;
    bridge::emit_widget_commands(&app, commands);
    Ok(())
}

#[tauri::command]
pub async fn stop_video(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    let commands = state.player.lock().stop()?;
    bridge::emit_widget_commands(&app, commands);
    bridge::notify(&app, "videoStopped", serde_json::json!({}));
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(())
}

#[tauri::command]
pub async fn seek(
    state: State<'_, AppState>,
    app: AppHandle,
    fraction: f64,
) -> Result<(), AppError> {
    let commands = state.player.lock().seek(fraction);
    bridge::emit_widget_commands(&app, commands);
    Ok(())
}

#[tauri::command]
pub async fn set_volume(
    state: State<'_, AppState>,
    app: AppHandle,
    value: f64,
) -> Result<(), AppError> {
    let commands = state.player.lock().set_volume(value);
    bridge::emit_widget_commands(&app, commands);

    let volume = state.player.lock().state().volume;
    bridge::notify(&app, "volumeChanged", VolumeChangedPayload { volume });
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(())
}

#[tauri::command]
pub async fn toggle_mute(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    let commands = state.player.lock().toggle_mute();
    if commands.is_empty() {
        // widget not ready yet; nothing to toggle
        return Ok(());
    }
    bridge::emit_widget_commands(&app, commands);

    let muted = state.player.lock().state().muted;
    bridge::notify(&app, "muteToggled", MuteToggledPayload { muted });
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(())
}

#[tauri::command]
pub async fn next_track(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    advance(&state, &app, true)
}

#[tauri::command]
pub async fn previous_track(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    advance(&state, &app, false)
}

fn advance(state: &AppState, app: &AppHandle, forward: bool) -> Result<(), AppError> {
    let gate_open = load_gate(state);
    let commands = if forward {
        state.player.lock().next_track(gate_open)?
    } else {
        state.player.lock().previous_track(gate_open)?
    };
    bridge::emit_widget_commands(app, commands);

    let snapshot = state.player.lock().snapshot();
    if let Some(ref video_id) = snapshot.current_video {
        bridge::notify(
            app,
            "videoLoaded",
            VideoLoadedPayload {
                video_id: video_id.clone(),
            },
        );
    }
    bridge::emit_player_state(app, snapshot);
    Ok(())
}

#[tauri::command]
pub async fn toggle_repeat(state: State<'_, AppState>, app: AppHandle) -> Result<bool, AppError> {
    let repeat = {
        let mut player = state.player.lock();
        let flipped = !player.state().repeat;
        player.set_repeat(flipped);
        flipped
    };
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(repeat)
}

#[tauri::command]
pub async fn toggle_shuffle(state: State<'_, AppState>, app: AppHandle) -> Result<bool, AppError> {
    let shuffle = {
        let mut player = state.player.lock();
        let flipped = !player.state().shuffle;
        player.set_shuffle(flipped);
        flipped
    };
    bridge::emit_player_state(&app, state.player.lock().snapshot());
    Ok(shuffle)
}

#[tauri::command]
pub async fn get_player_state(state: State<'_, AppState>) -> Result<PlayerState, AppError> {
    Ok(state.player.lock().snapshot())
}
