//! プリファレンス関連コマンド

use tauri::{AppHandle, State};
use tracing::warn;

use crate::bridge;
use crate::error::AppError;
use crate::prefs;
use crate::state::AppState;
use crate::types::*;

#[tauri::command]
pub async fn get_preferences(state: State<'_, AppState>) -> Result<Preferences, AppError> {
    Ok(state.current_preferences())
}

#[tauri::command]
pub async fn update_audio_settings(
    state: State<'_, AppState>,
    audio: AudioSettings,
) -> Result<(), AppError> {
    state.prefs.lock().audio_settings = audio;
    Ok(())
}

/// 明示的な保存。通常は終了時に自動で書き戻される。
#[tauri::command]
pub async fn save_preferences(state: State<'_, AppState>, app: AppHandle) -> Result<(), AppError> {
    let preferences = state.current_preferences();

    let path = state.prefs_path.lock().clone();
    match path {
        Some(path) => prefs::save(&path, &preferences)?,
        None => warn!("no preferences path resolved, skipping save"),
    }

    bridge::notify(&app, "savePreferences", preferences);
    Ok(())
}
