mod bridge;
mod commands;
mod error;
mod player;
mod prefs;
mod safety;
mod state;
mod tasks;
mod telemetry;
mod types;

use state::AppState;
use tauri::Manager;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing/logging
fn init_logging() {
    // RUST_LOG env controls log level: error, warn, info, debug, trace
    // Example: RUST_LOG=tauri_drive_player=debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging first
    init_logging();

    let app_state = AppState::new();

    tauri::Builder::default()
        .manage(app_state)
        .setup(|app| {
            // 起動時にプリファレンスを読み込み
            let state = app.state::<AppState>();
            match app.path().app_config_dir() {
                Ok(dir) => {
                    let path = dir.join(prefs::FILE_NAME);
                    let preferences = prefs::load(&path);
                    state.player.lock().apply_preferences(&preferences);
                    *state.prefs.lock() = preferences;
                    *state.prefs_path.lock() = Some(path);
                }
                Err(e) => {
                    warn!(error = %e, "config dir unavailable, preferences will not persist")
                }
            }

            tasks::spawn_all(app.handle().clone());

            info!(
                version = env!("CARGO_PKG_VERSION"),
                session = %state.session_id,
                "drive player backend ready"
            );
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Player
            commands::player::load_video,
            commands::player::toggle_play_pause,
            commands::player::stop_video,
            commands::player::seek,
            commands::player::set_volume,
            commands::player::toggle_mute,
            commands::player::next_track,
            commands::player::previous_track,
            commands::player::toggle_repeat,
            commands::player::toggle_shuffle,
            commands::player::get_player_state,
            // Widget
            commands::widget::widget_ready,
            commands::widget::widget_state_changed,
            commands::widget::widget_error,
            commands::widget::report_progress,
            // Host
            commands::host::host_push,
            commands::host::get_vehicle_state,
            commands::host::get_system_status,
            commands::host::get_safety_state,
            commands::host::acknowledge_emergency,
            // Settings
            commands::settings::get_preferences,
            commands::settings::update_audio_settings,
            commands::settings::save_preferences,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| {
            if let tauri::RunEvent::Exit = event {
                // 終了時にベストエフォートで保存
                let state = app.state::<AppState>();
                let path = state.prefs_path.lock().clone();
                if let Some(path) = path {
                    if let Err(e) = prefs::save(&path, &state.current_preferences()) {
                        warn!(error = %e, "failed to save preferences on exit");
                    }
                }
            }
        });
}
