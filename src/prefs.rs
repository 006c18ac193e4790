//! ユーザープリファレンスの永続化
//!
//! 起動時に一度読み込み、終了時にベストエフォートで書き戻す。

use std::path::Path;

use tracing::{debug, warn};

use crate::error::AppResult;
use crate::types::Preferences;

pub const FILE_NAME: &str = "preferences.json";

/// Read the persisted record. Anything missing or malformed falls back to
/// defaults; startup never fails on a bad preferences file.
pub fn load(path: &Path) -> Preferences {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no preferences file, using defaults");
            return Preferences::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "malformed preferences, using defaults");
            Preferences::default()
        }
    }
}

/// Best-effort save at teardown.
pub fn save(path: &Path, prefs: &Preferences) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(prefs)?;
    std::fs::write(path, content)?;
    Ok(())
}
