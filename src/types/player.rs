//! プレイヤー状態関連の型定義

use serde::{Deserialize, Serialize};

/// Playback states reported by the embedded video widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetPlaybackState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    Unknown,
}

impl WidgetPlaybackState {
    /// Raw widget codes: -1 unstarted, 0 ended, 1 playing, 2 paused,
    /// 3 buffering, 5 cued. Anything else maps to `Unknown`.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => WidgetPlaybackState::Unstarted,
            0 => WidgetPlaybackState::Ended,
            1 => WidgetPlaybackState::Playing,
            2 => WidgetPlaybackState::Paused,
            3 => WidgetPlaybackState::Buffering,
            5 => WidgetPlaybackState::Cued,
            _ => WidgetPlaybackState::Unknown,
        }
    }
}

/// プレイヤー状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_video: Option<String>,
    pub is_playing: bool,
    pub volume: f64,
    pub muted: bool,
    pub progress: f64,
    pub duration: f64,
    pub repeat: bool,
    pub shuffle: bool,
    pub playlist: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_video: None,
            is_playing: false,
            volume: 0.5,
            muted: false,
            progress: 0.0,
            duration: 0.0,
            repeat: false,
            shuffle: false,
            playlist: Vec::new(),
            current_index: None,
        }
    }
}
