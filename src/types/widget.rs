//! ビデオウィジェット境界のプロトコル型
//!
//! バックエンド → webview のコマンドと、ウィジェット起因のエラー分類。

use std::fmt;

use serde::{Deserialize, Serialize};

/// Commands sent to the embedded video widget (backend → webview).
///
/// The webview translates these into the widget's native calls
/// (`loadVideoById`, `playVideo`, `setVolume(0..100)` and so on). Delivery is
/// fire-and-forget; confirmation arrives later as a state-change report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
pub enum WidgetCommand {
    LoadVideo { video_id: String },
    Play,
    Pause,
    Stop,
    Mute,
    Unmute,
    /// Widget native volume range is 0..100.
    SetVolume { percent: u8 },
    Seek { seconds: f64 },
    /// Ask the widget to answer with a `report_progress` call.
    QueryProgress,
}

/// ウィジェットのエラーコード分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetErrorKind {
    InvalidParameter,
    Html5Error,
    NotFound,
    NotEmbeddable,
    Unknown,
}

impl WidgetErrorKind {
    /// Raw widget codes: 2 invalid parameter, 5 HTML5 player failure,
    /// 100 not found, 101/150 embedding disallowed.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => WidgetErrorKind::InvalidParameter,
            5 => WidgetErrorKind::Html5Error,
            100 => WidgetErrorKind::NotFound,
            101 | 150 => WidgetErrorKind::NotEmbeddable,
            _ => WidgetErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WidgetErrorKind::InvalidParameter => "Invalid video ID",
            WidgetErrorKind::Html5Error => "HTML5 player error",
            WidgetErrorKind::NotFound => "Video not found",
            WidgetErrorKind::NotEmbeddable => "Video not allowed in embedded players",
            WidgetErrorKind::Unknown => "Unknown error",
        }
    }
}

impl fmt::Display for WidgetErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
