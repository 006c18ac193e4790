//! 音響設定とユーザープリファレンス

use serde::{Deserialize, Serialize};

/// 音響設定
///
/// Persisted as part of [`Preferences`]; `speed_restriction` feeds the
/// playback gate and `rpm_volume_adjust` the engine-volume ducking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSettings {
    pub master_volume: f64,
    pub bass: f64,
    pub treble: f64,
    pub balance: f64,
    pub fade: f64,
    pub equalizer_enabled: bool,
    pub rpm_volume_adjust: bool,
    pub speed_restriction: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.5,
            bass: 0.0,
            treble: 0.0,
            balance: 0.0,
            fade: 0.0,
            equalizer_enabled: false,
            rpm_volume_adjust: true,
            speed_restriction: true,
        }
    }
}

/// クイックアクセス用プリセット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPreset {
    pub name: String,
    pub video_id: String,
}

/// 永続化されるユーザープリファレンス
///
/// Read once at startup, written at teardown. A missing or malformed record
/// falls back to these defaults silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub volume: f64,
    pub muted: bool,
    pub repeat: bool,
    pub shuffle: bool,
    pub audio_settings: AudioSettings,
    pub presets: Vec<VideoPreset>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 0.5,
            muted: false,
            repeat: false,
            shuffle: false,
            audio_settings: AudioSettings::default(),
            presets: default_presets(),
        }
    }
}

fn default_presets() -> Vec<VideoPreset> {
    vec![
        VideoPreset {
            name: "Lo-fi radio".to_string(),
            video_id: "jfKfPfyJRdk".to_string(),
        },
        VideoPreset {
            name: "Classic".to_string(),
            video_id: "dQw4w9WgXcQ".to_string(),
        },
        VideoPreset {
            name: "Synthwave radio".to_string(),
            video_id: "4xDzrJKXOOY".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"volume":0.8}"#).unwrap();
        assert_eq!(prefs.volume, 0.8);
        assert!(!prefs.muted);
        assert!(prefs.audio_settings.speed_restriction);
        assert!(!prefs.presets.is_empty());
    }

    #[test]
    fn record_round_trips_field_for_field() {
        let mut prefs = Preferences::default();
        prefs.volume = 0.25;
        prefs.muted = true;
        prefs.shuffle = true;
        prefs.audio_settings.bass = -2.0;
        prefs.audio_settings.rpm_volume_adjust = false;

        let json = serde_json::to_string(&prefs).unwrap();
        let back: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
