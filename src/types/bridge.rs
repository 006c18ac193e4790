//! ホストブリッジ境界の型定義
//!
//! Inbound pushes from the enclosing application and the outbound
//! fire-and-forget envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::safety::SafetyLevel;
use crate::types::{PlayerState, TelemetryUpdate, WidgetPlaybackState};

/// Host-pushed events, tagged by action name.
///
/// Arrival cadence and ordering are not guaranteed, so every variant is
/// handled idempotently (merges are last-write-wins).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum HostEvent {
    VehicleStateUpdate(TelemetryUpdate),
    SystemStatusUpdate(SystemStatusUpdate),
    SafetyAlert(SafetyAlertPayload),
    AudioSystemUpdate(AudioSystemUpdate),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStatusUpdate {
    pub ecu_online: Option<bool>,
    pub audio_online: Option<bool>,
    pub network_online: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SafetyAlertPayload {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioSystemUpdate {
    pub volume: Option<f64>,
}

/// サブシステム状態 (ホスト報告)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub ecu_online: Option<bool>,
    pub audio_online: Option<bool>,
    pub network_online: Option<bool>,
}

impl SystemStatus {
    pub fn merge(&mut self, update: &SystemStatusUpdate) {
        if update.ecu_online.is_some() {
            self.ecu_online = update.ecu_online;
        }
        if update.audio_online.is_some() {
            self.audio_online = update.audio_online;
        }
        if update.network_online.is_some() {
            self.network_online = update.network_online;
        }
    }
}

/// Outbound envelope: action name plus a JSON-serializable payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMessage<T: Serialize> {
    pub action: &'static str,
    pub data: T,
}

// ========================================
// 送信ペイロード
// ========================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLoadedPayload {
    pub video_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStateChangedPayload {
    pub state: WidgetPlaybackState,
    pub is_playing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_video: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeChangedPayload {
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteToggledPayload {
    pub muted: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyStopPayload {
    pub speed: f64,
    pub reason: String,
}

/// 1 Hz heartbeat carrying the full player state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heartbeat {
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub session_id: Uuid,
    pub initialized: bool,
    pub player: PlayerState,
}

// ========================================
// UI 向けイベント
// ========================================

/// Safety-level change pushed to the UI (`safety://state`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyEvent {
    pub level: SafetyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Transient, auto-dismissing user message (`player://error`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransientError {
    pub message: String,
}
