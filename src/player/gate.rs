//! 再生ゲート
//!
//! Pure predicate over telemetry and audio settings; no side effects.

use crate::safety::HARD_SPEED_LIMIT_MPH;
use crate::types::{AudioSettings, TelemetrySnapshot};

/// Whether playback may start or resume right now.
///
/// No electrical power means no audio at all; the hard speed limit applies
/// only while the speed-restriction setting is enabled. Callers re-evaluate
/// on every attempted transition into a playing state; the result is never
/// cached.
pub fn can_play(telemetry: &TelemetrySnapshot, audio: &AudioSettings) -> bool {
    if !telemetry.electrical_active {
        return false;
    }

    if audio.speed_restriction && telemetry.speed > HARD_SPEED_LIMIT_MPH {
        return false;
    }

    true
}
