//! Speed-based safety monitoring.
//!
//! Normal ↔ DriverMode → Emergency overlay driven by vehicle speed.
//! Emergency latches until the driver acknowledges the alert; the next tick
//! then recomputes the level from current speed.

use serde::{Deserialize, Serialize};

/// Hard limit: above this speed playback is cut and the emergency overlay raised.
pub const HARD_SPEED_LIMIT_MPH: f64 = 50.0;
/// Above this speed the UI drops into driver mode (loading disabled).
pub const DRIVER_MODE_SPEED_MPH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SafetyLevel {
    #[default]
    Normal,
    DriverMode,
    Emergency,
}

/// Outcome of a monitor step.
#[derive(Debug, Clone, PartialEq)]
pub enum SafetyTransition {
    Unchanged,
    Changed {
        from: SafetyLevel,
        to: SafetyLevel,
    },
    /// Crossed into Emergency; playback must be force-stopped this tick.
    EmergencyEntered {
        speed: f64,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    level: SafetyLevel,
    // Emergency stays latched while true; acknowledge() clears it.
    latched: bool,
}

impl SafetyMonitor {
    pub fn new() -> Self {
        Self {
            level: SafetyLevel::Normal,
            latched: false,
        }
    }

    #[inline]
    pub fn level(&self) -> SafetyLevel {
        self.level
    }

    /// Step the machine against the latest speed sample.
    pub fn tick(&mut self, speed: f64) -> SafetyTransition {
        if self.level == SafetyLevel::Emergency && self.latched {
            return SafetyTransition::Unchanged;
        }

        let next = if speed > HARD_SPEED_LIMIT_MPH {
            SafetyLevel::Emergency
        } else if speed > DRIVER_MODE_SPEED_MPH {
            SafetyLevel::DriverMode
        } else {
            SafetyLevel::Normal
        };

        if next == SafetyLevel::Emergency {
            // Covers both fresh entry and re-entry right after an
            // acknowledgement with the vehicle still over the limit.
            self.level = SafetyLevel::Emergency;
            self.latched = true;
            return SafetyTransition::EmergencyEntered {
                speed,
                reason: format!("Speed limit exceeded ({speed:.0} mph)"),
            };
        }

        if next == self.level {
            return SafetyTransition::Unchanged;
        }

        let from = self.level;
        self.level = next;
        SafetyTransition::Changed { from, to: next }
    }

    /// Host-pushed safety alert: enter Emergency regardless of speed.
    pub fn force_emergency(&mut self, speed: f64, reason: &str) -> SafetyTransition {
        if self.level == SafetyLevel::Emergency && self.latched {
            return SafetyTransition::Unchanged;
        }
        self.level = SafetyLevel::Emergency;
        self.latched = true;
        SafetyTransition::EmergencyEntered {
            speed,
            reason: reason.to_string(),
        }
    }

    /// Dismiss the emergency alert. Does not recompute the level itself;
    /// the next tick decides between Normal and DriverMode from current
    /// speed. Never resumes playback.
    pub fn acknowledge(&mut self) {
        self.latched = false;
    }

    /// Whether load/search style operations are blocked.
    #[inline]
    pub fn restricts_loading(&self) -> bool {
        matches!(self.level, SafetyLevel::DriverMode | SafetyLevel::Emergency)
    }

    /// Whether any transition into a playing state is blocked outright.
    #[inline]
    pub fn blocks_playback(&self) -> bool {
        matches!(self.level, SafetyLevel::Emergency)
    }
}

impl Default for SafetyMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_sequence_escalates_and_latches() {
        let mut monitor = SafetyMonitor::new();

        monitor.tick(10.0);
        assert_eq!(monitor.level(), SafetyLevel::Normal);

        monitor.tick(40.0);
        assert_eq!(monitor.level(), SafetyLevel::DriverMode);

        let transition = monitor.tick(60.0);
        assert!(matches!(
            transition,
            SafetyTransition::EmergencyEntered { speed, .. } if speed == 60.0
        ));
        assert_eq!(monitor.level(), SafetyLevel::Emergency);

        // Speed dropping back down does not clear the latch.
        assert_eq!(monitor.tick(20.0), SafetyTransition::Unchanged);
        assert_eq!(monitor.level(), SafetyLevel::Emergency);
    }

    #[test]
    fn acknowledge_lets_the_next_tick_recompute() {
        let mut monitor = SafetyMonitor::new();
        monitor.tick(60.0);
        monitor.acknowledge();

        // Acknowledge alone changes nothing.
        assert_eq!(monitor.level(), SafetyLevel::Emergency);

        let transition = monitor.tick(20.0);
        assert_eq!(
            transition,
            SafetyTransition::Changed {
                from: SafetyLevel::Emergency,
                to: SafetyLevel::Normal,
            }
        );
    }

    #[test]
    fn still_speeding_after_acknowledge_reenters_emergency() {
        let mut monitor = SafetyMonitor::new();
        monitor.tick(60.0);
        monitor.acknowledge();

        let transition = monitor.tick(55.0);
        assert!(matches!(
            transition,
            SafetyTransition::EmergencyEntered { .. }
        ));
        // Latched again until the next acknowledgement.
        assert_eq!(monitor.tick(10.0), SafetyTransition::Unchanged);
    }

    #[test]
    fn forced_emergency_behaves_like_a_speed_trigger() {
        let mut monitor = SafetyMonitor::new();
        let transition = monitor.force_emergency(12.0, "Safety alert");
        assert!(matches!(
            transition,
            SafetyTransition::EmergencyEntered { speed, .. } if speed == 12.0
        ));
        assert!(monitor.blocks_playback());

        // Repeated alerts while latched are no-ops.
        assert_eq!(
            monitor.force_emergency(12.0, "Safety alert"),
            SafetyTransition::Unchanged
        );
    }

    #[test]
    fn driver_mode_restricts_loading_but_not_playback() {
        let mut monitor = SafetyMonitor::new();
        monitor.tick(40.0);
        assert!(monitor.restricts_loading());
        assert!(!monitor.blocks_playback());
    }

    #[test]
    fn boundary_speeds_are_exclusive() {
        let mut monitor = SafetyMonitor::new();
        monitor.tick(30.0);
        assert_eq!(monitor.level(), SafetyLevel::Normal);
        monitor.tick(50.0);
        assert_eq!(monitor.level(), SafetyLevel::DriverMode);
    }
}
