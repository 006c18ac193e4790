//! 車両テレメトリの型定義

use serde::{Deserialize, Serialize};

/// シフトポジション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Gear {
    R,
    #[default]
    N,
    #[serde(rename = "1")]
    G1,
    #[serde(rename = "2")]
    G2,
    #[serde(rename = "3")]
    G3,
    #[serde(rename = "4")]
    G4,
    #[serde(rename = "5")]
    G5,
    #[serde(rename = "6")]
    G6,
}

impl Gear {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gear::R => "R",
            Gear::N => "N",
            Gear::G1 => "1",
            Gear::G2 => "2",
            Gear::G3 => "3",
            Gear::G4 => "4",
            Gear::G5 => "5",
            Gear::G6 => "6",
        }
    }
}

/// 車両状態スナップショット
///
/// Superseded wholesale on every update; partial host pushes are merged via
/// [`TelemetryUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub speed: f64,
    pub rpm: f64,
    pub gear: Gear,
    pub fuel: f64,
    pub battery: f64,
    pub engine_running: bool,
    pub electrical_active: bool,
    pub model: String,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            speed: 0.0,
            rpm: 0.0,
            gear: Gear::N,
            fuel: 85.0,
            battery: 12.4,
            engine_running: false,
            electrical_active: true,
            model: "Test Vehicle".to_string(),
        }
    }
}

/// 部分更新
///
/// Host pushes may carry any subset of fields; merge is shallow and
/// last-write-wins, so duplicate or out-of-order delivery is harmless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetryUpdate {
    pub speed: Option<f64>,
    pub rpm: Option<f64>,
    pub gear: Option<Gear>,
    pub fuel: Option<f64>,
    pub battery: Option<f64>,
    pub engine_running: Option<bool>,
    pub electrical_active: Option<bool>,
    pub model: Option<String>,
}

impl TelemetryUpdate {
    pub fn apply_to(&self, snapshot: &mut TelemetrySnapshot) {
        if let Some(speed) = self.speed {
            snapshot.speed = speed;
        }
        if let Some(rpm) = self.rpm {
            snapshot.rpm = rpm;
        }
        if let Some(gear) = self.gear {
            snapshot.gear = gear;
        }
        if let Some(fuel) = self.fuel {
            snapshot.fuel = fuel;
        }
        if let Some(battery) = self.battery {
            snapshot.battery = battery;
        }
        if let Some(engine_running) = self.engine_running {
            snapshot.engine_running = engine_running;
        }
        if let Some(electrical_active) = self.electrical_active {
            snapshot.electrical_active = electrical_active;
        }
        if let Some(ref model) = self.model {
            snapshot.model = model.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_merges_onto_snapshot() {
        let mut snapshot = TelemetrySnapshot::default();
        let update = TelemetryUpdate {
            speed: Some(42.0),
            gear: Some(Gear::G3),
            ..Default::default()
        };

        update.apply_to(&mut snapshot);

        assert_eq!(snapshot.speed, 42.0);
        assert_eq!(snapshot.gear, Gear::G3);
        // untouched fields keep their previous values
        assert_eq!(snapshot.fuel, 85.0);
        assert!(snapshot.electrical_active);
    }

    #[test]
    fn duplicate_update_is_idempotent() {
        let mut snapshot = TelemetrySnapshot::default();
        let update = TelemetryUpdate {
            speed: Some(18.5),
            engine_running: Some(true),
            ..Default::default()
        };

        update.apply_to(&mut snapshot);
        let first = snapshot.clone();
        update.apply_to(&mut snapshot);

        assert_eq!(snapshot, first);
    }

    #[test]
    fn gear_serializes_as_display_label() {
        let json = serde_json::to_string(&Gear::G4).unwrap();
        assert_eq!(json, "\"4\"");
        let back: Gear = serde_json::from_str("\"R\"").unwrap();
        assert_eq!(back, Gear::R);
    }
}
