//! 模擬テレメトリ
//!
//! Standalone mode random-walks the vehicle data; real host pushes supersede
//! the simulation entirely (the task idles once a host is connected).

use rand::Rng;

use crate::types::{Gear, TelemetrySnapshot};

const GEARS: [Gear; 8] = [
    Gear::R,
    Gear::N,
    Gear::G1,
    Gear::G2,
    Gear::G3,
    Gear::G4,
    Gear::G5,
    Gear::G6,
];

const MAX_SIM_SPEED_MPH: f64 = 60.0;
const MAX_SIM_RPM: f64 = 6000.0;

/// One simulation step: drift speed and rpm, occasionally shift gear.
pub fn simulate_step(snapshot: &mut TelemetrySnapshot) {
    let mut rng = rand::thread_rng();

    let drift: f64 = rng.gen_range(-4.0..5.0);
    snapshot.speed = (snapshot.speed + drift).clamp(0.0, MAX_SIM_SPEED_MPH);

    let base_rpm = snapshot.speed / MAX_SIM_SPEED_MPH * 3000.0;
    snapshot.rpm = (base_rpm + rng.gen_range(-150.0..150.0)).clamp(0.0, MAX_SIM_RPM);
    snapshot.engine_running = snapshot.rpm > 500.0;

    if rng.gen_bool(0.1) {
        snapshot.gear = GEARS[rng.gen_range(0..GEARS.len())];
    }

    snapshot.fuel = (snapshot.fuel - 0.005).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_values_stay_in_range() {
        let mut snapshot = TelemetrySnapshot::default();
        for _ in 0..1000 {
            simulate_step(&mut snapshot);
            assert!((0.0..=MAX_SIM_SPEED_MPH).contains(&snapshot.speed));
            assert!((0.0..=MAX_SIM_RPM).contains(&snapshot.rpm));
            assert!((0.0..=100.0).contains(&snapshot.fuel));
        }
    }

    #[test]
    fn simulation_does_not_touch_the_electrical_system() {
        let mut snapshot = TelemetrySnapshot::default();
        for _ in 0..100 {
            simulate_step(&mut snapshot);
        }
        assert!(snapshot.electrical_active);
        assert_eq!(snapshot.model, "Test Vehicle");
    }
}
