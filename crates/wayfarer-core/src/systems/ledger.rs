//! Ledger system - ship-wide resource drift each tick

use crate::components::ResourceLedger;
use crate::config::ShipConfig;

/// Advance the mission clock and burn fuel. Food, oxygen, damage and
/// radiation move only through room effects and external events.
pub fn ledger_system(ledger: &mut ResourceLedger, config: &ShipConfig, dt: f32) {
    ledger.mission_duration += config.mission_clock_rate * dt;
    ledger.fuel -= config.fuel_drain_rate * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_drains_at_configured_rate() {
        let mut ledger = ResourceLedger::default();
        let config = ShipConfig::default();

        ledger_system(&mut ledger, &config, 2.0);

        assert!((ledger.fuel - 98.0).abs() < 1e-5);
        assert!((ledger.mission_duration - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_other_resources_untouched() {
        let mut ledger = ResourceLedger::default();
        let config = ShipConfig::default();

        ledger_system(&mut ledger, &config, 10.0);

        assert_eq!(ledger.food, 100.0);
        assert_eq!(ledger.oxygen, 100.0);
        assert_eq!(ledger.damage, 0.0);
        assert_eq!(ledger.radiation, 0.0);
    }
}
