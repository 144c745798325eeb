//! Ship configuration - authored constants the simulation runs with.

use serde::{Deserialize, Serialize};

use crate::components::Vec2;

/// Whether vitals and resources saturate at their nominal 0-100 bounds or
/// drift freely past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampPolicy {
    /// Values drift outside [0, 100]; an external watcher reacts to extremes.
    Unbounded,
    /// Values saturate at the band edges after every tick.
    Saturating,
}

impl Default for ClampPolicy {
    fn default() -> Self {
        ClampPolicy::Unbounded
    }
}

/// Configuration for a ship simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipConfig {
    pub name: String,
    /// World-space origin of the ship; the walk choreography's center line
    /// runs through `origin.y`.
    pub origin: Vec2,
    /// Each added room's world x is shifted left by its ordinal times this
    pub room_spacing: f32,
    /// Default crew walk speed in units per second
    pub walk_speed: f32,
    /// Fuel burned per second of mission time
    pub fuel_drain_rate: f32,
    /// Fraction of elapsed time added to the mission-duration clock
    pub mission_clock_rate: f32,
    pub clamp_policy: ClampPolicy,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            name: "Wayfarer".to_string(),
            origin: Vec2::ZERO,
            room_spacing: 5.4,
            walk_speed: 2.0,
            fuel_drain_rate: 1.0,
            mission_clock_rate: 0.01,
            clamp_policy: ClampPolicy::default(),
        }
    }
}
