//! Crew-related components: CrewMember, Vitals, AnimationSet.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use super::common::DirectionMap;
use crate::stage::AssetHandle;

/// Identity and locomotion data for one crew member.
#[derive(Debug, Clone)]
pub struct CrewMember {
    pub name: String,
    /// Walk speed in world units per second
    pub speed: f32,
    /// Whether this crew member is the ship's current selection.
    /// At most one crew member per ship is active.
    pub active: bool,
    /// The logical room - drives vitals branching. Only reassigned by the
    /// walk plan's terminal step, never mid-flight.
    pub room: Entity,
}

impl CrewMember {
    pub fn new(name: impl Into<String>, speed: f32, room: Entity) -> Self {
        Self {
            name: name.into(),
            speed,
            active: false,
            room,
        }
    }
}

/// Health attribute vector. Values are conceptually 0-100 but drift outside
/// that range unless the ship is configured with a saturating clamp policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vitals {
    pub stress: f32,
    pub fatigue: f32,
    pub bone_density: f32,
    pub radiation: f32,
    /// Last value pushed to the health-bar capability. Display writes are
    /// skipped while the derived score is unchanged.
    pub displayed_health: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            stress: 0.0,
            fatigue: 0.0,
            bone_density: 100.0,
            radiation: 0.0,
            displayed_health: 100.0,
        }
    }
}

impl Vitals {
    /// Derived health score. Recomputed every tick, never authoritative.
    pub fn overall_health(&self) -> f32 {
        (self.bone_density
            + (100.0 - self.stress)
            + (100.0 - self.fatigue)
            + (100.0 - self.radiation))
            * 0.25
    }

    /// Saturate every attribute to the nominal 0-100 band.
    pub fn clamp_to_bounds(&mut self) {
        self.stress = self.stress.clamp(0.0, 100.0);
        self.fatigue = self.fatigue.clamp(0.0, 100.0);
        self.bone_density = self.bone_density.clamp(0.0, 100.0);
        self.radiation = self.radiation.clamp(0.0, 100.0);
    }
}

/// Direction-indexed animation assets for one crew member, resolved once at
/// spawn through the asset-variant capability (crew-named set when present,
/// shared default otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSet {
    pub animations: DirectionMap<AssetHandle>,
}
