//! Ship structure components: Room, Equipment, ResourceLedger.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::common::Vec2;

/// Room category - selects which simulation rules apply to occupants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    Sleeping,
    Gym,
    Cafeteria,
    Greenhouse,
    SafeRoom,
    MedBay,
    Other,
}

/// Room component - one compartment in the ship's ordered sequence.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub category: RoomCategory,
    /// Ordinal in the ship's room sequence. Drives layout spacing and the
    /// deterministic room iteration order.
    pub index: usize,
    /// World-space origin of the room's coordinate frame
    pub origin: Vec2,
    /// Crew entities whose logical room this is
    pub crew: Vec<Entity>,
    /// Equipment entities anchored in this room
    pub equipment: Vec<Entity>,
}

impl Room {
    pub fn new(name: impl Into<String>, category: RoomCategory) -> Self {
        Self {
            name: name.into(),
            category,
            index: 0,
            origin: Vec2::ZERO,
            crew: Vec::new(),
            equipment: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }
}

/// An action run when a crew member finishes a walk. Receives the world and
/// the arriving crew entity.
pub type ArrivalAction = Box<dyn FnMut(&mut World, Entity) + Send + Sync>;

/// A fixed anchor point crew can be dispatched to.
pub struct Equipment {
    pub name: String,
    /// Owning room
    pub room: Entity,
    /// Position within the owning room
    pub local: Vec2,
    /// Actions run on every arrival, before any caller-supplied ones
    pub on_arrival: Vec<ArrivalAction>,
}

impl Equipment {
    pub fn new(name: impl Into<String>, room: Entity, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            room,
            local: Vec2::new(x, y),
            on_arrival: Vec::new(),
        }
    }
}

impl std::fmt::Debug for Equipment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Equipment")
            .field("name", &self.name)
            .field("room", &self.room)
            .field("local", &self.local)
            .field("on_arrival", &self.on_arrival.len())
            .finish()
    }
}

/// Ship-wide consumables, mutated by the ledger tick and by room effects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub fuel: f32,
    pub food: f32,
    pub oxygen: f32,
    pub damage: f32,
    pub radiation: f32,
    pub mission_duration: f32,
}

impl Default for ResourceLedger {
    fn default() -> Self {
        Self {
            fuel: 100.0,
            food: 100.0,
            oxygen: 100.0,
            damage: 0.0,
            radiation: 0.0,
            mission_duration: 0.0,
        }
    }
}
