//! Wayfarer Core - Spaceship Crew Simulation Engine
//!
//! A tick-driven simulation of a small spaceship crew: health attributes
//! drift with the room each crew member occupies, and crew can be
//! dispatched to walk, through a phased axis-aligned choreography, to a
//! piece of equipment.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: crew members, rooms, equipment
//! - **Components**: pure data attached to entities (Position, Vitals,
//!   WalkPlan, etc.)
//! - **Systems**: logic that queries and updates components each tick
//!
//! Everything visual or audible goes through the [`stage::Stage`]
//! capability trait; the core itself never touches a renderer or sound
//! device.
//!
//! # Example
//!
//! ```rust,no_run
//! use wayfarer_core::prelude::*;
//! use wayfarer_core::stage::NullStage;
//!
//! let mut stage = NullStage;
//! let mut ship = Ship::new(ShipConfig::default());
//!
//! ship.add_room("sleeping", RoomCategory::Sleeping, 0.0, 0.0).unwrap();
//! ship.add_room("gym", RoomCategory::Gym, 0.0, 0.0).unwrap();
//! ship.add_crew("ada", "sleeping", 0.0, 0.0, &mut stage).unwrap();
//! ship.add_equipment("treadmill", "gym", 1.0, 0.0).unwrap();
//!
//! ship.begin_walk("ada", "treadmill", Vec::new(), &mut stage).unwrap();
//!
//! // Run simulation
//! loop {
//!     ship.update(1.0 / 60.0, &mut stage); // 60 FPS
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod stage;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{ClampPolicy, ShipConfig};
    pub use crate::engine::Ship;
    pub use crate::error::SimError;
}
