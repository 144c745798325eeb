//! Vitals system - per-tick health attribute updates driven by room category

use hecs::{Entity, World};

use crate::components::{CrewMember, ResourceLedger, Room, RoomCategory, Vitals};
use crate::config::ClampPolicy;
use crate::stage::Stage;

/// Health-bar threshold above which the displayed value reads as good
pub const GOOD_LEVEL: f32 = 80.0;
/// Health-bar threshold below which the displayed value reads as bad
pub const BAD_LEVEL: f32 = 20.0;

/// Apply one tick of attribute drift to every crew member, in crew
/// insertion order.
///
/// All rule branches are independent; a room can trigger several at once.
/// Ledger writes (`food`) happen in the iteration order given by
/// `crew_order`, which keeps tick-to-tick behavior deterministic.
pub fn vitals_system(
    world: &mut World,
    crew_order: &[Entity],
    ledger: &mut ResourceLedger,
    daylight_factor: f32,
    clamp: ClampPolicy,
    dt: f32,
    stage: &mut dyn Stage,
) {
    for &entity in crew_order {
        let category = {
            let member = match world.get::<&CrewMember>(entity) {
                Ok(member) => member,
                Err(_) => continue,
            };
            match world.get::<&Room>(member.room) {
                Ok(room) => room.category,
                Err(_) => continue,
            }
        };

        let mut vitals = match world.get::<&mut Vitals>(entity) {
            Ok(vitals) => vitals,
            Err(_) => continue,
        };

        // crew radiation tracks the ship's radiation level
        if category != RoomCategory::SafeRoom {
            vitals.radiation += 0.01 * ledger.radiation * dt;
        }

        if category != RoomCategory::MedBay {
            vitals.radiation -= 0.01 * dt;
        }

        if category == RoomCategory::Sleeping {
            vitals.fatigue -= 0.1 * dt;
        } else {
            vitals.fatigue += 0.1 * dt;
        }

        if category == RoomCategory::Gym {
            vitals.bone_density += 0.1 * dt;
            vitals.fatigue += 0.2 * dt;
        } else {
            vitals.bone_density -= 0.1 * dt;
        }

        if category == RoomCategory::Cafeteria {
            vitals.stress -= 0.1 * dt;
            // eating draws on stores with the daylight factor, not dt
            ledger.food -= 0.1 * daylight_factor;
        }

        if category == RoomCategory::Greenhouse {
            ledger.food += 0.1 * dt;
        }

        if clamp == ClampPolicy::Saturating {
            vitals.clamp_to_bounds();
        }

        let health = vitals.overall_health();
        if health != vitals.displayed_health {
            vitals.displayed_health = health;
            stage.set_health_bar(entity, health, GOOD_LEVEL, BAD_LEVEL);
        }
    }
}
