//! Ship engine - main entry point for running the simulation

use hecs::{Entity, World};

use crate::components::{
    AnimationSet, ArrivalAction, CrewMember, Direction, DirectionMap, Equipment, Position,
    ResourceLedger, Room, RoomCategory, Vitals,
};
use crate::config::ShipConfig;
use crate::error::SimError;
use crate::stage::Stage;
use crate::systems::{
    clear_alarm, ledger_system, raise_alarm, vitals_system, walk_system, AlarmState, WalkPlan,
};

/// A ship and everything aboard it.
///
/// Owns the ECS world plus the insertion-ordered registries that give rooms
/// their layout order and crew their deterministic tick order. All mutation
/// happens on the tick thread; walk plans suspend across ticks rather than
/// blocking it.
pub struct Ship {
    /// ECS world containing rooms, crew and equipment
    pub world: World,
    /// Ship-wide consumables
    pub resources: ResourceLedger,
    config: ShipConfig,
    /// Rooms in layout order
    rooms: Vec<(String, Entity)>,
    /// Crew in tick-processing order
    crew: Vec<(String, Entity)>,
    equipment: Vec<(String, Entity)>,
    alarm: AlarmState,
    /// The one crew member currently selected, if any
    active: Option<Entity>,
    /// Externally supplied environmental scalar used by cafeteria food draw
    daylight_factor: f32,
    /// Simulation time in seconds since start
    sim_time: f64,
}

impl Ship {
    pub fn new(config: ShipConfig) -> Self {
        Self {
            world: World::new(),
            resources: ResourceLedger::default(),
            config,
            rooms: Vec::new(),
            crew: Vec::new(),
            equipment: Vec::new(),
            alarm: AlarmState::new(),
            active: None,
            daylight_factor: 1.0,
            sim_time: 0.0,
        }
    }

    /// Append a room to the ship's sequence. The room's world x is shifted
    /// left by its ordinal times the configured spacing, so rooms line up
    /// along the hull in insertion order.
    pub fn add_room(
        &mut self,
        name: &str,
        category: RoomCategory,
        x: f32,
        y: f32,
    ) -> Result<Entity, SimError> {
        if self.rooms.iter().any(|(n, _)| n == name) {
            return Err(SimError::DuplicateName(name.to_string()));
        }
        let index = self.rooms.len();
        let origin_x = x - index as f32 * self.config.room_spacing;
        let room = Room::new(name, category)
            .with_index(index)
            .with_origin(origin_x, y);
        let entity = self.world.spawn((room,));
        self.rooms.push((name.to_string(), entity));
        Ok(entity)
    }

    /// Register a crew member in the given room. Resolves the four
    /// directional animation variants through the stage, then leaves the
    /// new member idle facing left with playback paused.
    pub fn add_crew(
        &mut self,
        name: &str,
        room: &str,
        x: f32,
        y: f32,
        stage: &mut dyn Stage,
    ) -> Result<Entity, SimError> {
        if self.crew.iter().any(|(n, _)| n == name) {
            return Err(SimError::DuplicateName(name.to_string()));
        }
        let room_entity = self.room_entity(room)?;

        let animations = AnimationSet {
            animations: DirectionMap::from_fn(|direction| stage.resolve_variant(name, direction)),
        };
        let entity = self.world.spawn((
            CrewMember::new(name, self.config.walk_speed, room_entity),
            Vitals::default(),
            Position::new(x, y, room_entity),
            animations,
        ));
        self.world
            .get::<&mut Room>(room_entity)
            .expect("room exists")
            .crew
            .push(entity);

        stage.set_local_position(entity, x, y);
        stage.set_animation_state(entity, Direction::Left);
        stage.pause_all_animations(entity);

        self.crew.push((name.to_string(), entity));
        log::debug!("crew {} joined in {}", name, room);
        Ok(entity)
    }

    /// Anchor a piece of equipment in the given room.
    pub fn add_equipment(
        &mut self,
        name: &str,
        room: &str,
        x: f32,
        y: f32,
    ) -> Result<Entity, SimError> {
        if self.equipment.iter().any(|(n, _)| n == name) {
            return Err(SimError::DuplicateName(name.to_string()));
        }
        let room_entity = self.room_entity(room)?;
        let entity = self.world.spawn((Equipment::new(name, room_entity, x, y),));
        self.world
            .get::<&mut Room>(room_entity)
            .expect("room exists")
            .equipment
            .push(entity);
        self.equipment.push((name.to_string(), entity));
        Ok(entity)
    }

    /// Attach an action run on every arrival at the named equipment, before
    /// any caller-supplied actions.
    pub fn add_arrival_action(
        &mut self,
        equipment: &str,
        action: ArrivalAction,
    ) -> Result<(), SimError> {
        let entity = self.equipment_entity(equipment)?;
        self.world
            .get::<&mut Equipment>(entity)
            .expect("equipment exists")
            .on_arrival
            .push(action);
        Ok(())
    }

    /// Make one crew member the ship's selection, deactivating all others.
    pub fn select_active(&mut self, name: &str) -> Result<(), SimError> {
        let target = self.crew_entity(name)?;
        for &(_, entity) in &self.crew {
            if let Ok(mut member) = self.world.get::<&mut CrewMember>(entity) {
                member.active = entity == target;
            }
        }
        self.active = Some(target);
        Ok(())
    }

    /// Start a walk plan moving a crew member to a piece of equipment.
    ///
    /// Fails fast on unknown names, on equipment whose room has vanished,
    /// and on a crew member that already has a plan in flight.
    pub fn begin_walk(
        &mut self,
        crew: &str,
        equipment: &str,
        actions: Vec<ArrivalAction>,
        stage: &mut dyn Stage,
    ) -> Result<(), SimError> {
        let crew_entity = self.crew_entity(crew)?;
        let equipment_entity = self.equipment_entity(equipment)?;

        if self.world.get::<&WalkPlan>(crew_entity).is_ok() {
            return Err(SimError::WalkInProgress(crew.to_string()));
        }

        let (dest_room, equip_local) = {
            let item = self
                .world
                .get::<&Equipment>(equipment_entity)
                .expect("equipment exists");
            (item.room, item.local)
        };
        let dest_origin = self
            .world
            .get::<&Room>(dest_room)
            .map_err(|_| SimError::DetachedRoom(equipment.to_string()))?
            .origin;

        // coordinate-space change preserving world position; the logical
        // room stays put until the plan's terminal step
        let parent = self.world.get::<&Position>(crew_entity).expect("crew exists").parent;
        if parent != dest_room {
            let old_origin = self
                .world
                .get::<&Room>(parent)
                .map_err(|_| SimError::DetachedRoom(crew.to_string()))?
                .origin;
            let mut position = self.world.get::<&mut Position>(crew_entity).expect("crew exists");
            let world_pos = old_origin + position.local;
            position.parent = dest_room;
            position.local = world_pos - dest_origin;
            drop(position);
            stage.set_world_position(crew_entity, world_pos.x, world_pos.y);
        }

        let crew_local = self.world.get::<&Position>(crew_entity).expect("crew exists").local;
        let speed = self.world.get::<&CrewMember>(crew_entity).expect("crew exists").speed;
        let crew_world = dest_origin + crew_local;
        let equip_world = dest_origin + equip_local;

        let segments = crate::systems::build_segments(
            crew_world,
            crew_local,
            equip_world,
            equip_local,
            self.config.origin,
            speed,
        );

        // batch-start all four directional animations so the right one is
        // already playing when the first state switch lands
        if segments.iter().any(|s| !s.skip) {
            stage.start_all_animations(crew_entity);
        }

        log::debug!(
            "walk plan for {}: {} live segment(s) toward {}",
            crew,
            segments.iter().filter(|s| !s.skip).count(),
            equipment,
        );
        let plan = WalkPlan::new(segments, equipment_entity, dest_room, actions);
        let _ = self.world.insert_one(crew_entity, plan);
        Ok(())
    }

    /// Drive the ship-wide alarm. Re-triggering the current state is a
    /// no-op in both directions.
    pub fn set_alarm(&mut self, on: bool, stage: &mut dyn Stage) {
        let rooms: Vec<Entity> = self.rooms.iter().map(|&(_, e)| e).collect();
        if on {
            raise_alarm(&mut self.alarm, &rooms, stage);
        } else {
            clear_alarm(&mut self.alarm, &rooms, stage);
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(&mut self, dt: f32, stage: &mut dyn Stage) {
        self.sim_time += dt as f64;
        let order: Vec<Entity> = self.crew.iter().map(|&(_, e)| e).collect();

        walk_system(&mut self.world, &order, stage, dt);
        vitals_system(
            &mut self.world,
            &order,
            &mut self.resources,
            self.daylight_factor,
            self.config.clamp_policy,
            dt,
            stage,
        );
        ledger_system(&mut self.resources, &self.config, dt);
    }

    pub fn set_daylight_factor(&mut self, factor: f32) {
        self.daylight_factor = factor;
    }

    pub fn daylight_factor(&self) -> f32 {
        self.daylight_factor
    }

    pub fn warning_state(&self) -> bool {
        self.alarm.is_active()
    }

    /// The currently selected crew member, if any
    pub fn active_crew(&self) -> Option<Entity> {
        self.active
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// Simulation time in seconds since start
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn crew_count(&self) -> usize {
        self.crew.len()
    }

    pub fn equipment_count(&self) -> usize {
        self.equipment.len()
    }

    /// Rooms in layout order
    pub fn rooms(&self) -> &[(String, Entity)] {
        &self.rooms
    }

    /// Crew in tick-processing order
    pub fn crew(&self) -> &[(String, Entity)] {
        &self.crew
    }

    pub fn room_entity(&self, name: &str) -> Result<Entity, SimError> {
        self.rooms
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, e)| e)
            .ok_or_else(|| SimError::UnknownRoom(name.to_string()))
    }

    pub fn crew_entity(&self, name: &str) -> Result<Entity, SimError> {
        self.crew
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, e)| e)
            .ok_or_else(|| SimError::UnknownCrew(name.to_string()))
    }

    pub fn equipment_entity(&self, name: &str) -> Result<Entity, SimError> {
        self.equipment
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, e)| e)
            .ok_or_else(|| SimError::UnknownEquipment(name.to_string()))
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new(ShipConfig::default())
    }
}
