//! Walk system - plans and drives the phased relocation of a crew member to
//! a piece of equipment.
//!
//! A relocation decomposes into up to three ordered, axis-aligned segments:
//! vertical to the ship's center line, horizontal along the ship, vertical
//! to the target. Each segment carries its own duration and directional
//! animation state. The plan lives as a [`WalkPlan`] component on the crew
//! entity while in flight and is stepped by [`walk_system`] inside the
//! shared tick; segments suspend across ticks via stored remaining time, so
//! many crew can walk concurrently without blocking the loop.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{
    ArrivalAction, Axis, CrewMember, Direction, Equipment, Position, Room, Vec2,
};
use crate::stage::Stage;

/// Which leg of the choreography a segment implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    VerticalToCenterline,
    HorizontalAlong,
    VerticalToTarget,
}

/// One timed, axis-aligned phase of a relocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub axis: Axis,
    /// Signed distance the phase rule produced
    pub distance: f32,
    /// `|distance| / speed`
    pub duration: f32,
    /// Animation state shown while this segment runs
    pub direction: Direction,
    /// Local coordinate on `axis` the crew lands on
    pub target: f32,
    /// Zero-duration segments consume no time and issue no stage calls
    pub skip: bool,
}

impl Segment {
    fn new(
        kind: SegmentKind,
        axis: Axis,
        distance: f32,
        direction: Direction,
        target: f32,
        speed: f32,
    ) -> Self {
        let duration = distance.abs() / speed;
        Self {
            kind,
            axis,
            distance,
            duration,
            direction,
            target,
            skip: duration == 0.0,
        }
    }
}

/// In-flight relocation state, attached to the crew entity for the plan's
/// lifetime and removed when the terminal steps run.
pub struct WalkPlan {
    pub segments: Vec<Segment>,
    /// Index of the segment currently executing
    pub current: usize,
    /// Seconds left in the current segment
    pub remaining: f32,
    /// Local coordinate on the segment axis when the segment activated
    pub from: f32,
    /// Whether the current segment has issued its activation stage calls
    pub activated: bool,
    /// Destination equipment
    pub equipment: Entity,
    /// Destination room, handed to the crew member at the terminal step
    pub room: Entity,
    /// Caller-supplied arrival actions, run after the equipment's own
    pub actions: Vec<ArrivalAction>,
}

impl WalkPlan {
    pub fn new(
        segments: Vec<Segment>,
        equipment: Entity,
        room: Entity,
        actions: Vec<ArrivalAction>,
    ) -> Self {
        Self {
            segments,
            current: 0,
            remaining: 0.0,
            from: 0.0,
            activated: false,
            equipment,
            room,
            actions,
        }
    }
}

impl std::fmt::Debug for WalkPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkPlan")
            .field("segments", &self.segments)
            .field("current", &self.current)
            .field("remaining", &self.remaining)
            .field("equipment", &self.equipment)
            .field("room", &self.room)
            .field("actions", &self.actions.len())
            .finish()
    }
}

/// Decompose a relocation into its three segments.
///
/// `crew_world`/`crew_local` are taken after the reparent step, so both are
/// expressed against the destination room. The third segment's distance is
/// measured from the ship origin, not from the crew's position after the
/// first two legs.
pub fn build_segments(
    crew_world: Vec2,
    crew_local: Vec2,
    equip_world: Vec2,
    equip_local: Vec2,
    ship_origin: Vec2,
    speed: f32,
) -> Vec<Segment> {
    assert!(speed > 0.0, "crew speed must be positive");

    let to_centerline = crew_world.y - ship_origin.y;
    let along = equip_local.x - crew_local.x;
    let across = ship_origin.y + equip_world.y;

    vec![
        Segment::new(
            SegmentKind::VerticalToCenterline,
            Axis::Y,
            to_centerline,
            if to_centerline > 0.0 { Direction::Down } else { Direction::Up },
            crew_local.y - to_centerline,
            speed,
        ),
        Segment::new(
            SegmentKind::HorizontalAlong,
            Axis::X,
            along,
            if along < 0.0 { Direction::Left } else { Direction::Right },
            equip_local.x,
            speed,
        ),
        Segment::new(
            SegmentKind::VerticalToTarget,
            Axis::Y,
            across,
            if across > 0.0 { Direction::Up } else { Direction::Down },
            equip_local.y,
            speed,
        ),
    ]
}

/// Step every in-flight walk plan by `dt`, in crew insertion order.
///
/// Intra-tick time carries over: a tick that finishes one segment spends its
/// remainder on the next, so total walk time lands exactly on the sum of
/// segment durations.
pub fn walk_system(world: &mut World, crew_order: &[Entity], stage: &mut dyn Stage, dt: f32) {
    let mut finished: Vec<Entity> = Vec::new();

    for &entity in crew_order {
        let mut plan = match world.get::<&mut WalkPlan>(entity) {
            Ok(plan) => plan,
            Err(_) => continue,
        };
        let mut position = match world.get::<&mut Position>(entity) {
            Ok(position) => position,
            Err(_) => continue,
        };

        let mut budget = dt;
        loop {
            while plan.current < plan.segments.len() && plan.segments[plan.current].skip {
                plan.current += 1;
            }
            if plan.current == plan.segments.len() {
                finished.push(entity);
                break;
            }

            let segment = plan.segments[plan.current];
            if !plan.activated {
                plan.activated = true;
                plan.remaining = segment.duration;
                plan.from = position.local.axis(segment.axis);
                stage.set_animation_state(entity, segment.direction);
                stage.animate_axis_to(entity, segment.axis, segment.target, segment.duration);
            }

            if budget <= 0.0 {
                break;
            }

            let step = budget.min(plan.remaining);
            budget -= step;
            plan.remaining -= step;

            if plan.remaining <= 0.0 {
                position.local.set_axis(segment.axis, segment.target);
                plan.current += 1;
                plan.activated = false;
            } else {
                let t = 1.0 - plan.remaining / segment.duration;
                let value = plan.from + (segment.target - plan.from) * t;
                position.local.set_axis(segment.axis, value);
                break;
            }
        }
    }

    for entity in finished {
        finish_walk(world, entity, stage);
    }
}

/// Terminal steps: idle facing, pause playback, arrival actions in order,
/// then the logical room handover.
fn finish_walk(world: &mut World, crew: Entity, stage: &mut dyn Stage) {
    stage.set_animation_state(crew, Direction::Left);
    stage.pause_all_animations(crew);

    let plan = match world.remove_one::<WalkPlan>(crew) {
        Ok(plan) => plan,
        Err(_) => return,
    };

    // equipment-owned actions first, then the caller's
    let mut owned = match world.get::<&mut Equipment>(plan.equipment) {
        Ok(mut equipment) => std::mem::take(&mut equipment.on_arrival),
        Err(_) => Vec::new(),
    };
    for action in owned.iter_mut() {
        action(world, crew);
    }
    if let Ok(mut equipment) = world.get::<&mut Equipment>(plan.equipment) {
        equipment.on_arrival = owned;
    }

    let mut actions = plan.actions;
    for action in actions.iter_mut() {
        action(world, crew);
    }

    hand_over_room(world, crew, plan.room);
    log::debug!("walk finished for {:?}", crew);
}

/// Reassign a crew member's logical room and keep membership vectors in step.
fn hand_over_room(world: &mut World, crew: Entity, room: Entity) {
    let old_room = match world.get::<&CrewMember>(crew) {
        Ok(member) => member.room,
        Err(_) => return,
    };

    if old_room != room {
        if let Ok(mut old) = world.get::<&mut Room>(old_room) {
            old.crew.retain(|&e| e != crew);
        }
        if let Ok(mut new) = world.get::<&mut Room>(room) {
            if !new.crew.contains(&crew) {
                new.crew.push(crew);
            }
        }
    }

    if let Ok(mut member) = world.get::<&mut CrewMember>(crew) {
        member.room = room;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::RoomCategory;
    use crate::stage::{RecordingStage, StageCall};
    use std::sync::{Arc, Mutex};

    fn flat_segments(to_x: f32, speed: f32) -> Vec<Segment> {
        build_segments(
            Vec2::ZERO,
            Vec2::ZERO,
            Vec2::new(to_x, 0.0),
            Vec2::new(to_x, 0.0),
            Vec2::ZERO,
            speed,
        )
    }

    #[test]
    fn test_single_axis_plan_has_one_live_segment() {
        let segments = flat_segments(3.0, 2.0);

        assert_eq!(segments.len(), 3);
        assert!(segments[0].skip);
        assert!(segments[2].skip);

        let along = &segments[1];
        assert!(!along.skip);
        assert_eq!(along.kind, SegmentKind::HorizontalAlong);
        assert_eq!(along.distance, 3.0);
        assert_eq!(along.duration, 1.5);
        assert_eq!(along.direction, Direction::Right);
        assert_eq!(along.target, 3.0);
    }

    #[test]
    fn test_segment_directions_follow_sign_rules() {
        // crew above the center line, equipment to its left and below
        let segments = build_segments(
            Vec2::new(4.0, 2.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(1.0, -1.5),
            Vec2::new(1.0, -1.5),
            Vec2::ZERO,
            2.0,
        );

        assert_eq!(segments[0].direction, Direction::Down);
        assert_eq!(segments[0].distance, 2.0);
        assert_eq!(segments[0].target, 0.0);

        assert_eq!(segments[1].direction, Direction::Left);
        assert_eq!(segments[1].distance, -3.0);

        // across = ship origin y + equipment world y
        assert_eq!(segments[2].direction, Direction::Down);
        assert_eq!(segments[2].distance, -1.5);
        assert_eq!(segments[2].target, -1.5);
    }

    #[test]
    fn test_across_distance_measured_from_ship_origin() {
        // equipment sits on the center line of a ship whose origin is lifted:
        // the third segment still gets a nonzero distance from the origin rule
        let segments = build_segments(
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 1.0),
            2.0,
        );
        assert_eq!(segments[2].distance, 2.0);
        assert!(!segments[2].skip);
    }

    #[test]
    #[should_panic(expected = "speed must be positive")]
    fn test_zero_speed_is_a_precondition_violation() {
        build_segments(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, 0.0);
    }

    fn walk_fixture(
        to_x: f32,
        actions: Vec<ArrivalAction>,
    ) -> (World, Entity, Entity) {
        let mut world = World::new();
        let room = world.spawn((Room::new("deck", RoomCategory::Other),));
        let equipment = world.spawn((Equipment::new("bench", room, to_x, 0.0),));
        let crew = world.spawn((
            CrewMember::new("ada", 2.0, room),
            Position::new(0.0, 0.0, room),
        ));
        let segments = flat_segments(to_x, 2.0);
        let plan = WalkPlan::new(segments, equipment, room, actions);
        world.insert_one(crew, plan).unwrap();
        (world, crew, room)
    }

    #[test]
    fn test_walk_progresses_linearly() {
        let (mut world, crew, _) = walk_fixture(3.0, Vec::new());
        let mut stage = RecordingStage::new();

        walk_system(&mut world, &[crew], &mut stage, 1.0);
        let x = world.get::<&Position>(crew).unwrap().local.x;
        assert!((x - 2.0).abs() < 1e-4);
        assert!(world.get::<&WalkPlan>(crew).is_ok());

        walk_system(&mut world, &[crew], &mut stage, 0.5);
        let x = world.get::<&Position>(crew).unwrap().local.x;
        assert_eq!(x, 3.0);
        assert!(world.get::<&WalkPlan>(crew).is_err());
    }

    #[test]
    fn test_skipped_segments_issue_no_stage_calls() {
        let (mut world, crew, _) = walk_fixture(3.0, Vec::new());
        let mut stage = RecordingStage::new();

        walk_system(&mut world, &[crew], &mut stage, 2.0);

        let tweens = stage.count(|c| matches!(c, StageCall::AnimateAxisTo { .. }));
        assert_eq!(tweens, 1);
        // activation state switch plus the terminal idle facing
        let states = stage.count(|c| matches!(c, StageCall::SetAnimationState { .. }));
        assert_eq!(states, 2);
    }

    #[test]
    fn test_terminal_steps_run_in_order() {
        let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let a = trace.clone();
        let b = trace.clone();
        let actions: Vec<ArrivalAction> = vec![
            Box::new(move |_, _| a.lock().unwrap().push("A")),
            Box::new(move |_, _| b.lock().unwrap().push("B")),
        ];
        let (mut world, crew, _) = walk_fixture(3.0, actions);
        let mut stage = RecordingStage::new();

        // not yet arrived: nothing runs
        walk_system(&mut world, &[crew], &mut stage, 1.0);
        assert!(trace.lock().unwrap().is_empty());

        walk_system(&mut world, &[crew], &mut stage, 0.5);
        assert_eq!(*trace.lock().unwrap(), vec!["A", "B"]);

        // idle facing then pause, both after the motion
        let n = stage.calls.len();
        assert_eq!(
            stage.calls[n - 2],
            StageCall::SetAnimationState { node: crew, direction: Direction::Left }
        );
        assert_eq!(stage.calls[n - 1], StageCall::PauseAllAnimations { node: crew });
    }

    #[test]
    fn test_room_handed_over_after_actions() {
        let mut world = World::new();
        let old_room = world.spawn((Room::new("quarters", RoomCategory::Sleeping),));
        let new_room = world.spawn((Room::new("gym", RoomCategory::Gym),));
        let equipment = world.spawn((Equipment::new("treadmill", new_room, 3.0, 0.0),));
        let crew = world.spawn((
            CrewMember::new("ada", 2.0, old_room),
            Position::new(0.0, 0.0, new_room),
        ));
        world.get::<&mut Room>(old_room).unwrap().crew.push(crew);

        let seen_room: Arc<Mutex<Option<Entity>>> = Arc::new(Mutex::new(None));
        let probe = seen_room.clone();
        let actions: Vec<ArrivalAction> = vec![Box::new(move |w, c| {
            let room = w.get::<&CrewMember>(c).unwrap().room;
            *probe.lock().unwrap() = Some(room);
        })];

        let segments = flat_segments(3.0, 2.0);
        world
            .insert_one(crew, WalkPlan::new(segments, equipment, new_room, actions))
            .unwrap();

        walk_system(&mut world, &[crew], &mut RecordingStage::new(), 2.0);

        // the action observed the pre-handover room
        assert_eq!(*seen_room.lock().unwrap(), Some(old_room));
        assert_eq!(world.get::<&CrewMember>(crew).unwrap().room, new_room);
        assert!(world.get::<&Room>(old_room).unwrap().crew.is_empty());
        assert_eq!(world.get::<&Room>(new_room).unwrap().crew, vec![crew]);
    }

    #[test]
    fn test_equipment_actions_run_before_callers() {
        let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let owned = trace.clone();
        let supplied = trace.clone();

        let (mut world, crew, _) = walk_fixture(
            3.0,
            vec![Box::new(move |_, _| supplied.lock().unwrap().push("caller"))],
        );
        let equipment = world.get::<&WalkPlan>(crew).unwrap().equipment;
        world
            .get::<&mut Equipment>(equipment)
            .unwrap()
            .on_arrival
            .push(Box::new(move |_, _| owned.lock().unwrap().push("equipment")));

        walk_system(&mut world, &[crew], &mut RecordingStage::new(), 2.0);
        assert_eq!(*trace.lock().unwrap(), vec!["equipment", "caller"]);
    }

    #[test]
    fn test_degenerate_plan_still_runs_terminal_steps() {
        let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let probe = trace.clone();
        let (mut world, crew, _) = walk_fixture(
            0.0,
            vec![Box::new(move |_, _| probe.lock().unwrap().push("A"))],
        );
        let mut stage = RecordingStage::new();

        walk_system(&mut world, &[crew], &mut stage, 0.016);

        assert_eq!(*trace.lock().unwrap(), vec!["A"]);
        assert!(world.get::<&WalkPlan>(crew).is_err());
        assert_eq!(stage.count(|c| matches!(c, StageCall::AnimateAxisTo { .. })), 0);
        assert_eq!(stage.count(|c| matches!(c, StageCall::PauseAllAnimations { .. })), 1);
    }

    #[test]
    fn test_tick_remainder_carries_into_next_segment() {
        let mut world = World::new();
        let room = world.spawn((Room::new("deck", RoomCategory::Other),));
        let equipment = world.spawn((Equipment::new("console", room, 2.0, 0.0),));
        let crew = world.spawn((
            CrewMember::new("ada", 2.0, room),
            Position::new(0.0, 2.0, room),
        ));
        // two live segments: down to the center line, then right
        let segments = build_segments(
            Vec2::new(0.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::ZERO,
            2.0,
        );
        assert!(!segments[0].skip);
        assert!(!segments[1].skip);
        assert!(segments[2].skip);
        world
            .insert_one(crew, WalkPlan::new(segments, equipment, room, Vec::new()))
            .unwrap();

        let mut stage = RecordingStage::new();
        walk_system(&mut world, &[crew], &mut stage, 1.5);

        let position = world.get::<&Position>(crew).unwrap();
        // first second finished the vertical leg, the remaining half second
        // spent on the horizontal one
        assert_eq!(position.local.y, 0.0);
        assert!((position.local.x - 1.0).abs() < 1e-4);
        drop(position);

        walk_system(&mut world, &[crew], &mut stage, 0.5);
        assert_eq!(world.get::<&Position>(crew).unwrap().local.x, 2.0);
        assert!(world.get::<&WalkPlan>(crew).is_err());
    }
}
