//! Stage capabilities - the narrow surface the simulation consumes from the
//! excluded presentation collaborators (scene graph, animation, audio,
//! indicator lights, asset resolution).
//!
//! The core never touches a renderer or sound device directly; every visual
//! or audible effect goes through a [`Stage`] trait object supplied by the
//! caller. [`NullStage`] discards everything; [`RecordingStage`] captures
//! the call sequence and is what the unit tests and the headless harness
//! assert against.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::components::{Axis, Direction};

/// Opaque handle to an animation asset owned by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(pub u32);

/// Cancel handle for a looping color blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlinkHandle(pub u64);

/// Sound effects the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Siren,
}

/// Indicator colors for room hazard lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorColor {
    Neutral,
    Alert,
}

/// Presentation capabilities consumed by the simulation core.
///
/// Nodes are addressed by the entity they belong to; the implementor maps
/// entities to whatever scene objects it maintains.
pub trait Stage {
    /// Place a node in its parent's coordinate space.
    fn set_local_position(&mut self, node: Entity, x: f32, y: f32);
    /// Place a node in world coordinates.
    fn set_world_position(&mut self, node: Entity, x: f32, y: f32);
    /// Tween one axis of a node to `target` over `duration` seconds,
    /// linearly.
    fn animate_axis_to(&mut self, node: Entity, axis: Axis, target: f32, duration: f32);
    /// Switch which directional animation a node shows.
    fn set_animation_state(&mut self, node: Entity, direction: Direction);
    /// Start all four directional animations playing at once.
    fn start_all_animations(&mut self, node: Entity);
    /// Pause all four directional animations.
    fn pause_all_animations(&mut self, node: Entity);
    /// Push a health-bar value. Color selection between `good_level` and
    /// `bad_level` is the implementor's business.
    fn set_health_bar(&mut self, node: Entity, value: f32, good_level: f32, bad_level: f32);
    /// Start looped playback of a sound cue.
    fn play_looped(&mut self, cue: SoundCue);
    /// Fade a playing cue out over `duration` seconds.
    fn fade_out(&mut self, cue: SoundCue, duration: f32);
    /// Begin a looping blink between two colors with the given half-period.
    fn blink_color(
        &mut self,
        node: Entity,
        a: IndicatorColor,
        b: IndicatorColor,
        half_period: f32,
    ) -> BlinkHandle;
    /// Cancel a blink previously started with [`Stage::blink_color`].
    fn cancel_blink(&mut self, handle: BlinkHandle);
    /// Set a node's indicator to a steady color.
    fn set_color(&mut self, node: Entity, color: IndicatorColor);
    /// Resolve the animation asset for a named crew member and direction,
    /// falling back to the shared default set when no crew-specific asset
    /// exists.
    fn resolve_variant(&mut self, name: &str, direction: Direction) -> AssetHandle;
}

/// Stage implementation that discards every call.
pub struct NullStage;

impl Stage for NullStage {
    fn set_local_position(&mut self, _node: Entity, _x: f32, _y: f32) {}
    fn set_world_position(&mut self, _node: Entity, _x: f32, _y: f32) {}
    fn animate_axis_to(&mut self, _node: Entity, _axis: Axis, _target: f32, _duration: f32) {}
    fn set_animation_state(&mut self, _node: Entity, _direction: Direction) {}
    fn start_all_animations(&mut self, _node: Entity) {}
    fn pause_all_animations(&mut self, _node: Entity) {}
    fn set_health_bar(&mut self, _node: Entity, _value: f32, _good: f32, _bad: f32) {}
    fn play_looped(&mut self, _cue: SoundCue) {}
    fn fade_out(&mut self, _cue: SoundCue, _duration: f32) {}
    fn blink_color(
        &mut self,
        _node: Entity,
        _a: IndicatorColor,
        _b: IndicatorColor,
        _half_period: f32,
    ) -> BlinkHandle {
        BlinkHandle(0)
    }
    fn cancel_blink(&mut self, _handle: BlinkHandle) {}
    fn set_color(&mut self, _node: Entity, _color: IndicatorColor) {}
    fn resolve_variant(&mut self, _name: &str, _direction: Direction) -> AssetHandle {
        AssetHandle::default()
    }
}

/// One captured capability call.
#[derive(Debug, Clone, PartialEq)]
pub enum StageCall {
    SetLocalPosition { node: Entity, x: f32, y: f32 },
    SetWorldPosition { node: Entity, x: f32, y: f32 },
    AnimateAxisTo { node: Entity, axis: Axis, target: f32, duration: f32 },
    SetAnimationState { node: Entity, direction: Direction },
    StartAllAnimations { node: Entity },
    PauseAllAnimations { node: Entity },
    SetHealthBar { node: Entity, value: f32, good_level: f32, bad_level: f32 },
    PlayLooped { cue: SoundCue },
    FadeOut { cue: SoundCue, duration: f32 },
    BlinkColor {
        node: Entity,
        a: IndicatorColor,
        b: IndicatorColor,
        half_period: f32,
        handle: BlinkHandle,
    },
    CancelBlink { handle: BlinkHandle },
    SetColor { node: Entity, color: IndicatorColor },
    ResolveVariant { name: String, direction: Direction, handle: AssetHandle },
}

/// Stage implementation that records every call in order.
#[derive(Default)]
pub struct RecordingStage {
    pub calls: Vec<StageCall>,
    next_blink: u64,
    next_asset: u32,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded calls matching the predicate.
    pub fn count(&self, pred: impl Fn(&StageCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Stage for RecordingStage {
    fn set_local_position(&mut self, node: Entity, x: f32, y: f32) {
        self.calls.push(StageCall::SetLocalPosition { node, x, y });
    }

    fn set_world_position(&mut self, node: Entity, x: f32, y: f32) {
        self.calls.push(StageCall::SetWorldPosition { node, x, y });
    }

    fn animate_axis_to(&mut self, node: Entity, axis: Axis, target: f32, duration: f32) {
        self.calls.push(StageCall::AnimateAxisTo { node, axis, target, duration });
    }

    fn set_animation_state(&mut self, node: Entity, direction: Direction) {
        self.calls.push(StageCall::SetAnimationState { node, direction });
    }

    fn start_all_animations(&mut self, node: Entity) {
        self.calls.push(StageCall::StartAllAnimations { node });
    }

    fn pause_all_animations(&mut self, node: Entity) {
        self.calls.push(StageCall::PauseAllAnimations { node });
    }

    fn set_health_bar(&mut self, node: Entity, value: f32, good_level: f32, bad_level: f32) {
        self.calls.push(StageCall::SetHealthBar { node, value, good_level, bad_level });
    }

    fn play_looped(&mut self, cue: SoundCue) {
        self.calls.push(StageCall::PlayLooped { cue });
    }

    fn fade_out(&mut self, cue: SoundCue, duration: f32) {
        self.calls.push(StageCall::FadeOut { cue, duration });
    }

    fn blink_color(
        &mut self,
        node: Entity,
        a: IndicatorColor,
        b: IndicatorColor,
        half_period: f32,
    ) -> BlinkHandle {
        self.next_blink += 1;
        let handle = BlinkHandle(self.next_blink);
        self.calls.push(StageCall::BlinkColor { node, a, b, half_period, handle });
        handle
    }

    fn cancel_blink(&mut self, handle: BlinkHandle) {
        self.calls.push(StageCall::CancelBlink { handle });
    }

    fn set_color(&mut self, node: Entity, color: IndicatorColor) {
        self.calls.push(StageCall::SetColor { node, color });
    }

    fn resolve_variant(&mut self, name: &str, direction: Direction) -> AssetHandle {
        self.next_asset += 1;
        let handle = AssetHandle(self.next_asset);
        self.calls.push(StageCall::ResolveVariant {
            name: name.to_string(),
            direction,
            handle,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_stage_orders_calls() {
        let mut stage = RecordingStage::new();
        let mut world = hecs::World::new();
        let node = world.spawn(());

        stage.play_looped(SoundCue::Siren);
        stage.set_animation_state(node, Direction::Left);

        assert_eq!(stage.calls.len(), 2);
        assert_eq!(stage.calls[0], StageCall::PlayLooped { cue: SoundCue::Siren });
        assert_eq!(
            stage.calls[1],
            StageCall::SetAnimationState { node, direction: Direction::Left }
        );
    }

    #[test]
    fn test_recording_stage_blink_handles_are_unique() {
        let mut stage = RecordingStage::new();
        let mut world = hecs::World::new();
        let node = world.spawn(());

        let a = stage.blink_color(node, IndicatorColor::Neutral, IndicatorColor::Alert, 0.5);
        let b = stage.blink_color(node, IndicatorColor::Neutral, IndicatorColor::Alert, 0.5);
        assert_ne!(a, b);
    }
}
