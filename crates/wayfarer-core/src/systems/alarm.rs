//! Alarm system - ship-wide two-state hazard indicator

use hecs::Entity;

use crate::stage::{BlinkHandle, IndicatorColor, SoundCue, Stage};

/// Half-period of the room indicator blink while the alarm is active
const BLINK_HALF_PERIOD: f32 = 0.5;
/// Siren fade-out time when the alarm clears
const SIREN_FADE: f32 = 1.0;

/// Alarm state owned by the ship: the warning flag plus one blink cancel
/// handle per room while active.
#[derive(Debug, Default)]
pub struct AlarmState {
    active: bool,
    blink_handles: Vec<BlinkHandle>,
}

impl AlarmState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle_count(&self) -> usize {
        self.blink_handles.len()
    }
}

/// Transition to ACTIVE: looped siren plus a blink per room. Re-triggering
/// while already active is a no-op.
pub fn raise_alarm(state: &mut AlarmState, rooms: &[Entity], stage: &mut dyn Stage) {
    if state.active {
        return;
    }
    state.active = true;

    stage.play_looped(SoundCue::Siren);
    for &room in rooms {
        let handle = stage.blink_color(
            room,
            IndicatorColor::Neutral,
            IndicatorColor::Alert,
            BLINK_HALF_PERIOD,
        );
        state.blink_handles.push(handle);
    }
    log::info!("alarm raised across {} rooms", rooms.len());
}

/// Transition to INACTIVE: fade the siren, cancel every blink, settle every
/// room back to neutral. Re-triggering while already inactive is a no-op.
pub fn clear_alarm(state: &mut AlarmState, rooms: &[Entity], stage: &mut dyn Stage) {
    if !state.active {
        return;
    }
    state.active = false;

    stage.fade_out(SoundCue::Siren, SIREN_FADE);
    for handle in state.blink_handles.drain(..) {
        stage.cancel_blink(handle);
    }
    for &room in rooms {
        stage.set_color(room, IndicatorColor::Neutral);
    }
    log::info!("alarm cleared");
}
