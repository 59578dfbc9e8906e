//! Jump legality and impulse.
//!
//! A jump is legal while grounded, or while airborne with air jumps left
//! (`jump_phase < max_air_jumps`). The impulse is applied along the contact
//! normal (straight up when airborne) and is sized so a jump from rest reaches
//! `jump_height` under the body's gravity. Speed the body already has along the
//! normal is subtracted, so repeated jumps don't stack height.

use crate::{
    config::MovementConfig,
    types::{ContactState, KinematicState, Vec3},
};

/// Launch speed that reaches `height` under `gravity`: `sqrt(2 * g * h)`.
///
/// Non-positive or non-finite gravity or height yields 0.
#[inline]
pub fn jump_speed(gravity_magnitude: f32, height: f32) -> f32 {
    if !gravity_magnitude.is_finite() || !height.is_finite() {
        return 0.0;
    }
    (2.0 * gravity_magnitude.max(0.0) * height.max(0.0)).sqrt()
}

#[derive(Clone, Copy, Debug)]
pub struct JumpController {
    jump_height: f32,
    max_air_jumps: u32,
}

impl JumpController {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            jump_height: config.jump_height(),
            max_air_jumps: config.max_air_jumps(),
        }
    }

    #[inline]
    pub fn can_jump(&self, state: &KinematicState, contact: &ContactState) -> bool {
        contact.grounded || state.jump_phase < self.max_air_jumps
    }

    /// Attempt a jump from `state.velocity`.
    ///
    /// On success, increments `jump_phase`, stores and returns the new velocity.
    /// Returns `None` (and leaves `state` untouched) when no jump is available.
    pub fn try_jump(
        &self,
        state: &mut KinematicState,
        contact: &ContactState,
        gravity_magnitude: f32,
    ) -> Option<Vec3> {
        if !self.can_jump(state, contact) {
            log::debug!(
                "Jump rejected: airborne with jump_phase={} of {}",
                state.jump_phase,
                self.max_air_jumps
            );
            return None;
        }

        state.jump_phase += 1;

        let normal = contact.contact_normal;
        let mut speed = jump_speed(gravity_magnitude, self.jump_height);
        let aligned_speed = state.velocity.dot(&normal);
        if aligned_speed > 0.0 {
            speed = (speed - aligned_speed).max(0.0);
        }

        state.velocity += normal * speed;
        log::debug!(
            "Jump accepted: phase={} speed={speed:.3} grounded={}",
            state.jump_phase,
            contact.grounded
        );

        Some(state.velocity)
    }
}
