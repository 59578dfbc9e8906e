/*!
Core data types and math aliases shared by the controller modules.

This module intentionally contains no algorithms. It defines the data
exchanged between:
- contact:       per-tick ground classification (produces `ContactState`)
- solver:        horizontal velocity convergence (reads `ContactState`)
- jump:          jump legality and impulse (reads `ContactState`, mutates `KinematicState`)
- movement:      the per-actor tick that owns `KinematicState`

Ownership
- `ContactState` is rebuilt from zero every tick and is only valid for the tick
  that produced it.
- `KinematicState` persists across ticks. Its `velocity` is a working copy: the
  physics body stays the authoritative store and is re-read every tick.
*/

use nalgebra as na;

use crate::constants::WORLD_UP;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;

/// Finalized ground contact for a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactState {
    /// At least one contact this tick was walkable ground.
    pub grounded: bool,
    /// Unit-length averaged ground normal, or `WORLD_UP` when airborne.
    pub contact_normal: Vec3,
}

impl ContactState {
    /// No contacts: airborne, jump impulses default to straight up.
    #[inline]
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            contact_normal: WORLD_UP,
        }
    }

    /// Grounded on a surface with the given normal.
    ///
    /// The normal is re-normalized; a degenerate normal falls back to `WORLD_UP`.
    #[inline]
    pub fn on_ground(normal: Vec3) -> Self {
        Self {
            grounded: true,
            contact_normal: normal.try_normalize(0.0).unwrap_or(WORLD_UP),
        }
    }
}

impl Default for ContactState {
    fn default() -> Self {
        Self::airborne()
    }
}

/// Per-actor motion state that survives across ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicState {
    /// Velocity as last read from / written to the body (m/s).
    pub velocity: Vec3,
    /// Jumps used since the actor was last grounded.
    pub jump_phase: u32,
    /// Whether the previous tick ended grounded.
    pub on_ground_last_tick: bool,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            jump_phase: 0,
            on_ground_last_tick: false,
        }
    }
}
