/*!
World conventions, defaults and tolerances.

Values shared by contact classification, the velocity solver, the movement
loop and the rapier scene.

Notes
- Distances are in meters, time in seconds.
- The world is Y-up; "forward" is +Z and "right" is +X. A 2-D intent `(x, y)`
  maps to world `(x, 0, y)`.
*/

use crate::types::Vec3;

/// World up axis. Ground classification and airborne jump impulses use it.
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// World right axis, the X basis before projection onto the contact plane.
pub const WORLD_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// World forward axis, the Z basis before projection onto the contact plane.
pub const WORLD_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Default simulation tick (seconds).
pub const DEFAULT_TICK_SECONDS: f32 = 1.0 / 60.0;

/// Practical small length for normalization guards (meters or unit-vector length).
pub const DIST_EPS: f32 = 1.0e-6;

/// Gap up to which a rapier contact pair still counts as touching after a step (meters).
pub const CONTACT_PREDICTION_M: f32 = 0.01;

/// Squared speed below which the movement loop considers the actor at rest (m^2/s^2).
pub const REST_SPEED_SQ: f32 = 1.0e-10;

/// Default maximum planar speed (m/s).
pub const DEFAULT_MAX_SPEED: f32 = 10.0;

/// Default ground acceleration (m/s^2).
pub const DEFAULT_MAX_ACCELERATION: f32 = 20.0;

/// Default air acceleration (m/s^2). Lower than ground to limit air control.
pub const DEFAULT_MAX_AIR_ACCELERATION: f32 = 5.0;

/// Default apex height of a jump from rest (meters).
pub const DEFAULT_JUMP_HEIGHT: f32 = 2.0;

/// Default number of extra jumps allowed while airborne.
pub const DEFAULT_MAX_AIR_JUMPS: u32 = 0;

/// Default steepest walkable slope (degrees from horizontal).
pub const DEFAULT_MAX_GROUND_ANGLE_DEG: f32 = 25.0;
