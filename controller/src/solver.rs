use crate::{
    config::MovementConfig,
    constants::{DIST_EPS, WORLD_FORWARD, WORLD_RIGHT},
    intent::MovementIntent,
    types::{ContactState, Vec3},
};

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        return target;
    }
    current + delta.signum() * max_delta
}

/// Remove the component of `v` along `normal`: `v - n * dot(v, n)`.
#[inline]
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(&normal)
}

/// World right/forward projected onto the contact plane and re-normalized.
///
/// If an axis lies along the normal it has no tangent component; the world axis
/// is used unchanged in that case.
#[inline]
pub fn contact_plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    let x_axis = project_on_plane(WORLD_RIGHT, normal)
        .try_normalize(DIST_EPS)
        .unwrap_or(WORLD_RIGHT);
    let z_axis = project_on_plane(WORLD_FORWARD, normal)
        .try_normalize(DIST_EPS)
        .unwrap_or(WORLD_FORWARD);
    (x_axis, z_axis)
}

/// Converges the contact-plane velocity toward the intent at a bounded rate.
///
/// Each tick the speeds along the two plane axes move toward the desired speeds
/// by at most `acceleration * dt`, where acceleration is the ground or air limit.
/// The velocity component along the contact normal is left untouched, so jumps
/// and gravity survive the adjustment and slope motion stays tangent to the surface.
#[derive(Clone, Copy, Debug)]
pub struct VelocitySolver {
    max_speed: f32,
    max_acceleration: f32,
    max_air_acceleration: f32,
}

impl VelocitySolver {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            max_speed: config.max_speed(),
            max_acceleration: config.max_acceleration(),
            max_air_acceleration: config.max_air_acceleration(),
        }
    }

    #[inline]
    pub fn acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.max_acceleration
        } else {
            self.max_air_acceleration
        }
    }

    /// Pure function of its inputs: returns the adjusted velocity.
    pub fn adjust(
        &self,
        current_velocity: Vec3,
        intent: MovementIntent,
        contact: &ContactState,
        dt_seconds: f32,
    ) -> Vec3 {
        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let desired = intent.desired_velocity(self.max_speed);
        let (x_axis, z_axis) = contact_plane_basis(contact.contact_normal);

        let current_x = current_velocity.dot(&x_axis);
        let current_z = current_velocity.dot(&z_axis);
        let max_speed_change = self.acceleration(contact.grounded) * dt;

        let new_x = move_towards(current_x, desired.x, max_speed_change);
        let new_z = move_towards(current_z, desired.z, max_speed_change);

        current_velocity + x_axis * (new_x - current_x) + z_axis * (new_z - current_z)
    }
}
