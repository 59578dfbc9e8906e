use crate::types::Vec3;

/// Read/write access to the authoritative physics state of one actor.
///
/// The movement tick reads the velocity once, solves, and writes it back once.
/// Implementations wrap whatever engine owns the body (see `rapier::RapierBody`);
/// tests use a plain in-memory struct.
pub trait PhysicsBody {
    /// Current linear velocity (m/s).
    fn velocity(&self) -> Vec3;

    /// Overwrite the linear velocity (m/s).
    fn set_velocity(&mut self, velocity: Vec3);

    /// Magnitude of the gravity acting on the body (m/s^2, positive).
    fn gravity_magnitude(&self) -> f32;
}

impl<T: PhysicsBody + ?Sized> PhysicsBody for &mut T {
    fn velocity(&self) -> Vec3 {
        (**self).velocity()
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        (**self).set_velocity(velocity)
    }

    fn gravity_magnitude(&self) -> f32 {
        (**self).gravity_magnitude()
    }
}

/// In-memory body for unit tests: velocity is only changed by the controller.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct TestBody {
    pub velocity: Vec3,
    pub gravity: f32,
    pub writes: u32,
}

#[cfg(test)]
impl TestBody {
    pub fn at_rest() -> Self {
        Self {
            velocity: Vec3::zeros(),
            gravity: crate::constants::GRAVITY_MPS2,
            writes: 0,
        }
    }
}

#[cfg(test)]
impl PhysicsBody for TestBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.writes += 1;
    }

    fn gravity_magnitude(&self) -> f32 {
        self.gravity
    }
}
