/*!
Per-tick ground contact classification.

The physics engine may report the same body's contacts several times in one
tick (new contacts and continuing contacts, several points per collision). All
of them feed one [`ContactAccumulator`] created by
[`GroundContactTracker::begin_tick`] and consumed by
[`GroundContactTracker::end_tick`]:

- A contact is ground when `dot(normal, WORLD_UP) >= min_ground_dot`.
- Ground normals are summed and normalized once at the end, so the result does
  not depend on report order.
- With no ground contact the tick is airborne and the normal is `WORLD_UP`.
- Degenerate normals (zero-length, NaN, infinite) are never ground.
*/

use crate::{
    constants::{DIST_EPS, WORLD_UP},
    types::{ContactState, KinematicState, Vec3},
};

/// Classifies contacts against a fixed slope threshold.
#[derive(Clone, Copy, Debug)]
pub struct GroundContactTracker {
    min_ground_dot: f32,
}

impl GroundContactTracker {
    pub fn new(min_ground_dot: f32) -> Self {
        Self { min_ground_dot }
    }

    #[inline]
    pub fn min_ground_dot(&self) -> f32 {
        self.min_ground_dot
    }

    /// Start a tick: not grounded, zero normal sum.
    #[inline]
    pub fn begin_tick(&self) -> ContactAccumulator {
        ContactAccumulator {
            min_ground_dot: self.min_ground_dot,
            normal_sum: Vec3::zeros(),
            ground_contacts: 0,
            rejected: 0,
        }
    }

    /// Finalize a tick.
    ///
    /// When grounded, the summed normal is normalized and `jump_phase` resets to 0.
    /// Otherwise the normal is forced to `WORLD_UP`.
    pub fn end_tick(&self, acc: ContactAccumulator, state: &mut KinematicState) -> ContactState {
        if acc.rejected > 0 {
            log::warn!(
                "Dropped {} degenerate contact normal(s) this tick",
                acc.rejected
            );
        }

        let contact = match acc.ground_contacts {
            0 => ContactState::airborne(),
            _ => ContactState::on_ground(acc.normal_sum),
        };

        if contact.grounded {
            state.jump_phase = 0;
        }
        if contact.grounded != state.on_ground_last_tick {
            log::debug!(
                "Ground contact changed: grounded={} normal={:?}",
                contact.grounded,
                contact.contact_normal
            );
        }
        state.on_ground_last_tick = contact.grounded;

        contact
    }
}

/// Contacts gathered during one tick. Created by [`GroundContactTracker::begin_tick`].
#[derive(Clone, Copy, Debug)]
pub struct ContactAccumulator {
    min_ground_dot: f32,
    normal_sum: Vec3,
    ground_contacts: u32,
    rejected: u32,
}

impl ContactAccumulator {
    /// Report one contact point's surface normal (pointing from the surface toward the actor).
    ///
    /// Returns whether the contact counted as ground.
    pub fn report_contact(&mut self, normal: Vec3) -> bool {
        let finite = normal.iter().all(|c| c.is_finite());
        let Some(normal) = normal.try_normalize(DIST_EPS).filter(|_| finite) else {
            self.rejected += 1;
            return false;
        };

        if normal.dot(&WORLD_UP) >= self.min_ground_dot {
            self.normal_sum += normal;
            self.ground_contacts += 1;
            return true;
        }

        false
    }

    /// Report every normal in `normals`.
    pub fn report_contacts(&mut self, normals: impl IntoIterator<Item = Vec3>) {
        for normal in normals {
            self.report_contact(normal);
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.ground_contacts > 0
    }

    /// Number of contacts classified as ground so far.
    #[inline]
    pub fn ground_contacts(&self) -> u32 {
        self.ground_contacts
    }

    /// Number of degenerate normals dropped so far.
    #[inline]
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}
