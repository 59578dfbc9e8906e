//! Glue between the controller and a rapier3d rigid-body.

use rapier3d::{parry::query, prelude::*};

use crate::{body::PhysicsBody, contact::ContactAccumulator, types::Vec3};

#[inline]
pub(crate) fn to_vec3(v: &Vector<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub(crate) fn from_vec3(v: Vec3) -> Vector<f32> {
    Vector::new(v.x, v.y, v.z)
}

/// [`PhysicsBody`] over a rapier rigid-body.
///
/// A missing handle reads as zero velocity and ignores writes.
pub struct RapierBody<'a> {
    bodies: &'a mut RigidBodySet,
    handle: RigidBodyHandle,
    gravity: Vector<f32>,
}

impl<'a> RapierBody<'a> {
    pub fn new(bodies: &'a mut RigidBodySet, handle: RigidBodyHandle, gravity: Vector<f32>) -> Self {
        Self {
            bodies,
            handle,
            gravity,
        }
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn velocity(&self) -> Vec3 {
        self.bodies
            .get(self.handle)
            .map(|rb| to_vec3(rb.linvel()))
            .unwrap_or_else(Vec3::zeros)
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        if let Some(rb) = self.bodies.get_mut(self.handle) {
            rb.set_linvel(from_vec3(velocity), true);
        }
    }

    fn gravity_magnitude(&self) -> f32 {
        self.gravity.norm()
    }
}

/// Whether two colliders still touch (within `prediction`) at their current poses.
///
/// Narrow-phase manifolds describe the pose the step started from, so a body
/// that just left a surface still has an active manifold with it. Shapes parry
/// can't query are assumed to touch.
pub fn still_touching(a: &Collider, b: &Collider, prediction: f32) -> bool {
    match query::contact(a.position(), a.shape(), b.position(), b.shape(), prediction) {
        Ok(contact) => contact.is_some(),
        Err(_) => true,
    }
}

/// Feed every active contact point touching `collider` into `acc`.
///
/// Each solver contact of each manifold is reported once, with the manifold
/// normal oriented from the other surface toward `collider`. Pairs that no
/// longer touch at the current poses are skipped.
/// Returns the number of contact points reported.
pub fn report_rapier_contacts(
    narrow_phase: &NarrowPhase,
    colliders: &ColliderSet,
    collider: ColliderHandle,
    prediction: f32,
    acc: &mut ContactAccumulator,
) -> usize {
    let Some(actor) = colliders.get(collider) else {
        return 0;
    };

    let mut reported = 0;
    for pair in narrow_phase.contact_pairs_with(collider) {
        if !pair.has_any_active_contact {
            continue;
        }

        // Manifold normals point from collider1 toward collider2.
        let flip = pair.collider1 == collider;
        let other = if flip { pair.collider2 } else { pair.collider1 };
        let Some(other) = colliders.get(other) else {
            continue;
        };
        if !still_touching(actor, other, prediction) {
            continue;
        }

        for manifold in &pair.manifolds {
            let normal = if flip {
                -manifold.data.normal
            } else {
                manifold.data.normal
            };
            let normal = to_vec3(&normal);
            for _ in &manifold.data.solver_contacts {
                acc.report_contact(normal);
                reported += 1;
            }
        }
    }
    reported
}
