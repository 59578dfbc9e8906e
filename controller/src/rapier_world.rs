//! Owned rapier3d world hosting one controller-driven actor.
//!
//! Static geometry is described by [`WorldStaticDef`] and inserted once, sorted
//! by `id`, so the same inputs always build identical sets. The actor is a
//! dynamic, rotation-locked, frictionless capsule: gravity and collision
//! response come from rapier, planar velocity comes from the [`Mover`].
//!
//! [`MoverScene::step`] is one simulation tick:
//! 1. rapier integrates and resolves contacts,
//! 2. every active contact still touching the actor at its new pose is
//!    reported to the mover,
//! 3. the mover finalizes the tick and writes the actor velocity used by the
//!    next physics step.

use rapier3d::{
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

use crate::{
    constants::{CONTACT_PREDICTION_M, DEFAULT_TICK_SECONDS, GRAVITY_MPS2},
    movement::{Mover, TickOutcome},
    rapier::{RapierBody, from_vec3, report_rapier_contacts, to_vec3},
    types::Vec3,
};

/// Canonical, schema-agnostic definition of an immutable world collider.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

impl WorldStaticDef {
    /// Infinite ground plane through `height` with normal `+Y`.
    pub fn ground_plane(id: u32, height: f32) -> Self {
        Self {
            id,
            translation: Vector::new(0.0, height, 0.0),
            rotation: UnitQuaternion::identity(),
            shape: ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        }
    }

    /// Large slab centred at `translation`, tilted by `angle_deg` about `+Z`.
    ///
    /// The top face normal is `(-sin a, cos a, 0)`: positive angles rise toward `+X`.
    pub fn ramp(id: u32, translation: Vector<f32>, angle_deg: f32, half_extents: Vector<f32>) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::from_axis_angle(&Vector::z_axis(), angle_deg.to_radians()),
            shape: ColliderShapeDef::Cuboid { half_extents },
        }
    }
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    ///
    /// The plane normal is derived from the pose as `rotation * +Y`, and the
    /// plane is shifted by `offset_along_normal` from the pose translation.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters). Rotate it to build ramps.
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The pose is carried by the parent fixed rigid-body, so the collider is
/// created in body-local space.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::halfspace(Vector::y_axis())
            .translation(Vector::y() * *offset_along_normal)
            .build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius).build(),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius).build(),
    }
}

/// Actor capsule and spawn point.
#[derive(Clone, Copy, Debug)]
pub struct ActorDef {
    /// Capsule centre at spawn (meters).
    pub spawn: Vec3,
    pub radius: f32,
    /// Half the length of the capsule's straight segment (meters).
    pub half_height: f32,
}

impl Default for ActorDef {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 1.0, 0.0),
            radius: 0.5,
            half_height: 0.5,
        }
    }
}

pub struct MoverScene {
    pub gravity: Vector<f32>,
    pub integration_parameters: IntegrationParameters,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    pipeline: PhysicsPipeline,
    actor_body: RigidBodyHandle,
    actor_collider: ColliderHandle,
}

impl MoverScene {
    /// Build a scene from static geometry and an actor, with standard gravity
    /// and the default tick length.
    pub fn build(mut defs: Vec<WorldStaticDef>, actor: ActorDef) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in defs.into_iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());
            colliders.insert_with_parent(collider_from_def(&def), rb_handle, &mut bodies);
        }

        let spawn = from_vec3(actor.spawn);
        let actor_body = bodies.insert(
            RigidBodyBuilder::dynamic()
                .pose(Isometry::from_parts(
                    Translation3::from(spawn),
                    UnitQuaternion::identity(),
                ))
                .lock_rotations()
                .can_sleep(false)
                .build(),
        );
        let actor_collider = colliders.insert_with_parent(
            ColliderBuilder::capsule_y(actor.half_height, actor.radius)
                .friction(0.0)
                .friction_combine_rule(CoefficientCombineRule::Min)
                .build(),
            actor_body,
            &mut bodies,
        );

        log::debug!(
            "Scene built: {} bodies, {} colliders, actor at {:?}",
            bodies.len(),
            colliders.len(),
            actor.spawn
        );

        Self {
            gravity: Vector::new(0.0, -GRAVITY_MPS2, 0.0),
            integration_parameters: IntegrationParameters {
                dt: DEFAULT_TICK_SECONDS,
                ..IntegrationParameters::default()
            },
            bodies,
            colliders,
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            actor_body,
            actor_collider,
        }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Run one physics step, then feed the actor's contacts to `mover` and tick it.
    pub fn step(&mut self, mover: &mut Mover) -> TickOutcome {
        let hooks = ();
        let events = ();
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );

        let mut contacts = mover.begin_tick();
        report_rapier_contacts(
            &self.narrow_phase,
            &self.colliders,
            self.actor_collider,
            CONTACT_PREDICTION_M,
            &mut contacts,
        );

        let dt = self.integration_parameters.dt;
        let mut body = RapierBody::new(&mut self.bodies, self.actor_body, self.gravity);
        mover.tick(contacts, &mut body, dt)
    }

    /// Actor capsule centre.
    pub fn actor_translation(&self) -> Vec3 {
        self.bodies
            .get(self.actor_body)
            .map(|rb| to_vec3(rb.translation()))
            .unwrap_or_else(Vec3::zeros)
    }

    pub fn actor_velocity(&self) -> Vec3 {
        self.bodies
            .get(self.actor_body)
            .map(|rb| to_vec3(rb.linvel()))
            .unwrap_or_else(Vec3::zeros)
    }

    #[inline]
    pub fn actor_collider(&self) -> ColliderHandle {
        self.actor_collider
    }
}
