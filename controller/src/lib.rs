//! Slope-aware movement controller for a physics-driven actor.
//!
//! Per tick the physics side reports contact normals, the [`Mover`] classifies
//! ground contact, resolves a pending jump and converges the body's planar
//! velocity toward the current intent along the contact plane.

pub mod body;
pub mod config;
pub mod constants;
pub mod contact;
pub mod intent;
pub mod jump;
pub mod movement;
pub mod movement_loop;
pub mod rapier;
pub mod rapier_world;
pub mod solver;
pub mod types;

pub use body::PhysicsBody;
pub use config::{ConfigError, MovementConfig, MovementSettings};
pub use constants::{
    DEFAULT_TICK_SECONDS, GRAVITY_MPS2, WORLD_FORWARD, WORLD_RIGHT, WORLD_UP,
};
pub use contact::{ContactAccumulator, GroundContactTracker};
pub use intent::{JumpButton, MovementIntent};
pub use jump::{JumpController, jump_speed};
pub use movement::{Mover, TickOutcome};
pub use movement_loop::{LoopState, LoopStep, MovementLoop};
pub use rapier::{RapierBody, report_rapier_contacts, still_touching};
pub use rapier_world::{ActorDef, ColliderShapeDef, MoverScene, WorldStaticDef, collider_from_def};
pub use solver::{VelocitySolver, contact_plane_basis, move_towards, project_on_plane};
pub use types::{ContactState, KinematicState, Vec2, Vec3};

// Downstream crates can build scenes without depending on rapier3d directly.
pub use rapier3d;
