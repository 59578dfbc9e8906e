use crate::{
    body::PhysicsBody,
    config::MovementConfig,
    contact::{ContactAccumulator, GroundContactTracker},
    intent::MovementIntent,
    jump::JumpController,
    movement_loop::{LoopState, LoopStep, MovementLoop},
    solver::VelocitySolver,
    types::{ContactState, KinematicState, Vec2, Vec3},
};

/// Output of a single [`Mover::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Finalized ground contact for this tick.
    pub contact: ContactState,
    /// A latched jump request was accepted this tick.
    pub jumped: bool,
    /// What the movement loop did.
    pub step: LoopStep,
}

/// Movement controller for one actor.
///
/// Owns the actor's persistent [`KinematicState`], the current intent and the
/// movement loop. The physics side drives it once per simulation tick:
///
/// ```text
/// let mut contacts = mover.begin_tick();
/// // physics callbacks, any number of times, enter and stay alike:
/// contacts.report_contact(normal);
/// mover.tick(contacts, &mut body, dt);
/// ```
///
/// Input events ([`Mover::set_intent`], [`Mover::request_jump`]) may arrive at
/// any point between ticks.
#[derive(Debug)]
pub struct Mover {
    config: MovementConfig,
    tracker: GroundContactTracker,
    solver: VelocitySolver,
    jump: JumpController,
    movement_loop: MovementLoop,
    intent: MovementIntent,
    kinematic: KinematicState,
    jump_requested: bool,
}

impl Mover {
    /// Create a controller. The loop starts integrating with zero intent, so
    /// the first tick settles whatever velocity the body spawned with.
    pub fn new(config: MovementConfig) -> Self {
        let mut movement_loop = MovementLoop::new();
        movement_loop.restart(MovementIntent::zero());

        Self {
            config,
            tracker: GroundContactTracker::new(config.min_ground_dot()),
            solver: VelocitySolver::new(&config),
            jump: JumpController::new(&config),
            movement_loop,
            intent: MovementIntent::zero(),
            kinematic: KinematicState::default(),
            jump_requested: false,
        }
    }

    /// New movement intent from the input layer. Clamped to unit length; restarts the loop.
    pub fn set_intent(&mut self, raw: Vec2) {
        self.intent = MovementIntent::new(raw);
        self.movement_loop.restart(self.intent);
    }

    /// A jump press edge from the input layer. Resolved on the next tick.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    /// Stop integrating until the next intent or jump.
    pub fn halt(&mut self) {
        self.movement_loop.cancel();
    }

    /// Start collecting this tick's contacts.
    #[inline]
    pub fn begin_tick(&self) -> ContactAccumulator {
        self.tracker.begin_tick()
    }

    /// Finish a tick: classify contacts, resolve a pending jump, step the loop.
    pub fn tick<B: PhysicsBody + ?Sized>(
        &mut self,
        contacts: ContactAccumulator,
        body: &mut B,
        dt_seconds: f32,
    ) -> TickOutcome {
        let contact = self.tracker.end_tick(contacts, &mut self.kinematic);

        let mut jumped = false;
        if std::mem::take(&mut self.jump_requested) {
            self.kinematic.velocity = body.velocity();
            if let Some(velocity) =
                self.jump
                    .try_jump(&mut self.kinematic, &contact, body.gravity_magnitude())
            {
                body.set_velocity(velocity);
                self.movement_loop.restart(self.intent);
                jumped = true;
            }
        }

        let step = self.movement_loop.step(&self.solver, &contact, body, dt_seconds);
        match step {
            LoopStep::Applied { velocity, .. } => self.kinematic.velocity = velocity,
            LoopStep::Idle | LoopStep::Stopped { .. } => self.kinematic.velocity = body.velocity(),
        }

        log::trace!(
            "tick: grounded={} normal={:?} velocity={:?} jump_phase={}",
            contact.grounded,
            contact.contact_normal,
            self.kinematic.velocity,
            self.kinematic.jump_phase
        );

        TickOutcome {
            contact,
            jumped,
            step,
        }
    }

    #[inline]
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    #[inline]
    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    #[inline]
    pub fn kinematic(&self) -> &KinematicState {
        &self.kinematic
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.kinematic.velocity
    }

    /// Whether the last tick ended grounded.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.kinematic.on_ground_last_tick
    }

    #[inline]
    pub fn jump_phase(&self) -> u32 {
        self.kinematic.jump_phase
    }

    #[inline]
    pub fn loop_state(&self) -> &LoopState {
        self.movement_loop.state()
    }

    #[inline]
    pub fn is_integrating(&self) -> bool {
        self.movement_loop.is_integrating()
    }
}
