/*!
Per-actor integration loop.

The loop is an explicit two-state machine:

- `Idle`: nothing is integrating; the body's velocity is left to the physics engine.
- `Integrating`: every tick the body velocity is read, converged toward the
  intent by the [`VelocitySolver`], and written back.

A new intent or an accepted jump calls [`MovementLoop::restart`], which drops
the current integration (if any) and starts a fresh one. There is never more
than one integration per actor, and a replaced integration can't write again:
it is gone before the next step runs.

An integration always runs its first step, even for zero intent, so a stop
request decelerates. After that it returns to `Idle` at the start of the first
step whose previously written velocity is at rest.
*/

use crate::{
    body::PhysicsBody,
    constants::REST_SPEED_SQ,
    intent::MovementIntent,
    solver::VelocitySolver,
    types::{ContactState, Vec3},
};

/// One active integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integration {
    /// Monotonic id; a restart always produces a larger one.
    pub generation: u64,
    /// Intent captured when this integration started.
    pub intent: MovementIntent,
    /// No step has run yet.
    pub first_iteration: bool,
    /// Velocity written by the previous step.
    pub last_velocity: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopState {
    Idle,
    Integrating(Integration),
}

/// What a single [`MovementLoop::step`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoopStep {
    /// Nothing active; the body was not touched.
    Idle,
    /// The integration finished this tick and the loop is now idle; the body was not touched.
    Stopped { generation: u64 },
    /// Velocity was solved and written to the body.
    Applied { generation: u64, velocity: Vec3 },
}

#[derive(Debug)]
pub struct MovementLoop {
    state: LoopState,
    next_generation: u64,
}

impl Default for MovementLoop {
    fn default() -> Self {
        Self {
            state: LoopState::Idle,
            next_generation: 1,
        }
    }
}

impl MovementLoop {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    #[inline]
    pub fn is_integrating(&self) -> bool {
        matches!(self.state, LoopState::Integrating(_))
    }

    /// Generation of the active integration, if any.
    #[inline]
    pub fn generation(&self) -> Option<u64> {
        match &self.state {
            LoopState::Idle => None,
            LoopState::Integrating(integration) => Some(integration.generation),
        }
    }

    /// Replace any active integration with a fresh one for `intent`.
    ///
    /// Returns the new generation.
    pub fn restart(&mut self, intent: MovementIntent) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        if let Some(previous) = self.generation() {
            log::debug!("Movement loop {previous} cancelled by {generation}");
        } else {
            log::debug!("Movement loop {generation} started");
        }

        self.state = LoopState::Integrating(Integration {
            generation,
            intent,
            first_iteration: true,
            last_velocity: Vec3::zeros(),
        });
        generation
    }

    /// Cancel the active integration, if any.
    pub fn cancel(&mut self) {
        if let Some(generation) = self.generation() {
            log::debug!("Movement loop {generation} cancelled");
        }
        self.state = LoopState::Idle;
    }

    /// Run one tick of the active integration against `body`.
    pub fn step<B: PhysicsBody + ?Sized>(
        &mut self,
        solver: &VelocitySolver,
        contact: &ContactState,
        body: &mut B,
        dt_seconds: f32,
    ) -> LoopStep {
        let LoopState::Integrating(integration) = &mut self.state else {
            return LoopStep::Idle;
        };

        if !integration.first_iteration && integration.last_velocity.norm_squared() <= REST_SPEED_SQ
        {
            let generation = integration.generation;
            log::debug!("Movement loop {generation} came to rest");
            self.state = LoopState::Idle;
            return LoopStep::Stopped { generation };
        }
        integration.first_iteration = false;

        let mut current = body.velocity();
        if !current.iter().all(|c| c.is_finite()) {
            log::warn!("Body reported non-finite velocity {current:?}; treating as zero");
            current = Vec3::zeros();
        }

        let velocity = solver.adjust(current, integration.intent, contact, dt_seconds);
        body.set_velocity(velocity);
        integration.last_velocity = velocity;

        LoopStep::Applied {
            generation: integration.generation,
            velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{body::TestBody, config::MovementConfig, constants::WORLD_UP, types::Vec2};

    const DT: f32 = 0.02;

    fn solver() -> VelocitySolver {
        VelocitySolver::new(&MovementConfig::default())
    }

    fn ground() -> ContactState {
        ContactState::on_ground(WORLD_UP)
    }

    #[test]
    fn starts_idle_and_leaves_body_alone() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        body.velocity = Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(ml.step(&solver(), &ground(), &mut body, DT), LoopStep::Idle);
        assert_eq!(body.writes, 0);
        assert_eq!(body.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn zero_intent_runs_once_then_stops() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        let generation = ml.restart(MovementIntent::zero());

        let first = ml.step(&solver(), &ground(), &mut body, DT);
        assert_eq!(
            first,
            LoopStep::Applied {
                generation,
                velocity: Vec3::zeros()
            }
        );
        assert_eq!(body.writes, 1);

        let second = ml.step(&solver(), &ground(), &mut body, DT);
        assert_eq!(second, LoopStep::Stopped { generation });
        assert_eq!(*ml.state(), LoopState::Idle);
        assert_eq!(body.writes, 1);
    }

    #[test]
    fn decelerates_to_rest_then_stops() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        body.velocity = Vec3::new(2.0, 0.0, 0.0);
        ml.restart(MovementIntent::zero());

        // 20 m/s^2 * 0.02 s = 0.4 m/s per tick: five ticks to rest, give or take float rounding.
        let mut applied = 0;
        loop {
            match ml.step(&solver(), &ground(), &mut body, DT) {
                LoopStep::Applied { .. } => applied += 1,
                LoopStep::Stopped { .. } => break,
                LoopStep::Idle => panic!("loop went idle without stopping"),
            }
            assert!(applied <= 10);
        }
        assert!((5..=6).contains(&applied), "applied {applied} steps");
        assert!(body.velocity.norm() < 1.0e-5);
        assert!(!ml.is_integrating());
    }

    #[test]
    fn restart_replaces_active_integration() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();

        let g1 = ml.restart(MovementIntent::new(Vec2::new(1.0, 0.0)));
        ml.step(&solver(), &ground(), &mut body, DT);
        let g2 = ml.restart(MovementIntent::new(Vec2::new(-1.0, 0.0)));
        assert!(g2 > g1);
        assert_eq!(ml.generation(), Some(g2));

        let step = ml.step(&solver(), &ground(), &mut body, DT);
        let LoopStep::Applied {
            generation,
            velocity,
        } = step
        else {
            panic!("expected a velocity write, got {step:?}");
        };
        // Only the replacement writes: +0.4 then -0.4 brings x back to zero.
        assert_eq!(generation, g2);
        assert!(velocity.x.abs() < 1.0e-6);
        assert_eq!(body.writes, 2);
    }

    #[test]
    fn restart_after_stop_runs_again() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        ml.restart(MovementIntent::zero());
        ml.step(&solver(), &ground(), &mut body, DT);
        ml.step(&solver(), &ground(), &mut body, DT);
        assert!(!ml.is_integrating());

        ml.restart(MovementIntent::new(Vec2::new(0.0, 1.0)));
        let step = ml.step(&solver(), &ground(), &mut body, DT);
        assert!(matches!(step, LoopStep::Applied { .. }));
        assert!((body.velocity.z - 0.4).abs() < 1.0e-6);
    }

    #[test]
    fn cancel_prevents_further_writes() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        ml.restart(MovementIntent::new(Vec2::new(1.0, 0.0)));
        ml.cancel();
        assert_eq!(ml.step(&solver(), &ground(), &mut body, DT), LoopStep::Idle);
        assert_eq!(body.writes, 0);
    }

    #[test]
    fn infinite_dt_writes_unchanged_velocity() {
        let frozen = VelocitySolver::new(
            &crate::config::MovementSettings {
                max_acceleration: 0.0,
                ..crate::config::MovementSettings::default()
            }
            .validate()
            .unwrap(),
        );
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        body.velocity = Vec3::new(2.0, -1.0, 0.0);
        ml.restart(MovementIntent::new(Vec2::new(1.0, 0.0)));

        ml.step(&frozen, &ground(), &mut body, f32::INFINITY);
        assert_eq!(body.writes, 1);
        assert_eq!(body.velocity, Vec3::new(2.0, -1.0, 0.0));
    }

    #[test]
    fn non_finite_body_velocity_is_not_propagated() {
        let mut ml = MovementLoop::new();
        let mut body = TestBody::at_rest();
        body.velocity = Vec3::new(f32::NAN, 0.0, 0.0);
        ml.restart(MovementIntent::new(Vec2::new(1.0, 0.0)));
        ml.step(&solver(), &ground(), &mut body, DT);
        assert!(body.velocity.iter().all(|c| c.is_finite()));
        assert!((body.velocity.x - 0.4).abs() < 1.0e-6);
    }
}
