use controller::{
    ActorDef, MovementSettings, Mover, MoverScene, Vec2, Vec3, WorldStaticDef,
    rapier3d::prelude::Vector,
};

const SETTLE_TICKS: usize = 90;

fn mover() -> Mover {
    Mover::new(MovementSettings::default().validate().unwrap())
}

fn mover_with_air_jumps(max_air_jumps: u32) -> Mover {
    Mover::new(
        MovementSettings {
            max_air_jumps,
            ..MovementSettings::default()
        }
        .validate()
        .unwrap(),
    )
}

fn flat_scene() -> MoverScene {
    MoverScene::build(
        vec![WorldStaticDef::ground_plane(1, 0.0)],
        ActorDef {
            spawn: Vec3::new(0.0, 1.5, 0.0),
            ..ActorDef::default()
        },
    )
}

fn ramp_scene(angle_deg: f32) -> MoverScene {
    MoverScene::build(
        vec![WorldStaticDef::ramp(
            1,
            Vector::zeros(),
            angle_deg,
            Vector::new(50.0, 0.5, 50.0),
        )],
        ActorDef {
            spawn: Vec3::new(0.0, 3.0, 0.0),
            ..ActorDef::default()
        },
    )
}

fn settle(scene: &mut MoverScene, m: &mut Mover) {
    for _ in 0..SETTLE_TICKS {
        scene.step(m);
    }
}

#[test]
fn actor_falls_and_lands_on_plane() {
    let mut scene = flat_scene();
    let mut m = mover();

    let first = scene.step(&mut m);
    assert!(!first.contact.grounded);

    settle(&mut scene, &mut m);
    assert!(m.is_grounded());
    assert_eq!(m.jump_phase(), 0);

    // Capsule centre rests one radius plus half-height above the plane.
    let y = scene.actor_translation().y;
    assert!((y - 1.0).abs() < 0.05, "rest height {y}");
    assert!(scene.actor_velocity().norm() < 0.1);
}

#[test]
fn walking_converges_to_max_speed() {
    let mut scene = flat_scene();
    let mut m = mover();
    settle(&mut scene, &mut m);

    m.set_intent(Vec2::new(1.0, 0.0));
    for _ in 0..60 {
        scene.step(&mut m);
    }

    let v = scene.actor_velocity();
    assert!((v.x - 10.0).abs() < 0.2, "velocity {v:?}");
    assert!(v.z.abs() < 0.05);
    assert!(scene.actor_translation().x > 3.0);
    assert!(m.is_grounded());
}

#[test]
fn stopping_brings_actor_to_rest() {
    let mut scene = flat_scene();
    let mut m = mover();
    settle(&mut scene, &mut m);

    m.set_intent(Vec2::new(0.0, 1.0));
    for _ in 0..60 {
        scene.step(&mut m);
    }
    m.set_intent(Vec2::zeros());
    for _ in 0..60 {
        scene.step(&mut m);
    }

    let v = scene.actor_velocity();
    assert!(Vec3::new(v.x, 0.0, v.z).norm() < 0.05, "velocity {v:?}");
}

#[test]
fn jump_reaches_configured_height_and_lands() {
    let mut scene = flat_scene();
    let mut m = mover();
    settle(&mut scene, &mut m);
    let rest_y = scene.actor_translation().y;

    m.request_jump();
    let outcome = scene.step(&mut m);
    assert!(outcome.jumped);
    assert_eq!(m.jump_phase(), 1);

    let mut peak = rest_y;
    let mut left_ground = false;
    for _ in 0..120 {
        let outcome = scene.step(&mut m);
        left_ground |= !outcome.contact.grounded;
        peak = peak.max(scene.actor_translation().y);
    }

    let rise = peak - rest_y;
    assert!(left_ground);
    assert!((1.7..2.2).contains(&rise), "jump rise {rise}");
    assert!(m.is_grounded());
    assert_eq!(m.jump_phase(), 0);
}

#[test]
fn jump_without_air_jumps_is_single() {
    let mut scene = flat_scene();
    let mut m = mover();
    settle(&mut scene, &mut m);

    m.request_jump();
    assert!(scene.step(&mut m).jumped);
    for _ in 0..10 {
        scene.step(&mut m);
    }
    m.request_jump();
    assert!(!scene.step(&mut m).jumped);
    assert_eq!(m.jump_phase(), 1);
}

#[test]
fn takeoff_tick_does_not_restore_jump_phase() {
    let mut scene = flat_scene();
    let mut m = mover_with_air_jumps(1);
    settle(&mut scene, &mut m);

    m.request_jump();
    assert!(scene.step(&mut m).jumped);

    let next = scene.step(&mut m);
    assert!(!next.contact.grounded);
    assert_eq!(m.jump_phase(), 1);

    // The ground jump used the only air jump.
    for _ in 0..10 {
        scene.step(&mut m);
    }
    m.request_jump();
    assert!(!scene.step(&mut m).jumped);
    assert_eq!(m.jump_phase(), 1);
}

#[test]
fn air_jump_in_flight_then_exhausted() {
    let mut scene = flat_scene();
    let mut m = mover_with_air_jumps(2);
    settle(&mut scene, &mut m);

    m.request_jump();
    assert!(scene.step(&mut m).jumped);
    for _ in 0..10 {
        scene.step(&mut m);
    }

    // Still rising: the aligned speed is topped up to a full jump, not stacked.
    m.request_jump();
    let air = scene.step(&mut m);
    assert!(air.jumped);
    assert!(!air.contact.grounded);
    assert_eq!(m.jump_phase(), 2);
    let vy = scene.actor_velocity().y;
    assert!((vy - 6.264).abs() < 0.05, "air jump velocity {vy}");

    for _ in 0..5 {
        scene.step(&mut m);
    }
    m.request_jump();
    assert!(!scene.step(&mut m).jumped);
    assert_eq!(m.jump_phase(), 2);

    for _ in 0..150 {
        scene.step(&mut m);
    }
    assert!(m.is_grounded());
    assert_eq!(m.jump_phase(), 0);
}

#[test]
fn walkable_ramp_grounds_actor_with_tilted_normal() {
    let angle = 15f32.to_radians();
    let mut scene = ramp_scene(15.0);
    let mut m = mover();

    let mut last = scene.step(&mut m);
    for _ in 0..SETTLE_TICKS {
        last = scene.step(&mut m);
    }

    assert!(last.contact.grounded);
    let n = last.contact.contact_normal;
    assert!((n.x + angle.sin()).abs() < 0.02, "normal {n:?}");
    assert!((n.y - angle.cos()).abs() < 0.02, "normal {n:?}");
}

#[test]
fn walking_up_a_ramp_climbs() {
    let mut scene = ramp_scene(15.0);
    let mut m = mover();
    settle(&mut scene, &mut m);
    let start_y = scene.actor_translation().y;

    m.set_intent(Vec2::new(1.0, 0.0));
    for _ in 0..60 {
        scene.step(&mut m);
    }

    assert!(m.velocity().y > 1.0, "velocity {:?}", m.velocity());
    assert!(scene.actor_translation().y > start_y + 0.5);
}

#[test]
fn steep_ramp_is_never_ground() {
    let mut scene = ramp_scene(40.0);
    let mut m = mover();

    for _ in 0..SETTLE_TICKS {
        let outcome = scene.step(&mut m);
        assert!(!outcome.contact.grounded);
    }
    assert!(!m.is_grounded());
}
