use deflector::Tuning;
use deflector::sim::{
    ArenaBounds, Collision, GameEvent, PaddleInput, Session, SessionPhase, Target, TickInput,
    World, tick,
};
use glam::Vec2;
use proptest::prelude::*;

fn world_with_far_target() -> World {
    let mut world = World::spawn(ArenaBounds::default(), &Tuning::default(), 5);
    world.target = Target::new(Vec2::new(900.0, 50.0), Vec2::splat(50.0));
    world
}

fn paddle_input() -> impl Strategy<Value = PaddleInput> {
    prop_oneof![
        Just(PaddleInput::LeftPressed),
        Just(PaddleInput::RightPressed),
        Just(PaddleInput::Neither),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Frame(PaddleInput, f32),
    FireTimer,
    Dispose,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (paddle_input(), 0.0f32..500.0).prop_map(|(p, dt)| Op::Frame(p, dt)),
        1 => Just(Op::FireTimer),
        1 => Just(Op::Dispose),
    ]
}

proptest! {
    #[test]
    fn paddle_stays_in_arena(
        start_x in 0.0f32..=1024.0,
        inputs in prop::collection::vec(paddle_input(), 1..400),
    ) {
        let tuning = Tuning::default();
        let mut world = world_with_far_target();
        world.paddle.pos.x = start_x;

        for input in inputs {
            tick(&mut world, &TickInput::pressed(input), 16.6, &tuning);
            prop_assert!((0.0..=1024.0).contains(&world.paddle.pos.x));
        }
    }

    #[test]
    fn side_wall_flips_vx_exactly_once(
        x in prop_oneof![-400.0f32..-0.01, 1024.01f32..1400.0],
        y in 150.0f32..500.0,
        vx in -500.0f32..500.0,
        vy in -500.0f32..500.0,
    ) {
        let tuning = Tuning::default();
        let mut world = world_with_far_target();
        world.projectile.pos = Vec2::new(x, y);
        world.projectile.vel = Vec2::new(vx, vy);

        let hits = tick(&mut world, &TickInput::default(), 0.0, &tuning);
        let flips = hits.iter().filter(|c| **c == Collision::SideWall).count();
        prop_assert_eq!(flips, 1);
        prop_assert_eq!(world.projectile.vel.x, -vx);
        prop_assert_eq!(world.projectile.vel.y, vy);
    }

    #[test]
    fn paddle_bounce_is_upward_and_scaled(
        offset in -1.0f32..=1.0,
        y in 551.0f32..599.0,
        vx in -500.0f32..500.0,
        vy in -500.0f32..500.0,
    ) {
        let tuning = Tuning::default();
        let mut world = world_with_far_target();
        let x = world.paddle.pos.x + offset * world.paddle.half_width;
        world.projectile.pos = Vec2::new(x, y);
        world.projectile.vel = Vec2::new(vx, vy);

        tick(&mut world, &TickInput::default(), 0.0, &tuning);
        prop_assert_eq!(world.projectile.vel.y, -vy.abs());
        prop_assert!((world.projectile.vel.x - offset * 200.0).abs() < 0.01);
    }

    #[test]
    fn target_destroyed_at_most_once(
        frames in prop::collection::vec((paddle_input(), 0.0f32..50.0), 1..200),
    ) {
        let tuning = Tuning::default();
        let mut world = World::spawn(ArenaBounds::default(), &tuning, 5);
        world.target = Target::new(Vec2::new(500.0, 50.0), Vec2::splat(50.0));
        world.projectile.pos = Vec2::new(500.0, 50.0);

        let mut hits = 0;
        for (input, dt) in frames {
            let collisions = tick(&mut world, &TickInput::pressed(input), dt, &tuning);
            hits += collisions
                .iter()
                .filter(|c| matches!(c, Collision::Target { .. }))
                .count();
        }
        prop_assert_eq!(hits, 1);
        prop_assert!(!world.target.is_alive());
    }

    #[test]
    fn phases_only_move_forward(
        seed in any::<u64>(),
        ops in prop::collection::vec(op(), 1..300),
    ) {
        let mut session = Session::new(ArenaBounds::default(), seed);
        let mut last_handle = None;
        let mut transitions = 0;
        let mut outcomes = 0;

        for op in ops {
            let before = session.phase();
            match op {
                Op::Frame(input, dt) => session.update(&TickInput::pressed(input), dt),
                Op::FireTimer => {
                    if let Some(handle) = last_handle {
                        session.fire_scheduled(handle);
                    }
                }
                Op::Dispose => session.dispose(),
            }
            if let Some(handle) = session.pending_handle() {
                last_handle = Some(handle);
            }

            let after = session.phase();
            prop_assert!(before == after || before.can_transition_to(after));
            if before == SessionPhase::Ended {
                prop_assert_eq!(after, SessionPhase::Ended);
            }

            for event in session.drain_events() {
                match event {
                    GameEvent::TransitionRequested(_) => transitions += 1,
                    GameEvent::OutcomeReached(_) => outcomes += 1,
                    GameEvent::TargetDestroyed { .. } => {}
                }
            }
        }
        prop_assert!(transitions <= 1);
        prop_assert!(outcomes <= 1);
    }
}
