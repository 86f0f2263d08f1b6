#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use autodrome::simulation::brain::NeuralNet;
use autodrome::simulation::car::{Car, SpawnTransform};
use autodrome::simulation::params::SimParams;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_params() -> SimParams {
    SimParams {
        hidden_width: 4,
        ..SimParams::default()
    }
}

fn create_test_car(id: usize) -> Car {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let spawn = SpawnTransform {
        position: (50.0, 50.0),
        rotation: 0.0,
    };
    Car::new(
        id,
        spawn,
        params.sprite_width,
        params.sprite_height,
        NeuralNet::new_random(params.hidden_width, &mut rng),
    )
}

#[test]
fn test_idle_car_stays_exactly_at_spawn() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    for _ in 0..200 {
        car.apply_drive(0.0, 0.0, &params);
    }

    assert_eq!(car.speed(), 0.0);
    assert_eq!(car.pos[0], 50.0);
    assert_eq!(car.pos[1], 50.0);
}

#[test]
fn test_coasting_reaches_exact_zero_without_overshoot() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    // Two drive ticks put the speed at exactly 1.0
    car.apply_drive(0.5, 0.0, &params);
    car.apply_drive(0.5, 0.0, &params);
    assert_eq!(car.speed(), 1.0);

    let mut ticks = 0;
    while car.speed() > 0.0 && ticks < 40 {
        car.apply_drive(0.0, 0.0, &params);
        ticks += 1;
    }
    assert_eq!(car.speed(), 0.0);
    assert!(
        (19..=21).contains(&ticks),
        "coasting took {ticks} ticks to stop"
    );

    // Once stopped the car no longer drifts
    let pos = car.pos.clone();
    car.apply_drive(0.0, 0.0, &params);
    assert_eq!(car.pos, pos);
}

#[test]
fn test_speed_is_capped_at_max_speed() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    for _ in 0..30 {
        car.apply_drive(0.5, 0.0, &params);
    }

    assert_eq!(car.speed(), params.max_speed);
}

#[test]
fn test_heading_accumulates_beyond_full_turns() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    for _ in 0..100 {
        car.apply_drive(0.0, 4.0, &params);
    }

    assert_eq!(car.heading, 400.0);
}

#[test]
fn test_heading_zero_drives_toward_positive_x() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    car.apply_drive(0.5, 0.0, &params);

    assert_eq!(car.pos[0], 50.5);
    assert_eq!(car.pos[1], 50.0);
}

#[test]
fn test_crash_scores_once() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    car.crash(3.9, &params);
    assert!(car.crashed);
    assert_eq!(car.score, -197);

    // A second wall contact changes nothing
    car.crash(12.0, &params);
    assert_eq!(car.score, -197);
}

#[test]
fn test_crashed_cars_do_not_move() {
    let params = create_test_params();
    let mut car = create_test_car(0);
    car.crash(0.0, &params);

    let pos = car.pos.clone();
    let heading = car.heading;
    car.apply_drive(0.5, 4.0, &params);

    assert_eq!(car.pos, pos);
    assert_eq!(car.heading, heading);
}

#[test]
fn test_checkpoint_bonus_is_awarded_once_per_id() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    car.cross_checkpoint(0, 2.5, &params);
    assert_eq!(car.score, 98);

    car.cross_checkpoint(0, 9.0, &params);
    assert_eq!(car.score, 98);

    car.cross_checkpoint(1, 9.0, &params);
    assert_eq!(car.score, 98 + 91);
}

#[test]
fn test_finish_blocks_later_bonuses_and_the_end_penalty() {
    let params = create_test_params();
    let mut car = create_test_car(0);

    car.cross_finish();
    car.cross_checkpoint(0, 1.0, &params);
    assert_eq!(car.score, 0);

    car.apply_end_score(&params);
    assert_eq!(car.score, 0);
}

#[test]
fn test_end_penalty_applies_only_without_progress() {
    let params = create_test_params();

    let mut idle = create_test_car(0);
    idle.apply_end_score(&params);
    assert_eq!(idle.score, params.no_checkpoint_penalty);

    let mut scorer = create_test_car(1);
    scorer.cross_checkpoint(0, 0.0, &params);
    scorer.apply_end_score(&params);
    assert_eq!(scorer.score, params.checkpoint_bonus);
}

#[test]
fn test_reset_restores_spawn_state_and_keeps_the_genome() {
    let params = create_test_params();
    let mut car = create_test_car(0);
    let genome = car.brain.clone();

    for _ in 0..5 {
        car.apply_drive(0.5, 3.0, &params);
    }
    car.cross_checkpoint(2, 1.0, &params);
    car.crash(4.2, &params);
    car.cross_finish();

    car.reset();

    assert_eq!(car.pos[0], 50.0);
    assert_eq!(car.pos[1], 50.0);
    assert_eq!(car.heading, 0.0);
    assert_eq!(car.speed(), 0.0);
    assert_eq!(car.score, 0);
    assert!(car.visited.is_empty());
    assert!(!car.crashed);
    assert!(!car.finished);
    assert_eq!(car.brain, genome);
}

#[test]
fn test_control_input_orders_speed_heading_then_distances() {
    let params = create_test_params();
    let mut car = create_test_car(0);
    car.apply_drive(0.5, 2.0, &params);
    for (i, reading) in car.sensors.iter_mut().enumerate() {
        reading.distance = 10.0 * (i as f32 + 1.0);
    }

    let input = car.control_input();

    assert_eq!(input.len(), 7);
    assert_eq!(input[0], car.speed());
    assert_eq!(input[1], 2.0);
    assert_eq!(input[2], 10.0);
    assert_eq!(input[6], 50.0);
}

#[test]
fn test_corners_follow_the_heading() {
    let params = create_test_params();
    let mut car = create_test_car(0);
    car.apply_drive(0.0, 90.0, &params);

    // At 90 degrees the long side stands vertical in image space
    let corners = car.corners();
    for (x, y) in corners {
        assert!((x - 50.0).abs() <= params.sprite_height / 2.0 + 1e-4);
        assert!((y - 50.0).abs() <= params.sprite_width / 2.0 + 1e-4);
    }
}
