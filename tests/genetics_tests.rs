#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use autodrome::simulation::brain::NeuralNet;
use autodrome::simulation::car::{Car, SpawnTransform};
use autodrome::simulation::genetics::GeneticEngine;
use autodrome::simulation::params::SimParams;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_params() -> SimParams {
    SimParams {
        hidden_width: 4,
        elite_count: 5,
        ..SimParams::default()
    }
}

fn create_population(count: usize, params: &SimParams, rng: &mut ChaCha8Rng) -> Vec<Car> {
    let spawn = SpawnTransform {
        position: (10.0, 10.0),
        rotation: 0.0,
    };
    (0..count)
        .map(|id| {
            Car::new(
                id,
                spawn,
                params.sprite_width,
                params.sprite_height,
                NeuralNet::new_random(params.hidden_width, rng),
            )
        })
        .collect()
}

#[test]
fn test_mating_with_full_parent_bias_copies_parent_a() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let a = NeuralNet::new_random(6, &mut rng);
    let b = NeuralNet::new_random(6, &mut rng);

    // mutation off, bias fully toward parent A
    let child = NeuralNet::mate(&a, &b, 0.0, 1.0, &mut rng);
    assert_eq!(child, a);
}

#[test]
fn test_full_mutation_rate_redraws_every_weight() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let a = NeuralNet::new_random(5, &mut rng);
    let b = NeuralNet::new_random(5, &mut rng);

    let child = NeuralNet::mate(&a, &b, 1.0, 1.0, &mut rng);
    for &w in child.hidden_weights.iter().chain(child.output_weights.iter()) {
        assert!((-1.0..1.0).contains(&w));
    }
    assert_ne!(child, a);
    assert_ne!(child, b);
}

#[test]
#[should_panic(expected = "mismatched shapes")]
fn test_mating_mismatched_topologies_panics() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let a = NeuralNet::new_random(4, &mut rng);
    let b = NeuralNet::new_random(8, &mut rng);
    let _ = NeuralNet::mate(&a, &b, 0.0, 1.0, &mut rng);
}

#[test]
fn test_elites_survive_with_their_genomes() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut cars = create_population(20, &params, &mut rng);
    for (i, car) in cars.iter_mut().enumerate() {
        car.score = 10 + i as i32;
    }
    let elite_genomes: Vec<NeuralNet> = cars[15..].iter().map(|car| car.brain.clone()).collect();

    let engine = GeneticEngine::from_params(&params);
    let (next, summary) = engine.next_generation(cars, 20, 0, &mut rng);

    assert_eq!(next.len(), 20);

    // The five best lead the new population, reset but genome-intact
    for (i, car) in next[..5].iter().enumerate() {
        assert_eq!(car.id, 19 - i);
        assert_eq!(car.score, 0);
        assert!(!car.crashed);
        assert_eq!(car.brain, elite_genomes[4 - i]);
    }

    // Children get ids above every existing one
    for car in &next[5..] {
        assert!(car.id >= 20);
    }

    assert_eq!(summary.generation, 0);
    assert_eq!(summary.scores.len(), 20);
    assert_eq!(summary.scores[0], 29);
    assert_eq!(summary.scores[19], 10);
}

#[test]
fn test_breeding_never_pairs_a_parent_with_itself() {
    let params = SimParams {
        hidden_width: 4,
        elite_count: 2,
        ..SimParams::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut cars = create_population(2, &params, &mut rng);
    cars[0].score = 100;
    cars[1].score = 1;

    let engine = GeneticEngine::from_params(&params);
    let (next, summary) = engine.next_generation(cars, 30, 0, &mut rng);

    assert_eq!(next.len(), 30);
    // With a pool of two, every one of the 28 pairings must use both parents,
    // however skewed the selection weights are.
    assert_eq!(summary.mate_counts[&0], 28);
    assert_eq!(summary.mate_counts[&1], 28);
}

#[test]
fn test_degenerate_score_sets_still_breed() {
    let params = create_test_params();
    let engine = GeneticEngine::from_params(&params);
    let mut rng = ChaCha8Rng::seed_from_u64(6);

    let mut equal = create_population(10, &params, &mut rng);
    for car in &mut equal {
        car.score = 0;
    }
    let (next, _) = engine.next_generation(equal, 10, 0, &mut rng);
    assert_eq!(next.len(), 10);

    let mut negative = create_population(10, &params, &mut rng);
    for (i, car) in negative.iter_mut().enumerate() {
        car.score = -400 + i as i32;
    }
    let (next, _) = engine.next_generation(negative, 10, 1, &mut rng);
    assert_eq!(next.len(), 10);
}

#[test]
fn test_children_inherit_the_spawn_transform() {
    let params = create_test_params();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let cars = create_population(8, &params, &mut rng);

    let engine = GeneticEngine::from_params(&params);
    let (next, _) = engine.next_generation(cars, 12, 0, &mut rng);

    for car in &next {
        assert_eq!(car.spawn.position, (10.0, 10.0));
        assert_eq!(car.pos[0], 10.0);
        assert_eq!(car.pos[1], 10.0);
        assert_eq!(car.visited.len(), 0);
    }
}

#[test]
fn test_breeding_is_reproducible_for_a_fixed_seed() {
    let params = create_test_params();
    let engine = GeneticEngine::from_params(&params);

    let run = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut cars = create_population(12, &params, &mut rng);
        for (i, car) in cars.iter_mut().enumerate() {
            car.score = i as i32 * 3 - 5;
        }
        let (next, _) = engine.next_generation(cars, 12, 0, &mut rng);
        next
    };

    let first = run(99);
    let second = run(99);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.brain, b.brain);
    }
}

#[test]
fn test_steering_decodes_thresholded_outputs() {
    use autodrome::simulation::brain::Steering;
    use ndarray::arr1;

    let outputs = arr1(&[0.9_f32, 0.1, 0.5, 0.49, 0.0, 1.0]);
    let steering = Steering::from_outputs(&outputs);

    assert!(steering.accelerate);
    assert!(!steering.decelerate);
    assert!(steering.left_soft);
    assert!(!steering.left_hard);
    assert!(!steering.right_soft);
    assert!(steering.right_hard);

    assert_eq!(steering.acceleration(), 0.5);
    // soft left plus hard right nets to minus three degrees
    assert_eq!(steering.rotation(), -3.0);
}
