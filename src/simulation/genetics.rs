//! Generation ranking and breeding.
//!
//! The engine ranks a finished generation, resets the top scorers in place
//! as survivors, and fills the rest of the next population with children
//! bred from score-weighted parent pairs.

use std::collections::HashMap;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use super::brain::NeuralNet;
use super::car::Car;
use super::params::SimParams;

/// Diagnostic record emitted at each generation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Index of the generation that just finished.
    pub generation: u32,
    /// Final scores of the whole population, best first.
    pub scores: Vec<i32>,
    /// Offspring contributed by each surviving parent, keyed by car id.
    /// Parents that bred nothing still appear with a zero count.
    pub mate_counts: HashMap<usize, u32>,
}

/// Breeds each new population from the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticEngine {
    /// Top scorers carried over unchanged.
    pub elite_count: usize,
    /// Per-weight probability of random reinitialization.
    pub mutation_rate: f32,
    /// Probability a non-mutated child weight comes from parent A.
    pub parent_bias: f32,
}

impl GeneticEngine {
    /// Builds an engine from the shared parameters.
    pub fn from_params(params: &SimParams) -> Self {
        Self {
            elite_count: params.elite_count,
            mutation_rate: params.mutation_rate,
            parent_bias: params.parent_bias,
        }
    }

    /// Ranks the finished generation and breeds the next one.
    ///
    /// The top `elite_count` cars are reset in place and carried forward
    /// with their ids and genomes intact. Children are bred from parent
    /// pairs drawn with score-proportional weights, shifted so every weight
    /// is strictly positive; an all-equal score set degenerates to uniform
    /// selection. The second parent is redrawn until it differs from the
    /// first. Children receive fresh sequential ids.
    pub fn next_generation(
        &self,
        mut cars: Vec<Car>,
        population: usize,
        generation: u32,
        rng: &mut impl Rng,
    ) -> (Vec<Car>, GenerationSummary) {
        cars.sort_by(|a, b| b.score.cmp(&a.score));

        let scores: Vec<i32> = cars.iter().map(|car| car.score).collect();

        let elite = self.elite_count;
        let parents = &cars[..elite];

        // Shift scores so weighted sampling stays defined for all-negative
        // and all-equal score sets.
        let min_score = parents.iter().map(|car| car.score).min().unwrap_or(0);
        let shift = min_score.abs() + 1;
        let weights: Vec<f32> = parents.iter().map(|car| (car.score + shift) as f32).collect();
        let dist = WeightedIndex::new(&weights).expect("shifted selection weights are positive");

        let mut mate_counts: HashMap<usize, u32> = HashMap::new();
        for parent in parents {
            mate_counts.insert(parent.id, 0);
        }

        let mut next_id = cars.iter().map(|car| car.id).max().map_or(0, |id| id + 1);
        let mut children = Vec::with_capacity(population.saturating_sub(elite));

        while elite + children.len() < population {
            let idx_a = dist.sample(rng);
            let mut idx_b = dist.sample(rng);
            while idx_b == idx_a {
                idx_b = dist.sample(rng);
            }

            let parent_a = &cars[idx_a];
            let parent_b = &cars[idx_b];
            let brain = NeuralNet::mate(
                &parent_a.brain,
                &parent_b.brain,
                self.mutation_rate,
                self.parent_bias,
                rng,
            );

            *mate_counts.entry(parent_a.id).or_insert(0) += 1;
            *mate_counts.entry(parent_b.id).or_insert(0) += 1;

            children.push(Car::new(
                next_id,
                parent_a.spawn,
                parent_a.width,
                parent_a.height,
                brain,
            ));
            next_id += 1;
        }

        log::debug!(
            "generation {}: kept {} survivors, bred {} children",
            generation,
            elite,
            children.len()
        );

        cars.truncate(elite);
        for survivor in &mut cars {
            survivor.reset();
        }
        cars.extend(children);

        let summary = GenerationSummary {
            generation,
            scores,
            mate_counts,
        };
        (cars, summary)
    }
}
