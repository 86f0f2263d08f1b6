//! Generation loop, run orchestration, and persistence.
//!
//! A [`Simulation`] owns the track, the gates, the population, and a seeded
//! random stream. Each tick updates every live car in parallel; each
//! generation runs until the time limit, extinction, or an external stop,
//! then hands the population to the genetic engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use geo::Intersects;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::brain::{NeuralNet, Steering};
use super::car::{Car, SpawnTransform};
use super::collision::{self, Collidable};
use super::config::{ConfigError, TrackConfig};
use super::genetics::{GeneticEngine, GenerationSummary};
use super::params::SimParams;
use super::perception;
use super::segment::{Checkpoint, FinishLine};
use super::snapshot::{Drawable, RenderSnapshot};
use super::track::Track;

/// Cooperative cancellation flag polled at tick boundaries.
///
/// Clones share the flag, so a driver can keep one handle and stop the run
/// from another thread between ticks. Nothing is interrupted mid-tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Creates an unset handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop after the current tick.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Checks whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Saved run state sufficient to resume evolution on the same layout.
///
/// Stores the seed rather than raw generator state; a resumed run re-seeds
/// its stream from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Generation the run was saved at.
    pub generation: u32,
    /// Seed the run was started with.
    pub seed: u64,
    /// The full population.
    pub cars: Vec<Car>,
}

/// One full simulation run: track, population, and the evolution loop.
#[derive(Debug)]
pub struct Simulation {
    /// Wall mask the run drives on.
    pub track: Track,
    /// Scoring gates in id order.
    pub checkpoints: Vec<Checkpoint>,
    /// Segment that marks a completed lap.
    pub finish_line: FinishLine,
    /// Current population.
    pub cars: Vec<Car>,
    /// Shared engine tuning.
    pub params: SimParams,
    /// Index of the generation currently driving.
    pub generation: u32,
    /// Simulated seconds since the generation started.
    pub elapsed: f32,
    engine: GeneticEngine,
    population: usize,
    seed: u64,
    rng: ChaCha8Rng,
    stop: StopHandle,
}

impl Simulation {
    /// Builds a run from a validated layout and spawns generation zero with
    /// random genomes.
    ///
    /// Fails when the layout or parameters are invalid, when the elite count
    /// exceeds the population, or when the spawn position lies outside the
    /// track image.
    pub fn new(
        config: &TrackConfig,
        track: Track,
        params: SimParams,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        params.validate()?;

        if params.elite_count > config.population {
            return Err(ConfigError::Invalid(format!(
                "elite_count {} exceeds population {}",
                params.elite_count, config.population
            )));
        }

        let spawn = config.spawn();
        let spawn_x = spawn.position.0.round() as i32;
        let spawn_y = spawn.position.1.round() as i32;
        if !track.in_bounds(spawn_x, spawn_y) {
            return Err(ConfigError::Invalid(format!(
                "spawn position ({}, {}) lies outside the {}x{} track",
                spawn.position.0,
                spawn.position.1,
                track.width(),
                track.height()
            )));
        }

        let checkpoints = config.checkpoint_list();
        for checkpoint in &checkpoints {
            if !track.bounds().intersects(&checkpoint.bounds()) {
                log::warn!("checkpoint {} lies outside the track image", checkpoint.id);
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cars = spawn_population(config.population, spawn, &params, &mut rng);

        log::info!(
            "run start: {} cars, {} checkpoints, seed {}",
            cars.len(),
            checkpoints.len(),
            seed
        );

        Ok(Self {
            track,
            checkpoints,
            finish_line: config.finish(),
            cars,
            engine: GeneticEngine::from_params(&params),
            params,
            generation: 0,
            elapsed: 0.0,
            population: config.population,
            seed,
            rng,
            stop: StopHandle::new(),
        })
    }

    /// Handle external drivers can use to cancel the run between ticks.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Number of cars still driving this generation.
    pub fn alive_count(&self) -> usize {
        self.cars.iter().filter(|car| !car.crashed).count()
    }

    /// Advances every live car by one tick of `dt` simulated seconds.
    ///
    /// Each car senses, infers, drives, and is judged independently; cars
    /// only ever mutate themselves, so the update runs in parallel.
    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;

        let track = &self.track;
        let checkpoints = &self.checkpoints;
        let finish = &self.finish_line;
        let params = &self.params;
        let elapsed = self.elapsed;

        self.cars.par_iter_mut().for_each(|car| {
            if car.crashed {
                return;
            }
            perception::sweep(car, track);
            let input = car.control_input();
            let outputs = car.brain.infer(&input);
            let steering = Steering::from_outputs(&outputs);
            car.apply_drive(steering.acceleration(), steering.rotation(), params);
            collision::resolve(car, track, checkpoints, finish, elapsed, params);
        });
    }

    /// Runs one full generation and breeds the next population.
    ///
    /// Ticks until the time limit, extinction, or a stop request, whichever
    /// comes first, checking once per tick. Then applies end-of-run scoring,
    /// breeds the next generation, and resets the clock.
    pub fn run_generation(&mut self, dt: f32) -> GenerationSummary {
        log::info!("===== generation {} =====", self.generation);

        while self.elapsed < self.params.time_limit
            && self.alive_count() > 0
            && !self.stop.is_stopped()
        {
            self.tick(dt);
        }

        for car in &mut self.cars {
            car.apply_end_score(&self.params);
        }

        let finished = self.generation;
        let population = std::mem::take(&mut self.cars);
        let (next, summary) =
            self.engine
                .next_generation(population, self.population, finished, &mut self.rng);
        self.cars = next;
        self.generation += 1;
        self.elapsed = 0.0;

        log::info!(
            "generation {} complete: best {} worst {} ({} cars)",
            summary.generation,
            summary.scores.first().copied().unwrap_or(0),
            summary.scores.last().copied().unwrap_or(0),
            summary.scores.len()
        );

        summary
    }

    /// Runs up to `generations` full generations, honoring the stop handle
    /// between generations as well as between ticks.
    pub fn run(&mut self, generations: u32, dt: f32) -> Vec<GenerationSummary> {
        let mut summaries = Vec::with_capacity(generations as usize);
        for _ in 0..generations {
            if self.stop.is_stopped() {
                break;
            }
            summaries.push(self.run_generation(dt));
        }
        summaries
    }

    /// Builds the per-tick frame for the rendering collaborator.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            generation: self.generation,
            elapsed: self.elapsed,
            track: self.track.snapshot(),
            checkpoints: self
                .checkpoints
                .iter()
                .map(|checkpoint| checkpoint.snapshot())
                .collect(),
            finish_line: self.finish_line.snapshot(),
            cars: self
                .cars
                .iter()
                .filter(|car| !car.crashed)
                .map(|car| car.snapshot())
                .collect(),
        }
    }

    /// Saves the run state to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let snapshot = RunSnapshot {
            generation: self.generation,
            seed: self.seed,
            cars: self.cars.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a saved run and resumes it on the given layout and track.
    pub fn resume_from_file(
        path: &str,
        config: &TrackConfig,
        track: Track,
        params: SimParams,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: RunSnapshot = serde_json::from_str(&json)?;

        let mut simulation = Self::new(config, track, params, snapshot.seed)?;
        simulation.generation = snapshot.generation;
        simulation.cars = snapshot.cars;

        log::info!(
            "resumed run at generation {} with {} cars",
            simulation.generation,
            simulation.cars.len()
        );
        Ok(simulation)
    }
}

fn spawn_population(
    count: usize,
    spawn: SpawnTransform,
    params: &SimParams,
    rng: &mut ChaCha8Rng,
) -> Vec<Car> {
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
