//! One driving agent: kinematics, scoring, and per-generation lifecycle.
//!
//! A car owns its physical state, its score, the set of checkpoints it has
//! crossed, and its controller network. Once crashed it stays frozen until
//! `reset` returns it to the spawn transform for the next generation.

use std::collections::HashSet;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::brain::{self, NeuralNet};
use super::params::SimParams;
use super::perception::SensorReading;

/// Position and heading a car starts from and returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTransform {
    /// Spawn position in pixels.
    pub position: (f32, f32),
    /// Spawn heading in degrees.
    pub rotation: f32,
}

/// A simulated car with a neural controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier, stable across a car's lifetime.
    pub id: usize,
    /// Position in pixels.
    pub pos: Array1<f32>,
    /// Heading in degrees. Accumulates without wrapping.
    pub heading: f32,
    /// Velocity applied to the position each tick.
    pub velocity: Array1<f32>,
    /// Set on first wall contact; stays set until reset.
    pub crashed: bool,
    /// Fitness accumulator.
    pub score: i32,
    /// Ids of checkpoints crossed this generation.
    pub visited: HashSet<u32>,
    /// Set when the finish line is crossed. Stands in for "all checkpoints
    /// satisfied": it blocks further checkpoint bonuses and the end-of-run
    /// penalty without re-awarding anything.
    pub finished: bool,
    /// Latest sensor sweep, in sensor offset order.
    pub sensors: [SensorReading; 5],
    /// Controller network, also the car's genome.
    pub brain: NeuralNet,
    /// Transform restored by `reset`.
    pub spawn: SpawnTransform,
    /// Silhouette width in pixels.
    pub width: f32,
    /// Silhouette height in pixels.
    pub height: f32,
}

impl Car {
    /// Creates a car at its spawn transform with zero velocity.
    pub fn new(id: usize, spawn: SpawnTransform, width: f32, height: f32, brain: NeuralNet) -> Self {
        Self {
            id,
            pos: Array1::from_vec(vec![spawn.position.0, spawn.position.1]),
            heading: spawn.rotation,
            velocity: Array1::zeros(2),
            crashed: false,
            score: 0,
            visited: HashSet::new(),
            finished: false,
            sensors: [SensorReading::default(); 5],
            brain,
            spawn,
            width,
            height,
        }
    }

    /// Current speed magnitude.
    pub fn speed(&self) -> f32 {
        self.velocity.mapv(|v| v * v).sum().sqrt()
    }

    /// Integrates one tick of driving.
    ///
    /// No-op while crashed. The heading accumulates the rotation without
    /// wrapping. A requested acceleration of exactly zero coasts instead:
    /// speed drops by the passive deceleration step, clamped so it never
    /// overshoots past zero. Speed is capped at `params.max_speed` and the
    /// velocity vector is rebuilt from the new heading.
    pub fn apply_drive(&mut self, acceleration: f32, rotation: f32, params: &SimParams) {
        if self.crashed {
            return;
        }
        self.heading += rotation;

        let speed = self.speed();
        let mut acceleration = acceleration;
        if acceleration == 0.0 {
            acceleration = -params.passive_deceleration.min(speed);
        }

        let magnitude = (speed + acceleration).min(params.max_speed);

        let heading = self.heading.to_radians();
        self.velocity = Array1::from_vec(vec![
            magnitude * heading.cos(),
            -magnitude * heading.sin(),
        ]);
        self.pos += &self.velocity;
    }

    /// Builds the controller input vector: speed, heading, then the five
    /// sensor distances from the latest sweep.
    pub fn control_input(&self) -> Array1<f32> {
        let mut input = Array1::zeros(brain::INPUT_SIZE);
        input[0] = self.speed();
        input[1] = self.heading;
        for (i, reading) in self.sensors.iter().enumerate() {
            input[i + 2] = reading.distance;
        }
        input
    }

    /// Records a wall hit. Idempotent: only the first call scores.
    ///
    /// The penalty is offset by whole survived seconds so cars that crash
    /// later rank above cars that crash sooner.
    pub fn crash(&mut self, elapsed: f32, params: &SimParams) {
        if self.crashed {
            return;
        }
        self.crashed = true;
        self.score += params.crash_penalty + elapsed.floor() as i32;
    }

    /// Records a checkpoint crossing. Awards the bonus only on the first
    /// crossing of an id, and never after the finish line.
    ///
    /// The bonus shrinks by whole elapsed seconds, rewarding early crossings.
    pub fn cross_checkpoint(&mut self, id: u32, elapsed: f32, params: &SimParams) {
        if self.finished || self.visited.contains(&id) {
            return;
        }
        self.visited.insert(id);
        self.score += params.checkpoint_bonus - elapsed.floor() as i32;
    }

    /// Records a finish-line crossing.
    pub fn cross_finish(&mut self) {
        self.finished = true;
    }

    /// Applies the end-of-generation penalty to cars that never reached a
    /// checkpoint or the finish line.
    pub fn apply_end_score(&mut self, params: &SimParams) {
        if self.visited.is_empty() && !self.finished {
            self.score += params.no_checkpoint_penalty;
        }
    }

    /// Returns the car to its spawn transform with cleared score, sensors,
    /// crash state, and checkpoint progress. The genome is untouched.
    pub fn reset(&mut self) {
        self.pos = Array1::from_vec(vec![self.spawn.position.0, self.spawn.position.1]);
        self.heading = self.spawn.rotation;
        self.velocity = Array1::zeros(2);
        self.crashed = false;
        self.score = 0;
        self.visited.clear();
        self.finished = false;
        self.sensors = [SensorReading::default(); 5];
    }

    /// Corners of the rotated silhouette rectangle in track space.
    pub fn corners(&self) -> [(f32, f32); 4] {
        let heading = self.heading.to_radians();
        let (sin, cos) = heading.sin_cos();
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        let rotate = |dx: f32, dy: f32| {
            (
                self.pos[0] + dx * cos + dy * sin,
                self.pos[1] - dx * sin + dy * cos,
            )
        };

        [
            rotate(half_w, -half_h),
            rotate(half_w, half_h),
            rotate(-half_w, half_h),
            rotate(-half_w, -half_h),
        ]
    }
}
