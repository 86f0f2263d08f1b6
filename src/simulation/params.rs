//! Engine tuning parameters.

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Parameters that control simulation and breeding behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Hidden layer width of every controller.
    pub hidden_width: usize,
    /// Number of top scorers carried unchanged into the next generation.
    pub elite_count: usize,
    /// Per-weight probability of random reinitialization during mating.
    pub mutation_rate: f32,
    /// Probability that a non-mutated child weight comes from parent A.
    pub parent_bias: f32,
    /// Generation time limit in simulated seconds.
    pub time_limit: f32,
    /// Speed cap in pixels per tick.
    pub max_speed: f32,
    /// Speed shed per tick while coasting with no drive command.
    pub passive_deceleration: f32,
    /// Score applied on a car's first wall contact.
    pub crash_penalty: i32,
    /// Score awarded on the first crossing of each checkpoint.
    pub checkpoint_bonus: i32,
    /// Score applied at generation end to cars that never reached a checkpoint.
    pub no_checkpoint_penalty: i32,
    /// Car silhouette width in pixels.
    pub sprite_width: f32,
    /// Car silhouette height in pixels.
    pub sprite_height: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            hidden_width: 20,
            elite_count: 10,
            mutation_rate: 0.05,
            parent_bias: 0.5,
            time_limit: 20.0,
            max_speed: 10.0,
            passive_deceleration: 0.05,
            crash_penalty: -200,
            checkpoint_bonus: 100,
            no_checkpoint_penalty: -200,
            sprite_width: 28.0,
            sprite_height: 14.0,
        }
    }
}

impl SimParams {
    /// Checks the ranges the engine depends on.
    ///
    /// `elite_count` must be at least 2 because breeding resamples the second
    /// parent until it differs from the first, which cannot terminate with a
    /// single parent in the pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hidden_width == 0 {
            return Err(ConfigError::Invalid(
                "hidden_width must be at least 1".into(),
            ));
        }
        if self.elite_count < 2 {
            return Err(ConfigError::Invalid(
                "elite_count must be at least 2".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::Invalid(
                "mutation_rate must lie in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.parent_bias) {
            return Err(ConfigError::Invalid(
                "parent_bias must lie in [0, 1]".into(),
            ));
        }
        if self.time_limit <= 0.0 {
            return Err(ConfigError::Invalid("time_limit must be positive".into()));
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::Invalid("max_speed must be positive".into()));
        }
        if self.passive_deceleration <= 0.0 {
            return Err(ConfigError::Invalid(
                "passive_deceleration must be positive".into(),
            ));
        }
        if self.sprite_width <= 0.0 || self.sprite_height <= 0.0 {
            return Err(ConfigError::Invalid(
                "sprite dimensions must be positive".into(),
            ));
        }
        Ok(())
    }
}
