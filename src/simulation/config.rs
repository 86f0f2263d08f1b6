//! Track-layout configuration produced by the external editor.
//!
//! The editor writes a JSON record naming the track image, the gate
//! segments, the spawn transform, and the population size. Every field is
//! required: a missing or malformed field refuses the run instead of
//! guessing a default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::car::SpawnTransform;
use super::segment::{Checkpoint, FinishLine, Segment};

/// Errors raised while loading or validating a track layout.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The layout file could not be read.
    #[error("failed to read track layout: {0}")]
    Io(#[from] std::io::Error),
    /// The layout JSON was malformed or incomplete.
    #[error("failed to parse track layout: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value the engine refuses to run with.
    #[error("invalid track layout: {0}")]
    Invalid(String),
}

/// How a run should be driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// A single externally driven car.
    Manual,
    /// Generational evolution.
    Evolve,
}

/// The layout record the editor hands to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Track image reference, resolved by the image-loading collaborator.
    pub image: String,
    /// Requested run mode.
    pub mode: RunMode,
    /// Checkpoint segments as `[start-x, start-y, end-x, end-y]`, in id order.
    pub checkpoints: Vec<[i32; 4]>,
    /// Finish-line segment in the same form.
    pub finish_line: [i32; 4],
    /// Car spawn position in pixels.
    pub spawn_position: [i32; 2],
    /// Car spawn heading in degrees.
    pub spawn_rotation: f32,
    /// Cars per generation.
    pub population: usize,
}

impl TrackConfig {
    /// Parses and validates a layout from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a layout file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects values the engine cannot start with. Degenerate segments are
    /// the editor's responsibility and are not checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::Invalid(
                "population must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Checkpoints with ids assigned from list order.
    pub fn checkpoint_list(&self) -> Vec<Checkpoint> {
        self.checkpoints
            .iter()
            .enumerate()
            .map(|(id, &coords)| Checkpoint::new(id as u32, Segment::from_coords(coords)))
            .collect()
    }

    /// The finish line.
    pub fn finish(&self) -> FinishLine {
        FinishLine::new(Segment::from_coords(self.finish_line))
    }

    /// The spawn transform cars start from.
    pub fn spawn(&self) -> SpawnTransform {
        SpawnTransform {
            position: (self.spawn_position[0] as f32, self.spawn_position[1] as f32),
            rotation: self.spawn_rotation,
        }
    }
}
