//! # Autodrome - Evolving Neural Track Drivers
//!
//! A simulation of cars that learn to drive a rasterized track through
//! generational selection of small feedforward controllers.
//!
//! ## Features
//!
//! - Bresenham raycast distance sensors against the track's alpha mask
//! - Tick-based kinematics with passive coasting deceleration
//! - Checkpoint, finish-line, and wall collision scoring
//! - Fixed-topology neural controllers (7 inputs, 6 thresholded outputs)
//! - Genetic evolution (elitism, score-weighted mating, per-weight mutation)
//! - Parallel per-tick updates with rayon
//! - Seeded, reproducible runs with save/resume
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Generation loop and run orchestration
//! - [`simulation::car`] - Car state, kinematics, and scoring
//! - [`simulation::brain`] - Neural controller and steering decode
//! - [`simulation::raycast`] - Bounded raycasting against the wall mask
//! - [`simulation::genetics`] - Ranking and breeding
//! - [`simulation::config`] - Track-layout ingestion

/// Core simulation logic and data structures.
pub mod simulation {
    /// Fixed-topology neural controller and steering decode.
    pub mod brain;
    /// Car state, kinematics, scoring, and per-generation lifecycle.
    pub mod car;
    /// Wall, checkpoint, and finish-line collision tests.
    ///
    /// The [`collision::Collidable`] trait exposes an axis-aligned bounding
    /// rectangle and is implemented by Track, Car, Checkpoint, and FinishLine.
    pub mod collision;
    /// Track-layout configuration produced by the external editor.
    pub mod config;
    /// Generation ranking and breeding.
    pub mod genetics;
    /// Engine tuning parameters.
    pub mod params;
    /// Five-ray wall-distance sensing.
    pub mod perception;
    /// Bounded Bresenham raycasting against the wall mask.
    pub mod raycast;
    /// Checkpoint and finish-line segments.
    pub mod segment;
    /// Read-only render snapshots for external visualizers.
    pub mod snapshot;
    /// Rasterized track opacity mask.
    pub mod track;
    /// Generation loop, run orchestration, and persistence.
    pub mod world;
}
