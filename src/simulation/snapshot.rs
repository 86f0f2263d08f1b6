//! Read-only render snapshots for external visualizers.
//!
//! The engine never draws. Once per tick a renderer may take a
//! [`RenderSnapshot`], a plain-data copy of everything it needs for one
//! frame, and the engine moves on without waiting.

use serde::{Deserialize, Serialize};

use super::car::Car;
use super::segment::{Checkpoint, FinishLine, Segment};
use super::track::Track;

/// Types that expose a read-only view of themselves for rendering.
pub trait Drawable {
    /// Plain-data view handed to the renderer.
    type Snapshot;

    /// Builds the current view.
    fn snapshot(&self) -> Self::Snapshot;
}

/// Track dimensions for the renderer's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Car state a renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSnapshot {
    /// Car id.
    pub id: usize,
    /// Center position in pixels.
    pub position: (f32, f32),
    /// Heading in degrees.
    pub heading: f32,
    /// Rotated silhouette corners.
    pub corners: [(f32, f32); 4],
    /// Sensor ray endpoints, in sensor offset order.
    pub sensor_endpoints: [(i32, i32); 5],
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    /// Generation currently driving.
    pub generation: u32,
    /// Simulated seconds into the generation.
    pub elapsed: f32,
    /// Track viewport.
    pub track: TrackSnapshot,
    /// Checkpoint gates in id order.
    pub checkpoints: Vec<Segment>,
    /// Finish line.
    pub finish_line: Segment,
    /// Live cars only; crashed cars are omitted.
    pub cars: Vec<CarSnapshot>,
}

impl Drawable for Track {
    type Snapshot = TrackSnapshot;

    fn snapshot(&self) -> TrackSnapshot {
        TrackSnapshot {
            width: self.width(),
            height: self.height(),
        }
    }
}

impl Drawable for Car {
    type Snapshot = CarSnapshot;

    fn snapshot(&self) -> CarSnapshot {
        let mut sensor_endpoints = [(0, 0); 5];
        for (slot, reading) in sensor_endpoints.iter_mut().zip(self.sensors.iter()) {
            *slot = reading.endpoint;
        }
        CarSnapshot {
            id: self.id,
            position: (self.pos[0], self.pos[1]),
            heading: self.heading,
            corners: self.corners(),
            sensor_endpoints,
        }
    }
}

impl Drawable for Checkpoint {
    type Snapshot = Segment;

    fn snapshot(&self) -> Segment {
        self.segment
    }
}

impl Drawable for FinishLine {
    type Snapshot = Segment;

    fn snapshot(&self) -> Segment {
        self.segment
    }
}
