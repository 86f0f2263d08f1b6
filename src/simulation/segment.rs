//! Checkpoint and finish-line segments.

use geo::{Coord, Line};
use serde::{Deserialize, Serialize};

/// A start/end pixel pair placed by the track editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start pixel.
    pub start: (i32, i32),
    /// End pixel.
    pub end: (i32, i32),
}

impl Segment {
    /// Builds a segment from two pixels.
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        Self { start, end }
    }

    /// Builds a segment from the editor's `[start-x, start-y, end-x, end-y]` form.
    pub fn from_coords(coords: [i32; 4]) -> Self {
        Self {
            start: (coords[0], coords[1]),
            end: (coords[2], coords[3]),
        }
    }

    /// The segment as a `geo` line for intersection tests.
    pub fn to_line(self) -> Line<f32> {
        Line::new(
            Coord {
                x: self.start.0 as f32,
                y: self.start.1 as f32,
            },
            Coord {
                x: self.end.0 as f32,
                y: self.end.1 as f32,
            },
        )
    }
}

/// A scoring gate. Crossing it the first time awards the checkpoint bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Stable id, assigned from the layout's checkpoint order.
    pub id: u32,
    /// Gate geometry.
    pub segment: Segment,
}

impl Checkpoint {
    /// Builds a checkpoint with a stable id.
    pub fn new(id: u32, segment: Segment) -> Self {
        Self { id, segment }
    }
}

/// The segment that marks a completed lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishLine {
    /// Line geometry.
    pub segment: Segment,
}

impl FinishLine {
    /// Builds a finish line.
    pub fn new(segment: Segment) -> Self {
        Self { segment }
    }
}
