//! Wall, checkpoint, and finish-line collision tests.
//!
//! Wall contact is a pixel test between the car's rotated silhouette and the
//! track mask. Checkpoint and finish crossings test the car's axis-aligned
//! bounding rectangle against the segment, which matches how the sprite
//! rectangle behaved in play: a wide rotated car can clip a gate its
//! silhouette only grazes.

use geo::{Coord, Intersects, Rect};

use super::car::Car;
use super::params::SimParams;
use super::segment::{Checkpoint, FinishLine, Segment};
use super::track::Track;

/// Anything with an axis-aligned bounding rectangle in track space.
pub trait Collidable {
    /// Bounding rectangle in pixel coordinates.
    fn bounds(&self) -> Rect<f32>;
}

impl Collidable for Car {
    fn bounds(&self) -> Rect<f32> {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for &(x, y) in &corners[1..] {
            min.0 = min.0.min(x);
            min.1 = min.1.min(y);
            max.0 = max.0.max(x);
            max.1 = max.1.max(y);
        }
        Rect::new(
            Coord { x: min.0, y: min.1 },
            Coord { x: max.0, y: max.1 },
        )
    }
}

impl Collidable for Checkpoint {
    fn bounds(&self) -> Rect<f32> {
        segment_bounds(self.segment)
    }
}

impl Collidable for FinishLine {
    fn bounds(&self) -> Rect<f32> {
        segment_bounds(self.segment)
    }
}

impl Collidable for Track {
    fn bounds(&self) -> Rect<f32> {
        Rect::new(
            Coord { x: 0.0, y: 0.0 },
            Coord {
                x: self.width() as f32,
                y: self.height() as f32,
            },
        )
    }
}

fn segment_bounds(segment: Segment) -> Rect<f32> {
    Rect::new(
        Coord {
            x: segment.start.0 as f32,
            y: segment.start.1 as f32,
        },
        Coord {
            x: segment.end.0 as f32,
            y: segment.end.1 as f32,
        },
    )
}

/// Pixel-accurate test of the rotated car silhouette against the wall mask.
///
/// Every wall pixel inside the car's bounding rectangle is rotated back into
/// sprite space and checked against the unrotated silhouette extents.
pub fn overlaps_wall(car: &Car, track: &Track) -> bool {
    let bounds = car.bounds();
    let heading = car.heading.to_radians();
    let (sin, cos) = heading.sin_cos();
    let half_w = car.width / 2.0;
    let half_h = car.height / 2.0;
    let (cx, cy) = (car.pos[0], car.pos[1]);

    let min_x = (bounds.min().x.floor() as i32).max(0);
    let min_y = (bounds.min().y.floor() as i32).max(0);
    let max_x = (bounds.max().x.ceil() as i32).min(track.width() as i32 - 1);
    let max_y = (bounds.max().y.ceil() as i32).min(track.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if !track.is_wall(x, y) {
                continue;
            }
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let sx = dx * cos - dy * sin;
            let sy = dx * sin + dy * cos;
            if sx.abs() <= half_w && sy.abs() <= half_h {
                return true;
            }
        }
    }
    false
}

/// True when the car's bounding rectangle crosses the segment.
pub fn crosses_segment(car: &Car, segment: Segment) -> bool {
    car.bounds().intersects(&segment.to_line())
}

/// Runs the full per-tick judgement for one car: wall contact, then every
/// checkpoint, then the finish line.
///
/// A car that crashes into a wall lying on a gate still collects that gate
/// this tick; the crash only freezes it for later ticks.
pub fn resolve(
    car: &mut Car,
    track: &Track,
    checkpoints: &[Checkpoint],
    finish: &FinishLine,
    elapsed: f32,
    params: &SimParams,
) {
    if overlaps_wall(car, track) {
        car.crash(elapsed, params);
    }
    for checkpoint in checkpoints {
        if crosses_segment(car, checkpoint.segment) {
            car.cross_checkpoint(checkpoint.id, elapsed, params);
        }
    }
    if crosses_segment(car, finish.segment) {
        car.cross_finish();
    }
}
