//! Bounded Bresenham raycasting against the wall mask.
//!
//! A cast resolves the boundary pixel the ray would reach at the track edge,
//! rasterizes the segment from the origin to that pixel, and walks it in
//! order until it finds the first wall pixel. Pure functions only; casts are
//! safe to run in parallel across cars.

use serde::{Deserialize, Serialize};

use super::track::Track;

/// Result of a single cast: the pixel the ray stopped at and its distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// First wall pixel along the ray, or the clipped ray end if none.
    pub endpoint: (i32, i32),
    /// Euclidean distance from the cast origin to the endpoint.
    pub distance: f32,
}

/// Casts a ray from `origin` at an absolute angle in degrees.
///
/// Angle convention: 0 degrees points up in image space (negative y) and
/// angles grow toward positive x first, so 90 is right, 180 is down and 270
/// is left. A negative angle is normalized once as `360 - |angle|`.
pub fn cast(track: &Track, origin: (f32, f32), angle_degrees: f32) -> RayHit {
    let mut angle = angle_degrees;
    if angle < 0.0 {
        angle = 360.0 - angle.abs();
    }

    let max_x = track.width() as i32 - 1;
    let max_y = track.height() as i32 - 1;
    let x0 = (origin.0.round() as i32).clamp(0, max_x);
    let y0 = (origin.1.round() as i32).clamp(0, max_y);

    let (x1, y1) = boundary_endpoint(angle, x0, y0, max_x, max_y);

    let mut hit = (x1, y1);
    for (x, y) in line_pixels(x0, y0, x1, y1) {
        if track.is_wall(x, y) {
            hit = (x, y);
            break;
        }
    }

    let dx = hit.0 as f32 - origin.0;
    let dy = hit.1 as f32 - origin.1;
    RayHit {
        endpoint: hit,
        distance: (dx * dx + dy * dy).sqrt(),
    }
}

/// Pixel on the track edge that a ray from `(x0, y0)` at `angle` reaches.
///
/// The four axis-aligned angles are handled directly. Every other angle is
/// resolved in its quadrant by projecting onto the facing edge with the
/// quadrant's tangent, then clipping to the adjacent edge when the intercept
/// leaves the image. The trailing branch also absorbs angles outside
/// `[0, 360)` that survive normalization, so the result is always in bounds.
fn boundary_endpoint(angle: f32, x0: i32, y0: i32, max_x: i32, max_y: i32) -> (i32, i32) {
    let fx = x0 as f32;
    let fy = y0 as f32;

    let (x1, y1) = if angle == 0.0 {
        (fx, 0.0)
    } else if angle == 90.0 {
        (max_x as f32, fy)
    } else if angle == 180.0 {
        (fx, max_y as f32)
    } else if angle == 270.0 {
        (0.0, fy)
    } else if angle > 0.0 && angle < 90.0 {
        // up-right: aim at the top edge, clip to the right edge
        let tan = angle.to_radians().tan();
        let x = fx + fy * tan;
        if x > max_x as f32 {
            (max_x as f32, fy - (max_x as f32 - fx) / tan)
        } else {
            (x, 0.0)
        }
    } else if angle > 90.0 && angle < 180.0 {
        // down-right: aim at the right edge, clip to the bottom edge
        let tan = (angle - 90.0).to_radians().tan();
        let y = fy + (max_x as f32 - fx) * tan;
        if y > max_y as f32 {
            (fx + (max_y as f32 - fy) / tan, max_y as f32)
        } else {
            (max_x as f32, y)
        }
    } else if angle > 180.0 && angle < 270.0 {
        // down-left: aim at the bottom edge, clip to the left edge
        let tan = (angle - 180.0).to_radians().tan();
        let x = fx - (max_y as f32 - fy) * tan;
        if x < 0.0 {
            (0.0, fy + fx / tan)
        } else {
            (x, max_y as f32)
        }
    } else {
        // up-left and any angle beyond one turn
        let tan = (angle - 270.0).to_radians().tan();
        let y = fy - fx * tan;
        if y < 0.0 {
            (fx - fy / tan, 0.0)
        } else {
            (0.0, y)
        }
    };

    (
        (x1.round() as i32).clamp(0, max_x),
        (y1.round() as i32).clamp(0, max_y),
    )
}

/// Rasterizes a segment with integer Bresenham stepping.
///
/// Axis roles are swapped when the segment is steeper than one, so every
/// slope including vertical is covered. The returned pixels run from
/// `(x0, y0)` to `(x1, y1)` in walk order.
pub fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut x0, mut y0, mut x1, mut y1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };

    let reversed = x0 > x1;
    if reversed {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let y_step = if y0 < y1 { 1 } else { -1 };

    let mut pixels = Vec::with_capacity(dx as usize + 1);
    let mut error = dx / 2;
    let mut y = y0;
    for x in x0..=x1 {
        pixels.push(if steep { (y, x) } else { (x, y) });
        error -= dy;
        if error < 0 {
            y += y_step;
            error += dx;
        }
    }

    if reversed {
        pixels.reverse();
    }
    pixels
}
