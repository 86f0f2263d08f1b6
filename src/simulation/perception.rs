//! Five-ray wall-distance sensing.
//!
//! Each live car sweeps five rays fanned around its heading every tick,
//! before inference, so the controller always sees fresh distances.

use serde::{Deserialize, Serialize};

use super::car::Car;
use super::raycast;
use super::track::Track;

/// Heading-relative sensor angles in degrees. Positive offsets fan toward
/// the car's left.
pub const SENSOR_OFFSETS: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];

/// Rotation of the sprite artwork relative to the raycaster's zero angle.
/// A car with heading zero drives toward positive x, which the raycaster
/// calls 90 degrees.
pub const SPRITE_ANGLE_OFFSET: f32 = 90.0;

/// One stored sensor measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Heading-relative angle the reading was taken at.
    pub offset: f32,
    /// Wall pixel (or clipped ray end) the sensor saw.
    pub endpoint: (i32, i32),
    /// Euclidean distance to the endpoint.
    pub distance: f32,
}

/// Converts a heading-relative sensor offset to the raycaster's absolute
/// angle.
pub fn absolute_angle(heading: f32, offset: f32) -> f32 {
    SPRITE_ANGLE_OFFSET - (heading + offset)
}

/// Recomputes all five sensor readings for one car.
pub fn sweep(car: &mut Car, track: &Track) {
    let origin = (car.pos[0], car.pos[1]);
    let heading = car.heading;
    for (slot, &offset) in car.sensors.iter_mut().zip(SENSOR_OFFSETS.iter()) {
        let hit = raycast::cast(track, origin, absolute_angle(heading, offset));
        *slot = SensorReading {
            offset,
            endpoint: hit.endpoint,
            distance: hit.distance,
        };
    }
}
