//! Rasterized track opacity mask.
//!
//! The track is a width by height grid of alpha bytes produced by an external
//! image loader. A pixel with non-zero alpha is wall; everything else is
//! drivable. The mask is built once per run and never mutated.

use thiserror::Error;

/// Errors raised while building a track mask.
#[derive(Debug, Error)]
pub enum TrackError {
    /// The alpha buffer does not match the declared dimensions.
    #[error("alpha buffer holds {got} bytes, expected {expected} for a {width}x{height} track")]
    BufferSize {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Expected buffer length (`width * height`).
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
    /// The mask has a zero dimension.
    #[error("{width}x{height} track has no pixels")]
    EmptyMask {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
    },
}

/// Immutable wall mask the cars drive on.
#[derive(Debug, Clone)]
pub struct Track {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl Track {
    /// Builds a track from raw row-major alpha bytes.
    ///
    /// Both dimensions must be at least one pixel; the raycaster relies on
    /// every track having a valid boundary to clamp against.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Result<Self, TrackError> {
        if width == 0 || height == 0 {
            return Err(TrackError::EmptyMask { width, height });
        }
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(TrackError::BufferSize {
                width,
                height,
                expected,
                got: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Builds a track by sampling a wall predicate at every pixel.
    ///
    /// Convenient for programmatic layouts; a wall pixel gets alpha 255.
    pub fn from_mask_fn(
        width: u32,
        height: u32,
        wall: impl Fn(u32, u32) -> bool,
    ) -> Result<Self, TrackError> {
        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                alpha.push(if wall(x, y) { 255 } else { 0 });
            }
        }
        Self::new(width, height, alpha)
    }

    /// Track width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Track height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether a pixel coordinate lies inside the mask.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Checks whether a pixel is wall. Out-of-bounds pixels are not wall.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        self.alpha[y as usize * self.width as usize + x as usize] != 0
    }
}
