use crate::foundation::error::{RingError, RingResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Host frame rate used when a chart is played back at fixed steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds).
    pub den: u32, // must be > 0
}

impl Fps {
    /// Creates a frame rate; both parts must be non-zero.
    pub fn new(num: u32, den: u32) -> RingResult<Self> {
        if den == 0 {
            return Err(RingError::animation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(RingError::animation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds per frame.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of `frames` frames.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Number of whole frames needed to cover `secs`; a partial frame counts as one.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        // Guard against 0.3 * 30 landing on 9.000000000000002.
        let frames = secs * self.as_f64() - 1e-9;
        frames.ceil().max(0.0) as u64
    }
}

/// Output surface size in pixels. The chart is centered on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Rejects zero-sized canvases.
    pub fn validate(self) -> RingResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RingError::validation("canvas width/height must be > 0"));
        }
        Ok(())
    }

    /// Center point in pixels.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
