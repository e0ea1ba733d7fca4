// Motion sample type
// One accelerometer reading as delivered by the platform sensor service

use serde::{Deserialize, Serialize};

/// A momentary 3-axis acceleration reading
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MotionSample {
    /// Capture time in monotonic milliseconds
    pub timestamp_ms: u64,

    /// Acceleration along the device x axis (device-relative units)
    pub x: f32,

    /// Acceleration along the device y axis
    pub y: f32,

    /// Acceleration along the device z axis
    pub z: f32,
}

impl MotionSample {
    /// Create a new sample
    pub fn new(timestamp_ms: u64, x: f32, y: f32, z: f32) -> Self {
        MotionSample {
            timestamp_ms,
            x,
            y,
            z,
        }
    }

    /// The three components as an array `[x, y, z]`
    pub fn components(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Sum of the three components
    pub fn component_sum(&self) -> f32 {
        self.x + self.y + self.z
    }
}
