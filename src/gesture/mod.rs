// Gesture detection module
// Turns the accelerometer stream into discrete shake events

pub mod config;
pub mod detector;
pub mod gate;

pub use config::{ShakeConfig, DEBOUNCE_WINDOW_MS, DEFAULT_SHAKE_THRESHOLD, SPEED_SCALE};
pub use detector::ShakeDetector;
pub use gate::{SampleVerdict, ShakeGate};
