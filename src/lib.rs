// PlasmaLink - connects plasma donors with patients
// Module declarations

pub mod domain;
pub mod gesture;
pub mod location;
pub mod motion;
pub mod navigation;
pub mod recording;
pub mod state;

pub use gesture::{SampleVerdict, ShakeConfig, ShakeDetector};
pub use motion::{MotionSample, MotionSensorSource, ScriptedSensor, SensorEvent};
pub use navigation::Destination;
