// Motion input module
// Accelerometer samples and the sensor subscription seam

pub mod sample;
pub mod sensor;

pub use sample::MotionSample;
pub use sensor::{
    MotionSensorSource, SampleHandler, SamplingRate, ScriptedSensor, SensorAccuracy, SensorError,
    SensorEvent, SubscriptionId,
};
