// Recording replay
// Feeds a capture through a scripted sensor into a live ShakeDetector

use log::info;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use crate::gesture::{ShakeConfig, ShakeDetector};
use crate::motion::ScriptedSensor;
use crate::recording::ingest::MotionRecording;
use crate::recording::trace::TraceEntry;

/// Summary of one replay
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub session_id: Uuid,
    pub threshold: f32,

    /// Timestamps of the samples that fired the shake callback
    pub shakes: Vec<u64>,

    /// Samples that replaced the baseline (including the first one)
    pub accepted: usize,

    /// Samples dropped inside the debounce window
    pub debounced: usize,

    /// Highest speed seen across accepted samples
    pub peak_speed: Option<f32>,

    /// One entry per sample, in delivery order
    pub trace: Vec<TraceEntry>,
}

impl ReplayReport {
    pub fn shake_count(&self) -> usize {
        self.shakes.len()
    }
}

/// Replay a recording with the given configuration
pub fn replay(recording: &MotionRecording, config: ShakeConfig) -> ReplayReport {
    let session_id = Uuid::new_v4();
    let sensor = ScriptedSensor::new();
    let trace: Arc<Mutex<Vec<TraceEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let shakes: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));

    let trace_sink = Arc::clone(&trace);
    let shake_sink = Arc::clone(&shakes);
    let threshold = config.threshold;

    // The observer runs before the callback, so the last traced sample is
    // the one that fired
    let last_seen: Arc<Mutex<u64>> = Arc::new(Mutex::new(0));
    let last_seen_by_observer = Arc::clone(&last_seen);

    let mut detector = ShakeDetector::with_config(sensor.clone(), config, move || {
        let timestamp = *last_seen.lock().unwrap_or_else(PoisonError::into_inner);
        shake_sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(timestamp);
    })
    .with_observer(move |sample, verdict| {
        *last_seen_by_observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = sample.timestamp_ms;
        trace_sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TraceEntry::new(session_id, *sample, *verdict, threshold));
    });

    detector.start();
    for sample in &recording.samples {
        sensor.emit_sample(*sample);
    }
    detector.stop();

    let trace = std::mem::take(&mut *trace.lock().unwrap_or_else(PoisonError::into_inner));
    let shakes = std::mem::take(&mut *shakes.lock().unwrap_or_else(PoisonError::into_inner));

    let accepted = trace.iter().filter(|e| e.verdict.is_accepted()).count();
    let debounced = trace.len() - accepted;
    let peak_speed = trace
        .iter()
        .filter_map(|e| e.verdict.speed())
        .fold(None, |peak: Option<f32>, speed| {
            Some(peak.map_or(speed, |p| p.max(speed)))
        });

    info!(
        "Replayed {} samples over {} ms: {} shakes at threshold {}",
        recording.len(),
        recording.duration_ms(),
        shakes.len(),
        threshold
    );

    ReplayReport {
        session_id,
        threshold,
        shakes,
        accepted,
        debounced,
        peak_speed,
        trace,
    }
}
