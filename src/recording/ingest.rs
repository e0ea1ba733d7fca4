// Recording ingestion
// Reads motion samples from JSONL or CSV captures

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::motion::MotionSample;

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sample on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Recording contains no samples")]
    Empty,
}

pub type RecordingResult<T> = Result<T, RecordingError>;

/// A captured accelerometer stream in delivery order
#[derive(Debug, Clone, PartialEq)]
pub struct MotionRecording {
    pub samples: Vec<MotionSample>,
}

impl MotionRecording {
    /// Wrap samples; rejects an empty stream
    pub fn new(samples: Vec<MotionSample>) -> RecordingResult<Self> {
        if samples.is_empty() {
            return Err(RecordingError::Empty);
        }
        Ok(MotionRecording { samples })
    }

    /// Span between the first and last sample timestamps
    pub fn duration_ms(&self) -> u64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Parse one JSON sample per line; blank lines are skipped
pub fn parse_jsonl(contents: &str) -> RecordingResult<MotionRecording> {
    let mut samples = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let sample: MotionSample = serde_json::from_str(line)
            .map_err(|source| RecordingError::Json { line: idx + 1, source })?;
        samples.push(sample);
    }

    MotionRecording::new(samples)
}

/// Load a JSONL capture from disk
pub fn load_jsonl(path: &Path) -> RecordingResult<MotionRecording> {
    let contents = std::fs::read_to_string(path)?;
    parse_jsonl(&contents)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp_ms: u64,
    x: f32,
    y: f32,
    z: f32,
}

/// Load a CSV capture with header `timestamp_ms,x,y,z`
pub fn load_csv(path: &Path) -> RecordingResult<MotionRecording> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut samples = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row?;
        samples.push(MotionSample::new(row.timestamp_ms, row.x, row.y, row.z));
    }

    MotionRecording::new(samples)
}
