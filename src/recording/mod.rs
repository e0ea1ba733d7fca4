// Motion recording module
// Loads recorded accelerometer streams, replays them through the shake
// detector and writes per-sample verdict traces

pub mod ingest;
pub mod replay;
pub mod trace;

pub use ingest::{load_csv, load_jsonl, parse_jsonl, MotionRecording, RecordingError, RecordingResult};
pub use replay::{replay, ReplayReport};
pub use trace::{read_trace_file, TraceEntry, TraceError, TraceWriter};
