// Motion replay tool
// Runs a recorded accelerometer capture through the shake detector

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plasmalink_lib::gesture::{ShakeConfig, DEFAULT_SHAKE_THRESHOLD};
use plasmalink_lib::recording::{load_csv, load_jsonl, replay, TraceWriter};

#[derive(Parser, Debug)]
#[command(
    name = "replay_motion",
    version,
    about = "Replay a motion capture through the shake detector"
)]
struct Cli {
    /// Capture file: JSONL (one sample per line) or CSV (timestamp_ms,x,y,z)
    recording: PathBuf,

    /// Shake threshold (finite, non-negative)
    #[arg(long, default_value_t = DEFAULT_SHAKE_THRESHOLD, value_parser = parse_threshold)]
    threshold: f32,

    /// Append per-sample verdicts to this JSONL file
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn parse_threshold(value: &str) -> Result<f32, String> {
    let threshold: f32 = value
        .parse()
        .map_err(|e| format!("invalid threshold {:?}: {}", value, e))?;

    if !threshold.is_finite() || threshold < 0.0 {
        return Err(format!(
            "threshold must be a finite, non-negative number, got {}",
            value
        ));
    }
    Ok(threshold)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let is_csv = cli
        .recording
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let recording = if is_csv {
        load_csv(&cli.recording)
    } else {
        load_jsonl(&cli.recording)
    }
    .with_context(|| format!("failed to load {}", cli.recording.display()))?;

    let report = replay(&recording, ShakeConfig::with_threshold(cli.threshold));

    println!(
        "{} samples over {} ms at threshold {}",
        recording.len(),
        recording.duration_ms(),
        report.threshold
    );
    println!(
        "accepted {}  debounced {}  peak speed {}",
        report.accepted,
        report.debounced,
        report
            .peak_speed
            .map_or_else(|| "-".to_string(), |s| format!("{:.1}", s))
    );
    println!("shakes: {}", report.shake_count());
    for timestamp in &report.shakes {
        println!("  at {} ms", timestamp);
    }

    if let Some(path) = cli.trace {
        TraceWriter::new(path.clone())
            .write_batch(&report.trace)
            .with_context(|| format!("failed to write trace {}", path.display()))?;
        println!("trace written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["replay_motion", "walk.jsonl"]).unwrap();
        assert_eq!(cli.recording, PathBuf::from("walk.jsonl"));
        assert_eq!(cli.threshold, DEFAULT_SHAKE_THRESHOLD);
        assert!(cli.trace.is_none());
    }

    #[test]
    fn test_threshold_and_trace() {
        let cli = Cli::try_parse_from([
            "replay_motion",
            "--threshold",
            "1200",
            "--trace",
            "out.jsonl",
            "walk.csv",
        ])
        .unwrap();
        assert_eq!(cli.threshold, 1200.0);
        assert_eq!(cli.trace, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn test_help_is_not_a_recording() {
        let err = Cli::try_parse_from(["replay_motion", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        for value in ["NaN", "inf", "infinity"] {
            let err = Cli::try_parse_from(["replay_motion", "--threshold", value, "r.jsonl"])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "accepted {}", value);
        }
    }

    #[test]
    fn test_negative_threshold_rejected() {
        assert!(parse_threshold("-1").is_err());
        assert_eq!(parse_threshold("0"), Ok(0.0));
    }

    #[test]
    fn test_missing_recording() {
        let err = Cli::try_parse_from(["replay_motion"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
