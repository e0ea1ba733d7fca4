// Shake detection configuration

use serde::{Deserialize, Serialize};

/// Default motion-energy threshold, tuned against phone accelerometer units
pub const DEFAULT_SHAKE_THRESHOLD: f32 = 800.0;

/// Samples arriving within this many milliseconds of the last accepted
/// sample are discarded
pub const DEBOUNCE_WINDOW_MS: u64 = 100;

/// Scale applied to the per-millisecond change so speeds land near the threshold
pub const SPEED_SCALE: f32 = 10_000.0;

/// Construction-time settings for a shake detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    /// Speed above which a sample counts as a shake (dimensionless)
    pub threshold: f32,
}

impl ShakeConfig {
    /// Config with a custom threshold
    pub fn with_threshold(threshold: f32) -> Self {
        ShakeConfig { threshold }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        ShakeConfig {
            threshold: DEFAULT_SHAKE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(ShakeConfig::default().threshold, 800.0);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ShakeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ShakeConfig::default());

        let config: ShakeConfig = serde_json::from_str(r#"{"threshold": 1200.0}"#).unwrap();
        assert_eq!(config.threshold, 1200.0);
    }
}
