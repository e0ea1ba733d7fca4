// Shake gate
// Debounced jerk estimate over consecutive accepted samples

use serde::{Deserialize, Serialize};

use crate::gesture::config::{ShakeConfig, DEBOUNCE_WINDOW_MS, SPEED_SCALE};
use crate::motion::MotionSample;

/// Outcome of feeding one sample to the gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SampleVerdict {
    /// First sample since start/reset; stored without evaluation
    Baseline,

    /// Arrived inside the debounce window; state untouched
    Debounced,

    /// Accepted, speed at or below threshold
    Still { speed: f32 },

    /// Accepted, speed above threshold
    Shake { speed: f32 },
}

impl SampleVerdict {
    pub fn is_shake(&self) -> bool {
        matches!(self, SampleVerdict::Shake { .. })
    }

    /// Whether the sample replaced the stored baseline
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SampleVerdict::Debounced)
    }

    pub fn speed(&self) -> Option<f32> {
        match self {
            SampleVerdict::Still { speed } | SampleVerdict::Shake { speed } => Some(*speed),
            SampleVerdict::Baseline | SampleVerdict::Debounced => None,
        }
    }
}

/// Rolling detector state: the last accepted sample and the threshold
#[derive(Debug, Clone)]
pub struct ShakeGate {
    config: ShakeConfig,
    last: Option<MotionSample>,
}

impl ShakeGate {
    pub fn new(config: ShakeConfig) -> Self {
        ShakeGate { config, last: None }
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Evaluate a sample against the previously accepted one
    ///
    /// Every accepted sample becomes the new baseline whether or not it fired.
    /// Timestamps at or before `last + DEBOUNCE_WINDOW_MS` (including ones
    /// that run backwards) are discarded.
    pub fn observe(&mut self, sample: &MotionSample) -> SampleVerdict {
        let Some(last) = self.last else {
            self.last = Some(*sample);
            return SampleVerdict::Baseline;
        };

        let delta_ms = sample.timestamp_ms.saturating_sub(last.timestamp_ms);
        if delta_ms <= DEBOUNCE_WINDOW_MS {
            return SampleVerdict::Debounced;
        }

        let speed = speed_between(&last, sample, delta_ms);
        self.last = Some(*sample);

        if speed > self.config.threshold {
            SampleVerdict::Shake { speed }
        } else {
            SampleVerdict::Still { speed }
        }
    }

    /// The most recently accepted sample, if any
    pub fn last_sample(&self) -> Option<&MotionSample> {
        self.last.as_ref()
    }

    /// Components of the last accepted sample; zero vector when unset
    pub fn last_components(&self) -> [f32; 3] {
        self.last.map(|s| s.components()).unwrap_or([0.0; 3])
    }

    /// Forget the baseline so the next sample is absorbed unevaluated
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ShakeGate {
    fn default() -> Self {
        Self::new(ShakeConfig::default())
    }
}

/// |Δ(x + y + z)| / Δt · SPEED_SCALE
fn speed_between(previous: &MotionSample, current: &MotionSample, delta_ms: u64) -> f32 {
    let change = (current.component_sum() - previous.component_sum()).abs();
    change / delta_ms as f32 * SPEED_SCALE
}
