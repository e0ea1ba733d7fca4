// Shake detector
// Subscribes to a motion sensor source and fires a callback per detected shake

use log::{debug, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::gesture::config::ShakeConfig;
use crate::gesture::gate::{SampleVerdict, ShakeGate};
use crate::motion::{
    MotionSample, MotionSensorSource, SampleHandler, SamplingRate, SensorEvent, SubscriptionId,
};

type ShakeCallback = Arc<dyn Fn() + Send + Sync>;
type VerdictObserver = Arc<dyn Fn(&MotionSample, &SampleVerdict) + Send + Sync>;

/// Debounced shake detector bound to one sensor source
///
/// Samples are handled on the source's delivery context. `start` and `stop`
/// are idempotent; a missing accelerometer makes `start` a silent no-op.
pub struct ShakeDetector<S: MotionSensorSource> {
    source: S,
    gate: Arc<Mutex<ShakeGate>>,
    on_shake: ShakeCallback,
    observer: Option<VerdictObserver>,
    active: Arc<AtomicBool>,
    subscription: Option<SubscriptionId>,
}

impl<S: MotionSensorSource> ShakeDetector<S> {
    /// Create a detector with the default threshold
    pub fn new(source: S, on_shake: impl Fn() + Send + Sync + 'static) -> Self {
        Self::with_config(source, ShakeConfig::default(), on_shake)
    }

    /// Create a detector with a custom configuration
    pub fn with_config(
        source: S,
        config: ShakeConfig,
        on_shake: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        ShakeDetector {
            source,
            gate: Arc::new(Mutex::new(ShakeGate::new(config))),
            on_shake: Arc::new(on_shake),
            observer: None,
            active: Arc::new(AtomicBool::new(false)),
            subscription: None,
        }
    }

    /// Attach an observer that sees every sample verdict, shakes included
    /// Takes effect from the next `start`
    pub fn with_observer(
        mut self,
        observer: impl Fn(&MotionSample, &SampleVerdict) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Subscribe to the sensor at the normal cadence
    pub fn start(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        self.lock_gate().reset();
        self.active.store(true, Ordering::SeqCst);

        match self
            .source
            .subscribe(SamplingRate::Normal, self.sample_handler())
        {
            Ok(id) => {
                debug!("Shake detection started ({:?})", id);
                self.subscription = Some(id);
            }
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                debug!("Shake detection not started: {}", e);
            }
        }
    }

    /// Unsubscribe from the sensor; safe to call when never started
    pub fn stop(&mut self) {
        let Some(id) = self.subscription.take() else {
            return;
        };

        self.active.store(false, Ordering::SeqCst);
        match self.source.unsubscribe(id) {
            Ok(()) => debug!("Shake detection stopped ({:?})", id),
            Err(e) => warn!("Failed to release sensor subscription: {}", e),
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn threshold(&self) -> f32 {
        self.lock_gate().config().threshold
    }

    /// The most recently accepted sample since the last `start`
    pub fn last_sample(&self) -> Option<MotionSample> {
        self.lock_gate().last_sample().copied()
    }

    fn lock_gate(&self) -> std::sync::MutexGuard<'_, ShakeGate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sample_handler(&self) -> SampleHandler {
        let gate = Arc::clone(&self.gate);
        let active = Arc::clone(&self.active);
        let on_shake = Arc::clone(&self.on_shake);
        let observer = self.observer.clone();

        Box::new(move |event| {
            // Accuracy changes carry nothing the gate uses
            let SensorEvent::Sample(sample) = event else {
                return;
            };
            if !active.load(Ordering::SeqCst) {
                return;
            }

            let verdict = gate
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .observe(&sample);

            if let Some(observer) = &observer {
                observer(&sample, &verdict);
            }
            if let SampleVerdict::Shake { speed } = verdict {
                debug!(
                    "Shake at {} ms (speed {:.1})",
                    sample.timestamp_ms, speed
                );
                on_shake();
            }
        })
    }
}

impl<S: MotionSensorSource> Drop for ShakeDetector<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
