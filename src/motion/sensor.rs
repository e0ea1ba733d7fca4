// Motion sensor seam
// Platform accelerometer services are reached through MotionSensorSource;
// ScriptedSensor is the in-process implementation used for replay and tests

use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use crate::motion::MotionSample;

/// Errors reported by a sensor source
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SensorError {
    #[error("No accelerometer available on this device")]
    Unavailable,

    #[error("Unknown sensor subscription: {0:?}")]
    UnknownSubscription(SubscriptionId),
}

/// Delivery cadence requested from the platform
/// The platform decides the real interval; these are hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingRate {
    /// Platform default cadence, suitable for gestures
    #[default]
    Normal,
    Ui,
    Game,
    Fastest,
}

/// Accuracy levels reported alongside the sample stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorAccuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

/// One notification from the sensor service
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Sample(MotionSample),
    AccuracyChanged(SensorAccuracy),
}

/// Handle identifying one live subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Closure receiving sensor events in delivery order
pub type SampleHandler = Box<dyn FnMut(SensorEvent) + Send>;

/// A source of timestamped 3-axis samples
///
/// Implementations deliver events to each registered handler serially,
/// in the order the hardware produced them, until `unsubscribe` is called.
pub trait MotionSensorSource {
    /// Register a handler; fails with `SensorError::Unavailable` when the
    /// device has no accelerometer
    fn subscribe(
        &self,
        rate: SamplingRate,
        handler: SampleHandler,
    ) -> Result<SubscriptionId, SensorError>;

    /// Remove a previously registered handler
    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), SensorError>;
}

struct Subscription {
    id: SubscriptionId,
    rate: SamplingRate,
    handler: Arc<Mutex<SampleHandler>>,
}

struct ScriptedInner {
    available: bool,
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

/// In-process sensor source driven by the caller
///
/// Clones share the same subscription table, so one clone can be handed to a
/// detector while another emits events into it.
#[derive(Clone)]
pub struct ScriptedSensor {
    inner: Arc<Mutex<ScriptedInner>>,
}

impl ScriptedSensor {
    /// A source with a working accelerometer
    pub fn new() -> Self {
        Self::with_availability(true)
    }

    /// A source modelling a device without an accelerometer
    pub fn unavailable() -> Self {
        Self::with_availability(false)
    }

    fn with_availability(available: bool) -> Self {
        ScriptedSensor {
            inner: Arc::new(Mutex::new(ScriptedInner {
                available,
                next_id: 1,
                subscriptions: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver an event to every live subscription
    ///
    /// The table lock is released before handlers run, so a handler may
    /// unsubscribe (directly or through its owner) without deadlocking.
    pub fn emit(&self, event: SensorEvent) {
        let targets: Vec<(SubscriptionId, Arc<Mutex<SampleHandler>>)> = self
            .lock()
            .subscriptions
            .iter()
            .map(|s| (s.id, Arc::clone(&s.handler)))
            .collect();

        for (id, handler) in targets {
            if !self.is_subscribed(id) {
                continue;
            }
            let mut handler = handler.lock().unwrap_or_else(PoisonError::into_inner);
            (*handler)(event);
        }
    }

    /// Convenience wrapper around `emit` for a single sample
    pub fn emit_sample(&self, sample: MotionSample) {
        self.emit(SensorEvent::Sample(sample));
    }

    /// Number of handlers currently registered
    pub fn active_subscriptions(&self) -> usize {
        self.lock().subscriptions.len()
    }

    /// Rates requested by the live subscriptions, in registration order
    pub fn requested_rates(&self) -> Vec<SamplingRate> {
        self.lock().subscriptions.iter().map(|s| s.rate).collect()
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.lock().subscriptions.iter().any(|s| s.id == id)
    }
}

impl Default for ScriptedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensorSource for ScriptedSensor {
    fn subscribe(
        &self,
        rate: SamplingRate,
        handler: SampleHandler,
    ) -> Result<SubscriptionId, SensorError> {
        let mut inner = self.lock();
        if !inner.available {
            return Err(SensorError::Unavailable);
        }

        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscriptions.push(Subscription {
            id,
            rate,
            handler: Arc::new(Mutex::new(handler)),
        });

        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), SensorError> {
        let mut inner = self.lock();
        let before = inner.subscriptions.len();
        inner.subscriptions.retain(|s| s.id != id);

        if inner.subscriptions.len() == before {
            return Err(SensorError::UnknownSubscription(id));
        }
        Ok(())
    }
}
