//! Diagnostic observers for dependency injection traceability.
//!
//! Observers receive bind and resolution events synchronously from the
//! container. [`TracingObserver`] forwards them to `tracing`;
//! [`MetricsObserver`] keeps counters that tests and health checks can read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::ServiceKey;
use crate::lifetime::Lifetime;

/// Observer trait for dependency injection events.
///
/// Nested resolutions are reported individually, so resolving a service
/// with two dependencies produces three `resolving`/`resolved` pairs.
/// Keep implementations lightweight; they run on the resolution path.
///
/// # Examples
///
/// ```
/// use diydi::{Container, DiObserver, ServiceKey};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     seen: Mutex<Vec<String>>,
/// }
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, key: &ServiceKey) {
///         self.seen.lock().unwrap().push(key.to_string());
///     }
///
///     fn resolved(&self, _key: &ServiceKey, _duration: Duration) {}
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut container = Container::new();
/// container.add_observer(recorder.clone());
/// ```
pub trait DiObserver: Send + Sync {
    /// Called after a binding has been recorded.
    fn bound(&self, _key: &ServiceKey, _lifetime: Lifetime) {}

    /// Called before a bound service is constructed or fetched from cache.
    fn resolving(&self, key: &ServiceKey);

    /// Called when a service resolved successfully.
    fn resolved(&self, key: &ServiceKey, duration: Duration);

    /// Called when resolution of `key` failed, directly or because of one
    /// of its dependencies.
    fn resolution_failed(&self, _key: &ServiceKey, _error: &DiError) {}
}

/// Container for registered observers.
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn bound(&self, key: &ServiceKey, lifetime: Lifetime) {
        for observer in &self.observers {
            observer.bound(key, lifetime);
        }
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &ServiceKey) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &ServiceKey, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    pub(crate) fn resolution_failed(&self, key: &ServiceKey, error: &DiError) {
        for observer in &self.observers {
            observer.resolution_failed(key, error);
        }
    }
}

/// Built-in observer that emits `tracing` events.
///
/// Bind events are logged at `debug`, resolution events at `trace`, and
/// failures at `warn`. Every event carries the `observer` label so several
/// containers can be told apart.
///
/// ```
/// use diydi::{Container, TracingObserver};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.add_observer(Arc::new(TracingObserver::with_label("app")));
/// ```
pub struct TracingObserver {
    label: String,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self {
            label: "diydi".to_string(),
        }
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for TracingObserver {
    fn bound(&self, key: &ServiceKey, lifetime: Lifetime) {
        tracing::debug!(observer = %self.label, service = %key, %lifetime, "bound");
    }

    fn resolving(&self, key: &ServiceKey) {
        tracing::trace!(observer = %self.label, service = %key, "resolving");
    }

    fn resolved(&self, key: &ServiceKey, duration: Duration) {
        tracing::trace!(observer = %self.label, service = %key, ?duration, "resolved");
    }

    fn resolution_failed(&self, key: &ServiceKey, error: &DiError) {
        tracing::warn!(observer = %self.label, service = %key, %error, "resolution failed");
    }
}

/// Observer that counts resolutions and accumulates their duration.
///
/// ```
/// use diydi::{Container, MetricsObserver, Resolver};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(MetricsObserver::new());
/// let mut container = Container::new();
/// container.add_observer(metrics.clone());
///
/// assert!(container.get_instance::<MetricsObserver>().is_err());
/// assert_eq!(metrics.failure_count(), 1);
/// assert_eq!(metrics.resolution_count(), 0);
/// ```
#[derive(Default)]
pub struct MetricsObserver {
    bindings: AtomicU64,
    resolutions: AtomicU64,
    failures: AtomicU64,
    total_nanos: AtomicU64,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binding_count(&self) -> u64 {
        self.bindings.load(Ordering::Relaxed)
    }

    /// Number of successful resolutions, nested ones included.
    pub fn resolution_count(&self) -> u64 {
        self.resolutions.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_nanos.load(Ordering::Relaxed))
    }

    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }
        Some(Duration::from_nanos(
            self.total_nanos.load(Ordering::Relaxed) / count,
        ))
    }

    pub fn reset(&self) {
        self.bindings.store(0, Ordering::Relaxed);
        self.resolutions.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
        self.total_nanos.store(0, Ordering::Relaxed);
    }
}

impl DiObserver for MetricsObserver {
    fn bound(&self, _key: &ServiceKey, _lifetime: Lifetime) {
        self.bindings.fetch_add(1, Ordering::Relaxed);
    }

    fn resolving(&self, _key: &ServiceKey) {}

    fn resolved(&self, _key: &ServiceKey, duration: Duration) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    fn resolution_failed(&self, _key: &ServiceKey, _error: &DiError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}
