//! Prometheus counters for workout activity.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::models::Variant;

/// Counters registered in a private registry, one per store.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    workouts_created: IntCounterVec,
    validation_failures: IntCounter,
    workouts_removed: IntCounter,
    storage_errors: IntCounter,
    interactions: IntCounter,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let workouts_created = IntCounterVec::new(
            Opts::new("mapty_workouts_created_total", "Workouts added to the collection"),
            &["variant"],
        )
        .expect("valid metric opts");
        let validation_failures = IntCounter::new(
            "mapty_validation_failures_total",
            "Form submissions rejected by validation",
        )
        .expect("valid metric opts");
        let workouts_removed =
            IntCounter::new("mapty_workouts_removed_total", "Workouts removed from the collection")
                .expect("valid metric opts");
        let storage_errors =
            IntCounter::new("mapty_storage_errors_total", "Failed or unreadable storage operations")
                .expect("valid metric opts");
        let interactions =
            IntCounter::new("mapty_interactions_total", "Clicks on rendered workouts")
                .expect("valid metric opts");

        for c in [
            Box::new(workouts_created.clone()) as Box<dyn prometheus::core::Collector>,
            Box::new(validation_failures.clone()),
            Box::new(workouts_removed.clone()),
            Box::new(storage_errors.clone()),
            Box::new(interactions.clone()),
        ] {
            registry.register(c).expect("metric names are unique");
        }

        Self {
            registry,
            workouts_created,
            validation_failures,
            workouts_removed,
            storage_errors,
            interactions,
        }
    }

    pub fn workout_created(&self, variant: Variant) {
        self.workouts_created.with_label_values(&[variant.as_str()]).inc();
    }

    pub fn validation_failed(&self) {
        self.validation_failures.inc();
    }

    pub fn workouts_removed(&self, n: u64) {
        self.workouts_removed.inc_by(n);
    }

    pub fn storage_error(&self) {
        self.storage_errors.inc();
    }

    pub fn interaction(&self) {
        self.interactions.inc();
    }

    pub fn created_total(&self, variant: Variant) -> u64 {
        self.workouts_created.with_label_values(&[variant.as_str()]).get()
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.validation_failures.get()
    }

    pub fn removed_total(&self) -> u64 {
        self.workouts_removed.get()
    }

    pub fn storage_errors_total(&self) -> u64 {
        self.storage_errors.get()
    }

    pub fn interactions_total(&self) -> u64 {
        self.interactions.get()
    }

    /// Text exposition format.
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            log::warn!("failed to encode metrics: {e}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}
