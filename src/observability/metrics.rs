use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::domain::OutcomeStatus;

/// Metrics registry for the procurement core.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Total order evaluations that produced an outcome
    pub orders_total: AtomicU64,

    /// Outcomes by status
    pub orders_approved: AtomicU64,
    pub orders_awaiting_approval: AtomicU64,
    pub orders_rejected: AtomicU64,
    pub orders_error: AtomicU64,

    /// Evaluation latency buckets (microseconds)
    pub latency_under_100us: AtomicU64,
    pub latency_100us_1ms: AtomicU64,
    pub latency_1_10ms: AtomicU64,
    pub latency_over_10ms: AtomicU64,

    /// Policy store operations
    pub store_reads_total: AtomicU64,
    pub store_read_errors: AtomicU64,
    pub store_writes_total: AtomicU64,
    pub store_write_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        MetricsRegistry::default()
    }

    /// Record an order outcome.
    pub fn record_outcome(&self, status: OutcomeStatus) {
        self.orders_total.fetch_add(1, Ordering::Relaxed);

        let counter = match status {
            OutcomeStatus::Approved => &self.orders_approved,
            OutcomeStatus::AwaitingApproval => &self.orders_awaiting_approval,
            OutcomeStatus::Rejected => &self.orders_rejected,
            OutcomeStatus::Error => &self.orders_error,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record evaluation latency.
    pub fn record_latency(&self, start: Instant) {
        let micros = start.elapsed().as_micros() as u64;

        if micros < 100 {
            self.latency_under_100us.fetch_add(1, Ordering::Relaxed);
        } else if micros < 1000 {
            self.latency_100us_1ms.fetch_add(1, Ordering::Relaxed);
        } else if micros < 10000 {
            self.latency_1_10ms.fetch_add(1, Ordering::Relaxed);
        } else {
            self.latency_over_10ms.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a policy store read.
    pub fn record_store_read(&self, success: bool) {
        self.store_reads_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.store_read_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a policy store write.
    pub fn record_store_write(&self, success: bool) {
        self.store_writes_total.fetch_add(1, Ordering::Relaxed);
        if !success {
            self.store_write_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Export metrics in Prometheus text format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP sitegate_orders_total Total order evaluations
# TYPE sitegate_orders_total counter
sitegate_orders_total {}

# HELP sitegate_orders Order outcomes by status
# TYPE sitegate_orders counter
sitegate_orders{{status="approved"}} {}
sitegate_orders{{status="awaiting_approval"}} {}
sitegate_orders{{status="rejected"}} {}
sitegate_orders{{status="error"}} {}

# HELP sitegate_evaluation_latency_bucket Order evaluation latency histogram
# TYPE sitegate_evaluation_latency_bucket counter
sitegate_evaluation_latency_bucket{{le="0.0001"}} {}
sitegate_evaluation_latency_bucket{{le="0.001"}} {}
sitegate_evaluation_latency_bucket{{le="0.01"}} {}
sitegate_evaluation_latency_bucket{{le="+Inf"}} {}

# HELP sitegate_store_reads_total Policy store reads
# TYPE sitegate_store_reads_total counter
sitegate_store_reads_total {}

# HELP sitegate_store_read_errors_total Policy store read errors
# TYPE sitegate_store_read_errors_total counter
sitegate_store_read_errors_total {}

# HELP sitegate_store_writes_total Policy store writes
# TYPE sitegate_store_writes_total counter
sitegate_store_writes_total {}

# HELP sitegate_store_write_errors_total Policy store write errors
# TYPE sitegate_store_write_errors_total counter
sitegate_store_write_errors_total {}
"#,
            self.orders_total.load(Ordering::Relaxed),
            self.orders_approved.load(Ordering::Relaxed),
            self.orders_awaiting_approval.load(Ordering::Relaxed),
            self.orders_rejected.load(Ordering::Relaxed),
            self.orders_error.load(Ordering::Relaxed),
            self.latency_under_100us.load(Ordering::Relaxed),
            self.latency_100us_1ms.load(Ordering::Relaxed),
            self.latency_1_10ms.load(Ordering::Relaxed),
            self.latency_over_10ms.load(Ordering::Relaxed),
            self.store_reads_total.load(Ordering::Relaxed),
            self.store_read_errors.load(Ordering::Relaxed),
            self.store_writes_total.load(Ordering::Relaxed),
            self.store_write_errors.load(Ordering::Relaxed),
        )
    }
}

/// Guard for timing operations.
pub struct TimingGuard<'a> {
    registry: &'a MetricsRegistry,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    pub fn new(registry: &'a MetricsRegistry) -> Self {
        TimingGuard {
            registry,
            start: Instant::now(),
        }
    }
}

impl<'a> Drop for TimingGuard<'a> {
    fn drop(&mut self) {
        self.registry.record_latency(self.start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcome() {
        let metrics = MetricsRegistry::new();

        metrics.record_outcome(OutcomeStatus::Approved);
        metrics.record_outcome(OutcomeStatus::Approved);
        metrics.record_outcome(OutcomeStatus::AwaitingApproval);
        metrics.record_outcome(OutcomeStatus::Error);

        assert_eq!(metrics.orders_total.load(Ordering::Relaxed), 4);
        assert_eq!(metrics.orders_approved.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.orders_awaiting_approval.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.orders_rejected.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.orders_error.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_timing_guard_records() {
        let metrics = MetricsRegistry::new();
        {
            let _timer = TimingGuard::new(&metrics);
        }

        let recorded = metrics.latency_under_100us.load(Ordering::Relaxed)
            + metrics.latency_100us_1ms.load(Ordering::Relaxed)
            + metrics.latency_1_10ms.load(Ordering::Relaxed)
            + metrics.latency_over_10ms.load(Ordering::Relaxed);
        assert_eq!(recorded, 1);
    }

    #[test]
    fn test_store_counters() {
        let metrics = MetricsRegistry::new();
        metrics.record_store_write(true);
        metrics.record_store_write(false);
        metrics.record_store_read(true);

        assert_eq!(metrics.store_writes_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.store_write_errors.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.store_read_errors.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = MetricsRegistry::new();
        metrics.record_outcome(OutcomeStatus::Rejected);

        let output = metrics.to_prometheus();

        assert!(output.contains("sitegate_orders_total 1"));
        assert!(output.contains("sitegate_orders{status=\"rejected\"} 1"));
    }
}
