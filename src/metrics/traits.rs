//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so the
//! simulation core never depends on how counters are stored or published.
//!
//! ```text
//!   ┌──────────────────────────┐ ┌──────────────────────────┐ ┌─────────────────────────┐
//!   │ SchedulerMetricsRecorder │ │  CacheMetricsRecorder    │ │ DriverMetricsRecorder   │
//!   │ head_move / schedule     │ │ add/refresh/promote/evict│ │ request / overrun       │
//!   └────────────┬─────────────┘ └────────────┬─────────────┘ └────────────┬────────────┘
//!                └────────────────────────────┼────────────────────────────┘
//!                                             ▼
//!                                    ┌─────────────────┐
//!                                    │   SimMetrics    │  (also an EventSink)
//!                                    └────────┬────────┘
//!                      ┌──────────────────────┴──────────────────────┐
//!                      ▼                                             ▼
//!   ┌──────────────────────────────┐              ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │              │ MetricsExporter<S>           │
//!   │ (tests, reports)             │              │ (Prometheus text)            │
//!   └──────────────────────────────┘              └──────────────────────────────┘
//! ```

use crate::request::RequestKind;

/// Head movement counters.
pub trait SchedulerMetricsRecorder {
    fn record_head_move(&mut self, cost: f64);
    fn record_schedule_completed(&mut self);
}

/// Segmented cache counters.
pub trait CacheMetricsRecorder {
    fn record_buffer_added(&mut self);
    fn record_buffer_refreshed(&mut self);
    fn record_buffer_promoted(&mut self, new_frequency: u32);
    fn record_buffer_evicted(&mut self, frequency: u32);
}

/// Quantum loop counters.
pub trait DriverMetricsRecorder {
    fn record_request(&mut self, kind: RequestKind, cost: f64);
    fn record_quantum_overrun(&mut self);
}

/// Snapshot provider for tests and reports.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
