//! Simulation counters (feature `metrics`).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::SimMetrics;
pub use snapshot::SimMetricsSnapshot;
pub use traits::{
    CacheMetricsRecorder, DriverMetricsRecorder, MetricsExporter, MetricsSnapshotProvider,
    SchedulerMetricsRecorder,
};
