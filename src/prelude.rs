pub use crate::builder::{Scheduler, SchedulerBuilder, SchedulerKind};
pub use crate::config::{DiskTiming, SegmentSizes, SimConfig, SimConfigBuilder};
pub use crate::driver::SimulationDriver;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::events::{EventSink, LogSink, NullSink, SharedRecorder, SimEvent, Tee};
#[cfg(feature = "metrics")]
pub use crate::metrics::{MetricsExporter, MetricsSnapshotProvider, SimMetrics, SimMetricsSnapshot};
pub use crate::policy::{Access, Buffer, Segment, SegmentedCache, Touch};
pub use crate::report::{SimulationReport, TimingSeries};
pub use crate::request::{Process, ProcessId, Request, RequestKind, TrackId};
pub use crate::scheduler::{
    DiskHead, FifoScheduler, SplitSweepScheduler, SweepDirection, SweepScheduler,
};
pub use crate::traits::DiskScheduler;
pub use crate::workload::{literal_workload, WorkloadSpec};
