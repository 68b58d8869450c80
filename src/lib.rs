//! disksim: disk I/O subsystem simulation.
//!
//! Three tightly coupled pieces:
//!
//! - a disk head cost model and three schedulers that drive it
//!   ([`FifoScheduler`](scheduler::FifoScheduler),
//!   [`SweepScheduler`](scheduler::SweepScheduler) ("LOOK"),
//!   [`SplitSweepScheduler`](scheduler::SplitSweepScheduler) ("FLOOK"));
//! - a three-segment frequency-approximating buffer cache
//!   ([`SegmentedCache`](policy::SegmentedCache));
//! - a quantum-based round-robin driver
//!   ([`SimulationDriver`](driver::SimulationDriver)) that feeds process
//!   requests through the cache into the scheduler and aggregates timing.
//!
//! ```text
//!   Process queues ──► SimulationDriver ──► SegmentedCache.touch(track)
//!                            │
//!                            └──► DiskScheduler.add_request(r)
//!                                          │  (all queues empty)
//!                                          ▼
//!                                 process_requests() ──► DiskHead cost model
//!                                          │
//!                                          ▼
//!                                  SimulationReport (+ SimEvent stream)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use disksim::prelude::*;
//!
//! let config = SimConfig::default();
//! let kind = SchedulerKind::from_selection("LOOK", Some("ASC")).unwrap();
//! let driver = SimulationDriver::with_kind(config, kind, literal_workload()).unwrap();
//!
//! let mut events: Vec<SimEvent> = Vec::new();
//! let report = driver.run(&mut events);
//!
//! assert_eq!(report.scheduler, "LOOK");
//! assert_eq!(report.cache.resident(), 9); // nine distinct tracks
//! assert!(report.total_simulation_time > report.schedule_time);
//! ```

pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod policy;
pub mod report;
pub mod request;
pub mod scheduler;
pub mod traits;
pub mod workload;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
