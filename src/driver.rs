//! Quantum-driven simulation loop.
//!
//! The driver owns every piece of mutable simulation state: the scheduler,
//! the cache and the process queues. Nothing is shared, so the whole run is
//! a single-owner walk with no locking.
//!
//! ## Round Robin
//!
//! ```text
//!   rotation: VecDeque<Process>        (only processes with queued work)
//!
//!   while rotation is non-empty:                       ── one round
//!     repeat |rotation| times:
//!       p ← pop_front(rotation)
//!       elapsed ← 0
//!       while p has requests and elapsed < quantum:
//!         r ← p.pop_request()
//!         cache.touch(r.track)
//!         scheduler.add_request(r)
//!         elapsed += request_cost(r.kind)
//!       if elapsed >= quantum: emit QuantumExceeded
//!       if p has requests: push_back(rotation, p)
//!
//!   scheduler.process_requests()                       ── drain
//!   total = Σ request_cost + schedule_time
//! ```
//!
//! Drained processes drop out of the rotation, so checking for remaining
//! work is a length test instead of a scan over every process.
//!
//! The quantum is checked before each issue: the request that crosses the
//! budget still runs, and the process yields afterwards.

use std::collections::VecDeque;

use crate::builder::{Scheduler, SchedulerBuilder, SchedulerKind};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::events::{EventSink, SimEvent};
use crate::policy::segmented_lfu::{Access, SegmentedCache};
use crate::report::{CacheResidency, SimulationReport};
use crate::request::{Process, Request, TrackId};
use crate::traits::DiskScheduler;

/// Counters gathered while issuing requests.
#[derive(Debug, Default, Clone, Copy)]
struct IssueStats {
    issue_time: f64,
    requests_issued: usize,
    quantum_overruns: usize,
    evictions: usize,
}

/// Runs processes against a scheduler and a segmented cache.
///
/// # Example
///
/// ```
/// use disksim::builder::SchedulerKind;
/// use disksim::config::SimConfig;
/// use disksim::driver::SimulationDriver;
/// use disksim::events::NullSink;
/// use disksim::workload::literal_workload;
///
/// let driver = SimulationDriver::with_kind(
///     SimConfig::default(),
///     SchedulerKind::Fifo,
///     literal_workload(),
/// )
/// .unwrap();
///
/// let report = driver.run(&mut NullSink);
/// assert_eq!(report.requests_issued, 16);
/// assert_eq!(report.request_times.len(), 16);
/// ```
#[derive(Debug)]
pub struct SimulationDriver<S: DiskScheduler = Scheduler> {
    config: SimConfig,
    scheduler: S,
    cache: SegmentedCache,
    rotation: VecDeque<Process>,
}

impl SimulationDriver<Scheduler> {
    /// Builds the selected scheduler from `config` and wires up a driver.
    pub fn with_kind(
        config: SimConfig,
        kind: SchedulerKind,
        processes: impl IntoIterator<Item = Process>,
    ) -> Result<Self, ConfigError> {
        let scheduler = SchedulerBuilder::from_config(&config).build(kind);
        Self::new(config, scheduler, processes)
    }
}

impl<S: DiskScheduler> SimulationDriver<S> {
    /// Creates a driver over an already built scheduler.
    ///
    /// Fails if the configuration is invalid or any queued request targets
    /// a track beyond `number_of_tracks`.
    pub fn new(
        config: SimConfig,
        scheduler: S,
        processes: impl IntoIterator<Item = Process>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let max_track = config.number_of_tracks();
        let mut rotation = VecDeque::new();
        for process in processes {
            if let Some(bad) = process.requests().find(|r| r.track() > max_track) {
                return Err(ConfigError::new(format!(
                    "process {} requests track {}, beyond number_of_tracks {max_track}",
                    process.id(),
                    bad.track()
                )));
            }
            if process.has_pending_requests() {
                rotation.push_back(process);
            }
        }

        let cache = SegmentedCache::try_new(config.segments())?;
        Ok(Self {
            config,
            scheduler,
            cache,
            rotation,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn cache(&self) -> &SegmentedCache {
        &self.cache
    }

    /// Processes that still have queued requests.
    pub fn active_processes(&self) -> usize {
        self.rotation.len()
    }

    /// Runs the simulation to completion.
    ///
    /// Every queued request is issued exactly once, then the scheduler
    /// drains them through the head cost model.
    pub fn run(mut self, sink: &mut dyn EventSink) -> SimulationReport {
        let mut stats = IssueStats::default();
        let mut rounds = 0;

        while !self.rotation.is_empty() {
            rounds += 1;
            for _ in 0..self.rotation.len() {
                let Some(mut process) = self.rotation.pop_front() else {
                    break;
                };
                self.run_slice(&mut process, &mut stats, sink);
                if process.has_pending_requests() {
                    self.rotation.push_back(process);
                }
            }
        }

        self.scheduler.process_requests(sink);

        let schedule_time = self.scheduler.schedule_time();
        let total_simulation_time = stats.issue_time + schedule_time;
        sink.record(&SimEvent::SimulationCompleted {
            total: total_simulation_time,
        });

        SimulationReport {
            scheduler: self.scheduler.name().to_string(),
            total_simulation_time,
            issue_time: stats.issue_time,
            schedule_time,
            request_times: self.scheduler.request_times().to_vec(),
            rounds,
            requests_issued: stats.requests_issued,
            quantum_overruns: stats.quantum_overruns,
            final_head: self.scheduler.head_position(),
            cache: CacheResidency::capture(&self.cache, stats.evictions),
        }
    }

    /// Issues requests for one process until its queue or quantum runs out.
    fn run_slice(&mut self, process: &mut Process, stats: &mut IssueStats, sink: &mut dyn EventSink) {
        let quantum = self.config.quantum();
        let mut elapsed = 0.0;

        while elapsed < quantum {
            let Some(request) = process.pop_request() else {
                break;
            };
            self.touch_cache(request.track(), stats, sink);
            self.scheduler.add_request(request);

            let cost = self.config.request_cost(request.kind());
            elapsed += cost;
            stats.issue_time += cost;
            stats.requests_issued += 1;
            self.emit_serviced(process, request, cost, sink);
        }

        if elapsed >= quantum {
            stats.quantum_overruns += 1;
            sink.record(&SimEvent::QuantumExceeded {
                process_id: process.id(),
                elapsed,
            });
        }
    }

    fn touch_cache(&mut self, track: TrackId, stats: &mut IssueStats, sink: &mut dyn EventSink) {
        let touch = self.cache.touch(track);

        if let Some(evicted) = touch.evicted {
            stats.evictions += 1;
            sink.record(&SimEvent::BufferEvicted {
                id: evicted.id(),
                frequency: evicted.frequency(),
            });
        }

        let event = match touch.access {
            Access::Inserted => SimEvent::BufferAdded { id: track },
            Access::Refreshed => SimEvent::BufferRefreshed { id: track },
            Access::Promoted { .. } => SimEvent::BufferPromoted {
                id: track,
                new_frequency: touch.buffer.frequency(),
            },
        };
        sink.record(&event);
    }

    fn emit_serviced(
        &self,
        process: &Process,
        request: Request,
        cost: f64,
        sink: &mut dyn EventSink,
    ) {
        sink.record(&SimEvent::RequestServiced {
            process_id: process.id(),
            track: request.track(),
            kind: request.kind(),
            total_cost: cost,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::request::{ProcessId, RequestKind};
    use crate::scheduler::fifo::FifoScheduler;

    fn fifo_driver(config: SimConfig, processes: Vec<Process>) -> SimulationDriver {
        SimulationDriver::with_kind(config, SchedulerKind::Fifo, processes).unwrap()
    }

    fn serviced_order(events: &[SimEvent]) -> Vec<(ProcessId, TrackId)> {
        events
            .iter()
            .filter_map(|e| match e {
                SimEvent::RequestServiced {
                    process_id, track, ..
                } => Some((*process_id, *track)),
                _ => None,
            })
            .collect()
    }

    // ==============================================
    // Round Robin
    // ==============================================

    mod round_robin {
        use super::*;

        #[test]
        fn default_quantum_allows_two_requests_per_slice() {
            // request cost = 4 + 0.016 + 0.05 + 0.15 + 7 = 11.216; two cross 20
            let processes = vec![
                Process::with_requests(1, [10, 11, 12].map(Request::read)),
                Process::with_requests(2, [20, 21].map(Request::read)),
            ];
            let mut events: Vec<SimEvent> = Vec::new();
            let report = fifo_driver(SimConfig::default(), processes).run(&mut events);

            assert_eq!(
                serviced_order(&events),
                vec![(1, 10), (1, 11), (2, 20), (2, 21), (1, 12)]
            );
            assert_eq!(report.rounds, 2);
            assert_eq!(report.quantum_overruns, 2);
        }

        #[test]
        fn large_quantum_drains_each_process_in_one_slice() {
            let config = SimConfig::builder().quantum(1_000.0).try_build().unwrap();
            let processes = vec![
                Process::with_requests(1, [1, 2, 3].map(Request::write)),
                Process::with_requests(2, [4].map(Request::write)),
            ];
            let mut events: Vec<SimEvent> = Vec::new();
            let report = fifo_driver(config, processes).run(&mut events);

            assert_eq!(report.rounds, 1);
            assert_eq!(report.quantum_overruns, 0);
            assert_eq!(
                serviced_order(&events),
                vec![(1, 1), (1, 2), (1, 3), (2, 4)]
            );
        }

        #[test]
        fn quantum_overrun_reports_elapsed_time() {
            let config = SimConfig::default();
            let cost = config.request_cost(RequestKind::Read);
            let processes = vec![Process::with_requests(7, [5, 6, 7].map(Request::read))];
            let mut events: Vec<SimEvent> = Vec::new();
            fifo_driver(config, processes).run(&mut events);

            let overruns: Vec<_> = events
                .iter()
                .filter_map(|e| match e {
                    SimEvent::QuantumExceeded {
                        process_id,
                        elapsed,
                    } => Some((*process_id, *elapsed)),
                    _ => None,
                })
                .collect();
            assert_eq!(overruns.len(), 1);
            assert_eq!(overruns[0].0, 7);
            assert!((overruns[0].1 - 2.0 * cost).abs() < 1e-9);
        }

        #[test]
        fn empty_processes_are_skipped() {
            let driver = fifo_driver(
                SimConfig::default(),
                vec![Process::new(1), Process::with_requests(2, [Request::read(9)])],
            );
            assert_eq!(driver.active_processes(), 1);
            let report = driver.run(&mut NullSink);
            assert_eq!(report.requests_issued, 1);
        }
    }

    // ==============================================
    // Timing
    // ==============================================

    mod timing {
        use super::*;

        #[test]
        fn total_is_issue_time_plus_schedule_time() {
            let config = SimConfig::default();
            let processes = vec![Process::with_requests(
                1,
                [Request::read(60), Request::write(40)],
            )];
            let report = fifo_driver(config.clone(), processes).run(&mut NullSink);

            let issue = config.request_cost(RequestKind::Read) + config.request_cost(RequestKind::Write);
            // 50 → 60: 9, 60 → 40: 14
            assert_eq!(report.schedule_time, 23.0);
            assert!((report.issue_time - issue).abs() < 1e-9);
            assert!((report.total_simulation_time - (issue + 23.0)).abs() < 1e-9);
            assert_eq!(report.request_times, vec![9.0, 14.0]);
            assert_eq!(report.final_head, 40);
        }

        #[test]
        fn completion_event_carries_total() {
            let processes = vec![Process::with_requests(1, [Request::read(50)])];
            let mut events: Vec<SimEvent> = Vec::new();
            let report = fifo_driver(SimConfig::default(), processes).run(&mut events);

            assert_eq!(
                events.last(),
                Some(&SimEvent::SimulationCompleted {
                    total: report.total_simulation_time
                })
            );
        }
    }

    // ==============================================
    // Cache Wiring
    // ==============================================

    mod cache_wiring {
        use super::*;

        #[test]
        fn repeated_track_emits_refresh_then_promotion() {
            let config = SimConfig::builder()
                .segment_sizes(1, 1, 1)
                .quantum(1_000.0)
                .try_build()
                .unwrap();
            let processes = vec![Process::with_requests(
                1,
                [1, 1, 2, 1].map(Request::read),
            )];
            let mut events: Vec<SimEvent> = Vec::new();
            fifo_driver(config, processes).run(&mut events);

            let cache_events: Vec<_> = events
                .into_iter()
                .filter(|e| {
                    matches!(
                        e,
                        SimEvent::BufferAdded { .. }
                            | SimEvent::BufferRefreshed { .. }
                            | SimEvent::BufferPromoted { .. }
                            | SimEvent::BufferEvicted { .. }
                    )
                })
                .collect();
            assert_eq!(
                cache_events,
                vec![
                    SimEvent::BufferAdded { id: 1 },
                    SimEvent::BufferRefreshed { id: 1 },
                    SimEvent::BufferAdded { id: 2 },
                    SimEvent::BufferPromoted {
                        id: 1,
                        new_frequency: 2
                    },
                ]
            );
        }

        #[test]
        fn eviction_is_reported_before_insertion() {
            let config = SimConfig::builder()
                .segment_sizes(1, 1, 1)
                .quantum(1_000.0)
                .try_build()
                .unwrap();
            let processes = vec![Process::with_requests(1, [1, 2, 3, 4].map(Request::read))];
            let mut events: Vec<SimEvent> = Vec::new();
            let report = fifo_driver(config, processes).run(&mut events);

            let pos_evict = events
                .iter()
                .position(|e| matches!(e, SimEvent::BufferEvicted { id: 1, .. }))
                .unwrap();
            let pos_add = events
                .iter()
                .position(|e| *e == SimEvent::BufferAdded { id: 4 })
                .unwrap();
            assert!(pos_evict < pos_add);
            assert_eq!(report.cache.evictions, 1);
            assert_eq!(report.cache.left, vec![4]);
        }
    }

    // ==============================================
    // Validation
    // ==============================================

    mod validation {
        use super::*;

        #[test]
        fn rejects_tracks_beyond_disk() {
            let processes = vec![Process::with_requests(3, [Request::read(513)])];
            let err = SimulationDriver::with_kind(SimConfig::default(), SchedulerKind::Fifo, processes)
                .unwrap_err();
            assert!(err.message().contains("513"));
        }

        #[test]
        fn accepts_boundary_tracks() {
            let processes = vec![Process::with_requests(1, [Request::read(0), Request::read(512)])];
            assert!(fifo_driver(SimConfig::default(), processes).cache().is_empty());
        }

        #[test]
        fn generic_over_concrete_scheduler() {
            let config = SimConfig::default();
            let scheduler = FifoScheduler::new(config.initial_head(), config.disk_timing());
            let driver = SimulationDriver::new(
                config,
                scheduler,
                vec![Process::with_requests(1, [Request::read(0)])],
            )
            .unwrap();
            let report = driver.run(&mut NullSink);
            assert_eq!(report.scheduler, "FIFO");
            assert_eq!(report.request_times, vec![14.0]);
        }
    }
}
