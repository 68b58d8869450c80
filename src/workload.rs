//! Workload sources.
//!
//! Two ways to fill process queues: a seeded synthetic generator and the
//! classic fixed four-process workload. The driver does not care which one
//! produced its processes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::request::{Process, ProcessId, Request, RequestKind, TrackId};

/// Synthetic workload parameters.
///
/// Request `i` goes to process `i % process_count` (ids start at 1), targets
/// a track drawn uniformly from `[0, track_range)` and picks its kind
/// uniformly from `kinds`. The same seed always yields the same workload.
///
/// # Example
///
/// ```
/// use disksim::workload::WorkloadSpec;
///
/// let spec = WorkloadSpec {
///     process_count: 3,
///     request_count: 10,
///     seed: 7,
///     ..WorkloadSpec::default()
/// };
/// let processes = spec.generate().unwrap();
///
/// assert_eq!(processes.len(), 3);
/// assert_eq!(processes.iter().map(|p| p.pending()).sum::<usize>(), 10);
/// assert_eq!(processes, spec.generate().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub process_count: u32,
    pub request_count: usize,
    pub track_range: TrackId,
    pub kinds: Vec<RequestKind>,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            process_count: 7,
            request_count: 100,
            track_range: 512,
            kinds: RequestKind::ALL.to_vec(),
            seed: 42,
        }
    }
}

impl WorkloadSpec {
    /// Default generator shape with tracks spanning the configured disk.
    pub fn for_config(config: &SimConfig, seed: u64) -> Self {
        Self {
            track_range: config.number_of_tracks(),
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.process_count == 0 {
            return Err(ConfigError::field("process_count", "must be > 0"));
        }
        if self.track_range == 0 {
            return Err(ConfigError::field("track_range", "must be > 0"));
        }
        if self.kinds.is_empty() {
            return Err(ConfigError::field("kinds", "at least one request kind is required"));
        }
        Ok(())
    }

    /// Builds the processes, one per id in `1..=process_count`.
    pub fn generate(&self) -> Result<Vec<Process>, ConfigError> {
        self.validate()?;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut processes: Vec<Process> = (1..=self.process_count).map(Process::new).collect();

        for i in 0..self.request_count {
            let slot = i % processes.len();
            let track = rng.gen_range(0..self.track_range);
            let kind = self.kinds[rng.gen_range(0..self.kinds.len())];
            processes[slot].push_request(Request::new(track, kind));
        }

        Ok(processes)
    }
}

/// The fixed four-process workload.
///
/// ```text
///   P1: R95  W164 W11  R95  R199
///   P2: W130 R119 R62  W75  W30
///   P3: R75  W199 W30
///   P4: R11  W130 W30
/// ```
pub fn literal_workload() -> Vec<Process> {
    use RequestKind::{Read as R, Write as W};

    let table: [(ProcessId, &[(TrackId, RequestKind)]); 4] = [
        (1, &[(95, R), (164, W), (11, W), (95, R), (199, R)]),
        (2, &[(130, W), (119, R), (62, R), (75, W), (30, W)]),
        (3, &[(75, R), (199, W), (30, W)]),
        (4, &[(11, R), (130, W), (30, W)]),
    ];

    table
        .iter()
        .map(|(id, requests)| {
            Process::with_requests(
                *id,
                requests
                    .iter()
                    .map(|&(track, kind)| Request::new(track, kind)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_workload_shape() {
        let processes = literal_workload();
        let ids: Vec<_> = processes.iter().map(Process::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let lens: Vec<_> = processes.iter().map(Process::pending).collect();
        assert_eq!(lens, vec![5, 5, 3, 3]);

        let first: Vec<_> = processes[0].requests().copied().collect();
        assert_eq!(first[1], Request::write(164));
        assert_eq!(first[4], Request::read(199));
    }

    #[test]
    fn requests_are_dealt_round_robin() {
        let spec = WorkloadSpec {
            process_count: 4,
            request_count: 10,
            ..WorkloadSpec::default()
        };
        let lens: Vec<_> = spec
            .generate()
            .unwrap()
            .iter()
            .map(Process::pending)
            .collect();
        assert_eq!(lens, vec![3, 3, 2, 2]);
    }

    #[test]
    fn tracks_stay_in_range_and_kinds_respected() {
        let spec = WorkloadSpec {
            track_range: 8,
            kinds: vec![RequestKind::Write],
            request_count: 200,
            ..WorkloadSpec::default()
        };
        for process in spec.generate().unwrap() {
            for r in process.requests() {
                assert!(r.track() < 8);
                assert_eq!(r.kind(), RequestKind::Write);
            }
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = WorkloadSpec { seed: 1, ..WorkloadSpec::default() };
        let b = WorkloadSpec { seed: 2, ..WorkloadSpec::default() };
        assert_ne!(a.generate().unwrap(), b.generate().unwrap());
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let zero_procs = WorkloadSpec {
            process_count: 0,
            ..WorkloadSpec::default()
        };
        assert!(zero_procs.generate().is_err());

        let no_kinds = WorkloadSpec {
            kinds: Vec::new(),
            ..WorkloadSpec::default()
        };
        assert!(no_kinds.generate().is_err());
    }

    #[test]
    fn for_config_spans_disk() {
        let config = SimConfig::builder().number_of_tracks(64).try_build().unwrap();
        let spec = WorkloadSpec::for_config(&config, 9);
        assert_eq!(spec.track_range, 64);
        assert_eq!(spec.seed, 9);
    }
}
