//! Run results and the plotting hand-off.
//!
//! A [`SimulationReport`] is what [`SimulationDriver::run`] returns. The
//! [`TimingSeries`] slice of it (scheduler name plus the ordered per-request
//! head costs) is what an external plotting tool consumes, serialized as
//! JSON.
//!
//! [`SimulationDriver::run`]: crate::driver::SimulationDriver::run

use serde::Serialize;

use crate::policy::segmented_lfu::{Segment, SegmentedCache};
use crate::request::TrackId;

/// Cache contents at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheResidency {
    pub left: Vec<TrackId>,
    pub middle: Vec<TrackId>,
    pub right: Vec<TrackId>,
    pub evictions: usize,
}

impl CacheResidency {
    pub(crate) fn capture(cache: &SegmentedCache, evictions: usize) -> Self {
        Self {
            left: cache.ids(Segment::Left).collect(),
            middle: cache.ids(Segment::Middle).collect(),
            right: cache.ids(Segment::Right).collect(),
            evictions,
        }
    }

    pub fn resident(&self) -> usize {
        self.left.len() + self.middle.len() + self.right.len()
    }
}

/// Aggregate timing of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Scheduler name (`FIFO`, `LOOK` or `FLOOK`).
    pub scheduler: String,
    /// `issue_time + schedule_time`.
    pub total_simulation_time: f64,
    /// Sum of per-request access plus processing cost.
    pub issue_time: f64,
    /// Head movement time accumulated by the scheduler.
    pub schedule_time: f64,
    /// Head movement cost per serviced request, in service order.
    pub request_times: Vec<f64>,
    pub rounds: usize,
    pub requests_issued: usize,
    pub quantum_overruns: usize,
    pub final_head: TrackId,
    pub cache: CacheResidency,
}

impl SimulationReport {
    /// The series a plotting collaborator renders.
    pub fn timing_series(&self) -> TimingSeries {
        TimingSeries {
            scheduler: self.scheduler.clone(),
            request_times: self.request_times.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Ordered per-request head costs for one scheduler.
///
/// ```
/// use disksim::report::TimingSeries;
///
/// let series = TimingSeries {
///     scheduler: "LOOK".to_string(),
///     request_times: vec![14.0, 34.0, 19.0],
/// };
/// assert_eq!(series.total(), 67.0);
/// assert_eq!(series.max(), Some(34.0));
/// assert!(series.to_json_pretty().unwrap().contains("\"LOOK\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingSeries {
    pub scheduler: String,
    pub request_times: Vec<f64>,
}

impl TimingSeries {
    pub fn total(&self) -> f64 {
        self.request_times.iter().sum()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.request_times.is_empty() {
            None
        } else {
            Some(self.total() / self.request_times.len() as f64)
        }
    }

    pub fn max(&self) -> Option<f64> {
        self.request_times.iter().copied().reduce(f64::max)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentSizes;

    fn sample_report() -> SimulationReport {
        let mut cache = SegmentedCache::new(SegmentSizes::new(1, 1, 1));
        for t in [1, 2, 3] {
            cache.touch(t);
        }
        SimulationReport {
            scheduler: "FIFO".to_string(),
            total_simulation_time: 50.0,
            issue_time: 27.0,
            schedule_time: 23.0,
            request_times: vec![9.0, 14.0],
            rounds: 1,
            requests_issued: 2,
            quantum_overruns: 0,
            final_head: 40,
            cache: CacheResidency::capture(&cache, 0),
        }
    }

    #[test]
    fn residency_mirrors_segments() {
        let report = sample_report();
        assert_eq!(report.cache.left, vec![3]);
        assert_eq!(report.cache.middle, vec![2]);
        assert_eq!(report.cache.right, vec![1]);
        assert_eq!(report.cache.resident(), 3);
    }

    #[test]
    fn json_contains_series_fields() {
        let json = sample_report().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["scheduler"], "FIFO");
        assert_eq!(value["request_times"][1], 14.0);
        assert_eq!(value["cache"]["right"][0], 1);
    }

    #[test]
    fn empty_series_has_no_mean() {
        let series = TimingSeries {
            scheduler: "FLOOK".to_string(),
            request_times: Vec::new(),
        };
        assert_eq!(series.mean(), None);
        assert_eq!(series.max(), None);
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn series_is_taken_from_report() {
        let series = sample_report().timing_series();
        assert_eq!(series.scheduler, "FIFO");
        assert_eq!(series.mean(), Some(11.5));
    }
}
