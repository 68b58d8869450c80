//! Head cost model shared by every scheduler.
//!
//! ```text
//!   distance = |target − head|
//!   cost     = time_to_boundary_track        if target ∈ {0, number_of_tracks}
//!            = distance · time_per_track     otherwise
//!   cost    += avg_rotation_delay
//! ```
//!
//! [`DiskHead::service`] is the only place the head moves. It appends the
//! cost to the per-request series, adds it to the schedule total and leaves
//! the head on the target track, so the order in which a scheduler calls it
//! determines the total.

use crate::config::DiskTiming;
use crate::events::{EventSink, SimEvent};
use crate::request::{Request, TrackId};

/// Simulated read/write head with its accumulated timing.
///
/// # Example
///
/// ```
/// use disksim::config::SimConfig;
/// use disksim::events::NullSink;
/// use disksim::request::Request;
/// use disksim::scheduler::head::DiskHead;
///
/// let mut head = DiskHead::new(50, SimConfig::default().disk_timing());
/// let cost = head.service(&Request::read(70), &mut NullSink);
///
/// assert_eq!(cost, 20.0 * 0.5 + 4.0);
/// assert_eq!(head.position(), 70);
/// assert_eq!(head.request_times(), &[14.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DiskHead {
    position: TrackId,
    timing: DiskTiming,
    schedule_time: f64,
    request_times: Vec<f64>,
}

impl DiskHead {
    pub fn new(position: TrackId, timing: DiskTiming) -> Self {
        Self {
            position,
            timing,
            schedule_time: 0.0,
            request_times: Vec::new(),
        }
    }

    /// Cost of moving from the current position to `track`, without moving.
    pub fn seek_cost(&self, track: TrackId) -> f64 {
        let seek = if self.timing.is_boundary(track) {
            self.timing.time_to_boundary_track
        } else {
            f64::from(track.abs_diff(self.position)) * self.timing.time_per_track
        };
        seek + self.timing.avg_rotation_delay
    }

    /// Moves the head to the request's track and charges the move.
    pub fn service(&mut self, request: &Request, sink: &mut dyn EventSink) -> f64 {
        let track = request.track();
        let cost = self.seek_cost(track);

        self.request_times.push(cost);
        self.schedule_time += cost;
        self.position = track;

        sink.record(&SimEvent::HeadMoved { track, cost });
        cost
    }

    #[inline]
    pub fn position(&self) -> TrackId {
        self.position
    }

    #[inline]
    pub fn timing(&self) -> &DiskTiming {
        &self.timing
    }

    /// Sum of every move cost so far.
    #[inline]
    pub fn schedule_time(&self) -> f64 {
        self.schedule_time
    }

    /// Individual move costs in service order.
    #[inline]
    pub fn request_times(&self) -> &[f64] {
        &self.request_times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::events::NullSink;

    fn head_at(track: TrackId) -> DiskHead {
        DiskHead::new(track, SimConfig::default().disk_timing())
    }

    #[test]
    fn interior_cost_is_linear_in_distance() {
        let head = head_at(100);
        assert_eq!(head.seek_cost(100), 4.0);
        assert_eq!(head.seek_cost(110), 9.0);
        assert_eq!(head.seek_cost(90), 9.0);
    }

    #[test]
    fn boundary_cost_ignores_head_position() {
        for start in [0, 1, 50, 256, 511, 512] {
            let head = head_at(start);
            assert_eq!(head.seek_cost(0), 14.0, "from {start} to 0");
            assert_eq!(head.seek_cost(512), 14.0, "from {start} to 512");
        }
    }

    #[test]
    fn service_accumulates_and_moves() {
        let mut head = head_at(50);
        let mut events: Vec<SimEvent> = Vec::new();
        head.service(&Request::read(70), &mut events);
        head.service(&Request::write(10), &mut events);

        assert_eq!(head.position(), 10);
        assert_eq!(head.request_times(), &[14.0, 34.0]);
        assert_eq!(head.schedule_time(), 48.0);
        assert_eq!(
            events,
            vec![
                SimEvent::HeadMoved {
                    track: 70,
                    cost: 14.0
                },
                SimEvent::HeadMoved {
                    track: 10,
                    cost: 34.0
                },
            ]
        );
    }

    #[test]
    fn same_track_costs_only_rotation() {
        let mut head = head_at(42);
        assert_eq!(head.service(&Request::read(42), &mut NullSink), 4.0);
    }
}
