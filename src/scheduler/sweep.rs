//! Directional sweep ("LOOK") scheduling.
//!
//! Pending requests are split around the current head position and serviced
//! one side at a time.
//!
//! ## Service order
//!
//! ```text
//!   head = 50, pending = [10, 70, 40]
//!
//!   outward (track ≥ head), ascending  : [70]
//!   inward  (track < head), descending : [40, 10]
//!
//!   Ascending, reverse_on_turn = true  : 70 → 10 → 40   (inward reversed)
//!   Ascending, reverse_on_turn = false : 70 → 40 → 10   (textbook LOOK)
//!
//!   Descending mirrors it: inward (descending) first, then outward,
//!   reversed to descending when reverse_on_turn is set.
//! ```
//!
//! With `reverse_on_turn` the head makes one long seek to the far extreme of
//! the second batch after turning around, instead of continuing from the
//! nearest pending track. The flag defaults to `true`.
//!
//! Ordering is computed on an owned snapshot of the pending set
//! ([`sweep_order`]); the scheduler then services that list, so nothing is
//! removed from a collection while it is being walked.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DiskTiming;
use crate::error::ConfigError;
use crate::events::{EventSink, SimEvent};
use crate::request::{Request, TrackId};
use crate::scheduler::head::DiskHead;
use crate::traits::DiskScheduler;

/// Which side of the head a sweep services first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SweepDirection {
    /// Tracks at or above the head first.
    #[default]
    Ascending,
    /// Tracks below the head first.
    Descending,
}

impl fmt::Display for SweepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepDirection::Ascending => f.write_str("ASC"),
            SweepDirection::Descending => f.write_str("DESC"),
        }
    }
}

impl FromStr for SweepDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(SweepDirection::Ascending),
            "DESC" | "DESCENDING" => Ok(SweepDirection::Descending),
            other => Err(ConfigError::new(format!(
                "invalid sweep direction {other:?}, expected ASC or DESC"
            ))),
        }
    }
}

/// Computes the order in which a sweep services `pending` from `head`.
///
/// Pure: the input is left untouched and the result is a permutation of it.
///
/// # Example
///
/// ```
/// use disksim::request::Request;
/// use disksim::scheduler::sweep::{sweep_order, SweepDirection};
///
/// let pending = [Request::read(10), Request::read(70), Request::read(40)];
/// let order: Vec<u32> = sweep_order(&pending, 50, SweepDirection::Ascending, true)
///     .iter()
///     .map(|r| r.track())
///     .collect();
/// assert_eq!(order, vec![70, 10, 40]);
/// ```
pub fn sweep_order(
    pending: &[Request],
    head: TrackId,
    direction: SweepDirection,
    reverse_on_turn: bool,
) -> Vec<Request> {
    let (mut outward, mut inward): (Vec<Request>, Vec<Request>) =
        pending.iter().copied().partition(|r| r.track() >= head);

    outward.sort_by_key(|r| r.track());
    inward.sort_by_key(|r| Reverse(r.track()));

    match direction {
        SweepDirection::Ascending => {
            if reverse_on_turn {
                inward.reverse();
            }
            outward.extend(inward);
            outward
        },
        SweepDirection::Descending => {
            if reverse_on_turn {
                outward.reverse();
            }
            inward.extend(outward);
            inward
        },
    }
}

/// Services `batch` in sweep order through `head`.
pub(crate) fn service_sweep(
    head: &mut DiskHead,
    batch: &[Request],
    direction: SweepDirection,
    reverse_on_turn: bool,
    sink: &mut dyn EventSink,
) {
    for request in sweep_order(batch, head.position(), direction, reverse_on_turn) {
        head.service(&request, sink);
    }
}

/// LOOK scheduler over an unordered pending set.
///
/// # Example
///
/// ```
/// use disksim::config::SimConfig;
/// use disksim::events::NullSink;
/// use disksim::request::Request;
/// use disksim::scheduler::sweep::{SweepDirection, SweepScheduler};
/// use disksim::traits::DiskScheduler;
///
/// let timing = SimConfig::default().disk_timing();
/// let mut look = SweepScheduler::new(50, timing, SweepDirection::Ascending);
/// for track in [10, 70, 40] {
///     look.add_request(Request::read(track));
/// }
/// look.process_requests(&mut NullSink);
///
/// assert_eq!(look.request_times(), &[14.0, 34.0, 19.0]);
/// assert_eq!(look.schedule_time(), 67.0);
/// ```
#[derive(Debug, Clone)]
pub struct SweepScheduler {
    head: DiskHead,
    direction: SweepDirection,
    reverse_on_turn: bool,
    pending: Vec<Request>,
}

impl SweepScheduler {
    /// Creates a LOOK scheduler that reverses the second batch on a turn.
    pub fn new(head: TrackId, timing: DiskTiming, direction: SweepDirection) -> Self {
        Self::with_reverse_on_turn(head, timing, direction, true)
    }

    pub fn with_reverse_on_turn(
        head: TrackId,
        timing: DiskTiming,
        direction: SweepDirection,
        reverse_on_turn: bool,
    ) -> Self {
        Self {
            head: DiskHead::new(head, timing),
            direction,
            reverse_on_turn,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    #[inline]
    pub fn reverse_on_turn(&self) -> bool {
        self.reverse_on_turn
    }
}

impl DiskScheduler for SweepScheduler {
    fn name(&self) -> &'static str {
        "LOOK"
    }

    fn add_request(&mut self, request: Request) {
        self.pending.push(request);
    }

    fn process_requests(&mut self, sink: &mut dyn EventSink) {
        sink.record(&SimEvent::InitialHead {
            track: self.head.position(),
        });

        let batch = std::mem::take(&mut self.pending);
        service_sweep(
            &mut self.head,
            &batch,
            self.direction,
            self.reverse_on_turn,
            sink,
        );

        sink.record(&SimEvent::ScheduleCompleted {
            total: self.head.schedule_time(),
        });
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn head(&self) -> &DiskHead {
        &self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::events::NullSink;

    fn tracks(order: &[Request]) -> Vec<TrackId> {
        order.iter().map(|r| r.track()).collect()
    }

    fn reads(tracks: &[TrackId]) -> Vec<Request> {
        tracks.iter().map(|&t| Request::read(t)).collect()
    }

    mod ordering {
        use super::*;

        #[test]
        fn ascending_reversed_services_inward_from_smallest() {
            let pending = reads(&[10, 70, 40, 90, 5]);
            let order = sweep_order(&pending, 50, SweepDirection::Ascending, true);
            assert_eq!(tracks(&order), vec![70, 90, 5, 10, 40]);
        }

        #[test]
        fn ascending_textbook_continues_from_nearest() {
            let pending = reads(&[10, 70, 40, 90, 5]);
            let order = sweep_order(&pending, 50, SweepDirection::Ascending, false);
            assert_eq!(tracks(&order), vec![70, 90, 40, 10, 5]);
        }

        #[test]
        fn descending_reversed_services_outward_from_largest() {
            let pending = reads(&[10, 70, 40, 90, 5]);
            let order = sweep_order(&pending, 50, SweepDirection::Descending, true);
            assert_eq!(tracks(&order), vec![40, 10, 5, 90, 70]);
        }

        #[test]
        fn descending_textbook_continues_from_nearest() {
            let pending = reads(&[10, 70, 40, 90, 5]);
            let order = sweep_order(&pending, 50, SweepDirection::Descending, false);
            assert_eq!(tracks(&order), vec![40, 10, 5, 70, 90]);
        }

        #[test]
        fn request_at_head_counts_as_outward() {
            let pending = reads(&[50, 49]);
            let asc = sweep_order(&pending, 50, SweepDirection::Ascending, true);
            assert_eq!(tracks(&asc), vec![50, 49]);
            let desc = sweep_order(&pending, 50, SweepDirection::Descending, true);
            assert_eq!(tracks(&desc), vec![49, 50]);
        }

        #[test]
        fn order_is_a_permutation() {
            let pending = reads(&[3, 3, 200, 0, 512, 77, 3]);
            let mut order = tracks(&sweep_order(&pending, 77, SweepDirection::Ascending, true));
            let mut expected = tracks(&pending);
            order.sort_unstable();
            expected.sort_unstable();
            assert_eq!(order, expected);
        }
    }

    mod scheduling {
        use super::*;

        #[test]
        fn ascending_scenario_totals_67() {
            let timing = SimConfig::builder()
                .time_per_track(0.5)
                .rpm(7500)
                .try_build()
                .unwrap()
                .disk_timing();
            let mut s = SweepScheduler::new(50, timing, SweepDirection::Ascending);
            for r in reads(&[10, 70, 40]) {
                s.add_request(r);
            }
            s.process_requests(&mut NullSink);

            assert_eq!(s.request_times(), &[14.0, 34.0, 19.0]);
            assert_eq!(s.schedule_time(), 67.0);
            assert_eq!(s.head_position(), 40);
            assert_eq!(s.pending(), 0);
        }

        #[test]
        fn events_bracket_the_sweep() {
            let mut s = SweepScheduler::new(
                50,
                SimConfig::default().disk_timing(),
                SweepDirection::Descending,
            );
            s.add_request(Request::write(60));
            let mut events: Vec<SimEvent> = Vec::new();
            s.process_requests(&mut events);

            assert_eq!(events.first(), Some(&SimEvent::InitialHead { track: 50 }));
            assert_eq!(
                events.last(),
                Some(&SimEvent::ScheduleCompleted { total: 9.0 })
            );
        }
    }

    mod direction_parsing {
        use super::*;

        #[test]
        fn accepts_short_and_long_forms() {
            assert_eq!("asc".parse::<SweepDirection>(), Ok(SweepDirection::Ascending));
            assert_eq!(
                "DESCENDING".parse::<SweepDirection>(),
                Ok(SweepDirection::Descending)
            );
        }

        #[test]
        fn rejects_unknown() {
            let err = "UP".parse::<SweepDirection>().unwrap_err();
            assert!(err.message().contains("UP"));
        }
    }
}
