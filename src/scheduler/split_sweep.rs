//! Split sweep ("FLOOK") scheduling.
//!
//! Two pending collections: **active** and **waiting**. New requests always
//! land in waiting. Draining works in batches:
//!
//! ```text
//!   process_requests():
//!     seed: first ⌊|waiting| / 2⌋ waiting requests (arrival order) → active
//!     loop while active or waiting is non-empty:
//!       if active is empty: active ← waiting, waiting ← ∅
//!       sweep active (LOOK order from the current head), emptying it
//! ```
//!
//! Each batch is swept on its own, so requests that were waiting never jump
//! into a sweep that is already under way.

use crate::config::DiskTiming;
use crate::events::{EventSink, SimEvent};
use crate::request::{Request, TrackId};
use crate::scheduler::head::DiskHead;
use crate::scheduler::sweep::{service_sweep, SweepDirection};
use crate::traits::DiskScheduler;

/// FLOOK scheduler with an active and a waiting batch.
///
/// # Example
///
/// ```
/// use disksim::config::SimConfig;
/// use disksim::events::NullSink;
/// use disksim::request::Request;
/// use disksim::scheduler::split_sweep::SplitSweepScheduler;
/// use disksim::scheduler::sweep::SweepDirection;
/// use disksim::traits::DiskScheduler;
///
/// let timing = SimConfig::default().disk_timing();
/// let mut flook = SplitSweepScheduler::new(50, timing, SweepDirection::Ascending);
/// for track in [60, 40, 80, 20] {
///     flook.add_request(Request::read(track));
/// }
/// assert_eq!(flook.waiting_len(), 4);
///
/// flook.process_requests(&mut NullSink);
/// assert_eq!(flook.pending(), 0);
/// assert_eq!(flook.request_times().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct SplitSweepScheduler {
    head: DiskHead,
    direction: SweepDirection,
    reverse_on_turn: bool,
    active: Vec<Request>,
    waiting: Vec<Request>,
}

impl SplitSweepScheduler {
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
            active: Vec::new(),
            waiting: Vec::new(),
        }
    }

    #[inline]
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn waiting_len(&self) -> usize {
        self.waiting.len()
    }

    /// Moves the older half of waiting into active.
    fn split_waiting(&mut self) {
        let half = self.waiting.len() / 2;
        self.active.extend(self.waiting.drain(..half));
    }
}

impl DiskScheduler for SplitSweepScheduler {
    fn name(&self) -> &'static str {
        "FLOOK"
    }

    fn add_request(&mut self, request: Request) {
        self.waiting.push(request);
    }

    fn process_requests(&mut self, sink: &mut dyn EventSink) {
        sink.record(&SimEvent::InitialHead {
            track: self.head.position(),
        });

        self.split_waiting();
        sink.record(&SimEvent::SplitQueues {
            active: self.active.len(),
            waiting: self.waiting.len(),
        });

        while !self.active.is_empty() || !self.waiting.is_empty() {
            if self.active.is_empty() {
                self.active = std::mem::take(&mut self.waiting);
            }

            let batch = std::mem::take(&mut self.active);
            service_sweep(
                &mut self.head,
                &batch,
                self.direction,
                self.reverse_on_turn,
                sink,
            );
        }

        sink.record(&SimEvent::ScheduleCompleted {
            total: self.head.schedule_time(),
        });
    }

    fn pending(&self) -> usize {
        self.active.len() + self.waiting.len()
    }

    fn head(&self) -> &DiskHead {
        &self.head
    }
}
