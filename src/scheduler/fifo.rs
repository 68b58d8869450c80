//! First-in, first-out disk scheduling.
//!
//! Requests are serviced strictly in arrival order. No reordering and no
//! notion of sweep direction; the head simply chases each request in turn.

use std::collections::VecDeque;

use crate::config::DiskTiming;
use crate::events::{EventSink, SimEvent};
use crate::request::{Request, TrackId};
use crate::scheduler::head::DiskHead;
use crate::traits::DiskScheduler;

/// Arrival-order scheduler.
///
/// # Example
///
/// ```
/// use disksim::config::SimConfig;
/// use disksim::events::NullSink;
/// use disksim::request::Request;
/// use disksim::scheduler::fifo::FifoScheduler;
/// use disksim::traits::DiskScheduler;
///
/// let mut fifo = FifoScheduler::new(50, SimConfig::default().disk_timing());
/// fifo.add_request(Request::read(10));
/// fifo.add_request(Request::read(70));
/// fifo.process_requests(&mut NullSink);
///
/// // 50 → 10 → 70
/// assert_eq!(fifo.request_times(), &[24.0, 34.0]);
/// assert_eq!(fifo.head_position(), 70);
/// ```
#[derive(Debug, Clone)]
pub struct FifoScheduler {
    head: DiskHead,
    queue: VecDeque<Request>,
}

impl FifoScheduler {
    pub fn new(head: TrackId, timing: DiskTiming) -> Self {
        Self {
            head: DiskHead::new(head, timing),
            queue: VecDeque::new(),
        }
    }
}

impl DiskScheduler for FifoScheduler {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn add_request(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    fn process_requests(&mut self, sink: &mut dyn EventSink) {
        sink.record(&SimEvent::InitialHead {
            track: self.head.position(),
        });

        while let Some(request) = self.queue.pop_front() {
            self.head.service(&request, sink);
        }

        sink.record(&SimEvent::ScheduleCompleted {
            total: self.head.schedule_time(),
        });
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn head(&self) -> &DiskHead {
        &self.head
    }
}
