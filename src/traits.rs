//! # Scheduler Capability Trait
//!
//! Every scheduling policy exposes the same four operations; only the shape
//! of the pending collection and the order it drains in differ.
//!
//! ```text
//!                    ┌────────────────────────────────────────┐
//!                    │            DiskScheduler               │
//!                    │                                        │
//!                    │  add_request(&mut, Request)            │
//!                    │  process_requests(&mut, &mut dyn Sink) │
//!                    │  schedule_time(&) → f64      (default) │
//!                    │  request_times(&) → &[f64]   (default) │
//!                    └───────────────────┬────────────────────┘
//!                                        │ head()
//!           ┌────────────────────────────┼────────────────────────────┐
//!           ▼                            ▼                            ▼
//!   ┌───────────────┐          ┌──────────────────┐         ┌──────────────────────┐
//!   │ FifoScheduler │          │  SweepScheduler  │         │ SplitSweepScheduler  │
//!   │ VecDeque      │          │  Vec (unordered) │         │ active + waiting Vec │
//!   └───────┬───────┘          └────────┬─────────┘         └──────────┬───────────┘
//!           └───────────────────────────┼──────────────────────────────┘
//!                                       ▼
//!                              ┌──────────────────┐
//!                              │     DiskHead     │  one service() call per
//!                              │  (cost model)    │  request, in service order
//!                              └──────────────────┘
//! ```
//!
//! The timing accessors are default methods over [`DiskScheduler::head`],
//! so an implementation only supplies its pending collection and ordering.

use crate::events::EventSink;
use crate::request::{Request, TrackId};
use crate::scheduler::head::DiskHead;

/// A disk scheduling policy.
pub trait DiskScheduler {
    /// Short policy name used in reports (`"FIFO"`, `"LOOK"`, `"FLOOK"`).
    fn name(&self) -> &'static str;

    /// Queues a request for later servicing.
    fn add_request(&mut self, request: Request);

    /// Services every pending request through the head cost model.
    ///
    /// Returns with no requests pending.
    fn process_requests(&mut self, sink: &mut dyn EventSink);

    /// Number of requests waiting to be serviced.
    fn pending(&self) -> usize;

    /// The head this scheduler drives.
    fn head(&self) -> &DiskHead;

    /// Total time charged for every request serviced so far.
    fn schedule_time(&self) -> f64 {
        self.head().schedule_time()
    }

    /// Per-request move costs, in service order.
    fn request_times(&self) -> &[f64] {
        self.head().request_times()
    }

    /// Current head track.
    fn head_position(&self) -> TrackId {
        self.head().position()
    }
}

impl<S: DiskScheduler + ?Sized> DiskScheduler for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn add_request(&mut self, request: Request) {
        (**self).add_request(request)
    }

    fn process_requests(&mut self, sink: &mut dyn EventSink) {
        (**self).process_requests(sink)
    }

    fn pending(&self) -> usize {
        (**self).pending()
    }

    fn head(&self) -> &DiskHead {
        (**self).head()
    }
}
