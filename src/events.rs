//! Observable simulation events.
//!
//! The core never formats or prints. Schedulers, the cache-facing side of
//! the driver, and the quantum loop push [`SimEvent`] values into a
//! `&mut dyn EventSink`; what happens to them is up to the sink.
//!
//! ## Sinks
//!
//! | Sink              | Behaviour                                              |
//! |-------------------|--------------------------------------------------------|
//! | [`NullSink`]      | Discards everything                                    |
//! | `Vec<SimEvent>`   | Appends in emission order                              |
//! | [`SharedRecorder`]| Cloneable handle, events readable after the run        |
//! | [`LogSink`]       | Forwards to the `log` facade under target `disksim`    |
//! | [`Tee`]           | Duplicates into two sinks                              |
//! | `SimMetrics`      | Counters (feature `metrics`)                           |
//!
//! ## Example
//!
//! ```
//! use disksim::events::{EventSink, SharedRecorder, SimEvent};
//!
//! let recorder = SharedRecorder::new();
//! let mut sink = recorder.clone();
//! sink.record(&SimEvent::BufferAdded { id: 7 });
//!
//! assert_eq!(recorder.events(), vec![SimEvent::BufferAdded { id: 7 }]);
//! ```

use std::sync::Arc;

use log::{debug, info, trace};
use parking_lot::Mutex;
use serde::Serialize;

use crate::request::{ProcessId, RequestKind, TrackId};

/// One thing that happened during a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    /// A scheduler started draining its pending requests.
    InitialHead { track: TrackId },
    /// The head moved to `track`; `cost` is the time charged for the move.
    HeadMoved { track: TrackId, cost: f64 },
    /// The driver issued a request on behalf of a process.
    RequestServiced {
        process_id: ProcessId,
        track: TrackId,
        kind: RequestKind,
        total_cost: f64,
    },
    /// A track was inserted into the cache for the first time.
    BufferAdded { id: TrackId },
    /// A Left-resident buffer moved back to the front of Left.
    BufferRefreshed { id: TrackId },
    /// A Middle- or Right-resident buffer was promoted back into Left.
    BufferPromoted { id: TrackId, new_frequency: u32 },
    /// A buffer left the cache from the Right segment.
    BufferEvicted { id: TrackId, frequency: u32 },
    /// A process used up its quantum for this round.
    QuantumExceeded { process_id: ProcessId, elapsed: f64 },
    /// The split-sweep scheduler's queues after the initial split.
    SplitQueues { active: usize, waiting: usize },
    /// A scheduler drained all pending requests.
    ScheduleCompleted { total: f64 },
    /// The driver finished a run.
    SimulationCompleted { total: f64 },
}

/// Consumer of [`SimEvent`]s.
pub trait EventSink {
    fn record(&mut self, event: &SimEvent);
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    #[inline]
    fn record(&mut self, _event: &SimEvent) {}
}

impl EventSink for Vec<SimEvent> {
    fn record(&mut self, event: &SimEvent) {
        self.push(event.clone());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: &SimEvent) {
        (**self).record(event);
    }
}

/// Cloneable recording sink.
///
/// Every clone appends to the same buffer, so a caller can hand one clone to
/// the driver and read the events back from another after the run.
#[derive(Debug, Default, Clone)]
pub struct SharedRecorder {
    events: Arc<Mutex<Vec<SimEvent>>>,
}

impl SharedRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies out every event recorded so far.
    pub fn events(&self) -> Vec<SimEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns every event recorded so far.
    pub fn drain(&self) -> Vec<SimEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for SharedRecorder {
    fn record(&mut self, event: &SimEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Sends every event to two sinks, `.0` first.
///
/// ```
/// use disksim::events::{EventSink, SimEvent, Tee};
///
/// let mut tee: Tee<Vec<SimEvent>, Vec<SimEvent>> = Tee(Vec::new(), Vec::new());
/// tee.record(&SimEvent::BufferAdded { id: 1 });
/// assert_eq!(tee.0, tee.1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn record(&mut self, event: &SimEvent) {
        self.0.record(event);
        self.1.record(event);
    }
}

/// Forwards events to the `log` facade.
///
/// Head and cache movement go to `trace`, per-request and quantum events to
/// `debug`, completion totals to `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::InitialHead { track } => {
                debug!(target: "disksim", "scheduler start: head at track {track}")
            },
            SimEvent::HeadMoved { track, cost } => {
                trace!(target: "disksim", "head -> track {track} ({cost:.2} ms)")
            },
            SimEvent::RequestServiced {
                process_id,
                track,
                kind,
                total_cost,
            } => debug!(
                target: "disksim",
                "process {process_id}: {kind} track {track} ({total_cost:.3} ms)"
            ),
            SimEvent::BufferAdded { id } => trace!(target: "disksim", "cache: buffer {id} added"),
            SimEvent::BufferRefreshed { id } => {
                trace!(target: "disksim", "cache: buffer {id} refreshed")
            },
            SimEvent::BufferPromoted { id, new_frequency } => trace!(
                target: "disksim",
                "cache: buffer {id} promoted (frequency {new_frequency})"
            ),
            SimEvent::BufferEvicted { id, frequency } => debug!(
                target: "disksim",
                "cache: buffer {id} evicted (frequency {frequency})"
            ),
            SimEvent::QuantumExceeded {
                process_id,
                elapsed,
            } => debug!(
                target: "disksim",
                "process {process_id}: quantum exceeded after {elapsed:.3} ms"
            ),
            SimEvent::SplitQueues { active, waiting } => debug!(
                target: "disksim",
                "split sweep queues: {active} active, {waiting} waiting"
            ),
            SimEvent::ScheduleCompleted { total } => {
                info!(target: "disksim", "total scheduling time {total:.3} ms")
            },
            SimEvent::SimulationCompleted { total } => {
                info!(target: "disksim", "total simulation time {total:.3} ms")
            },
        }
    }
}
