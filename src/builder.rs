//! Unified scheduler builder.
//!
//! Turns a [`SchedulerKind`] selection into a ready [`Scheduler`], hiding
//! which concrete policy sits behind it. Selection strings come from the
//! console front end, so parsing lives here too: an unknown name or
//! direction is a [`ConfigError`] raised before any scheduler exists.
//!
//! ## Example
//!
//! ```rust
//! use disksim::builder::{SchedulerBuilder, SchedulerKind};
//! use disksim::config::SimConfig;
//! use disksim::events::NullSink;
//! use disksim::request::Request;
//! use disksim::traits::DiskScheduler;
//!
//! let kind = SchedulerKind::from_selection("FLOOK", Some("DESC")).unwrap();
//! let mut scheduler = SchedulerBuilder::from_config(&SimConfig::default()).build(kind);
//!
//! scheduler.add_request(Request::read(30));
//! scheduler.process_requests(&mut NullSink);
//! assert_eq!(scheduler.name(), "FLOOK");
//! assert_eq!(scheduler.head_position(), 30);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::config::{DiskTiming, SimConfig};
use crate::error::ConfigError;
use crate::events::EventSink;
use crate::request::{Request, TrackId};
use crate::scheduler::fifo::FifoScheduler;
use crate::scheduler::head::DiskHead;
use crate::scheduler::split_sweep::SplitSweepScheduler;
use crate::scheduler::sweep::{SweepDirection, SweepScheduler};
use crate::traits::DiskScheduler;

/// Available scheduling policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerKind {
    /// Arrival order.
    Fifo,
    /// Directional sweep (LOOK).
    Sweep { direction: SweepDirection },
    /// Split active/waiting sweep (FLOOK).
    SplitSweep { direction: SweepDirection },
}

impl SchedulerKind {
    /// Parses a scheduler name plus an optional direction.
    ///
    /// The direction is required to be valid when given, and ignored for
    /// FIFO. Sweeps default to ascending.
    pub fn from_selection(name: &str, direction: Option<&str>) -> Result<Self, ConfigError> {
        let kind: SchedulerKind = name.parse()?;
        match direction {
            Some(d) => Ok(kind.with_direction(d.parse()?)),
            None => Ok(kind),
        }
    }

    /// Replaces the sweep direction; FIFO is returned unchanged.
    pub fn with_direction(self, direction: SweepDirection) -> Self {
        match self {
            SchedulerKind::Fifo => SchedulerKind::Fifo,
            SchedulerKind::Sweep { .. } => SchedulerKind::Sweep { direction },
            SchedulerKind::SplitSweep { .. } => SchedulerKind::SplitSweep { direction },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchedulerKind::Fifo => "FIFO",
            SchedulerKind::Sweep { .. } => "LOOK",
            SchedulerKind::SplitSweep { .. } => "FLOOK",
        }
    }

    pub fn direction(&self) -> Option<SweepDirection> {
        match self {
            SchedulerKind::Fifo => None,
            SchedulerKind::Sweep { direction } | SchedulerKind::SplitSweep { direction } => {
                Some(*direction)
            },
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(direction) => write!(f, "{} ({})", self.name(), direction),
            None => f.write_str(self.name()),
        }
    }
}

impl FromStr for SchedulerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let direction = SweepDirection::default();
        match s.trim().to_ascii_uppercase().as_str() {
            "FIFO" => Ok(SchedulerKind::Fifo),
            "LOOK" | "SWEEP" => Ok(SchedulerKind::Sweep { direction }),
            "FLOOK" | "SPLIT_SWEEP" => Ok(SchedulerKind::SplitSweep { direction }),
            other => Err(ConfigError::new(format!(
                "invalid disk scheduler {other:?}, expected FIFO, LOOK or FLOOK"
            ))),
        }
    }
}

/// Scheduler wrapper exposing one API regardless of policy.
#[derive(Debug, Clone)]
pub struct Scheduler {
    inner: SchedulerInner,
}

#[derive(Debug, Clone)]
enum SchedulerInner {
    Fifo(FifoScheduler),
    Sweep(SweepScheduler),
    SplitSweep(SplitSweepScheduler),
}

impl DiskScheduler for Scheduler {
    fn name(&self) -> &'static str {
        match &self.inner {
            SchedulerInner::Fifo(s) => s.name(),
            SchedulerInner::Sweep(s) => s.name(),
            SchedulerInner::SplitSweep(s) => s.name(),
        }
    }

    fn add_request(&mut self, request: Request) {
        match &mut self.inner {
            SchedulerInner::Fifo(s) => s.add_request(request),
            SchedulerInner::Sweep(s) => s.add_request(request),
            SchedulerInner::SplitSweep(s) => s.add_request(request),
        }
    }

    fn process_requests(&mut self, sink: &mut dyn EventSink) {
        match &mut self.inner {
            SchedulerInner::Fifo(s) => s.process_requests(sink),
            SchedulerInner::Sweep(s) => s.process_requests(sink),
            SchedulerInner::SplitSweep(s) => s.process_requests(sink),
        }
    }

    fn pending(&self) -> usize {
        match &self.inner {
            SchedulerInner::Fifo(s) => s.pending(),
            SchedulerInner::Sweep(s) => s.pending(),
            SchedulerInner::SplitSweep(s) => s.pending(),
        }
    }

    fn head(&self) -> &DiskHead {
        match &self.inner {
            SchedulerInner::Fifo(s) => s.head(),
            SchedulerInner::Sweep(s) => s.head(),
            SchedulerInner::SplitSweep(s) => s.head(),
        }
    }
}

/// Builder for scheduler instances.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerBuilder {
    head: TrackId,
    timing: DiskTiming,
    reverse_on_turn: bool,
}

impl SchedulerBuilder {
    /// Starts a builder with the head on `head`.
    pub fn new(head: TrackId, timing: DiskTiming) -> Self {
        Self {
            head,
            timing,
            reverse_on_turn: true,
        }
    }

    /// Takes head position, timing and turn policy from a configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.initial_head(), config.disk_timing())
            .reverse_on_turn(config.reverse_on_turn())
    }

    pub fn reverse_on_turn(mut self, reverse: bool) -> Self {
        self.reverse_on_turn = reverse;
        self
    }

    /// Builds the selected policy.
    pub fn build(self, kind: SchedulerKind) -> Scheduler {
        let inner = match kind {
            SchedulerKind::Fifo => SchedulerInner::Fifo(FifoScheduler::new(self.head, self.timing)),
            SchedulerKind::Sweep { direction } => {
                SchedulerInner::Sweep(SweepScheduler::with_reverse_on_turn(
                    self.head,
                    self.timing,
                    direction,
                    self.reverse_on_turn,
                ))
            },
            SchedulerKind::SplitSweep { direction } => {
                SchedulerInner::SplitSweep(SplitSweepScheduler::with_reverse_on_turn(
                    self.head,
                    self.timing,
                    direction,
                    self.reverse_on_turn,
                ))
            },
        };

        Scheduler { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    #[test]
    fn test_all_kinds_drain_completely() {
        let kinds = [
            SchedulerKind::Fifo,
            SchedulerKind::Sweep {
                direction: SweepDirection::Ascending,
            },
            SchedulerKind::Sweep {
                direction: SweepDirection::Descending,
            },
            SchedulerKind::SplitSweep {
                direction: SweepDirection::Ascending,
            },
            SchedulerKind::SplitSweep {
                direction: SweepDirection::Descending,
            },
        ];

        for kind in kinds {
            let mut s = SchedulerBuilder::from_config(&SimConfig::default()).build(kind);
            for track in [95, 164, 11, 95, 199, 0, 512] {
                s.add_request(Request::read(track));
            }
            assert_eq!(s.pending(), 7, "{kind}");

            s.process_requests(&mut NullSink);
            assert_eq!(s.pending(), 0, "{kind}");
            assert_eq!(s.request_times().len(), 7, "{kind}");
            assert_eq!(s.name(), kind.name());
        }
    }

    #[test]
    fn test_selection_parsing() {
        assert_eq!("fifo".parse::<SchedulerKind>(), Ok(SchedulerKind::Fifo));
        assert_eq!(
            SchedulerKind::from_selection("LOOK", Some("DESC")),
            Ok(SchedulerKind::Sweep {
                direction: SweepDirection::Descending
            })
        );
        assert_eq!(
            SchedulerKind::from_selection("FIFO", Some("DESC")),
            Ok(SchedulerKind::Fifo)
        );
        assert!(SchedulerKind::from_selection("SSTF", None).is_err());
        assert!(SchedulerKind::from_selection("LOOK", Some("SIDEWAYS")).is_err());
    }

    #[test]
    fn test_reverse_flag_reaches_sweep() {
        let timing = SimConfig::default().disk_timing();
        let kind = SchedulerKind::Sweep {
            direction: SweepDirection::Ascending,
        };
        let mut reversed = SchedulerBuilder::new(50, timing).build(kind);
        let mut textbook = SchedulerBuilder::new(50, timing)
            .reverse_on_turn(false)
            .build(kind);

        for track in [10, 70, 40] {
            reversed.add_request(Request::read(track));
            textbook.add_request(Request::read(track));
        }
        reversed.process_requests(&mut NullSink);
        textbook.process_requests(&mut NullSink);

        assert_eq!(reversed.schedule_time(), 67.0);
        // 70 → 40 → 10: 14 + 19 + 19
        assert_eq!(textbook.schedule_time(), 52.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(SchedulerKind::Fifo.to_string(), "FIFO");
        assert_eq!(
            SchedulerKind::SplitSweep {
                direction: SweepDirection::Descending
            }
            .to_string(),
            "FLOOK (DESC)"
        );
    }
}
