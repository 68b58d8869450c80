//! Error types for the disk simulator.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a simulation cannot be set up, e.g. an
//!   unknown scheduler name, a zero segment capacity, a negative timing
//!   constant, or a workload request that targets a track beyond the disk.
//!   Every `ConfigError` is raised before any simulation state exists.
//! - [`InvariantError`]: Returned by
//!   [`SegmentedCache::check_invariants`](crate::policy::segmented_lfu::SegmentedCache::check_invariants)
//!   when the segment/map partition or a capacity bound is broken.
//!
//! Scheduling, head movement and cache lookups have no failure paths; they
//! are total over `track ∈ [0, number_of_tracks]`.
//!
//! ## Example Usage
//!
//! ```
//! use disksim::builder::SchedulerKind;
//! use disksim::error::ConfigError;
//!
//! let kind: Result<SchedulerKind, ConfigError> = "LOOK".parse();
//! assert!(kind.is_ok());
//!
//! let bad = "ELEVATOR".parse::<SchedulerKind>().unwrap_err();
//! assert!(bad.to_string().contains("ELEVATOR"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when simulation configuration or input is invalid.
///
/// Produced by the `FromStr` impls for scheduler selection,
/// [`SimConfigBuilder::try_build`](crate::config::SimConfigBuilder::try_build),
/// [`WorkloadSpec::generate`](crate::workload::WorkloadSpec::generate) and
/// [`SimulationDriver::new`](crate::driver::SimulationDriver::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Error for a named field whose value failed validation.
    pub(crate) fn field(name: &str, reason: impl fmt::Display) -> Self {
        Self(format!("{name}: {reason}"))
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal cache invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
