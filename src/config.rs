//! Simulation parameters.
//!
//! All timing and capacity constants live in one immutable [`SimConfig`]
//! value that is handed to the driver, the schedulers and the cache at
//! construction. Defaults reproduce the classic parameter set (512 tracks,
//! 7500 RPM, a 3/3/4 cache, 20 ms quantum); any subset can be overridden
//! through [`SimConfigBuilder`] or a JSON document.
//!
//! ## Derived values
//!
//! ```text
//!   avg_rotation_delay = 60_000 / (2 · rpm)                     ms
//!   sector_access_time = 60_000 / (sectors_per_track · rpm)     ms
//! ```
//!
//! ## Example
//!
//! ```
//! use disksim::config::SimConfig;
//!
//! let config = SimConfig::builder()
//!     .time_per_track(0.5)
//!     .rpm(7500)
//!     .segment_sizes(3, 3, 4)
//!     .try_build()
//!     .unwrap();
//!
//! assert_eq!(config.avg_rotation_delay(), 4.0);
//! assert_eq!(config.segments().total(), 10);
//! ```

use serde::Deserialize;

use crate::error::ConfigError;
use crate::request::{RequestKind, TrackId};

/// Capacities of the Left, Middle and Right cache segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentSizes {
    pub left: usize,
    pub middle: usize,
    pub right: usize,
}

impl SegmentSizes {
    pub const fn new(left: usize, middle: usize, right: usize) -> Self {
        Self {
            left,
            middle,
            right,
        }
    }

    /// Total number of resident buffers the cache may hold.
    #[inline]
    pub const fn total(&self) -> usize {
        self.left + self.middle + self.right
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, cap) in [
            ("segments.left", self.left),
            ("segments.middle", self.middle),
            ("segments.right", self.right),
        ] {
            if cap == 0 {
                return Err(ConfigError::field(name, "capacity must be > 0"));
            }
        }
        Ok(())
    }
}

impl Default for SegmentSizes {
    fn default() -> Self {
        Self::new(3, 3, 4)
    }
}

/// The subset of [`SimConfig`] the head cost model needs.
///
/// Copied into every scheduler so cost computation never reaches back into
/// the full configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskTiming {
    pub number_of_tracks: TrackId,
    pub time_per_track: f64,
    pub time_to_boundary_track: f64,
    pub avg_rotation_delay: f64,
}

impl DiskTiming {
    /// Returns `true` for the two edge tracks, `0` and `number_of_tracks`.
    #[inline]
    pub fn is_boundary(&self, track: TrackId) -> bool {
        track == 0 || track == self.number_of_tracks
    }
}

impl Default for DiskTiming {
    fn default() -> Self {
        SimConfig::default().disk_timing()
    }
}

/// Immutable simulation configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    number_of_tracks: TrackId,
    sectors_per_track: u32,
    time_per_track: f64,
    time_to_boundary_track: f64,
    rpm: u32,
    read_system_time: f64,
    write_system_time: f64,
    interrupt_time: f64,
    quantum: f64,
    processing_time: f64,
    segments: SegmentSizes,
    initial_head: TrackId,
    reverse_on_turn: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            number_of_tracks: 512,
            sectors_per_track: 500,
            time_per_track: 0.5,
            time_to_boundary_track: 10.0,
            rpm: 7500,
            read_system_time: 0.15,
            write_system_time: 0.15,
            interrupt_time: 0.05,
            quantum: 20.0,
            processing_time: 7.0,
            segments: SegmentSizes::default(),
            initial_head: 50,
            reverse_on_turn: true,
        }
    }
}

impl SimConfig {
    /// Starts a builder seeded with the defaults.
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder {
            config: Self::default(),
        }
    }

    /// Parses a JSON document; missing fields keep their defaults.
    ///
    /// ```
    /// use disksim::config::SimConfig;
    ///
    /// let config = SimConfig::from_json_str(r#"{ "quantum": 35.0 }"#).unwrap();
    /// assert_eq!(config.quantum(), 35.0);
    /// assert_eq!(config.rpm(), 7500);
    ///
    /// assert!(SimConfig::from_json_str(r#"{ "quantum": 0.0 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::new(format!("invalid config document: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field; called by the builder and the JSON loader.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_tracks == 0 {
            return Err(ConfigError::field("number_of_tracks", "must be > 0"));
        }
        if self.sectors_per_track == 0 {
            return Err(ConfigError::field("sectors_per_track", "must be > 0"));
        }
        if self.rpm == 0 {
            return Err(ConfigError::field("rpm", "must be > 0"));
        }
        for (name, value) in [
            ("time_per_track", self.time_per_track),
            ("time_to_boundary_track", self.time_to_boundary_track),
            ("read_system_time", self.read_system_time),
            ("write_system_time", self.write_system_time),
            ("interrupt_time", self.interrupt_time),
            ("processing_time", self.processing_time),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::field(
                    name,
                    format!("must be a finite value >= 0, got {value}"),
                ));
            }
        }
        if !self.quantum.is_finite() || self.quantum <= 0.0 {
            return Err(ConfigError::field(
                "quantum",
                format!("must be a finite value > 0, got {}", self.quantum),
            ));
        }
        if self.initial_head > self.number_of_tracks {
            return Err(ConfigError::field(
                "initial_head",
                format!(
                    "track {} is beyond number_of_tracks {}",
                    self.initial_head, self.number_of_tracks
                ),
            ));
        }
        self.segments.validate()
    }

    #[inline]
    pub fn number_of_tracks(&self) -> TrackId {
        self.number_of_tracks
    }

    #[inline]
    pub fn sectors_per_track(&self) -> u32 {
        self.sectors_per_track
    }

    #[inline]
    pub fn time_per_track(&self) -> f64 {
        self.time_per_track
    }

    #[inline]
    pub fn time_to_boundary_track(&self) -> f64 {
        self.time_to_boundary_track
    }

    #[inline]
    pub fn rpm(&self) -> u32 {
        self.rpm
    }

    #[inline]
    pub fn quantum(&self) -> f64 {
        self.quantum
    }

    #[inline]
    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    #[inline]
    pub fn interrupt_time(&self) -> f64 {
        self.interrupt_time
    }

    #[inline]
    pub fn segments(&self) -> SegmentSizes {
        self.segments
    }

    #[inline]
    pub fn initial_head(&self) -> TrackId {
        self.initial_head
    }

    /// Whether a sweep services the far side of the head starting from its
    /// extreme track (`true`) or from the track nearest the head (`false`).
    #[inline]
    pub fn reverse_on_turn(&self) -> bool {
        self.reverse_on_turn
    }

    /// Half a rotation, in milliseconds.
    pub fn avg_rotation_delay(&self) -> f64 {
        60_000.0 / (2.0 * f64::from(self.rpm))
    }

    /// Time for one sector to pass under the head, in milliseconds.
    pub fn sector_access_time(&self) -> f64 {
        60_000.0 / (f64::from(self.sectors_per_track) * f64::from(self.rpm))
    }

    /// System-call overhead for a request kind.
    pub fn system_time(&self, kind: RequestKind) -> f64 {
        match kind {
            RequestKind::Read => self.read_system_time,
            RequestKind::Write => self.write_system_time,
        }
    }

    /// Device access time charged to the issuing process.
    pub fn access_time(&self, kind: RequestKind) -> f64 {
        self.avg_rotation_delay()
            + self.sector_access_time()
            + self.interrupt_time
            + self.system_time(kind)
    }

    /// Access time plus fixed processing time: what one request costs a process.
    pub fn request_cost(&self, kind: RequestKind) -> f64 {
        self.access_time(kind) + self.processing_time
    }

    pub fn disk_timing(&self) -> DiskTiming {
        DiskTiming {
            number_of_tracks: self.number_of_tracks,
            time_per_track: self.time_per_track,
            time_to_boundary_track: self.time_to_boundary_track,
            avg_rotation_delay: self.avg_rotation_delay(),
        }
    }
}

/// Builder overriding individual [`SimConfig`] fields.
#[derive(Debug, Clone)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

impl SimConfigBuilder {
    pub fn number_of_tracks(mut self, tracks: TrackId) -> Self {
        self.config.number_of_tracks = tracks;
        self
    }

    pub fn sectors_per_track(mut self, sectors: u32) -> Self {
        self.config.sectors_per_track = sectors;
        self
    }

    pub fn time_per_track(mut self, ms: f64) -> Self {
        self.config.time_per_track = ms;
        self
    }

    pub fn time_to_boundary_track(mut self, ms: f64) -> Self {
        self.config.time_to_boundary_track = ms;
        self
    }

    pub fn rpm(mut self, rpm: u32) -> Self {
        self.config.rpm = rpm;
        self
    }

    pub fn read_system_time(mut self, ms: f64) -> Self {
        self.config.read_system_time = ms;
        self
    }

    pub fn write_system_time(mut self, ms: f64) -> Self {
        self.config.write_system_time = ms;
        self
    }

    pub fn interrupt_time(mut self, ms: f64) -> Self {
        self.config.interrupt_time = ms;
        self
    }

    pub fn quantum(mut self, ms: f64) -> Self {
        self.config.quantum = ms;
        self
    }

    pub fn processing_time(mut self, ms: f64) -> Self {
        self.config.processing_time = ms;
        self
    }

    pub fn segment_sizes(mut self, left: usize, middle: usize, right: usize) -> Self {
        self.config.segments = SegmentSizes::new(left, middle, right);
        self
    }

    pub fn initial_head(mut self, track: TrackId) -> Self {
        self.config.initial_head = track;
        self
    }

    pub fn reverse_on_turn(mut self, reverse: bool) -> Self {
        self.config.reverse_on_turn = reverse;
        self
    }

    /// Validates and returns the configuration.
    pub fn try_build(self) -> Result<SimConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
