//! Disk requests and the processes that issue them.
//!
//! A [`Request`] is an immutable `(track, kind)` pair. A [`Process`] owns a
//! FIFO queue of requests; the driver pops from the front while the process
//! has quantum left and appends only while a workload is being seeded.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Track number on the simulated platter, also the cache buffer id.
pub type TrackId = u32;

/// Identifier of a simulated process.
pub type ProcessId = u32;

/// Kind of disk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestKind {
    Read,
    Write,
}

impl RequestKind {
    /// Both kinds, in declaration order.
    pub const ALL: [RequestKind; 2] = [RequestKind::Read, RequestKind::Write];
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Read => f.write_str("READ"),
            RequestKind::Write => f.write_str("WRITE"),
        }
    }
}

/// A single disk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    track: TrackId,
    kind: RequestKind,
}

impl Request {
    #[inline]
    pub const fn new(track: TrackId, kind: RequestKind) -> Self {
        Self { track, kind }
    }

    #[inline]
    pub const fn read(track: TrackId) -> Self {
        Self::new(track, RequestKind::Read)
    }

    #[inline]
    pub const fn write(track: TrackId) -> Self {
        Self::new(track, RequestKind::Write)
    }

    #[inline]
    pub fn track(&self) -> TrackId {
        self.track
    }

    #[inline]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.track)
    }
}

/// A simulated process with its pending request queue.
///
/// # Example
///
/// ```
/// use disksim::request::{Process, Request};
///
/// let mut p = Process::with_requests(1, [Request::read(95), Request::write(164)]);
/// assert!(p.has_pending_requests());
/// assert_eq!(p.pop_request(), Some(Request::read(95)));
/// assert_eq!(p.pending(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    id: ProcessId,
    queue: VecDeque<Request>,
}

impl Process {
    /// Creates a process with an empty queue.
    pub fn new(id: ProcessId) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
        }
    }

    /// Creates a process seeded with `requests` in iteration order.
    pub fn with_requests(id: ProcessId, requests: impl IntoIterator<Item = Request>) -> Self {
        Self {
            id,
            queue: requests.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Appends a request to the back of the queue.
    pub fn push_request(&mut self, request: Request) {
        self.queue.push_back(request);
    }

    /// Removes the oldest pending request.
    pub fn pop_request(&mut self) -> Option<Request> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn has_pending_requests(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Number of requests still queued.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Iterates pending requests front to back.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut p = Process::new(3);
        p.push_request(Request::read(10));
        p.push_request(Request::write(20));
        p.push_request(Request::read(5));

        let drained: Vec<_> = std::iter::from_fn(|| p.pop_request()).collect();
        assert_eq!(
            drained,
            vec![Request::read(10), Request::write(20), Request::read(5)]
        );
        assert!(!p.has_pending_requests());
    }

    #[test]
    fn request_display_names_kind_and_track() {
        assert_eq!(Request::write(164).to_string(), "WRITE@164");
        assert_eq!(RequestKind::Read.to_string(), "READ");
    }

    #[test]
    fn kind_serializes_uppercase() {
        let json = serde_json::to_string(&Request::read(7)).unwrap();
        assert_eq!(json, r#"{"track":7,"kind":"READ"}"#);
    }
}
