//! Three-segment frequency-approximating cache (segmented LFU).
//!
//! Tracks touched by the simulation are kept in one of three fixed-capacity
//! segments. Fresh tracks enter **Left**; pressure from new arrivals pushes
//! buffers down through **Middle** into **Right**, and only Right ever
//! evicts. Reuse of a Middle or Right buffer promotes it back into Left and
//! bumps its frequency, so tracks that keep coming back survive while
//! one-touch tracks drain away.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │                         SegmentedCache Layout                          │
//! │                                                                        │
//! │   map: FxHashMap<TrackId, Slot { buffer, segment }>   (owns buffers)   │
//! │                                                                        │
//! │      LEFT (cap L)            MIDDLE (cap M)           RIGHT (cap R)    │
//! │   ┌────────────────┐      ┌────────────────┐      ┌─────────────────┐  │
//! │   │ front     tail │ ───► │ front     tail │ ───► │ front      tail │  │
//! │   │ [9] [8] [7]    │ tail │ [6] [5] [4]    │ tail │ [3] [2] [1]     │  │
//! │   └────────────────┘      └────────────────┘      └────────┬────────┘  │
//! │          ▲                        │                        │           │
//! │          │        promote         │                        ▼           │
//! │          └────────────────────────┴──────────────── evict min freq     │
//! │                                                     (front-most tie)   │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Segments hold track ids only; the buffer itself lives once, in the map.
//!
//! ## Touch Flow
//!
//! ```text
//!   touch(track):
//!     resident in Left   → move to front of Left            (frequency kept)
//!     resident in Middle → unlink, frequency += 1, cascade
//!     resident in Right  → unlink, frequency += 1, cascade
//!     not resident       → new buffer (frequency 1), cascade
//!
//!   cascade(id):
//!     if Left is full:
//!         d1 ← pop tail of Left
//!         if Middle is full:
//!             d2 ← pop tail of Middle
//!             if Right is full: evict_from_right()
//!             push d2 to front of Right
//!         push d1 to front of Middle
//!     push id to front of Left
//! ```
//!
//! ## Operations
//!
//! | Operation          | Time      | Notes                                   |
//! |--------------------|-----------|-----------------------------------------|
//! | `touch`            | O(L+M+R)  | segment unlink scans a short deque      |
//! | `get` / `contains` | O(1)      | map lookup, no reordering               |
//! | `segment_of`       | O(1)      |                                         |
//! | `check_invariants` | O(N)      | full partition check                    |
//!
//! ## Example Usage
//!
//! ```
//! use disksim::config::SegmentSizes;
//! use disksim::policy::segmented_lfu::{Segment, SegmentedCache};
//!
//! let mut cache = SegmentedCache::new(SegmentSizes::new(1, 1, 1));
//! cache.touch(1);
//! cache.touch(2); // 1 → Middle
//! assert_eq!(cache.segment_of(1), Some(Segment::Middle));
//!
//! let touch = cache.touch(1); // promoted back to Left
//! assert_eq!(touch.buffer.frequency(), 2);
//! assert_eq!(cache.segment_of(1), Some(Segment::Left));
//! assert_eq!(cache.segment_of(2), Some(Segment::Middle));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; the simulation driver owns the cache exclusively and
//! mutates it through `&mut self`.

use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::{SegmentSizes, SimConfig};
use crate::error::{ConfigError, InvariantError};
use crate::request::TrackId;

/// One of the three cache tiers, from least to most frequency-proven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Left,
    Middle,
    Right,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Left, Segment::Middle, Segment::Right];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Segment::Left => "Left",
            Segment::Middle => "Middle",
            Segment::Right => "Right",
        };
        f.pad(name)
    }
}

/// Cached copy of a track.
///
/// Identity is the track id: two buffers compare equal whenever their ids
/// match, regardless of frequency.
#[derive(Debug, Clone, Copy)]
pub struct Buffer {
    id: TrackId,
    frequency: u32,
}

impl Buffer {
    fn new(id: TrackId) -> Self {
        Self { id, frequency: 1 }
    }

    #[inline]
    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Number of promotions plus one.
    #[inline]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Buffer {}

impl Hash for Buffer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(f={})", self.id, self.frequency)
    }
}

/// How a touch found its track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Not resident; a new buffer was created.
    Inserted,
    /// Already in Left; moved to the front.
    Refreshed,
    /// Was in Middle or Right; promoted into Left with frequency bumped.
    Promoted { from: Segment },
}

/// Result of [`SegmentedCache::touch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
    /// The touched buffer after the update.
    pub buffer: Buffer,
    pub access: Access,
    /// Buffer pushed out of Right by the cascade, if any.
    pub evicted: Option<Buffer>,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    buffer: Buffer,
    segment: Segment,
}

/// Three-segment cache keyed by track id.
#[derive(Debug, Clone)]
pub struct SegmentedCache {
    map: FxHashMap<TrackId, Slot>,
    left: VecDeque<TrackId>,
    middle: VecDeque<TrackId>,
    right: VecDeque<TrackId>,
    sizes: SegmentSizes,
}

impl SegmentedCache {
    /// Creates an empty cache with the given segment capacities.
    ///
    /// # Panics
    ///
    /// Panics if any segment capacity is zero. Use [`try_new`](Self::try_new)
    /// for user-supplied sizes.
    pub fn new(sizes: SegmentSizes) -> Self {
        match Self::try_new(sizes) {
            Ok(cache) => cache,
            Err(e) => panic!("invalid segment sizes: {e}"),
        }
    }

    /// Fallible constructor.
    ///
    /// ```
    /// use disksim::config::SegmentSizes;
    /// use disksim::policy::segmented_lfu::SegmentedCache;
    ///
    /// assert!(SegmentedCache::try_new(SegmentSizes::new(3, 3, 4)).is_ok());
    /// assert!(SegmentedCache::try_new(SegmentSizes::new(3, 3, 0)).is_err());
    /// ```
    pub fn try_new(sizes: SegmentSizes) -> Result<Self, ConfigError> {
        if sizes.left == 0 || sizes.middle == 0 || sizes.right == 0 {
            return Err(ConfigError::new(format!(
                "segment capacities must all be > 0, got {}/{}/{}",
                sizes.left, sizes.middle, sizes.right
            )));
        }
        let mut map = FxHashMap::default();
        map.reserve(sizes.total());
        Ok(Self {
            map,
            left: VecDeque::with_capacity(sizes.left),
            middle: VecDeque::with_capacity(sizes.middle),
            right: VecDeque::with_capacity(sizes.right),
            sizes,
        })
    }

    /// Creates a cache sized by a validated configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.segments())
    }

    /// Registers an access to `track`, returning the up-to-date buffer.
    ///
    /// Never fails: every track id is a valid cache key.
    pub fn touch(&mut self, track: TrackId) -> Touch {
        let resident = self.map.get(&track).map(|slot| slot.segment);

        let touch = match resident {
            Some(Segment::Left) => {
                Self::unlink(&mut self.left, track);
                self.left.push_front(track);
                Touch {
                    buffer: self.buffer_or_new(track),
                    access: Access::Refreshed,
                    evicted: None,
                }
            },
            Some(from @ (Segment::Middle | Segment::Right)) => {
                let deque = match from {
                    Segment::Middle => &mut self.middle,
                    _ => &mut self.right,
                };
                Self::unlink(deque, track);
                if let Some(slot) = self.map.get_mut(&track) {
                    slot.buffer.frequency += 1;
                }
                let evicted = self.shift_and_add(track);
                Touch {
                    buffer: self.buffer_or_new(track),
                    access: Access::Promoted { from },
                    evicted,
                }
            },
            None => {
                let buffer = Buffer::new(track);
                self.map.insert(
                    track,
                    Slot {
                        buffer,
                        segment: Segment::Left,
                    },
                );
                let evicted = self.shift_and_add(track);
                Touch {
                    buffer,
                    access: Access::Inserted,
                    evicted,
                }
            },
        };

        #[cfg(debug_assertions)]
        self.validate_invariants();

        touch
    }

    /// Places `id` at the front of Left, demoting tails as needed.
    ///
    /// Returns the buffer evicted from Right, if the cascade reached it.
    fn shift_and_add(&mut self, id: TrackId) -> Option<Buffer> {
        let mut evicted = None;

        if self.left.len() >= self.sizes.left {
            if let Some(demoted_left) = self.left.pop_back() {
                if self.middle.len() >= self.sizes.middle {
                    if let Some(demoted_middle) = self.middle.pop_back() {
                        if self.right.len() >= self.sizes.right {
                            evicted = self.evict_from_right();
                        }
                        self.right.push_front(demoted_middle);
                        self.set_segment(demoted_middle, Segment::Right);
                    }
                }
                self.middle.push_front(demoted_left);
                self.set_segment(demoted_left, Segment::Middle);
            }
        }

        self.left.push_front(id);
        self.set_segment(id, Segment::Left);
        evicted
    }

    /// Removes the lowest-frequency Right buffer, front-most on ties.
    fn evict_from_right(&mut self) -> Option<Buffer> {
        let map = &self.map;
        let (pos, _) = self
            .right
            .iter()
            .enumerate()
            .min_by_key(|(_, id)| map.get(*id).map_or(u32::MAX, |s| s.buffer.frequency))?;

        let id = self.right.remove(pos)?;
        self.map.remove(&id).map(|slot| slot.buffer)
    }

    fn unlink(deque: &mut VecDeque<TrackId>, id: TrackId) {
        if let Some(pos) = deque.iter().position(|&x| x == id) {
            deque.remove(pos);
        }
    }

    fn set_segment(&mut self, id: TrackId, segment: Segment) {
        if let Some(slot) = self.map.get_mut(&id) {
            slot.segment = segment;
        }
    }

    fn buffer_or_new(&self, id: TrackId) -> Buffer {
        self.map.get(&id).map_or(Buffer::new(id), |slot| slot.buffer)
    }

    /// Returns the resident buffer for `track` without reordering.
    pub fn get(&self, track: TrackId) -> Option<&Buffer> {
        self.map.get(&track).map(|slot| &slot.buffer)
    }

    #[inline]
    pub fn contains(&self, track: TrackId) -> bool {
        self.map.contains_key(&track)
    }

    /// Segment currently holding `track`.
    pub fn segment_of(&self, track: TrackId) -> Option<Segment> {
        self.map.get(&track).map(|slot| slot.segment)
    }

    /// Track ids in `segment`, front to tail.
    pub fn ids(&self, segment: Segment) -> impl Iterator<Item = TrackId> + '_ {
        self.deque(segment).iter().copied()
    }

    /// Buffers in `segment`, front to tail.
    pub fn buffers(&self, segment: Segment) -> impl Iterator<Item = &Buffer> + '_ {
        self.deque(segment)
            .iter()
            .filter_map(|id| self.map.get(id).map(|slot| &slot.buffer))
    }

    pub fn segment_len(&self, segment: Segment) -> usize {
        self.deque(segment).len()
    }

    pub fn segment_capacity(&self, segment: Segment) -> usize {
        match segment {
            Segment::Left => self.sizes.left,
            Segment::Middle => self.sizes.middle,
            Segment::Right => self.sizes.right,
        }
    }

    fn deque(&self, segment: Segment) -> &VecDeque<TrackId> {
        match segment {
            Segment::Left => &self.left,
            Segment::Middle => &self.middle,
            Segment::Right => &self.right,
        }
    }

    /// Number of resident buffers.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of resident buffers, `L + M + R`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.sizes.total()
    }

    #[inline]
    pub fn sizes(&self) -> SegmentSizes {
        self.sizes
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.left.clear();
        self.middle.clear();
        self.right.clear();
    }

    /// Verifies capacity bounds and the segment/map partition.
    ///
    /// - each segment holds at most its capacity
    /// - every segment id is in the map, tagged with that segment
    /// - no id appears twice across segments
    /// - segment lengths sum to the map size
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut seen = FxHashSet::default();

        for segment in Segment::ALL {
            let deque = self.deque(segment);
            let cap = self.segment_capacity(segment);
            if deque.len() > cap {
                return Err(InvariantError::new(format!(
                    "{segment} holds {} buffers, capacity {cap}",
                    deque.len()
                )));
            }
            for &id in deque {
                if !seen.insert(id) {
                    return Err(InvariantError::new(format!(
                        "track {id} appears in more than one segment position"
                    )));
                }
                match self.map.get(&id) {
                    None => {
                        return Err(InvariantError::new(format!(
                            "track {id} in {segment} but missing from map"
                        )))
                    },
                    Some(slot) if slot.segment != segment => {
                        return Err(InvariantError::new(format!(
                            "track {id} in {segment} but tagged {}",
                            slot.segment
                        )))
                    },
                    Some(slot) if slot.buffer.id != id => {
                        return Err(InvariantError::new(format!(
                            "map key {id} holds buffer {}",
                            slot.buffer.id
                        )))
                    },
                    Some(_) => {},
                }
            }
        }

        if seen.len() != self.map.len() {
            return Err(InvariantError::new(format!(
                "map holds {} buffers but segments hold {}",
                self.map.len(),
                seen.len()
            )));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("segmented cache invariant violated: {e}");
        }
    }
}

impl fmt::Display for SegmentedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in Segment::ALL {
            write!(f, "{segment:<6} [")?;
            for (i, buffer) in self.buffers(segment).enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{buffer}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
