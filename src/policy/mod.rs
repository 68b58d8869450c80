//! Buffer cache replacement policies.

pub mod segmented_lfu;

pub use segmented_lfu::{Access, Buffer, Segment, SegmentedCache, Touch};
