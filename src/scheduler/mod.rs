pub mod fifo;
pub mod head;
pub mod split_sweep;
pub mod sweep;

pub use fifo::FifoScheduler;
pub use head::DiskHead;
pub use split_sweep::SplitSweepScheduler;
pub use sweep::{sweep_order, SweepDirection, SweepScheduler};
