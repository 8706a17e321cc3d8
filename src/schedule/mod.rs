//! Per-partition workers and result collection.
//!
//! # Key Types
//!
//! - [`SearchJob`]: one partition's search, owned by one worker
//! - [`PartitionScheduler`]: one scoped thread per job, joins them all
//! - [`ResultStore`]: partition id → final population, written once
//! - [`ProgressSink`]: receives per-generation and lifecycle events

mod job;
mod progress;
mod scheduler;
mod store;

pub use job::{jobs_for, PartitionId, SearchJob};
pub use progress::{NoProgress, ProgressEvent, ProgressSink, TracingProgress};
pub use scheduler::{empty_partitions, PartitionScheduler};
pub use store::ResultStore;
