//! Partitioned multi-objective hyper-parameter search.
//!
//! Tunes an algorithm's configuration against several competing quality
//! objectives under a wall-clock budget:
//!
//! - **Partitioning**: an algorithm family's tunable parameters are split
//!   into small hyper-partitions, each searched independently.
//! - **Search**: single-parameter partitions run an elitist random search;
//!   multi-parameter partitions run a μ+λ evolutionary search with
//!   field-level crossover and mutation.
//! - **Concurrency**: one worker thread per partition, no shared mutable
//!   state; results come back through join handles.
//! - **Selection**: NSGA-II (Pareto rank, then crowding distance), both
//!   inside each partition and for the final cross-partition merge.
//!
//! # Architecture
//!
//! The crate never fits or scores a model itself. Candidates come from a
//! [`CandidateGenerator`](search::CandidateGenerator) and are scored by a
//! [`FitnessEvaluator`](search::FitnessEvaluator); both are supplied by the
//! caller. [`space::SpaceGenerator`] covers the common case of fixed
//! parameter domains.
//!
//! # Modules
//!
//! - [`partition`]: parameter catalog and hyper-partition generation
//! - [`search`]: individuals, genetic operators, selection, search loops
//! - [`schedule`]: per-partition jobs, worker threads, result store
//! - [`space`]: declarative parameter domains
//! - [`tuner`]: end-to-end search requests

pub mod error;
pub mod partition;
pub mod schedule;
pub mod search;
pub mod space;
pub mod tuner;

pub use error::SearchError;
