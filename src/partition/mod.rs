//! Hyper-partitions of an algorithm's parameter space.
//!
//! A family's tunable parameters are split into small, independently
//! searchable subsets ("hyper-partitions"). Single-parameter partitions are
//! cheap enough to sample at random; multi-parameter partitions get an
//! evolutionary search.
//!
//! # Key Types
//!
//! - [`AlgorithmSpec`]: prime and bench parameters of one family
//! - [`ParameterCatalog`]: family name → spec, with a built-in clustering table
//! - [`Partition`]: one deduplicated set of parameter names
//! - [`generate_partitions`]: spec → partitions

mod catalog;
mod generator;

pub use catalog::{AlgorithmSpec, ParameterCatalog};
pub use generator::{generate_partitions, Partition};
