//! The caller-facing tuner.
//!
//! # Key Types
//!
//! - [`HyperTuner`]: runs a [`SearchRequest`] end to end
//! - [`SearchResult`]: the winning configurations
//! - [`select_final`]: cross-partition NSGA-II merge

mod hyper;
mod request;
mod selector;

pub use hyper::HyperTuner;
pub use request::{SearchRequest, SearchResult};
pub use selector::select_final;
