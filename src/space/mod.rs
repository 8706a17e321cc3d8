//! Declarative search spaces.
//!
//! The engine only needs a [`CandidateGenerator`](crate::search::CandidateGenerator).
//! This module provides one for the common case where every parameter has
//! a fixed domain: an integer range, a real range, a real grid or a list
//! of choices.

mod domain;
mod generator;

pub use domain::{ParamDomain, SearchSpace};
pub use generator::SpaceGenerator;
