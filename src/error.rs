//! Error types shared across the crate.

use thiserror::Error;

/// Errors surfaced by a search request.
///
/// Evaluation failures never appear here: a configuration that fails to
/// score is absorbed as a zero fitness vector inside the search loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The requested algorithm family is not in the parameter catalog.
    #[error("unknown algorithm family `{0}`")]
    UnknownAlgorithm(String),

    /// A search parameter is out of range.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// Every partition finished with an empty population.
    #[error("no partition produced a configuration to select from")]
    EmptyResult,
}
