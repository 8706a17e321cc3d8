//! Multi-objective search over one hyper-partition.
//!
//! A configuration is opaque to the engine: it is drawn from a
//! [`CandidateGenerator`], recombined field by field through the
//! [`Configuration`] view, and scored by a [`FitnessEvaluator`] into one
//! value per [`Objective`]. Selection is NSGA-II: Pareto rank first, then
//! crowding distance.
//!
//! # Key Types
//!
//! - [`Individual`]: configuration plus cached fitness vector
//! - [`ConfigSampler`]: sampling, mutation and crossover for one partition
//! - [`select`]: NSGA-II survivor selection
//! - [`StrategyKind`]: random search or μ+λ evolutionary search
//! - [`SearchConfig`]: loop parameters
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Bergstra & Bengio (2012), "Random Search for Hyper-Parameter Optimization"

mod config;
mod evaluation;
mod individual;
pub mod multi_objective;
mod objective;
mod operators;
mod runner;
mod selection;
mod types;

pub use config::{ResultMode, SearchConfig};
pub use evaluation::{evaluate_config, evaluate_invalid};
pub use individual::{Individual, Population};
pub use objective::{Direction, Objective};
pub use operators::ConfigSampler;
pub use runner::{SearchContext, SearchOutcome, StrategyKind};
pub use selection::select;
pub use types::{CandidateGenerator, Configuration, FitnessEvaluator, ParamSet, ParamValue};
