//! Time-budgeted search loops.
//!
//! Two strategies share one control loop: run whole generations while the
//! deadline has not passed and no cancellation was requested. The check
//! happens once per generation, so a run may overshoot its deadline by the
//! cost of the generation in progress.
//!
//! - [`StrategyKind::RandomSearch`]: elitist random restart. Keep the best
//!   `N`, add `S` fresh samples, repeat.
//! - [`StrategyKind::Evolutionary`]: μ+λ evolution. Produce `K` offspring by
//!   crossover, mutation or reproduction, keep the best survivors of
//!   parents ∪ offspring.

use super::config::SearchConfig;
use super::evaluation::evaluate_invalid;
use super::individual::Population;
use super::objective::Direction;
use super::operators::ConfigSampler;
use super::selection::select;
use super::types::{CandidateGenerator, FitnessEvaluator};
use crate::partition::Partition;
use crate::schedule::{PartitionId, ProgressEvent, ProgressSink};
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::debug;

/// Which control loop a partition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Elitist random restart, for single-parameter partitions.
    RandomSearch,
    /// μ+λ evolutionary search, for multi-parameter partitions.
    Evolutionary,
}

impl StrategyKind {
    /// Random search for a one-parameter partition, evolutionary search
    /// otherwise: with a single field, crossover and mutation degenerate
    /// into resampling.
    pub fn for_partition(partition: &Partition) -> Self {
        if partition.len() > 1 {
            StrategyKind::Evolutionary
        } else {
            StrategyKind::RandomSearch
        }
    }

    /// Label used in progress messages.
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::RandomSearch => "Random Search",
            StrategyKind::Evolutionary => "Evolutionary Search",
        }
    }

    /// Runs this strategy on `population` until the context's deadline.
    ///
    /// The population is first topped up with fresh samples to the
    /// configured population size, so an empty seed is fine.
    pub fn run<G, E, P, R>(
        self,
        ctx: &SearchContext<'_, G, E, P>,
        mut population: Population<G::Config>,
        rng: &mut R,
    ) -> SearchOutcome<G::Config>
    where
        G: CandidateGenerator,
        E: FitnessEvaluator<G::Config> + ?Sized,
        P: ProgressSink + ?Sized,
        R: Rng,
    {
        while population.len() < ctx.config.population_size {
            population.push(ctx.sampler.sample_individual(rng));
        }

        match self {
            StrategyKind::RandomSearch => random_search(ctx, population, rng),
            StrategyKind::Evolutionary => evolutionary_search(ctx, population, rng),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final state of one strategy run.
#[derive(Debug, Clone)]
pub struct SearchOutcome<C> {
    /// Final population, best-first, fully evaluated.
    pub population: Population<C>,

    /// Number of generations completed before the deadline.
    pub generations: usize,

    /// Whether the run stopped because of an external cancellation.
    pub cancelled: bool,
}

impl<C> SearchOutcome<C> {
    /// An outcome with no individuals, used for crashed workers.
    pub fn empty() -> Self {
        Self {
            population: Vec::new(),
            generations: 0,
            cancelled: false,
        }
    }
}

/// Everything a strategy reads while it runs. Shared immutably.
pub struct SearchContext<'a, G, E: ?Sized, P: ?Sized> {
    /// Sampler bound to the job's family and partition.
    pub sampler: ConfigSampler<'a, G>,
    /// Fitness evaluator.
    pub evaluator: &'a E,
    /// Objective directions, in score order.
    pub directions: &'a [Direction],
    /// Loop parameters.
    pub config: &'a SearchConfig,
    /// Progress sink.
    pub progress: &'a P,
    /// Partition being searched, for labels and logs.
    pub partition_id: PartitionId,
    /// Absolute wall-clock deadline.
    pub deadline: Instant,
    /// External cancellation flag, checked with the deadline.
    pub cancel: Option<&'a AtomicBool>,
}

impl<G, E, P> SearchContext<'_, G, E, P>
where
    G: CandidateGenerator,
    E: FitnessEvaluator<G::Config> + ?Sized,
    P: ProgressSink + ?Sized,
{
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn should_continue(&self) -> bool {
        Instant::now() < self.deadline && !self.cancelled()
    }

    fn evaluate(&self, population: &mut Population<G::Config>) -> usize {
        evaluate_invalid(
            self.evaluator,
            population,
            self.directions.len(),
            self.config.parallel,
        )
    }

    fn report(&self, strategy: StrategyKind, generation: usize, evaluated: usize) {
        debug!(
            partition = %self.partition_id,
            generation,
            evaluated,
            "{} generation complete",
            strategy
        );
        self.progress.publish(&ProgressEvent::generation(
            self.partition_id,
            strategy.label(),
            generation,
        ));
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(partition = %ctx.partition_id))]
fn random_search<G, E, P, R>(
    ctx: &SearchContext<'_, G, E, P>,
    mut population: Population<G::Config>,
    rng: &mut R,
) -> SearchOutcome<G::Config>
where
    G: CandidateGenerator,
    E: FitnessEvaluator<G::Config> + ?Sized,
    P: ProgressSink + ?Sized,
    R: Rng,
{
    let keep = ctx.config.population_size;
    let width = ctx.config.effective_search_width();

    ctx.evaluate(&mut population);

    let mut generations = 0;
    while ctx.should_continue() {
        let mut next = select(population, keep, ctx.directions);
        next.extend((0..width).map(|_| ctx.sampler.sample_individual(rng)));
        let evaluated = ctx.evaluate(&mut next);
        population = next;

        generations += 1;
        ctx.report(StrategyKind::RandomSearch, generations, evaluated);
    }

    ctx.evaluate(&mut population);
    SearchOutcome {
        population: select(population, keep, ctx.directions),
        generations,
        cancelled: ctx.cancelled(),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(partition = %ctx.partition_id))]
fn evolutionary_search<G, E, P, R>(
    ctx: &SearchContext<'_, G, E, P>,
    mut population: Population<G::Config>,
    rng: &mut R,
) -> SearchOutcome<G::Config>
where
    G: CandidateGenerator,
    E: FitnessEvaluator<G::Config> + ?Sized,
    P: ProgressSink + ?Sized,
    R: Rng,
{
    ctx.evaluate(&mut population);

    let mut generations = 0;
    while ctx.should_continue() && !population.is_empty() {
        let offspring = vary(ctx, &population, rng);
        population.extend(offspring);
        let evaluated = ctx.evaluate(&mut population);
        population = select(population, ctx.config.survivor_count, ctx.directions);

        generations += 1;
        ctx.report(StrategyKind::Evolutionary, generations, evaluated);
    }

    SearchOutcome {
        population,
        generations,
        cancelled: ctx.cancelled(),
    }
}

/// Produces `offspring_count` children, each from exactly one operator:
/// crossover with probability `crossover_rate`, mutation with probability
/// `mutation_rate`, a plain clone otherwise. Parents are drawn with
/// replacement; crossover keeps its first child only.
///
/// # Panics
/// Panics if `population` is empty.
fn vary<G, E, P, R>(
    ctx: &SearchContext<'_, G, E, P>,
    population: &Population<G::Config>,
    rng: &mut R,
) -> Population<G::Config>
where
    G: CandidateGenerator,
    E: ?Sized,
    P: ?Sized,
    R: Rng,
{
    assert!(!population.is_empty(), "cannot vary an empty population");
    let cxpb = ctx.config.crossover_rate;
    let mutpb = ctx.config.mutation_rate;
    let n = population.len();

    (0..ctx.config.offspring_count)
        .map(|_| {
            let op: f64 = rng.random();
            if op < cxpb {
                let a = &population[rng.random_range(0..n)];
                let b = &population[rng.random_range(0..n)];
                ctx.sampler.crossover(a, b, rng).0
            } else if op < cxpb + mutpb {
                let parent = &population[rng.random_range(0..n)];
                ctx.sampler.mutate(parent, rng)
            } else {
                population[rng.random_range(0..n)].clone()
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
