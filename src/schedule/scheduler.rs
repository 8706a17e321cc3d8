//! Concurrent per-partition execution.
//!
//! [`PartitionScheduler`] launches one scoped OS thread per [`SearchJob`].
//! Workers share only immutable collaborators (generator, evaluator,
//! progress sink) and hand their final population back through the join
//! handle; the scheduler thread alone assembles the [`ResultStore`].

use super::job::{PartitionId, SearchJob};
use super::progress::ProgressSink;
use super::store::ResultStore;
use crate::search::{
    CandidateGenerator, ConfigSampler, Direction, FitnessEvaluator, Objective, SearchConfig,
    SearchContext, SearchOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Runs search jobs concurrently, one worker thread per partition.
///
/// # Usage
///
/// ```ignore
/// let scheduler = PartitionScheduler::new(&generator, &evaluator, &TracingProgress, &objectives, config);
/// let store = scheduler.run(jobs);
/// ```
pub struct PartitionScheduler<'a, G, E: ?Sized, P: ?Sized> {
    generator: &'a G,
    evaluator: &'a E,
    progress: &'a P,
    directions: Vec<Direction>,
    config: SearchConfig,
}

impl<'a, G, E, P> PartitionScheduler<'a, G, E, P>
where
    G: CandidateGenerator,
    E: FitnessEvaluator<G::Config> + ?Sized,
    P: ProgressSink + ?Sized,
{
    /// Creates a scheduler over shared collaborators.
    pub fn new(
        generator: &'a G,
        evaluator: &'a E,
        progress: &'a P,
        objectives: &[Objective],
        config: SearchConfig,
    ) -> Self {
        Self {
            generator,
            evaluator,
            progress,
            directions: objectives.iter().map(|o| o.direction).collect(),
            config,
        }
    }

    /// The loop parameters every worker runs with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs every job to its deadline and collects the final populations.
    ///
    /// Blocks until all workers have finished. A worker that panics is
    /// logged and registered with an empty population; the others are
    /// unaffected.
    pub fn run(&self, jobs: Vec<SearchJob<G::Config>>) -> ResultStore<G::Config> {
        self.run_with_cancel(jobs, None)
    }

    /// Runs every job with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, each worker stops at the end of its
    /// current generation and reports the population it holds.
    #[tracing::instrument(skip_all, fields(jobs = jobs.len()))]
    pub fn run_with_cancel(
        &self,
        jobs: Vec<SearchJob<G::Config>>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> ResultStore<G::Config> {
        let master_seed = self.config.seed.unwrap_or_else(rand::random);
        let mut seeder = StdRng::seed_from_u64(master_seed);
        let cancel = cancel.as_deref();
        let mut store = ResultStore::new();

        thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .into_iter()
                .map(|job| {
                    let id = job.id;
                    let worker_seed: u64 = seeder.random();
                    let handle = scope.spawn(move || self.work(job, worker_seed, cancel));
                    (id, handle)
                })
                .collect();

            for (id, handle) in handles {
                match handle.join() {
                    Ok(outcome) => {
                        info!(
                            partition = %id,
                            generations = outcome.generations,
                            individuals = outcome.population.len(),
                            cancelled = outcome.cancelled,
                            "worker finished"
                        );
                        store.register(id, outcome);
                    }
                    Err(payload) => {
                        error!(
                            partition = %id,
                            reason = %panic_message(payload.as_ref()),
                            "worker crashed; partition contributes no individuals"
                        );
                        store.register(id, SearchOutcome::empty());
                    }
                }
            }
        });

        store
    }

    fn work(
        &self,
        job: SearchJob<G::Config>,
        seed: u64,
        cancel: Option<&AtomicBool>,
    ) -> SearchOutcome<G::Config> {
        let SearchJob {
            id,
            family,
            partition,
            deadline,
            population,
            strategy,
        } = job;

        info!(partition = %id, %strategy, params = %partition, "worker started");

        let ctx = SearchContext {
            sampler: ConfigSampler::new(self.generator, &family, &partition),
            evaluator: self.evaluator,
            directions: &self.directions,
            config: &self.config,
            progress: self.progress,
            partition_id: id,
            deadline,
            cancel,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        strategy.run(&ctx, population, &mut rng)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Partition ids of `store` whose population is empty.
pub fn empty_partitions<C>(store: &ResultStore<C>) -> Vec<PartitionId> {
    store
        .iter()
        .filter(|(_, population)| population.is_empty())
        .map(|(id, _)| id)
        .collect()
}
