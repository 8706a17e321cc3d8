//! Per-partition search jobs.

use crate::partition::Partition;
use crate::search::{Population, StrategyKind};
use std::fmt;
use std::time::Instant;

/// Identifier of a hyper-partition within one search, displayed as `P0`,
/// `P1`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartitionId(pub usize);

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Everything one worker needs to search one partition.
///
/// Owned exclusively by its worker for the whole run. The seed population
/// may be empty or short: the worker tops it up with fresh samples before
/// the first generation.
#[derive(Debug, Clone)]
pub struct SearchJob<C> {
    /// Partition identifier, also the key in the result store.
    pub id: PartitionId,
    /// Algorithm family being tuned.
    pub family: String,
    /// Parameters this job searches over.
    pub partition: Partition,
    /// Absolute wall-clock deadline.
    pub deadline: Instant,
    /// Seed population.
    pub population: Population<C>,
    /// Control loop to run.
    pub strategy: StrategyKind,
}

impl<C> SearchJob<C> {
    /// Creates a job with an empty seed population. The strategy follows
    /// the partition size (see [`StrategyKind::for_partition`]).
    pub fn new(
        id: PartitionId,
        family: impl Into<String>,
        partition: Partition,
        deadline: Instant,
    ) -> Self {
        let strategy = StrategyKind::for_partition(&partition);
        Self {
            id,
            family: family.into(),
            partition,
            deadline,
            population: Vec::new(),
            strategy,
        }
    }

    /// Replaces the seed population.
    pub fn with_population(mut self, population: Population<C>) -> Self {
        self.population = population;
        self
    }

    /// Forces a strategy regardless of partition size.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Builds one job per partition, numbered in order, all sharing `deadline`.
pub fn jobs_for<C>(family: &str, partitions: Vec<Partition>, deadline: Instant) -> Vec<SearchJob<C>> {
    partitions
        .into_iter()
        .enumerate()
        .map(|(i, partition)| SearchJob::new(PartitionId(i), family, partition, deadline))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Individual;

    fn partition(names: &[&str]) -> Partition {
        Partition::new(names.iter().copied()).expect("non-empty")
    }

    #[test]
    fn test_partition_id_display() {
        assert_eq!(PartitionId(0).to_string(), "P0");
        assert_eq!(PartitionId(17).to_string(), "P17");
    }

    #[test]
    fn test_strategy_follows_partition_size() {
        let deadline = Instant::now();
        let single: SearchJob<u8> = SearchJob::new(PartitionId(0), "db", partition(&["eps"]), deadline);
        let multi: SearchJob<u8> =
            SearchJob::new(PartitionId(1), "db", partition(&["eps", "min_samples"]), deadline);
        assert_eq!(single.strategy, StrategyKind::RandomSearch);
        assert_eq!(multi.strategy, StrategyKind::Evolutionary);
        assert!(single.population.is_empty());
    }

    #[test]
    fn test_builders() {
        let job: SearchJob<u8> = SearchJob::new(PartitionId(0), "db", partition(&["eps"]), Instant::now())
            .with_population(vec![Individual::new(1), Individual::new(2)])
            .with_strategy(StrategyKind::Evolutionary);
        assert_eq!(job.population.len(), 2);
        assert_eq!(job.strategy, StrategyKind::Evolutionary);
    }

    #[test]
    fn test_jobs_for_numbers_in_order() {
        let deadline = Instant::now();
        let jobs: Vec<SearchJob<u8>> = jobs_for(
            "kmeans",
            vec![partition(&["n_clusters"]), partition(&["n_clusters", "init"])],
            deadline,
        );
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, PartitionId(0));
        assert_eq!(jobs[1].id, PartitionId(1));
        assert!(jobs.iter().all(|j| j.family == "kmeans" && j.deadline == deadline));
    }
}
