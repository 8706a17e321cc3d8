//! Write-once store of per-partition results.

use super::job::PartitionId;
use crate::search::{Population, SearchOutcome};
use std::collections::BTreeMap;

/// Final population of every partition, keyed by partition id.
///
/// Assembled by the scheduler thread alone after joining each worker, so
/// no locking is involved. Iteration follows partition-id order.
#[derive(Debug, Clone)]
pub struct ResultStore<C> {
    outcomes: BTreeMap<PartitionId, SearchOutcome<C>>,
}

impl<C> Default for ResultStore<C> {
    fn default() -> Self {
        Self {
            outcomes: BTreeMap::new(),
        }
    }
}

impl<C> ResultStore<C> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one partition.
    ///
    /// # Panics
    /// Panics if `id` was already registered: every partition is written
    /// exactly once.
    pub fn register(&mut self, id: PartitionId, outcome: SearchOutcome<C>) {
        let previous = self.outcomes.insert(id, outcome);
        assert!(previous.is_none(), "partition {id} registered twice");
    }

    /// Final population of `id`, best-first.
    pub fn get(&self, id: PartitionId) -> Option<&Population<C>> {
        self.outcomes.get(&id).map(|o| &o.population)
    }

    /// Generations completed by `id`.
    pub fn generations(&self, id: PartitionId) -> Option<usize> {
        self.outcomes.get(&id).map(|o| o.generations)
    }

    /// `(id, population)` pairs in partition-id order.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionId, &Population<C>)> {
        self.outcomes.iter().map(|(id, o)| (*id, &o.population))
    }

    /// `(id, generations)` pairs in partition-id order.
    pub fn generation_counts(&self) -> impl Iterator<Item = (PartitionId, usize)> + '_ {
        self.outcomes.iter().map(|(id, o)| (*id, o.generations))
    }

    /// Number of registered partitions.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no partition was registered.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Total number of individuals across all partitions.
    pub fn total_individuals(&self) -> usize {
        self.outcomes.values().map(|o| o.population.len()).sum()
    }

    /// Consumes the store, yielding populations in partition-id order.
    pub fn into_populations(self) -> impl Iterator<Item = (PartitionId, Population<C>)> {
        self.outcomes.into_iter().map(|(id, o)| (id, o.population))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Individual;

    fn outcome(values: &[u8], generations: usize) -> SearchOutcome<u8> {
        SearchOutcome {
            population: values
                .iter()
                .map(|&v| Individual::with_fitness(v, vec![v as f64]))
                .collect(),
            generations,
            cancelled: false,
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut store = ResultStore::new();
        store.register(PartitionId(1), outcome(&[1, 2], 7));
        store.register(PartitionId(0), outcome(&[3], 4));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(PartitionId(1)).map(|p| p.len()), Some(2));
        assert_eq!(store.generations(PartitionId(0)), Some(4));
        assert!(store.get(PartitionId(9)).is_none());
        assert_eq!(store.total_individuals(), 3);
    }

    #[test]
    fn test_iteration_in_id_order() {
        let mut store = ResultStore::new();
        store.register(PartitionId(2), outcome(&[], 0));
        store.register(PartitionId(0), outcome(&[1], 1));
        store.register(PartitionId(1), outcome(&[2], 2));

        let ids: Vec<PartitionId> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![PartitionId(0), PartitionId(1), PartitionId(2)]);

        let counts: Vec<usize> = store.generation_counts().map(|(_, g)| g).collect();
        assert_eq!(counts, vec![1, 2, 0]);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_double_registration_panics() {
        let mut store = ResultStore::new();
        store.register(PartitionId(0), outcome(&[1], 1));
        store.register(PartitionId(0), outcome(&[2], 1));
    }

    #[test]
    fn test_empty_outcome_counts_as_registered() {
        let mut store: ResultStore<u8> = ResultStore::new();
        store.register(PartitionId(0), SearchOutcome::empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.total_individuals(), 0);
        assert_eq!(store.get(PartitionId(0)).map(|p| p.is_empty()), Some(true));
    }
}
