//! Cross-partition merge of final populations.

use crate::error::SearchError;
use crate::schedule::ResultStore;
use crate::search::{select, Direction, Objective, Population};

/// Pools the best `per_partition` individuals of every partition (in
/// partition-id order) and keeps the `count` best of the pool.
///
/// Partition populations are already best-first, so taking a prefix takes
/// each partition's best.
///
/// # Errors
/// [`SearchError::EmptyResult`] if no partition contributed an individual.
pub fn select_final<C>(
    store: ResultStore<C>,
    objectives: &[Objective],
    count: usize,
    per_partition: usize,
) -> Result<Population<C>, SearchError> {
    let pool: Population<C> = store
        .into_populations()
        .flat_map(|(_, population)| population.into_iter().take(per_partition))
        .collect();

    if pool.is_empty() {
        return Err(SearchError::EmptyResult);
    }

    let directions: Vec<Direction> = objectives.iter().map(|o| o.direction).collect();
    Ok(select(pool, count, &directions))
}
