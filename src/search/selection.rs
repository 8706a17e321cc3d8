//! NSGA-II survivor selection.
//!
//! The same operation serves per-generation replacement inside a partition
//! and the final cross-partition merge.

use super::individual::{Individual, Population};
use super::multi_objective::{crowding_distance, non_dominated_sort, to_minimization};
use super::objective::Direction;

/// Selects `k` individuals by Pareto rank, breaking the last front by
/// crowding distance.
///
/// Fronts are taken whole, best first, while they fit. The first front
/// that does not fit is sorted by descending crowding distance (ties keep
/// population order) and truncated to fill the remaining slots. The
/// output is best-first.
///
/// When `k >= population.len()` every individual is returned, reordered
/// front by front. Individuals without a fitness are ranked as if they
/// scored zero on every objective.
///
/// # Panics
/// Panics if an evaluated individual's fitness length differs from
/// `directions.len()`.
///
/// # Example
///
/// ```
/// use u_hypertune::search::{select, Direction, Individual};
///
/// let population = vec![
///     Individual::with_fitness("a", vec![1.0, 1.0]),
///     Individual::with_fitness("b", vec![3.0, 3.0]),
///     Individual::with_fitness("c", vec![2.0, 2.0]),
/// ];
/// let best = select(population, 1, &[Direction::Maximize, Direction::Maximize]);
/// assert_eq!(*best[0].config(), "b");
/// ```
pub fn select<C>(population: Population<C>, k: usize, directions: &[Direction]) -> Population<C> {
    if k == 0 || population.is_empty() {
        return Vec::new();
    }

    let arity = directions.len();
    let objectives: Vec<Vec<f64>> = population
        .iter()
        .map(|ind| match ind.fitness() {
            Some(f) => to_minimization(f, directions),
            None => vec![0.0; arity],
        })
        .collect();

    let sorted = non_dominated_sort(&objectives);
    let mut chosen: Vec<usize> = Vec::with_capacity(k.min(population.len()));

    for front in &sorted.fronts {
        let remaining = k - chosen.len();
        if remaining == 0 {
            break;
        }
        if front.len() <= remaining {
            chosen.extend_from_slice(front);
            continue;
        }

        let front_objectives: Vec<Vec<f64>> =
            front.iter().map(|&i| objectives[i].clone()).collect();
        let distances = crowding_distance(&front_objectives);

        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));
        chosen.extend(order.into_iter().take(remaining).map(|pos| front[pos]));
        break;
    }

    take_in_order(population, &chosen)
}

/// Moves the individuals at `indices` out of `population`, in that order.
fn take_in_order<C>(population: Population<C>, indices: &[usize]) -> Population<C> {
    let mut slots: Vec<Option<Individual<C>>> = population.into_iter().map(Some).collect();
    indices
        .iter()
        .filter_map(|&i| slots[i].take())
        .collect()
}
