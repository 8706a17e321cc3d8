//! Pareto ranking primitives.
//!
//! Works on objective vectors in **minimization form**: lower is better on
//! every axis. Use [`to_minimization`] to map raw scores with mixed
//! maximize/minimize directions into that form.
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance for diversity preservation
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use super::objective::Direction;

/// Result of non-dominated sorting.
///
/// `ranks[i]` is the Pareto rank of solution `i` (0 = non-dominated).
/// `fronts[r]` lists the indices of rank `r`, in ascending index order.
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution.
    pub ranks: Vec<usize>,

    /// Indices grouped by front.
    pub fronts: Vec<Vec<usize>>,
}

/// Maps raw scores to minimization form according to `directions`.
///
/// # Panics
/// Panics if the lengths differ.
pub fn to_minimization(scores: &[f64], directions: &[Direction]) -> Vec<f64> {
    assert_eq!(
        scores.len(),
        directions.len(),
        "score vector and objective directions must have the same length"
    );
    scores
        .iter()
        .zip(directions)
        .map(|(&s, d)| d.to_min(s))
        .collect()
}

/// Whether `a` Pareto-dominates `b` (minimization form): no worse on every
/// objective and strictly better on at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Fast non-dominated sorting.
///
/// Identical vectors do not dominate each other and share a front.
/// An empty input yields an empty result.
///
/// # Complexity
///
/// O(m · n²) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_hypertune::search::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by (3, 3)
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let m = objectives[0].len();
    debug_assert!(
        objectives.iter().all(|o| o.len() == m),
        "all objective vectors must have the same length"
    );

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&objectives[i], &objectives[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let mut ranks = vec![0usize; n];
    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();

    while !current.is_empty() {
        let rank = fronts.len();
        let mut next = Vec::new();
        for &i in &current {
            ranks[i] = rank;
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        next.sort_unstable();
        fronts.push(current);
        current = next;
    }

    NondominatedSortResult { ranks, fronts }
}

#[derive(Debug, PartialEq)]
enum Dominance {
    Left,
    Right,
    Neither,
}

fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Crowding distance of each solution within one front.
///
/// Boundary solutions of any objective get `f64::INFINITY`; interior
/// solutions accumulate the normalized gap between their neighbors.
/// Higher means more isolated. Objectives with zero range contribute
/// nothing.
///
/// # Complexity
///
/// O(m · n log n)
///
/// # Example
///
/// ```
/// use u_hypertune::search::multi_objective::crowding_distance;
///
/// let distances = crowding_distance(&[vec![1.0, 5.0], vec![3.0, 3.0], vec![5.0, 1.0]]);
/// assert!(distances[0].is_infinite());
/// assert!(distances[1].is_finite());
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];
    let mut indices: Vec<usize> = (0..n).collect();

    for obj_idx in 0..m {
        indices.sort_by(|&a, &b| {
            objectives[a][obj_idx]
                .partial_cmp(&objectives[b][obj_idx])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let range = objectives[indices[n - 1]][obj_idx] - objectives[indices[0]][obj_idx];
        if range > 0.0 {
            for w in indices.windows(3) {
                let gap = objectives[w[2]][obj_idx] - objectives[w[0]][obj_idx];
                distances[w[1]] += gap / range;
            }
        }
    }

    distances
}
