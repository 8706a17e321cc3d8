//! Fitness evaluation with failure absorption.
//!
//! A configuration that cannot be scored receives a zero vector of the
//! expected arity. That covers evaluator errors and panics, score vectors of
//! the wrong length, and non-finite scores (NaN marks a failed metric). Nothing is retried: evolutionary pressure discards
//! such configurations on its own.

use super::individual::Individual;
use super::types::FitnessEvaluator;
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Scores one configuration, never failing.
pub fn evaluate_config<C, E>(evaluator: &E, config: &C, arity: usize) -> Vec<f64>
where
    E: FitnessEvaluator<C> + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(config))) {
        Ok(Ok(scores)) if scores.len() == arity && scores.iter().all(|s| s.is_finite()) => {
            scores
        }
        Ok(Ok(scores)) if scores.len() == arity => {
            warn!(?scores, "evaluator returned non-finite scores; scoring as zero");
            vec![0.0; arity]
        }
        Ok(Ok(scores)) => {
            warn!(
                expected = arity,
                got = scores.len(),
                "evaluator returned a score vector of the wrong length; scoring as zero"
            );
            vec![0.0; arity]
        }
        Ok(Err(err)) => {
            warn!(error = %err, "evaluation failed; scoring as zero");
            vec![0.0; arity]
        }
        Err(_) => {
            warn!("evaluator panicked; scoring as zero");
            vec![0.0; arity]
        }
    }
}

/// Evaluates every individual whose fitness is missing.
///
/// Individuals that already carry a fitness are skipped. Returns the
/// number of evaluations performed.
pub fn evaluate_invalid<C, E>(
    evaluator: &E,
    population: &mut [Individual<C>],
    arity: usize,
    parallel: bool,
) -> usize
where
    C: Send + Sync,
    E: FitnessEvaluator<C> + ?Sized,
{
    if parallel {
        population
            .par_iter_mut()
            .filter(|ind| !ind.is_valid())
            .map(|ind| {
                let f = evaluate_config(evaluator, ind.config(), arity);
                ind.set_fitness(f);
            })
            .count()
    } else {
        let mut evaluated = 0;
        for ind in population.iter_mut().filter(|ind| !ind.is_valid()) {
            let f = evaluate_config(evaluator, ind.config(), arity);
            ind.set_fitness(f);
            evaluated += 1;
        }
        evaluated
    }
}
