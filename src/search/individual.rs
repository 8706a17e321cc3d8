//! Individuals and populations.

/// A candidate configuration with its cached multi-objective fitness.
///
/// `fitness == None` means "not evaluated yet": such an individual is
/// *invalid* and is scored at the next evaluation step. A fitness vector is
/// only ever replaced as a whole.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Individual<C> {
    config: C,
    fitness: Option<Vec<f64>>,
}

/// Ordered sequence of individuals. Order only matters for tie-breaks and
/// for the best-first layout left by selection.
pub type Population<C> = Vec<Individual<C>>;

impl<C> Individual<C> {
    /// Wraps an unevaluated configuration.
    pub fn new(config: C) -> Self {
        Self {
            config,
            fitness: None,
        }
    }

    /// Wraps a configuration with a known fitness.
    pub fn with_fitness(config: C, fitness: Vec<f64>) -> Self {
        Self {
            config,
            fitness: Some(fitness),
        }
    }

    /// The wrapped configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Unwraps the configuration.
    pub fn into_config(self) -> C {
        self.config
    }

    /// Cached objective scores, if evaluated.
    pub fn fitness(&self) -> Option<&[f64]> {
        self.fitness.as_deref()
    }

    /// Whether the fitness is up to date.
    pub fn is_valid(&self) -> bool {
        self.fitness.is_some()
    }

    /// Replaces the fitness vector.
    pub fn set_fitness(&mut self, fitness: Vec<f64>) {
        self.fitness = Some(fitness);
    }

    /// Drops the cached fitness, forcing re-evaluation.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }
}
