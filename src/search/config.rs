//! Search configuration.
//!
//! [`SearchConfig`] holds every knob of the per-partition control loops and
//! of the final cross-partition merge.

use crate::error::SearchError;
use std::time::Duration;

/// How many winners the final selector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResultMode {
    /// The single best configuration.
    Single,
    /// A ranked set of ten configurations.
    #[default]
    Multi,
}

impl ResultMode {
    /// Number of individuals the final selection keeps.
    pub fn count(self) -> usize {
        match self {
            ResultMode::Single => 1,
            ResultMode::Multi => 10,
        }
    }
}

/// Configuration of a partitioned search.
///
/// # Defaults
///
/// ```
/// use u_hypertune::search::{ResultMode, SearchConfig};
/// use std::time::Duration;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.time_budget, Duration::from_secs(60));
/// assert_eq!(config.result_mode, ResultMode::Multi);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_hypertune::search::SearchConfig;
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_population_size(20)
///     .with_time_budget(Duration::from_secs(5))
///     .with_crossover_rate(0.6)
///     .with_mutation_rate(0.4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Individuals kept per generation by random search (`N`), and size of
    /// the initial population of every partition.
    pub population_size: usize,

    /// Fresh individuals sampled per random-search generation (`S`).
    ///
    /// `None` uses `population_size`.
    pub search_width: Option<usize>,

    /// Wall-clock budget per partition.
    ///
    /// Checked once per generation, so a run may overshoot by the cost of
    /// one generation.
    pub time_budget: Duration,

    /// Probability that an offspring is produced by crossover (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability that an offspring is produced by mutation (0.0–1.0).
    ///
    /// Whatever remains of `1 - crossover_rate - mutation_rate` is the
    /// probability of a plain clone.
    pub mutation_rate: f64,

    /// Offspring produced per evolutionary generation (`K`).
    pub offspring_count: usize,

    /// Individuals surviving each evolutionary generation (μ+λ).
    pub survivor_count: usize,

    /// How many of each partition's best individuals enter the final pool.
    pub pool_per_partition: usize,

    /// Size of the final result.
    pub result_mode: ResultMode,

    /// Whether to evaluate a worker's invalid individuals in parallel
    /// using rayon.
    pub parallel: bool,

    /// Master seed for reproducibility. Every worker derives its own seed
    /// from it.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            search_width: None,
            time_budget: Duration::from_secs(60),
            crossover_rate: 0.7,
            mutation_rate: 0.3,
            offspring_count: 10,
            survivor_count: 10,
            pool_per_partition: 10,
            result_mode: ResultMode::Multi,
            parallel: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the random-search width.
    pub fn with_search_width(mut self, n: usize) -> Self {
        self.search_width = Some(n);
        self
    }

    /// Sets the per-partition time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of offspring per evolutionary generation.
    pub fn with_offspring_count(mut self, n: usize) -> Self {
        self.offspring_count = n;
        self
    }

    /// Sets the number of survivors per evolutionary generation.
    pub fn with_survivor_count(mut self, n: usize) -> Self {
        self.survivor_count = n;
        self
    }

    /// Sets how many individuals each partition contributes to the final
    /// pool.
    pub fn with_pool_per_partition(mut self, n: usize) -> Self {
        self.pool_per_partition = n;
        self
    }

    /// Sets the result mode.
    pub fn with_result_mode(mut self, mode: ResultMode) -> Self {
        self.result_mode = mode;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective random-search width.
    pub fn effective_search_width(&self) -> usize {
        self.search_width.unwrap_or(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] describing the first offending field.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.population_size == 0 {
            return Err(SearchError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.effective_search_width() == 0 {
            return Err(SearchError::InvalidConfig(
                "search_width must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return Err(SearchError::InvalidConfig(
                "crossover_rate and mutation_rate must lie in [0, 1]".into(),
            ));
        }
        if self.crossover_rate + self.mutation_rate > 1.0 + 1e-9 {
            return Err(SearchError::InvalidConfig(format!(
                "crossover_rate + mutation_rate must not exceed 1 (got {})",
                self.crossover_rate + self.mutation_rate
            )));
        }
        if self.offspring_count == 0 {
            return Err(SearchError::InvalidConfig(
                "offspring_count must be at least 1".into(),
            ));
        }
        if self.survivor_count == 0 {
            return Err(SearchError::InvalidConfig(
                "survivor_count must be at least 1".into(),
            ));
        }
        if self.pool_per_partition == 0 {
            return Err(SearchError::InvalidConfig(
                "pool_per_partition must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
