//! Search requests and results.

use crate::error::SearchError;
use crate::search::{Objective, Population, ResultMode};
use std::time::Duration;

/// What a caller asks the tuner for.
///
/// # Example
///
/// ```
/// use u_hypertune::search::{Objective, ResultMode};
/// use u_hypertune::tuner::SearchRequest;
///
/// let request = SearchRequest::new(
///     "kmeans",
///     vec![
///         Objective::maximize("silhouette"),
///         Objective::minimize("davies_bouldin"),
///         Objective::maximize("calinski_harabasz"),
///     ],
/// )
/// .with_time_budget_secs(30.0)
/// .with_result_mode(ResultMode::Single);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    /// Algorithm family to tune, as registered in the catalog.
    pub family: String,

    /// Wall-clock budget per partition, in seconds.
    pub time_budget_secs: f64,

    /// Population size of every partition.
    pub population_size: usize,

    /// One winner or a ranked set.
    pub result_mode: ResultMode,

    /// Quality metrics, in the order the evaluator returns its scores.
    pub objectives: Vec<Objective>,
}

impl SearchRequest {
    /// Creates a request with a 60 s budget, population 10, multi result.
    pub fn new(family: impl Into<String>, objectives: Vec<Objective>) -> Self {
        Self {
            family: family.into(),
            time_budget_secs: 60.0,
            population_size: 10,
            result_mode: ResultMode::Multi,
            objectives,
        }
    }

    /// Creates a request from `(metric, weight)` pairs, where a negative
    /// weight minimizes the metric.
    ///
    /// ```
    /// use u_hypertune::search::Direction;
    /// use u_hypertune::tuner::SearchRequest;
    ///
    /// let request = SearchRequest::from_weights("ag", [("silhouette", 1.0), ("davies_bouldin", -1.0)]);
    /// assert_eq!(request.objectives[1].direction, Direction::Minimize);
    /// ```
    pub fn from_weights<I, S>(family: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let objectives = weights
            .into_iter()
            .map(|(name, weight)| Objective::weighted(name, weight))
            .collect();
        Self::new(family, objectives)
    }

    /// Sets the time budget in seconds.
    pub fn with_time_budget_secs(mut self, secs: f64) -> Self {
        self.time_budget_secs = secs;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the result mode.
    pub fn with_result_mode(mut self, mode: ResultMode) -> Self {
        self.result_mode = mode;
        self
    }

    /// The time budget as a [`Duration`].
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] if the budget is negative, NaN or
    /// too large.
    pub fn time_budget(&self) -> Result<Duration, SearchError> {
        Duration::try_from_secs_f64(self.time_budget_secs).map_err(|err| {
            SearchError::InvalidConfig(format!(
                "time budget of {} s is not usable: {err}",
                self.time_budget_secs
            ))
        })
    }

    /// Validates the request.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] if there is no objective or the
    /// budget is unusable.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.objectives.is_empty() {
            return Err(SearchError::InvalidConfig(
                "at least one objective is required".into(),
            ));
        }
        self.time_budget().map(|_| ())
    }
}

/// The tuner's answer: 1 or 10 winning configurations, best-first.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult<C> {
    /// Family that was tuned.
    pub algorithm: String,

    /// Human-readable family name.
    pub display_name: String,

    /// Winning individuals with their fitness vectors.
    pub individuals: Population<C>,

    /// Number of hyper-partitions searched.
    pub partitions: usize,
}

impl<C> SearchResult<C> {
    /// The top-ranked individual's configuration.
    pub fn best(&self) -> Option<&C> {
        self.individuals.first().map(|ind| ind.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objectives() -> Vec<Objective> {
        vec![Objective::maximize("silhouette")]
    }

    #[test]
    fn test_defaults() {
        let request = SearchRequest::new("db", objectives());
        assert_eq!(request.family, "db");
        assert!((request.time_budget_secs - 60.0).abs() < 1e-12);
        assert_eq!(request.population_size, 10);
        assert_eq!(request.result_mode, ResultMode::Multi);
        assert_eq!(request.time_budget(), Ok(Duration::from_secs(60)));
    }

    #[test]
    fn test_from_weights_keeps_order_and_sign() {
        let request = SearchRequest::from_weights(
            "kmeans",
            [("silhouette", 1.0), ("davies_bouldin", -1.0), ("calinski_harabasz", 1.0)],
        );
        assert_eq!(
            request.objectives,
            vec![
                Objective::maximize("silhouette"),
                Objective::minimize("davies_bouldin"),
                Objective::maximize("calinski_harabasz"),
            ]
        );
        assert_eq!(request, SearchRequest::new("kmeans", request.objectives.clone()));
    }

    #[test]
    fn test_fractional_budget() {
        let request = SearchRequest::new("db", objectives()).with_time_budget_secs(0.25);
        assert_eq!(request.time_budget(), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn test_validate_rejects_bad_budget() {
        for secs in [-1.0, f64::NAN, f64::INFINITY] {
            let request = SearchRequest::new("db", objectives()).with_time_budget_secs(secs);
            assert!(
                matches!(request.validate(), Err(SearchError::InvalidConfig(_))),
                "budget {secs} accepted"
            );
        }
    }

    #[test]
    fn test_validate_requires_objectives() {
        let request = SearchRequest::new("db", Vec::new());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_best_is_first() {
        use crate::search::Individual;
        let result = SearchResult {
            algorithm: "db".into(),
            display_name: "DBSCAN".into(),
            individuals: vec![Individual::with_fitness(7u8, vec![1.0]), Individual::new(3u8)],
            partitions: 2,
        };
        assert_eq!(result.best(), Some(&7));
    }
}
