//! End-to-end tuning: catalog lookup → partitions → concurrent search →
//! final selection.

use super::request::{SearchRequest, SearchResult};
use super::selector::select_final;
use crate::error::SearchError;
use crate::partition::{generate_partitions, ParameterCatalog, Partition};
use crate::schedule::{
    empty_partitions, jobs_for, PartitionScheduler, ProgressEvent, ProgressSink,
};
use crate::search::{CandidateGenerator, FitnessEvaluator, SearchConfig};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Tunes algorithm families against several objectives at once.
///
/// Owns the catalog and the two external collaborators; every call to
/// [`search`](Self::search) is independent.
///
/// # Usage
///
/// ```
/// use u_hypertune::partition::ParameterCatalog;
/// use u_hypertune::schedule::NoProgress;
/// use u_hypertune::search::{Configuration, Objective, ParamSet, ResultMode};
/// use u_hypertune::space::SpaceGenerator;
/// use u_hypertune::tuner::{HyperTuner, SearchRequest};
///
/// // stand-in for "fit DBSCAN and score the labels"
/// let evaluator = |c: &ParamSet| -> Result<Vec<f64>, String> {
///     let eps = c.get("eps").and_then(|v| v.as_f64()).unwrap_or(1.0);
///     Ok(vec![-(eps - 0.5).abs(), eps, 1.0])
/// };
/// let tuner = HyperTuner::new(ParameterCatalog::builtin(), SpaceGenerator::clustering(150), evaluator);
///
/// let request = SearchRequest::new(
///     "db",
///     vec![
///         Objective::maximize("silhouette"),
///         Objective::minimize("davies_bouldin"),
///         Objective::maximize("calinski_harabasz"),
///     ],
/// )
/// .with_time_budget_secs(0.05)
/// .with_result_mode(ResultMode::Single);
///
/// let result = tuner.search(&request, &NoProgress).unwrap();
/// assert_eq!(result.individuals.len(), 1);
/// ```
pub struct HyperTuner<G, E> {
    catalog: ParameterCatalog,
    generator: G,
    evaluator: E,
    config: SearchConfig,
}

impl<G, E> HyperTuner<G, E>
where
    G: CandidateGenerator,
    E: FitnessEvaluator<G::Config>,
{
    /// Creates a tuner with the default [`SearchConfig`].
    pub fn new(catalog: ParameterCatalog, generator: G, evaluator: E) -> Self {
        Self {
            catalog,
            generator,
            evaluator,
            config: SearchConfig::default(),
        }
    }

    /// Sets the base loop parameters. Population size, time budget and
    /// result mode are taken from each request instead.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// The family catalog.
    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    /// Hyper-partitions of `family`.
    ///
    /// # Errors
    /// [`SearchError::UnknownAlgorithm`] if the family is not in the catalog.
    pub fn partitions(&self, family: &str) -> Result<Vec<Partition>, SearchError> {
        self.catalog.get(family).map(generate_partitions)
    }

    /// Loop parameters for `request`: the base config with the request's
    /// population size, time budget and result mode.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] if the merged configuration is invalid.
    pub fn config_for(&self, request: &SearchRequest) -> Result<SearchConfig, SearchError> {
        request.validate()?;
        let config = self
            .config
            .clone()
            .with_population_size(request.population_size)
            .with_time_budget(request.time_budget()?)
            .with_result_mode(request.result_mode);
        config.validate()?;
        Ok(config)
    }

    /// Runs a full search for `request`.
    ///
    /// # Errors
    /// - [`SearchError::UnknownAlgorithm`] before any worker starts
    /// - [`SearchError::InvalidConfig`] for an unusable request
    /// - [`SearchError::EmptyResult`] if every partition came back empty
    pub fn search<P>(
        &self,
        request: &SearchRequest,
        progress: &P,
    ) -> Result<SearchResult<G::Config>, SearchError>
    where
        P: ProgressSink + ?Sized,
    {
        self.search_with_cancel(request, progress, None)
    }

    /// Runs a full search with an optional cancellation token, observed by
    /// every worker at its generation boundary.
    #[tracing::instrument(skip_all, fields(family = %request.family))]
    pub fn search_with_cancel<P>(
        &self,
        request: &SearchRequest,
        progress: &P,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<G::Config>, SearchError>
    where
        P: ProgressSink + ?Sized,
    {
        let spec = self.catalog.get(&request.family)?;
        let config = self.config_for(request)?;

        progress.publish(&ProgressEvent::message(format!(
            "Generating hyper-partitions for {}...",
            spec.display_name()
        )));
        let partitions = generate_partitions(spec);
        let partition_count = partitions.len();
        progress.publish(&ProgressEvent::message(format!(
            "{partition_count} hyper-partitions generated..."
        )));

        progress.publish(&ProgressEvent::message(
            "Setting search methods for partitions...",
        ));
        let deadline = Instant::now() + config.time_budget;
        let jobs = jobs_for(spec.family(), partitions, deadline);

        progress.publish(&ProgressEvent::message(
            "Initializing search, creating workers...",
        ));
        info!(
            partitions = partition_count,
            budget = ?config.time_budget,
            objectives = request.objectives.len(),
            "starting search"
        );
        let scheduler = PartitionScheduler::new(
            &self.generator,
            &self.evaluator,
            progress,
            &request.objectives,
            config.clone(),
        );
        let store = scheduler.run_with_cancel(jobs, cancel);

        let empty = empty_partitions(&store);
        if !empty.is_empty() {
            warn!(?empty, "partitions finished without individuals");
        }

        progress.publish(&ProgressEvent::message("Getting final solutions..."));
        let individuals = select_final(
            store,
            &request.objectives,
            config.result_mode.count(),
            config.pool_per_partition,
        )?;

        info!(winners = individuals.len(), "search finished");
        Ok(SearchResult {
            algorithm: spec.family().to_string(),
            display_name: spec.display_name().to_string(),
            individuals,
            partitions: partition_count,
        })
    }
}
