//! A ready-made candidate generator backed by declarative search spaces.

use super::domain::SearchSpace;
use crate::error::SearchError;
use crate::partition::{AlgorithmSpec, Partition};
use crate::search::{CandidateGenerator, ParamSet};
use rand::Rng;
use std::collections::BTreeMap;

/// [`CandidateGenerator`] that samples [`ParamSet`]s from one
/// [`SearchSpace`] per family.
///
/// # Panics
///
/// Sampling a family without a space, or a partition naming an undeclared
/// parameter, panics. Inside a search this surfaces as a crashed worker;
/// call [`covers`](Self::covers) beforehand to reject the request instead.
#[derive(Debug, Clone, Default)]
pub struct SpaceGenerator {
    spaces: BTreeMap<String, SearchSpace>,
}

impl SpaceGenerator {
    /// Creates a generator with no family.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the space of `family`. Builder style.
    pub fn with_space(mut self, family: impl Into<String>, space: SearchSpace) -> Self {
        self.spaces.insert(family.into(), space);
        self
    }

    /// Space of `family`, if any.
    pub fn space(&self, family: &str) -> Option<&SearchSpace> {
        self.spaces.get(family)
    }

    /// Sampling ranges of the built-in clustering families for a dataset
    /// of `n_samples` rows.
    ///
    /// Cluster-count style bounds scale with the dataset (`n/4`, or `n/5`
    /// for birch) and never drop below their lower bound, so tiny datasets
    /// still get a valid, if narrow, range.
    ///
    /// ```
    /// use u_hypertune::partition::ParameterCatalog;
    /// use u_hypertune::space::SpaceGenerator;
    ///
    /// let generator = SpaceGenerator::clustering(400);
    /// let catalog = ParameterCatalog::builtin();
    /// for family in catalog.families() {
    ///     assert!(generator.covers(catalog.get(family).unwrap()).is_ok());
    /// }
    /// ```
    pub fn clustering(n_samples: usize) -> Self {
        let n = n_samples as i64;
        let quarter = (n / 4).max(2);
        let fifth = (n / 5 - 1).max(2);

        Self::new()
            .with_space(
                "kmeans",
                SearchSpace::new()
                    .add_int("n_clusters", 2, quarter)
                    .add_choice("init", ["k-means++", "random"])
                    .add_choice("algorithm", ["auto", "full", "elkan"])
                    .add_int("n_init", 10, 24)
                    .add_int("max_iter", 100, 349),
            )
            .with_space(
                "meanshift",
                SearchSpace::new()
                    .add_float("bandwidth", 0.1, 2.5)
                    .add_int("max_iter", 1, (n / 4).max(1)),
            )
            .with_space(
                "db",
                SearchSpace::new()
                    .add_float("eps", 0.1, 2.0)
                    .add_int("min_samples", 5, 20),
            )
            .with_space("ap", SearchSpace::new().add_float("damping", 0.5, 1.0))
            .with_space("spectral", SearchSpace::new().add_int("n_clusters", 2, quarter))
            .with_space(
                "ag",
                SearchSpace::new()
                    .add_int("distance_threshold", 2, quarter)
                    .add_int("n_clusters", 2, quarter),
            )
            .with_space(
                "optics",
                SearchSpace::new()
                    .add_float("min_samples", 0.01, 0.20)
                    .add_float("xi", 0.01, 1.0)
                    .add_float("eps", 0.01, 1.0),
            )
            .with_space(
                "birch",
                SearchSpace::new()
                    .add_stepped("threshold", 0.01, 0.5, 0.001)
                    .add_int("branching_factor", 2, fifth)
                    .add_int("n_clusters", 2, fifth),
            )
    }

    /// Checks that every parameter `spec` tunes has a domain.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfig`] naming the first missing family or
    /// parameter.
    pub fn covers(&self, spec: &AlgorithmSpec) -> Result<(), SearchError> {
        let space = self.space(spec.family()).ok_or_else(|| {
            SearchError::InvalidConfig(format!("no search space for family `{}`", spec.family()))
        })?;
        match spec
            .prime()
            .iter()
            .chain(spec.bench())
            .find(|name| space.get(name).is_none())
        {
            Some(missing) => Err(SearchError::InvalidConfig(format!(
                "parameter `{missing}` of `{}` has no domain",
                spec.family()
            ))),
            None => Ok(()),
        }
    }
}

impl CandidateGenerator for SpaceGenerator {
    type Config = ParamSet;

    fn sample<R: Rng>(&self, family: &str, partition: &Partition, rng: &mut R) -> ParamSet {
        match self.spaces.get(family) {
            Some(space) => space.sample(partition, rng),
            None => panic!("no search space for family `{family}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{generate_partitions, ParameterCatalog};
    use crate::search::Configuration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clustering_covers_builtin_catalog() {
        let generator = SpaceGenerator::clustering(200);
        let catalog = ParameterCatalog::builtin();
        for family in catalog.families() {
            let spec = catalog.get(family).expect("listed");
            assert!(generator.covers(spec).is_ok(), "{family} not covered");
        }
    }

    #[test]
    fn test_every_builtin_partition_samples_its_fields() {
        let generator = SpaceGenerator::clustering(200);
        let catalog = ParameterCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(21);

        for family in catalog.families() {
            let spec = catalog.get(family).expect("listed");
            for partition in generate_partitions(spec) {
                let set = generator.sample(family, &partition, &mut rng);
                let mut expected: Vec<String> = partition.names().to_vec();
                expected.sort();
                assert_eq!(set.field_names(), expected, "{family} {partition}");
            }
        }
    }

    #[test]
    fn test_cluster_bounds_scale_with_dataset() {
        let generator = SpaceGenerator::clustering(100);
        let kmeans = generator.space("kmeans").expect("built in");
        assert_eq!(
            kmeans.get("n_clusters"),
            Some(&crate::space::ParamDomain::Int { low: 2, high: 25 })
        );
        let birch = generator.space("birch").expect("built in");
        assert_eq!(
            birch.get("n_clusters"),
            Some(&crate::space::ParamDomain::Int { low: 2, high: 19 })
        );
    }

    #[test]
    fn test_tiny_dataset_keeps_valid_ranges() {
        let generator = SpaceGenerator::clustering(3);
        let partition = Partition::new(["n_clusters"]).expect("non-empty");
        let mut rng = StdRng::seed_from_u64(2);
        let set = generator.sample("spectral", &partition, &mut rng);
        assert_eq!(set.get("n_clusters").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn test_covers_reports_missing() {
        let generator = SpaceGenerator::new()
            .with_space("db", SearchSpace::new().add_float("eps", 0.1, 2.0));
        let spec = AlgorithmSpec::new("db", ["eps", "min_samples"], Vec::<String>::new());
        assert!(matches!(
            generator.covers(&spec),
            Err(SearchError::InvalidConfig(msg)) if msg.contains("min_samples")
        ));
        let other = AlgorithmSpec::new("ap", ["damping"], Vec::<String>::new());
        assert!(generator.covers(&other).is_err());
    }

    #[test]
    #[should_panic(expected = "no search space")]
    fn test_unknown_family_panics() {
        let generator = SpaceGenerator::new();
        let partition = Partition::new(["x"]).expect("non-empty");
        let mut rng = StdRng::seed_from_u64(2);
        let _ = generator.sample("x", &partition, &mut rng);
    }
}
