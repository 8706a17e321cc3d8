//! Parameter catalog: which parameters of each algorithm family are tuned.

use crate::error::SearchError;
use std::collections::BTreeMap;

/// Tunable parameters of one algorithm family.
///
/// - **prime** parameters are independently meaningful and each one seeds
///   its own hyper-partitions.
/// - **bench** parameters are secondary and only ever searched together
///   with a prime parameter.
///
/// Both lists are ordered sets: duplicates are dropped on construction,
/// first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmSpec {
    family: String,
    display_name: String,
    prime: Vec<String>,
    bench: Vec<String>,
}

impl AlgorithmSpec {
    /// Creates a spec. The display name defaults to the family name.
    ///
    /// ```
    /// use u_hypertune::partition::AlgorithmSpec;
    ///
    /// let spec = AlgorithmSpec::new("kmeans", ["n_clusters"], ["n_init", "max_iter"]);
    /// assert_eq!(spec.prime(), ["n_clusters"]);
    /// assert_eq!(spec.bench(), ["n_init", "max_iter"]);
    /// ```
    pub fn new<P, B>(family: impl Into<String>, prime: P, bench: B) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let family = family.into();
        Self {
            display_name: family.clone(),
            family,
            prime: dedup(prime),
            bench: dedup(bench),
        }
    }

    /// Sets a human-readable name, e.g. `"K-Means Clustering"`.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Short family identifier used as catalog key.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Human-readable family name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Prime parameters, in declaration order.
    pub fn prime(&self) -> &[String] {
        &self.prime
    }

    /// Bench parameters, in declaration order.
    pub fn bench(&self) -> &[String] {
        &self.bench
    }

    /// Whether `name` is a prime or bench parameter of this family.
    pub fn declares(&self, name: &str) -> bool {
        self.prime.iter().chain(self.bench.iter()).any(|p| p == name)
    }
}

fn dedup<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Lookup table from family name to [`AlgorithmSpec`].
///
/// Loaded once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ParameterCatalog {
    specs: BTreeMap<String, AlgorithmSpec>,
}

impl ParameterCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the built-in clustering families.
    ///
    /// | family      | prime                                   | bench                 |
    /// |-------------|-----------------------------------------|-----------------------|
    /// | `kmeans`    | n_clusters                              | n_init, max_iter      |
    /// | `meanshift` | bandwidth                               | max_iter              |
    /// | `db`        | eps, min_samples                        |                       |
    /// | `ap`        | damping                                 |                       |
    /// | `spectral`  | n_clusters                              |                       |
    /// | `birch`     | threshold, branching_factor, n_clusters | n_clusters            |
    /// | `ag`        | distance_threshold, n_clusters          |                       |
    /// | `optics`    | min_samples, xi, eps                    | min_samples           |
    pub fn builtin() -> Self {
        const NONE: [&str; 0] = [];
        Self::new()
            .with(
                AlgorithmSpec::new("kmeans", ["n_clusters"], ["n_init", "max_iter"])
                    .with_display_name("K-Means Clustering"),
            )
            .with(
                AlgorithmSpec::new("meanshift", ["bandwidth"], ["max_iter"])
                    .with_display_name("MeanShift Clustering"),
            )
            .with(AlgorithmSpec::new("db", ["eps", "min_samples"], NONE).with_display_name("DBSCAN"))
            .with(
                AlgorithmSpec::new("ap", ["damping"], NONE)
                    .with_display_name("Affinity Propagation"),
            )
            .with(
                AlgorithmSpec::new("spectral", ["n_clusters"], NONE)
                    .with_display_name("Spectral Clustering"),
            )
            .with(
                AlgorithmSpec::new(
                    "birch",
                    ["threshold", "branching_factor", "n_clusters"],
                    ["n_clusters"],
                )
                .with_display_name("Birch Clustering"),
            )
            .with(
                AlgorithmSpec::new("ag", ["distance_threshold", "n_clusters"], NONE)
                    .with_display_name("Agglomerative Clustering"),
            )
            .with(
                AlgorithmSpec::new("optics", ["min_samples", "xi", "eps"], ["min_samples"])
                    .with_display_name("OPTICS"),
            )
    }

    /// Adds (or replaces) a family. Builder style.
    pub fn with(mut self, spec: AlgorithmSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Adds (or replaces) a family.
    pub fn insert(&mut self, spec: AlgorithmSpec) {
        self.specs.insert(spec.family.clone(), spec);
    }

    /// Looks up a family.
    ///
    /// # Errors
    /// [`SearchError::UnknownAlgorithm`] if the family is not registered.
    pub fn get(&self, family: &str) -> Result<&AlgorithmSpec, SearchError> {
        self.specs
            .get(family)
            .ok_or_else(|| SearchError::UnknownAlgorithm(family.to_string()))
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_families() {
        let catalog = ParameterCatalog::builtin();
        assert_eq!(catalog.len(), 8);
        let families: Vec<&str> = catalog.families().collect();
        assert_eq!(
            families,
            vec!["ag", "ap", "birch", "db", "kmeans", "meanshift", "optics", "spectral"]
        );
    }

    #[test]
    fn test_builtin_kmeans() {
        let catalog = ParameterCatalog::builtin();
        let spec = catalog.get("kmeans").expect("kmeans is built in");
        assert_eq!(spec.prime(), ["n_clusters"]);
        assert_eq!(spec.bench(), ["n_init", "max_iter"]);
        assert_eq!(spec.display_name(), "K-Means Clustering");
    }

    #[test]
    fn test_unknown_family() {
        let catalog = ParameterCatalog::builtin();
        assert_eq!(
            catalog.get("hdbscan"),
            Err(SearchError::UnknownAlgorithm("hdbscan".into()))
        );
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let spec = AlgorithmSpec::new("x", ["a", "b", "a"], ["c", "c"]);
        assert_eq!(spec.prime(), ["a", "b"]);
        assert_eq!(spec.bench(), ["c"]);
    }

    #[test]
    fn test_declares() {
        let spec = AlgorithmSpec::new("x", ["a"], ["b"]);
        assert!(spec.declares("a"));
        assert!(spec.declares("b"));
        assert!(!spec.declares("c"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut catalog = ParameterCatalog::new();
        catalog.insert(AlgorithmSpec::new("x", ["a"], ["b"]));
        catalog.insert(AlgorithmSpec::new("x", ["z"], ["b"]));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x").map(|s| s.prime().to_vec()), Ok(vec!["z".to_string()]));
    }
}
