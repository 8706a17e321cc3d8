//! Hyper-partition generation.

use super::catalog::AlgorithmSpec;
use std::collections::BTreeSet;
use std::fmt;

/// A non-empty set of parameter names searched as one sub-problem.
///
/// Names keep their insertion order (the prime parameter first), but two
/// partitions compare equal when they hold the same names in any order.
#[derive(Debug, Clone, Eq)]
pub struct Partition {
    names: Vec<String>,
}

impl Partition {
    /// Builds a partition, dropping repeated names.
    ///
    /// Returns `None` if no name is given.
    pub fn new<I>(names: I) -> Option<Self>
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
        if out.is_empty() {
            None
        } else {
            Some(Self { names: out })
        }
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of parameters. Always at least 1.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the partition tunes `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The names as an order-independent set.
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.names.iter().map(String::as_str).collect()
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.name_set() == other.name_set()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.names.join(", "))
    }
}

/// Derives the hyper-partitions of one algorithm family.
///
/// For every prime parameter `p`, in declaration order:
///
/// 1. `{p}`
/// 2. `{p} ∪ bench`, if there are bench parameters and `p` is not one of them
/// 3. `{p, b}` for every bench parameter `b ≠ p`, if there is more than
///    one bench parameter
///
/// Candidates equal (as sets) to an earlier partition are skipped.
/// Deterministic: the same spec always yields the same list.
///
/// ```
/// use u_hypertune::partition::{generate_partitions, AlgorithmSpec};
///
/// let spec = AlgorithmSpec::new("x", ["a", "b"], ["c"]);
/// let parts: Vec<String> = generate_partitions(&spec)
///     .iter()
///     .map(|p| p.to_string())
///     .collect();
/// assert_eq!(parts, ["{a}", "{a, c}", "{b}", "{b, c}"]);
/// ```
pub fn generate_partitions(spec: &AlgorithmSpec) -> Vec<Partition> {
    let bench = spec.bench();
    let mut partitions: Vec<Partition> = Vec::new();

    let mut push = |candidate: Option<Partition>| {
        if let Some(p) = candidate {
            if !partitions.contains(&p) {
                partitions.push(p);
            }
        }
    };

    for prime in spec.prime() {
        push(Partition::new([prime.as_str()]));

        if !bench.is_empty() && !bench.contains(prime) {
            push(Partition::new(
                std::iter::once(prime.as_str()).chain(bench.iter().map(String::as_str)),
            ));
        }

        if bench.len() > 1 {
            for b in bench.iter().filter(|b| *b != prime) {
                push(Partition::new([prime.as_str(), b.as_str()]));
            }
        }
    }

    partitions
}
