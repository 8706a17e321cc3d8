//! Parameter domains and per-family search spaces.

use crate::partition::Partition;
use crate::search::{ParamSet, ParamValue};
use rand::Rng;

/// The set of values one parameter may take.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDomain {
    /// Integers in `[low, high]` (inclusive).
    Int { low: i64, high: i64 },
    /// Reals in `[low, high)`.
    Float { low: f64, high: f64 },
    /// The grid `low, low + step, ...` strictly below `high`.
    Stepped { low: f64, high: f64, step: f64 },
    /// One of an explicit list of values.
    Choice(Vec<ParamValue>),
}

impl ParamDomain {
    /// Draws one value uniformly from the domain.
    ///
    /// A degenerate range (`low == high`) always yields `low`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match self {
            ParamDomain::Int { low, high } => ParamValue::Int(rng.random_range(*low..=*high)),
            ParamDomain::Float { low, high } => {
                if low < high {
                    ParamValue::Float(rng.random_range(*low..*high))
                } else {
                    ParamValue::Float(*low)
                }
            }
            ParamDomain::Stepped { low, high, step } => {
                let mut steps = ((high - low) / step).ceil().max(1.0) as u64;
                // rounding in the division can add one point at `high`
                while steps > 1 && low + (steps - 1) as f64 * step >= *high {
                    steps -= 1;
                }
                let k = rng.random_range(0..steps);
                ParamValue::Float(low + k as f64 * step)
            }
            ParamDomain::Choice(values) => values[rng.random_range(0..values.len())].clone(),
        }
    }

    /// Whether `value` can be produced by [`sample`](Self::sample).
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParamDomain::Int { low, high }, ParamValue::Int(v)) => (*low..=*high).contains(v),
            (ParamDomain::Float { low, high }, ParamValue::Float(v)) => {
                (*low..*high).contains(v) || (low == high && v == low)
            }
            (ParamDomain::Stepped { low, high, .. }, ParamValue::Float(v)) => {
                (*low..*high).contains(v) || v == low
            }
            (ParamDomain::Choice(values), v) => values.contains(v),
            _ => false,
        }
    }
}

/// Named parameter domains of one algorithm family.
///
/// # Example
///
/// ```
/// use u_hypertune::space::SearchSpace;
///
/// let space = SearchSpace::new()
///     .add_int("min_samples", 5, 20)
///     .add_float("eps", 0.1, 2.0)
///     .add_choice("metric", ["euclidean", "manhattan"]);
/// assert_eq!(space.len(), 3);
/// assert!(space.get("eps").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchSpace {
    parameters: Vec<(String, ParamDomain)>,
}

impl SearchSpace {
    /// Creates an empty space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    pub fn add(mut self, name: impl Into<String>, domain: ParamDomain) -> Self {
        let name = name.into();
        match self.parameters.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = domain,
            None => self.parameters.push((name, domain)),
        }
        self
    }

    /// Adds an integer parameter over `[low, high]`.
    ///
    /// # Panics
    /// Panics if `low > high`.
    pub fn add_int(self, name: impl Into<String>, low: i64, high: i64) -> Self {
        assert!(low <= high, "empty integer range [{low}, {high}]");
        self.add(name, ParamDomain::Int { low, high })
    }

    /// Adds a real parameter over `[low, high)`.
    ///
    /// # Panics
    /// Panics if `low > high`.
    pub fn add_float(self, name: impl Into<String>, low: f64, high: f64) -> Self {
        assert!(low <= high, "empty real range [{low}, {high})");
        self.add(name, ParamDomain::Float { low, high })
    }

    /// Adds a real parameter restricted to a grid of spacing `step`.
    ///
    /// # Panics
    /// Panics if `low > high` or `step <= 0`.
    pub fn add_stepped(self, name: impl Into<String>, low: f64, high: f64, step: f64) -> Self {
        assert!(low <= high, "empty real range [{low}, {high})");
        assert!(step > 0.0, "grid step must be positive");
        self.add(name, ParamDomain::Stepped { low, high, step })
    }

    /// Adds a categorical parameter.
    ///
    /// # Panics
    /// Panics if `values` is empty.
    pub fn add_choice<I, V>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let values: Vec<ParamValue> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "a choice needs at least one value");
        self.add(name, ParamDomain::Choice(values))
    }

    /// Domain of `name`, if declared.
    pub fn get(&self, name: &str) -> Option<&ParamDomain> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    /// Declared parameter names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|(n, _)| n.as_str())
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Samples the fields of `partition`, and only those.
    ///
    /// # Panics
    /// Panics if the partition names a parameter this space does not
    /// declare.
    pub fn sample<R: Rng>(&self, partition: &Partition, rng: &mut R) -> ParamSet {
        let mut set = ParamSet::new();
        for name in partition.names() {
            let domain = self
                .get(name)
                .unwrap_or_else(|| panic!("parameter `{name}` is not declared in the search space"));
            set.insert(name.clone(), domain.sample(rng));
        }
        set
    }
}
