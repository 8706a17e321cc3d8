//! Core trait definitions for the search engine.
//!
//! The engine never looks inside a configuration. It reads and writes
//! named fields through [`Configuration`], draws fresh candidates from a
//! [`CandidateGenerator`], and scores them with a [`FitnessEvaluator`].

use crate::partition::Partition;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value, as exchanged through the field view of a
/// [`Configuration`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Integer-valued parameter (cluster counts, iteration limits, ...).
    Int(i64),
    /// Real-valued parameter (bandwidths, thresholds, ...).
    Float(f64),
    /// Categorical parameter.
    Text(String),
    /// Boolean switch.
    Bool(bool),
}

impl ParamValue {
    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `&str` if it is categorical.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(s) => write!(f, "{s}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A candidate configuration with a string-keyed field view.
///
/// Genetic operators only ever touch a configuration through
/// [`get`](Configuration::get) and [`set`](Configuration::set) on a
/// cloned copy, so implementations are free to store their fields in any
/// shape (a typed struct, a map, a builder for an external model).
///
/// # Implementing
///
/// ```
/// use u_hypertune::search::{Configuration, ParamValue};
///
/// #[derive(Clone, Debug)]
/// struct KMeansConfig {
///     n_clusters: i64,
/// }
///
/// impl Configuration for KMeansConfig {
///     fn get(&self, field: &str) -> Option<ParamValue> {
///         match field {
///             "n_clusters" => Some(ParamValue::Int(self.n_clusters)),
///             _ => None,
///         }
///     }
///
///     fn set(&mut self, field: &str, value: ParamValue) -> bool {
///         match (field, value) {
///             ("n_clusters", ParamValue::Int(v)) => {
///                 self.n_clusters = v;
///                 true
///             }
///             _ => false,
///         }
///     }
///
///     fn field_names(&self) -> Vec<String> {
///         vec!["n_clusters".to_string()]
///     }
/// }
/// ```
pub trait Configuration: Clone + Send + Sync + fmt::Debug {
    /// Reads a field by name. `None` if the configuration has no such field.
    fn get(&self, field: &str) -> Option<ParamValue>;

    /// Overwrites a field by name.
    ///
    /// Returns `false` and leaves the configuration unchanged when the
    /// field does not exist or the value does not fit it.
    fn set(&mut self, field: &str, value: ParamValue) -> bool;

    /// Names of all fields carried by this configuration.
    fn field_names(&self) -> Vec<String>;
}

/// Map-backed [`Configuration`]; the default currency of
/// [`SpaceGenerator`](crate::space::SpaceGenerator).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field. Builder style.
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Adds (or replaces) a field.
    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Configuration for ParamSet {
    fn get(&self, field: &str) -> Option<ParamValue> {
        self.values.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: ParamValue) -> bool {
        match self.values.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn field_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl fmt::Display for ParamSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, "}}")
    }
}

/// Produces random candidate configurations for an algorithm family.
///
/// Every call must be an independent random draw restricted to the field
/// names of `partition`: the returned configuration carries exactly those
/// fields.
///
/// # Thread Safety
///
/// One generator is shared by every partition worker, hence `Send + Sync`.
pub trait CandidateGenerator: Send + Sync {
    /// The configuration type produced.
    type Config: Configuration;

    /// Draws a fresh configuration of `family` over `partition`.
    fn sample<R: Rng>(&self, family: &str, partition: &Partition, rng: &mut R) -> Self::Config;
}

/// Scores a configuration against the search objectives.
///
/// Returns one score per objective, in the order the objectives were
/// declared. Errors (and panics) are absorbed by the engine as a zero
/// vector; they are never retried.
///
/// Closures `Fn(&C) -> Result<Vec<f64>, E>` implement this trait.
pub trait FitnessEvaluator<C>: Send + Sync {
    /// Failure type reported by the evaluator.
    type Error: fmt::Display;

    /// Fits/scores `config`.
    fn evaluate(&self, config: &C) -> Result<Vec<f64>, Self::Error>;
}

impl<C, F, E> FitnessEvaluator<C> for F
where
    F: Fn(&C) -> Result<Vec<f64>, E> + Send + Sync,
    E: fmt::Display,
{
    type Error = E;

    fn evaluate(&self, config: &C) -> Result<Vec<f64>, E> {
        self(config)
    }
}
