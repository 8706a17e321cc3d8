//! Objective declarations.

use std::fmt;

/// Optimization direction of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Higher scores are better.
    Maximize,
    /// Lower scores are better.
    Minimize,
}

impl Direction {
    /// Maps a raw score to minimization form (lower is better).
    #[inline]
    pub fn to_min(self, score: f64) -> f64 {
        match self {
            Direction::Maximize => -score,
            Direction::Minimize => score,
        }
    }

    /// Builds a direction from a signed weight (`+1` maximize, `-1` minimize).
    pub fn from_weight(weight: f64) -> Self {
        if weight < 0.0 {
            Direction::Minimize
        } else {
            Direction::Maximize
        }
    }
}

/// A named quality metric and its optimization direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Metric name, e.g. `"silhouette"`.
    pub name: String,
    /// Whether the metric is maximized or minimized.
    pub direction: Direction,
}

/// Cluster validity indices with a well-known direction.
const KNOWN_METRICS: &[(&str, Direction)] = &[
    ("baker_hubert_gamma", Direction::Minimize),
    ("banfeld_raferty", Direction::Minimize),
    ("c_index", Direction::Minimize),
    ("calinski_harabasz", Direction::Maximize),
    ("davies_bouldin", Direction::Minimize),
    ("dunns_index", Direction::Maximize),
    ("g_plus_index", Direction::Minimize),
    ("i_index", Direction::Maximize),
    ("mcclain_rao", Direction::Minimize),
    ("modified_hubert_t", Direction::Maximize),
    ("pbm_index", Direction::Maximize),
    ("point_biserial", Direction::Maximize),
    ("ratkowsky_lance", Direction::Maximize),
    ("ray_turi", Direction::Minimize),
    ("s_dbw", Direction::Minimize),
    ("scott_symons", Direction::Minimize),
    ("silhouette", Direction::Maximize),
    ("tau_index", Direction::Maximize),
    ("wemmert_gancarski", Direction::Maximize),
    ("xie_beni", Direction::Minimize),
];

impl Objective {
    /// Creates an objective to maximize.
    pub fn maximize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Maximize,
        }
    }

    /// Creates an objective to minimize.
    pub fn minimize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: Direction::Minimize,
        }
    }

    /// Creates an objective from a signed weight: negative minimizes,
    /// anything else maximizes.
    pub fn weighted(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            direction: Direction::from_weight(weight),
        }
    }

    /// Resolves a known cluster validity index by name.
    ///
    /// Matching ignores case and treats `-` like `_`. A few legacy aliases
    /// (`iindex`, `sdbw`, `calinski_harabasz_score`) are accepted.
    ///
    /// ```
    /// use u_hypertune::search::{Direction, Objective};
    ///
    /// let obj = Objective::known("Davies-Bouldin").unwrap();
    /// assert_eq!(obj.name, "davies_bouldin");
    /// assert_eq!(obj.direction, Direction::Minimize);
    /// assert!(Objective::known("accuracy").is_none());
    /// ```
    pub fn known(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        let canonical = match normalized.as_str() {
            "iindex" => "i_index",
            "sdbw" => "s_dbw",
            "calinski_harabasz_score" => "calinski_harabasz",
            other => other,
        };
        KNOWN_METRICS
            .iter()
            .find(|(metric, _)| *metric == canonical)
            .map(|&(metric, direction)| Self {
                name: metric.to_string(),
                direction,
            })
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Maximize => "max",
            Direction::Minimize => "min",
        };
        write!(f, "{}({})", arrow, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_min() {
        assert_eq!(Direction::Maximize.to_min(2.0), -2.0);
        assert_eq!(Direction::Minimize.to_min(2.0), 2.0);
    }

    #[test]
    fn test_from_weight() {
        assert_eq!(Direction::from_weight(1.0), Direction::Maximize);
        assert_eq!(Direction::from_weight(-1.0), Direction::Minimize);
    }

    #[test]
    fn test_weighted() {
        assert_eq!(Objective::weighted("sil", 1.0), Objective::maximize("sil"));
        assert_eq!(Objective::weighted("db", -1.0), Objective::minimize("db"));
    }

    #[test]
    fn test_known_aliases() {
        assert_eq!(Objective::known("SDBW").map(|o| o.name), Some("s_dbw".into()));
        assert_eq!(
            Objective::known("IIndex").map(|o| o.direction),
            Some(Direction::Maximize)
        );
        assert_eq!(
            Objective::known("calinski_harabasz_score").map(|o| o.name),
            Some("calinski_harabasz".into())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Objective::maximize("silhouette").to_string(), "max(silhouette)");
        assert_eq!(Objective::minimize("xie_beni").to_string(), "min(xie_beni)");
    }
}
