use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fixed_tsp_brute_force::{ParallelConfig, Strategy};

use crate::error::SweepError;

/// Largest intermediate count a sweep accepts; 10! orderings per strategy and
/// instance is already slow for the exhaustive reference.
pub const MAX_INTERMEDIATES: usize = 10;

/// Largest edge weight a sweep accepts: a route has at most
/// `MAX_INTERMEDIATES + 1` edges and its cost must fit in `u32`.
pub const MAX_DISTANCE: u32 = u32::MAX / (MAX_INTERMEDIATES as u32 + 1);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Base seed; instance `i` is generated from `seed + i`.
    pub seed: u64,
    pub instances: usize,
    pub min_nodes: usize,
    pub max_nodes: usize,
    /// Edge weights are drawn from `0..=max_distance`.
    pub max_distance: u32,
    /// Mirror every weight so `d(a, b) == d(b, a)`.
    pub symmetric: bool,
    /// Parallel strategy worker count; `None` uses every CPU.
    pub workers: Option<usize>,
    /// Bound for the memoising distance cache used by the sequential
    /// strategies; `None` runs them on the raw matrix.
    pub cache_capacity: Option<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            instances: 100,
            min_nodes: 0,
            max_nodes: 7,
            max_distance: 100,
            symmetric: false,
            workers: None,
            cache_capacity: None,
        }
    }
}

impl SweepConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, SweepError> {
        let raw = fs::read_to_string(path).map_err(|source| SweepError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        let invalid = |reason: String| Err(SweepError::InvalidConfig(reason));

        if self.instances == 0 {
            return invalid("instances must be greater than zero".into());
        }
        if self.min_nodes > self.max_nodes {
            return invalid(format!(
                "min_nodes ({}) exceeds max_nodes ({})",
                self.min_nodes, self.max_nodes
            ));
        }
        if self.max_nodes > MAX_INTERMEDIATES {
            return invalid(format!(
                "max_nodes ({}) exceeds the supported maximum of {MAX_INTERMEDIATES}",
                self.max_nodes
            ));
        }
        if self.max_distance == 0 {
            return invalid("max_distance must be greater than zero".into());
        }
        if self.max_distance > MAX_DISTANCE {
            return invalid(format!(
                "max_distance ({}) exceeds the supported maximum of {MAX_DISTANCE}",
                self.max_distance
            ));
        }
        if self.workers == Some(0) {
            return invalid("workers must be greater than zero when supplied".into());
        }
        Ok(())
    }

    pub fn parallel(&self) -> ParallelConfig {
        self.workers.map(ParallelConfig::new).unwrap_or_default()
    }

    /// Strategies in the order they are run. The exhaustive reference is first.
    pub fn strategies(&self) -> Vec<Strategy> {
        vec![
            Strategy::Exhaustive,
            Strategy::Pruned,
            Strategy::Parallel(self.parallel()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SweepConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SweepConfig = serde_json::from_str(r#"{"seed": 9, "max_nodes": 5}"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_nodes, 5);
        assert_eq!(config.instances, SweepConfig::default().instances);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<SweepConfig>(r#"{"nodes": 5}"#).is_err());
    }

    #[test]
    fn rejects_inconsistent_settings() {
        let cases = [
            SweepConfig {
                instances: 0,
                ..SweepConfig::default()
            },
            SweepConfig {
                min_nodes: 6,
                max_nodes: 5,
                ..SweepConfig::default()
            },
            SweepConfig {
                max_nodes: MAX_INTERMEDIATES + 1,
                ..SweepConfig::default()
            },
            SweepConfig {
                max_distance: 0,
                ..SweepConfig::default()
            },
            SweepConfig {
                max_distance: MAX_DISTANCE + 1,
                ..SweepConfig::default()
            },
            SweepConfig {
                max_distance: u32::MAX,
                min_nodes: 3,
                max_nodes: 3,
                instances: 1,
                ..SweepConfig::default()
            },
            SweepConfig {
                workers: Some(0),
                ..SweepConfig::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(SweepError::InvalidConfig(_))),
                "{config:?}"
            );
        }
    }

    #[test]
    fn largest_weight_keeps_the_longest_route_in_range() {
        let config = SweepConfig {
            max_distance: MAX_DISTANCE,
            max_nodes: MAX_INTERMEDIATES,
            ..SweepConfig::default()
        };
        assert!(config.validate().is_ok());
        let edges = MAX_INTERMEDIATES as u32 + 1;
        assert!(MAX_DISTANCE.checked_mul(edges).is_some());
    }

    #[test]
    fn exhaustive_reference_runs_first() {
        let config = SweepConfig {
            workers: Some(3),
            ..SweepConfig::default()
        };
        assert_eq!(
            config.strategies(),
            vec![
                Strategy::Exhaustive,
                Strategy::Pruned,
                Strategy::Parallel(ParallelConfig::new(3)),
            ]
        );
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = SweepConfig::from_json_file(Path::new("/nonexistent/sweep.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/sweep.json"));
    }
}
