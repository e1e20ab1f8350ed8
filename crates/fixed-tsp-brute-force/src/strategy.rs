use std::fmt;

use serde::{Deserialize, Serialize};

use fixed_tsp_core::{into_ok, Distance, Solution};

use crate::exhaustive::try_solve_exhaustive_with_cost;
use crate::parallel::{try_solve_pruned_parallel, ParallelConfig};
use crate::pruned::try_solve_pruned_with_cost;

/// Which solver to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exhaustive,
    Pruned,
    Parallel(ParallelConfig),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Pruned => "pruned",
            Strategy::Parallel(_) => "parallel",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Parallel(config) => write!(f, "parallel({} workers)", config.workers),
            other => f.write_str(other.name()),
        }
    }
}

pub fn try_solve_with<N, D, E, F>(
    strategy: Strategy,
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
) -> Result<Option<Solution<N, D>>, E>
where
    N: Clone + Sync,
    D: Distance + Send,
    E: Send,
    F: Fn(&N, &N) -> Result<D, E> + Sync,
{
    match strategy {
        Strategy::Exhaustive => try_solve_exhaustive_with_cost(nodes, start, end, distance),
        Strategy::Pruned => try_solve_pruned_with_cost(nodes, start, end, distance),
        Strategy::Parallel(config) => {
            try_solve_pruned_parallel(nodes, start, end, distance, config)
        }
    }
}

pub fn solve_with<N, D, F>(
    strategy: Strategy,
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
) -> Option<Solution<N, D>>
where
    N: Clone + Sync,
    D: Distance + Send,
    F: Fn(&N, &N) -> D + Sync,
{
    into_ok(try_solve_with(strategy, nodes, start, end, |a, b| {
        Ok(distance(a, b))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_strategy_finds_the_line() {
        let strategies = [
            Strategy::Exhaustive,
            Strategy::Pruned,
            Strategy::Parallel(ParallelConfig::new(2)),
        ];
        for strategy in strategies {
            let solution =
                solve_with(strategy, &[3, 1, 2], 0, 4, |a: &i32, b: &i32| a.abs_diff(*b));
            assert_eq!(solution.map(|s| s.route), Some(vec![0, 1, 2, 3, 4]), "{strategy}");
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Strategy::Pruned.to_string(), "pruned");
        assert_eq!(
            Strategy::Parallel(ParallelConfig::new(3)).to_string(),
            "parallel(3 workers)"
        );
        assert_eq!(Strategy::Parallel(ParallelConfig::new(3)).name(), "parallel");
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Strategy::Exhaustive).unwrap(), "\"exhaustive\"");
        let parallel: Strategy = serde_json::from_str(r#"{"parallel":{"workers":4}}"#).unwrap();
        assert_eq!(parallel, Strategy::Parallel(ParallelConfig::new(4)));
    }
}
