use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use fixed_tsp_brute_force::{solve_with, Strategy};
use fixed_tsp_core::{DistanceCache, SearchStats, Solution};

use crate::config::SweepConfig;
use crate::error::SweepError;
use crate::instance::Instance;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyRun {
    pub strategy: String,
    pub distance: u32,
    pub route: Vec<usize>,
    /// Same route and distance as the exhaustive reference.
    pub agrees: bool,
    pub stats: SearchStats,
    pub elapsed_micros: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_hits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_misses: Option<u64>,
}

/// One JSON line of sweep output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub instance: usize,
    pub seed: u64,
    pub intermediates: usize,
    pub runs: Vec<StrategyRun>,
}

impl SweepRecord {
    pub fn agrees(&self) -> bool {
        self.runs.iter().all(|run| run.agrees)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disagreement {
    pub instance: usize,
    pub strategy: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub instances: usize,
    pub disagreements: Vec<Disagreement>,
    /// Orderings abandoned by the sequential pruned search across the sweep.
    pub pruned: u64,
    /// Orderings drawn by the sequential pruned search across the sweep.
    pub permutations: u64,
}

impl SweepSummary {
    pub fn pruned_fraction(&self) -> f64 {
        if self.permutations == 0 {
            0.0
        } else {
            self.pruned as f64 / self.permutations as f64
        }
    }

    /// First disagreement as an error, if any.
    pub fn ensure_agreement(&self) -> Result<(), SweepError> {
        match self.disagreements.first() {
            Some(d) => Err(SweepError::Disagreement {
                instance: d.instance,
                strategy: d.strategy.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn run_strategy(
    strategy: Strategy,
    instance: &Instance,
    cache_capacity: Option<usize>,
) -> Result<(Solution<usize, u32>, Option<(u64, u64)>), SweepError> {
    let no_route = || SweepError::NoRoute {
        instance: instance.id,
        strategy: strategy.to_string(),
    };
    let nodes = &instance.nodes;
    let raw = |a: &usize, b: &usize| instance.distance(a, b);

    match (strategy, cache_capacity) {
        (Strategy::Exhaustive | Strategy::Pruned, Some(limit)) => {
            let cache = DistanceCache::with_capacity_limit(raw, limit);
            let solution = match strategy {
                Strategy::Exhaustive => fixed_tsp_brute_force::solve_exhaustive_with_cost(
                    nodes,
                    instance.start,
                    instance.end,
                    |a, b| cache.distance(a, b),
                ),
                _ => fixed_tsp_brute_force::solve_pruned_with_cost(
                    nodes,
                    instance.start,
                    instance.end,
                    |a, b| cache.distance(a, b),
                ),
            };
            let solution = solution.ok_or_else(no_route)?;
            Ok((solution, Some((cache.hits(), cache.misses()))))
        }
        _ => {
            let solution = solve_with(strategy, nodes, instance.start, instance.end, raw)
                .ok_or_else(no_route)?;
            Ok((solution, None))
        }
    }
}

/// Runs every configured strategy on `config.instances` random instances and
/// hands each record to `sink` as soon as it is complete.
pub fn run_sweep<S>(config: &SweepConfig, mut sink: S) -> Result<SweepSummary, SweepError>
where
    S: FnMut(&SweepRecord) -> Result<(), SweepError>,
{
    config.validate()?;

    let strategies = config.strategies();
    info!(
        instances = config.instances,
        min_nodes = config.min_nodes,
        max_nodes = config.max_nodes,
        seed = config.seed,
        "starting cross-check sweep"
    );

    let mut sizes = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    let mut summary = SweepSummary::default();

    for id in 0..config.instances {
        let intermediates = sizes.gen_range(config.min_nodes..=config.max_nodes);
        let seed = config.seed.wrapping_add(id as u64);
        let instance = Instance::generate(
            id,
            seed,
            intermediates,
            config.max_distance,
            config.symmetric,
        );

        let mut runs: Vec<StrategyRun> = Vec::with_capacity(strategies.len());
        let mut reference: Option<(Vec<usize>, u32)> = None;

        for &strategy in &strategies {
            let started = Instant::now();
            let (solution, cache) = run_strategy(strategy, &instance, config.cache_capacity)?;
            let elapsed_micros = started.elapsed().as_micros() as u64;

            let agrees = match &reference {
                Some((route, distance)) => {
                    *route == solution.route && *distance == solution.distance
                }
                None => {
                    reference = Some((solution.route.clone(), solution.distance));
                    true
                }
            };
            if !agrees {
                error!(
                    instance = id,
                    strategy = %strategy,
                    route = ?solution.route,
                    distance = solution.distance,
                    "strategy disagrees with exhaustive search"
                );
                summary.disagreements.push(Disagreement {
                    instance: id,
                    strategy: strategy.to_string(),
                });
            }
            if strategy == Strategy::Pruned {
                summary.pruned += solution.stats.pruned;
                summary.permutations += solution.stats.permutations;
            }

            runs.push(StrategyRun {
                strategy: strategy.to_string(),
                distance: solution.distance,
                route: solution.route,
                agrees,
                stats: solution.stats,
                elapsed_micros,
                cache_hits: cache.map(|(hits, _)| hits),
                cache_misses: cache.map(|(_, misses)| misses),
            });
        }

        let record = SweepRecord {
            instance: id,
            seed,
            intermediates,
            runs,
        };
        debug!(
            instance = id,
            intermediates,
            agrees = record.agrees(),
            "instance checked"
        );
        sink(&record)?;
        summary.instances += 1;
    }

    info!(
        instances = summary.instances,
        disagreements = summary.disagreements.len(),
        pruned_fraction = summary.pruned_fraction(),
        "sweep finished"
    );
    Ok(summary)
}
