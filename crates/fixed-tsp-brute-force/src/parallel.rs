//! Optional multi-threaded pruned search.
//!
//! The orderings are split into shards by their first intermediate node. A
//! fixed set of scoped workers pulls shard indices from a channel and runs the
//! pruned search on each shard against a shared best route. Candidates are
//! ranked by `(distance, position in the sequential enumeration)`, so the result
//! is the exact route [`crate::solve_pruned`] returns, ties included.

use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use serde::{Deserialize, Serialize};

use fixed_tsp_core::{
    into_ok, try_prefix_cost_until, BestRoute, Distance, Permutations, SearchStats, Solution,
};

use crate::direct_route_stats;

/// How often a worker re-reads the shared bound. A stale bound is never
/// tighter than the current one, so it only costs pruning opportunities.
const BOUND_REFRESH_INTERVAL: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Worker threads. Clamped to `1..=nodes.len()` per search.
    pub workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    pub fn new(workers: usize) -> Self {
        Self { workers }
    }

    fn workers_for(&self, shards: usize) -> usize {
        self.workers.clamp(1, shards.max(1))
    }
}

/// Position of an ordering in the sequential enumeration: shard, then index
/// within the shard.
type Rank = (usize, usize);

#[inline(always)]
fn beats<D: Distance>(distance: D, rank: Rank, best: D, best_rank: Rank) -> bool {
    distance < best || (distance == best && rank < best_rank)
}

struct SharedBest<'a, N, D> {
    best: Option<(D, Rank)>,
    order: Vec<&'a N>,
    stats: SearchStats,
}

impl<'a, N, D: Distance> SharedBest<'a, N, D> {
    fn new() -> Self {
        Self {
            best: None,
            order: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    fn offer(&mut self, distance: D, rank: Rank, order: &[&'a N]) -> bool {
        if let Some((best, best_rank)) = self.best {
            if !beats(distance, rank, best, best_rank) {
                return false;
            }
        }
        self.best = Some((distance, rank));
        self.order.clear();
        self.order.extend_from_slice(order);
        true
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shard<'s, 'a, N, D, F> {
    nodes: &'a [N],
    start: &'s N,
    end: &'s N,
    distance: &'s F,
    shared: &'s Mutex<SharedBest<'a, N, D>>,
    abort: &'s AtomicBool,
}

impl<'a, N, D: Distance, F> Shard<'_, 'a, N, D, F> {
    fn search<E>(&self, first: usize, stats: &mut SearchStats) -> Result<(), E>
    where
        F: Fn(&N, &N) -> Result<D, E>,
    {
        let mut local = BestRoute::new();
        let mut global = lock(self.shared).best;

        for (index, order) in Permutations::shard(self.nodes, first).enumerate() {
            if self.abort.load(Ordering::Relaxed) {
                break;
            }
            if index % BOUND_REFRESH_INTERVAL == 0 {
                global = lock(self.shared).best;
            }

            stats.permutations += 1;
            let rank = (first, index);
            let local_bound = local.current_bound();

            // Earlier orderings in this shard win ties; the shared best only
            // wins a tie if it comes earlier in the sequential enumeration.
            let reaches_bound = |total: D| {
                local_bound.is_some_and(|bound| total >= bound)
                    || global.is_some_and(|(bound, bound_rank)| {
                        total > bound || (total == bound && bound_rank < rank)
                    })
            };
            let prefix =
                try_prefix_cost_until(self.start, &order, reaches_bound, self.distance)?;
            let Some(prefix) = prefix.completed() else {
                stats.pruned += 1;
                continue;
            };

            let last = order.last().copied().unwrap_or(self.start);
            let total = prefix + (self.distance)(last, self.end)?;
            stats.completed += 1;

            if global.is_some_and(|(best, best_rank)| !beats(total, rank, best, best_rank)) {
                continue;
            }
            if local.offer(total, &order) {
                stats.improvements += 1;
                let mut shared = lock(self.shared);
                shared.offer(total, rank, &order);
                global = shared.best;
            }
        }

        Ok(())
    }

    fn run<E>(&self, shards: Receiver<usize>) -> Result<(), E>
    where
        F: Fn(&N, &N) -> Result<D, E>,
    {
        let mut stats = SearchStats::default();
        let result = shards.iter().try_for_each(|first| self.search(first, &mut stats));
        if result.is_err() {
            self.abort.store(true, Ordering::Relaxed);
        }
        lock(self.shared).stats.absorb(&stats);
        result
    }
}

fn search<'a, N, D, E, F>(
    nodes: &'a [N],
    start: &N,
    end: &N,
    distance: &F,
    config: ParallelConfig,
) -> Result<SharedBest<'a, N, D>, E>
where
    N: Sync,
    D: Distance + Send,
    E: Send,
    F: Fn(&N, &N) -> Result<D, E> + Sync,
{
    let (shard_tx, shard_rx) = unbounded();
    for first in 0..nodes.len() {
        // The receiver is still alive here.
        let _ = shard_tx.send(first);
    }
    drop(shard_tx);

    let shared = Mutex::new(SharedBest::new());
    let abort = AtomicBool::new(false);
    let shard = Shard {
        nodes,
        start,
        end,
        distance,
        shared: &shared,
        abort: &abort,
    };

    let results: Vec<Result<(), E>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.workers_for(nodes.len()))
            .map(|_| {
                let shard_rx = shard_rx.clone();
                let shard = &shard;
                scope.spawn(move || shard.run(shard_rx))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    results.into_iter().collect::<Result<(), E>>()?;
    Ok(shared.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn into_solution<N: Clone, D>(
    best: SharedBest<'_, N, D>,
    start: N,
    end: N,
) -> Option<Solution<N, D>> {
    let (distance, _) = best.best?;
    let mut route = Vec::with_capacity(best.order.len() + 2);
    route.push(start);
    route.extend(best.order.into_iter().cloned());
    route.push(end);
    Some(Solution {
        route,
        distance,
        stats: best.stats,
    })
}

/// Pruned search spread over `config.workers` threads.
///
/// Returns the same solution as [`crate::try_solve_pruned_with_cost`]; only
/// the work counters differ. When `distance` fails, the remaining workers stop
/// at their next ordering and the first error collected is returned. A panic
/// in `distance` is resumed on the calling thread.
pub fn try_solve_pruned_parallel<N, D, E, F>(
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
    config: ParallelConfig,
) -> Result<Option<Solution<N, D>>, E>
where
    N: Clone + Sync,
    D: Distance + Send,
    E: Send,
    F: Fn(&N, &N) -> Result<D, E> + Sync,
{
    if nodes.is_empty() {
        let distance = distance(&start, &end)?;
        return Ok(Some(Solution {
            route: vec![start, end],
            distance,
            stats: direct_route_stats(),
        }));
    }

    let best = search(nodes, &start, &end, &distance, config)?;
    Ok(into_solution(best, start, end))
}

pub fn solve_pruned_parallel<N, D, F>(
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
    config: ParallelConfig,
) -> Option<Solution<N, D>>
where
    N: Clone + Sync,
    D: Distance + Send,
    F: Fn(&N, &N) -> D + Sync,
{
    into_ok(try_solve_pruned_parallel(
        nodes,
        start,
        end,
        |a, b| Ok(distance(a, b)),
        config,
    ))
}
