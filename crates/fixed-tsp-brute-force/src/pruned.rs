//! Prefix-bound search: the same enumeration as the exhaustive solver, but an
//! ordering is dropped as soon as its running cost reaches the best total.
//!
//! Distances must be non-negative. Prefix sums then never shrink, so a prefix
//! that already matches the best total cannot be completed into a strictly
//! better route and dropping it never loses the optimum. Since the tracker
//! only accepts strict improvements, the surviving route is also the same one
//! the exhaustive solver keeps on ties.

use fixed_tsp_core::{
    into_ok, try_prefix_cost_with_early_exit, BestRoute, Distance, Permutations, SearchStats,
    Solution,
};

use crate::direct_route_stats;

fn search<'a, N, D, E, F>(
    nodes: &'a [N],
    start: &N,
    end: &N,
    distance: &F,
    stats: &mut SearchStats,
) -> Result<BestRoute<'a, N, D>, E>
where
    D: Distance,
    F: Fn(&N, &N) -> Result<D, E>,
{
    let mut best = BestRoute::new();

    for order in Permutations::new(nodes) {
        stats.permutations += 1;

        let prefix =
            try_prefix_cost_with_early_exit(start, &order, best.current_bound(), distance)?;
        let Some(prefix) = prefix.completed() else {
            stats.pruned += 1;
            continue;
        };

        let last = order.last().copied().unwrap_or(start);
        let total = prefix + distance(last, end)?;
        stats.completed += 1;
        if best.offer(total, &order) {
            stats.improvements += 1;
        }
    }

    Ok(best)
}

/// Cheapest route from `start` through every node of `nodes` to `end`,
/// skipping orderings whose prefix already costs as much as the best route.
///
/// Results equal [`crate::try_solve_exhaustive`] for non-negative distances;
/// a negative distance can make this return a suboptimal route silently.
pub fn try_solve_pruned<N, D, E, F>(
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
) -> Result<Vec<N>, E>
where
    N: Clone,
    D: Distance,
    F: Fn(&N, &N) -> Result<D, E>,
{
    if nodes.is_empty() {
        return Ok(vec![start, end]);
    }

    let mut stats = SearchStats::default();
    let best = search(nodes, &start, &end, &distance, &mut stats)?;
    Ok(best.into_route(start, end).unwrap_or_default())
}

pub fn solve_pruned<N, D, F>(nodes: &[N], start: N, end: N, distance: F) -> Vec<N>
where
    N: Clone,
    D: Distance,
    F: Fn(&N, &N) -> D,
{
    into_ok(try_solve_pruned(nodes, start, end, |a, b| Ok(distance(a, b))))
}

pub fn try_solve_pruned_with_cost<N, D, E, F>(
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
) -> Result<Option<Solution<N, D>>, E>
where
    N: Clone,
    D: Distance,
    F: Fn(&N, &N) -> Result<D, E>,
{
    if nodes.is_empty() {
        let distance = distance(&start, &end)?;
        return Ok(Some(Solution {
            route: vec![start, end],
            distance,
            stats: direct_route_stats(),
        }));
    }

    let mut stats = SearchStats::default();
    let best = search(nodes, &start, &end, &distance, &mut stats)?;
    Ok(best.into_solution(start, end, stats))
}

pub fn solve_pruned_with_cost<N, D, F>(
    nodes: &[N],
    start: N,
    end: N,
    distance: F,
) -> Option<Solution<N, D>>
where
    N: Clone,
    D: Distance,
    F: Fn(&N, &N) -> D,
{
    into_ok(try_solve_pruned_with_cost(nodes, start, end, |a, b| {
        Ok(distance(a, b))
    }))
}
