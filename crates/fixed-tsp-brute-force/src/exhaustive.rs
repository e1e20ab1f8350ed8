//! Baseline enumerator: full cost of every ordering, no pruning.

use fixed_tsp_core::{
    into_ok, try_full_cost, BestRoute, Distance, Permutations, SearchStats, Solution,
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
    let mut route: Vec<&N> = Vec::with_capacity(nodes.len() + 2);

    for order in Permutations::new(nodes) {
        stats.permutations += 1;

        route.clear();
        route.push(start);
        route.extend_from_slice(&order);
        route.push(end);

        let total = try_full_cost(&route, distance)?;
        stats.completed += 1;
        if best.offer(total, &order) {
            stats.improvements += 1;
        }
    }

    Ok(best)
}

/// Cheapest route from `start` through every node of `nodes` to `end`.
///
/// The returned route is `nodes.len() + 2` long and owns clones of the nodes.
/// With no intermediates the distance function is never called. The first
/// error returned by `distance` stops the search and is handed back unchanged.
pub fn try_solve_exhaustive<N, D, E, F>(
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

pub fn solve_exhaustive<N, D, F>(nodes: &[N], start: N, end: N, distance: F) -> Vec<N>
where
    N: Clone,
    D: Distance,
    F: Fn(&N, &N) -> D,
{
    into_ok(try_solve_exhaustive(nodes, start, end, |a, b| {
        Ok(distance(a, b))
    }))
}

/// As [`try_solve_exhaustive`], also reporting the route's distance and the
/// work done. `None` only if no ordering was ever accepted, which cannot
/// happen: the first one always is.
pub fn try_solve_exhaustive_with_cost<N, D, E, F>(
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

pub fn solve_exhaustive_with_cost<N, D, F>(
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
    into_ok(try_solve_exhaustive_with_cost(nodes, start, end, |a, b| {
        Ok(distance(a, b))
    }))
}
