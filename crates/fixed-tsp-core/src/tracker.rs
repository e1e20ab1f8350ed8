use crate::distance::Distance;
use crate::solution::{SearchStats, Solution};

/// Minimum-cost ordering of intermediate nodes seen so far during one search.
///
/// Only the intermediate ordering is stored; the endpoints are fixed for the
/// whole search and are added back by [`BestRoute::into_route`].
#[derive(Clone, Debug)]
pub struct BestRoute<'a, N, D> {
    distance: Option<D>,
    order: Vec<&'a N>,
}

impl<'a, N, D: Distance> BestRoute<'a, N, D> {
    pub fn new() -> Self {
        Self {
            distance: None,
            order: Vec::new(),
        }
    }

    /// Records `order` if `distance` is strictly below the current best.
    /// Ties keep the earlier candidate. Returns whether the candidate was kept.
    pub fn offer(&mut self, distance: D, order: &[&'a N]) -> bool {
        let improves = match self.distance {
            Some(best) => distance < best,
            None => true,
        };
        if !improves {
            return false;
        }
        self.distance = Some(distance);
        self.order.clear();
        self.order.extend_from_slice(order);
        true
    }

    /// Best distance so far; `None` until a candidate has been accepted, which
    /// callers treat as an infinite bound.
    pub fn current_bound(&self) -> Option<D> {
        self.distance
    }

    pub fn distance(&self) -> Option<D> {
        self.distance
    }

    pub fn order(&self) -> Option<&[&'a N]> {
        self.distance.map(|_| self.order.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.distance.is_none()
    }

    /// Owned `[start, ...order, end]`, or `None` if nothing was ever accepted.
    pub fn into_route(self, start: N, end: N) -> Option<Vec<N>>
    where
        N: Clone,
    {
        self.distance?;
        let mut route = Vec::with_capacity(self.order.len() + 2);
        route.push(start);
        route.extend(self.order.into_iter().cloned());
        route.push(end);
        Some(route)
    }

    pub fn into_solution(self, start: N, end: N, stats: SearchStats) -> Option<Solution<N, D>>
    where
        N: Clone,
    {
        let distance = self.distance?;
        let route = self.into_route(start, end)?;
        Some(Solution {
            route,
            distance,
            stats,
        })
    }
}

impl<N, D: Distance> Default for BestRoute<'_, N, D> {
    fn default() -> Self {
        Self::new()
    }
}
