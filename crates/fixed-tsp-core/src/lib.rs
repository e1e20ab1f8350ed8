#![deny(clippy::all)]
//! Shared primitives for the fixed-endpoint TSP solvers.
//!
//! A route always starts at a mandatory `start` node, ends at a mandatory `end`
//! node and visits every intermediate node exactly once in between. The solver
//! crates only combine the pieces exported here: the [`Permutations`]
//! generator, the [`cost`] accumulator and the [`BestRoute`] tracker.

pub mod cache;
pub mod cost;
pub mod distance;
pub mod permutation;
pub mod solution;
pub mod tracker;

pub use cache::{cached_fn, DistanceCache};
pub use cost::{
    full_cost, prefix_cost_with_early_exit, try_full_cost, try_prefix_cost_until,
    try_prefix_cost_with_early_exit, PrefixCost,
};
pub use distance::{into_ok, Distance};
pub use permutation::{permutation_count, Permutations};
pub use solution::{SearchStats, Solution};
pub use tracker::BestRoute;
