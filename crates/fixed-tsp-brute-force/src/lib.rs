#![deny(clippy::all)]
//! Exact solvers for the fixed-endpoint TSP.
//!
//! [`solve_exhaustive`] costs every ordering in full and is the correctness
//! baseline. [`solve_pruned`] walks the same orderings in the same order but
//! abandons one as soon as its prefix reaches the best total found so far; with
//! non-negative distances both return the same route. [`solve_pruned_parallel`]
//! is an optional sharded version of the pruned search.

pub mod exhaustive;
pub mod parallel;
pub mod pruned;
pub mod strategy;

pub use exhaustive::{
    solve_exhaustive, solve_exhaustive_with_cost, try_solve_exhaustive,
    try_solve_exhaustive_with_cost,
};
pub use parallel::{solve_pruned_parallel, try_solve_pruned_parallel, ParallelConfig};
pub use pruned::{
    solve_pruned, solve_pruned_with_cost, try_solve_pruned, try_solve_pruned_with_cost,
};
pub use strategy::{solve_with, try_solve_with, Strategy};

use fixed_tsp_core::SearchStats;

/// Stats of the direct `[start, end]` route used when there are no
/// intermediates: the single empty ordering, accepted.
pub(crate) fn direct_route_stats() -> SearchStats {
    SearchStats {
        permutations: 1,
        completed: 1,
        pruned: 0,
        improvements: 1,
    }
}
