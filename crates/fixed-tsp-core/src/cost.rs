//! Route cost arithmetic over a caller-supplied distance function.
//!
//! Edges are always evaluated in traversal order: `distance(a, b)` is called
//! for the step from `a` to `b` and never substituted by `distance(b, a)`.

use crate::distance::{into_ok, Distance};

/// Outcome of accumulating a prefix against a bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixCost<D> {
    /// Every edge of the prefix was added and the sum stayed below the bound.
    Completed(D),
    /// The running sum reached the bound; the remaining edges were never evaluated.
    Pruned(D),
}

impl<D> PrefixCost<D> {
    pub fn is_completed(&self) -> bool {
        matches!(self, PrefixCost::Completed(_))
    }

    pub fn completed(self) -> Option<D> {
        match self {
            PrefixCost::Completed(cost) => Some(cost),
            PrefixCost::Pruned(_) => None,
        }
    }
}

/// Sum of every consecutive pair of `route`. Routes shorter than two nodes cost zero.
pub fn try_full_cost<N, D, E, F>(route: &[&N], distance: F) -> Result<D, E>
where
    D: Distance,
    F: Fn(&N, &N) -> Result<D, E>,
{
    route
        .windows(2)
        .try_fold(D::zero(), |total, pair| Ok(total + distance(pair[0], pair[1])?))
}

pub fn full_cost<N, D, F>(route: &[&N], distance: F) -> D
where
    D: Distance,
    F: Fn(&N, &N) -> D,
{
    into_ok(try_full_cost(route, |a, b| Ok(distance(a, b))))
}

/// Cost of `start -> prefix[0] -> prefix[1] -> ...`, one edge at a time.
///
/// Stops as soon as the running sum reaches or exceeds `bound` (`None` means
/// no bound). The edge from the last prefix node onwards is not included.
pub fn try_prefix_cost_with_early_exit<N, D, E, F>(
    start: &N,
    prefix: &[&N],
    bound: Option<D>,
    distance: F,
) -> Result<PrefixCost<D>, E>
where
    D: Distance,
    F: Fn(&N, &N) -> Result<D, E>,
{
    try_prefix_cost_until(
        start,
        prefix,
        |total| bound.is_some_and(|bound| total >= bound),
        distance,
    )
}

/// Like [`try_prefix_cost_with_early_exit`] with an arbitrary stopping rule,
/// checked after every added edge.
pub fn try_prefix_cost_until<N, D, E, S, F>(
    start: &N,
    prefix: &[&N],
    stop: S,
    distance: F,
) -> Result<PrefixCost<D>, E>
where
    D: Distance,
    S: Fn(D) -> bool,
    F: Fn(&N, &N) -> Result<D, E>,
{
    let mut total = D::zero();
    let mut prev = start;

    for &node in prefix {
        total = total + distance(prev, node)?;
        if stop(total) {
            return Ok(PrefixCost::Pruned(total));
        }
        prev = node;
    }

    Ok(PrefixCost::Completed(total))
}

pub fn prefix_cost_with_early_exit<N, D, F>(
    start: &N,
    prefix: &[&N],
    bound: Option<D>,
    distance: F,
) -> PrefixCost<D>
where
    D: Distance,
    F: Fn(&N, &N) -> D,
{
    into_ok(try_prefix_cost_with_early_exit(
        start,
        prefix,
        bound,
        |a, b| Ok(distance(a, b)),
    ))
}
