use std::convert::Infallible;
use std::ops::Add;

use num_traits::Zero;

/// Numeric weight of travelling directly between two nodes.
///
/// Every primitive integer and float qualifies. Values handed to a solver must
/// be non-negative: the pruned searches rely on prefix sums never shrinking as
/// edges are appended, and a negative edge can make them discard the optimum
/// without any error being raised.
pub trait Distance: Copy + PartialOrd + Add<Output = Self> + Zero {}

impl<T> Distance for T where T: Copy + PartialOrd + Add<Output = T> + Zero {}

/// Unwraps a result whose error type is uninhabited.
#[inline(always)]
pub fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_distance<D: Distance>() {}

    #[test]
    fn primitives_are_distances() {
        assert_distance::<u32>();
        assert_distance::<u64>();
        assert_distance::<i64>();
        assert_distance::<usize>();
        assert_distance::<f64>();
    }

    #[test]
    fn into_ok_returns_value() {
        assert_eq!(into_ok(Ok::<_, Infallible>(7u32)), 7);
    }
}
