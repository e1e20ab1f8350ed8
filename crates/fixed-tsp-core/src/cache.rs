//! Memoisation of pure distance functions.
//!
//! The cache only ever stores the value returned by the wrapped function for a
//! given ordered pair, so it must never wrap a function with side effects:
//! those would run at most once per distinct pair.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Distance function wrapper that remembers results keyed by the ordered pair.
///
/// [`DistanceCache::new`] grows without limit, which is fine for the handful
/// of nodes an exact search can handle (`n * (n + 1)` pairs at most per
/// instance). [`DistanceCache::with_capacity_limit`] evicts the oldest pair
/// once more than `limit` are stored.
///
/// Interior mutability makes this single-threaded; it is `!Sync`.
pub struct DistanceCache<N, D, F> {
    compute: F,
    entries: RefCell<HashMap<(N, N), D>>,
    insertion_order: RefCell<VecDeque<(N, N)>>,
    limit: Option<usize>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<N, D, F> DistanceCache<N, D, F>
where
    N: Hash + Eq + Clone,
    D: Copy,
    F: Fn(&N, &N) -> D,
{
    pub fn new(compute: F) -> Self {
        Self {
            compute,
            entries: RefCell::new(HashMap::new()),
            insertion_order: RefCell::new(VecDeque::new()),
            limit: None,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn with_capacity_limit(compute: F, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            entries: RefCell::new(HashMap::with_capacity(limit)),
            insertion_order: RefCell::new(VecDeque::with_capacity(limit)),
            ..Self::new(compute)
        }
    }

    pub fn distance(&self, from: &N, to: &N) -> D {
        let key = (from.clone(), to.clone());
        if let Some(&cached) = self.entries.borrow().get(&key) {
            self.hits.set(self.hits.get() + 1);
            return cached;
        }

        self.misses.set(self.misses.get() + 1);
        let value = (self.compute)(from, to);
        self.insert(key, value);
        value
    }

    fn insert(&self, key: (N, N), value: D) {
        if self.limit == Some(0) {
            return;
        }

        let mut entries = self.entries.borrow_mut();
        let mut insertion_order = self.insertion_order.borrow_mut();
        if entries.insert(key.clone(), value).is_none() {
            insertion_order.push_back(key);
        }

        if let Some(limit) = self.limit {
            while entries.len() > limit {
                match insertion_order.pop_front() {
                    Some(oldest) => {
                        entries.remove(&oldest);
                    }
                    None => break,
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.insertion_order.borrow_mut().clear();
    }
}

/// Wraps a pure distance function in an unbounded [`DistanceCache`].
pub fn cached_fn<N, D, F>(compute: F) -> impl Fn(&N, &N) -> D
where
    N: Hash + Eq + Clone,
    D: Copy,
    F: Fn(&N, &N) -> D,
{
    let cache = DistanceCache::new(compute);
    move |from: &N, to: &N| cache.distance(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_uses_the_cache() {
        let calls = Cell::new(0);
        let counted = |a: &i32, b: &i32| {
            calls.set(calls.get() + 1);
            a.abs_diff(*b) * 2
        };

        let cached = cached_fn(counted);
        assert_eq!(cached(&5, &0), 10);
        assert_eq!(cached(&5, &0), 10);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn pairs_are_ordered() {
        let calls = Cell::new(0);
        let cache = DistanceCache::new(|a: &i32, b: &i32| {
            calls.set(calls.get() + 1);
            if a < b {
                1u32
            } else {
                2
            }
        });

        assert_eq!(cache.distance(&1, &2), 1);
        assert_eq!(cache.distance(&2, &1), 2);
        assert_eq!(cache.distance(&1, &2), 1);
        assert_eq!(calls.get(), 2);
        assert_eq!((cache.hits(), cache.misses()), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn bounded_cache_evicts_oldest_pair() {
        let calls = Cell::new(0);
        let cache = DistanceCache::with_capacity_limit(
            |a: &u8, b: &u8| {
                calls.set(calls.get() + 1);
                u32::from(a.abs_diff(*b))
            },
            2,
        );

        cache.distance(&0, &1);
        cache.distance(&0, &2);
        cache.distance(&0, &3);
        assert_eq!(cache.len(), 2);
        assert_eq!(calls.get(), 3);

        cache.distance(&0, &3);
        cache.distance(&0, &2);
        assert_eq!(calls.get(), 3);

        cache.distance(&0, &1);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn zero_limit_never_stores() {
        let cache = DistanceCache::with_capacity_limit(|a: &i32, b: &i32| a.abs_diff(*b), 0);
        assert_eq!(cache.distance(&3, &7), 4);
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let cache = DistanceCache::new(|a: &i32, b: &i32| a.abs_diff(*b));
        cache.distance(&1, &4);
        cache.clear();
        assert!(cache.is_empty());
        cache.distance(&1, &4);
        assert_eq!(cache.misses(), 2);
    }
}
