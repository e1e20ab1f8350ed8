use std::vec;

use itertools::Itertools;

/// Number of orderings of `n` positions, `None` once `n!` no longer fits.
pub fn permutation_count(n: usize) -> Option<u64> {
    (2..=n as u64).try_fold(1u64, |acc, k| acc.checked_mul(k))
}

/// Lazy, lexicographic-by-input-index enumeration of every ordering of a slice.
///
/// Positions are permuted, not values: duplicates in the input are distinct
/// positions and produce repeated-looking orderings. An empty slice yields a
/// single empty ordering. Each call to [`Permutations::new`] starts a fresh,
/// independent enumeration.
#[derive(Clone, Debug)]
pub struct Permutations<'a, N> {
    items: &'a [N],
    // Set for a shard: this position leads every ordering.
    first: Option<usize>,
    indices: itertools::Permutations<vec::IntoIter<usize>>,
    remaining: Option<u64>,
}

impl<'a, N> Permutations<'a, N> {
    pub fn new(items: &'a [N]) -> Self {
        let positions: Vec<usize> = (0..items.len()).collect();
        Self {
            items,
            first: None,
            indices: positions.into_iter().permutations(items.len()),
            remaining: permutation_count(items.len()),
        }
    }

    /// Only the orderings whose first element is `items[first]`, in the same
    /// relative order the full enumeration visits them.
    ///
    /// # Panics
    ///
    /// Panics if `first` is not a position of `items`.
    pub fn shard(items: &'a [N], first: usize) -> Self {
        assert!(
            first < items.len(),
            "shard start {first} out of range for {} items",
            items.len()
        );

        let rest: Vec<usize> = (0..items.len()).filter(|&i| i != first).collect();
        Self {
            items,
            first: Some(first),
            indices: rest.into_iter().permutations(items.len() - 1),
            remaining: permutation_count(items.len() - 1),
        }
    }
}

impl<'a, N> Iterator for Permutations<'a, N> {
    type Item = Vec<&'a N>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(tail) = self.indices.next() else {
            self.remaining = Some(0);
            return None;
        };
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        let items = self.items;
        Some(
            self.first
                .into_iter()
                .chain(tail)
                .map(|i| &items[i])
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining.map(usize::try_from) {
            Some(Ok(remaining)) => (remaining, Some(remaining)),
            _ => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(items: &[u32]) -> Vec<Vec<u32>> {
        Permutations::new(items)
            .map(|p| p.into_iter().copied().collect())
            .collect()
    }

    #[test]
    fn empty_input_yields_one_empty_permutation() {
        let items: [u32; 0] = [];
        let all: Vec<_> = Permutations::new(&items).collect();
        assert_eq!(all, vec![Vec::<&u32>::new()]);
    }

    #[test]
    fn enumerates_lexicographically_by_position() {
        assert_eq!(
            collect(&[7, 8, 9]),
            vec![
                vec![7, 8, 9],
                vec![7, 9, 8],
                vec![8, 7, 9],
                vec![8, 9, 7],
                vec![9, 7, 8],
                vec![9, 8, 7],
            ]
        );
    }

    #[test]
    fn order_follows_positions_not_values() {
        let all = collect(&[3, 1, 2]);
        assert_eq!(all.first(), Some(&vec![3, 1, 2]));
        assert_eq!(all.last(), Some(&vec![2, 1, 3]));
    }

    #[test]
    fn duplicates_are_distinct_positions() {
        let all = collect(&[5, 5, 6]);
        assert_eq!(all.len(), 6);
        assert_eq!(all.iter().filter(|p| **p == vec![5, 5, 6]).count(), 2);
    }

    #[test]
    fn yields_factorial_count_with_exact_size_hint() {
        let items: Vec<u32> = (0..6).collect();
        let perms = Permutations::new(&items);
        assert_eq!(perms.size_hint(), (720, Some(720)));
        assert_eq!(perms.count(), 720);
    }

    #[test]
    fn size_hint_shrinks_as_items_are_taken() {
        let items = [1, 2, 3];
        let mut perms = Permutations::new(&items);
        perms.next();
        perms.next();
        assert_eq!(perms.size_hint(), (4, Some(4)));
        assert_eq!(perms.by_ref().count(), 4);
        assert_eq!(perms.size_hint(), (0, Some(0)));
        assert!(perms.next().is_none());
    }

    #[test]
    fn positions_come_out_in_sorted_order() {
        let items: Vec<usize> = (0..5).collect();
        let all: Vec<Vec<usize>> = Permutations::new(&items)
            .map(|p| p.into_iter().copied().collect())
            .collect();
        assert_eq!(all.len(), 120);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn shard_lists_its_leader_first() {
        let items = [4u32, 2, 9];
        let shard: Vec<Vec<u32>> = Permutations::shard(&items, 1)
            .map(|p| p.into_iter().copied().collect())
            .collect();
        assert_eq!(shard, vec![vec![2, 4, 9], vec![2, 9, 4]]);
    }

    #[test]
    fn every_call_restarts_the_enumeration() {
        let items = [1, 2, 3, 4];
        assert_eq!(collect(&items), collect(&items));
    }

    #[test]
    fn shards_concatenate_to_the_full_enumeration() {
        let items = [4u32, 2, 9, 1];
        let sharded: Vec<Vec<u32>> = (0..items.len())
            .flat_map(|first| Permutations::shard(&items, first))
            .map(|p| p.into_iter().copied().collect())
            .collect();
        assert_eq!(sharded, collect(&items));
    }

    #[test]
    fn single_item_shard_yields_once() {
        let items = [42u32];
        let all: Vec<_> = Permutations::shard(&items, 0).collect();
        assert_eq!(all, vec![vec![&42]]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn shard_rejects_unknown_position() {
        let items = [1u32, 2];
        let _ = Permutations::shard(&items, 2);
    }

    #[test]
    fn counts_factorials() {
        assert_eq!(permutation_count(0), Some(1));
        assert_eq!(permutation_count(1), Some(1));
        assert_eq!(permutation_count(5), Some(120));
        assert_eq!(permutation_count(20), Some(2_432_902_008_176_640_000));
        assert_eq!(permutation_count(21), None);
    }
}
