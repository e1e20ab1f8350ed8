use serde::{Deserialize, Serialize};

/// Work counters of a single search. They never influence the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Orderings drawn from the permutation generator.
    pub permutations: u64,
    /// Orderings whose full cost was computed.
    pub completed: u64,
    /// Orderings abandoned once their prefix reached the bound.
    pub pruned: u64,
    /// Times the best route was replaced.
    pub improvements: u64,
}

impl SearchStats {
    pub fn absorb(&mut self, other: &SearchStats) {
        self.permutations += other.permutations;
        self.completed += other.completed;
        self.pruned += other.pruned;
        self.improvements += other.improvements;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution<N, D> {
    /// `start`, every intermediate node once, `end`.
    pub route: Vec<N>,
    pub distance: D,
    pub stats: SearchStats,
}

impl<N, D> Solution<N, D> {
    /// Intermediate nodes in visiting order.
    pub fn intermediates(&self) -> &[N] {
        match self.route.len() {
            0..=2 => &[],
            len => &self.route[1..len - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_adds_counters() {
        let mut total = SearchStats {
            permutations: 6,
            completed: 4,
            pruned: 2,
            improvements: 1,
        };
        total.absorb(&SearchStats {
            permutations: 2,
            completed: 1,
            pruned: 1,
            improvements: 1,
        });
        assert_eq!(
            total,
            SearchStats {
                permutations: 8,
                completed: 5,
                pruned: 3,
                improvements: 2,
            }
        );
    }

    #[test]
    fn intermediates_strip_endpoints() {
        let solution = Solution {
            route: vec![0, 3, 1, 9],
            distance: 12u32,
            stats: SearchStats::default(),
        };
        assert_eq!(solution.intermediates(), &[3, 1]);

        let direct = Solution {
            route: vec![0, 9],
            distance: 9u32,
            stats: SearchStats::default(),
        };
        assert!(direct.intermediates().is_empty());
    }

    #[test]
    fn serializes_route_distance_and_stats() {
        let solution = Solution {
            route: vec![0, 1, 2],
            distance: 2u32,
            stats: SearchStats {
                permutations: 1,
                completed: 1,
                pruned: 0,
                improvements: 1,
            },
        };
        let json = serde_json::to_value(&solution).unwrap();
        assert_eq!(json["route"], serde_json::json!([0, 1, 2]));
        assert_eq!(json["distance"], 2);
        assert_eq!(json["stats"]["permutations"], 1);

        let back: Solution<i32, u32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, solution);
    }
}
