use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;

use fixed_tsp_core::full_cost;

/// Random distance matrix over `intermediates + 2` nodes. Intermediates are
/// `0..intermediates`, followed by the start and the end node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub id: usize,
    pub seed: u64,
    pub nodes: Vec<usize>,
    pub start: usize,
    pub end: usize,
    size: usize,
    matrix: Vec<u32>,
}

impl Instance {
    pub fn generate(
        id: usize,
        seed: u64,
        intermediates: usize,
        max_distance: u32,
        symmetric: bool,
    ) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let size = intermediates + 2;
        let mut matrix = vec![0; size * size];

        for from in 0..size {
            for to in 0..size {
                if from == to || (symmetric && to < from) {
                    continue;
                }
                let weight = rng.gen_range(0..=max_distance);
                matrix[from * size + to] = weight;
                if symmetric {
                    matrix[to * size + from] = weight;
                }
            }
        }

        Self {
            id,
            seed,
            nodes: (0..intermediates).collect(),
            start: intermediates,
            end: intermediates + 1,
            size,
            matrix,
        }
    }

    #[inline(always)]
    pub fn distance(&self, from: &usize, to: &usize) -> u32 {
        self.matrix[from * self.size + to]
    }

    pub fn route_cost(&self, route: &[usize]) -> u32 {
        let refs: Vec<&usize> = route.iter().collect();
        full_cost(&refs, |a, b| self.distance(a, b))
    }
}
