use crate::constants::{
    ACCELERATE_INIT_SCALE, ACCELERATE_LIMIT, MUTATION_PERTURBATION, TURN_INIT_SCALE, TURN_LIMIT,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The three scalar weights defining a vehicle's fixed behavior policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub accelerate: f64,
    pub left_turn: f64,
    pub right_turn: f64,
}

impl Genome {
    /// Draw a fresh genome: accelerate ~ U(0, 1) * 0.1, each turn weight
    /// ~ (U(0, 1) - 0.5) * 0.05.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            accelerate: rng.random::<f64>() * ACCELERATE_INIT_SCALE,
            left_turn: (rng.random::<f64>() - 0.5) * TURN_INIT_SCALE,
            right_turn: (rng.random::<f64>() - 0.5) * TURN_INIT_SCALE,
        }
    }

    /// Uniform gene-wise crossover: each gene is taken verbatim from one of
    /// the two parents with equal probability, never interpolated.
    pub fn crossover<R: Rng + ?Sized>(rng: &mut R, a: &Genome, b: &Genome) -> Self {
        Self {
            accelerate: if rng.random_bool(0.5) { a.accelerate } else { b.accelerate },
            left_turn: if rng.random_bool(0.5) { a.left_turn } else { b.left_turn },
            right_turn: if rng.random_bool(0.5) { a.right_turn } else { b.right_turn },
        }
    }

    /// Per-gene: with probability `rate`, add (U(0,1) - 0.5) * 0.02 and
    /// re-clamp to the gene's fixed range.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R, rate: f64) {
        debug_assert!((0.0..=1.0).contains(&rate), "mutation rate out of [0, 1]");
        if rng.random::<f64>() < rate {
            self.accelerate =
                (self.accelerate + perturbation(rng)).clamp(-ACCELERATE_LIMIT, ACCELERATE_LIMIT);
        }
        if rng.random::<f64>() < rate {
            self.left_turn = (self.left_turn + perturbation(rng)).clamp(-TURN_LIMIT, TURN_LIMIT);
        }
        if rng.random::<f64>() < rate {
            self.right_turn = (self.right_turn + perturbation(rng)).clamp(-TURN_LIMIT, TURN_LIMIT);
        }
    }
}

fn perturbation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random::<f64>() - 0.5) * MUTATION_PERTURBATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn sampled_genomes_stay_in_init_ranges() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for _ in 0..500 {
            let g = Genome::sample(&mut rng);
            assert!((0.0..0.1).contains(&g.accelerate));
            assert!((-0.025..0.025).contains(&g.left_turn));
            assert!((-0.025..0.025).contains(&g.right_turn));
        }
    }

    #[test]
    fn sampling_is_deterministic_for_fixed_seed() {
        let mut rng_a = ChaCha12Rng::seed_from_u64(123);
        let mut rng_b = ChaCha12Rng::seed_from_u64(123);
        assert_eq!(Genome::sample(&mut rng_a), Genome::sample(&mut rng_b));
    }

    #[test]
    fn crossover_genes_come_from_exactly_one_parent() {
        let a = Genome {
            accelerate: 0.08,
            left_turn: -0.02,
            right_turn: 0.01,
        };
        let b = Genome {
            accelerate: 0.03,
            left_turn: 0.015,
            right_turn: -0.005,
        };
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        for _ in 0..200 {
            let child = Genome::crossover(&mut rng, &a, &b);
            assert!(child.accelerate == a.accelerate || child.accelerate == b.accelerate);
            assert!(child.left_turn == a.left_turn || child.left_turn == b.left_turn);
            assert!(child.right_turn == a.right_turn || child.right_turn == b.right_turn);
        }
    }

    #[test]
    fn zero_rate_mutation_never_changes_a_genome() {
        let mut rng = ChaCha12Rng::seed_from_u64(11);
        let original = Genome::sample(&mut rng);
        let mut mutated = original;
        for _ in 0..100 {
            mutated.mutate(&mut rng, 0.0);
        }
        assert_eq!(mutated, original);
    }

    #[test]
    fn mutation_respects_gene_clamp_ranges() {
        let mut g = Genome {
            accelerate: ACCELERATE_LIMIT,
            left_turn: TURN_LIMIT,
            right_turn: -TURN_LIMIT,
        };
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..1000 {
            g.mutate(&mut rng, 1.0);
            assert!((-ACCELERATE_LIMIT..=ACCELERATE_LIMIT).contains(&g.accelerate));
            assert!((-TURN_LIMIT..=TURN_LIMIT).contains(&g.left_turn));
            assert!((-TURN_LIMIT..=TURN_LIMIT).contains(&g.right_turn));
        }
    }

    #[test]
    fn mutation_is_deterministic_for_fixed_seed() {
        let base = Genome {
            accelerate: 0.05,
            left_turn: 0.0,
            right_turn: 0.0,
        };
        let mut a = base;
        let mut b = base;
        let mut rng_a = ChaCha12Rng::seed_from_u64(77);
        let mut rng_b = ChaCha12Rng::seed_from_u64(77);
        a.mutate(&mut rng_a, 0.5);
        b.mutate(&mut rng_b, 0.5);
        assert_eq!(a, b);
    }
}
