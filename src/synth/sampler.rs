//! Random candidate clues, read off the planted solution.
//!
//! Every sample is true of the planted solution by construction: positive
//! pairs take both values from one person, negative pairs take them from
//! two different persons (bijectivity keeps them apart), and order clues
//! compare two persons sitting at distinct ordinal positions.

use rand::{seq::IteratorRandom, Rng};

use crate::synth::{
    builder::{Planted, ORDINAL_DIM},
    clue::{Clue, Sign},
};

#[derive(Debug, Clone, Copy)]
pub struct ClueSampler {
    order_weight: f64,
    negative_weight: f64,
}

impl ClueSampler {
    /// `order_weight` is the probability of drawing an `Order` clue,
    /// `negative_weight` the probability that a `Pair` clue is negative.
    pub fn new(order_weight: f64, negative_weight: f64) -> Self {
        Self {
            order_weight,
            negative_weight,
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R, planted: &Planted) -> Clue {
        let num_dims = planted.num_dimensions();
        let num_persons = planted.num_persons();

        if rng.gen_bool(self.order_weight) {
            // Order endpoints never name the ordinal dimension itself; its
            // values are what the clue is positioned against.
            let person_a = rng.gen_range(0..num_persons);
            let person_b = (0..num_persons)
                .filter(|&p| p != person_a)
                .choose(rng)
                .unwrap();
            let dim_a = (0..num_dims)
                .filter(|&d| d != ORDINAL_DIM)
                .choose(rng)
                .unwrap();
            let dim_b = (0..num_dims)
                .filter(|&d| d != ORDINAL_DIM)
                .choose(rng)
                .unwrap();
            Clue::Order {
                dim_a,
                value_a: planted.value_of(dim_a, person_a),
                dim_b,
                value_b: planted.value_of(dim_b, person_b),
                ordinal_dim: ORDINAL_DIM,
            }
        } else {
            let person_a = rng.gen_range(0..num_persons);
            let dim_a = rng.gen_range(0..num_dims);
            let dim_b = (0..num_dims).filter(|&d| d != dim_a).choose(rng).unwrap();
            if rng.gen_bool(self.negative_weight) {
                let person_b = (0..num_persons)
                    .filter(|&p| p != person_a)
                    .choose(rng)
                    .unwrap();
                Clue::Pair {
                    dim_a,
                    value_a: planted.value_of(dim_a, person_a),
                    dim_b,
                    value_b: planted.value_of(dim_b, person_b),
                    sign: Sign::Negative,
                }
            } else {
                Clue::Pair {
                    dim_a,
                    value_a: planted.value_of(dim_a, person_a),
                    dim_b,
                    value_b: planted.value_of(dim_b, person_a),
                    sign: Sign::Positive,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn samples_hold_on_the_planted_solution() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let planted = Planted::plant(&mut rng, 5, 4);
        let weights = [1, 2, 3, 4];
        let sampler = ClueSampler::new(0.05, 0.2);
        let assignment = planted.as_assignment();

        for _ in 0..500 {
            let clue = sampler.sample(&mut rng, &planted);
            assert!(
                clue.holds_in(&assignment, &planted, &weights),
                "sampled clue is false of its own planted solution: {clue:?}"
            );
        }
    }

    #[test]
    fn pair_clues_span_two_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(29);
        let planted = Planted::plant(&mut rng, 4, 3);
        let sampler = ClueSampler::new(0.0, 0.5);

        for _ in 0..300 {
            match sampler.sample(&mut rng, &planted) {
                Clue::Pair { dim_a, dim_b, .. } => assert_ne!(dim_a, dim_b),
                clue => panic!("expected only pair clues, got {clue:?}"),
            }
        }
    }

    #[test]
    fn order_clues_avoid_the_ordinal_dimension() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let planted = Planted::plant(&mut rng, 4, 3);
        let sampler = ClueSampler::new(1.0, 0.2);

        for _ in 0..300 {
            match sampler.sample(&mut rng, &planted) {
                Clue::Order {
                    dim_a,
                    value_a,
                    dim_b,
                    value_b,
                    ordinal_dim,
                } => {
                    assert_ne!(dim_a, ordinal_dim);
                    assert_ne!(dim_b, ordinal_dim);
                    assert!(dim_a != dim_b || value_a != value_b);
                }
                clue => panic!("expected only order clues, got {clue:?}"),
            }
        }
    }
}
