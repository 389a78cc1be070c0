use rand::Rng;

use crate::math::matrix::{Scalar, Vector};

/// Samples one weight uniformly from `[-1/√input_count, +1/√input_count]`.
///
/// `input_count` is the fan-in of the neuron the weight belongs to.
pub fn random_weight<R: Rng + ?Sized>(rng: &mut R, input_count: usize) -> Scalar {
    let range = 1.0 / (input_count.max(1) as Scalar).sqrt();
    rng.gen_range(-range..=range)
}

/// One neuron's worth of fan-in scaled weights.
pub fn random_weights<R: Rng + ?Sized>(rng: &mut R, input_count: usize) -> Vector {
    (0..input_count).map(|_| random_weight(rng, input_count)).collect()
}

/// Flattened weights for a whole layer: `neuron_count` blocks of
/// `input_count + 1`, the bias weight last in every block.
pub fn layer_weights<R: Rng + ?Sized>(rng: &mut R, neuron_count: usize, input_count: usize) -> Vector {
    (0..neuron_count)
        .flat_map(|_| random_weights(rng, input_count + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weights_stay_within_fan_in_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let bound = 1.0 / (16.0 as Scalar).sqrt();
        for w in random_weights(&mut rng, 16) {
            assert!(w.abs() <= bound, "{w} outside ±{bound}");
        }
    }

    #[test]
    fn layer_weights_include_a_bias_per_neuron() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(layer_weights(&mut rng, 3, 2).len(), 3 * (2 + 1));
    }

    #[test]
    fn same_seed_same_weights() {
        let a = layer_weights(&mut StdRng::seed_from_u64(42), 4, 5);
        let b = layer_weights(&mut StdRng::seed_from_u64(42), 4, 5);
        assert_eq!(a, b);
    }
}
