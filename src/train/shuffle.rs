use rand::seq::SliceRandom;
use rand::Rng;

use crate::math::matrix::Vector;

/// Shuffles inputs and targets with the same permutation.
///
/// `Network::train` visits examples in the order given; callers that want a
/// different order each epoch shuffle between runs.
///
/// # Panics
/// Panics if the two slices differ in length.
pub fn shuffle_dataset<R: Rng + ?Sized>(inputs: &mut [Vector], targets: &mut [Vector], rng: &mut R) {
    assert_eq!(inputs.len(), targets.len(), "inputs and targets must have equal length");

    let mut order: Vec<usize> = (0..inputs.len()).collect();
    order.shuffle(rng);

    let shuffled_inputs: Vec<Vector> = order.iter().map(|&i| inputs[i].clone()).collect();
    let shuffled_targets: Vec<Vector> = order.iter().map(|&i| targets[i].clone()).collect();
    inputs.clone_from_slice(&shuffled_inputs);
    targets.clone_from_slice(&shuffled_targets);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pairs_stay_together() {
        let mut inputs: Vec<Vector> = (0..20).map(|i| vec![i as f32]).collect();
        let mut targets: Vec<Vector> = (0..20).map(|i| vec![i as f32 * 10.0]).collect();
        shuffle_dataset(&mut inputs, &mut targets, &mut StdRng::seed_from_u64(3));

        for (input, target) in inputs.iter().zip(&targets) {
            assert_eq!(input[0] * 10.0, target[0]);
        }
        let mut seen: Vec<f32> = inputs.iter().map(|v| v[0]).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..20).map(|i| i as f32).collect::<Vec<_>>());
    }
}
