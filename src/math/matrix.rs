/// Single-precision scalar used throughout the engine.
pub type Scalar = f32;

/// Ordered sequence of scalars; the index is a neuron or feature position.
pub type Vector = Vec<Scalar>;

/// One `Vector` per layer. The outer index is the layer index with the input
/// layer excluded.
pub type Matrix = Vec<Vector>;

/// Dot product of two equal-length slices.
pub fn dot(a: &[Scalar], b: &[Scalar]) -> Scalar {
    assert_eq!(a.len(), b.len(), "dot product of vectors with different lengths");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Element-wise (Hadamard) product of two same-length vectors.
pub fn hadamard(a: &[Scalar], b: &[Scalar]) -> Vector {
    assert_eq!(a.len(), b.len(), "hadamard product of vectors with different lengths");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).collect()
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(v: &[Scalar]) -> Scalar {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<Scalar>() / v.len() as Scalar
}

/// Index of the maximum element in a slice; the first one wins a tie.
/// `0` for an empty slice.
pub fn argmax(v: &[Scalar]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate().skip(1) {
        if x > v[best] {
            best = i;
        }
    }
    best
}

/// Returns a copy of `v` with `value` pushed onto the end.
pub fn augmented(v: &[Scalar], value: Scalar) -> Vector {
    let mut res = Vec::with_capacity(v.len() + 1);
    res.extend_from_slice(v);
    res.push(value);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_hadamard() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(hadamard(&[1.0, 2.0], &[3.0, -1.0]), vec![3.0, -2.0]);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }

    #[test]
    fn argmax_picks_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn augmented_appends_bias() {
        assert_eq!(augmented(&[0.25, 0.5], 1.0), vec![0.25, 0.5, 1.0]);
    }
}
