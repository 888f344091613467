//! Vector normalization helpers.

use crate::Embedding;

/// Compute the L2 (Euclidean) norm of a vector.
pub fn l2_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize a vector to unit length in place.
///
/// A zero vector is left unchanged.
pub fn normalize(vector: &mut Embedding) {
    let magnitude = l2_norm(vector);
    if magnitude > 0.0 {
        for x in vector.iter_mut() {
            *x /= magnitude;
        }
    }
}
