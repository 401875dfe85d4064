//! Vector math helpers for cosine-similarity scoring.
//!
//! All vectors in the system live in the pretrained embedding space and
//! are compared by inner product after L2 normalization.

/// L2-normalize a vector in place. Zero vectors are left unchanged so
/// callers never divide by zero.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Dot product of two equal-length vectors. For normalized inputs this
/// is the cosine similarity. Mismatched lengths score 0.0 (a defective
/// embedding must not rank above real matches).
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Weighted mean of `(vector, weight)` pairs. Returns `None` when the
/// input is empty or the dimensions disagree. Weights summing to zero
/// fall back to a plain unweighted mean.
pub fn weighted_mean(pairs: &[(Vec<f32>, f32)]) -> Option<Vec<f32>> {
    let dim = pairs.first()?.0.len();
    if pairs.iter().any(|(v, _)| v.len() != dim) {
        return None;
    }

    let total_weight: f32 = pairs.iter().map(|(_, w)| w).sum();
    let mut acc = vec![0.0f32; dim];

    if total_weight > 0.0 {
        for (v, w) in pairs {
            for (a, x) in acc.iter_mut().zip(v.iter()) {
                *a += x * w;
            }
        }
        for a in acc.iter_mut() {
            *a /= total_weight;
        }
    } else {
        for (v, _) in pairs {
            for (a, x) in acc.iter_mut().zip(v.iter()) {
                *a += x;
            }
        }
        let n = pairs.len() as f32;
        for a in acc.iter_mut() {
            *a /= n;
        }
    }

    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize_unit_length() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_l2_normalize_zero_vector_unchanged() {
        let mut v = vec![0.0, 0.0, 0.0];
        l2_normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cosine_identical_normalized() {
        let mut v = vec![1.0, 2.0, 2.0];
        l2_normalize(&mut v);
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert_eq!(cosine(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch_scores_zero() {
        assert_eq!(cosine(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_weighted_mean_respects_weights() {
        let pairs = vec![(vec![1.0, 0.0], 3.0), (vec![0.0, 1.0], 1.0)];
        let mean = weighted_mean(&pairs).unwrap();
        assert!((mean[0] - 0.75).abs() < 1e-6);
        assert!((mean[1] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_mean_zero_weights_fall_back_to_unweighted() {
        let pairs = vec![(vec![1.0, 0.0], 0.0), (vec![0.0, 1.0], 0.0)];
        let mean = weighted_mean(&pairs).unwrap();
        assert!((mean[0] - 0.5).abs() < 1e-6);
        assert!((mean[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_mean_empty_is_none() {
        assert!(weighted_mean(&[]).is_none());
    }

    #[test]
    fn test_weighted_mean_dimension_mismatch_is_none() {
        let pairs = vec![(vec![1.0, 0.0], 1.0), (vec![1.0], 1.0)];
        assert!(weighted_mean(&pairs).is_none());
    }
}
