// Sparse vector math for TF-IDF weights
use std::cmp::Ordering;

/// Sparse vector of `dim` dimensions holding only nonzero weights.
///
/// Entries are kept sorted by dimension index, so dot products and norms are
/// always summed in the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// All-zero vector
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from `(index, weight)` pairs with unique indices below `dim`.
    /// Zero weights are not stored.
    pub fn from_weights(dim: usize, weights: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut entries: Vec<(usize, f64)> = weights
            .into_iter()
            .filter(|&(_, w)| w != 0.0)
            .collect();
        entries.sort_by_key(|&(i, _)| i);
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.last().map_or(true, |&(i, _)| i < dim));
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored nonzero weights
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at `index` (zero when not stored)
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit length; a zero vector is left untouched
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Dot product over the shared nonzero dimensions
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (lhs, rhs) = (&self.entries, &other.entries);
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;

        while a < lhs.len() && b < rhs.len() {
            match lhs[a].0.cmp(&rhs[b].0) {
                Ordering::Less => a += 1,
                Ordering::Greater => b += 1,
                Ordering::Equal => {
                    sum += lhs[a].1 * rhs[b].1;
                    a += 1;
                    b += 1;
                }
            }
        }

        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_zeros() {
        let v = SparseVector::zeros(4);
        assert_eq!(v.dim(), 4);
        assert!(v.is_zero());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn test_from_weights_sorts_and_drops_zeros() {
        let v = SparseVector::from_weights(10, vec![(7, 2.0), (1, 0.0), (3, -1.0)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(3, -1.0), (7, 2.0)]);
        assert_eq!(v.get(7), 2.0);
        assert_eq!(v.get(1), 0.0);
    }

    #[test]
    fn test_norm_and_normalize() {
        let mut v = SparseVector::from_weights(5, vec![(0, 3.0), (4, 4.0)]);
        assert!((v.norm() - 5.0).abs() < EPS);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < EPS);
        assert!((v.get(0) - 0.6).abs() < EPS);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let v = SparseVector::zeros(3).normalized();
        assert!(v.is_zero());
    }

    #[test]
    fn test_dot_product() {
        let a = SparseVector::from_weights(6, vec![(0, 1.0), (2, 2.0), (5, 3.0)]);
        let b = SparseVector::from_weights(6, vec![(2, 4.0), (3, 9.0), (5, -1.0)]);
        assert!((a.dot(&b) - 5.0).abs() < EPS);
        assert!((a.dot(&b) - b.dot(&a)).abs() < EPS);
        assert_eq!(a.dot(&SparseVector::zeros(6)), 0.0);
    }

    #[quickcheck]
    fn prop_normalized_vector_has_unit_norm(weights: Vec<(u8, i16)>) -> bool {
        let mut seen = std::collections::BTreeMap::new();
        for (i, w) in weights {
            seen.insert(i as usize, w as f64);
        }
        let v = SparseVector::from_weights(256, seen).normalized();
        v.is_zero() || (v.norm() - 1.0).abs() < 1e-9
    }

    #[quickcheck]
    fn prop_self_dot_of_unit_vector_is_one(weights: Vec<(u8, i16)>) -> bool {
        let seen: std::collections::BTreeMap<usize, f64> =
            weights.into_iter().map(|(i, w)| (i as usize, w as f64)).collect();
        let v = SparseVector::from_weights(256, seen).normalized();
        v.is_zero() || (v.dot(&v) - 1.0).abs() < 1e-9
    }
}
