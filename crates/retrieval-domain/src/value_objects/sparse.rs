//! Sparse Vector Value Object
//!
//! A sparse vector pairs vocabulary indices with positive weights. All
//! dimensions not listed are implicitly zero.

use serde::{Deserialize, Serialize};

/// Value Object: Sparse Vector
///
/// `indices` and `values` are parallel arrays of equal length; each index
/// appears at most once. An empty sparse vector is a legal "no-match"
/// signal, not an error.
///
/// ## Business Rules
///
/// - `indices.len() == values.len()`
/// - every value in `values` is strictly positive
/// - an index may appear at most once
///
/// ## Example
///
/// ```
/// use retrieval_domain::value_objects::SparseVector;
///
/// let v = SparseVector::new(vec![3, 17], vec![0.42, 1.1]);
/// assert!(v.is_valid());
/// assert!(!v.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SparseVector {
    /// Vocabulary indices with a non-zero weight
    pub indices: Vec<u32>,
    /// Weights, parallel to `indices`
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Construct a sparse vector from parallel index/value arrays
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Self {
        Self { indices, values }
    }

    /// The empty sparse vector ("no match")
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if this sparse vector carries no non-zero dimensions
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of non-zero dimensions
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Validate the length-match and positivity invariants
    pub fn is_valid(&self) -> bool {
        self.indices.len() == self.values.len() && self.values.iter().all(|v| *v > 0.0)
    }
}
