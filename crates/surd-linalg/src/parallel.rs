//! Parallel linear algebra operations.
//!
//! Parallel versions of the expensive matrix operations, using rayon for
//! work-stealing parallelism. Values are immutable and the shared prime
//! table is the only state threads have in common, so the parallel results
//! are identical to the sequential ones.

use rayon::prelude::*;
use surd_integers::{Result, SurdError};
use surd_rings::{ExactRing, RationalNumber};
use tracing::debug;

use crate::matrix::Matrix;
use crate::vector::Vector;

/// Configuration for parallel matrix operations.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum dimension to enable parallelism.
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 6,
        }
    }
}

impl Matrix {
    /// Determinant with the first level of the cofactor expansion spread
    /// over threads.
    ///
    /// Below `config.parallel_threshold` this is [`Matrix::det`].
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for a non-square matrix.
    pub fn det_parallel(&self, config: &ParallelConfig) -> Result<RationalNumber> {
        let n = self.nrows();
        if n < config.parallel_threshold {
            // Fall back to sequential for small matrices
            return self.det();
        }
        if !self.is_square() {
            return Err(SurdError::DimensionMismatch {
                expected: n,
                found: self.ncols(),
            });
        }
        debug!(n, "parallel determinant");

        let terms = (0..n)
            .into_par_iter()
            .map(|c| self.cofactor(0, c))
            .collect::<Result<Vec<_>>>()?;
        RationalNumber::checked_sum(&terms)
    }

    /// Matrix-matrix multiply (parallel): C = A * B.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless `other` has `ncols` rows.
    pub fn mul_matrix_parallel(&self, other: &Self, config: &ParallelConfig) -> Result<Self> {
        if self.nrows() < config.parallel_threshold {
            return self.mul_matrix(other);
        }
        self.ensure_inner(other)?;
        let columns = other.transpose();
        let rows = self
            .rows()
            .par_iter()
            .map(|row| columns.mul_vector(row))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }

    /// Matrix-vector multiply (parallel): y = A * x.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless `x` has `ncols` entries.
    pub fn mul_vector_parallel(&self, x: &Vector, config: &ParallelConfig) -> Result<Vector> {
        if self.nrows() < config.parallel_threshold {
            return self.mul_vector(x);
        }
        if x.len() != self.ncols() {
            return Err(SurdError::DimensionMismatch {
                expected: self.ncols(),
                found: x.len(),
            });
        }
        self.rows()
            .par_iter()
            .map(|row| row.dot_sum(x))
            .collect::<Result<Vec<_>>>()
            .map(Vector::new)
    }
}

/// Parallel inner product of two vectors.
///
/// # Errors
///
/// Returns `DimensionMismatch` for vectors of different lengths.
pub fn parallel_dot(a: &Vector, b: &Vector) -> Result<RationalNumber> {
    if a.len() != b.len() {
        return Err(SurdError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    a.entries()
        .par_iter()
        .zip(b.entries().par_iter())
        .map(|(x, y)| x.checked_mul(y))
        .try_reduce(RationalNumber::zero, |acc, x| acc.checked_add(&x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i64]]) -> Matrix {
        Matrix::from_operands(rows.iter().map(|r| r.iter().copied())).unwrap()
    }

    fn force_parallel() -> ParallelConfig {
        ParallelConfig {
            parallel_threshold: 1, // Force parallel path for testing
        }
    }

    #[test]
    fn test_parallel_det_matches_sequential() {
        let a = m(&[&[-2, 2, -3], &[-1, 1, 3], &[2, 0, -1]]);
        assert_eq!(a.det_parallel(&force_parallel()).unwrap(), a.det().unwrap());
        assert_eq!(
            a.det_parallel(&ParallelConfig::default()).unwrap(),
            RationalNumber::new(18, 1).unwrap()
        );
    }

    #[test]
    fn test_parallel_det_rejects_non_square() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        assert!(matches!(
            a.det_parallel(&force_parallel()),
            Err(SurdError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_parallel_products() {
        let a = m(&[&[1, 2], &[3, 4], &[5, 6]]);
        let b = m(&[&[1, 0, 2], &[0, 1, 3]]);
        let config = force_parallel();
        assert_eq!(
            a.mul_matrix_parallel(&b, &config).unwrap(),
            a.mul_matrix(&b).unwrap()
        );

        let x = Vector::from_operands([2_i64, -1]).unwrap();
        assert_eq!(
            a.mul_vector_parallel(&x, &config).unwrap(),
            a.mul_vector(&x).unwrap()
        );
    }

    #[test]
    fn test_parallel_dot() {
        let a = Vector::from_operands([1_i64, 2, 3]).unwrap();
        let b = Vector::from_operands([4_i64, 5, 6]).unwrap();

        let result = parallel_dot(&a, &b).unwrap();
        // 1*4 + 2*5 + 3*6 = 32
        assert_eq!(result, RationalNumber::new(32, 1).unwrap());
    }
}
