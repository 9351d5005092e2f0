//! Exact rational vectors.

use std::fmt;
use std::ops::Index;

use surd_integers::{Result, SurdError};
use surd_rings::{ExactRing, Operand, RadicalTerm, RationalNumber};

use crate::matrix::Matrix;

/// A fixed-length sequence of rationals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    entries: Vec<RationalNumber>,
}

impl Vector {
    /// Creates a vector from its entries.
    #[must_use]
    pub fn new(entries: Vec<RationalNumber>) -> Self {
        Self { entries }
    }

    /// Creates a vector from anything convertible to an [`Operand`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperandType` for an entry with a radical part.
    pub fn from_operands<T: Into<Operand>>(items: impl IntoIterator<Item = T>) -> Result<Self> {
        items
            .into_iter()
            .map(|x| x.into().to_rational())
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// The zero vector of length `n`.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self::new(vec![RationalNumber::zero(); n])
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the vector has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&RationalNumber> {
        self.entries.get(i)
    }

    /// The entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[RationalNumber] {
        &self.entries
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, RationalNumber> {
        self.entries.iter()
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(RationalNumber::is_zero)
    }

    fn ensure_len(&self, other: &Self) -> Result<()> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(SurdError::DimensionMismatch {
                expected: self.len(),
                found: other.len(),
            })
        }
    }

    fn zip_with(
        &self,
        other: &Self,
        f: impl Fn(&RationalNumber, &RationalNumber) -> Result<RationalNumber>,
    ) -> Result<Self> {
        self.ensure_len(other)?;
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| f(a, b))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for vectors of different lengths.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, RationalNumber::checked_add)
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for vectors of different lengths.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, RationalNumber::checked_sub)
    }

    /// Adds `other` into `self`.
    ///
    /// `self` is left unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for vectors of different lengths.
    pub fn add_assign_checked(&mut self, other: &Self) -> Result<()> {
        *self = self.checked_add(other)?;
        Ok(())
    }

    /// Multiplies every entry by `scalar`.
    ///
    /// # Errors
    ///
    /// Propagates rational arithmetic errors.
    pub fn scale(&self, scalar: &RationalNumber) -> Result<Self> {
        self.iter()
            .map(|x| x.checked_mul(scalar))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Elementwise product.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for vectors of different lengths.
    pub fn dot(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, RationalNumber::checked_mul)
    }

    /// Inner product.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` for vectors of different lengths.
    pub fn dot_sum(&self, other: &Self) -> Result<RationalNumber> {
        self.ensure_len(other)?;
        self.iter()
            .zip(other.iter())
            .try_fold(RationalNumber::zero(), |acc, (a, b)| {
                acc.checked_add(&a.checked_mul(b)?)
            })
    }

    /// Cross product of two 3-vectors.
    ///
    /// Expands the determinant of `[(1, -1, 1), self, other]` along its
    /// first row; the signs of the base row carry the cofactor signs.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` unless both vectors have length 3.
    pub fn cross(&self, other: &Self) -> Result<Self> {
        for v in [self, other] {
            if v.len() != 3 {
                return Err(SurdError::DimensionMismatch {
                    expected: 3,
                    found: v.len(),
                });
            }
        }
        let base = Self::from_operands([1_i64, -1, 1])?;
        (0..3)
            .map(|i| {
                let minor = Matrix::from_rows(vec![self.without(i), other.without(i)])?;
                base[i].checked_mul(&minor.det()?)
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Exact Euclidean length, `(Σ xᵢ²)^(1/2)`.
    ///
    /// # Errors
    ///
    /// Propagates rational arithmetic errors.
    pub fn norm(&self) -> Result<RadicalTerm> {
        let squares = self.dot_sum(self)?;
        RadicalTerm::from_rational(squares).pow_rational(&RationalNumber::new(1, 2)?)
    }

    /// The vector with entry `i` removed.
    pub(crate) fn without(&self, i: usize) -> Self {
        self.iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(_, x)| x.clone())
            .collect()
    }
}

impl Index<usize> for Vector {
    type Output = RationalNumber;

    fn index(&self, i: usize) -> &Self::Output {
        &self.entries[i]
    }
}

impl FromIterator<RationalNumber> for Vector {
    fn from_iter<I: IntoIterator<Item = RationalNumber>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a RationalNumber;
    type IntoIter = std::slice::Iter<'a, RationalNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<RationalNumber>> for Vector {
    fn from(entries: Vec<RationalNumber>) -> Self {
        Self::new(entries)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
