//! Exact arithmetic traits.
//!
//! Every operation in the tower can fail (undefined operands, overflowing
//! factorization, unsupported forms), so these traits return `Result`
//! where the usual algebraic traits would return `Self`.

use std::fmt::Debug;

use surd_integers::Result;

/// A commutative ring with fallible operations.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`negate`)
pub trait ExactRing: Clone + PartialEq + Debug {
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// Computes `self + other`.
    ///
    /// # Errors
    ///
    /// Fails when either operand is undefined or the result cannot be
    /// represented.
    fn checked_add(&self, other: &Self) -> Result<Self>;

    /// Computes `self * other`.
    ///
    /// # Errors
    ///
    /// Fails when either operand is undefined.
    fn checked_mul(&self, other: &Self) -> Result<Self>;

    /// Returns the additive inverse.
    #[must_use]
    fn negate(&self) -> Self;

    /// Computes `self - other`.
    ///
    /// # Errors
    ///
    /// See [`ExactRing::checked_add`].
    fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.checked_add(&other.negate())
    }

    /// Computes self^n for non-negative n by repeated squaring.
    ///
    /// # Errors
    ///
    /// See [`ExactRing::checked_mul`].
    fn checked_pow(&self, n: u32) -> Result<Self> {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }

        Ok(result)
    }

    /// Sums a sequence of elements.
    ///
    /// # Errors
    ///
    /// See [`ExactRing::checked_add`].
    fn checked_sum<'a, I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        items
            .into_iter()
            .try_fold(Self::zero(), |acc, x| acc.checked_add(x))
    }
}

/// A ring where every non-zero element has a multiplicative inverse.
pub trait ExactField: ExactRing {
    /// Computes the multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for zero.
    fn recip(&self) -> Result<Self>;

    /// Divides by another element.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero.
    fn checked_div(&self, other: &Self) -> Result<Self> {
        self.checked_mul(&other.recip()?)
    }
}
