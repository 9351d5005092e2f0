//! Radical terms: a rational coefficient times primes raised to rational
//! exponents.
//!
//! # Canonical form
//!
//! Every exponent kept in `degrees` lies strictly between 0 and 1. The
//! integer part of an exponent is folded into the coefficient, so
//! `2^(3/2)` is stored as `2·2^(1/2)` and `2^(-1/2)` as `(1/2)·2^(1/2)`.
//! Two terms are therefore equal exactly when they denote the same number.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use num_traits::Zero;
use surd_integers::{Integer, PrimeFactorizer, Result, SurdError};

use crate::parse;
use crate::rational::RationalNumber;
use crate::traits::{ExactField, ExactRing};

/// `coefficient × Π p^(degrees[p])`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RadicalTerm {
    coefficient: RationalNumber,
    degrees: BTreeMap<u64, RationalNumber>,
}

impl RadicalTerm {
    /// The zero term.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_rational(RationalNumber::zero())
    }

    /// The unit term.
    #[must_use]
    pub fn one() -> Self {
        Self::from_rational(RationalNumber::one())
    }

    /// A term with no radical part.
    #[must_use]
    pub fn from_rational(coefficient: RationalNumber) -> Self {
        Self {
            coefficient,
            degrees: BTreeMap::new(),
        }
    }

    /// Builds a term from a coefficient and `(prime, exponent)` pairs.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if a base is not prime.
    /// - Any error raised while canonicalizing.
    pub fn new(
        coefficient: RationalNumber,
        degrees: impl IntoIterator<Item = (u64, RationalNumber)>,
    ) -> Result<Self> {
        let factorizer = PrimeFactorizer::global();
        let mut term = Self::from_rational(coefficient);
        for (p, e) in degrees {
            if !factorizer.is_prime(p)? {
                return Err(SurdError::malformed(format!("radical base {p} is not prime")));
            }
            let slot = term.degrees.entry(p).or_insert_with(RationalNumber::zero);
            *slot = slot.checked_add(&e)?;
        }
        term.simplify()?;
        Ok(term)
    }

    /// `base^exponent` for any positive integer base.
    ///
    /// # Errors
    ///
    /// See [`RadicalTerm::pow_rational`].
    pub fn radical(base: u64, exponent: &RationalNumber) -> Result<Self> {
        let base = RationalNumber::from_integer(&Integer::from(base))?;
        Self::from_rational(base).pow_rational(exponent)
    }

    /// The rational coefficient.
    #[must_use]
    pub fn coefficient(&self) -> &RationalNumber {
        &self.coefficient
    }

    /// Prime bases and their exponents, ascending by prime.
    #[must_use]
    pub fn degrees(&self) -> &BTreeMap<u64, RationalNumber> {
        &self.degrees
    }

    /// Returns true if the term has no radical part.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Returns true if the term is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Like-term test: true when both terms carry the same radical part.
    #[must_use]
    pub fn cmp_degree(&self, other: &Self) -> bool {
        self.degrees == other.degrees
    }

    /// Restores canonical exponents.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` if the coefficient is undefined.
    /// - `UnsupportedOperation` if an exponent's integer part does not fit in an `i64`.
    pub fn simplify(&mut self) -> Result<()> {
        self.coefficient.ensure_defined()?;
        if self.coefficient.is_zero() {
            self.degrees.clear();
            return Ok(());
        }

        let degrees = std::mem::take(&mut self.degrees);
        for (p, e) in degrees {
            let whole = e.floor()?;
            if !whole.is_zero() {
                let k = whole.to_i64().ok_or_else(|| {
                    SurdError::unsupported(format!("exponent {e} of {p} is too large"))
                })?;
                self.coefficient
                    .mul_assign_checked(&RationalNumber::prime_power(p, k)?)?;
            }
            let fraction = e.checked_sub(&RationalNumber::from_integer(&whole)?)?;
            if !fraction.is_zero() {
                self.degrees.insert(p, fraction);
            }
        }
        Ok(())
    }

    /// Adds a like term.
    ///
    /// Zero is like every term. Callers combining unlike terms should use
    /// [`RealValue`](crate::RealValue) instead.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        if self.is_zero() {
            return Ok(other.clone());
        }
        if other.is_zero() {
            return Ok(self.clone());
        }
        debug_assert!(self.cmp_degree(other), "adding unlike radical terms");

        let mut sum = Self {
            coefficient: self.coefficient.checked_add(&other.coefficient)?,
            degrees: self.degrees.clone(),
        };
        sum.simplify()?;
        Ok(sum)
    }

    /// Subtracts a like term.
    ///
    /// # Errors
    ///
    /// See [`RadicalTerm::checked_add`].
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.checked_add(&other.negate())
    }

    /// Multiplies two terms, adding exponents per prime.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let mut product = Self {
            coefficient: self.coefficient.checked_mul(&other.coefficient)?,
            degrees: self.degrees.clone(),
        };
        for (&p, e) in &other.degrees {
            let slot = product
                .degrees
                .entry(p)
                .or_insert_with(RationalNumber::zero);
            *slot = slot.checked_add(e)?;
        }
        product.simplify()?;
        Ok(product)
    }

    /// The multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` for the zero term.
    pub fn recip(&self) -> Result<Self> {
        let mut inverse = Self {
            coefficient: self.coefficient.recip()?,
            degrees: self
                .degrees
                .iter()
                .map(|(&p, e)| (p, e.negate()))
                .collect(),
        };
        inverse.simplify()?;
        Ok(inverse)
    }

    /// Divides by another term, subtracting exponents per prime.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        self.checked_mul(&other.recip()?)
    }

    /// Returns the additive inverse.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            coefficient: self.coefficient.negate(),
            degrees: self.degrees.clone(),
        }
    }

    /// Raises to an integer power.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for a negative power of zero.
    /// - `UnsupportedOperation` if an exponent overflows.
    pub fn pow_int(&self, n: i64) -> Result<Self> {
        let scale = RationalNumber::from_i64(n)?;
        let mut power = Self {
            coefficient: self.coefficient.powi(n)?,
            degrees: self
                .degrees
                .iter()
                .map(|(&p, e)| Ok((p, e.checked_mul(&scale)?)))
                .collect::<Result<_>>()?,
        };
        power.simplify()?;
        Ok(power)
    }

    /// Raises to a rational power.
    ///
    /// The coefficient's primes move into the radical part before every
    /// exponent is scaled. A negative coefficient has a real root only for
    /// odd denominators.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for a negative power of zero.
    /// - `UnsupportedOperation` for an even root of a negative term.
    pub fn pow_rational(&self, r: &RationalNumber) -> Result<Self> {
        r.ensure_defined()?;
        if r.is_integer() {
            let n = r.to_integer()?.to_i64().ok_or_else(|| {
                SurdError::unsupported(format!("exponent {r} is too large"))
            })?;
            return self.pow_int(n);
        }
        if self.is_zero() {
            return if r.is_negative() {
                Err(SurdError::DivisionByZero)
            } else {
                Ok(Self::zero())
            };
        }

        let negative = if self.coefficient.is_negative() {
            if !r.denom_prod().is_divisible_by(2) {
                !r.numer_prod().is_divisible_by(2)
            } else {
                return Err(SurdError::unsupported(format!(
                    "({self})^({r}) is not real"
                )));
            }
        } else {
            false
        };

        let mut exponents = self.degrees.clone();
        let magnitude = self.coefficient.abs();
        let moved = magnitude
            .numer()
            .iter()
            .map(|(p, c)| (p, i64::from(c)))
            .chain(magnitude.denom().iter().map(|(p, c)| (p, -i64::from(c))));
        for (p, c) in moved {
            let slot = exponents.entry(p).or_insert_with(RationalNumber::zero);
            *slot = slot.checked_add(&RationalNumber::from_i64(c)?)?;
        }

        let coefficient = if negative {
            RationalNumber::one().negate()
        } else {
            RationalNumber::one()
        };
        let mut power = Self {
            coefficient,
            degrees: exponents
                .into_iter()
                .map(|(p, e)| Ok((p, e.checked_mul(r)?)))
                .collect::<Result<_>>()?,
        };
        power.simplify()?;
        Ok(power)
    }

    /// Lossy conversion to a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.degrees
            .iter()
            .fold(self.coefficient.to_f64(), |acc, (&p, e)| {
                acc * (p as f64).powf(e.to_f64())
            })
    }

    /// Canonical form: `(<coefficient repr>)*<p>^(<exponent repr>)*…`.
    ///
    /// `3·2^(1/2)` is `(+3/1)*2^(+1/2)`. Parsing the result yields an equal term.
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = format!("({})", self.coefficient.repr());
        for (p, e) in &self.degrees {
            out.push_str(&format!("*{p}^({})", e.repr()));
        }
        out
    }
}

impl fmt::Debug for RadicalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RadicalTerm({})", self.repr())
    }
}

impl fmt::Display for RadicalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.degrees.is_empty() {
            return write!(f, "{}", self.coefficient);
        }
        let mut first = true;
        if self.coefficient.is_negative() && self.coefficient.abs().is_one() {
            write!(f, "-")?;
        } else if !self.coefficient.is_one() {
            write!(f, "{}", self.coefficient)?;
            first = false;
        }
        for (p, e) in &self.degrees {
            if !first {
                write!(f, "*")?;
            }
            write!(f, "{p}^({e})")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for RadicalTerm {
    type Err = SurdError;

    /// Accepts the canonical form and the terse display form (`3*2^(1/2)`).
    /// Bases need not be prime: `4^(1/3)` becomes `2^(2/3)`.
    fn from_str(s: &str) -> Result<Self> {
        parse::radical(s)
    }
}

impl From<RationalNumber> for RadicalTerm {
    fn from(coefficient: RationalNumber) -> Self {
        Self::from_rational(coefficient)
    }
}
