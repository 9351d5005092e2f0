//! Sums of unlike radical terms.

use std::fmt;
use std::str::FromStr;

use surd_integers::{Result, SurdError};
use tracing::trace;

use crate::parse;
use crate::radical::RadicalTerm;
use crate::rational::RationalNumber;
use crate::traits::{ExactField, ExactRing};

/// A finite sum of radical terms, no two of them alike.
///
/// Terms keep the order in which their radical part first appeared. The
/// empty sum is zero. Equality ignores term order.
#[derive(Clone, Default)]
pub struct RealValue {
    terms: Vec<RadicalTerm>,
}

impl RealValue {
    /// Builds a value from terms, merging like terms.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn new(terms: impl IntoIterator<Item = RadicalTerm>) -> Result<Self> {
        let mut value = Self {
            terms: terms.into_iter().collect(),
        };
        value.simplify()?;
        Ok(value)
    }

    /// A value with a single rational term.
    #[must_use]
    pub fn from_rational(r: RationalNumber) -> Self {
        Self::from_radical(RadicalTerm::from_rational(r))
    }

    /// A value with a single term.
    #[must_use]
    pub fn from_radical(term: RadicalTerm) -> Self {
        let terms = if term.is_zero() { Vec::new() } else { vec![term] };
        Self { terms }
    }

    /// The terms, in first-occurrence order.
    #[must_use]
    pub fn terms(&self) -> &[RadicalTerm] {
        &self.terms
    }

    /// Merges like terms and drops zero terms.
    ///
    /// # Errors
    ///
    /// Propagates coefficient arithmetic errors.
    pub fn simplify(&mut self) -> Result<()> {
        let before = self.terms.len();
        let mut merged: Vec<RadicalTerm> = Vec::with_capacity(before);
        for term in self.terms.drain(..) {
            // A cancelled slot has lost its radical part and must not absorb
            // rational terms.
            match merged
                .iter_mut()
                .find(|t| !t.is_zero() && t.cmp_degree(&term))
            {
                Some(existing) => *existing = existing.checked_add(&term)?,
                None => merged.push(term),
            }
        }
        merged.retain(|t| !t.is_zero());
        trace!(before, after = merged.len(), "merged like radicals");
        self.terms = merged;
        Ok(())
    }

    /// The value as a rational, if it has no radical part.
    #[must_use]
    pub fn as_rational(&self) -> Option<RationalNumber> {
        match self.terms.as_slice() {
            [] => Some(RationalNumber::zero()),
            [t] if t.is_rational() => Some(t.coefficient().clone()),
            _ => None,
        }
    }

    /// The value as a single term, if it has at most one.
    #[must_use]
    pub fn as_radical(&self) -> Option<RadicalTerm> {
        match self.terms.as_slice() {
            [] => Some(RadicalTerm::zero()),
            [t] => Some(t.clone()),
            _ => None,
        }
    }

    /// Raises to an integer power.
    ///
    /// Non-negative powers expand by repeated multiplication. Negative
    /// powers need a reciprocal, which exists only for single terms.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for a negative power of zero.
    /// - `UnsupportedOperation` for a negative power of a multi-term value.
    pub fn pow_int(&self, n: i64) -> Result<Self> {
        if let Some(term) = self.as_radical() {
            return Ok(Self::from_radical(term.pow_int(n)?));
        }
        match u32::try_from(n) {
            Ok(n) => self.checked_pow(n),
            Err(_) if n < 0 => Err(SurdError::unsupported(format!(
                "({self})^({n}) has no single-term reciprocal"
            ))),
            Err(_) => Err(SurdError::unsupported(format!("exponent {n} is too large"))),
        }
    }

    /// Raises to a rational power.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation` for a fractional power of a multi-term value.
    /// - See [`RadicalTerm::pow_rational`].
    pub fn pow_rational(&self, r: &RationalNumber) -> Result<Self> {
        if r.is_integer() {
            let n = r.to_integer()?.to_i64().ok_or_else(|| {
                SurdError::unsupported(format!("exponent {r} is too large"))
            })?;
            return self.pow_int(n);
        }
        match self.as_radical() {
            Some(term) => Ok(Self::from_radical(term.pow_rational(r)?)),
            None => Err(SurdError::unsupported(format!(
                "({self})^({r}) has no closed form"
            ))),
        }
    }

    /// Lossy conversion to a float.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.terms.iter().map(RadicalTerm::to_f64).sum()
    }

    /// Canonical form: term reprs joined by `" + "`. Zero is `(+0/1)`.
    #[must_use]
    pub fn repr(&self) -> String {
        if self.terms.is_empty() {
            return RadicalTerm::zero().repr();
        }
        self.terms
            .iter()
            .map(RadicalTerm::repr)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl ExactRing for RealValue {
    fn zero() -> Self {
        Self::default()
    }

    fn one() -> Self {
        Self::from_radical(RadicalTerm::one())
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn is_one(&self) -> bool {
        matches!(self.terms.as_slice(), [t] if *t == RadicalTerm::one())
    }

    fn checked_add(&self, other: &Self) -> Result<Self> {
        Self::new(self.terms.iter().chain(&other.terms).cloned())
    }

    fn checked_mul(&self, other: &Self) -> Result<Self> {
        let mut products = Vec::with_capacity(self.terms.len() * other.terms.len());
        for a in &self.terms {
            for b in &other.terms {
                products.push(a.checked_mul(b)?);
            }
        }
        Self::new(products)
    }

    fn negate(&self) -> Self {
        Self {
            terms: self.terms.iter().map(RadicalTerm::negate).collect(),
        }
    }
}

impl ExactField for RealValue {
    /// Only single terms have a reciprocal in this representation.
    fn recip(&self) -> Result<Self> {
        match self.terms.as_slice() {
            [] => Err(SurdError::DivisionByZero),
            [t] => Ok(Self::from_radical(t.recip()?)),
            _ => Err(SurdError::unsupported(format!(
                "1/({self}) needs rationalization"
            ))),
        }
    }
}

impl PartialEq for RealValue {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len() && self.terms.iter().all(|t| other.terms.contains(t))
    }
}

impl Eq for RealValue {}

impl fmt::Debug for RealValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RealValue({})", self.repr())
    }
}

impl fmt::Display for RealValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.terms.split_first() else {
            return write!(f, "0");
        };
        write!(f, "{first}")?;
        for term in rest {
            if term.coefficient().is_negative() {
                write!(f, " - {}", term.negate())?;
            } else {
                write!(f, " + {term}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for RealValue {
    type Err = SurdError;

    /// Parses terms joined by `+` or `-`, in canonical or display form.
    fn from_str(s: &str) -> Result<Self> {
        parse::real(s)
    }
}

impl From<RadicalTerm> for RealValue {
    fn from(term: RadicalTerm) -> Self {
        Self::from_radical(term)
    }
}

impl From<RationalNumber> for RealValue {
    fn from(r: RationalNumber) -> Self {
        Self::from_rational(r)
    }
}
