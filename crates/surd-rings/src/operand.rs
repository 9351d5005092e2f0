//! Mixed-kind operands.
//!
//! Arithmetic between values of different kinds goes through [`Operand`]:
//! two rational-level operands stay rational, anything involving a radical
//! is carried out on [`RealValue`].

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use surd_integers::{Result, SurdError};

use crate::radical::RadicalTerm;
use crate::rational::RationalNumber;
use crate::real::RealValue;
use crate::traits::{ExactField, ExactRing};

/// Any value the number tower accepts as input.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A machine integer.
    Integer(i64),
    /// A float, read exactly through its decimal expansion.
    Decimal(f64),
    /// An exact rational.
    Rational(RationalNumber),
    /// A single radical term.
    Radical(RadicalTerm),
    /// A sum of radical terms.
    Real(RealValue),
}

impl Operand {
    /// Parses a canonical rational, a decimal literal, a radical term or a
    /// sum of radical terms, in that order of preference.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if no form matches, or the error raised
    /// while building the value.
    pub fn parse(s: &str) -> Result<Self> {
        if let Ok(r) = s.parse::<RationalNumber>() {
            return Ok(Self::Rational(r));
        }
        if let Ok(r) = RationalNumber::from_decimal_str(s) {
            return Ok(Self::Rational(r));
        }
        if let Ok(term) = s.parse::<RadicalTerm>() {
            return Ok(Self::Radical(term));
        }
        s.parse::<RealValue>().map(Self::Real)
    }

    /// Name of the variant, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Rational(_) => "rational",
            Self::Radical(_) => "radical",
            Self::Real(_) => "real",
        }
    }

    /// Returns true for integers, decimals and rationals.
    #[must_use]
    pub fn is_rational_level(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Decimal(_) | Self::Rational(_))
    }

    /// Converts to a rational.
    ///
    /// Radicals and reals convert only when they have no radical part.
    ///
    /// # Errors
    ///
    /// - `InvalidOperandType` for a value with a radical part.
    /// - `MalformedInput` for a non-finite decimal.
    pub fn to_rational(&self) -> Result<RationalNumber> {
        let invalid = || SurdError::InvalidOperandType {
            expected: "rational",
            found: self.kind(),
        };
        match self {
            Self::Integer(n) => RationalNumber::from_i64(*n),
            Self::Decimal(x) => RationalNumber::from_f64(*x),
            Self::Rational(r) => Ok(r.clone()),
            Self::Radical(t) if t.is_rational() => Ok(t.coefficient().clone()),
            Self::Real(v) => v.as_rational().ok_or_else(invalid),
            Self::Radical(_) => Err(invalid()),
        }
    }

    /// Lifts into a real value.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for a non-finite decimal.
    pub fn to_real(&self) -> Result<RealValue> {
        match self {
            Self::Radical(t) => Ok(RealValue::from_radical(t.clone())),
            Self::Real(v) => Ok(v.clone()),
            _ => Ok(RealValue::from_rational(self.to_rational()?)),
        }
    }

    fn combine(
        &self,
        other: &Self,
        rational: impl FnOnce(&RationalNumber, &RationalNumber) -> Result<RationalNumber>,
        real: impl FnOnce(&RealValue, &RealValue) -> Result<RealValue>,
    ) -> Result<Self> {
        if self.is_rational_level() && other.is_rational_level() {
            Ok(Self::Rational(rational(
                &self.to_rational()?,
                &other.to_rational()?,
            )?))
        } else {
            Ok(Self::Real(real(&self.to_real()?, &other.to_real()?)?))
        }
    }

    /// `self + other`.
    ///
    /// # Errors
    ///
    /// Propagates the arithmetic error of the chosen representation.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.combine(other, RationalNumber::checked_add, RealValue::checked_add)
    }

    /// `self - other`.
    ///
    /// # Errors
    ///
    /// Propagates the arithmetic error of the chosen representation.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.combine(other, RationalNumber::checked_sub, RealValue::checked_sub)
    }

    /// `self * other`.
    ///
    /// # Errors
    ///
    /// Propagates the arithmetic error of the chosen representation.
    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        self.combine(other, RationalNumber::checked_mul, RealValue::checked_mul)
    }

    /// `self / other`.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` if `other` is zero.
    /// - `UnsupportedOperation` when dividing by a multi-term real.
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        self.combine(other, RationalNumber::checked_div, RealValue::checked_div)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(x) => write!(f, "{x}"),
            Self::Rational(r) => write!(f, "{r}"),
            Self::Radical(t) => write!(f, "{t}"),
            Self::Real(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Self::Decimal(x)
    }
}

impl From<RationalNumber> for Operand {
    fn from(r: RationalNumber) -> Self {
        Self::Rational(r)
    }
}

impl From<RadicalTerm> for Operand {
    fn from(t: RadicalTerm) -> Self {
        Self::Radical(t)
    }
}

impl From<RealValue> for Operand {
    fn from(v: RealValue) -> Self {
        Self::Real(v)
    }
}

impl Add for &Operand {
    type Output = Result<Operand>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for &Operand {
    type Output = Result<Operand>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Mul for &Operand {
    type Output = Result<Operand>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl Div for &Operand {
    type Output = Result<Operand>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
    }
}
