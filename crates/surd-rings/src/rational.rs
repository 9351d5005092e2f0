//! Rational numbers as prime multisets.
//!
//! A `RationalNumber` keeps its numerator and denominator factorized. The
//! two multisets never share a prime, so equality is structural and
//! multiplication never needs a gcd. Addition is the only operation that
//! has to leave factorized form: it multiplies out, sums, and factorizes
//! the result again.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::Zero;
use surd_integers::{factorize, Integer, PrimeFactorizer, PrimeMultiset, Result, SurdError};

use crate::parse;
use crate::traits::{ExactField, ExactRing};

/// An exact rational number in canonical factorized form.
///
/// Invariants, restored by [`RationalNumber::simplify`] after every
/// mutation:
/// - `numer` and `denom` share no prime;
/// - a zero value has an empty `denom` and is never negative;
/// - a `denom` holding the zero sentinel marks an undefined value, which
///   fails every further operation with `DivisionByZero`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RationalNumber {
    numer: PrimeMultiset,
    denom: PrimeMultiset,
    negative: bool,
}

impl RationalNumber {
    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        Self::from_integers(&Integer::new(numerator), &Integer::new(denominator))
    }

    /// Creates a rational from arbitrary precision numerator and denominator.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` if `denominator` is zero.
    /// - `FactorizationOverflow` if either part cannot be factorized.
    pub fn from_integers(numerator: &Integer, denominator: &Integer) -> Result<Self> {
        if denominator.is_zero() {
            return Err(SurdError::DivisionByZero);
        }
        let mut r = Self {
            numer: factorize(&numerator.abs())?,
            denom: factorize(&denominator.abs())?,
            negative: numerator.is_negative() != denominator.is_negative(),
        };
        r.simplify();
        Ok(r)
    }

    /// Creates a rational from an integer (denominator = 1).
    ///
    /// # Errors
    ///
    /// Returns `FactorizationOverflow` if `n` cannot be factorized.
    pub fn from_integer(n: &Integer) -> Result<Self> {
        let mut r = Self {
            numer: factorize(&n.abs())?,
            denom: PrimeMultiset::new(),
            negative: n.is_negative(),
        };
        r.simplify();
        Ok(r)
    }

    /// Creates a rational from an i64.
    ///
    /// # Errors
    ///
    /// Returns `FactorizationOverflow` if `n` cannot be factorized.
    pub fn from_i64(n: i64) -> Result<Self> {
        Self::from_integer(&Integer::new(n))
    }

    /// Converts a float exactly, through its shortest decimal expansion.
    ///
    /// `0.125` becomes `1/8`; `0.1` becomes `1/10`, not the binary value
    /// nearest to it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(SurdError::malformed(format!(
                "{value} has no exact rational value"
            )));
        }
        Self::from_decimal_str(&value.to_string())
    }

    /// Parses a decimal literal such as `-4.50`.
    ///
    /// The denominator is the smallest power of ten that clears the
    /// fractional digits.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `s` is not a decimal literal.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let literal = parse::decimal(s)?;
        let fraction = literal.fraction.trim_end_matches('0');
        let digits = format!("{}{}", literal.whole, fraction);
        let scale = u32::try_from(fraction.len())
            .map_err(|_| SurdError::malformed(format!("{s:?} has too many digits")))?;

        let mut denom = PrimeMultiset::new();
        denom.insert_many(2, scale);
        denom.insert_many(5, scale);
        let mut r = Self {
            numer: factorize(&digits.parse::<Integer>()?)?,
            denom,
            negative: literal.negative,
        };
        r.simplify();
        Ok(r)
    }

    /// `prime^exp` for a prime and a signed exponent.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if `prime` is not prime.
    /// - `UnsupportedOperation` if `|exp|` exceeds `u32::MAX`.
    pub fn prime_power(prime: u64, exp: i64) -> Result<Self> {
        if !PrimeFactorizer::global().is_prime(prime)? {
            return Err(SurdError::malformed(format!("{prime} is not prime")));
        }
        let times = u32::try_from(exp.unsigned_abs())
            .map_err(|_| SurdError::unsupported(format!("exponent {exp} is too large")))?;
        let mut power = PrimeMultiset::new();
        power.insert_many(prime, times);
        let (numer, denom) = if exp >= 0 {
            (power, PrimeMultiset::new())
        } else {
            (PrimeMultiset::new(), power)
        };
        let mut r = Self {
            numer,
            denom,
            negative: false,
        };
        r.simplify();
        Ok(r)
    }

    #[cfg(test)]
    pub(crate) fn undefined() -> Self {
        Self {
            numer: PrimeMultiset::new(),
            denom: PrimeMultiset::zero_sentinel(),
            negative: false,
        }
    }

    /// Restores the canonical form.
    ///
    /// A zero numerator clears the denominator and sign; otherwise every
    /// prime shared by numerator and denominator is cancelled.
    pub fn simplify(&mut self) {
        if self.numer.is_zero_sentinel() {
            self.denom = PrimeMultiset::new();
            self.negative = false;
            return;
        }
        if self.denom.is_zero_sentinel() {
            return;
        }
        let shared: Vec<(u64, u32)> = self
            .numer
            .iter()
            .filter_map(|(p, c)| {
                let common = c.min(self.denom.count(p));
                (common > 0).then_some((p, common))
            })
            .collect();
        for (p, common) in shared {
            self.numer.remove_many(p, common);
            self.denom.remove_many(p, common);
        }
    }

    /// The numerator's prime factors.
    #[must_use]
    pub fn numer(&self) -> &PrimeMultiset {
        &self.numer
    }

    /// The denominator's prime factors.
    #[must_use]
    pub fn denom(&self) -> &PrimeMultiset {
        &self.denom
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the denominator holds the zero sentinel.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.denom.is_zero_sentinel()
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denom.is_empty()
    }

    /// Absolute value of the numerator.
    #[must_use]
    pub fn numer_prod(&self) -> Integer {
        self.numer.product()
    }

    /// The denominator (zero when undefined).
    #[must_use]
    pub fn denom_prod(&self) -> Integer {
        self.denom.product()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        let mut r = self.clone();
        r.negative = false;
        r
    }

    /// Raises to an integer power.
    ///
    /// `x^0` is 1 for every defined `x`, zero included.
    ///
    /// # Errors
    ///
    /// - `DivisionByZero` for a negative power of zero or an undefined base.
    /// - `UnsupportedOperation` if a multiplicity would overflow.
    pub fn powi(&self, exp: i64) -> Result<Self> {
        self.ensure_defined()?;
        if exp == 0 {
            return Ok(Self::one());
        }
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let times = u32::try_from(exp.unsigned_abs())
            .map_err(|_| SurdError::unsupported(format!("exponent {exp} is too large")))?;
        let overflow = || SurdError::unsupported(format!("{self}^{exp} is too large"));

        Ok(Self {
            numer: base.numer.repeated(times).ok_or_else(overflow)?,
            denom: base.denom.repeated(times).ok_or_else(overflow)?,
            negative: base.negative && times % 2 == 1,
        })
    }

    /// Largest integer not greater than this value.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if undefined.
    pub fn floor(&self) -> Result<Integer> {
        self.ensure_defined()?;
        let n = self.numer_prod();
        let d = self.denom_prod();
        let q = &n / &d;
        if !self.negative {
            return Ok(q);
        }
        if (&n % &d).is_zero() {
            Ok(-q)
        } else {
            Ok(-q - Integer::new(1))
        }
    }

    /// The integer part, truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if undefined.
    pub fn to_integer(&self) -> Result<Integer> {
        self.ensure_defined()?;
        let q = &self.numer_prod() / &self.denom_prod();
        Ok(if self.negative { -q } else { q })
    }

    /// Splits off the whole-number part.
    ///
    /// Returns the integer part (truncated toward zero) and leaves `self`
    /// holding the proper fraction that remains, with the same sign:
    /// `-7/2` yields `-3` and leaves `-1/2`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if undefined.
    pub fn mixed(&mut self) -> Result<Integer> {
        let whole = self.to_integer()?;
        let remainder = &self.numer_prod() % &self.denom_prod();
        self.numer = factorize(&remainder)?;
        self.simplify();
        Ok(whole)
    }

    /// Lossy conversion to a float. Undefined values give NaN.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.is_undefined() {
            return f64::NAN;
        }
        let magnitude = self.numer_prod().to_f64() / self.denom_prod().to_f64();
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Multiplies in place, leaving `self` canonical.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if either operand is undefined.
    pub fn mul_assign_checked(&mut self, other: &Self) -> Result<()> {
        self.ensure_defined()?;
        other.ensure_defined()?;
        self.numer.extend(&other.numer);
        self.denom.extend(&other.denom);
        self.negative ^= other.negative;
        self.simplify();
        Ok(())
    }

    /// Divides in place, leaving `self` canonical.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if `other` is zero or either operand is undefined.
    pub fn div_assign_checked(&mut self, other: &Self) -> Result<()> {
        self.mul_assign_checked(&other.recip()?)
    }

    /// Canonical form: explicit sign and explicit denominator.
    ///
    /// `2/3` is `+2/3`, `-3` is `-3/1`, zero is `+0/1`. Parsing the result
    /// with [`str::parse`] yields an equal value.
    #[must_use]
    pub fn repr(&self) -> String {
        let sign = if self.negative { '-' } else { '+' };
        if self.is_undefined() {
            format!("{sign}undef")
        } else if self.is_zero() {
            "+0/1".to_string()
        } else {
            format!("{sign}{}/{}", self.numer_prod(), self.denom_prod())
        }
    }

    pub(crate) fn ensure_defined(&self) -> Result<()> {
        if self.is_undefined() {
            Err(SurdError::DivisionByZero)
        } else {
            Ok(())
        }
    }
}

impl ExactRing for RationalNumber {
    fn zero() -> Self {
        Self {
            numer: PrimeMultiset::zero_sentinel(),
            denom: PrimeMultiset::new(),
            negative: false,
        }
    }

    fn one() -> Self {
        Self {
            numer: PrimeMultiset::new(),
            denom: PrimeMultiset::new(),
            negative: false,
        }
    }

    fn is_zero(&self) -> bool {
        self.numer.is_zero_sentinel()
    }

    fn is_one(&self) -> bool {
        !self.negative && self.numer.is_empty() && self.denom.is_empty()
    }

    fn checked_add(&self, other: &Self) -> Result<Self> {
        self.ensure_defined()?;
        other.ensure_defined()?;

        // Denominator factors each side lacks from the other.
        let only_self = self.denom.difference(&other.denom);
        let only_other = other.denom.difference(&self.denom);

        let mut lhs = self.numer.union(&only_other).product();
        if self.negative {
            lhs = -lhs;
        }
        let mut rhs = other.numer.union(&only_self).product();
        if other.negative {
            rhs = -rhs;
        }
        let sum = lhs + rhs;

        let mut r = Self {
            numer: factorize(&sum.abs())?,
            denom: self.denom.union(&only_other),
            negative: sum.is_negative(),
        };
        r.simplify();
        Ok(r)
    }

    fn checked_mul(&self, other: &Self) -> Result<Self> {
        let mut r = self.clone();
        r.mul_assign_checked(other)?;
        Ok(r)
    }

    fn negate(&self) -> Self {
        let mut r = self.clone();
        r.negative = !self.negative && !self.is_zero();
        r
    }
}

impl ExactField for RationalNumber {
    fn recip(&self) -> Result<Self> {
        self.ensure_defined()?;
        if self.is_zero() {
            return Err(SurdError::DivisionByZero);
        }
        Ok(Self {
            numer: self.denom.clone(),
            denom: self.numer.clone(),
            negative: self.negative,
        })
    }
}

impl PartialOrd for RationalNumber {
    /// `a < b` iff `a - b` is negative. Undefined operands are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let diff = self.checked_sub(other).ok()?;
        Some(if diff.is_zero() {
            Ordering::Equal
        } else if diff.is_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        })
    }
}

impl fmt::Debug for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RationalNumber({})", self.repr())
    }
}

impl fmt::Display for RationalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            return write!(f, "undef");
        }
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.numer_prod())?;
        if !self.denom.is_empty() {
            write!(f, "/{}", self.denom_prod())?;
        }
        Ok(())
    }
}

impl FromStr for RationalNumber {
    type Err = SurdError;

    /// Parses `"<sign><numerator>/<denominator>"`; sign and denominator are optional.
    fn from_str(s: &str) -> Result<Self> {
        parse::rational(s)?.build()
    }
}

impl TryFrom<i64> for RationalNumber {
    type Error = SurdError;

    fn try_from(n: i64) -> Result<Self> {
        Self::from_i64(n)
    }
}

impl TryFrom<f64> for RationalNumber {
    type Error = SurdError;

    fn try_from(value: f64) -> Result<Self> {
        Self::from_f64(value)
    }
}

// Operators return `Result` because every operation can meet an undefined operand.
impl Add for &RationalNumber {
    type Output = Result<RationalNumber>;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs)
    }
}

impl Sub for &RationalNumber {
    type Output = Result<RationalNumber>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs)
    }
}

impl Mul for &RationalNumber {
    type Output = Result<RationalNumber>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.checked_mul(rhs)
    }
}

impl Div for &RationalNumber {
    type Output = Result<RationalNumber>;

    fn div(self, rhs: Self) -> Self::Output {
        self.checked_div(rhs)
    }
}

impl Neg for &RationalNumber {
    type Output = RationalNumber;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for RationalNumber {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> RationalNumber {
        RationalNumber::new(n, d).unwrap()
    }

    #[test]
    fn test_reduction() {
        // 4/6 should reduce to 2/3
        let r = q(4, 6);
        assert_eq!(r.numer_prod().to_i64(), Some(2));
        assert_eq!(r.denom_prod().to_i64(), Some(3));
        assert_eq!(r.to_string(), "2/3");
    }

    #[test]
    fn test_sign_normalization() {
        assert_eq!(q(-1, 2), q(1, -2));
        assert_eq!(q(-1, -2), q(1, 2));
        assert!(!q(0, -5).is_negative());
        assert_eq!(q(0, -5), RationalNumber::zero());
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(RationalNumber::new(1, 0), Err(SurdError::DivisionByZero));
    }

    #[test]
    fn test_decimal_construction() {
        assert_eq!(RationalNumber::from_f64(0.125).unwrap(), q(1, 8));
        assert_eq!(RationalNumber::from_f64(4.5).unwrap(), q(9, 2));
        assert_eq!(RationalNumber::from_f64(-0.125).unwrap(), q(-1, 8));
        assert_eq!(RationalNumber::from_f64(0.99999).unwrap(), q(99_999, 100_000));
        assert_eq!(RationalNumber::from_f64(3.0).unwrap(), q(3, 1));
        assert_eq!(RationalNumber::from_f64(-0.0).unwrap(), RationalNumber::zero());
        assert_eq!(RationalNumber::from_decimal_str("2.500").unwrap(), q(5, 2));
        assert!(RationalNumber::from_f64(f64::NAN).is_err());
        assert!(RationalNumber::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_basic_ops() {
        let a = q(1, 2);
        let b = q(1, 3);
        assert_eq!((&a + &b).unwrap(), q(5, 6));
        assert_eq!((&a - &b).unwrap(), q(1, 6));
        assert_eq!((&a * &b).unwrap(), q(1, 6));
        assert_eq!((&a / &b).unwrap(), q(3, 2));
    }

    #[test]
    fn test_decimal_operands() {
        // 9/2 + -1/8 and 9/2 * -1/8
        let a = RationalNumber::from_f64(4.5).unwrap();
        let b = RationalNumber::from_f64(-0.125).unwrap();
        assert_eq!((&a + &b).unwrap(), q(35, 8));
        assert_eq!((&a * &b).unwrap(), q(-9, 16));
        assert_eq!((&b * &a).unwrap(), q(-9, 16));
        let zero = RationalNumber::zero();
        assert_eq!((&zero + &zero).unwrap(), zero);
    }

    #[test]
    fn test_shared_denominators() {
        // 1/12 + 1/18: denominators share 2 * 3
        assert_eq!((&q(1, 12) + &q(1, 18)).unwrap(), q(5, 36));
        assert_eq!((&q(1, 6) - &q(1, 6)).unwrap(), RationalNumber::zero());
        assert_eq!((&q(-3, 4) + &q(1, 4)).unwrap(), q(-1, 2));
    }

    #[test]
    fn test_recip() {
        assert_eq!(q(-3, 5).recip().unwrap(), q(-5, 3));
        assert_eq!(
            RationalNumber::zero().recip(),
            Err(SurdError::DivisionByZero)
        );
        assert_eq!(
            (&q(1, 2) / &RationalNumber::zero()),
            Err(SurdError::DivisionByZero)
        );
    }

    #[test]
    fn test_undefined_propagates() {
        let undef = RationalNumber::undefined();
        let one = RationalNumber::one();
        assert_eq!(undef.checked_add(&one), Err(SurdError::DivisionByZero));
        assert_eq!(one.checked_add(&undef), Err(SurdError::DivisionByZero));
        assert_eq!(undef.checked_mul(&one), Err(SurdError::DivisionByZero));
        assert_eq!(undef.recip(), Err(SurdError::DivisionByZero));
        assert_eq!(undef.powi(2), Err(SurdError::DivisionByZero));
        assert_eq!(undef.to_string(), "undef");
        assert!(undef.partial_cmp(&one).is_none());
    }

    #[test]
    fn test_powi() {
        assert_eq!(q(-2, 3).powi(3).unwrap(), q(-8, 27));
        assert_eq!(q(-2, 3).powi(2).unwrap(), q(4, 9));
        assert_eq!(q(-2, 3).powi(-3).unwrap(), q(-27, 8));
        assert_eq!(q(5, 7).powi(0).unwrap(), RationalNumber::one());
        assert_eq!(RationalNumber::zero().powi(0).unwrap(), RationalNumber::one());
        assert_eq!(RationalNumber::zero().powi(3).unwrap(), RationalNumber::zero());
        assert_eq!(
            RationalNumber::zero().powi(-1),
            Err(SurdError::DivisionByZero)
        );
    }

    #[test]
    fn test_ordering() {
        assert!(q(1, 3) < q(1, 2));
        assert!(q(-1, 2) < q(-1, 3));
        assert!(q(2, 4) <= q(1, 2));
        assert!(q(7, 1) > RationalNumber::zero());
    }

    #[test]
    fn test_floor_and_mixed() {
        assert_eq!(q(7, 2).floor().unwrap().to_i64(), Some(3));
        assert_eq!(q(-7, 2).floor().unwrap().to_i64(), Some(-4));
        assert_eq!(q(-4, 2).floor().unwrap().to_i64(), Some(-2));
        assert_eq!(q(-7, 2).to_integer().unwrap().to_i64(), Some(-3));

        let mut r = q(-7, 2);
        assert_eq!(r.mixed().unwrap().to_i64(), Some(-3));
        assert_eq!(r, q(-1, 2));

        let mut whole = q(6, 3);
        assert_eq!(whole.mixed().unwrap().to_i64(), Some(2));
        assert_eq!(whole, RationalNumber::zero());
    }

    #[test]
    fn test_in_place_ops() {
        let mut r = q(2, 3);
        r.mul_assign_checked(&q(9, 4)).unwrap();
        assert_eq!(r, q(3, 2));
        r.div_assign_checked(&q(-3, 1)).unwrap();
        assert_eq!(r, q(-1, 2));
        assert_eq!(
            r.div_assign_checked(&RationalNumber::zero()),
            Err(SurdError::DivisionByZero)
        );
    }

    #[test]
    fn test_display_and_repr() {
        assert_eq!(q(3, 1).to_string(), "3");
        assert_eq!(q(-2, 3).to_string(), "-2/3");
        assert_eq!(RationalNumber::zero().to_string(), "0");
        assert_eq!(q(3, 1).repr(), "+3/1");
        assert_eq!(q(-2, 3).repr(), "-2/3");
        assert_eq!(RationalNumber::zero().repr(), "+0/1");
    }

    #[test]
    fn test_parse() {
        assert_eq!("-7/29".parse::<RationalNumber>().unwrap(), q(-7, 29));
        assert_eq!("+4/6".parse::<RationalNumber>().unwrap(), q(2, 3));
        assert_eq!("12".parse::<RationalNumber>().unwrap(), q(12, 1));
        assert_eq!(" -0 ".parse::<RationalNumber>().unwrap(), RationalNumber::zero());
        assert_eq!(
            "1/0".parse::<RationalNumber>(),
            Err(SurdError::DivisionByZero)
        );
        assert!(matches!(
            "1/".parse::<RationalNumber>(),
            Err(SurdError::MalformedInput(_))
        ));
        assert!(matches!(
            "abc".parse::<RationalNumber>(),
            Err(SurdError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_to_f64() {
        assert!((q(-1, 8).to_f64() + 0.125).abs() < 1e-15);
        assert!(RationalNumber::undefined().to_f64().is_nan());
    }

    #[test]
    fn test_prime_power() {
        assert_eq!(RationalNumber::prime_power(2, 3).unwrap(), q(8, 1));
        assert_eq!(RationalNumber::prime_power(3, -2).unwrap(), q(1, 9));
        assert_eq!(RationalNumber::prime_power(5, 0).unwrap(), RationalNumber::one());
    }

    #[test]
    fn test_prime_power_rejects_non_primes() {
        for (base, exp) in [(4, 1), (1, 5), (0, -1), (0, 0), (91, 2)] {
            assert!(
                matches!(
                    RationalNumber::prime_power(base, exp),
                    Err(SurdError::MalformedInput(_))
                ),
                "{base}^{exp}"
            );
        }
    }
}
