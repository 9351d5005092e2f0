//! String forms of the number tower.
//!
//! Grammar (whitespace allowed around operators):
//!
//! ```text
//! rational := sign? digits ("/" digits)?
//! decimal  := sign? digits ("." digits?)?
//! factor   := "(" rational ")" | digits "^" exponent | digits ("/" digits)?
//! exponent := "(" rational ")" | digits
//! term     := sign? factor ("*" factor)*
//! real     := term (("+" | "-") term)*
//! ```
//!
//! Parsing produces literals that borrow the input; building a value from
//! them factorizes and canonicalizes.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of, space0},
    combinator::{all_consuming, map, opt},
    multi::{fold_many0, many0},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    IResult,
};
use surd_integers::{Integer, Result, SurdError};

use crate::radical::RadicalTerm;
use crate::rational::RationalNumber;
use crate::real::RealValue;
use crate::traits::ExactRing;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RationalLiteral<'a> {
    pub(crate) negative: bool,
    pub(crate) numer: &'a str,
    pub(crate) denom: Option<&'a str>,
}

impl RationalLiteral<'_> {
    pub(crate) fn build(&self) -> Result<RationalNumber> {
        let numer: Integer = self.numer.parse()?;
        let denom: Integer = match self.denom {
            Some(d) => d.parse()?,
            None => Integer::new(1),
        };
        let r = RationalNumber::from_integers(&numer, &denom)?;
        Ok(if self.negative { r.negate() } else { r })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecimalLiteral<'a> {
    pub(crate) negative: bool,
    pub(crate) whole: &'a str,
    pub(crate) fraction: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum FactorLiteral<'a> {
    Rational(RationalLiteral<'a>),
    Power {
        base: &'a str,
        exponent: RationalLiteral<'a>,
    },
}

impl FactorLiteral<'_> {
    fn build(&self) -> Result<RadicalTerm> {
        match self {
            FactorLiteral::Rational(r) => Ok(RadicalTerm::from_rational(r.build()?)),
            FactorLiteral::Power { base, exponent } => {
                let base = RationalNumber::from_integer(&base.parse::<Integer>()?)?;
                RadicalTerm::from_rational(base).pow_rational(&exponent.build()?)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TermLiteral<'a> {
    negative: bool,
    factors: Vec<FactorLiteral<'a>>,
}

impl TermLiteral<'_> {
    fn build(&self) -> Result<RadicalTerm> {
        let mut term = RadicalTerm::one();
        for factor in &self.factors {
            term = term.checked_mul(&factor.build()?)?;
        }
        Ok(if self.negative { term.negate() } else { term })
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn sign(input: &str) -> IResult<&str, bool> {
    map(opt(one_of("+-")), |c| c == Some('-'))(input)
}

fn unsigned_rational(input: &str) -> IResult<&str, RationalLiteral<'_>> {
    map(
        pair(digit1, opt(preceded(char('/'), digit1))),
        |(numer, denom)| RationalLiteral {
            negative: false,
            numer,
            denom,
        },
    )(input)
}

fn rational_literal(input: &str) -> IResult<&str, RationalLiteral<'_>> {
    map(pair(sign, unsigned_rational), |(negative, r)| RationalLiteral {
        negative,
        ..r
    })(input)
}

fn parenthesized(input: &str) -> IResult<&str, RationalLiteral<'_>> {
    delimited(
        pair(char('('), space0),
        rational_literal,
        pair(space0, char(')')),
    )(input)
}

fn decimal_literal(input: &str) -> IResult<&str, DecimalLiteral<'_>> {
    map(
        tuple((sign, digit1, opt(preceded(char('.'), digit0)))),
        |(negative, whole, fraction)| DecimalLiteral {
            negative,
            whole,
            fraction: fraction.unwrap_or(""),
        },
    )(input)
}

fn exponent(input: &str) -> IResult<&str, RationalLiteral<'_>> {
    alt((
        parenthesized,
        map(digit1, |numer| RationalLiteral {
            negative: false,
            numer,
            denom: None,
        }),
    ))(input)
}

fn factor(input: &str) -> IResult<&str, FactorLiteral<'_>> {
    alt((
        map(parenthesized, FactorLiteral::Rational),
        map(separated_pair(digit1, char('^'), exponent), |(base, exponent)| {
            FactorLiteral::Power { base, exponent }
        }),
        map(unsigned_rational, FactorLiteral::Rational),
    ))(input)
}

fn term_literal(input: &str) -> IResult<&str, TermLiteral<'_>> {
    let (input, negative) = sign(input)?;
    let (input, first) = preceded(space0, factor)(input)?;
    let (input, rest) = many0(preceded(delimited(space0, char('*'), space0), factor))(input)?;

    let mut factors = Vec::with_capacity(rest.len() + 1);
    factors.push(first);
    factors.extend(rest);
    Ok((input, TermLiteral { negative, factors }))
}

fn real_literal(input: &str) -> IResult<&str, Vec<TermLiteral<'_>>> {
    let (input, first) = term_literal(input)?;
    fold_many0(
        pair(delimited(space0, one_of("+-"), space0), term_literal),
        move || vec![first.clone()],
        |mut acc, (op, mut term)| {
            if op == '-' {
                term.negative = !term.negative;
            }
            acc.push(term);
            acc
        },
    )(input)
}

/// Runs `parser` over the whole of `s`, surrounding whitespace allowed.
fn complete<'a, O>(
    s: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Result<O> {
    all_consuming(delimited(space0, parser, space0))(s)
        .map(|(_, out)| out)
        .map_err(|e| SurdError::malformed(format!("cannot parse {s:?}: {e}")))
}

// ============================================================================
// Entry points
// ============================================================================

pub(crate) fn rational(s: &str) -> Result<RationalLiteral<'_>> {
    complete(s, rational_literal)
}

pub(crate) fn decimal(s: &str) -> Result<DecimalLiteral<'_>> {
    complete(s, decimal_literal)
}

pub(crate) fn radical(s: &str) -> Result<RadicalTerm> {
    complete(s, term_literal)?.build()
}

pub(crate) fn real(s: &str) -> Result<RealValue> {
    let terms = complete(s, real_literal)?
        .iter()
        .map(TermLiteral::build)
        .collect::<Result<Vec<_>>>()?;
    RealValue::new(terms)
}
