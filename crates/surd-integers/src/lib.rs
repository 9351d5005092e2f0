//! # surd-integers
//!
//! Integer foundations for the surd number tower.
//!
//! This crate provides:
//! - Arbitrary precision integers (`Integer`, wrapping `dashu`)
//! - Prime tables built by sieve, with a shared process-wide default
//! - Trial-division factorization into prime multisets
//! - The workspace error type (`SurdError`)
//!
//! ## Factorization reach
//!
//! The default factorizer sieves primes up to 2^16 and continues trial
//! division up to 2^24, so every input below 2^48 factorizes. Larger inputs
//! succeed when their second-largest prime factor is within reach and fail
//! with `SurdError::FactorizationOverflow` otherwise.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod factor;
pub mod integer;
pub mod multiset;
pub mod primes;

#[cfg(test)]
mod proptests;

pub use error::{Result, SurdError};
pub use factor::{factorize, factorize_u64, PrimeFactorizer};
pub use integer::Integer;
pub use multiset::PrimeMultiset;
pub use primes::{FactorizerConfig, PrimeTable};
