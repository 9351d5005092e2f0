//! # surd-rings
//!
//! The exact number tower for surd.
//!
//! This crate provides:
//! - Abstract traits: `ExactRing`, `ExactField`
//! - Rationals kept as prime multisets (`RationalNumber`)
//! - Radical terms with rational exponents (`RadicalTerm`)
//! - Sums of unlike radicals (`RealValue`)
//! - A tagged union for mixed-kind arithmetic (`Operand`)
//!
//! ## Tower
//!
//! ```text
//! RationalNumber ⊂ RadicalTerm ⊂ RealValue
//! ```
//!
//! Every value is kept canonical, so structural equality is numeric
//! equality. Every operation returns `Result`: an undefined operand, a
//! zero divisor or an unreachable factorization is an error, never a panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod operand;
mod parse;
pub mod radical;
pub mod rational;
pub mod real;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use operand::Operand;
pub use radical::RadicalTerm;
pub use rational::RationalNumber;
pub use real::RealValue;
pub use traits::{ExactField, ExactRing};
