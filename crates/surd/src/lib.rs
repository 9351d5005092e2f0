//! # Surd
//!
//! Exact real arithmetic over prime factorizations.
//!
//! Rationals are kept as multisets of primes, radicals as primes raised to
//! rational exponents, and real values as sums of unlike radicals. Nothing
//! is ever rounded: `2^(1/2) * 2^(1/2)` is exactly `2`.
//!
//! ## Features
//!
//! - **Factorization**: sieved prime table with bounded trial division
//! - **Rationals**: canonical, gcd-free multiplication, exact decimals
//! - **Radicals**: rational exponents with unique canonical form
//! - **Real values**: like-term merging, distributive products
//! - **Linear algebra**: determinants, RREF, solving and inversion
//!
//! ## Quick Start
//!
//! ```rust
//! use surd::prelude::*;
//!
//! # fn main() -> surd::Result<()> {
//! let root: RealValue = "2^(1/2)".parse()?;
//! let two = root.checked_mul(&root)?;
//! assert_eq!(two.as_rational(), Some(RationalNumber::new(2, 1)?));
//!
//! let a = Matrix::from_operands([[1_i64, 2], [3, 4]])?;
//! assert_eq!(a.det()?, RationalNumber::new(-2, 1)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use surd_integers as integers;
pub use surd_linalg as linalg;
pub use surd_rings as rings;

pub use surd_integers::{Result, SurdError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use surd_integers::{
        factorize, FactorizerConfig, Integer, PrimeFactorizer, PrimeMultiset, SurdError,
    };
    pub use surd_linalg::{Line, Matrix, ParallelConfig, RowReduction, Vector};
    pub use surd_rings::{ExactField, ExactRing, Operand, RadicalTerm, RationalNumber, RealValue};
}
