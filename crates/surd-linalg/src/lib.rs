//! # surd-linalg
//!
//! Exact linear algebra over rationals for surd.
//!
//! This crate provides:
//! - Rational vectors with dot and cross products and exact norms
//! - Matrices stored by rows
//! - Determinants by cofactor expansion, along any row or column
//! - Gauss-Jordan reduction (RREF), rank, solving and inversion
//! - Parallel determinant and products via rayon
//!
//! ## Complexity
//!
//! Cofactor expansion is factorial in the dimension. It is kept because it
//! is exact and division-free; row reduction is the practical route for
//! anything beyond small matrices.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod matrix;
pub mod parallel;
pub mod vector;

pub use matrix::{Line, Matrix, RowReduction};
pub use parallel::{parallel_dot, ParallelConfig};
pub use vector::Vector;

#[cfg(test)]
mod tests;
