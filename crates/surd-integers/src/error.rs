//! Errors shared by every layer of the number tower.

use thiserror::Error;

use crate::Integer;

/// Result alias used throughout the workspace.
pub type Result<T, E = SurdError> = std::result::Result<T, E>;

/// Errors that can occur during exact arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SurdError {
    /// Reciprocal or division of zero, or arithmetic on an undefined value.
    #[error("division by zero")]
    DivisionByZero,

    /// The factorizer could not split the cofactor within its configured reach.
    #[error("factorization overflow: cofactor {cofactor} is beyond the factorizer's range")]
    FactorizationOverflow {
        /// The part of the input left unfactored.
        cofactor: Integer,
    },

    /// Operand lengths or shapes are incompatible.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The size the operation required.
        expected: usize,
        /// The size it was given.
        found: usize,
    },

    /// A string or constructor argument could not be interpreted.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The operation has no closed form in this representation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An operand could not be converted to the kind the operation needs.
    #[error("invalid operand type: expected {expected}, found {found}")]
    InvalidOperandType {
        /// The operand kind the operation accepts.
        expected: &'static str,
        /// The operand kind it was given.
        found: &'static str,
    },
}

impl SurdError {
    /// Builds a `MalformedInput` error from anything displayable.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Builds an `UnsupportedOperation` error from anything displayable.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }
}
