use strum::EnumIs;
use thiserror::Error;

use crate::{entity::BinaryOp, field::IntegerField};

/// Failures raised while evaluating expressions or serializing values.
///
/// Construction of entities and packs never fails; pack consistency is reported separately
/// through [`crate::validate::ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, Error)]
pub enum Error {
    /// The operator is not defined for the kinds of the resolved operands.
    #[error("Operator `{op}` cannot be applied to operands of kind `{lhs}` and `{rhs}`.")]
    OperandMismatch {
        op: BinaryOp,
        lhs: &'static str,
        rhs: &'static str,
    },

    /// Integer division or remainder by zero.
    #[error("Operator `{op}` has a zero divisor.")]
    DivisionByZero { op: BinaryOp },

    /// Checked integer arithmetic overflowed.
    #[error("Operator `{op}` overflowed on operands {lhs} and {rhs}.")]
    Overflow { op: BinaryOp, lhs: i128, rhs: i128 },

    /// The value's descriptor has no byte layout.
    #[error("A value described by `{descriptor}` has no fixed-width byte representation.")]
    NotSerializable { descriptor: String },

    /// The payload is not an integer although the descriptor is an integer field.
    #[error("Field `{field}` expects an integer payload, found `{found}`.")]
    PayloadMismatch { field: String, found: &'static str },

    /// The integer does not fit in the field.
    #[error("Value {value} does not fit in a `{field}` field.")]
    IntegerOutOfRange { value: i128, field: IntegerField },

    /// The output buffer cannot hold the serialized field.
    #[error("Serializing requires {required} bytes but only {available} are available.")]
    BufferTooSmall { required: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
