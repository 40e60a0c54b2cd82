//! Free functions wrapping an operand in a built-in operator.
//!
//! Each accepts anything convertible into an [`Expression`]: `sin(&x)`, `sin(x * y)`,
//! `sqrt(2.0)`.
use crate::expr::{Expression, IntoExpression};
use crate::ops::{BinaryOp, UnaryOp};
use crate::scalar::Scalar;

macro_rules! define_unary_fn {
    ($($(#[$meta:meta])* $name:ident => $op:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $name<T: Scalar>(operand: impl IntoExpression<T>) -> Expression<T> {
                Expression::unary(UnaryOp::$op, operand)
            }
        )*
    };
}

define_unary_fn! {
    /// Wraps the operand without changing its value.
    identity => Identity,
    sin => Sin,
    cos => Cos,
    tan => Tan,
    csc => Csc,
    sec => Sec,
    cot => Cot,
    abs => Abs,
    exp => Exp,
    /// Natural logarithm.
    log => Ln,
    log10 => Log10,
    sqrt => Sqrt,
}

/// `base` raised to `exponent`.
#[inline]
pub fn pow<T: Scalar>(base: impl IntoExpression<T>, exponent: impl IntoExpression<T>) -> Expression<T> {
    Expression::binary(BinaryOp::Pow, base, exponent)
}
