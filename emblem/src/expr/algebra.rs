//! Operator sugar for expressions.
//!
//! `+ - * /` work between any two of `Expression`, `&Expression`, `Symbol`, `&Symbol`
//! and a scalar, in either order, and always produce a new [`Expression`]. Borrowed
//! operands are copied, owned ones are consumed. The compound forms (`+=` ...) grow
//! the left expression in place, and unary `-` wraps its operand in a negation.
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::expr::{Expression, IntoExpression};
use crate::ops::{BinaryOp, UnaryOp};
use crate::scalar::Scalar;
use crate::symbol::Symbol;

/// Implements the binary operators and negation on an operand type, for any
/// right-hand side convertible into an expression.
macro_rules! define_ops_expr {
    ($operand:ty) => {
        define_ops_expr!(@binary $operand, Add, add, BinaryOp::Add);
        define_ops_expr!(@binary $operand, Sub, sub, BinaryOp::Sub);
        define_ops_expr!(@binary $operand, Mul, mul, BinaryOp::Mul);
        define_ops_expr!(@binary $operand, Div, div, BinaryOp::Div);

        impl<T: Scalar> Neg for $operand {
            type Output = Expression<T>;

            fn neg(self) -> Self::Output {
                Expression::unary(UnaryOp::Negate, self)
            }
        }
    };
    (@binary $operand:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<T: Scalar, R: IntoExpression<T>> $trait<R> for $operand {
            type Output = Expression<T>;

            fn $method(self, rhs: R) -> Self::Output {
                Expression::binary($op, self, rhs)
            }
        }
    };
}

define_ops_expr!(Expression<T>);
define_ops_expr!(&Expression<T>);
define_ops_expr!(Symbol<T>);
define_ops_expr!(&Symbol<T>);

/// Scalar on the left: `2.0 * x`. Coherence rules require one impl per concrete
/// scalar type.
macro_rules! define_ops_scalar {
    ($($scalar:ty),*) => {
        $(
            define_ops_scalar!(@operand $scalar, Expression<$scalar>);
            define_ops_scalar!(@operand $scalar, &Expression<$scalar>);
            define_ops_scalar!(@operand $scalar, Symbol<$scalar>);
            define_ops_scalar!(@operand $scalar, &Symbol<$scalar>);
        )*
    };
    (@operand $scalar:ty, $operand:ty) => {
        define_ops_scalar!(@binary $scalar, $operand, Add, add, BinaryOp::Add);
        define_ops_scalar!(@binary $scalar, $operand, Sub, sub, BinaryOp::Sub);
        define_ops_scalar!(@binary $scalar, $operand, Mul, mul, BinaryOp::Mul);
        define_ops_scalar!(@binary $scalar, $operand, Div, div, BinaryOp::Div);
    };
    (@binary $scalar:ty, $operand:ty, $trait:ident, $method:ident, $op:expr) => {
        impl $trait<$operand> for $scalar {
            type Output = Expression<$scalar>;

            fn $method(self, rhs: $operand) -> Self::Output {
                Expression::binary($op, self, rhs)
            }
        }
    };
}

define_ops_scalar!(f32, f64);

macro_rules! define_assign_ops {
    ($($trait:ident, $method:ident, $op:expr);* $(;)?) => {
        $(
            impl<T: Scalar, R: IntoExpression<T>> $trait<R> for Expression<T> {
                fn $method(&mut self, rhs: R) {
                    self.apply_assign($op, rhs);
                }
            }
        )*
    };
}

define_assign_ops! {
    AddAssign, add_assign, BinaryOp::Add;
    SubAssign, sub_assign, BinaryOp::Sub;
    MulAssign, mul_assign, BinaryOp::Mul;
    DivAssign, div_assign, BinaryOp::Div;
}
