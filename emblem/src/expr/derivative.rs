//! Symbolic differentiation.
//!
//! Rules are applied bottom-up in a single post-order pass, without any
//! simplification, so the result is correct but verbose: `d/dx (x * x)` renders as
//! `(1 * x) + (x * 1)`. Operand subtrees are only copied by the rules that mention
//! them (`sin`, products...), never by `+`, `-` or negation.
use log::debug;

use crate::collection::pack::{Pack, Stack};
use crate::collection::tree::NodeRef;
use crate::expr::Expression;
use crate::expr::func::{abs, cos, cot, csc, exp, log, pow, sec, sin, sqrt, tan};
use crate::node::TermNode;
use crate::ops::{BinaryOp, UnaryOp};
use crate::scalar::Scalar;
use crate::symbol::Symbol;

impl<T: Scalar> Expression<T> {
    /// Derivative with respect to `symbol`.
    ///
    /// - `symbol` itself differentiates to `1`, other symbols and constants to `0`.
    /// - Sums and differences distribute, products and quotients follow the product and
    ///   quotient rules (the quotient's denominator is squared with `^`).
    /// - Unary functions apply the chain rule.
    /// - `f ^ g` uses the power rule `g * f^(g - 1) * f'` when `g` does not mention
    ///   `symbol`, and `f^g * (g' * ln(f) + g * f' / f)` otherwise.
    ///
    /// The derivative of the empty expression is the constant zero.
    pub fn derivative(&self, symbol: &Symbol<T>) -> Expression<T> {
        if self.tree.is_empty() {
            return Expression::constant(T::zero());
        }

        // Derivatives of visited subtrees, consumed by their parent like operands
        // during evaluation.
        let mut derived: Stack<Expression<T>> = Stack::new();
        for node in self.tree.post_order() {
            let d = match &self.tree[node] {
                TermNode::Constant(_) => constant(T::zero()),
                TermNode::Symbol(s) if s == symbol => constant(T::one()),
                TermNode::Symbol(_) => constant(T::zero()),
                TermNode::Unary(op) => {
                    let (Some(child), Some(df)) = (self.tree.left(node), derived.pop()) else {
                        panic!("malformed expression tree: `{op}` at {node} has no operand");
                    };
                    self.derive_unary(*op, child, df)
                }
                TermNode::Binary(op) => {
                    let (Some(left), Some(right), Some((df, dg))) =
                        (self.tree.left(node), self.tree.right(node), derived.pop_pair())
                    else {
                        panic!("malformed expression tree: `{op}` at {node} is missing an operand");
                    };
                    self.derive_binary(*op, left, right, df, dg, symbol)
                }
            };
            derived.push(d);
        }

        match (derived.pop(), derived.is_empty()) {
            (Some(result), true) => {
                debug!(
                    "derivative with respect to `{symbol}`: {} node(s) from {}",
                    result.len(),
                    self.len()
                );
                result
            }
            _ => panic!("malformed expression tree: derivative left dangling operands"),
        }
    }

    // Chain rule for `op(f)` where `f` is the subtree at `child` and `df` its derivative.
    fn derive_unary(&self, op: UnaryOp, child: NodeRef, df: Expression<T>) -> Expression<T> {
        let f = || self.subtree(child);
        match op {
            UnaryOp::Identity => df,
            UnaryOp::Negate => -df,
            UnaryOp::Sin => cos(f()) * df,
            UnaryOp::Cos => -sin(f()) * df,
            UnaryOp::Tan => pow(sec(f()), constant(two())) * df,
            UnaryOp::Csc => {
                let f = f();
                -(csc(&f) * cot(f)) * df
            }
            UnaryOp::Sec => {
                let f = f();
                sec(&f) * tan(f) * df
            }
            UnaryOp::Cot => -pow(csc(f()), constant(two())) * df,
            UnaryOp::Abs => {
                let f = f();
                f.clone() / abs(f) * df
            }
            UnaryOp::Exp => exp(f()) * df,
            UnaryOp::Ln => df / f(),
            UnaryOp::Log10 => df / (f() * constant(T::LN_10())),
            UnaryOp::Sqrt => df / (constant(two()) * sqrt(f())),
        }
    }

    fn derive_binary(
        &self,
        op: BinaryOp,
        left: NodeRef,
        right: NodeRef,
        df: Expression<T>,
        dg: Expression<T>,
        x: &Symbol<T>,
    ) -> Expression<T> {
        match op {
            BinaryOp::Add => df + dg,
            BinaryOp::Sub => df - dg,
            BinaryOp::Mul => {
                let f = self.subtree(left);
                let g = self.subtree(right);
                df * &g + f * dg
            }
            BinaryOp::Div => {
                let f = self.subtree(left);
                let g = self.subtree(right);
                (df * &g - f * dg) / pow(g, constant(two()))
            }
            BinaryOp::Pow => {
                let f = self.subtree(left);
                let g = self.subtree(right);
                if self.mentions_at(right, x) {
                    pow(&f, &g) * (dg * log(&f) + g * df / f)
                } else {
                    g.clone() * pow(f, g - constant(T::one())) * df
                }
            }
        }
    }
}

#[inline]
fn constant<T: Scalar>(value: T) -> Expression<T> {
    Expression::constant(value)
}

#[inline]
fn two<T: Scalar>() -> T {
    T::one() + T::one()
}
