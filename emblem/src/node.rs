//! The node kinds an expression tree is made of.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

use crate::collection::pack::{Pack, Stack};
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, UnaryOp};
use crate::scalar::Scalar;
use crate::symbol::{Binding, Symbol};

/// One node of an expression tree.
///
/// Leaves ([`Constant`](TermNode::Constant), [`Symbol`](TermNode::Symbol)) have no
/// children. A [`Unary`](TermNode::Unary) node has exactly one, stored on the left;
/// a [`Binary`](TermNode::Binary) node has both.
#[derive(Debug, Clone, PartialEq, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TermNode<T> {
    Constant(T),
    Symbol(Symbol<T>),
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl<T> TermNode<T> {
    /// Number of children this node must have.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            TermNode::Constant(_) | TermNode::Symbol(_) => 0,
            TermNode::Unary(_) => 1,
            TermNode::Binary(_) => 2,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.arity() == 0
    }

    pub fn as_symbol(&self) -> Option<&Symbol<T>> {
        match self {
            TermNode::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Whether this is the leaf for `symbol`.
    #[inline]
    pub fn is_symbol_of(&self, symbol: &Symbol<T>) -> bool {
        self.as_symbol() == Some(symbol)
    }
}

impl<T: Scalar> TermNode<T> {
    /// Evaluate this node on top of an operand stack.
    ///
    /// Leaves push their value. Operators pop their operands (for a binary node the
    /// right operand is on top) and push the result. Fails only when a symbol is
    /// absent from `binding`.
    ///
    /// # Panics
    ///
    /// If the stack holds fewer operands than [`arity`](Self::arity): the tree the
    /// stack was filled from is malformed.
    pub fn evaluate<B: Binding<T> + ?Sized>(
        &self,
        binding: &B,
        operands: &mut Stack<T>,
    ) -> Result<()> {
        let value = match self {
            TermNode::Constant(value) => *value,
            TermNode::Symbol(symbol) => {
                binding
                    .lookup(symbol.name())
                    .ok_or_else(|| Error::UnboundSymbol {
                        name: symbol.name().to_owned(),
                    })?
            }
            TermNode::Unary(op) => match operands.pop() {
                Some(x) => op.apply(x),
                None => panic!("malformed expression tree: `{op}` is missing its operand"),
            },
            TermNode::Binary(op) => match operands.pop_pair() {
                Some((left, right)) => op.apply(left, right),
                None => panic!("malformed expression tree: `{op}` is missing an operand"),
            },
        };
        operands.push(value);
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for TermNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermNode::Constant(value) => write!(f, "{value}"),
            TermNode::Symbol(symbol) => write!(f, "{symbol}"),
            TermNode::Unary(op) => write!(f, "{op}"),
            TermNode::Binary(op) => write!(f, "{op}"),
        }
    }
}

impl<T> From<Symbol<T>> for TermNode<T> {
    fn from(symbol: Symbol<T>) -> Self {
        TermNode::Symbol(symbol)
    }
}
