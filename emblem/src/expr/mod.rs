//! Expressions: formulas stored as trees of [`TermNode`]s.
//!
//! Role
//! - [`Expression`] owns one [`BinaryTree`] and is the value user code manipulates.
//! - Operators in [`algebra`] and functions in [`func`] compose expressions; both accept
//!   anything implementing [`IntoExpression`] (expressions, symbols, scalars).
//! - [`Expression::evaluate`], [`Expression::substitute`] and
//!   [`Expression::derivative`] work on the tree; [`pretty`] renders it.
//!
//! Ownership
//! - Expressions have value semantics: cloning deep-copies the tree, composing a
//!   borrowed operand copies it, composing an owned operand moves its nodes.
//!
//! Performance
//! - Composition is O(size of the operands); evaluation is a single post-order pass
//!   with an operand stack that stays inline for shallow formulas.
//!
//! Example
//! ```
//! use emblem::prelude::*;
//!
//! let x = Symbol::<f64>::new("x");
//! let y = Symbol::<f64>::new("y");
//! let mut e = sin(&x * &y) + 2.0 * &y;
//! assert_eq!(e.to_string(), "sin(x * y) + (2 * y)");
//!
//! let binding = ValueMap::from([(x.clone(), 0.0), (y.clone(), 3.0)]);
//! assert_eq!(e.evaluate(&binding).unwrap(), 6.0);
//!
//! e.substitute(&y, &x + 1.0);
//! assert_eq!(e.to_string(), "sin(x * (x + 1)) + (2 * (x + 1))");
//! ```
pub mod algebra;
pub mod derivative;
pub mod func;
pub mod pretty;

use std::collections::BTreeSet;
use std::mem;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collection::pack::{Pack, Stack};
use crate::collection::tree::{BinaryTree, NodeRef, Side};
use crate::error::Result;
use crate::node::TermNode;
use crate::ops::{BinaryOp, UnaryOp};
use crate::scalar::Scalar;
use crate::symbol::{Binding, Symbol};

/// A formula over scalar `T`.
///
/// The default value is the empty expression, which evaluates to zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Expression<T> {
    tree: BinaryTree<TermNode<T>>,
}

/// Conversion into an [`Expression`], used by every composing operator and function.
///
/// Owned expressions are moved, borrowed ones are deep-copied; symbols and scalars
/// become single-leaf expressions.
pub trait IntoExpression<T> {
    fn into_expression(self) -> Expression<T>;
}

impl<T> IntoExpression<T> for Expression<T> {
    #[inline]
    fn into_expression(self) -> Expression<T> {
        self
    }
}

impl<T: Clone> IntoExpression<T> for &Expression<T> {
    #[inline]
    fn into_expression(self) -> Expression<T> {
        self.clone()
    }
}

impl<T> IntoExpression<T> for Symbol<T> {
    #[inline]
    fn into_expression(self) -> Expression<T> {
        Expression::leaf(TermNode::Symbol(self))
    }
}

impl<T> IntoExpression<T> for &Symbol<T> {
    #[inline]
    fn into_expression(self) -> Expression<T> {
        Expression::leaf(TermNode::Symbol(self.clone()))
    }
}

macro_rules! impl_scalar_conversions {
    ($($t:ty),*) => {
        $(
            impl IntoExpression<$t> for $t {
                #[inline]
                fn into_expression(self) -> Expression<$t> {
                    Expression::constant(self)
                }
            }

            impl From<$t> for Expression<$t> {
                #[inline]
                fn from(value: $t) -> Self {
                    Expression::constant(value)
                }
            }
        )*
    };
}

impl_scalar_conversions!(f32, f64);

impl<T> From<Symbol<T>> for Expression<T> {
    fn from(symbol: Symbol<T>) -> Self {
        symbol.into_expression()
    }
}

impl<T> From<&Symbol<T>> for Expression<T> {
    fn from(symbol: &Symbol<T>) -> Self {
        symbol.into_expression()
    }
}

impl<T> Default for Expression<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Expression<T> {
    /// The empty expression.
    pub fn new() -> Self {
        Self {
            tree: BinaryTree::new(),
        }
    }

    pub fn constant(value: T) -> Self {
        Self::leaf(TermNode::Constant(value))
    }

    pub fn symbol(symbol: &Symbol<T>) -> Self {
        Self::leaf(TermNode::Symbol(symbol.clone()))
    }

    pub(crate) fn leaf(node: TermNode<T>) -> Self {
        Self {
            tree: BinaryTree::leaf(node),
        }
    }

    /// Wrap a tree built elsewhere.
    ///
    /// # Panics
    ///
    /// In debug builds, if some node does not have the children its arity requires.
    pub fn from_tree(tree: BinaryTree<TermNode<T>>) -> Self {
        debug_assert!(
            tree.pre_order().all(|n| {
                let arity = tree[n].arity();
                tree.left(n).is_some() == (arity >= 1) && tree.right(n).is_some() == (arity == 2)
            }),
            "expression tree nodes must have exactly the children their arity requires"
        );
        Self { tree }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Read-only access to the underlying tree.
    #[inline]
    pub fn tree(&self) -> &BinaryTree<TermNode<T>> {
        &self.tree
    }

    pub fn into_tree(self) -> BinaryTree<TermNode<T>> {
        self.tree
    }

    /// Every distinct symbol the expression mentions, in name order.
    pub fn symbols(&self) -> BTreeSet<Symbol<T>> {
        self.tree
            .pre_order()
            .filter_map(|n| self.tree[n].as_symbol().cloned())
            .collect()
    }

    /// Whether `symbol` occurs in the subtree at `node`.
    pub(crate) fn mentions_at(&self, node: NodeRef, symbol: &Symbol<T>) -> bool {
        self.tree
            .pre_order_from(node)
            .any(|n| self.tree[n].is_symbol_of(symbol))
    }

    pub fn mentions(&self, symbol: &Symbol<T>) -> bool {
        self.tree
            .root()
            .is_some_and(|root| self.mentions_at(root, symbol))
    }
}

impl<T: Scalar> Expression<T> {
    // The tree to use as an operand: an empty expression stands for zero so that
    // operator nodes always get their full set of children.
    fn into_operand(self) -> BinaryTree<TermNode<T>> {
        if self.tree.is_empty() {
            BinaryTree::leaf(TermNode::Constant(T::zero()))
        } else {
            self.tree
        }
    }

    /// `op(operand)`
    pub fn unary(op: UnaryOp, operand: impl IntoExpression<T>) -> Self {
        let mut tree = operand.into_expression().into_operand();
        tree.insert_to_head(TermNode::Unary(op), Side::Left);
        Self { tree }
    }

    /// `left op right`
    pub fn binary(
        op: BinaryOp,
        left: impl IntoExpression<T>,
        right: impl IntoExpression<T>,
    ) -> Self {
        let mut tree = left.into_expression().into_operand();
        let root = tree.insert_to_head(TermNode::Binary(op), Side::Left);
        tree.graft(root, Side::Right, right.into_expression().into_operand());
        Self { tree }
    }

    /// `self = self op right`, reusing this expression's nodes.
    pub fn apply_assign(&mut self, op: BinaryOp, right: impl IntoExpression<T>) {
        let mut tree = mem::take(self).into_operand();
        let root = tree.insert_to_head(TermNode::Binary(op), Side::Left);
        tree.graft(root, Side::Right, right.into_expression().into_operand());
        self.tree = tree;
    }

    /// Expression for the subtree at `node`, copied out.
    pub(crate) fn subtree(&self, node: NodeRef) -> Self {
        Self {
            tree: self.tree.extract(node),
        }
    }

    /// Evaluate with the symbol values in `binding`.
    ///
    /// The empty expression evaluates to zero. Fails with
    /// [`Error::UnboundSymbol`](crate::error::Error::UnboundSymbol) on the first symbol
    /// (in evaluation order) that `binding` has no value for.
    ///
    /// # Panics
    ///
    /// If the tree is malformed, i.e. an operator node lacks an operand. Expressions
    /// built through this crate's API never are.
    pub fn evaluate<B: Binding<T> + ?Sized>(&self, binding: &B) -> Result<T> {
        if self.tree.is_empty() {
            return Ok(T::zero());
        }

        let mut operands: Stack<T> = Stack::new();
        for node in self.tree.post_order() {
            self.tree[node].evaluate(binding, &mut operands)?;
        }

        match (operands.pop(), operands.is_empty()) {
            (Some(value), true) => Ok(value),
            (value, _) => panic!(
                "malformed expression tree: evaluation left {} operand(s) instead of one",
                operands.len() + usize::from(value.is_some())
            ),
        }
    }

    /// Replace every occurrence of `symbol` with a copy of `replacement`.
    ///
    /// Each occurrence gets its own copy of the replacement's nodes. Nodes inserted by
    /// the substitution are not searched again, so substituting `x` by `x + 1` is
    /// well defined. Returns the number of occurrences replaced; nothing happens when
    /// either expression is empty.
    pub fn substitute(
        &mut self,
        symbol: &Symbol<T>,
        replacement: impl IntoExpression<T>,
    ) -> usize {
        let replacement = replacement.into_expression();
        let Some(root) = self.tree.root() else {
            return 0;
        };
        if replacement.is_empty() {
            return 0;
        }

        if self.tree[root].is_symbol_of(symbol) {
            trace!("substituting `{symbol}` at the root");
            self.tree = replacement.tree;
            debug!("substituted 1 occurrence(s) of `{symbol}`");
            return 1;
        }

        let mut replaced = 0;
        let mut pending: Stack<NodeRef> = Stack::new();
        pending.push(root);

        while let Some(node) = pending.pop() {
            for side in [Side::Left, Side::Right] {
                let Some(child) = self.tree.child(node, side) else {
                    continue;
                };
                if self.tree[child].is_symbol_of(symbol) {
                    trace!("substituting `{symbol}` at {child} ({side:?} of {node})");
                    self.tree.replace_cloned(child, &replacement.tree);
                    replaced += 1;
                } else if !self.tree.is_leaf(child) {
                    pending.push(child);
                }
            }
        }

        if replaced > 0 {
            self.tree.consolidate_if_needed();
        }
        debug!("substituted {replaced} occurrence(s) of `{symbol}`");
        replaced
    }
}
