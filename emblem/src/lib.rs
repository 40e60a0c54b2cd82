//! Emblem: symbolic expressions over floating point scalars.
//!
//! A formula is built from named [`Symbol`](symbol::Symbol)s, constants, the arithmetic
//! operators and a fixed set of functions, and stored as a binary tree. The tree can
//! then be evaluated against a binding of symbol values, have symbols substituted by
//! other formulas, be differentiated, and be rendered as infix text.
//!
//! Storage shape
//!  - Each expression owns one arena ([`collection::BinaryTree`]) of [`node::TermNode`]s
//!    addressed by 32-bit indices. Composing expressions copies (or moves) the operand
//!    arenas into a new one; nothing is shared between two expressions.
//!  - Released nodes are tombstoned and reclaimed by consolidation once a quarter of
//!    the arena is waste.
//!
//! Errors
//!  - Only evaluation can fail, with [`error::Error::UnboundSymbol`]. Evaluating the
//!    empty expression yields zero.
//!
//! Example
//! ```
//! use emblem::prelude::*;
//!
//! let x = Symbol::<f64>::new("x");
//! let y = Symbol::<f64>::new("y");
//!
//! let mut e = &y * &y + 10.0;
//! e.substitute(&y, 1.0 + &x);
//!
//! let binding = ValueMap::from([(x.clone(), 5.0)]);
//! assert_eq!(e.evaluate(&binding).unwrap(), 46.0);
//!
//! let missing = ValueMap::<f64>::new();
//! assert!(e.evaluate(&missing).unwrap_err().is_unbound_symbol());
//! ```

/// Arena tree, traversals and the stack/queue they run on.
pub mod collection;
/// Error type returned by evaluation.
pub mod error;
/// Expressions: composition, evaluation, substitution, derivatives and rendering.
pub mod expr;
/// Node kinds of an expression tree.
pub mod node;
/// Built-in operator registry.
pub mod ops;
/// The scalar type parameter.
pub mod scalar;
/// Symbols and bindings.
pub mod symbol;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::error::Error;
    pub use crate::expr::func::*;
    pub use crate::expr::pretty::PrettyExpr;
    pub use crate::expr::{Expression, IntoExpression};
    pub use crate::scalar::Scalar;
    pub use crate::symbol::{Binding, Symbol, ValueMap};
}
