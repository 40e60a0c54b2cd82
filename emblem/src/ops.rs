//! Built-in operators.
//!
//! Operators are `Copy` handles ([`UnaryOp`], [`BinaryOp`]) into static descriptor
//! tables. A descriptor holds what rendering needs (name, surrounding strings);
//! evaluation is a `match` on the handle, so many nodes can share one operator
//! without any per-node allocation.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIs, EnumIter, IntoEnumIterator};

use crate::scalar::Scalar;

/// Operators taking one operand.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIs, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    Identity,
    Negate,
    Sin,
    Cos,
    Tan,
    /// Cosecant, `1 / sin(x)`
    Csc,
    /// Secant, `1 / cos(x)`
    Sec,
    /// Cotangent, `1 / tan(x)`
    Cot,
    Abs,
    Exp,
    /// Natural logarithm
    Ln,
    Log10,
    Sqrt,
}

/// Operators taking a left and a right operand.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIs, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `left` raised to the power `right`
    Pow,
}

/// Immutable description of a [`UnaryOp`].
#[derive(Debug, PartialEq, Eq)]
pub struct UnaryDescriptor {
    pub op: UnaryOp,
    pub name: &'static str,
    /// Printed before the operand.
    pub open: &'static str,
    /// Printed after the operand.
    pub close: &'static str,
    /// Whether `open`/`close` already delimit the operand, so it never needs
    /// parentheses of its own.
    pub encloses: bool,
}

/// Immutable description of a [`BinaryOp`].
#[derive(Debug, PartialEq, Eq)]
pub struct BinaryDescriptor {
    pub op: BinaryOp,
    pub name: &'static str,
    /// Printed between the operands.
    pub infix: &'static str,
    /// `a op (b op c) == (a op b) op c`
    pub associative: bool,
}

const fn unary(
    op: UnaryOp,
    name: &'static str,
    open: &'static str,
    close: &'static str,
    encloses: bool,
) -> UnaryDescriptor {
    UnaryDescriptor {
        op,
        name,
        open,
        close,
        encloses,
    }
}

const fn binary(
    op: BinaryOp,
    name: &'static str,
    infix: &'static str,
    associative: bool,
) -> BinaryDescriptor {
    BinaryDescriptor {
        op,
        name,
        infix,
        associative,
    }
}

// Indexed by discriminant
static UNARY: [UnaryDescriptor; UnaryOp::COUNT] = [
    unary(UnaryOp::Identity, "identity", "", "", false),
    unary(UnaryOp::Negate, "negate", "-", "", false),
    unary(UnaryOp::Sin, "sin", "sin(", ")", true),
    unary(UnaryOp::Cos, "cos", "cos(", ")", true),
    unary(UnaryOp::Tan, "tan", "tan(", ")", true),
    unary(UnaryOp::Csc, "csc", "csc(", ")", true),
    unary(UnaryOp::Sec, "sec", "sec(", ")", true),
    unary(UnaryOp::Cot, "cot", "cot(", ")", true),
    unary(UnaryOp::Abs, "abs", "|", "|", true),
    unary(UnaryOp::Exp, "exp", "e^(", ")", true),
    unary(UnaryOp::Ln, "ln", "ln(", ")", true),
    unary(UnaryOp::Log10, "log10", "log10(", ")", true),
    unary(UnaryOp::Sqrt, "sqrt", "(", ")^(1/2)", true),
];

static BINARY: [BinaryDescriptor; BinaryOp::COUNT] = [
    binary(BinaryOp::Add, "add", " + ", true),
    binary(BinaryOp::Sub, "sub", " - ", false),
    binary(BinaryOp::Mul, "mul", " * ", true),
    binary(BinaryOp::Div, "div", " / ", false),
    binary(BinaryOp::Pow, "pow", "^", false),
];

impl UnaryOp {
    #[inline]
    pub fn descriptor(self) -> &'static UnaryDescriptor {
        &UNARY[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Looks an operator up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        UnaryOp::iter().find(|op| op.name() == name)
    }

    /// Evaluate the operator on `x`.
    pub fn apply<T: Scalar>(self, x: T) -> T {
        match self {
            UnaryOp::Identity => x,
            UnaryOp::Negate => -x,
            UnaryOp::Sin => x.sin(),
            UnaryOp::Cos => x.cos(),
            UnaryOp::Tan => x.tan(),
            UnaryOp::Csc => x.sin().recip(),
            UnaryOp::Sec => x.cos().recip(),
            UnaryOp::Cot => x.tan().recip(),
            UnaryOp::Abs => x.abs(),
            UnaryOp::Exp => x.exp(),
            UnaryOp::Ln => x.ln(),
            UnaryOp::Log10 => x.log10(),
            UnaryOp::Sqrt => x.sqrt(),
        }
    }
}

impl BinaryOp {
    #[inline]
    pub fn descriptor(self) -> &'static BinaryDescriptor {
        &BINARY[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn from_name(name: &str) -> Option<Self> {
        BinaryOp::iter().find(|op| op.name() == name)
    }

    #[inline]
    pub fn is_associative(self) -> bool {
        self.descriptor().associative
    }

    /// Evaluate `left op right`.
    pub fn apply<T: Scalar>(self, left: T, right: T) -> T {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Pow => left.powf(right),
        }
    }
}

impl std::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
