//! RcDoc-based rendering with termcolor annotations for [`Expression`].
//!
//! Role
//! - Turn an expression tree into an annotated document, rendered as colored terminal
//!   output or as a plain string ([`Display`](std::fmt::Display) uses the latter).
//!
//! Layout
//! - Binary operators are infix (`a + b`), unary operators wrap their operand with the
//!   strings of their descriptor (`sin(a)`, `|a|`, `-a`).
//! - A binary operand is parenthesised when its operator differs from its parent's,
//!   or when it is the right operand of the same non-associative operator, so
//!   `a - (b - c)` and `a - b - c` stay distinct. Same-operator chains such as
//!   `a + b + c` are printed flat. This is readable, not minimal: `a + (b * c)`.
//! - `-` parenthesises a binary operand; operands of `^` that start with a sign are
//!   parenthesised.
//! - The document never contains line breaks, so the output does not depend on the
//!   rendering width.
//!
//! Performance
//! - The document is built by an iterative walk into a flat token list, joined
//!   pairwise, so neither building nor dropping it recurses with the tree depth.
//!   Both are O(n) in the number of nodes.

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::collection::pack::{Pack, Stack};
use crate::collection::tree::{NodeRef, Side};
use crate::expr::Expression;
use crate::node::TermNode;
use crate::ops::BinaryOp;
use crate::scalar::Scalar;

/// Styles used to annotate parts of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Operator, // + - * / ^, function names
    Ident,    // symbols
    Literal,  // constants
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Literal => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

#[inline]
fn op(s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::text(s).annotate(Style::Operator)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::text("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::text(")").annotate(Style::Paren(depth))
}

// Whether the operand at `child` (on `side` of its parent) needs its own parentheses.
fn requires_parens<T: Scalar>(
    expr: &Expression<T>,
    parent: &TermNode<T>,
    child: NodeRef,
    side: Side,
) -> bool {
    let tree = expr.tree();
    match (parent, &tree[child]) {
        (TermNode::Unary(p), TermNode::Binary(_)) => !p.descriptor().encloses,
        (TermNode::Binary(p), TermNode::Binary(c)) => {
            p != c || (side.is_right() && !p.is_associative())
        }
        (TermNode::Binary(BinaryOp::Pow), TermNode::Unary(c)) => !c.descriptor().encloses,
        (TermNode::Binary(BinaryOp::Pow), TermNode::Constant(value)) => {
            value.is_sign_negative()
        }
        _ => false,
    }
}

// Pending work of the document walk.
enum Step {
    Node(NodeRef, u8),
    Op(&'static str),
    Open(u8),
    Close(u8),
}

// Schedule `child` as an operand of `parent`, wrapped in parentheses when needed.
fn schedule_operand<T: Scalar>(
    expr: &Expression<T>,
    pending: &mut Stack<Step>,
    parent: &TermNode<T>,
    child: NodeRef,
    side: Side,
    depth: u8,
) {
    if requires_parens(expr, parent, child, side) {
        pending.push(Step::Close(depth));
        pending.push(Step::Node(child, depth.wrapping_add(1)));
        pending.push(Step::Open(depth));
    } else {
        pending.push(Step::Node(child, depth));
    }
}

// Concatenate pairwise so the document nests logarithmically, not once per token.
fn concat_balanced(mut docs: Vec<RcDoc<'static, Style>>) -> RcDoc<'static, Style> {
    while docs.len() > 1 {
        let mut paired = Vec::with_capacity(docs.len().div_ceil(2));
        let mut docs_iter = docs.into_iter();
        while let Some(left) = docs_iter.next() {
            paired.push(match docs_iter.next() {
                Some(right) => left.append(right),
                None => left,
            });
        }
        docs = paired;
    }
    docs.pop().unwrap_or_else(RcDoc::nil)
}

fn to_doc<T: Scalar>(expr: &Expression<T>) -> RcDoc<'static, Style> {
    let tree = expr.tree();
    let Some(root) = tree.root() else {
        return RcDoc::nil();
    };

    let mut tokens = Vec::with_capacity(tree.len() * 2);
    let mut pending: Stack<Step> = Stack::new();
    pending.push(Step::Node(root, 0));

    // Steps are pushed in reverse so they pop in reading order.
    while let Some(step) = pending.pop() {
        let (node, depth) = match step {
            Step::Op(text) => {
                if !text.is_empty() {
                    tokens.push(op(text));
                }
                continue;
            }
            Step::Open(depth) => {
                tokens.push(lparen(depth));
                continue;
            }
            Step::Close(depth) => {
                tokens.push(rparen(depth));
                continue;
            }
            Step::Node(node, depth) => (node, depth),
        };

        let term = &tree[node];
        match term {
            TermNode::Constant(value) => {
                tokens.push(RcDoc::as_string(value).annotate(Style::Literal));
            }
            TermNode::Symbol(symbol) => {
                tokens.push(RcDoc::as_string(symbol).annotate(Style::Ident));
            }
            TermNode::Unary(unary) => {
                let descriptor = unary.descriptor();
                let Some(child) = tree.left(node) else {
                    panic!("malformed expression tree: `{unary}` at {node} has no operand");
                };
                pending.push(Step::Op(descriptor.close));
                schedule_operand(expr, &mut pending, term, child, Side::Left, depth);
                pending.push(Step::Op(descriptor.open));
            }
            TermNode::Binary(binary) => {
                let (Some(left), Some(right)) = (tree.left(node), tree.right(node)) else {
                    panic!("malformed expression tree: `{binary}` at {node} is missing an operand");
                };
                schedule_operand(expr, &mut pending, term, right, Side::Right, depth);
                pending.push(Step::Op(binary.descriptor().infix));
                schedule_operand(expr, &mut pending, term, left, Side::Left, depth);
            }
        }
    }

    concat_balanced(tokens)
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Rendering conveniences for expressions.
pub trait PrettyExpr {
    /// Annotated document for this expression, for composing or rendering manually.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print to stdout, colored when stdout is a terminal, followed by a newline.
    fn pretty_print(&self) -> io::Result<()>;

    /// Plain string, no colors. Same text as `to_string()`.
    fn pretty_string(&self) -> String;
}

impl<T: Scalar> PrettyExpr for Expression<T> {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc(self)
    }

    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)?;
        writeln!(stdout)
    }

    fn pretty_string(&self) -> String {
        self.to_string()
    }
}

impl<T: Scalar> std::fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}
