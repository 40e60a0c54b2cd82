//! Pushable / poppable sequences.
//!
//! Role
//! - [`Stack`] carries operands during post-order evaluation and pending nodes
//!   during iterative tree walks.
//! - [`Queue`] feeds breadth-first traversal.
//! - [`Pack`] is the capability both share, so algorithms that only push and pop
//!   can be written once.
//!
//! Performance
//! - `Stack` keeps up to 16 items inline (`smallvec`) before spilling to the heap,
//!   which covers the operand depth of most formulas.
use std::collections::VecDeque;

use smallvec::SmallVec;

/// A sequence that can receive and release items one at a time.
///
/// The order in which [`pop`](Pack::pop) returns items is the only difference between
/// implementors: LIFO for [`Stack`], FIFO for [`Queue`].
pub trait Pack<T> {
    /// Add `value` to the sequence.
    fn push(&mut self, value: T);

    /// Remove the next item, or `None` when empty.
    fn pop(&mut self) -> Option<T>;

    /// Borrow the item `pop` would return next.
    fn peek(&self) -> Option<&T>;

    /// Number of items currently held.
    fn len(&self) -> usize;

    /// Drop every item.
    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Last-in, first-out sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: SmallVec<[T; 16]>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: SmallVec::with_capacity(capacity),
        }
    }

    /// Pop two items and return them in push order, `(first, second)`.
    ///
    /// Binary operators consume their operands this way: the right operand was
    /// pushed last, so it is popped first, but it is returned second.
    pub fn pop_pair(&mut self) -> Option<(T, T)> {
        if self.items.len() < 2 {
            return None;
        }
        let second = self.items.pop()?;
        let first = self.items.pop()?;
        Some((first, second))
    }

    /// Items from bottom to top.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pack<T> for Stack<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.items.push(value);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// First-in, first-out sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pack<T> for Queue<T> {
    #[inline]
    fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    #[inline]
    fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    #[inline]
    fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
