//! Depth-first and breadth-first walks over a [`BinaryTree`].
//!
//! Every iterator borrows the tree immutably, keeps its own explicit stack or queue
//! (no recursion, so depth is bounded by memory only) and is `Clone`: cloning an
//! iterator yields an independent walk that restarts from the same position.
use crate::collection::pack::{Pack, Queue, Stack};
use crate::collection::tree::{BinaryTree, NodeRef, Side};

// Cloning a walk must not require `V: Clone`.
macro_rules! impl_restart {
    ($name:ident { $($field:ident),* }) => {
        impl<V> Clone for $name<'_, V> {
            fn clone(&self) -> Self {
                Self {
                    tree: self.tree,
                    $($field: self.$field.clone()),*
                }
            }
        }
    };
}

impl_restart!(PreOrder { pending });
impl_restart!(InOrder { pending, cursor });
impl_restart!(PostOrder { pending });
impl_restart!(LevelOrder { pending });

/// Node before its left subtree before its right subtree.
#[derive(Debug)]
pub struct PreOrder<'a, V> {
    tree: &'a BinaryTree<V>,
    pending: Stack<NodeRef>,
}

impl<'a, V> PreOrder<'a, V> {
    pub(crate) fn new(tree: &'a BinaryTree<V>, start: NodeRef) -> Self {
        let mut pending = Stack::new();
        if start.is_valid() {
            pending.push(start);
        }
        Self { tree, pending }
    }
}

impl<V> Iterator for PreOrder<'_, V> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let node = self.pending.pop()?;
        for side in [Side::Right, Side::Left] {
            let child = self.tree.link(node, side);
            if child.is_valid() {
                self.pending.push(child);
            }
        }
        Some(node)
    }
}

/// Left subtree, then the node, then the right subtree.
///
/// A unary operator stores its operand on the left, so it is yielded after it.
#[derive(Debug)]
pub struct InOrder<'a, V> {
    tree: &'a BinaryTree<V>,
    pending: Stack<NodeRef>,
    cursor: NodeRef,
}

impl<'a, V> InOrder<'a, V> {
    pub(crate) fn new(tree: &'a BinaryTree<V>, start: NodeRef) -> Self {
        Self {
            tree,
            pending: Stack::new(),
            cursor: start,
        }
    }
}

impl<V> Iterator for InOrder<'_, V> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        while self.cursor.is_valid() {
            self.pending.push(self.cursor);
            self.cursor = self.tree.link(self.cursor, Side::Left);
        }
        let node = self.pending.pop()?;
        self.cursor = self.tree.link(node, Side::Right);
        Some(node)
    }
}

/// Both subtrees before the node. This is the evaluation order.
#[derive(Debug)]
pub struct PostOrder<'a, V> {
    tree: &'a BinaryTree<V>,
    // `true` once the node's children have been scheduled
    pending: Stack<(NodeRef, bool)>,
}

impl<'a, V> PostOrder<'a, V> {
    pub(crate) fn new(tree: &'a BinaryTree<V>, start: NodeRef) -> Self {
        let mut pending = Stack::new();
        if start.is_valid() {
            pending.push((start, false));
        }
        Self { tree, pending }
    }
}

impl<V> Iterator for PostOrder<'_, V> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        loop {
            let (node, expanded) = self.pending.pop()?;
            if expanded {
                return Some(node);
            }
            self.pending.push((node, true));
            for side in [Side::Right, Side::Left] {
                let child = self.tree.link(node, side);
                if child.is_valid() {
                    self.pending.push((child, false));
                }
            }
        }
    }
}

/// Breadth-first, left to right within a level.
#[derive(Debug)]
pub struct LevelOrder<'a, V> {
    tree: &'a BinaryTree<V>,
    pending: Queue<NodeRef>,
}

impl<'a, V> LevelOrder<'a, V> {
    pub(crate) fn new(tree: &'a BinaryTree<V>, start: NodeRef) -> Self {
        let mut pending = Queue::new();
        if start.is_valid() {
            pending.push(start);
        }
        Self { tree, pending }
    }
}

impl<V> Iterator for LevelOrder<'_, V> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<NodeRef> {
        let node = self.pending.pop()?;
        for side in [Side::Left, Side::Right] {
            let child = self.tree.link(node, side);
            if child.is_valid() {
                self.pending.push(child);
            }
        }
        Some(node)
    }
}
