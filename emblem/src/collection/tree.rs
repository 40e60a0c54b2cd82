//! Index-addressed binary tree.
//!
//! Role
//! - Own every node of one tree in a flat `Vec`, addressed by [`NodeRef`].
//! - Provide the structural edits expressions are built from: insertion at the head,
//!   interposing insertion under a parent, grafting a whole tree into a slot, and
//!   subtree replacement and removal.
//!
//! Representation
//! - Each slot records its parent, left and right links. Absent links are
//!   [`NodeRef::INVALID`].
//! - Edits never move live nodes. Released slots become tombstones and are counted
//!   as waste; [`BinaryTree::consolidate`] rewrites the live nodes contiguously in
//!   pre-order once enough waste accumulated.
//! - The structure is a strict tree: attaching a node that already has a parent is a
//!   bug and panics.
//!
//! Handles are only meaningful for the tree that produced them, and only until the
//! next consolidation.
use std::collections::HashSet;
use std::fmt;
use std::ops::{Index, IndexMut};

use log::trace;
use strum::{EnumIs, EnumIter};

use crate::collection::pack::{Pack, Stack};
use crate::collection::traversal::{InOrder, LevelOrder, PostOrder, PreOrder};

/// Handle to a node slot of a [`BinaryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRef(u32);

impl NodeRef {
    /// Sentinel for "no node": the head of an empty tree, or a missing child.
    pub const INVALID: NodeRef = NodeRef(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn some(self) -> Option<NodeRef> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}

/// Child slot of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot<V> {
    // `None` once released
    value: Option<V>,
    parent: NodeRef,
    children: [NodeRef; 2],
}

impl<V> Slot<V> {
    #[inline]
    fn child(&self, side: Side) -> NodeRef {
        self.children[side as usize]
    }
}

/// Arena-backed binary tree of `V` values.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryTree<V> {
    slots: Vec<Slot<V>>,
    head: NodeRef,
    live: usize,
    // Released slots not yet reclaimed by consolidation
    wasted: usize,
}

impl<V> BinaryTree<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: NodeRef::INVALID,
            live: 0,
            wasted: 0,
        }
    }

    /// A tree holding `value` as its only node.
    pub fn leaf(value: V) -> Self {
        let mut tree = Self::new();
        tree.insert_to_head(value, Side::Left);
        tree
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.head.is_valid()
    }

    /// Root handle, or [`NodeRef::INVALID`] when empty.
    #[inline]
    pub fn head(&self) -> NodeRef {
        self.head
    }

    #[inline]
    pub fn root(&self) -> Option<NodeRef> {
        self.head.some()
    }

    /// Number of released slots awaiting consolidation.
    #[inline]
    pub fn wasted(&self) -> usize {
        self.wasted
    }

    fn slot(&self, node: NodeRef) -> &Slot<V> {
        match self.slots.get(node.index()) {
            Some(slot) if slot.value.is_some() => slot,
            Some(_) => panic!("access to released node {node}"),
            None => panic!("node {node} is out of range for a tree of {} slots", self.slots.len()),
        }
    }

    fn slot_mut(&mut self, node: NodeRef) -> &mut Slot<V> {
        let len = self.slots.len();
        match self.slots.get_mut(node.index()) {
            Some(slot) if slot.value.is_some() => slot,
            Some(_) => panic!("access to released node {node}"),
            None => panic!("node {node} is out of range for a tree of {len} slots"),
        }
    }

    /// Value stored at `node`. Panics if `node` was released.
    pub fn get(&self, node: NodeRef) -> &V {
        match &self.slot(node).value {
            Some(value) => value,
            None => unreachable!(),
        }
    }

    pub fn get_mut(&mut self, node: NodeRef) -> &mut V {
        match &mut self.slot_mut(node).value {
            Some(value) => value,
            None => unreachable!(),
        }
    }

    #[inline]
    pub fn child(&self, node: NodeRef, side: Side) -> Option<NodeRef> {
        self.slot(node).child(side).some()
    }

    #[inline]
    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.child(node, Side::Left)
    }

    #[inline]
    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.child(node, Side::Right)
    }

    #[inline]
    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.slot(node).parent.some()
    }

    pub fn is_leaf(&self, node: NodeRef) -> bool {
        self.slot(node).children.iter().all(|c| !c.is_valid())
    }

    /// Which slot of its parent `node` occupies, `None` for the root.
    pub fn side_of(&self, node: NodeRef) -> Option<Side> {
        let parent = self.parent(node)?;
        let slot = self.slot(parent);
        if slot.child(Side::Left) == node {
            Some(Side::Left)
        } else {
            debug_assert_eq!(slot.child(Side::Right), node);
            Some(Side::Right)
        }
    }

    /// Raw link access for traversals; `INVALID` when absent.
    #[inline]
    pub(crate) fn link(&self, node: NodeRef, side: Side) -> NodeRef {
        self.slot(node).child(side)
    }

    fn alloc(&mut self, value: V) -> NodeRef {
        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&i| i != u32::MAX)
            .unwrap_or_else(|| panic!("binary tree cannot exceed {} slots", u32::MAX));
        self.slots.push(Slot {
            value: Some(value),
            parent: NodeRef::INVALID,
            children: [NodeRef::INVALID; 2],
        });
        self.live += 1;
        NodeRef(index)
    }

    // Point `parent.side` at `child` and `child` back at `parent`. `child` must be detached.
    fn attach(&mut self, parent: NodeRef, side: Side, child: NodeRef) {
        assert!(
            !self.slot(child).parent.is_valid(),
            "node {child} already has a parent, a node cannot be shared between two slots"
        );
        self.slot_mut(parent).children[side as usize] = child;
        self.slot_mut(child).parent = parent;
    }

    // Unlink `node` from its parent, or from the head if it is the root.
    fn detach(&mut self, node: NodeRef) {
        match self.side_of(node) {
            Some(side) => {
                let parent = self.slot(node).parent;
                self.slot_mut(parent).children[side as usize] = NodeRef::INVALID;
                self.slot_mut(node).parent = NodeRef::INVALID;
            }
            None => {
                debug_assert_eq!(self.head, node);
                self.head = NodeRef::INVALID;
            }
        }
    }

    // Tombstone every node of the detached subtree at `node`.
    fn release(&mut self, node: NodeRef) {
        let mut pending: Stack<NodeRef> = Stack::new();
        pending.push(node);
        while let Some(current) = pending.pop() {
            let slot = self.slot_mut(current);
            slot.value = None;
            slot.parent = NodeRef::INVALID;
            for child in std::mem::replace(&mut slot.children, [NodeRef::INVALID; 2]) {
                if child.is_valid() {
                    pending.push(child);
                }
            }
            self.live -= 1;
            self.wasted += 1;
        }
    }

    /// Make `value` the new root; the previous root, if any, becomes its child on `side`.
    pub fn insert_to_head(&mut self, value: V, side: Side) -> NodeRef {
        let node = self.alloc(value);
        if self.head.is_valid() {
            let old = self.head;
            self.attach(node, side, old);
        }
        self.head = node;
        node
    }

    /// Insert `value` as the `side` child of `parent`.
    ///
    /// A node already in that slot is not discarded: it becomes the child of the new
    /// node on the same side. On an empty tree `value` becomes the root and `parent`
    /// is ignored.
    pub fn insert_child(&mut self, parent: NodeRef, side: Side, value: V) -> NodeRef {
        if self.is_empty() {
            return self.insert_to_head(value, side);
        }
        let previous = self.link(parent, side);
        let node = self.alloc(value);
        if previous.is_valid() {
            self.detach(previous);
            self.attach(node, side, previous);
        }
        self.attach(parent, side, node);
        debug_assert!(!self.detect_cycle(node), "cycle detected in tree");
        node
    }

    #[inline]
    pub fn insert_child_left(&mut self, parent: NodeRef, value: V) -> NodeRef {
        self.insert_child(parent, Side::Left, value)
    }

    #[inline]
    pub fn insert_child_right(&mut self, parent: NodeRef, value: V) -> NodeRef {
        self.insert_child(parent, Side::Right, value)
    }

    // Append a copy of a foreign subtree in pre-order and return its new root. `take`
    // yields the value and the (foreign) children of a foreign node.
    fn import_with<F>(&mut self, root: NodeRef, mut take: F) -> NodeRef
    where
        F: FnMut(NodeRef) -> (V, [NodeRef; 2]),
    {
        let mut imported = NodeRef::INVALID;
        let mut pending: Stack<(NodeRef, Side, NodeRef)> = Stack::new();
        pending.push((NodeRef::INVALID, Side::Left, root));

        while let Some((parent, side, foreign)) = pending.pop() {
            let (value, [left, right]) = take(foreign);
            let node = self.alloc(value);
            if parent.is_valid() {
                self.attach(parent, side, node);
            } else {
                imported = node;
            }
            if right.is_valid() {
                pending.push((node, Side::Right, right));
            }
            if left.is_valid() {
                pending.push((node, Side::Left, left));
            }
        }

        imported
    }

    // Move the value out of a live slot of a tree that is being consumed.
    fn take_slot(&mut self, node: NodeRef) -> (V, [NodeRef; 2]) {
        let slot = self.slot_mut(node);
        let children = slot.children;
        match slot.value.take() {
            Some(value) => (value, children),
            None => unreachable!(),
        }
    }

    // Place `node` (detached) into `at.side`, releasing whatever was there.
    fn install(&mut self, at: NodeRef, side: Side, node: NodeRef) {
        let previous = self.link(at, side);
        if previous.is_valid() {
            self.detach(previous);
            self.release(previous);
        }
        self.attach(at, side, node);
        debug_assert!(!self.detect_cycle(node), "cycle detected in tree");
    }

    /// Move every node of `other` into the `side` slot of `at`.
    ///
    /// The subtree previously occupying the slot is released. When this tree is empty
    /// `other` becomes the whole tree and `at` is ignored. Grafting an empty tree is a
    /// no-op returning [`NodeRef::INVALID`]; otherwise the handle of the grafted root
    /// is returned.
    pub fn graft(&mut self, at: NodeRef, side: Side, mut other: BinaryTree<V>) -> NodeRef {
        let Some(root) = other.root() else {
            return NodeRef::INVALID;
        };
        if self.is_empty() {
            *self = other;
            self.consolidate_if_needed();
            return self.head;
        }

        let grafted = self.import_with(root, |node| other.take_slot(node));
        self.install(at, side, grafted);
        trace!(
            "grafted {} node(s) under {at} ({side:?}), tree now holds {} live / {} wasted",
            other.live,
            self.live,
            self.wasted
        );
        grafted
    }

    /// Detach the subtree at `node` and release it.
    pub fn remove(&mut self, node: NodeRef) {
        self.detach(node);
        self.release(node);
    }

    /// Put `replacement` where `target` is, releasing `target`'s subtree.
    ///
    /// Replacing the root makes `replacement` the whole tree. An empty replacement
    /// just removes `target`.
    pub fn replace(&mut self, target: NodeRef, replacement: BinaryTree<V>) -> NodeRef {
        if replacement.is_empty() {
            self.remove(target);
            return NodeRef::INVALID;
        }
        match (self.parent(target), self.side_of(target)) {
            (Some(parent), Some(side)) => self.graft(parent, side, replacement),
            _ => {
                *self = replacement;
                self.head
            }
        }
    }

    /// Release every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = NodeRef::INVALID;
        self.live = 0;
        self.wasted = 0;
    }

    pub fn pre_order(&self) -> PreOrder<'_, V> {
        PreOrder::new(self, self.head)
    }

    pub fn pre_order_from(&self, node: NodeRef) -> PreOrder<'_, V> {
        PreOrder::new(self, node)
    }

    pub fn in_order(&self) -> InOrder<'_, V> {
        InOrder::new(self, self.head)
    }

    pub fn in_order_from(&self, node: NodeRef) -> InOrder<'_, V> {
        InOrder::new(self, node)
    }

    pub fn post_order(&self) -> PostOrder<'_, V> {
        PostOrder::new(self, self.head)
    }

    pub fn post_order_from(&self, node: NodeRef) -> PostOrder<'_, V> {
        PostOrder::new(self, node)
    }

    pub fn level_order(&self) -> LevelOrder<'_, V> {
        LevelOrder::new(self, self.head)
    }

    pub fn level_order_from(&self, node: NodeRef) -> LevelOrder<'_, V> {
        LevelOrder::new(self, node)
    }

    /// Whether compaction is worth it: at least a quarter of the slots are waste.
    pub fn should_consolidate(&self) -> bool {
        self.wasted > 0 && self.wasted * 4 >= self.slots.len()
    }

    pub fn consolidate_if_needed(&mut self) {
        if self.should_consolidate() {
            self.consolidate();
        }
    }

    /// Rewrite the live nodes contiguously in pre-order and drop every tombstone.
    ///
    /// WARNING: This invalidates all existing [`NodeRef`] handles!
    pub fn consolidate(&mut self) {
        if self.wasted == 0 {
            return;
        }
        let Some(root) = self.root() else {
            self.clear();
            return;
        };

        let mut old = std::mem::take(self);
        self.slots.reserve_exact(old.live);
        let root = self.import_with(root, |node| old.take_slot(node));
        self.head = root;
        trace!(
            "consolidated tree: {} live node(s), reclaimed {} slot(s)",
            self.live,
            old.wasted
        );

        debug_assert!(
            !self.detect_cycle(self.head),
            "cycle detected in tree after consolidation"
        );
    }

    /// Whether a walk from `start` reaches some slot twice (or leaves the arena).
    ///
    /// Costs O(size of the subtree at `start`), not of the whole tree.
    pub fn detect_cycle(&self, start: NodeRef) -> bool {
        if !start.is_valid() {
            return false;
        }
        let mut visited: HashSet<NodeRef> = HashSet::new();
        let mut pending: Stack<NodeRef> = Stack::new();
        pending.push(start);

        while let Some(node) = pending.pop() {
            if node.index() >= self.slots.len() || !visited.insert(node) {
                return true;
            }
            for child in self.slots[node.index()].children {
                if child.is_valid() {
                    pending.push(child);
                }
            }
        }

        false
    }
}

impl<V: Clone> BinaryTree<V> {
    /// Independent deep copy of the subtree rooted at `node`.
    pub fn extract(&self, node: NodeRef) -> BinaryTree<V> {
        let mut copy = BinaryTree::new();
        copy.slots.reserve(self.live);
        let root = copy.import_with(node, |n| (self.get(n).clone(), self.slot(n).children));
        copy.head = root;
        copy
    }

    /// Copy every node of `other` into the `side` slot of `at`; `other` is untouched.
    ///
    /// Same slot rules as [`graft`](Self::graft).
    pub fn graft_cloned(&mut self, at: NodeRef, side: Side, other: &BinaryTree<V>) -> NodeRef {
        let Some(root) = other.root() else {
            return NodeRef::INVALID;
        };
        if self.is_empty() {
            *self = other.extract(root);
            return self.head;
        }

        let grafted = self.import_with(root, |n| (other.get(n).clone(), other.slot(n).children));
        self.install(at, side, grafted);
        trace!(
            "grafted a copy of {} node(s) under {at} ({side:?})",
            other.live
        );
        grafted
    }

    /// Like [`replace`](Self::replace), inserting a copy of `replacement`.
    pub fn replace_cloned(&mut self, target: NodeRef, replacement: &BinaryTree<V>) -> NodeRef {
        let Some(root) = replacement.root() else {
            self.remove(target);
            return NodeRef::INVALID;
        };
        match (self.parent(target), self.side_of(target)) {
            (Some(parent), Some(side)) => self.graft_cloned(parent, side, replacement),
            _ => {
                *self = replacement.extract(root);
                self.head
            }
        }
    }
}

impl<V> Default for BinaryTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<NodeRef> for BinaryTree<V> {
    type Output = V;

    #[inline]
    fn index(&self, node: NodeRef) -> &V {
        self.get(node)
    }
}

impl<V> IndexMut<NodeRef> for BinaryTree<V> {
    #[inline]
    fn index_mut(&mut self, node: NodeRef) -> &mut V {
        self.get_mut(node)
    }
}

/// Structural equality: same shape and equal values, whatever the slot layout.
impl<V: PartialEq> PartialEq for BinaryTree<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.live != other.live {
            return false;
        }
        let mut pending: Stack<(NodeRef, NodeRef)> = Stack::new();
        pending.push((self.head, other.head));

        while let Some((a, b)) = pending.pop() {
            match (a.is_valid(), b.is_valid()) {
                (false, false) => continue,
                (true, true) => {}
                _ => return false,
            }
            if self.get(a) != other.get(b) {
                return false;
            }
            pending.push((self.link(a, Side::Right), other.link(b, Side::Right)));
            pending.push((self.link(a, Side::Left), other.link(b, Side::Left)));
        }

        true
    }
}

impl<V: Eq> Eq for BinaryTree<V> {}
