//! Storage primitives the expression engine is built on.
pub mod pack;
pub mod traversal;
pub mod tree;

pub use pack::{Pack, Queue, Stack};
pub use traversal::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use tree::{BinaryTree, NodeRef, Side};
