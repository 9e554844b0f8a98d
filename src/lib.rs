//! An ordered index of keys backed by a red black tree.
//!
//! The tree keeps its nodes in an [`Arena`](arena/struct.Arena.html) and links them by index,
//! with a single black sentinel standing in for every missing child.

pub mod arena;
pub mod compare;
mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result, Violation};
pub use crate::red_black_tree::RedBlackTree;
