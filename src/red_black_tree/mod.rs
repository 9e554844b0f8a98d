//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.

mod iter;
mod node;
mod serialize;
mod tree;

pub use self::iter::{IntoIter, Iter};
pub use self::tree::RedBlackTree;
