use crate::red_black_tree::node::{NodeId, NIL};
use crate::red_black_tree::tree::RedBlackTree;
use std::iter::FusedIterator;

/// An iterator for `RedBlackTree<T, C>`.
///
/// This iterator traverses the keys of the tree in-order and yields immutable references.
pub struct Iter<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
    current: NodeId,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(super) fn new(tree: &'a RedBlackTree<T, C>) -> Self {
        Iter {
            tree,
            current: tree.root(),
            stack: Vec::new(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while self.current != NIL {
            self.stack.push(self.current);
            self.current = tree.node(self.current).links.left;
        }
        self.stack.pop().map(|id| {
            let node = tree.node(id);
            self.current = node.links.right;
            self.remaining -= 1;
            &node.key
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C> ExactSizeIterator for Iter<'a, T, C> where T: 'a {}

impl<'a, T, C> FusedIterator for Iter<'a, T, C> where T: 'a {}

impl<'a, T, C> Clone for Iter<'a, T, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            current: self.current,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// An owning iterator for `RedBlackTree<T, C>`.
///
/// This iterator traverses the keys of the tree in-order and yields owned keys. Each node is
/// released once its key has been yielded.
pub struct IntoIter<T, C> {
    tree: RedBlackTree<T, C>,
    current: NodeId,
    stack: Vec<NodeId>,
}

impl<T, C> IntoIter<T, C> {
    pub(super) fn new(tree: RedBlackTree<T, C>) -> Self {
        IntoIter {
            current: tree.root(),
            tree,
            stack: Vec::new(),
        }
    }
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current != NIL {
            self.stack.push(self.current);
            self.current = self.tree.node(self.current).links.left;
        }
        let id = self.stack.pop()?;
        let node = self.tree.release(id);
        self.current = node.links.right;
        Some(node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tree.len();
        (len, Some(len))
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> FusedIterator for IntoIter<T, C> {}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::RedBlackTree;

    #[test]
    fn test_iter() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_iter_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_iter_is_restartable() {
        let tree = (0..50).rev().collect::<RedBlackTree<u32>>();
        let first = tree.iter().collect::<Vec<&u32>>();
        let second = tree.iter().collect::<Vec<&u32>>();
        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
    }

    #[test]
    fn test_iter_len() {
        let tree = (0..10).collect::<RedBlackTree<u32>>();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 10);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.clone().count(), 8);
    }

    #[test]
    fn test_into_iter() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(5);
        tree.insert(3);

        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_into_iter_partial() {
        let tree = vec![String::from("b"), String::from("a"), String::from("c")]
            .into_iter()
            .collect::<RedBlackTree<String>>();
        let mut iter = tree.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(String::from("a")));
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_ref_into_iter() {
        let tree = (0..5).collect::<RedBlackTree<u32>>();
        let mut sum = 0;
        for key in &tree {
            sum += key;
        }
        assert_eq!(sum, 10);
    }
}
