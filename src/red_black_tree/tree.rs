use crate::arena::Arena;
use crate::compare::{Compare, Natural};
use crate::error::{Result, Violation};
use crate::red_black_tree::iter::{IntoIter, Iter};
use crate::red_black_tree::node::{Color, Links, Node, NodeId, Side, NIL};
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

/// An ordered collection of keys implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, no red node has a red child, and every path from a node down to a leaf
/// passes through the same number of black nodes, which keeps the height within twice the
/// optimum. Nodes live in an arena and refer to each other by index. Every missing child and
/// the parent of the root is the same black sentinel, so the rebalancing code never has to
/// check whether a relative exists before reading its color.
///
/// Keys are arranged by a comparator `C`, which defaults to the `Ord` implementation of `T`.
/// `insert` does not reject equal keys: they are placed after the existing ones. Use
/// `insert_unique` for set semantics.
///
/// # Examples
///
/// ```
/// use rbtree_index::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// for key in &[5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(*key);
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert!(tree.contains(&4));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &4, &5, &7, &8, &9]);
///
/// assert!(tree.remove(&3));
/// assert!(!tree.remove(&100));
/// assert_eq!(tree.min(), Some(&1));
/// ```
#[derive(Clone)]
pub struct RedBlackTree<T, C = Natural> {
    arena: Arena<Node<T>>,
    nil: Links,
    root: NodeId,
    len: usize,
    comparator: C,
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackTree<T>` ordered by `T`'s `Ord` implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Constructs a new, empty `RedBlackTree<T>` with room for `capacity` keys before the node
    /// storage has to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackTree {
            arena: Arena::with_capacity(capacity),
            nil: Links::sentinel(),
            root: NIL,
            len: 0,
            comparator: Natural,
        }
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackTree<T, C>` that orders keys with `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// tree.insert(1);
    /// tree.insert(3);
    /// tree.insert(2);
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        RedBlackTree {
            arena: Arena::new(),
            nil: Links::sentinel(),
            root: NIL,
            len: 0,
            comparator,
        }
    }

    /// Inserts a key into the tree. A key equal to one already stored is kept alongside it and
    /// ordered after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: T) {
        let (parent, side) = self.locate(&key);
        let node = self.arena.allocate(Node::new(key, parent));
        self.attach(node, parent, side);
    }

    /// Inserts a key into the tree, returning an error instead of aborting when memory for the
    /// new node cannot be allocated. On error the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.try_insert(1).is_ok());
    /// assert!(tree.contains(&1));
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<()> {
        let (parent, side) = self.locate(&key);
        let node = self.arena.try_allocate(Node::new(key, parent))?;
        self.attach(node, parent, side);
        Ok(())
    }

    /// Inserts a key into the tree only if no equal key is stored. Returns `true` if the key was
    /// inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.insert_unique(1));
    /// assert!(!tree.insert_unique(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, key: T) -> bool {
        if self.search(&key) != NIL {
            return false;
        }
        self.insert(key);
        true
    }

    /// Removes one key equal to `key` from the tree. Returns `false` and leaves the tree
    /// untouched if there is no such key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        self.take(key).is_some()
    }

    /// Removes one key equal to `key` from the tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(String::from("word"));
    /// assert_eq!(tree.take(&String::from("word")), Some(String::from("word")));
    /// assert_eq!(tree.take(&String::from("word")), None);
    /// ```
    pub fn take(&mut self, key: &T) -> Option<T> {
        match self.search(key) {
            NIL => None,
            z => Some(self.delete(z)),
        }
    }

    /// Checks if a key equal to `key` exists in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.search(key) != NIL
    }

    /// Returns a reference to the stored key equal to `key`, or `None` if there is no such key.
    pub fn get(&self, key: &T) -> Option<&T> {
        match self.search(key) {
            NIL => None,
            id => Some(&self.arena[id].key),
        }
    }

    /// Checks the red black invariants, the parent links, the ordering of the keys, and the
    /// live count. Returns the number of black nodes on every path from the root down to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.validate().unwrap(), 0);
    /// for key in 0..7 {
    ///     tree.insert(key);
    /// }
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize> {
        if self.nil.color != Color::Black {
            return Err(Violation::Sentinel.into());
        }
        if self.root != NIL {
            if self.color(self.root) != Color::Black {
                return Err(Violation::RedRoot.into());
            }
            if self.parent(self.root) != NIL {
                return Err(Violation::Parent.into());
            }
        }

        let mut count = 0;
        let black_height = self.validate_subtree(self.root, &mut count)?;
        if count != self.len || self.arena.len() != self.len {
            return Err(Violation::Len.into());
        }

        let mut keys = self.iter();
        if let Some(mut prev) = keys.next() {
            for key in keys {
                if self.comparator.compare(prev, key) == Ordering::Greater {
                    return Err(Violation::Order.into());
                }
                prev = key;
            }
        }

        Ok(black_height)
    }

    fn validate_subtree(&self, id: NodeId, count: &mut usize) -> Result<usize> {
        if id == NIL {
            return Ok(0);
        }
        *count += 1;

        let links = *self.links(id);
        for &child in &[links.left, links.right] {
            if child != NIL && self.parent(child) != id {
                return Err(Violation::Parent.into());
            }
        }
        if links.color == Color::Red
            && (self.color(links.left) == Color::Red || self.color(links.right) == Color::Red)
        {
            return Err(Violation::RedRed.into());
        }

        let left_height = self.validate_subtree(links.left, count)?;
        let right_height = self.validate_subtree(links.right, count)?;
        if left_height != right_height {
            return Err(Violation::BlackHeight.into());
        }

        match links.color {
            Color::Black => Ok(left_height + 1),
            Color::Red => Ok(left_height),
        }
    }

    fn search(&self, key: &T) -> NodeId {
        let mut curr = self.root;
        while curr != NIL {
            let node = &self.arena[curr];
            curr = match self.comparator.compare(key, &node.key) {
                Ordering::Equal => return curr,
                Ordering::Less => node.links.left,
                Ordering::Greater => node.links.right,
            };
        }
        NIL
    }

    // Finds the parent and side of the sentinel the new key replaces. Only reads the tree.
    fn locate(&self, key: &T) -> (NodeId, Side) {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut curr = self.root;
        while curr != NIL {
            parent = curr;
            side = if self.comparator.less(key, &self.arena[curr].key) {
                Side::Left
            } else {
                Side::Right
            };
            curr = self.child(curr, side);
        }
        (parent, side)
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Clears the tree, removing all keys. Nodes are dropped children first.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.clear();
    /// assert_eq!(tree.len(), 0);
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        debug!("Clearing red black tree with {} nodes.", self.len);
        let mut curr = self.root;
        while curr != NIL {
            let links = *self.links(curr);
            if links.left != NIL {
                curr = links.left;
            } else if links.right != NIL {
                curr = links.right;
            } else {
                self.arena.free(curr);
                if links.parent != NIL {
                    let side = self.side_of(curr, links.parent);
                    self.set_child(links.parent, side, NIL);
                }
                curr = links.parent;
            }
        }

        self.arena.clear();
        self.nil = Links::sentinel();
        self.root = NIL;
        self.len = 0;
    }

    /// Returns the minimum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        match self.root {
            NIL => None,
            root => Some(&self.arena[self.extreme(root, Side::Left)].key),
        }
    }

    /// Returns the maximum key of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    /// assert_eq!(tree.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        match self.root {
            NIL => None,
            root => Some(&self.arena[self.extreme(root, Side::Right)].key),
        }
    }

    /// Calls `visit` on every key of the tree in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// let mut keys = Vec::new();
    /// tree.traverse(|key| keys.push(*key));
    /// assert_eq!(keys, vec![1, 2]);
    /// ```
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        for key in self.iter() {
            visit(key);
        }
    }

    /// Returns an iterator over the tree. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(3);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self)
    }

    pub(super) fn root(&self) -> NodeId {
        self.root
    }

    pub(super) fn node(&self, id: NodeId) -> &Node<T> {
        &self.arena[id]
    }

    // Detaches a node whose left subtree has already been consumed.
    pub(super) fn release(&mut self, id: NodeId) -> Node<T> {
        self.len -= 1;
        self.arena.free(id)
    }

    fn links(&self, id: NodeId) -> &Links {
        if id == NIL {
            &self.nil
        } else {
            &self.arena[id].links
        }
    }

    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        if id == NIL {
            &mut self.nil
        } else {
            &mut self.arena[id].links
        }
    }

    fn color(&self, id: NodeId) -> Color {
        self.links(id).color
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(id != NIL || color == Color::Black);
        self.links_mut(id).color = color;
    }

    fn parent(&self, id: NodeId) -> NodeId {
        self.links(id).parent
    }

    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.links_mut(id).parent = parent;
    }

    fn child(&self, id: NodeId, side: Side) -> NodeId {
        self.links(id).child(side)
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        *self.links_mut(id).child_mut(side) = child;
    }

    fn side_of(&self, id: NodeId, parent: NodeId) -> Side {
        if self.child(parent, Side::Left) == id {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while self.child(id, side) != NIL {
            id = self.child(id, side);
        }
        id
    }

    // Points whatever referred to `old` from `parent` at `new` instead.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else {
            let side = self.side_of(old, parent);
            self.set_child(parent, side, new);
        }
    }

    // Rotating towards `side` lifts the child on the opposite side into the place of `x`.
    fn rotate(&mut self, x: NodeId, side: Side) {
        let y = self.child(x, side.flip());
        let inner = self.child(y, side);

        self.set_child(x, side.flip(), inner);
        if inner != NIL {
            self.set_parent(inner, x);
        }

        let parent = self.parent(x);
        self.set_parent(y, parent);
        self.replace_child(parent, x, y);

        self.set_child(y, side, x);
        self.set_parent(x, y);
    }

    fn rotate_left(&mut self, x: NodeId) {
        trace!("Rotating left around {:?}.", x);
        self.rotate(x, Side::Left);
    }

    fn rotate_right(&mut self, y: NodeId) {
        trace!("Rotating right around {:?}.", y);
        self.rotate(y, Side::Right);
    }

    fn rotate_toward(&mut self, x: NodeId, side: Side) {
        match side {
            Side::Left => self.rotate_left(x),
            Side::Right => self.rotate_right(x),
        }
    }

    fn attach(&mut self, z: NodeId, parent: NodeId, side: Side) {
        if parent == NIL {
            self.root = z;
        } else {
            self.set_child(parent, side, z);
        }
        self.len += 1;
        self.insert_fixup(z);
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.color(self.parent(z)) == Color::Red {
            let parent = self.parent(z);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, side.flip());

            if self.color(uncle) == Color::Red {
                trace!("Insert fixup: recoloring red uncle {:?}.", uncle);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
            } else {
                if z == self.child(parent, side.flip()) {
                    z = parent;
                    self.rotate_toward(z, side);
                }
                let parent = self.parent(z);
                let grandparent = self.parent(parent);
                trace!("Insert fixup: rotating grandparent {:?}.", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_toward(grandparent, side.flip());
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // Replaces the subtree rooted at `u` with the subtree rooted at `v`. The sentinel's parent is
    // written too, since delete fixup may start from it.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        self.replace_child(parent, u, v);
        self.set_parent(v, parent);
    }

    fn delete(&mut self, z: NodeId) -> T {
        let Links { left, right, .. } = *self.links(z);
        let mut removed_color = self.color(z);
        let x;

        if left == NIL {
            x = right;
            self.transplant(z, right);
        } else if right == NIL {
            x = left;
            self.transplant(z, left);
        } else {
            let y = self.extreme(right, Side::Left);
            removed_color = self.color(y);
            x = self.child(y, Side::Right);

            if self.parent(y) == z {
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                self.set_child(y, Side::Right, right);
                self.set_parent(right, y);
            }

            self.transplant(z, y);
            self.set_child(y, Side::Left, left);
            self.set_parent(left, y);
            let color = self.color(z);
            self.set_color(y, color);
        }

        let node = self.arena.free(z);
        self.len -= 1;

        if removed_color == Color::Black {
            self.delete_fixup(x);
        }

        node.key
    }

    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.color(x) == Color::Black {
            let parent = self.parent(x);
            let side = self.side_of(x, parent);
            let mut sibling = self.child(parent, side.flip());

            if self.color(sibling) == Color::Red {
                trace!("Delete fixup: red sibling {:?}.", sibling);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate_toward(parent, side);
                sibling = self.child(parent, side.flip());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.flip());
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("Delete fixup: pushing deficiency up to {:?}.", parent);
                self.set_color(sibling, Color::Red);
                x = parent;
            } else {
                if self.color(far) == Color::Black {
                    trace!("Delete fixup: red near nephew {:?}.", near);
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate_toward(sibling, side.flip());
                    sibling = self.child(parent, side.flip());
                }

                trace!("Delete fixup: red far nephew under {:?}.", sibling);
                let parent_color = self.color(parent);
                let far = self.child(sibling, side.flip());
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                self.set_color(far, Color::Black);
                self.rotate_toward(parent, side);
                x = self.root;
            }
        }

        self.set_color(x, Color::Black);
    }
}

impl<T, C> Default for RedBlackTree<T, C>
where
    C: Compare<T> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> fmt::Debug for RedBlackTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for RedBlackTree<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackTree<T, C>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for RedBlackTree<T, C> where T: Eq {}

impl<T, C> Extend<T> for RedBlackTree<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T, C> FromIterator<T> for RedBlackTree<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type IntoIter = IntoIter<T, C>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T, C>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
