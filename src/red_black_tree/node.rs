use crate::arena::Slot;

/// Handle to a node of the tree. `NIL` stands for the shared sentinel.
pub type NodeId = Slot;

/// The sentinel: every absent child, and the parent of the root.
pub const NIL: NodeId = Slot::RESERVED;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// The structural part of a node. The sentinel only has this part.
#[derive(Clone, Copy, Debug)]
pub struct Links {
    pub color: Color,
    pub parent: NodeId,
    pub left: NodeId,
    pub right: NodeId,
}

impl Links {
    pub fn sentinel() -> Self {
        Links {
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    pub fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut NodeId {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A struct representing an internal node of a red black tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub links: Links,
}

impl<T> Node<T> {
    pub fn new(key: T, parent: NodeId) -> Self {
        Node {
            key,
            links: Links {
                color: Color::Red,
                parent,
                left: NIL,
                right: NIL,
            },
        }
    }
}

/// Which child of its parent a node is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
