//! Slot allocator backing the node graph of the red-black tree.

use crate::error::Result;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an occupied slot of an `Arena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slot(usize);

impl Slot {
    /// A handle that is never returned by `Arena::allocate`.
    pub const RESERVED: Slot = Slot(usize::MAX);

    /// Returns the position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Slot>),
}

/// A growable slab that only stores a single type of object.
///
/// Objects live in one contiguous `Vec`. Freed slots are threaded into an intrusive free-list
/// and handed out again, most recently freed first, before the vector grows. A `Slot` is only
/// meaningful for the arena that produced it.
///
/// # Examples
///
/// ```
/// use rbtree_index::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct Arena<T> {
    head: Option<Slot>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Arena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `Arena<T>` that can hold `capacity` objects before growing.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// assert!(arena.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    fn place(&mut self, value: T) -> Slot {
        self.len += 1;

        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Slot(self.blocks.len() - 1)
            },
            Some(slot) => {
                let vacant_block = mem::replace(&mut self.blocks[slot.0], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_slot) => {
                        self.head = next_slot;
                        slot
                    },
                    Block::Occupied(_) => unreachable!("free-list points at an occupied block"),
                }
            },
        }
    }

    /// Allocates an object in the arena and returns its `Slot`. The slot can later be used to
    /// retrieve references to the object and to free it.
    ///
    /// # Panics
    ///
    /// Aborts like `Vec::push` if the allocator cannot provide more memory.
    pub fn allocate(&mut self, value: T) -> Slot {
        self.place(value)
    }

    /// Allocates an object in the arena, reporting allocation failure instead of aborting. On
    /// failure the arena is left untouched and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.try_allocate("key").unwrap();
    /// assert_eq!(arena[x], "key");
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Slot> {
        if self.head.is_none() {
            self.blocks.try_reserve(1)?;
        }
        Ok(self.place(value))
    }

    /// Frees an object in the arena and returns it. The slot is reused by the next allocation.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range or already vacant.
    pub fn free(&mut self, slot: Slot) -> T {
        match self.blocks.get(slot.0) {
            Some(Block::Occupied(_)) => {},
            Some(Block::Vacant(_)) => panic!("Error: attempting to free vacant block."),
            None => panic!("Error: attempting to free invalid block."),
        }
        let old_block = mem::replace(&mut self.blocks[slot.0], Block::Vacant(self.head.take()));
        match old_block {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(slot);
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the slot is not
    /// occupied.
    pub fn get(&self, slot: Slot) -> Option<&T> {
        match self.blocks.get(slot.0) {
            Some(Block::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the slot is not
    /// occupied.
    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        match self.blocks.get_mut(slot.0) {
            Some(Block::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Drops every object and forgets all slots. Previously returned slots become invalid.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Index<Slot> for Arena<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(slot).expect("Error: slot out of bounds.")
    }
}

impl<T> IndexMut<Slot> for Arena<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(slot).expect("Error: slot out of bounds.")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
