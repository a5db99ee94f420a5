//! Bidirectional cursors over the values of a set.

use std::fmt;
use std::ptr;

use crate::tree::{Link, Node, Tree};

/// A cursor pointing either at a value of an [`AvlTreeSet`] or at the end sentinel,
/// the position one past the largest value.
///
/// Cursors are created by [`begin`], [`end`], [`find`] and [`lower_bound`].
/// They borrow the set, so the set cannot be modified while a cursor is alive.
///
/// ```
/// use avl_set::AvlTreeSet;
/// let set = AvlTreeSet::from([1, 3, 5, 7]);
/// let mut cursor = set.lower_bound(&4);
/// assert_eq!(cursor.value(), &5);
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&7));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// assert_eq!(cursor, set.end());
/// cursor.move_prev();
/// assert_eq!(cursor.value(), &7);
/// ```
///
/// [`AvlTreeSet`]: crate::AvlTreeSet
/// [`begin`]: crate::AvlTreeSet::begin
/// [`end`]: crate::AvlTreeSet::end
/// [`find`]: crate::AvlTreeSet::find
/// [`lower_bound`]: crate::AvlTreeSet::lower_bound
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    // None is the end sentinel
    current: Link<T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, current: Link<T>) -> Self {
        Self { tree, current }
    }

    /// Returns true if the cursor is at the end sentinel.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the value at the cursor, or `None` at the end sentinel.
    pub fn get(&self) -> Option<&'a T> {
        self.current.map(|node_ptr| unsafe { Node::value(node_ptr) })
    }

    /// Returns the value at the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end sentinel.
    pub fn value(&self) -> &'a T {
        match self.get() {
            Some(value) => value,
            None => panic!("cursor is at the end of the set"),
        }
    }

    /// Moves the cursor to the next larger value,
    /// or to the end sentinel if there is none.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end sentinel.
    pub fn move_next(&mut self) {
        match self.current {
            Some(node_ptr) => self.current = Node::successor(node_ptr),
            None => panic!("cursor moved past the end of the set"),
        }
    }

    /// Moves the cursor to the next smaller value.
    /// Moving back from the end sentinel lands on the largest value.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the smallest value,
    /// or at the end sentinel of an empty set.
    pub fn move_prev(&mut self) {
        let prev = match self.current {
            Some(node_ptr) => Node::predecessor(node_ptr),
            None => self.tree.last(),
        };
        if prev.is_none() {
            panic!("cursor moved before the first element");
        }
        self.current = prev;
    }
}

// Auto derived Clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Cursor").field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}
