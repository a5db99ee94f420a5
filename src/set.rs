//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::cursor::Cursor;
use crate::tree::{Link, Node, Tree};

/// An ordered set implemented with an AVL tree.
///
/// Values are kept in ascending order. Two values are the same element
/// if they compare as [`Ordering::Equal`]; only the first one inserted is stored.
///
/// ```
/// use avl_set::AvlTreeSet;
/// let mut set = AvlTreeSet::new();
/// set.insert(5);
/// set.insert(3);
/// set.insert(8);
/// set.insert(3);
/// assert_eq!(set.len(), 3);
/// assert!(set.remove(&5));
/// assert!(!set.contains(&5));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 8]);
/// ```
pub struct AvlTreeSet<T> {
    tree: Tree<T>,
}

/// An iterator over the values of a set.
pub struct Iter<'a, T> {
    front: Link<T>,
    back: Link<T>,
    len: usize,
    marker: PhantomData<&'a T>,
}

/// An owning iterator over the values of a set.
pub struct IntoIter<T> {
    tree: Tree<T>,
}

impl<T: Ord> AvlTreeSet<T> {
    /// Creates an empty set.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Returns a reference to the value in the set that is equal to the given value.
    ///
    /// The value may be any borrowed form of the set's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).get()
    }

    /// Returns true if the set contains a value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value).is_some()
    }

    /// Inserts a value into the set.
    /// Returns whether the value was newly inserted.
    /// If an equal value is already present, the set is left unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value).is_some()
    }

    /// Removes a value from the set.
    /// Returns the stored value if it was previously in the set.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Returns a cursor at the value equal to the given value,
    /// or the end sentinel if there is none.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.find(value))
    }

    /// Returns a cursor at the smallest value not less than the given value,
    /// or the end sentinel if all values are less.
    ///
    /// ```
    /// use avl_set::AvlTreeSet;
    /// let set = AvlTreeSet::from([1, 3, 5, 7]);
    /// assert_eq!(set.lower_bound(&4).get(), Some(&5));
    /// assert_eq!(set.lower_bound(&5).get(), Some(&5));
    /// assert!(set.lower_bound(&8).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.lower_bound(value))
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.tree.check_consistency()
    }
}

impl<T> AvlTreeSet<T> {
    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest value in the set.
    pub fn first(&self) -> Option<&T> {
        self.begin().get()
    }

    /// Returns the largest value in the set.
    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|node_ptr| unsafe { Node::value(node_ptr) })
    }

    /// Removes and returns the smallest value in the set.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes and returns the largest value in the set.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Returns a cursor at the smallest value,
    /// or the end sentinel if the set is empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, self.tree.first())
    }

    /// Returns a cursor at the end sentinel.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, None)
    }

    /// Gets an iterator over the values of the set in sorted order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.tree.first(),
            back: self.tree.last(),
            len: self.tree.len(),
            marker: PhantomData,
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

impl<T: Ord> Default for AvlTreeSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for AvlTreeSet<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    /// Releases the current contents before duplicating `source`.
    fn clone_from(&mut self, source: &Self) {
        self.tree.clear();
        self.tree = source.tree.clone();
    }
}

impl<T: Ord> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlTreeSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: PartialEq> PartialEq for AvlTreeSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for AvlTreeSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for AvlTreeSet<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for AvlTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self.tree }
    }
}

impl<T: Ord> Extend<T> for AvlTreeSet<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(move |value| {
            self.insert(value);
        });
    }
}

impl<'a, T> Extend<&'a T> for AvlTreeSet<T>
where
    T: Ord + Copy + 'a,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.extend(iter.into_iter().copied());
    }
}

// Auto derived Clone seems to have an invalid type bound of T: Clone
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            len: self.len,
            marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node_ptr = self.front?;
        self.front = Node::successor(node_ptr);
        self.len -= 1;
        Some(unsafe { Node::value(node_ptr) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node_ptr = self.back?;
        self.back = Node::predecessor(node_ptr);
        self.len -= 1;
        Some(unsafe { Node::value(node_ptr) })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let iter = Iter {
            front: self.tree.first(),
            back: self.tree.last(),
            len: self.tree.len(),
            marker: PhantomData,
        };
        f.debug_list().entries(iter).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
