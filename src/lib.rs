//! An ordered set implemented with an AVL tree.
//!
//! [`AvlTreeSet`] stores each distinct value once and keeps the values in ascending order.
//! Besides ordinary iteration it offers [`Cursor`]s that step forwards and backwards
//! through the set and can be positioned by [`find`](AvlTreeSet::find) and
//! [`lower_bound`](AvlTreeSet::lower_bound).
//!
//! ```
//! use avl_set::AvlTreeSet;
//! let set: AvlTreeSet<i32> = [5, 3, 8, 1, 4, 7, 9, 2, 6].into_iter().collect();
//! assert_eq!(set.len(), 9);
//! assert!(set.iter().copied().eq(1..=9));
//!
//! let mut cursor = set.end();
//! cursor.move_prev();
//! assert_eq!(cursor.value(), &9);
//! ```

mod cursor;
mod set;
mod tree;

pub use cursor::Cursor;
pub use set::{AvlTreeSet, IntoIter, Iter};
