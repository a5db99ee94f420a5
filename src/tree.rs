use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::ptr::NonNull;

/// Raw AVL tree backing the set.
///
/// Nodes are boxed and linked by raw pointers. Child links own their subtree,
/// the parent link is a back-pointer used for navigation and rotations only.
pub(crate) struct Tree<T> {
    root: Link<T>,
    num_nodes: usize,
}

pub(crate) struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    parent: Link<T>,
    height: usize,
}

pub(crate) type NodePtr<T> = NonNull<Node<T>>;
pub(crate) type Link<T> = Option<NodePtr<T>>;
type LinkPtr<T> = NonNull<Link<T>>;

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn len(&self) -> usize {
        self.num_nodes
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn height(&self) -> usize {
        match self.root {
            None => 0,
            Some(root_ptr) => unsafe { root_ptr.as_ref().height },
        }
    }

    /// Releases all nodes, children before their parent.
    pub(crate) fn clear(&mut self) {
        self.postorder(|node_ptr| unsafe { Node::destroy(node_ptr) });
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns the node holding the smallest value.
    pub(crate) fn first(&self) -> Link<T> {
        self.root.map(Node::min)
    }

    /// Returns the node holding the largest value.
    pub(crate) fn last(&self) -> Link<T> {
        self.root.map(Node::max)
    }

    pub(crate) fn pop_first(&mut self) -> Option<T> {
        self.first().map(|node_ptr| self.remove_node(node_ptr))
    }

    pub(crate) fn pop_last(&mut self) -> Option<T> {
        self.last().map(|node_ptr| self.remove_node(node_ptr))
    }

    /// Unlinks the given node, rebalances and hands back its value.
    fn remove_node(&mut self, node_ptr: NodePtr<T>) -> T {
        debug_assert!(self.num_nodes >= 1);
        self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        unsafe { Node::into_value(node_ptr) }
    }

    fn unlink_node(&mut self, node_ptr: NodePtr<T>) {
        unsafe {
            let (left, right, parent) = {
                let node = node_ptr.as_ref();
                (node.left, node.right, node.parent)
            };
            match (left, right) {
                (_, None) => {
                    // No right subtree, splice in the left child (if any)
                    if let Some(mut left_ptr) = left {
                        left_ptr.as_mut().parent = parent;
                    }
                    self.replace_child(parent, node_ptr, left);
                    self.rebalance(parent);
                }
                (None, Some(mut right_ptr)) => {
                    // No left subtree, splice in the right child
                    right_ptr.as_mut().parent = parent;
                    self.replace_child(parent, node_ptr, right);
                    self.rebalance(parent);
                }
                (Some(mut left_ptr), Some(mut right_ptr)) => {
                    // Replace by in-order successor, the smallest node of the right subtree
                    let mut successor_ptr = Node::min(right_ptr);
                    debug_assert!(successor_ptr.as_ref().left.is_none());

                    let rebalance_from = if successor_ptr == right_ptr {
                        // Successor keeps its own right subtree and moves up one level
                        successor_ptr
                    } else {
                        // Detach successor, its right subtree takes its place
                        let successor_right = successor_ptr.as_ref().right;
                        let mut successor_parent_ptr = match successor_ptr.as_ref().parent {
                            Some(successor_parent_ptr) => successor_parent_ptr,
                            None => unreachable!("successor below a node must have a parent"),
                        };
                        successor_parent_ptr.as_mut().left = successor_right;
                        if let Some(mut successor_right_ptr) = successor_right {
                            successor_right_ptr.as_mut().parent = Some(successor_parent_ptr);
                        }

                        successor_ptr.as_mut().right = Some(right_ptr);
                        right_ptr.as_mut().parent = Some(successor_ptr);
                        successor_parent_ptr
                    };

                    successor_ptr.as_mut().left = Some(left_ptr);
                    left_ptr.as_mut().parent = Some(successor_ptr);

                    successor_ptr.as_mut().parent = parent;
                    self.replace_child(parent, node_ptr, Some(successor_ptr));

                    // Path from the detach point up to the root might be out of balance now
                    self.rebalance(Some(rebalance_from));
                }
            }
        }
    }

    /// Points the parent's link (or the root) that currently refers to `old_ptr` at `new`.
    fn replace_child(&mut self, parent: Link<T>, old_ptr: NodePtr<T>, new: Link<T>) {
        match parent {
            None => self.root = new,
            Some(mut parent_ptr) => unsafe {
                if parent_ptr.as_ref().left == Some(old_ptr) {
                    parent_ptr.as_mut().left = new;
                } else {
                    parent_ptr.as_mut().right = new;
                }
            },
        }
    }

    fn left_height(node_ptr: NodePtr<T>) -> usize {
        unsafe {
            match node_ptr.as_ref().left {
                None => 0,
                Some(left_ptr) => left_ptr.as_ref().height + 1,
            }
        }
    }

    fn right_height(node_ptr: NodePtr<T>) -> usize {
        unsafe {
            match node_ptr.as_ref().right {
                None => 0,
                Some(right_ptr) => right_ptr.as_ref().height + 1,
            }
        }
    }

    fn adjust_height(mut node_ptr: NodePtr<T>) {
        let height = cmp::max(Self::left_height(node_ptr), Self::right_height(node_ptr));
        unsafe { node_ptr.as_mut().height = height };
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<T>) {
        unsafe {
            if let Some(mut right_ptr) = node_ptr.as_ref().right {
                node_ptr.as_mut().right = right_ptr.as_ref().left;
                if let Some(mut right_left_ptr) = right_ptr.as_ref().left {
                    right_left_ptr.as_mut().parent = Some(node_ptr);
                }

                let parent = node_ptr.as_ref().parent;
                right_ptr.as_mut().parent = parent;
                self.replace_child(parent, node_ptr, Some(right_ptr));

                right_ptr.as_mut().left = Some(node_ptr);
                node_ptr.as_mut().parent = Some(right_ptr);

                Self::adjust_height(node_ptr);
                Self::adjust_height(right_ptr);
            }
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<T>) {
        unsafe {
            if let Some(mut left_ptr) = node_ptr.as_ref().left {
                node_ptr.as_mut().left = left_ptr.as_ref().right;
                if let Some(mut left_right_ptr) = left_ptr.as_ref().right {
                    left_right_ptr.as_mut().parent = Some(node_ptr);
                }

                let parent = node_ptr.as_ref().parent;
                left_ptr.as_mut().parent = parent;
                self.replace_child(parent, node_ptr, Some(left_ptr));

                left_ptr.as_mut().right = Some(node_ptr);
                node_ptr.as_mut().parent = Some(left_ptr);

                Self::adjust_height(node_ptr);
                Self::adjust_height(left_ptr);
            }
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    fn rebalance(&mut self, start_from: Link<T>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            self.rebalance_node(node_ptr);
            current = parent;
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    /// Stops after first rebalance operation.
    /// This is enough to restore balance after a single insert operation.
    fn rebalance_once(&mut self, start_from: Link<T>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            if self.rebalance_node(node_ptr) {
                break;
            }
            current = parent;
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    /// Returns whether a rotation had been necessary.
    fn rebalance_node(&mut self, node_ptr: NodePtr<T>) -> bool {
        let left_height = Self::left_height(node_ptr);
        let right_height = Self::right_height(node_ptr);
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);

        let (left, right) = unsafe { (node_ptr.as_ref().left, node_ptr.as_ref().right) };
        match (left, right) {
            (Some(left_ptr), _) if left_height > right_height + 1 => {
                // Left-right case turns into left-left case
                if Self::right_height(left_ptr) > Self::left_height(left_ptr) {
                    self.rotate_left(left_ptr);
                }
                self.rotate_right(node_ptr);
                true
            }
            (_, Some(right_ptr)) if right_height > left_height + 1 => {
                // Right-left case turns into right-right case
                if Self::left_height(right_ptr) > Self::right_height(right_ptr) {
                    self.rotate_right(right_ptr);
                }
                self.rotate_left(node_ptr);
                true
            }
            _ => {
                Self::adjust_height(node_ptr);
                false
            }
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(NodePtr<T>)>(&self, f: F) {
        self.traverse(f, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<T>)>(&self, f: F) {
        self.traverse(|_| {}, f);
    }

    fn traverse<Pre, Post>(&self, mut preorder: Pre, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<T>),
        Post: FnMut(NodePtr<T>),
    {
        if let Some(mut node_ptr) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = unsafe { node_ptr.as_ref().parent } {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<T: Ord> Tree<T> {
    /// Returns the node holding a value equivalent to the given one.
    pub(crate) fn find<Q>(&self, value: &Q) -> Link<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match value.cmp(node_ptr.as_ref().value.borrow()) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    /// Returns the node holding the smallest value not less than the given one.
    pub(crate) fn lower_bound<Q>(&self, value: &Q) -> Link<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut candidate = None;
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match value.cmp(node_ptr.as_ref().value.borrow()) {
                    Ordering::Equal => return Some(node_ptr),
                    Ordering::Less => {
                        candidate = Some(node_ptr);
                        node_ptr.as_ref().left
                    }
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        candidate
    }

    /// Inserts a value unless an equivalent one is already stored.
    /// Returns whether the value was inserted.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        if let Some((parent, mut link_ptr)) = self.find_insert_pos(&value) {
            unsafe {
                *link_ptr.as_mut() = Some(Node::create(parent, value));
            }
            self.num_nodes += 1;
            self.rebalance_once(parent);
            return true;
        }
        false
    }

    /// Removes the value equivalent to the given one and returns it.
    pub(crate) fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|node_ptr| self.remove_node(node_ptr))
    }

    fn find_insert_pos(&mut self, value: &T) -> Option<(Link<T>, LinkPtr<T>)> {
        let mut parent: Link<T> = None;
        let mut link_ptr: LinkPtr<T> = NonNull::from(&mut self.root);
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                parent = Some(node_ptr);
                link_ptr = match value.cmp(&node_ptr.as_ref().value) {
                    Ordering::Equal => return None,
                    Ordering::Less => NonNull::from(&mut node_ptr.as_mut().left),
                    Ordering::Greater => NonNull::from(&mut node_ptr.as_mut().right),
                };
            }
        }
        Some((parent, link_ptr))
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_node_ptr) = self.root {
                assert!(root_node_ptr.as_ref().parent.is_none());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let mut height = 0;
                let mut left_height = 0;
                let mut right_height = 0;

                // Check link for left child node
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().value < node_ptr.as_ref().value);
                    left_height = left_ptr.as_ref().height + 1;
                    height = cmp::max(height, left_height);
                }

                // Check link for right child node
                if let Some(right_ptr) = node_ptr.as_ref().right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().value > node_ptr.as_ref().value);
                    right_height = right_ptr.as_ref().height + 1;
                    height = cmp::max(height, right_height);
                }

                // Check height
                assert_eq!(node_ptr.as_ref().height, height);

                // Check AVL condition (nearly balance)
                assert!(left_height <= right_height + 1);
                assert!(right_height <= left_height + 1);

                num_nodes += 1;
            });

            // Check number of nodes
            assert_eq!(num_nodes, self.num_nodes);

            // Check strict in-order sequence across the whole tree
            let mut current = self.first();
            while let Some(node_ptr) = current {
                current = Node::successor(node_ptr);
                if let Some(next_ptr) = current {
                    assert!(node_ptr.as_ref().value < next_ptr.as_ref().value);
                }
            }
        }
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for Tree<T> {
    /// Duplicates the structure node by node in preorder,
    /// copying heights and rebuilding parent links.
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        if let Some(mut src_ptr) = self.root {
            unsafe {
                let mut dst_ptr = Node::duplicate(None, src_ptr);
                tree.root = Some(dst_ptr);
                let mut dir = Direction::FromParent;
                loop {
                    match dir {
                        Direction::FromParent => {
                            if let Some(left_ptr) = src_ptr.as_ref().left {
                                let new_ptr = Node::duplicate(Some(dst_ptr), left_ptr);
                                dst_ptr.as_mut().left = Some(new_ptr);
                                src_ptr = left_ptr;
                                dst_ptr = new_ptr;
                            } else {
                                dir = Direction::FromLeft;
                            }
                        }
                        Direction::FromLeft => {
                            if let Some(right_ptr) = src_ptr.as_ref().right {
                                let new_ptr = Node::duplicate(Some(dst_ptr), right_ptr);
                                dst_ptr.as_mut().right = Some(new_ptr);
                                src_ptr = right_ptr;
                                dst_ptr = new_ptr;
                                dir = Direction::FromParent;
                            } else {
                                dir = Direction::FromRight;
                            }
                        }
                        Direction::FromRight => {
                            match (src_ptr.as_ref().parent, dst_ptr.as_ref().parent) {
                                (Some(src_parent_ptr), Some(dst_parent_ptr)) => {
                                    if Some(src_ptr) == src_parent_ptr.as_ref().left {
                                        dir = Direction::FromLeft;
                                    } else {
                                        dir = Direction::FromRight;
                                    }
                                    src_ptr = src_parent_ptr;
                                    dst_ptr = dst_parent_ptr;
                                }
                                _ => break,
                            }
                        }
                    }
                }
            }
        }
        tree.num_nodes = self.num_nodes;
        tree
    }
}

impl<T> Node<T> {
    fn create(parent: Link<T>, value: T) -> NodePtr<T> {
        let boxed = Box::new(Node {
            value,
            parent,
            left: None,
            right: None,
            height: 0,
        });
        NonNull::from(Box::leak(boxed))
    }

    unsafe fn destroy(node_ptr: NodePtr<T>) {
        drop(Box::from_raw(node_ptr.as_ptr()));
    }

    unsafe fn into_value(node_ptr: NodePtr<T>) -> T {
        Box::from_raw(node_ptr.as_ptr()).value
    }

    /// Returns the value of a node for as long as the caller keeps the tree borrowed.
    pub(crate) unsafe fn value<'a>(node_ptr: NodePtr<T>) -> &'a T
    where
        T: 'a,
    {
        &(*node_ptr.as_ptr()).value
    }

    /// Leftmost node of the subtree.
    pub(crate) fn min(mut node_ptr: NodePtr<T>) -> NodePtr<T> {
        while let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
            node_ptr = left_ptr;
        }
        node_ptr
    }

    /// Rightmost node of the subtree.
    pub(crate) fn max(mut node_ptr: NodePtr<T>) -> NodePtr<T> {
        while let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
            node_ptr = right_ptr;
        }
        node_ptr
    }

    /// Next node in sorted order, found through child and parent links only.
    pub(crate) fn successor(node_ptr: NodePtr<T>) -> Link<T> {
        unsafe {
            if let Some(right_ptr) = node_ptr.as_ref().right {
                return Some(Self::min(right_ptr));
            }
            let mut child_ptr = node_ptr;
            while let Some(parent_ptr) = child_ptr.as_ref().parent {
                if parent_ptr.as_ref().left == Some(child_ptr) {
                    return Some(parent_ptr);
                }
                child_ptr = parent_ptr;
            }
            None
        }
    }

    /// Previous node in sorted order, found through child and parent links only.
    pub(crate) fn predecessor(node_ptr: NodePtr<T>) -> Link<T> {
        unsafe {
            if let Some(left_ptr) = node_ptr.as_ref().left {
                return Some(Self::max(left_ptr));
            }
            let mut child_ptr = node_ptr;
            while let Some(parent_ptr) = child_ptr.as_ref().parent {
                if parent_ptr.as_ref().right == Some(child_ptr) {
                    return Some(parent_ptr);
                }
                child_ptr = parent_ptr;
            }
            None
        }
    }
}

impl<T: Clone> Node<T> {
    unsafe fn duplicate(parent: Link<T>, src_ptr: NodePtr<T>) -> NodePtr<T> {
        let src = src_ptr.as_ref();
        let mut node_ptr = Self::create(parent, src.value.clone());
        node_ptr.as_mut().height = src.height;
        node_ptr
    }
}
