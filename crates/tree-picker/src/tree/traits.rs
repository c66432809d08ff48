//! Core tree traits for navigating an indexed forest

use crate::tree::{NodeKind, Slot, TreeNode};

/// Navigation over a forest whose nodes are addressed by [`Slot`]
///
/// Implementations provide the basic parent/child links; derived methods give
/// higher-level queries such as depth and ancestor lists.
///
/// # Example
///
/// ```ignore
/// fn print_outline<T: Tree + TreeTraversal>(tree: &T) {
///     for slot in tree.walk() {
///         let node = tree.get(slot).unwrap();
///         println!("{:indent$}{}", "", node.name, indent = tree.depth(slot) * 2);
///     }
/// }
/// ```
pub trait Tree {
    /// Root-level slots, in forest order
    fn roots(&self) -> Box<dyn Iterator<Item = Slot> + '_>;

    /// Get a node by its slot
    ///
    /// Returns `None` if the slot is invalid.
    fn get(&self, slot: Slot) -> Option<&TreeNode>;

    /// Get the parent of a node
    ///
    /// Returns `None` for root-level nodes.
    fn parent(&self, slot: Slot) -> Option<Slot>;

    /// Iterate over children of a node
    ///
    /// Returns an empty iterator for leaf nodes or invalid slots.
    fn children(&self, slot: Slot) -> Box<dyn Iterator<Item = Slot> + '_>;

    /// Count total nodes in the forest
    fn node_count(&self) -> usize;

    /// Structural classification of a node
    fn kind(&self, slot: Slot) -> Option<NodeKind> {
        self.get(slot).map(TreeNode::kind)
    }

    /// Check if a node is a leaf
    ///
    /// Returns false for invalid slots.
    fn is_leaf(&self, slot: Slot) -> bool {
        self.kind(slot).is_some_and(NodeKind::is_leaf)
    }

    /// Check if a node is a parent
    ///
    /// Returns false for invalid slots.
    fn is_parent(&self, slot: Slot) -> bool {
        self.kind(slot).is_some_and(NodeKind::is_parent)
    }

    /// Get the name of a node
    fn name(&self, slot: Slot) -> Option<&str> {
        self.get(slot).map(|n| n.name.as_str())
    }

    /// Names from the root level down to this node
    ///
    /// Returns an empty list if the slot is invalid.
    fn breadcrumb(&self, slot: Slot) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut current = Some(slot);

        while let Some(s) = current {
            if let Some(name) = self.name(s) {
                names.push(name);
            }
            current = self.parent(s);
        }

        names.reverse();
        names
    }

    /// Get the depth of a node (root level = 0)
    ///
    /// Returns 0 for invalid slots.
    fn depth(&self, slot: Slot) -> usize {
        let mut depth = 0;
        let mut current = self.parent(slot);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Get all ancestors of a node, from parent to root
    ///
    /// Returns an empty vector for root-level nodes or invalid slots.
    fn ancestors(&self, slot: Slot) -> Vec<Slot> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(slot);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }
}

/// Pre-order walks and classification sweeps over a [`Tree`]
///
/// Automatically implemented for all types that implement `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk every node, parents before children, siblings in order
    fn walk(&self) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.roots().collect())
    }

    /// Get all leaf nodes
    fn leaves(&self) -> Vec<Slot>
    where
        Self: Sized,
    {
        self.walk().filter(|&slot| self.is_leaf(slot)).collect()
    }

    /// Get all parent nodes
    fn parents(&self) -> Vec<Slot>
    where
        Self: Sized,
    {
        self.walk().filter(|&slot| self.is_parent(slot)).collect()
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Pre-order iterator over a forest
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    stack: Vec<Slot>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a walker over the given starting slots, visited in order
    pub fn new(tree: &'a T, starts: Vec<Slot>) -> Self {
        Self {
            tree,
            stack: starts.into_iter().rev().collect(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = Slot;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse so the first child is popped next
        let children: Vec<_> = self.tree.children(current).collect();
        self.stack.extend(children.into_iter().rev());

        Some(current)
    }
}
