//! Arena index over a borrowed forest
//!
//! The forest itself is a nested value. For id lookups and upward navigation
//! the index flattens it into an arena where every node knows its parent, its
//! children, and its position among its siblings.

use crate::tree::{Forest, NodeId, Tree, TreeNode};
use std::collections::HashMap;
use std::fmt;

/// Position of a node inside a [`ForestIndex`] arena
///
/// Slots are assigned in pre-order and are only meaningful for the index that
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(usize);

impl Slot {
    pub const fn new(slot: usize) -> Self {
        Slot(slot)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Internal arena entry
#[derive(Debug, Clone)]
struct IndexEntry<'a> {
    node: &'a TreeNode,
    parent: Option<Slot>,
    children: Vec<Slot>,
    /// Index within the parent's children (or the root list)
    position: usize,
    sibling_count: usize,
}

/// Read-only arena view of a forest
///
/// Building the index is a single pre-order pass; afterwards lookups by id are
/// O(1) and ancestor walks are O(depth).
pub struct ForestIndex<'a> {
    entries: Vec<IndexEntry<'a>>,
    roots: Vec<Slot>,
    by_id: HashMap<&'a str, Slot>,
}

impl<'a> ForestIndex<'a> {
    /// Index every node of the forest
    pub fn build(forest: &'a Forest) -> Self {
        let mut index = Self {
            entries: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
        };
        index.roots = index.insert_level(forest.as_slice(), None);
        index
    }

    fn insert_level(&mut self, nodes: &'a [TreeNode], parent: Option<Slot>) -> Vec<Slot> {
        let sibling_count = nodes.len();
        let mut slots = Vec::with_capacity(sibling_count);

        for (position, node) in nodes.iter().enumerate() {
            let slot = Slot::new(self.entries.len());
            self.entries.push(IndexEntry {
                node,
                parent,
                children: Vec::new(),
                position,
                sibling_count,
            });

            // First occurrence wins
            self.by_id.entry(node.id.as_str()).or_insert(slot);

            let children = self.insert_level(node.children(), Some(slot));
            self.entries[slot.get()].children = children;
            slots.push(slot);
        }

        slots
    }

    /// Look up the slot holding a node id
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        self.by_id.get(id).copied()
    }

    /// Returns true if any node carries this id
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&'a TreeNode> {
        self.slot_of(id).map(|slot| self.entries[slot.get()].node)
    }

    /// Index of the node within its own sibling sequence
    pub fn position(&self, slot: Slot) -> Option<usize> {
        self.entries.get(slot.get()).map(|e| e.position)
    }

    /// Returns true if the node is the last among its siblings
    ///
    /// Returns false for invalid slots.
    pub fn is_last_sibling(&self, slot: Slot) -> bool {
        self.entries
            .get(slot.get())
            .is_some_and(|e| e.position + 1 == e.sibling_count)
    }

    /// Sibling positions from the root list down to this node
    ///
    /// Feeding the path back through the nested forest reaches the node
    /// without searching.
    pub fn position_path(&self, slot: Slot) -> Vec<usize> {
        let mut path: Vec<usize> = self
            .ancestors(slot)
            .into_iter()
            .filter_map(|s| self.position(s))
            .collect();
        path.reverse();
        path.extend(self.position(slot));
        path
    }

    /// Every id in the forest
    pub fn ids(&self) -> impl Iterator<Item = &'a NodeId> + '_ {
        self.entries.iter().map(|e| &e.node.id)
    }
}

impl Tree for ForestIndex<'_> {
    fn roots(&self) -> Box<dyn Iterator<Item = Slot> + '_> {
        Box::new(self.roots.iter().copied())
    }

    fn get(&self, slot: Slot) -> Option<&TreeNode> {
        self.entries.get(slot.get()).map(|e| e.node)
    }

    fn parent(&self, slot: Slot) -> Option<Slot> {
        self.entries.get(slot.get())?.parent
    }

    fn children(&self, slot: Slot) -> Box<dyn Iterator<Item = Slot> + '_> {
        match self.entries.get(slot.get()) {
            Some(entry) => Box::new(entry.children.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn node_count(&self) -> usize {
        self.entries.len()
    }
}
