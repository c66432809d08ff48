//! Read-only views derived from a forest

use crate::tree::{Forest, ForestIndex, NodeId, NodeKind, Tree, TreeNode};
use smallvec::SmallVec;
use std::collections::HashSet;

/// For each ancestor level, whether that ancestor is the last of its siblings
///
/// Ordered from the root level down to the target's parent.
pub type AncestorChain = SmallVec<[bool; 8]>;

/// Classify a node as leaf or parent
pub fn classify(node: &TreeNode) -> NodeKind {
    node.kind()
}

/// Keep the nodes whose name contains `query`, plus their ancestors
///
/// Matching is case-insensitive. A retained node keeps only its retained
/// children; a node that had a `children` field keeps it even if every child
/// was pruned. Sibling order is preserved. An empty query returns the input
/// forest itself.
pub fn filter_by_search(forest: &Forest, query: &str) -> Forest {
    if query.is_empty() {
        return forest.clone();
    }
    let needle = query.to_lowercase();
    filter_level(forest, &needle)
}

fn filter_level(nodes: &[TreeNode], needle: &str) -> Forest {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, needle))
        .collect()
}

fn filter_node(node: &TreeNode, needle: &str) -> Option<TreeNode> {
    let matches = node.name.to_lowercase().contains(needle);

    match &node.children {
        None => matches.then(|| node.clone()),
        Some(children) => {
            let kept = filter_level(children, needle);
            if kept.is_empty() && !matches {
                return None;
            }
            Some(TreeNode {
                children: Some(kept),
                ..node.clone()
            })
        }
    }
}

/// Summarize the ancestors of `target` for drawing connector lines
///
/// Returns one flag per ancestor, root level first, telling whether that
/// ancestor is the last among its siblings. Unknown ids yield an empty chain.
pub fn ancestor_chain_summary(target: &str, forest: &Forest) -> AncestorChain {
    let index = ForestIndex::build(forest);
    let Some(slot) = index.slot_of(target) else {
        log::trace!("ancestor chain requested for unknown node {}", target);
        return AncestorChain::new();
    };

    index
        .ancestors(slot)
        .into_iter()
        .rev()
        .map(|ancestor| index.is_last_sibling(ancestor))
        .collect()
}

/// Depth-first search for a node by id
pub fn find_node<'a>(forest: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    forest.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find_node(node.children(), id)
        }
    })
}

/// Returns true if any node in the forest carries `id`
pub fn contains(forest: &[TreeNode], id: &str) -> bool {
    find_node(forest, id).is_some()
}

/// Number of nodes at every level
pub fn node_count(forest: &[TreeNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + node_count(node.children()))
        .sum()
}

/// Every id in the forest
pub fn collect_ids(forest: &[TreeNode]) -> HashSet<NodeId> {
    fn walk(nodes: &[TreeNode], ids: &mut HashSet<NodeId>) {
        for node in nodes {
            ids.insert(node.id.clone());
            walk(node.children(), ids);
        }
    }

    let mut ids = HashSet::new();
    walk(forest, &mut ids);
    ids
}

/// Depth of a node (root level = 0), or `None` if absent
pub fn depth(forest: &Forest, id: &str) -> Option<usize> {
    let index = ForestIndex::build(forest);
    index.slot_of(id).map(|slot| index.depth(slot))
}

/// Which nodes have their children shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Descend only into nodes flagged `expanded: true`
    #[default]
    Respect,
    /// Descend into every parent, e.g. while a search is active
    All,
}

/// One line of a flattened tree view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
    /// Last among its siblings
    pub is_last: bool,
    pub ancestor_chain: AncestorChain,
}

impl VisibleRow<'_> {
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}

/// Flatten the forest into display rows in pre-order
pub fn visible_rows(forest: &Forest, expansion: Expansion) -> Vec<VisibleRow<'_>> {
    let mut rows = Vec::new();
    let mut tail_stack = AncestorChain::new();
    push_rows(forest, expansion, &mut tail_stack, &mut rows);
    rows
}

fn push_rows<'a>(
    nodes: &'a [TreeNode],
    expansion: Expansion,
    tail_stack: &mut AncestorChain,
    rows: &mut Vec<VisibleRow<'a>>,
) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        rows.push(VisibleRow {
            node,
            depth: tail_stack.len(),
            is_last,
            ancestor_chain: tail_stack.clone(),
        });

        let open = match expansion {
            Expansion::All => true,
            Expansion::Respect => node.is_expanded(),
        };
        if open && node.is_parent() {
            tail_stack.push(is_last);
            push_rows(node.children(), expansion, tail_stack, rows);
            tail_stack.pop();
        }
    }
}
