//! Structural and content edits over an immutable forest
//!
//! Every operation takes the current forest by reference and returns the next
//! version. Only the sibling sequences on the path from the root level to the
//! edited node are rebuilt; every other branch is shared with the input.
//!
//! Operations addressed at an id that is not in the forest return the input
//! unchanged (the same handle, so [`Forest::ptr_eq`] holds). Callbacks fired
//! for nodes that have since been deleted are therefore harmless. Forest-wide
//! operations that end up changing nothing return the input handle too.

use crate::tree::ids::{fresh_id, IdGenerator};
use crate::tree::{Forest, ForestIndex, NodeId, TreeNode, MAX_NAME_LEN};
use log::debug;
use std::collections::HashSet;

/// The sibling sequence holding the edited node
struct Site<'a, 'f> {
    index: &'a ForestIndex<'f>,
    level: &'a [TreeNode],
    position: usize,
}

impl Site<'_, '_> {
    fn target(&self) -> &TreeNode {
        &self.level[self.position]
    }

    fn taken_ids(&self) -> HashSet<NodeId> {
        self.index.ids().cloned().collect()
    }

    fn replace(self, node: TreeNode) -> Vec<TreeNode> {
        let mut nodes = self.level.to_vec();
        nodes[self.position] = node;
        nodes
    }

    fn insert_after(self, node: TreeNode) -> Vec<TreeNode> {
        let mut nodes = self.level.to_vec();
        nodes.insert(self.position + 1, node);
        nodes
    }

    fn remove(self) -> Vec<TreeNode> {
        let mut nodes = self.level.to_vec();
        nodes.remove(self.position);
        nodes
    }
}

/// Locate `id` and rebuild the path to it, letting `edit` produce the new
/// sibling sequence that held it
fn edit_at<F>(forest: &Forest, id: &str, edit: F) -> Forest
where
    F: FnOnce(Site<'_, '_>) -> Vec<TreeNode>,
{
    let index = ForestIndex::build(forest);
    let Some(slot) = index.slot_of(id) else {
        debug!("node {} not found, forest left unchanged", id);
        return forest.clone();
    };
    let path = index.position_path(slot);
    rebuild(forest, &path, &index, edit)
}

fn rebuild<F>(level: &Forest, path: &[usize], index: &ForestIndex<'_>, edit: F) -> Forest
where
    F: FnOnce(Site<'_, '_>) -> Vec<TreeNode>,
{
    match path {
        [] => level.clone(),
        [position] => Forest::new(edit(Site {
            index,
            level: level.as_slice(),
            position: *position,
        })),
        [position, rest @ ..] => {
            let mut nodes = level.to_vec();
            let node = &mut nodes[*position];
            let children = node.children.clone().unwrap_or_default();
            node.children = Some(rebuild(&children, rest, index, edit));
            Forest::new(nodes)
        }
    }
}

/// Apply `f` to every node, children first
///
/// A level where `f` changed nothing comes back as the same handle.
fn rewrite_all<F>(level: &Forest, f: &F) -> Forest
where
    F: Fn(TreeNode) -> TreeNode,
{
    let mut changed = false;
    let nodes: Vec<TreeNode> = level
        .iter()
        .map(|node| {
            let mut next = node.clone();
            next.children = node.children.as_ref().map(|c| rewrite_all(c, f));
            let next = f(next);
            changed |= next != *node;
            next
        })
        .collect();

    if changed {
        Forest::new(nodes)
    } else {
        level.clone()
    }
}

/// Truncate a name to [`MAX_NAME_LEN`] characters
pub fn clamp_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

/// Rename a node
///
/// Names longer than [`MAX_NAME_LEN`] characters are clamped. Emptiness is
/// not checked.
pub fn rename_node(forest: &Forest, id: &str, new_name: &str) -> Forest {
    let name = clamp_name(new_name);
    edit_at(forest, id, |site| {
        let node = TreeNode {
            name,
            ..site.target().clone()
        };
        site.replace(node)
    })
}

/// Set the icon of exactly one node
pub fn set_node_icon(forest: &Forest, id: &str, icon: &str, is_user_icon: bool) -> Forest {
    edit_at(forest, id, |site| {
        let node = site.target().clone().with_icon(icon, is_user_icon);
        site.replace(node)
    })
}

/// Set the icon on every node of the forest
///
/// This is the "apply to all children" confirmation. It covers the whole
/// forest, not just the subtree of the node that was edited.
pub fn propagate_icon_to_descendants(forest: &Forest, icon: &str, is_user_icon: bool) -> Forest {
    rewrite_all(forest, &|node: TreeNode| node.with_icon(icon, is_user_icon))
}

/// Set the icon on every parent node of the forest
///
/// This is the "apply to all parents" confirmation. Like
/// [`propagate_icon_to_descendants`] it is forest-wide: every node with at
/// least one child is updated, wherever it sits.
pub fn propagate_icon_to_ancestors(forest: &Forest, icon: &str, is_user_icon: bool) -> Forest {
    rewrite_all(forest, &|node: TreeNode| {
        if node.is_parent() {
            node.with_icon(icon, is_user_icon)
        } else {
            node
        }
    })
}

fn new_node(id: NodeId, name: &str, as_leaf: bool) -> TreeNode {
    let node = TreeNode::leaf(id, clamp_name(name));
    if as_leaf {
        node
    } else {
        node.with_children(Forest::empty())
    }
}

/// Insert a new node right after `id`, in the same sibling sequence
///
/// With `as_leaf` the node has no children field; otherwise it starts with an
/// empty one.
pub fn add_sibling_node<G: IdGenerator + ?Sized>(
    forest: &Forest,
    id: &str,
    name: &str,
    as_leaf: bool,
    ids: &mut G,
) -> Forest {
    edit_at(forest, id, |site| {
        let mut taken = site.taken_ids();
        let node = new_node(fresh_id(ids, &mut taken), name, as_leaf);
        debug!("adding sibling {} after {}", node.id, id);
        site.insert_after(node)
    })
}

/// Append a new leaf as the last child of `id`
pub fn add_child_node<G: IdGenerator + ?Sized>(
    forest: &Forest,
    id: &str,
    name: &str,
    ids: &mut G,
) -> Forest {
    edit_at(forest, id, |site| {
        let mut taken = site.taken_ids();
        let child = new_node(fresh_id(ids, &mut taken), name, true);
        debug!("adding child {} under {}", child.id, id);

        let parent = site.target().clone();
        let mut children = parent.children().to_vec();
        children.push(child);
        site.replace(parent.with_children(Forest::new(children)))
    })
}

/// Insert a deep copy of `id` as its next sibling
///
/// Every node of the copy gets a fresh id; names, icons, expansion, and
/// structure are copied verbatim.
pub fn duplicate_node<G: IdGenerator + ?Sized>(forest: &Forest, id: &str, ids: &mut G) -> Forest {
    edit_at(forest, id, |site| {
        let mut taken = site.taken_ids();
        let copy = clone_with_fresh_ids(site.target(), ids, &mut taken);
        debug!("duplicated {} as {}", id, copy.id);
        site.insert_after(copy)
    })
}

fn clone_with_fresh_ids<G: IdGenerator + ?Sized>(
    node: &TreeNode,
    ids: &mut G,
    taken: &mut HashSet<NodeId>,
) -> TreeNode {
    let id = fresh_id(ids, taken);
    let children = node.children.as_ref().map(|children| {
        children
            .iter()
            .map(|child| clone_with_fresh_ids(child, ids, taken))
            .collect()
    });
    TreeNode {
        id,
        children,
        ..node.clone()
    }
}

/// Remove a node together with its whole subtree
pub fn delete_node(forest: &Forest, id: &str) -> Forest {
    edit_at(forest, id, |site| site.remove())
}

/// Set the UI expansion flag of one node
pub fn set_expanded(forest: &Forest, id: &str, expanded: bool) -> Forest {
    edit_at(forest, id, |site| {
        let node = site.target().clone().with_expanded(expanded);
        site.replace(node)
    })
}

/// Set the UI expansion flag of every parent node
pub fn set_all_expanded(forest: &Forest, expanded: bool) -> Forest {
    rewrite_all(forest, &|node: TreeNode| {
        if node.is_parent() {
            node.with_expanded(expanded)
        } else {
            node
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ids::SequentialIds;
    use crate::tree::query::{collect_ids, find_node, node_count};
    use pretty_assertions::assert_eq;

    // Root
    //   Child
    //   Folder
    //     Deep
    fn sample() -> Forest {
        Forest::new(vec![TreeNode::parent(
            "a",
            "Root",
            [
                TreeNode::leaf("b", "Child"),
                TreeNode::parent("c", "Folder", [TreeNode::leaf("d", "Deep")]),
            ],
        )])
    }

    #[test]
    fn test_rename_rebuilds_only_the_path() {
        let forest = sample();
        let renamed = rename_node(&forest, "b", "Renamed");

        assert_eq!(find_node(&renamed, "b").unwrap().name, "Renamed");
        assert_eq!(find_node(&forest, "b").unwrap().name, "Child");

        // The untouched "Folder" branch is shared with the input
        let before = forest[0].children()[1].children.as_ref().unwrap();
        let after = renamed[0].children()[1].children.as_ref().unwrap();
        assert!(before.ptr_eq(after));
    }

    #[test]
    fn test_rename_clamps_long_names() {
        let renamed = rename_node(&sample(), "d", &"é".repeat(150));
        assert_eq!(find_node(&renamed, "d").unwrap().name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_set_icon_touches_one_node() {
        let updated = set_node_icon(&sample(), "c", "folder-open", true);

        let folder = find_node(&updated, "c").unwrap();
        assert_eq!(folder.icon.as_deref(), Some("folder-open"));
        assert_eq!(folder.is_user_icon, Some(true));
        assert_eq!(find_node(&updated, "a").unwrap().icon, None);
        assert_eq!(find_node(&updated, "d").unwrap().icon, None);
    }

    #[test]
    fn test_add_sibling_inserts_after_target() {
        let mut ids = SequentialIds::new("n");
        let forest = add_sibling_node(&sample(), "b", "Leaf", true, &mut ids);
        let forest = add_sibling_node(&forest, "b", "Folder-ish", false, &mut ids);

        let names: Vec<_> = forest[0].children().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["Child", "Folder-ish", "Leaf", "Folder"]);
        assert_eq!(forest[0].children()[1].children, Some(Forest::empty()));
        assert_eq!(forest[0].children()[2].children, None);
    }

    #[test]
    fn test_add_sibling_at_root_level() {
        let forest = add_sibling_node(&sample(), "a", "Second", true, &mut SequentialIds::new("n"));
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].name, "Second");
    }

    #[test]
    fn test_fresh_ids_avoid_existing_ones() {
        let mut ids = SequentialIds::new("");
        let forest = Forest::new(vec![TreeNode::leaf("1", "One"), TreeNode::leaf("2", "Two")]);

        let forest = add_child_node(&forest, "1", "Child", &mut ids);
        assert_eq!(forest[0].children()[0].id, "3");
        assert_eq!(collect_ids(&forest).len(), node_count(&forest));
    }

    #[test]
    fn test_add_child_creates_children_field() {
        let forest = add_child_node(&sample(), "d", "Deeper", &mut SequentialIds::new("n"));
        let deep = find_node(&forest, "d").unwrap();
        assert_eq!(deep.children().len(), 1);
        assert_eq!(deep.children()[0].name, "Deeper");
        assert!(deep.children()[0].children.is_none());
    }

    #[test]
    fn test_duplicate_assigns_fresh_ids_throughout() {
        let forest = duplicate_node(&sample(), "c", &mut SequentialIds::new("copy-"));
        let root_children = forest[0].children();

        assert_eq!(root_children.len(), 3);
        let copy = &root_children[2];
        assert_eq!(copy.name, "Folder");
        assert_eq!(copy.id, "copy-1");
        assert_eq!(copy.children()[0].id, "copy-2");
        assert_eq!(copy.children()[0].name, "Deep");
        assert_eq!(collect_ids(&forest).len(), 6);
    }

    #[test]
    fn test_delete_removes_subtree() {
        let forest = delete_node(&sample(), "c");
        assert_eq!(node_count(&forest), 2);
        assert!(find_node(&forest, "d").is_none());

        let emptied = delete_node(&forest, "b");
        assert_eq!(emptied[0].children, Some(Forest::empty()));
        assert!(emptied[0].is_leaf());
    }

    #[test]
    fn test_missing_id_returns_same_forest() {
        let forest = sample();
        let mut ids = SequentialIds::default();

        assert!(rename_node(&forest, "zz", "x").ptr_eq(&forest));
        assert!(set_node_icon(&forest, "zz", "x", false).ptr_eq(&forest));
        assert!(add_sibling_node(&forest, "zz", "x", true, &mut ids).ptr_eq(&forest));
        assert!(add_child_node(&forest, "zz", "x", &mut ids).ptr_eq(&forest));
        assert!(duplicate_node(&forest, "zz", &mut ids).ptr_eq(&forest));
        assert!(delete_node(&forest, "zz").ptr_eq(&forest));
        assert!(set_expanded(&forest, "zz", true).ptr_eq(&forest));
    }

    #[test]
    fn test_expansion_flags() {
        let forest = set_expanded(&sample(), "c", true);
        assert!(find_node(&forest, "c").unwrap().is_expanded());

        let collapsed = set_all_expanded(&forest, false);
        assert_eq!(find_node(&collapsed, "a").unwrap().expanded, Some(false));
        assert_eq!(find_node(&collapsed, "c").unwrap().expanded, Some(false));
        assert_eq!(find_node(&collapsed, "b").unwrap().expanded, None);
    }

    #[test]
    fn test_forest_wide_rewrites_without_effect_keep_handle() {
        let expanded = set_all_expanded(&sample(), true);
        assert!(set_all_expanded(&expanded, true).ptr_eq(&expanded));

        let iconed = propagate_icon_to_descendants(&sample(), "dot", false);
        assert!(propagate_icon_to_descendants(&iconed, "dot", false).ptr_eq(&iconed));
        assert!(propagate_icon_to_ancestors(&iconed, "dot", false).ptr_eq(&iconed));
        assert!(!propagate_icon_to_descendants(&iconed, "dot", true).ptr_eq(&iconed));

        let empty = Forest::empty();
        assert!(propagate_icon_to_ancestors(&empty, "dot", false).ptr_eq(&empty));
    }

    #[test]
    fn test_partial_rewrite_shares_untouched_levels() {
        // Only "a" and "c" are parents; "c"'s children level holds a leaf only
        let forest = sample();
        let updated = propagate_icon_to_ancestors(&forest, "folder", false);

        let before = forest[0].children()[1].children.as_ref().unwrap();
        let after = updated[0].children()[1].children.as_ref().unwrap();
        assert!(before.ptr_eq(after));
        assert_eq!(find_node(&updated, "c").unwrap().icon.as_deref(), Some("folder"));
    }
}
