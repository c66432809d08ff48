//! Plain-text outline of a forest with connector lines

use crate::selection::Selection;
use crate::tree::query::visible_rows;
use crate::tree::{Expansion, Forest, NodeView, TreeNode};

/// Render the forest as an indented outline
///
/// Parents get a trailing `/`, icons are shown in brackets (user icons as
/// `user:<key>`), and selected nodes are marked with `*`.
pub fn render_outline(forest: &Forest, expansion: Expansion, selection: Option<&Selection>) -> String {
    let mut out = String::new();

    for row in visible_rows(forest, expansion) {
        for &ancestor_is_last in &row.ancestor_chain {
            out.push_str(if ancestor_is_last { "    " } else { "│   " });
        }
        out.push_str(if row.is_last { "└── " } else { "├── " });
        out.push_str(&label(row.node));

        if selection.is_some_and(|s| s.is_selected(row.node.id.as_str())) {
            out.push_str(" *");
        }
        out.push('\n');
    }

    out
}

fn label(node: &TreeNode) -> String {
    let name = match node.view() {
        NodeView::Parent { node, .. } => format!("{}/", node.name),
        NodeView::Leaf(node) => node.name.clone(),
    };
    match (&node.icon, node.is_user_icon) {
        (Some(icon), Some(true)) => format!("{} [user:{}]", name, icon),
        (Some(icon), _) => format!("{} [{}]", name, icon),
        (None, _) => name,
    }
}
