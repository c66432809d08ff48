#![allow(dead_code)]

use tree_picker::tree::{Forest, TreeNode};

/// A node with its id stripped, for comparing forests across fresh ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub name: String,
    pub icon: Option<String>,
    pub children: Option<Vec<Shape>>,
}

pub fn shape(forest: &[TreeNode]) -> Vec<Shape> {
    forest
        .iter()
        .map(|node| Shape {
            name: node.name.clone(),
            icon: node.icon.clone(),
            children: node.children.as_ref().map(|c| shape(c)),
        })
        .collect()
}

/// `[{a Root [{b Child}]}]`
pub fn root_and_child() -> Forest {
    Forest::new(vec![TreeNode::parent(
        "a",
        "Root",
        [TreeNode::leaf("b", "Child")],
    )])
}

/// Three levels with mixed sibling positions
///
/// ```text
/// r1
///   m1
///   m2
///     deep
/// r2
///   x1
///     w
///   x2
///     y
///       z
/// ```
pub fn mixed_levels() -> Forest {
    Forest::new(vec![
        TreeNode::parent(
            "r1",
            "First root",
            [
                TreeNode::leaf("m1", "Middle one"),
                TreeNode::parent("m2", "Middle two", [TreeNode::leaf("deep", "Deep")]),
            ],
        ),
        TreeNode::parent(
            "r2",
            "Second root",
            [
                TreeNode::parent("x1", "Branch one", [TreeNode::leaf("w", "Leaf w")]),
                TreeNode::parent(
                    "x2",
                    "Branch two",
                    [TreeNode::parent("y", "Inner", [TreeNode::leaf("z", "Leaf z")])],
                ),
            ],
        ),
    ])
}
