//! Core node types for the tree abstraction

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Longest name a node may carry, counted in characters
pub const MAX_NAME_LEN: usize = 100;

/// Stable identifier for a node within a forest
///
/// Assigned once when the node is created and never reassigned. All lookups,
/// selection, and equality checks go through this key.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new NodeId from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Structural classification of a node
///
/// Derived from the presence of descendants, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// No children, or an empty children sequence
    #[display(fmt = "Leaf")]
    Leaf,
    /// At least one child
    #[display(fmt = "Parent")]
    Parent,
}

impl NodeKind {
    /// Returns true if this is a leaf node
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }

    /// Returns true if this is a parent (folder) node
    pub const fn is_parent(self) -> bool {
        matches!(self, NodeKind::Parent)
    }
}

/// A single node in the forest
///
/// Nodes own their children outright. Children are held behind an [`Forest`]
/// handle so untouched branches can be shared between successive versions of
/// a forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: NodeId,
    /// User-editable display label
    pub name: String,
    /// UI-only expansion state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    /// Glyph key, either a built-in icon name or a user-uploaded icon reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Distinguishes user-uploaded icons from built-in ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_user_icon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Forest>,
}

impl TreeNode {
    /// Create a node without a children field
    pub fn leaf(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            expanded: None,
            icon: None,
            is_user_icon: None,
            children: None,
        }
    }

    /// Create a node with the given children
    pub fn parent(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        children: impl IntoIterator<Item = TreeNode>,
    ) -> Self {
        Self::leaf(id, name).with_children(children.into_iter().collect())
    }

    /// Replace the children field
    pub fn with_children(mut self, children: Forest) -> Self {
        self.children = Some(children);
        self
    }

    /// Set the icon fields
    pub fn with_icon(mut self, icon: impl Into<String>, is_user_icon: bool) -> Self {
        self.icon = Some(icon.into());
        self.is_user_icon = Some(is_user_icon);
        self
    }

    /// Set the expansion flag
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    /// Classify this node as leaf or parent
    pub fn kind(&self) -> NodeKind {
        if self.children().is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Parent
        }
    }

    /// Returns true if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.kind().is_leaf()
    }

    /// Returns true if this is a parent node
    pub fn is_parent(&self) -> bool {
        self.kind().is_parent()
    }

    /// Children of this node, empty for leaves
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true when the node is flagged as expanded
    pub fn is_expanded(&self) -> bool {
        self.expanded == Some(true)
    }

    /// Borrow the node as a leaf or parent view
    pub fn view(&self) -> NodeView<'_> {
        match (&self.children, self.kind()) {
            (Some(children), NodeKind::Parent) => NodeView::Parent {
                node: self,
                children,
            },
            _ => NodeView::Leaf(self),
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A node seen through its classification
///
/// Selected once via [`TreeNode::view`] so callers branch on a sum type rather
/// than probing for a children field.
#[derive(Debug, Clone, Copy)]
pub enum NodeView<'a> {
    Leaf(&'a TreeNode),
    Parent {
        node: &'a TreeNode,
        children: &'a Forest,
    },
}

impl<'a> NodeView<'a> {
    /// The node behind the view
    pub fn node(&self) -> &'a TreeNode {
        match self {
            NodeView::Leaf(node) => node,
            NodeView::Parent { node, .. } => node,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeView::Leaf(_) => NodeKind::Leaf,
            NodeView::Parent { .. } => NodeKind::Parent,
        }
    }
}

/// An ordered sequence of root-level nodes
///
/// Cloning is cheap: the sequence lives behind an [`Arc`]. Mutation
/// operations rebuild only the sequences along the path to the edit and
/// share every other branch with the previous version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest(Arc<Vec<TreeNode>>);

impl Forest {
    /// Create a forest from root nodes
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Forest(Arc::new(roots))
    }

    /// An empty forest
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if both handles point at the same sequence
    pub fn ptr_eq(&self, other: &Forest) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The root nodes as a slice
    pub fn as_slice(&self) -> &[TreeNode] {
        self.0.as_slice()
    }
}

impl Deref for Forest {
    type Target = [TreeNode];

    fn deref(&self) -> &[TreeNode] {
        self.0.as_slice()
    }
}

impl From<Vec<TreeNode>> for Forest {
    fn from(roots: Vec<TreeNode>) -> Self {
        Forest::new(roots)
    }
}

impl FromIterator<TreeNode> for Forest {
    fn from_iter<I: IntoIterator<Item = TreeNode>>(iter: I) -> Self {
        Forest::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a TreeNode;
    type IntoIter = std::slice::Iter<'a, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
