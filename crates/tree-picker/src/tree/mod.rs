//! Core forest model for the tree picker
//!
//! This module provides the node types, an arena index for navigation, and
//! the query and mutation engines layered on top of them.

mod error;
pub mod ids;
mod index;
pub mod mutation;
mod node;
pub mod query;
pub mod schema;
mod traits;

pub use error::{IssueKind, ValidationError, ValidationIssue};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use index::{ForestIndex, Slot};
pub use node::{Forest, NodeId, NodeKind, NodeView, TreeNode, MAX_NAME_LEN};
pub use query::{AncestorChain, Expansion, VisibleRow};
pub use schema::NodeDraft;
pub use traits::{Tree, TreeTraversal, TreeWalker};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::mutation::{
        add_child_node, add_sibling_node, delete_node, duplicate_node,
        propagate_icon_to_ancestors, propagate_icon_to_descendants, rename_node, set_node_icon,
    };
    pub use super::query::{ancestor_chain_summary, classify, filter_by_search, visible_rows};
    pub use super::schema::{generate_identifiers, normalize_forest, validate_forest};
    pub use super::{
        Expansion, Forest, ForestIndex, IdGenerator, NodeDraft, NodeId, NodeKind, NodeView,
        SequentialIds, Tree, TreeNode, TreeTraversal, UuidIds, ValidationError,
    };
}
