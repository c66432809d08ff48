//! Tree Picker Library
//!
//! The data model and operations behind a tree-picker widget: a forest of
//! named, optionally iconed nodes with stable string ids, plus the queries and
//! edits a picker needs.
//!
//! # Core Concepts
//!
//! - **Forest**: an immutable, cheaply clonable sequence of root nodes
//! - **Schema**: validation of raw JSON into a forest, and id assignment
//! - **Query**: search filtering, ancestor chains, flattened rows
//! - **Mutation**: pure edits that return a new forest and share untouched branches
//! - **Selection**: selected ids, kept outside the forest
//! - **TreePicker**: a session tying the above to user commands
//!
//! # Example
//!
//! ```
//! use tree_picker::prelude::*;
//! use serde_json::json;
//!
//! let forest = validate_forest(&json!([
//!     { "id": "a", "name": "Root", "children": [{ "id": "b", "name": "Child" }] }
//! ]))
//! .unwrap();
//!
//! let mut ids = SequentialIds::new("n");
//! let forest = add_child_node(&forest, "a", "New Child", &mut ids);
//! assert_eq!(forest[0].children().len(), 2);
//!
//! let found = filter_by_search(&forest, "new");
//! assert_eq!(found[0].children()[0].name, "New Child");
//! ```

pub mod config;
pub mod picker;
pub mod render;
pub mod selection;
pub mod tree;

pub use config::PickerConfig;
pub use picker::{Command, TreePicker};
pub use selection::Selection;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::render::render_outline;
    pub use crate::tree::prelude::*;
    pub use crate::{Command, PickerConfig, Selection, TreePicker};
}
