//! Validation and normalization of externally supplied tree data
//!
//! Raw data arrives as arbitrary JSON. [`validate_forest`] checks it against
//! the node shape and reports every offending field path. [`normalize_forest`]
//! does the same but first assigns ids to nodes that lack one.
//! [`generate_identifiers`] builds a forest from human-authored drafts.

use crate::tree::ids::{fresh_id, IdGenerator};
use crate::tree::{
    Forest, IssueKind, NodeId, TreeNode, ValidationError, ValidationIssue, MAX_NAME_LEN,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A node as written by hand, before it has an identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_user_icon: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeDraft>>,
}

impl NodeDraft {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expanded: None,
            icon: None,
            is_user_icon: None,
            children: None,
        }
    }

    pub fn parent(name: impl Into<String>, children: impl IntoIterator<Item = NodeDraft>) -> Self {
        Self {
            children: Some(children.into_iter().collect()),
            ..Self::leaf(name)
        }
    }
}

/// Assign fresh ids to every draft, depth-first in pre-order
///
/// Parents receive their id before their children; siblings follow declared
/// order. Structure and optional fields are carried over unchanged.
pub fn generate_identifiers<G: IdGenerator + ?Sized>(drafts: &[NodeDraft], ids: &mut G) -> Forest {
    let mut taken = HashSet::new();
    assign_level(drafts, ids, &mut taken)
}

fn assign_level<G: IdGenerator + ?Sized>(
    drafts: &[NodeDraft],
    ids: &mut G,
    taken: &mut HashSet<NodeId>,
) -> Forest {
    drafts
        .iter()
        .map(|draft| {
            let id = fresh_id(ids, taken);
            TreeNode {
                id,
                name: draft.name.clone(),
                expanded: draft.expanded,
                icon: draft.icon.clone(),
                is_user_icon: draft.is_user_icon,
                children: draft
                    .children
                    .as_deref()
                    .map(|children| assign_level(children, ids, taken)),
            }
        })
        .collect()
}

/// The forest shown when no data has been loaded yet: one empty root folder
pub fn placeholder_forest<G: IdGenerator + ?Sized>(ids: &mut G) -> Forest {
    generate_identifiers(&[NodeDraft::parent("Root", [])], ids)
}

/// Validate raw JSON as a forest
///
/// Every node must carry a non-empty string `id` and a name of 1 to
/// [`MAX_NAME_LEN`] characters. Optional fields must have the right type when
/// present (`null` counts as absent). Ids must be unique across the forest.
pub fn validate_forest(raw: &Value) -> Result<Forest, ValidationError> {
    Validator::new(MissingIds::Reject).run(raw)
}

/// Validate raw JSON as a forest, assigning ids to nodes that lack one
///
/// Assigned ids never collide with ids already present in the input.
pub fn normalize_forest<G: IdGenerator>(raw: &Value, ids: &mut G) -> Result<Forest, ValidationError> {
    let mut taken = HashSet::new();
    collect_raw_ids(raw, &mut taken);
    Validator::new(MissingIds::Assign { ids, taken }).run(raw)
}

fn collect_raw_ids(raw: &Value, taken: &mut HashSet<NodeId>) {
    let Some(items) = raw.as_array() else {
        return;
    };
    for item in items {
        if let Some(id) = item.get("id").and_then(Value::as_str) {
            taken.insert(NodeId::from(id));
        }
        if let Some(children) = item.get("children") {
            collect_raw_ids(children, taken);
        }
    }
}

/// How the validator treats a node without an `id`
enum MissingIds<'g> {
    Reject,
    Assign {
        ids: &'g mut dyn IdGenerator,
        taken: HashSet<NodeId>,
    },
}

struct Validator<'g> {
    missing_ids: MissingIds<'g>,
    /// Ids claimed so far by the raw walk, in pre-order
    seen: HashSet<NodeId>,
    issues: Vec<ValidationIssue>,
}

impl<'g> Validator<'g> {
    fn new(missing_ids: MissingIds<'g>) -> Self {
        Self {
            missing_ids,
            seen: HashSet::new(),
            issues: Vec::new(),
        }
    }

    fn run(mut self, raw: &Value) -> Result<Forest, ValidationError> {
        let forest = match raw.as_array() {
            Some(items) => self.level(items, ""),
            None => {
                self.report("$", IssueKind::NotAnArray);
                Forest::empty()
            }
        };

        if self.issues.is_empty() {
            debug!("validated forest with {} root(s)", forest.len());
            Ok(forest)
        } else {
            warn!("rejected tree data with {} issue(s)", self.issues.len());
            Err(ValidationError::new(self.issues))
        }
    }

    fn report(&mut self, path: impl Into<String>, kind: IssueKind) {
        self.issues.push(ValidationIssue::new(path, kind));
    }

    /// Validates a sibling sequence, keeping only the nodes that parsed
    fn level(&mut self, items: &[Value], path: &str) -> Forest {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| self.node(item, format!("{}[{}]", path, i)))
            .collect()
    }

    fn node(&mut self, value: &Value, path: String) -> Option<TreeNode> {
        let Some(fields) = value.as_object() else {
            self.report(path, IssueKind::NotAnObject);
            return None;
        };

        // Ids go to parents before children, so resolve it first
        let id = self.id(fields, &path);
        let name = self.name(fields, &path);
        let expanded = self.optional_bool(fields, &path, "expanded");
        let icon = self.optional_string(fields, &path, "icon");
        let is_user_icon = self.optional_bool(fields, &path, "isUserIcon");
        let children = match present(fields, "children") {
            None => None,
            Some(Value::Array(items)) => Some(self.level(items, &format!("{}.children", path))),
            Some(_) => {
                self.report(format!("{}.children", path), IssueKind::NotAnArray);
                None
            }
        };

        Some(TreeNode {
            id: id?,
            name: name?,
            expanded: expanded.ok()?,
            icon: icon.ok()?,
            is_user_icon: is_user_icon.ok()?,
            children,
        })
    }

    fn id(&mut self, fields: &Map<String, Value>, path: &str) -> Option<NodeId> {
        let field = format!("{}.id", path);
        match present(fields, "id") {
            Some(Value::String(id)) if id.is_empty() => {
                self.report(field, IssueKind::Empty);
                None
            }
            Some(Value::String(id)) => {
                let id = NodeId::new(id.as_str());
                if self.seen.insert(id.clone()) {
                    Some(id)
                } else {
                    self.report(field, IssueKind::DuplicateId(id.to_string()));
                    None
                }
            }
            Some(_) => {
                self.report(field, IssueKind::NotAString);
                None
            }
            None => {
                if let MissingIds::Assign { ids, taken } = &mut self.missing_ids {
                    return Some(fresh_id(&mut **ids, taken));
                }
                self.report(field, IssueKind::Missing);
                None
            }
        }
    }

    fn name(&mut self, fields: &Map<String, Value>, path: &str) -> Option<String> {
        let field = format!("{}.name", path);
        match present(fields, "name") {
            Some(Value::String(name)) => {
                let len = name.chars().count();
                if len == 0 {
                    self.report(field, IssueKind::Empty);
                    None
                } else if len > MAX_NAME_LEN {
                    self.report(
                        field,
                        IssueKind::TooLong {
                            len,
                            max: MAX_NAME_LEN,
                        },
                    );
                    None
                } else {
                    Some(name.clone())
                }
            }
            Some(_) => {
                self.report(field, IssueKind::NotAString);
                None
            }
            None => {
                self.report(field, IssueKind::Missing);
                None
            }
        }
    }

    fn optional_bool(
        &mut self,
        fields: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Result<Option<bool>, ()> {
        match present(fields, key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => {
                self.report(format!("{}.{}", path, key), IssueKind::NotABoolean);
                Err(())
            }
        }
    }

    fn optional_string(
        &mut self,
        fields: &Map<String, Value>,
        path: &str,
        key: &str,
    ) -> Result<Option<String>, ()> {
        match present(fields, key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => {
                self.report(format!("{}.{}", path, key), IssueKind::NotAString);
                Err(())
            }
        }
    }
}

/// A field that is present and not `null`
fn present<'v>(fields: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    fields.get(key).filter(|v| !v.is_null())
}
