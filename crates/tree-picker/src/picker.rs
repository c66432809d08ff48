//! Editing session binding the forest, selection, and search together
//!
//! The presentation layer owns one [`TreePicker`] and feeds it [`Command`]s
//! from UI events. Each mutation swaps in a new forest value; the selection is
//! reconciled afterwards according to the configured policy.

use crate::config::{PickerConfig, RenamePolicy, SelectionPolicy};
use crate::selection::Selection;
use crate::tree::mutation::{
    add_child_node, add_sibling_node, delete_node, duplicate_node,
    propagate_icon_to_ancestors, propagate_icon_to_descendants, rename_node, set_all_expanded,
    set_expanded, set_node_icon,
};
use crate::tree::query::{contains, filter_by_search};
use crate::tree::{Forest, IdGenerator, NodeId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user action against the current forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command {
    Rename {
        id: NodeId,
        name: String,
    },
    SetIcon {
        id: NodeId,
        icon: String,
        #[serde(default)]
        user_icon: bool,
    },
    /// "Apply to all children": every node in the forest
    IconToChildren {
        icon: String,
        #[serde(default)]
        user_icon: bool,
    },
    /// "Apply to all parents": every parent node in the forest
    IconToParents {
        icon: String,
        #[serde(default)]
        user_icon: bool,
    },
    AddSibling {
        id: NodeId,
        name: String,
        #[serde(default)]
        leaf: bool,
    },
    AddChild {
        id: NodeId,
        name: String,
    },
    Duplicate {
        id: NodeId,
    },
    Delete {
        id: NodeId,
    },
    SetExpanded {
        id: NodeId,
        expanded: bool,
    },
    ExpandAll,
    CollapseAll,
    Search {
        query: String,
    },
    Toggle {
        id: NodeId,
        /// Falls back to the configured `multi-select` default
        #[serde(default)]
        multiple: Option<bool>,
    },
    ClearSelection,
}

/// One editing session over a forest
pub struct TreePicker {
    forest: Forest,
    selection: Selection,
    ids: Box<dyn IdGenerator>,
    config: PickerConfig,
    query: String,
}

impl TreePicker {
    pub fn new(forest: Forest, config: PickerConfig) -> Self {
        Self {
            forest,
            selection: Selection::new(),
            ids: config.id_generator(),
            config,
            query: String::new(),
        }
    }

    /// Replace the id source chosen by the configuration
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// The full, unfiltered forest
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The forest as currently shown: filtered by the active search
    pub fn view(&self) -> Forest {
        filter_by_search(&self.forest, &self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Register the callback notified whenever the selection changes
    pub fn on_selection_change(&mut self, listener: impl FnMut(&BTreeSet<NodeId>) + 'static) {
        self.selection.on_change(listener);
    }

    /// Swap in freshly loaded data
    pub fn replace_forest(&mut self, forest: Forest) {
        self.forest = forest;
        self.reconcile_selection();
    }

    /// Apply one command, returning whether any state changed
    pub fn apply(&mut self, command: Command) -> bool {
        debug!("applying {:?}", command);
        match command {
            Command::Rename { id, name } => match self.fit_name(&name) {
                Some(name) => self.mutate(|forest, _| rename_node(forest, id.as_str(), &name)),
                None => false,
            },
            Command::SetIcon {
                id,
                icon,
                user_icon,
            } => self.mutate(|forest, _| set_node_icon(forest, id.as_str(), &icon, user_icon)),
            Command::IconToChildren { icon, user_icon } => {
                self.mutate(|forest, _| propagate_icon_to_descendants(forest, &icon, user_icon))
            }
            Command::IconToParents { icon, user_icon } => {
                self.mutate(|forest, _| propagate_icon_to_ancestors(forest, &icon, user_icon))
            }
            Command::AddSibling { id, name, leaf } => match self.fit_name(&name) {
                Some(name) => self.mutate(|forest, ids| {
                    add_sibling_node(forest, id.as_str(), &name, leaf, ids)
                }),
                None => false,
            },
            Command::AddChild { id, name } => match self.fit_name(&name) {
                Some(name) => {
                    self.mutate(|forest, ids| add_child_node(forest, id.as_str(), &name, ids))
                }
                None => false,
            },
            Command::Duplicate { id } => {
                self.mutate(|forest, ids| duplicate_node(forest, id.as_str(), ids))
            }
            Command::Delete { id } => self.mutate(|forest, _| delete_node(forest, id.as_str())),
            Command::SetExpanded { id, expanded } => {
                self.mutate(|forest, _| set_expanded(forest, id.as_str(), expanded))
            }
            Command::ExpandAll => self.mutate(|forest, _| set_all_expanded(forest, true)),
            Command::CollapseAll => self.mutate(|forest, _| set_all_expanded(forest, false)),
            Command::Search { query } => {
                let changed = self.query != query;
                self.query = query;
                changed
            }
            Command::Toggle { id, multiple } => {
                let selecting = !self.selection.is_selected(id.as_str());
                if selecting
                    && self.config.selection_policy == SelectionPolicy::Reconcile
                    && !contains(&self.forest, id.as_str())
                {
                    debug!("ignoring selection of unknown node {}", id);
                    return false;
                }
                let multiple = multiple.unwrap_or(self.config.multi_select);
                self.selection.toggle(id, multiple);
                true
            }
            Command::ClearSelection => {
                let changed = !self.selection.is_empty();
                self.selection.clear();
                changed
            }
        }
    }

    /// Apply commands in order, returning how many changed state
    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = Command>) -> usize {
        commands
            .into_iter()
            .map(|command| self.apply(command))
            .filter(|&changed| changed)
            .count()
    }

    fn mutate<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&Forest, &mut dyn IdGenerator) -> Forest,
    {
        let next = op(&self.forest, &mut *self.ids);
        if next.ptr_eq(&self.forest) {
            return false;
        }
        self.forest = next;
        self.reconcile_selection();
        true
    }

    fn reconcile_selection(&mut self) {
        if self.config.selection_policy == SelectionPolicy::Reconcile {
            self.selection.retain_live(&self.forest);
        }
    }

    /// Apply the configured length limit to a user-entered name
    fn fit_name(&self, name: &str) -> Option<String> {
        let len = name.chars().count();
        if len <= self.config.max_name_len {
            return Some(name.to_string());
        }
        match self.config.rename_policy {
            RenamePolicy::Clamp => Some(name.chars().take(self.config.max_name_len).collect()),
            RenamePolicy::Reject => {
                warn!(
                    "rejecting name of {} characters (limit {})",
                    len, self.config.max_name_len
                );
                None
            }
        }
    }
}
