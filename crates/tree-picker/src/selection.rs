//! Selected node ids, kept apart from the forest itself

use crate::tree::query::collect_ids;
use crate::tree::{Forest, NodeId};
use std::collections::BTreeSet;
use std::fmt;

/// Callback receiving the selection after every change
pub type SelectionListener = Box<dyn FnMut(&BTreeSet<NodeId>)>;

/// A set of selected node ids
///
/// Single- or multi-select is chosen per toggle, matching how a click versus a
/// modifier-click behaves in the picker.
#[derive(Default)]
pub struct Selection {
    selected: BTreeSet<NodeId>,
    listener: Option<SelectionListener>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback notified after each change, replacing any previous one
    pub fn on_change(&mut self, listener: impl FnMut(&BTreeSet<NodeId>) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Toggle one id
    ///
    /// A selected id is removed. Otherwise, in single-select mode the set is
    /// cleared first, then the id is added.
    pub fn toggle(&mut self, id: impl Into<NodeId>, multiple: bool) -> &BTreeSet<NodeId> {
        let id = id.into();
        if !self.selected.remove(&id) {
            if !multiple {
                self.selected.clear();
            }
            self.selected.insert(id);
        }
        self.notify();
        &self.selected
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify();
        }
    }

    /// Drop ids that no longer exist in `forest`, returning how many were dropped
    pub fn retain_live(&mut self, forest: &Forest) -> usize {
        if self.selected.is_empty() {
            return 0;
        }
        let live = collect_ids(forest);
        let before = self.selected.len();
        self.selected.retain(|id| live.contains(id));
        let dropped = before - self.selected.len();
        if dropped > 0 {
            log::debug!("dropped {} stale selection id(s)", dropped);
            self.notify();
        }
        dropped
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn ids(&self) -> &BTreeSet<NodeId> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.selected);
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("selected", &self.selected)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
