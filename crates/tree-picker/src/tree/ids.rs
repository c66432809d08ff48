//! Identifier sources for freshly created nodes

use crate::tree::NodeId;
use std::collections::HashSet;
use uuid::Uuid;

/// A source of candidate node identifiers
///
/// Generators need not know which ids are already taken; [`fresh_id`] skips
/// any candidate that collides with the forest.
pub trait IdGenerator {
    /// Produce the next candidate identifier
    fn next_id(&mut self) -> NodeId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &mut G {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> NodeId {
        (**self).next_id()
    }
}

/// Random version 4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> NodeId {
        NodeId::new(Uuid::new_v4().to_string())
    }
}

/// Deterministic `<prefix><n>` identifiers, counting up from 1
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("node-")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Draw ids from `ids` until one is not in `taken`, then reserve it
pub fn fresh_id<G: IdGenerator + ?Sized>(ids: &mut G, taken: &mut HashSet<NodeId>) -> NodeId {
    loop {
        let candidate = ids.next_id();
        if !taken.contains(&candidate) {
            taken.insert(candidate.clone());
            return candidate;
        }
        log::trace!("id {} already taken, drawing another", candidate);
    }
}
