//! Task id interning.
//!
//! Maps string task ids to dense integer node indices so the graph and the
//! passes can use plain `Vec` storage instead of string-keyed maps.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Dense node index (position of the owning task in the input slice).
pub type NodeId = u32;

/// Interner from task id strings to the node that owns them.
///
/// Node ids follow input order. When an id is repeated, the first task
/// carrying it keeps ownership and later lookups resolve to it.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner<'a> {
    to_node: FxHashMap<&'a str, NodeId>,
    ids: Vec<&'a str>,
}

impl<'a> TaskIdInterner<'a> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_node: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Register the next node under `id`.
    ///
    /// Returns the new node id and whether it owns `id` (false for a duplicate).
    pub fn push(&mut self, id: &'a str) -> (NodeId, bool) {
        let node = self.ids.len() as NodeId;
        self.ids.push(id);
        let owns = match self.to_node.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        };
        (node, owns)
    }

    /// Node owning `id`, if any task carries it.
    #[inline]
    pub fn get(&self, id: &str) -> Option<NodeId> {
        self.to_node.get(id).copied()
    }

    /// Task id of a node.
    #[inline]
    pub fn resolve(&self, node: NodeId) -> Option<&'a str> {
        self.ids.get(node as usize).copied()
    }

    /// Number of registered nodes (duplicates included).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
