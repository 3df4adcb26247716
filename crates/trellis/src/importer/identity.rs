//! Source node to target item lookup.

use std::collections::HashMap;

use trellis_core::{identifier::NodeId, target::ItemHandle};

use crate::error::TrellisError;

/// Maps each materialized source node to the item created for it.
///
/// Nodes the converter dropped have no entry, so lookups of them resolve to
/// nothing instead of failing.
#[derive(Debug, Default)]
pub struct IdentityMap {
    items: HashMap<NodeId, ItemHandle>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the item created for `node`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::DuplicateNode`] if `node` was already recorded.
    pub fn insert(&mut self, node: NodeId, item: ItemHandle) -> Result<(), TrellisError> {
        if self.items.contains_key(&node) {
            return Err(TrellisError::DuplicateNode(node));
        }
        self.items.insert(node, item);
        Ok(())
    }

    pub fn get(&self, node: NodeId) -> Option<ItemHandle> {
        self.items.get(&node).copied()
    }
}
