//! Storage for the items of a target document.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    geometry::Matrix,
    target::item::{ItemHandle, ItemKind, TargetItem},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("item {0:?} is not a group")]
    NotAGroup(ItemHandle),

    #[error("item {0:?} does not exist")]
    InvalidHandle(ItemHandle),

    #[error("item {child:?} already belongs to group {parent:?}")]
    AlreadyAttached {
        child: ItemHandle,
        parent: ItemHandle,
    },
}

/// Owns every item of a document. Groups and containers refer to items by
/// [`ItemHandle`]; parents are recorded on the children.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemArena {
    items: Vec<TargetItem>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an item without a parent.
    pub fn insert(&mut self, item: TargetItem) -> ItemHandle {
        let handle = ItemHandle(self.items.len());
        self.items.push(item);
        handle
    }

    /// Appends `child` to the children of the group `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either handle is unknown, `parent` is not a group, or `child`
    /// already has a parent.
    pub fn attach(&mut self, parent: ItemHandle, child: ItemHandle) -> Result<(), ArenaError> {
        let child_item = self
            .items
            .get(child.0)
            .ok_or(ArenaError::InvalidHandle(child))?;
        if let Some(existing) = child_item.parent() {
            return Err(ArenaError::AlreadyAttached {
                child,
                parent: existing,
            });
        }

        let parent_item = self
            .items
            .get_mut(parent.0)
            .ok_or(ArenaError::InvalidHandle(parent))?;
        match parent_item.kind_mut() {
            ItemKind::Group { children, .. } => children.push(child),
            _ => return Err(ArenaError::NotAGroup(parent)),
        }

        self.items[child.0].set_parent(parent);
        Ok(())
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&TargetItem> {
        self.items.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ItemHandle) -> Option<&mut TargetItem> {
        self.items.get_mut(handle.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemHandle, &TargetItem)> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| (ItemHandle(index), item))
    }

    /// Transform from the item's local coordinates into page coordinates: its
    /// local transform followed by those of its ancestors.
    pub fn page_transform(&self, handle: ItemHandle) -> Matrix {
        let mut transform = Matrix::identity();
        let mut current = self.get(handle);
        while let Some(item) = current {
            transform = transform.then(item.shape().local_transform());
            current = item.parent().and_then(|parent| self.get(parent));
        }
        transform
    }
}

impl Index<ItemHandle> for ItemArena {
    type Output = TargetItem;

    fn index(&self, handle: ItemHandle) -> &Self::Output {
        &self.items[handle.0]
    }
}

impl IndexMut<ItemHandle> for ItemArena {
    fn index_mut(&mut self, handle: ItemHandle) -> &mut Self::Output {
        &mut self.items[handle.0]
    }
}
