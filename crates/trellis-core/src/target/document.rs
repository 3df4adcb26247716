//! Target documents: drawings with one page and libraries of items.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::Rect,
    target::{arena::ItemArena, item::ItemHandle, style::Fill},
};

/// The page of a target drawing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    bounds: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    background: Option<Fill>,
    items: Vec<ItemHandle>,
}

impl Page {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            background: None,
            items: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn background(&self) -> Option<&Fill> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: Option<Fill>) {
        self.background = background;
    }

    /// Top-level items in paint order
    pub fn items(&self) -> &[ItemHandle] {
        &self.items
    }

    pub fn add(&mut self, item: ItemHandle) {
        self.items.push(item);
    }
}

/// A converted drawing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingDocument {
    items: ItemArena,
    page: Page,
}

impl DrawingDocument {
    pub fn new(page: Page) -> Self {
        Self::from_parts(ItemArena::new(), page)
    }

    /// A drawing whose page refers to items of `items`.
    pub fn from_parts(items: ItemArena, page: Page) -> Self {
        Self { items, page }
    }

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemArena {
        &mut self.items
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

/// One entry of a target library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryItem {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<Vec<u8>>,
    items: Vec<ItemHandle>,
}

impl LibraryItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
            items: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn items(&self) -> &[ItemHandle] {
        &self.items
    }

    pub fn add(&mut self, item: ItemHandle) {
        self.items.push(item);
    }
}

/// A converted library. All entries share one item arena.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryDocument {
    items: ItemArena,
    entries: Vec<LibraryItem>,
}

impl LibraryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library whose entries refer to items of `items`.
    pub fn from_parts(items: ItemArena, entries: Vec<LibraryItem>) -> Self {
        Self { items, entries }
    }

    pub fn items(&self) -> &ItemArena {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemArena {
        &mut self.items
    }

    pub fn entries(&self) -> &[LibraryItem] {
        &self.entries
    }

    pub fn add_entry(&mut self, entry: LibraryItem) {
        self.entries.push(entry);
    }
}

/// Either kind of target document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document", rename_all = "snake_case")]
pub enum TargetDocument {
    Drawing(DrawingDocument),
    Library(LibraryDocument),
}

impl TargetDocument {
    pub fn items(&self) -> &ItemArena {
        match self {
            Self::Drawing(drawing) => drawing.items(),
            Self::Library(library) => library.items(),
        }
    }
}

impl From<DrawingDocument> for TargetDocument {
    fn from(drawing: DrawingDocument) -> Self {
        Self::Drawing(drawing)
    }
}

impl From<LibraryDocument> for TargetDocument {
    fn from(library: LibraryDocument) -> Self {
        Self::Library(library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::item::TargetItem;

    #[test]
    fn test_document_tag() {
        let mut drawing = DrawingDocument::new(Page::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
        let handle = drawing.items_mut().insert(TargetItem::group());
        drawing.page_mut().add(handle);

        let doc = TargetDocument::from(drawing);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["document"], "drawing");
        assert_eq!(json["page"]["items"][0], 0);

        let back: TargetDocument = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_library_entries_share_arena() {
        let mut library = LibraryDocument::new();
        let mut first = LibraryItem::new("Box").with_image(vec![1, 2, 3]);
        first.add(library.items_mut().insert(TargetItem::group()));
        let mut second = LibraryItem::new("Arrow");
        second.add(library.items_mut().insert(TargetItem::group()));
        library.add_entry(first);
        library.add_entry(second);

        assert_eq!(library.items().len(), 2);
        assert_eq!(library.entries()[0].image(), Some(&[1, 2, 3][..]));
        assert_eq!(library.entries()[1].items()[0].index(), 1);
    }
}
