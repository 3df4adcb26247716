//! Source documents: drawings made of layers and libraries made of masters.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::Rect,
    source::{node::SourceNode, style::FillStyle, style::StyleSheet},
};

fn default_resolution() -> f64 {
    96.0
}

fn default_visible() -> bool {
    true
}

/// A drawing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    bounds: Rect,
    #[serde(default)]
    background: Option<FillStyle>,
    #[serde(default = "StyleSheet::document_defaults")]
    style: StyleSheet,
    /// Resolution the document measures its lengths against
    #[serde(default = "default_resolution")]
    resolution: f64,
    #[serde(default)]
    layers: Vec<Layer>,
}

impl Drawing {
    /// Creates an empty drawing carrying the default document style sheet.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            background: None,
            style: StyleSheet::document_defaults(),
            resolution: default_resolution(),
            layers: Vec::new(),
        }
    }

    pub fn with_background(mut self, fill: FillStyle) -> Self {
        self.background = Some(fill);
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn background(&self) -> Option<&FillStyle> {
        self.background.as_ref()
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Iterates over every node of every layer, visible or not, depth first.
    pub fn descendants(&self) -> impl Iterator<Item = &SourceNode> {
        self.layers
            .iter()
            .flat_map(|layer| layer.nodes.iter())
            .flat_map(SourceNode::descendants)
    }
}

/// A named layer of top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    name: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    nodes: Vec<SourceNode>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            nodes: Vec::new(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn with_node(mut self, node: SourceNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn nodes(&self) -> &[SourceNode] {
        &self.nodes
    }
}

/// A library document: a list of reusable masters.
///
/// Libraries carry no document style sheet; styles their nodes leave undefined
/// fall back to the defaults of an empty drawing.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    masters: Vec<Master>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_master(mut self, master: Master) -> Self {
        self.masters.push(master);
        self
    }

    pub fn masters(&self) -> &[Master] {
        &self.masters
    }
}

/// A reusable template made of one or more nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Master {
    #[serde(default)]
    name: String,
    /// Encoded icon image bytes
    #[serde(default)]
    icon: Option<Vec<u8>>,
    #[serde(default)]
    nodes: Vec<SourceNode>,
}

impl Master {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            nodes: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: Vec<u8>) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_node(mut self, node: SourceNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> Option<&[u8]> {
        self.icon.as_deref()
    }

    pub fn nodes(&self) -> &[SourceNode] {
        &self.nodes
    }

    /// Iterates over every node of the master, depth first.
    pub fn descendants(&self) -> impl Iterator<Item = &SourceNode> {
        self.nodes.iter().flat_map(SourceNode::descendants)
    }
}

/// Either kind of source document, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document", rename_all = "snake_case")]
pub enum SourceDocument {
    Drawing(Drawing),
    Library(Library),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        identifier::NodeId,
        source::node::{Model, ShapeDimension, SourceNodeKind},
    };

    #[test]
    fn test_drawing_defaults_from_json() {
        let json = r#"{"document": "drawing", "layers": [{"name": "base"}]}"#;
        let doc: SourceDocument = serde_json::from_str(json).unwrap();

        let SourceDocument::Drawing(drawing) = doc else {
            panic!("expected a drawing");
        };
        assert_eq!(drawing.resolution(), 96.0);
        assert_eq!(drawing.style(), &StyleSheet::document_defaults());
        assert!(drawing.layers()[0].is_visible());
        assert!(drawing.layers()[0].nodes().is_empty());
    }

    #[test]
    fn test_library_from_json() {
        let json = r#"{"document": "library", "masters": [{"name": "Rectangle", "icon": [1, 2, 3]}]}"#;
        let doc: SourceDocument = serde_json::from_str(json).unwrap();

        let SourceDocument::Library(library) = doc else {
            panic!("expected a library");
        };
        assert_eq!(library.masters()[0].name(), "Rectangle");
        assert_eq!(library.masters()[0].icon(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_drawing_descendants_include_hidden_layers() {
        let shape = |name: &str| {
            SourceNode::new(
                NodeId::random(),
                SourceNodeKind::Model(Model::shape(ShapeDimension::TwoD)),
            )
            .with_name(name)
        };
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_layer(Layer::new("visible").with_node(shape("a")))
            .with_layer(Layer::new("hidden").hidden().with_node(shape("b")));

        let names: Vec<&str> = drawing.descendants().map(SourceNode::name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
