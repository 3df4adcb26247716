//! Source nodes: groups, composite shapes and model leaves.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Matrix, Point, Rect, Size},
    identifier::NodeId,
    source::style::StyleSheet,
};

/// A node of the source document tree.
///
/// Placement is an arbitrary affine `scene_transform` mapping model space into
/// scene space, together with the node's `model_bounds` and `model_pin` in model
/// space. Everything else is descriptive data the converter reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    id: NodeId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    scene_transform: Matrix,
    #[serde(default)]
    model_bounds: Rect,
    #[serde(default)]
    model_pin: Option<Point>,
    #[serde(default)]
    style: StyleSheet,
    #[serde(default)]
    protection: Protection,
    #[serde(default)]
    ports: Vec<SourcePort>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    link: Option<Link>,
    #[serde(flatten)]
    kind: SourceNodeKind,
}

impl SourceNode {
    /// Creates a node with identity placement and empty bounds.
    pub fn new(id: NodeId, kind: SourceNodeKind) -> Self {
        Self {
            id,
            name: String::new(),
            tag: None,
            scene_transform: Matrix::identity(),
            model_bounds: Rect::default(),
            model_pin: None,
            style: StyleSheet::default(),
            protection: Protection::default(),
            ports: Vec::new(),
            text: None,
            link: None,
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_scene_transform(mut self, transform: Matrix) -> Self {
        self.scene_transform = transform;
        self
    }

    pub fn with_model_bounds(mut self, bounds: Rect) -> Self {
        self.model_bounds = bounds;
        self
    }

    pub fn with_model_pin(mut self, pin: Point) -> Self {
        self.model_pin = Some(pin);
        self
    }

    pub fn with_style(mut self, style: StyleSheet) -> Self {
        self.style = style;
        self
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    pub fn with_port(mut self, port: SourcePort) -> Self {
        self.ports.push(port);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn scene_transform(&self) -> Matrix {
        self.scene_transform
    }

    pub fn model_bounds(&self) -> Rect {
        self.model_bounds
    }

    /// The model-space pin; the center of the model bounds unless set.
    pub fn model_pin(&self) -> Point {
        self.model_pin.unwrap_or_else(|| self.model_bounds.center())
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    pub fn ports(&self) -> &[SourcePort] {
        &self.ports
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn kind(&self) -> &SourceNodeKind {
        &self.kind
    }

    /// The pin in scene coordinates.
    pub fn scene_pin(&self) -> Point {
        self.scene_transform.transform_point(self.model_pin())
    }

    /// Top-left, top-right and bottom-left corners of the model bounds in scene coordinates.
    pub fn scene_basis_points(&self) -> [Point; 3] {
        self.model_bounds
            .basis_points()
            .map(|p| self.scene_transform.transform_point(p))
    }

    /// The node's size measured along its transformed basis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::geometry::{Matrix, Rect};
    /// # use trellis_core::identifier::NodeId;
    /// # use trellis_core::source::{Model, ShapeDimension, SourceNode, SourceNodeKind};
    /// let node = SourceNode::new(NodeId::random(), SourceNodeKind::Model(Model::shape(ShapeDimension::TwoD)))
    ///     .with_model_bounds(Rect::new(0.0, 0.0, 10.0, 4.0))
    ///     .with_scene_transform(Matrix::scaling(2.0, 3.0));
    /// let size = node.scene_size();
    /// assert_eq!((size.width(), size.height()), (20.0, 12.0));
    /// ```
    pub fn scene_size(&self) -> Size {
        let [tl, tr, bl] = self.scene_basis_points();
        Size::new(tl.distance(tr), tl.distance(bl))
    }

    /// Axis-aligned bounds of the node in scene coordinates.
    pub fn scene_bounds(&self) -> Rect {
        let corners = self
            .model_bounds
            .corners()
            .map(|p| self.scene_transform.transform_point(p));
        Rect::from_points(corners).unwrap_or_default()
    }

    /// Top-left corner of [`Self::scene_bounds`].
    pub fn location(&self) -> Point {
        self.scene_bounds().location()
    }

    /// Child nodes of a group or composite shape; empty for leaves.
    pub fn children(&self) -> &[SourceNode] {
        match &self.kind {
            SourceNodeKind::Group { children } => children,
            SourceNodeKind::CompositeShape { primitives } => primitives,
            SourceNodeKind::Model(_) | SourceNodeKind::Foreign { .. } => &[],
        }
    }

    /// Returns the model leaf, if this node is one.
    pub fn model(&self) -> Option<&Model> {
        match &self.kind {
            SourceNodeKind::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Returns `true` for groups and composite shapes.
    pub fn is_container(&self) -> bool {
        matches!(
            self.kind,
            SourceNodeKind::Group { .. } | SourceNodeKind::CompositeShape { .. }
        )
    }

    /// Returns `true` for nodes placed by begin and end points rather than a box.
    pub fn is_one_d(&self) -> bool {
        self.model().is_some_and(Model::is_one_d)
    }

    /// Returns `true` for 1-D shapes whose ends can be glued: lines, connectors and
    /// 1-D shapes, but not 1-D primitives.
    pub fn is_connectable(&self) -> bool {
        self.model().is_some_and(Model::is_connectable)
    }

    /// Returns `true` for the nodes that carry connection ports: groups,
    /// composite shapes and 2-D shapes.
    pub fn is_two_d_shape(&self) -> bool {
        match &self.kind {
            SourceNodeKind::Group { .. } | SourceNodeKind::CompositeShape { .. } => true,
            SourceNodeKind::Model(Model::Shape { dimension, .. }) => {
                *dimension == ShapeDimension::TwoD
            }
            _ => false,
        }
    }

    /// Iterates over this node and all of its descendants, depth first.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Depth-first iterator returned by [`SourceNode::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a SourceNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SourceNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// The variant of a source node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceNodeKind {
    Group {
        #[serde(default)]
        children: Vec<SourceNode>,
    },
    /// A shape assembled from primitive sub-elements
    CompositeShape {
        #[serde(default)]
        primitives: Vec<SourceNode>,
    },
    Model(Model),
    /// A node kind with no target counterpart
    Foreign {
        type_name: String,
    },
}

/// Whether a shape is placed as a box or as a begin/end segment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDimension {
    #[serde(rename = "1d")]
    OneD,
    #[default]
    #[serde(rename = "2d")]
    TwoD,
}

/// Routing style of a routable connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingType {
    /// Horizontal and vertical segments only
    #[serde(rename = "dynamic_hv")]
    DynamicHV,
    DynamicPolyline,
    DynamicCurve,
}

/// A leaf node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Model {
    /// A plain shape; path shapes carry their outline.
    Shape {
        #[serde(default)]
        dimension: ShapeDimension,
        #[serde(default)]
        path: Option<SourcePath>,
    },
    Line,
    /// Two-segment elbow connector
    Step2Connector {
        #[serde(default)]
        first_vertical: bool,
    },
    /// Three-segment connector with an optional custom middle-segment position
    Step3Connector {
        #[serde(default)]
        first_vertical: bool,
        #[serde(default)]
        middle_percent: Option<f64>,
    },
    RoutableConnector {
        routing: RoutingType,
        #[serde(default)]
        points: Vec<Point>,
    },
    /// A primitive of a composite shape drawn from a path
    PathPrimitive {
        path: SourcePath,
        #[serde(default)]
        is_1d: bool,
    },
    /// A primitive of a composite shape showing only text
    TextPrimitive,
}

impl Model {
    /// A shape without an outline path
    pub fn shape(dimension: ShapeDimension) -> Self {
        Self::Shape {
            dimension,
            path: None,
        }
    }

    /// A path shape
    pub fn path_shape(dimension: ShapeDimension, path: SourcePath) -> Self {
        Self::Shape {
            dimension,
            path: Some(path),
        }
    }

    pub fn is_one_d(&self) -> bool {
        match self {
            Self::Shape { dimension, .. } => *dimension == ShapeDimension::OneD,
            Self::PathPrimitive { is_1d, .. } => *is_1d,
            Self::Line
            | Self::Step2Connector { .. }
            | Self::Step3Connector { .. }
            | Self::RoutableConnector { .. } => true,
            Self::TextPrimitive => false,
        }
    }

    pub fn is_connectable(&self) -> bool {
        match self {
            Self::Shape { dimension, .. } => *dimension == ShapeDimension::OneD,
            Self::Line
            | Self::Step2Connector { .. }
            | Self::Step3Connector { .. }
            | Self::RoutableConnector { .. } => true,
            Self::PathPrimitive { .. } | Self::TextPrimitive => false,
        }
    }

    /// Returns `true` for plain lines.
    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line)
    }

    /// Returns `true` for lines and connectors, whose outline comes from their routing
    /// instead of a source path.
    pub fn is_connector(&self) -> bool {
        matches!(
            self,
            Self::Line
                | Self::Step2Connector { .. }
                | Self::Step3Connector { .. }
                | Self::RoutableConnector { .. }
        )
    }
}

/// Whether a path is a closed outline or an open stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    #[default]
    ClosedFigure,
    OpenFigure,
}

/// A path in scene coordinates with one command code per point.
///
/// Codes follow the classic graphics-path encoding: `0` starts a figure, `1` is a
/// line, `3` a cubic bezier point; bit `0x80` closes the current figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePath {
    points: Vec<Point>,
    codes: Vec<u8>,
    #[serde(default)]
    path_type: PathType,
}

impl SourcePath {
    pub fn new(points: Vec<Point>, codes: Vec<u8>, path_type: PathType) -> Self {
        Self {
            points,
            codes,
            path_type,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn path_type(&self) -> PathType {
        self.path_type
    }
}

/// Editing restrictions of a node. A set flag forbids the operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protection {
    pub change_aspect_ratio: bool,
    pub change_start_point: bool,
    pub change_end_point: bool,
    pub change_style: bool,
    pub context_menu_edit: bool,
    pub delete: bool,
    pub inplace_edit: bool,
    pub move_x: bool,
    pub move_y: bool,
    pub print: bool,
    pub resize_x: bool,
    pub resize_y: bool,
    pub rotate: bool,
    pub select: bool,
    pub trackers_edit: bool,
    pub ungroup: bool,
}

/// Kind of a connection port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    /// Aligned to the axis-aligned bounds of the shape
    Bounds,
    /// Aligned to the rotated bounds of the shape
    RotatedBounds,
    /// A fixed point in model space
    Point,
    /// A port that slides along the shape outline
    Dynamic,
    /// A port without a location
    Logical,
}

/// Which way connectors may glue to a port.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortType {
    Inward,
    Outward,
    #[default]
    InwardAndOutward,
}

/// A connection port of a source shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePort {
    name: String,
    kind: PortKind,
    /// Horizontal offset from the center, in percent of the width
    #[serde(default)]
    percent_x: f64,
    /// Vertical offset from the center, in percent of the height
    #[serde(default)]
    percent_y: f64,
    #[serde(default)]
    direction: Option<f64>,
    #[serde(default)]
    port_type: PortType,
}

impl SourcePort {
    pub fn new(name: impl Into<String>, kind: PortKind, percent_x: f64, percent_y: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            percent_x,
            percent_y,
            direction: None,
            port_type: PortType::default(),
        }
    }

    pub fn with_direction(mut self, angle: f64) -> Self {
        self.direction = Some(angle);
        self
    }

    pub fn with_port_type(mut self, port_type: PortType) -> Self {
        self.port_type = port_type;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PortKind {
        self.kind
    }

    pub fn percent_x(&self) -> f64 {
        self.percent_x
    }

    pub fn percent_y(&self) -> f64 {
        self.percent_y
    }

    pub fn direction(&self) -> Option<f64> {
        self.direction
    }

    pub fn port_type(&self) -> PortType {
        self.port_type
    }
}

/// One end of a 1-D shape glued to another shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plug {
    pub shape: NodeId,
    #[serde(default)]
    pub port: Option<String>,
}

/// Begin and end points of a 1-D node in scene coordinates, with optional glue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub from: Option<Plug>,
    #[serde(default)]
    pub to: Option<Plug>,
}

impl Link {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            from: None,
            to: None,
        }
    }

    pub fn with_from(mut self, shape: NodeId, port: Option<&str>) -> Self {
        self.from = Some(Plug {
            shape,
            port: port.map(str::to_owned),
        });
        self
    }

    pub fn with_to(mut self, shape: NodeId, port: Option<&str>) -> Self {
        self.to = Some(Plug {
            shape,
            port: port.map(str::to_owned),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn leaf(model: Model) -> SourceNode {
        SourceNode::new(NodeId::random(), SourceNodeKind::Model(model))
    }

    #[test]
    fn test_model_pin_defaults_to_center() {
        let node = leaf(Model::shape(ShapeDimension::TwoD))
            .with_model_bounds(Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(node.model_pin(), Point::new(25.0, 40.0));

        let node = node.with_model_pin(Point::new(10.0, 20.0));
        assert_eq!(node.model_pin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_scene_size_ignores_rotation() {
        let node = leaf(Model::shape(ShapeDimension::TwoD))
            .with_model_bounds(Rect::new(0.0, 0.0, 100.0, 50.0))
            .with_scene_transform(
                Matrix::rotation(0.7).then(Matrix::translation(300.0, 200.0)),
            );
        let size = node.scene_size();
        assert_approx_eq!(f64, size.width(), 100.0, epsilon = 1e-9);
        assert_approx_eq!(f64, size.height(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_location_is_scene_bounds_origin() {
        let node = leaf(Model::shape(ShapeDimension::TwoD))
            .with_model_bounds(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_scene_transform(Matrix::translation(5.0, 7.0));
        assert_eq!(node.location(), Point::new(5.0, 7.0));
    }

    #[test]
    fn test_dimension_predicates() {
        assert!(leaf(Model::Line).is_one_d());
        assert!(leaf(Model::Line).is_connectable());
        assert!(!leaf(Model::shape(ShapeDimension::TwoD)).is_one_d());
        assert!(leaf(Model::shape(ShapeDimension::OneD)).is_connectable());

        let primitive = leaf(Model::PathPrimitive {
            path: SourcePath::new(vec![], vec![], PathType::OpenFigure),
            is_1d: true,
        });
        assert!(primitive.is_one_d());
        assert!(!primitive.is_connectable());
        assert!(!leaf(Model::TextPrimitive).is_one_d());
    }

    #[test]
    fn test_descendants_depth_first() {
        let a = leaf(Model::shape(ShapeDimension::TwoD)).with_name("a");
        let b = leaf(Model::Line).with_name("b");
        let inner = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::CompositeShape {
                primitives: vec![b],
            },
        )
        .with_name("inner");
        let root = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Group {
                children: vec![a, inner],
            },
        )
        .with_name("root");

        let names: Vec<&str> = root.descendants().map(SourceNode::name).collect();
        assert_eq!(names, vec!["root", "a", "inner", "b"]);
        assert!(root.is_container());
        assert!(root.is_two_d_shape());
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "name": "Box",
            "kind": "model",
            "model": "shape",
            "dimension": "2d",
            "model_bounds": {"x": 0.0, "y": 0.0, "width": 10.0, "height": 20.0}
        }"#;
        let node: SourceNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.name(), "Box");
        assert!(node.is_two_d_shape());
        assert!(node.scene_transform().is_identity());
        assert_eq!(node.model_bounds().height(), 20.0);
    }

    #[test]
    fn test_foreign_node_json() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00c04fc964ff",
            "kind": "foreign",
            "type_name": "OleObject"
        }"#;
        let node: SourceNode = serde_json::from_str(json).unwrap();
        assert!(matches!(node.kind(), SourceNodeKind::Foreign { type_name } if type_name == "OleObject"));
        assert!(node.children().is_empty());
    }
}
