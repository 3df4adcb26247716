//! Target items and the shape model they share.
//!
//! Every target item is a [`Shape`]: a box of `width × height` rotated by `angle` around
//! its location pin, which sits at `pin` in the parent's coordinates. 1-D shapes are
//! driven by begin and end points instead; their width, angle and pin are
//! [`Field::Derived`] from the two points.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Matrix, Point, Rect, Size},
    identifier::{Id, NodeId},
    target::{
        field::{Field, Formula, FormulaContext},
        path::{DrawPath, Geometry, PathCommand, PathPoint},
        port::PortSet,
        style::{Fill, FontStyle, PredefinedCursor, TextAlign, VerticalAlignment},
    },
};

/// Handle of an item inside an [`ItemArena`](crate::target::ItemArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemHandle(pub(crate) usize);

impl ItemHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a shape is a box or a begin/end segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    #[serde(rename = "shape_1d")]
    Shape1D,
    #[serde(rename = "shape_2d")]
    Shape2D,
}

/// Predefined connector shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorShape {
    Line,
    /// Two segments, leaving the begin point vertically
    TopBottomToSide,
    /// Two segments, leaving the begin point horizontally
    SideToTopBottom,
    /// Three segments, vertical outer segments
    BottomToTop1,
    /// Three segments, horizontal outer segments
    SideToSide1,
}

/// A control handle of a shape, in the shape's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub x: Field,
    pub y: Field,
}

/// Routing style of a routable connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    Orthogonal,
    Polyline,
}

/// The route of a routable connector in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub routing: Routing,
    pub points: Vec<Point>,
}

/// Where one end of a 1-D shape is glued.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum Glue {
    Shape { shape: ItemHandle },
    Port { shape: ItemHandle, port: Id },
}

/// Editing permissions. A cleared flag forbids the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub allow_change_aspect_ratio: bool,
    pub allow_change_begin_point: bool,
    pub allow_change_end_point: bool,
    pub allow_format: bool,
    pub allow_context_menu_edit: bool,
    pub allow_delete: bool,
    pub allow_inplace_edit: bool,
    pub allow_move_x: bool,
    pub allow_move_y: bool,
    pub allow_print: bool,
    pub allow_resize_x: bool,
    pub allow_resize_y: bool,
    pub allow_rotate: bool,
    pub allow_select: bool,
    pub allow_geometry_edit: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            allow_change_aspect_ratio: true,
            allow_change_begin_point: true,
            allow_change_end_point: true,
            allow_format: true,
            allow_context_menu_edit: true,
            allow_delete: true,
            allow_inplace_edit: true,
            allow_move_x: true,
            allow_move_y: true,
            allow_print: true,
            allow_resize_x: true,
            allow_resize_y: true,
            allow_rotate: true,
            allow_select: true,
            allow_geometry_edit: true,
        }
    }
}

/// The text of a shape with its formatting.
///
/// The text block spans the shape's box by default and is positioned by its own
/// relative location pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_size: Option<f64>,
    #[serde(default)]
    font_style: FontStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill: Option<Fill>,
    #[serde(default)]
    horizontal_alignment: TextAlign,
    #[serde(default)]
    vertical_alignment: VerticalAlignment,
    keep_upward: bool,
    loc_pin: Point,
    width: Field,
    height: Field,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_name: None,
            font_size: None,
            font_style: FontStyle::default(),
            fill: None,
            horizontal_alignment: TextAlign::default(),
            vertical_alignment: VerticalAlignment::default(),
            keep_upward: true,
            loc_pin: Point::new(0.5, 0.5),
            width: Field::Derived(Formula::ShapeWidth),
            height: Field::Derived(Formula::ShapeHeight),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }

    /// Font size in points
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style
    }

    pub fn fill(&self) -> Option<&Fill> {
        self.fill.as_ref()
    }

    pub fn horizontal_alignment(&self) -> TextAlign {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn keep_upward(&self) -> bool {
        self.keep_upward
    }

    /// Location pin relative to the text block's own size
    pub fn loc_pin(&self) -> Point {
        self.loc_pin
    }

    pub fn set_font(&mut self, name: impl Into<String>, size: f64, style: FontStyle) {
        self.font_name = Some(name.into());
        self.font_size = Some(size);
        self.font_style = style;
    }

    pub fn set_fill(&mut self, fill: Option<Fill>) {
        self.fill = fill;
    }

    pub fn set_alignment(&mut self, horizontal: TextAlign, vertical: VerticalAlignment) {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
    }

    pub fn set_keep_upward(&mut self, keep_upward: bool) {
        self.keep_upward = keep_upward;
    }

    pub fn set_loc_pin(&mut self, loc_pin: Point) {
        self.loc_pin = loc_pin;
    }
}

/// The placement, outline and decorations every target item has.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    shape_type: ShapeType,
    width: Field,
    height: Field,
    angle: Field,
    pin_x: Field,
    pin_y: Field,
    /// Location pin, relative to the shape's size
    loc_pin: Point,
    begin: Point,
    end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connector: Option<ConnectorShape>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    controls: Vec<Control>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "PortSet::is_empty")]
    ports: PortSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<TextBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    begin_glue: Option<Glue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_glue: Option<Glue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cursor: Option<PredefinedCursor>,
    #[serde(default)]
    permissions: Permissions,
}

impl Shape {
    /// A 2-D shape with zero size at the origin, pinned at its center.
    pub fn new_2d() -> Self {
        Self {
            shape_type: ShapeType::Shape2D,
            width: Field::Literal(0.0),
            height: Field::Literal(0.0),
            angle: Field::Literal(0.0),
            pin_x: Field::Literal(0.0),
            pin_y: Field::Literal(0.0),
            loc_pin: Point::new(0.5, 0.5),
            begin: Point::default(),
            end: Point::default(),
            connector: None,
            controls: Vec::new(),
            geometry: None,
            ports: PortSet::new(),
            text: None,
            begin_glue: None,
            end_glue: None,
            tooltip: None,
            cursor: None,
            permissions: Permissions::default(),
        }
    }

    /// A 1-D shape using the vector transform: the begin point is the pin, the
    /// begin-to-end vector gives width and angle, and the location pin sits at the
    /// middle of the left edge.
    pub fn new_1d_vector() -> Self {
        Self {
            shape_type: ShapeType::Shape1D,
            width: Field::Derived(Formula::BeginEndLength),
            angle: Field::Derived(Formula::BeginEndAngle),
            pin_x: Field::Derived(Formula::BeginX),
            pin_y: Field::Derived(Formula::BeginY),
            loc_pin: Point::new(0.0, 0.5),
            ..Self::new_2d()
        }
    }

    /// A 1-D connector of the given predefined shape.
    ///
    /// Lines get a straight relative outline; step connectors get an empty geometry
    /// whose route the consumer computes from the end points and controls. The
    /// three-segment variants get one middle control at the center of the box.
    pub fn new_connector(connector: ConnectorShape) -> Self {
        let mut geometry = Geometry::new();
        let mut controls = Vec::new();
        match connector {
            ConnectorShape::Line => geometry.add(
                DrawPath::relative(vec![
                    PathPoint::new(0.0, 0.5, PathCommand::StartFigure, false),
                    PathPoint::new(1.0, 0.5, PathCommand::LineTo, false),
                ])
                .with_show_fill(false),
            ),
            ConnectorShape::TopBottomToSide | ConnectorShape::SideToTopBottom => {}
            ConnectorShape::BottomToTop1 | ConnectorShape::SideToSide1 => {
                controls.push(Control {
                    x: Field::Derived(Formula::WidthFactor(0.5)),
                    y: Field::Derived(Formula::HeightFactor(0.5)),
                });
            }
        }

        Self {
            connector: Some(connector),
            controls,
            geometry: Some(geometry),
            ..Self::new_1d_vector()
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    pub fn is_1d(&self) -> bool {
        self.shape_type == ShapeType::Shape1D
    }

    fn formula_context(&self) -> FormulaContext {
        let mut ctx = FormulaContext {
            begin: self.begin,
            end: self.end,
            width: 0.0,
            height: 0.0,
        };
        ctx.width = self.width.evaluate(&ctx);
        ctx.height = self.height.evaluate(&ctx);
        ctx
    }

    pub fn width_field(&self) -> Field {
        self.width
    }

    pub fn height_field(&self) -> Field {
        self.height
    }

    pub fn angle_field(&self) -> Field {
        self.angle
    }

    pub fn pin_fields(&self) -> (Field, Field) {
        (self.pin_x, self.pin_y)
    }

    pub fn width(&self) -> f64 {
        self.formula_context().width
    }

    pub fn height(&self) -> f64 {
        self.formula_context().height
    }

    pub fn size(&self) -> Size {
        let ctx = self.formula_context();
        Size::new(ctx.width, ctx.height)
    }

    /// Rotation in radians
    pub fn angle(&self) -> f64 {
        self.angle.evaluate(&self.formula_context())
    }

    pub fn pin(&self) -> Point {
        let ctx = self.formula_context();
        Point::new(self.pin_x.evaluate(&ctx), self.pin_y.evaluate(&ctx))
    }

    pub fn loc_pin(&self) -> Point {
        self.loc_pin
    }

    pub fn begin_point(&self) -> Point {
        self.begin
    }

    pub fn end_point(&self) -> Point {
        self.end
    }

    /// The box `(0, 0, width, height)` in the shape's local coordinates.
    pub fn wh_box(&self) -> Rect {
        let size = self.size();
        Rect::new(0.0, 0.0, size.width(), size.height())
    }

    /// Transform from the shape's local coordinates into its parent's coordinates.
    pub fn local_transform(&self) -> Matrix {
        let size = self.size();
        let pin = self.pin();
        Matrix::translation(
            -self.loc_pin.x() * size.width(),
            -self.loc_pin.y() * size.height(),
        )
        .then(Matrix::rotation(self.angle()))
        .then(Matrix::translation(pin.x(), pin.y()))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = Field::Literal(width);
        self.height = Field::Literal(height);
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = Field::Literal(width);
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = Field::Literal(height);
    }

    /// Sets a literal rotation in radians, replacing any formula.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = Field::Literal(angle);
    }

    pub fn set_pin(&mut self, pin: Point) {
        self.pin_x = Field::Literal(pin.x());
        self.pin_y = Field::Literal(pin.y());
    }

    pub fn set_loc_pin(&mut self, loc_pin: Point) {
        self.loc_pin = loc_pin;
    }

    pub fn set_begin_point(&mut self, point: Point) {
        self.begin = point;
    }

    pub fn set_end_point(&mut self, point: Point) {
        self.end = point;
    }

    pub fn connector(&self) -> Option<ConnectorShape> {
        self.connector
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    /// Evaluated position of a control in local coordinates.
    pub fn control_point(&self, index: usize) -> Option<Point> {
        let control = self.controls.get(index)?;
        let ctx = self.formula_context();
        Some(Point::new(control.x.evaluate(&ctx), control.y.evaluate(&ctx)))
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
        self.geometry.as_mut()
    }

    /// Returns the geometry, creating an empty one first if needed.
    pub fn geometry_or_create(&mut self) -> &mut Geometry {
        self.geometry.get_or_insert_with(Geometry::new)
    }

    pub fn ports(&self) -> &PortSet {
        &self.ports
    }

    pub fn set_ports(&mut self, ports: PortSet) {
        self.ports = ports;
    }

    pub fn text_block(&self) -> Option<&TextBlock> {
        self.text.as_ref()
    }

    pub fn text_block_mut(&mut self) -> Option<&mut TextBlock> {
        self.text.as_mut()
    }

    /// Replaces the text, creating the text block if needed.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut TextBlock {
        let text = text.into();
        match &mut self.text {
            Some(block) => block.text = text,
            None => self.text = Some(TextBlock::new(text)),
        }
        self.text.get_or_insert_with(|| TextBlock::new(String::new()))
    }

    /// Evaluated size of the text block, if the shape has one.
    pub fn text_block_size(&self) -> Option<Size> {
        let block = self.text.as_ref()?;
        let ctx = self.formula_context();
        Some(Size::new(
            block.width.evaluate(&ctx),
            block.height.evaluate(&ctx),
        ))
    }

    pub fn begin_glue(&self) -> Option<Glue> {
        self.begin_glue
    }

    pub fn end_glue(&self) -> Option<Glue> {
        self.end_glue
    }

    pub fn glue_begin(&mut self, glue: Glue) {
        self.begin_glue = Some(glue);
    }

    pub fn glue_end(&mut self, glue: Glue) {
        self.end_glue = Some(glue);
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) {
        self.tooltip = Some(tooltip.into());
    }

    pub fn cursor(&self) -> Option<PredefinedCursor> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: PredefinedCursor) {
        self.cursor = Some(cursor);
    }

    pub fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut Permissions {
        &mut self.permissions
    }
}

/// The variant of a target item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Group {
        children: Vec<ItemHandle>,
        allow_ungroup: bool,
    },
    Shape,
    RoutableConnector {
        route: Route,
    },
}

/// An item of a target page or library item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetItem {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<ItemHandle>,
    shape: Shape,
    #[serde(flatten)]
    kind: ItemKind,
}

impl TargetItem {
    /// A group with no children yet.
    pub fn group() -> Self {
        Self::new(
            Shape::new_2d(),
            ItemKind::Group {
                children: Vec::new(),
                allow_ungroup: true,
            },
        )
    }

    /// A plain shape item.
    pub fn from_shape(shape: Shape) -> Self {
        Self::new(shape, ItemKind::Shape)
    }

    /// A routable connector following `route`.
    pub fn routable_connector(route: Route) -> Self {
        let mut shape = Shape::new_1d_vector();
        shape.geometry = Some(Geometry::new());
        Self::new(shape, ItemKind::RoutableConnector { route })
    }

    fn new(shape: Shape, kind: ItemKind) -> Self {
        Self {
            name: String::new(),
            user_id: None,
            tag: None,
            parent: None,
            shape,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> Option<NodeId> {
        self.user_id
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Sets the identifying data copied from the source node.
    pub fn set_identity(&mut self, name: &str, user_id: NodeId, tag: Option<&str>) {
        self.name = name.to_owned();
        self.user_id = Some(user_id);
        if let Some(tag) = tag {
            self.tag = Some(tag.to_owned());
        }
    }

    pub fn parent(&self) -> Option<ItemHandle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: ItemHandle) {
        self.parent = Some(parent);
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ItemKind::Group { .. })
    }

    /// Child handles of a group; empty for other items.
    pub fn children(&self) -> &[ItemHandle] {
        match &self.kind {
            ItemKind::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Sets whether a group may be ungrouped. No effect on other items.
    pub fn set_allow_ungroup(&mut self, allow: bool) {
        if let ItemKind::Group { allow_ungroup, .. } = &mut self.kind {
            *allow_ungroup = allow;
        }
    }
}
