//! Target path geometry.
//!
//! Target paths address points either relative to the unit square (scaled to the
//! owning shape's box at render time) or absolutely. A figure that is closed must
//! end exactly on its start point.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point, Rect},
    target::style::{Arrowhead, Fill, Stroke},
};

/// Command bits of a start-figure point.
pub const COMMAND_START_FIGURE: u8 = 0x01;
/// Command bits of a line-to point.
pub const COMMAND_LINE_TO: u8 = 0x02;
/// Command bits of a cubic bezier point.
pub const COMMAND_CUBIC_BEZIER_TO: u8 = 0x04;
/// Mask selecting the command bits of a point type byte.
pub const COMMAND_MASK: u8 = 0x07;
/// Attribute bit marking the point that closes a figure.
pub const ATTRIBUTE_CLOSE: u8 = 0x80;

/// The drawing command of a path point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCommand {
    StartFigure,
    LineTo,
    CubicBezierTo,
}

impl PathCommand {
    /// Decodes the command bits of a point type byte.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::target::PathCommand;
    /// assert_eq!(PathCommand::from_bits(0x82), Some(PathCommand::LineTo));
    /// assert_eq!(PathCommand::from_bits(0x03), None);
    /// ```
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & COMMAND_MASK {
            COMMAND_START_FIGURE => Some(Self::StartFigure),
            COMMAND_LINE_TO => Some(Self::LineTo),
            COMMAND_CUBIC_BEZIER_TO => Some(Self::CubicBezierTo),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::StartFigure => COMMAND_START_FIGURE,
            Self::LineTo => COMMAND_LINE_TO,
            Self::CubicBezierTo => COMMAND_CUBIC_BEZIER_TO,
        }
    }
}

/// A point of a target path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    x: f64,
    y: f64,
    command: PathCommand,
    #[serde(default)]
    close: bool,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, command: PathCommand, close: bool) -> Self {
        Self {
            x,
            y,
            command,
            close,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn command(&self) -> PathCommand {
        self.command
    }

    /// Returns `true` if this point closes the current figure
    pub fn closes_figure(&self) -> bool {
        self.close
    }

    /// The packed type byte: command bits plus the close attribute.
    pub fn type_byte(&self) -> u8 {
        let close = if self.close { ATTRIBUTE_CLOSE } else { 0 };
        self.command.bits() | close
    }
}

/// A path drawing command of a geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawPath {
    bounds: Rect,
    relative: bool,
    show_fill: bool,
    points: Vec<PathPoint>,
}

impl DrawPath {
    /// A path relative to the unit square.
    pub fn relative(points: Vec<PathPoint>) -> Self {
        Self {
            bounds: Rect::unit(),
            relative: true,
            show_fill: true,
            points,
        }
    }

    /// A path in absolute coordinates anchored to `bounds`.
    pub fn absolute(bounds: Rect, points: Vec<PathPoint>) -> Self {
        Self {
            bounds,
            relative: false,
            show_fill: true,
            points,
        }
    }

    pub fn with_show_fill(mut self, show_fill: bool) -> Self {
        self.show_fill = show_fill;
        self
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub fn show_fill(&self) -> bool {
        self.show_fill
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }
}

/// The outline of a shape with its fill, stroke and arrowheads.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    commands: Vec<DrawPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke: Option<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    begin_arrowhead: Option<Arrowhead>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_arrowhead: Option<Arrowhead>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: DrawPath) {
        self.commands.push(path);
    }

    pub fn commands(&self) -> &[DrawPath] {
        &self.commands
    }

    pub fn fill(&self) -> Option<&Fill> {
        self.fill.as_ref()
    }

    pub fn stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref()
    }

    pub fn begin_arrowhead(&self) -> Option<&Arrowhead> {
        self.begin_arrowhead.as_ref()
    }

    pub fn end_arrowhead(&self) -> Option<&Arrowhead> {
        self.end_arrowhead.as_ref()
    }

    pub fn set_fill(&mut self, fill: Option<Fill>) {
        self.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: Option<Stroke>) {
        self.stroke = stroke;
    }

    pub fn set_begin_arrowhead(&mut self, arrowhead: Option<Arrowhead>) {
        self.begin_arrowhead = arrowhead;
    }

    pub fn set_end_arrowhead(&mut self, arrowhead: Option<Arrowhead>) {
        self.end_arrowhead = arrowhead;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bits_roundtrip() {
        for command in [
            PathCommand::StartFigure,
            PathCommand::LineTo,
            PathCommand::CubicBezierTo,
        ] {
            assert_eq!(PathCommand::from_bits(command.bits()), Some(command));
            assert_eq!(
                PathCommand::from_bits(command.bits() | ATTRIBUTE_CLOSE),
                Some(command)
            );
        }
    }

    #[test]
    fn test_type_byte_includes_close() {
        let point = PathPoint::new(0.0, 0.0, PathCommand::LineTo, true);
        assert_eq!(point.type_byte(), COMMAND_LINE_TO | ATTRIBUTE_CLOSE);

        let point = PathPoint::new(0.0, 0.0, PathCommand::StartFigure, false);
        assert_eq!(point.type_byte(), COMMAND_START_FIGURE);
    }

    #[test]
    fn test_draw_path_constructors() {
        let relative = DrawPath::relative(vec![]);
        assert!(relative.is_relative());
        assert_eq!(relative.bounds(), Rect::unit());
        assert!(relative.show_fill());

        let bounds = Rect::new(5.0, 5.0, 0.0, 0.0);
        let absolute = DrawPath::absolute(bounds, vec![]).with_show_fill(false);
        assert!(!absolute.is_relative());
        assert_eq!(absolute.bounds(), bounds);
        assert!(!absolute.show_fill());
    }

    #[test]
    fn test_geometry_styles() {
        let mut geometry = Geometry::new();
        assert!(geometry.fill().is_none());
        geometry.add(DrawPath::relative(vec![]));
        geometry.set_stroke(Some(Stroke {
            color: Default::default(),
            width: 2.0,
            dash_style: Default::default(),
            dash_pattern: None,
        }));
        assert_eq!(geometry.commands().len(), 1);
        assert_eq!(geometry.stroke().map(|s| s.width), Some(2.0));
    }
}
