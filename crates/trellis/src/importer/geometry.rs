//! Path import: rewrites absolute source paths as target draw paths.

use log::debug;

use trellis_core::{
    geometry::{Matrix, Point, Rect, approx_eq},
    source::{Model, PathType, SourceNode, SourcePath},
    target::{ATTRIBUTE_CLOSE, DrawPath, PathCommand, PathPoint, Shape},
};

use crate::error::TrellisError;

/// Close flag of a source command code.
const SOURCE_CLOSE_FLAG: u8 = 0x80;

/// Points of a normalized path and how they are anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPath {
    pub points: Vec<PathPoint>,
    /// `true` when the points address the unit square
    pub relative: bool,
}

/// Rewrites source path points as target path points against `bounds`.
///
/// Points are expressed relative to `bounds` when it has any extent; a zero
/// dimension divides by one instead. When both dimensions are zero the points
/// stay absolute. Target command bytes are the source codes plus one.
///
/// A closing point within rounding distance of the figure's start is snapped
/// onto it. Any other closing point is kept as a plain command followed by a
/// synthetic line back to the start, which carries the close flag.
///
/// Callers must pass `points` and `codes` of equal length.
///
/// # Examples
///
/// ```
/// # use trellis::importer::geometry::normalize;
/// # use trellis_core::geometry::{Point, Rect};
/// let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
/// let path = normalize(Rect::new(0.0, 0.0, 10.0, 10.0), &points, &[0x00, 0x01, 0x81]);
///
/// assert!(path.relative);
/// // The open end gets a closing line back to the start
/// assert_eq!(path.points.len(), 4);
/// assert!(path.points[3].closes_figure());
/// assert_eq!(path.points[3].point(), Point::new(0.0, 0.0));
/// ```
pub fn normalize(bounds: Rect, points: &[Point], codes: &[u8]) -> NormalizedPath {
    let mut width = bounds.width();
    let mut height = bounds.height();
    let mut relative = true;
    if width == 0.0 {
        width = 1.0;
        if height == 0.0 {
            height = 1.0;
            relative = false;
        }
    } else if height == 0.0 {
        height = 1.0;
    }

    let mut normalized = Vec::with_capacity(points.len() + 4);
    let mut figure_start: Option<Point> = None;

    for (point, &code) in points.iter().zip(codes) {
        let x = (point.x() - bounds.x()) / width;
        let y = (point.y() - bounds.y()) / height;
        let type_byte = code.wrapping_add(1);
        let command = PathCommand::from_bits(type_byte);
        debug_assert!(command.is_some(), "unknown path command code {code:#04x}");
        let command = command.unwrap_or_else(|| {
            debug!(code = code; "Unknown path command code, drawing a line");
            PathCommand::LineTo
        });
        let closes = (type_byte & SOURCE_CLOSE_FLAG) == ATTRIBUTE_CLOSE;

        match figure_start {
            Some(start) if closes && approx_eq(x, start.x()) && approx_eq(y, start.y()) => {
                normalized.push(PathPoint::new(start.x(), start.y(), command, true));
            }
            Some(start) if closes => {
                normalized.push(PathPoint::new(x, y, command, false));
                normalized.push(PathPoint::new(start.x(), start.y(), PathCommand::LineTo, true));
            }
            _ => normalized.push(PathPoint::new(x, y, command, closes)),
        }

        if command == PathCommand::StartFigure {
            figure_start = Some(Point::new(x, y));
        }
    }

    NormalizedPath {
        points: normalized,
        relative,
    }
}

/// The path a node contributes to its geometry, if any.
///
/// Connectors keep the outline they were created with, so only path shapes and
/// path primitives have one.
pub(super) fn source_path(node: &SourceNode) -> Option<&SourcePath> {
    match node.model()? {
        Model::Shape { path, .. } => path.as_ref(),
        Model::PathPrimitive { path, .. } => Some(path),
        Model::Line
        | Model::Step2Connector { .. }
        | Model::Step3Connector { .. }
        | Model::RoutableConnector { .. }
        | Model::TextPrimitive => None,
    }
}

/// Imports the outline of `node` into the geometry of `shape`.
///
/// Model leaves always end up with a geometry; connectors keep theirs untouched.
/// Path points are scene coordinates and are mapped into the shape's local
/// frame through the inverse of `page_transform` first.
///
/// # Errors
///
/// Returns [`TrellisError::MalformedPath`] when the path's point and code counts
/// differ, and [`TrellisError::SingularTransform`] when `page_transform` cannot
/// be inverted.
pub(super) fn import_geometry(
    node: &SourceNode,
    shape: &mut Shape,
    page_transform: Matrix,
) -> Result<(), TrellisError> {
    let Some(model) = node.model() else {
        return Ok(());
    };
    if model.is_connector() && shape.geometry().is_some() {
        return Ok(());
    }

    let wh_box = shape.wh_box();
    let geometry = shape.geometry_or_create();
    let Some(path) = source_path(node) else {
        return Ok(());
    };

    if path.points().len() != path.codes().len() {
        return Err(TrellisError::MalformedPath {
            node: node.id(),
            points: path.points().len(),
            codes: path.codes().len(),
        });
    }

    let inverse = page_transform
        .inverse()
        .map_err(|err| TrellisError::singular_transform(node.id(), err))?;
    let local: Vec<Point> = path
        .points()
        .iter()
        .map(|&p| inverse.transform_point(p))
        .collect();

    let normalized = normalize(wh_box, &local, path.codes());
    let relative = normalized.relative;
    let draw_path = if relative {
        DrawPath::relative(normalized.points)
    } else {
        DrawPath::absolute(node.model_bounds(), normalized.points)
    };
    geometry.add(draw_path.with_show_fill(path.path_type() != PathType::OpenFigure));

    debug!(node:? = node.id(), relative; "Imported path");
    Ok(())
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;
    use trellis_core::{
        identifier::NodeId,
        source::{ShapeDimension, SourceNodeKind},
    };

    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(10.0, 20.0),
            Point::new(110.0, 20.0),
            Point::new(110.0, 70.0),
            Point::new(10.0, 70.0),
        ]
    }

    #[test]
    fn test_relative_against_bounds() {
        let path = normalize(
            Rect::new(10.0, 20.0, 100.0, 50.0),
            &square(),
            &[0x00, 0x01, 0x01, 0x81],
        );

        assert!(path.relative);
        let coords: Vec<(f64, f64)> = path.points.iter().map(|p| (p.x(), p.y())).collect();
        assert_eq!(
            coords,
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
        );
        assert_eq!(path.points[0].type_byte(), 0x01);
        assert_eq!(path.points[1].type_byte(), 0x02);
        assert_eq!(path.points[3].type_byte(), 0x02);
        assert_eq!(path.points[4].type_byte(), 0x82);
    }

    #[test]
    fn test_close_at_start_not_duplicated() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ];
        let path = normalize(Rect::new(0.0, 0.0, 4.0, 4.0), &points, &[0x00, 0x01, 0x01, 0x81]);

        assert_eq!(path.points.len(), 4);
        assert!(path.points[3].closes_figure());
        assert_eq!(path.points[3].command(), PathCommand::LineTo);
    }

    #[test]
    fn test_close_near_start_snaps_to_start() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1e-10, 0.0),
        ];
        let path = normalize(Rect::new(0.0, 0.0, 1.0, 1.0), &points, &[0x00, 0x01, 0x01, 0x81]);

        assert_eq!(path.points.len(), 4);
        assert!(path.points[3].closes_figure());
        assert_eq!(path.points[3].point(), path.points[0].point());
    }

    #[test]
    fn test_bezier_codes() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let path = normalize(Rect::new(0.0, 0.0, 2.0, 1.0), &points, &[0x00, 0x03, 0x03, 0x83]);

        assert_eq!(path.points[1].command(), PathCommand::CubicBezierTo);
        assert_eq!(path.points[3].command(), PathCommand::CubicBezierTo);
        assert!(path.points[3].closes_figure());
        assert_eq!(path.points.len(), 4);
    }

    #[test]
    fn test_one_zero_dimension_stays_relative() {
        let points = [Point::new(5.0, 3.0), Point::new(25.0, 3.0)];
        let path = normalize(Rect::new(5.0, 3.0, 20.0, 0.0), &points, &[0x00, 0x01]);

        assert!(path.relative);
        assert_eq!(path.points[1].point(), Point::new(1.0, 0.0));
    }

    #[test]
    fn test_degenerate_bounds_absolute() {
        let points = [Point::new(7.0, 9.0), Point::new(7.0, 9.0)];
        let path = normalize(Rect::new(0.0, 0.0, 0.0, 0.0), &points, &[0x00, 0x01]);

        assert!(!path.relative);
        assert_eq!(path.points[0].point(), Point::new(7.0, 9.0));
    }

    #[test]
    fn test_second_figure_closes_to_its_own_start() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.5, 0.5),
            Point::new(0.75, 0.5),
            Point::new(0.75, 0.75),
        ];
        let codes = [0x00, 0x01, 0x81, 0x00, 0x01, 0x81];
        let path = normalize(Rect::new(0.0, 0.0, 1.0, 1.0), &points, &codes);

        // Each figure gains one synthetic closing point
        assert_eq!(path.points.len(), 8);
        assert_eq!(path.points[3].point(), Point::new(0.0, 0.0));
        assert_eq!(path.points[7].point(), Point::new(0.5, 0.5));
        assert!(path.points[7].closes_figure());
    }

    #[test]
    fn test_close_without_start_kept() {
        let points = [Point::new(1.0, 1.0)];
        let path = normalize(Rect::new(0.0, 0.0, 2.0, 2.0), &points, &[0x81]);

        assert_eq!(path.points.len(), 1);
        assert!(path.points[0].closes_figure());
    }

    fn path_node(points: Vec<Point>, codes: Vec<u8>, path_type: PathType) -> SourceNode {
        SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Model(Model::path_shape(
                ShapeDimension::TwoD,
                SourcePath::new(points, codes, path_type),
            )),
        )
    }

    #[test]
    fn test_import_maps_scene_points_into_shape() {
        let node = path_node(square(), vec![0x00, 0x01, 0x01, 0x81], PathType::ClosedFigure);
        let mut shape = Shape::new_2d();
        shape.resize(100.0, 50.0);
        shape.set_pin(Point::new(60.0, 45.0));
        let page_transform = shape.local_transform();

        import_geometry(&node, &mut shape, page_transform).unwrap();

        let commands = shape.geometry().unwrap().commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].is_relative());
        assert!(commands[0].show_fill());
        let last = commands[0].points()[4];
        assert_approx_eq!(f64, last.x(), 0.0);
        assert_approx_eq!(f64, last.y(), 0.0);
        let corner = commands[0].points()[2];
        assert_approx_eq!(f64, corner.x(), 1.0);
        assert_approx_eq!(f64, corner.y(), 1.0);
    }

    #[test]
    fn test_open_figure_hides_fill() {
        let node = path_node(
            vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
            vec![0x00, 0x01],
            PathType::OpenFigure,
        );
        let mut shape = Shape::new_2d();
        shape.resize(10.0, 10.0);
        shape.set_pin(Point::new(5.0, 5.0));
        let page_transform = shape.local_transform();

        import_geometry(&node, &mut shape, page_transform).unwrap();

        assert!(!shape.geometry().unwrap().commands()[0].show_fill());
    }

    #[test]
    fn test_mismatched_codes_rejected() {
        let node = path_node(square(), vec![0x00, 0x01], PathType::ClosedFigure);
        let mut shape = Shape::new_2d();

        let err = import_geometry(&node, &mut shape, Matrix::identity()).unwrap_err();
        assert!(matches!(
            err,
            TrellisError::MalformedPath {
                points: 4,
                codes: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_connector_geometry_untouched() {
        let node = SourceNode::new(NodeId::random(), SourceNodeKind::Model(Model::Line));
        let mut shape = Shape::new_connector(trellis_core::target::ConnectorShape::Line);
        let before = shape.geometry().cloned();

        import_geometry(&node, &mut shape, Matrix::identity()).unwrap();

        assert_eq!(shape.geometry().cloned(), before);
    }

    #[test]
    fn test_text_primitive_gets_empty_geometry() {
        let node = SourceNode::new(NodeId::random(), SourceNodeKind::Model(Model::TextPrimitive));
        let mut shape = Shape::new_2d();

        import_geometry(&node, &mut shape, Matrix::identity()).unwrap();

        assert!(shape.geometry().unwrap().commands().is_empty());
    }

    fn source_code() -> impl Strategy<Value = u8> {
        prop_oneof![Just(0x00u8), Just(0x01), Just(0x03), Just(0x81), Just(0x83)]
    }

    proptest! {
        #[test]
        fn prop_closed_figures_end_at_their_start(
            codes in prop::collection::vec(source_code(), 1..24),
            seed in prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), 24),
        ) {
            let mut codes = codes;
            codes[0] = 0x00;
            let points: Vec<Point> = seed.iter().take(codes.len()).map(|&(x, y)| Point::new(x, y)).collect();
            let path = normalize(Rect::new(0.0, 0.0, 100.0, 100.0), &points, &codes);

            prop_assert!(path.points.len() >= points.len());
            let mut start: Option<Point> = None;
            for point in &path.points {
                if point.command() == PathCommand::StartFigure {
                    start = Some(point.point());
                }
                if point.closes_figure() {
                    let start = start.unwrap();
                    prop_assert_eq!(point.point(), start);
                }
            }
        }

        #[test]
        fn prop_relative_points_stay_in_unit_square(
            seed in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 1..16),
            width in 1.0f64..500.0,
            height in 1.0f64..500.0,
        ) {
            let points: Vec<Point> = seed.iter().map(|&(x, y)| Point::new(x * width, y * height)).collect();
            let mut codes = vec![0x01u8; points.len()];
            codes[0] = 0x00;
            let path = normalize(Rect::new(0.0, 0.0, width, height), &points, &codes);

            prop_assert!(path.relative);
            for point in &path.points {
                prop_assert!((-1e-9..=1.0 + 1e-9).contains(&point.x()));
                prop_assert!((-1e-9..=1.0 + 1e-9).contains(&point.y()));
            }
        }
    }
}
