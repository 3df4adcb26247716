//! Arrowhead translation.

use trellis_core::{
    source::{ArrowheadShape, ArrowheadStyle},
    target::{self, Arrowhead},
};

use crate::styles::{
    StyleContext, fill::translate_fill, stroke::translate_stroke, units::to_device_pixels,
};

/// Width multiplier applied unless the shape says otherwise. Source arrowhead
/// widths measure from the axis to one side.
const DEFAULT_WIDTH_MULTIPLIER: f64 = 2.0;

struct ShapeMapping {
    shape: target::ArrowheadShape,
    flip_angle: bool,
    width_multiplier: f64,
}

impl ShapeMapping {
    fn new(shape: target::ArrowheadShape) -> Self {
        Self {
            shape,
            flip_angle: false,
            width_multiplier: DEFAULT_WIDTH_MULTIPLIER,
        }
    }

    fn flipped(mut self) -> Self {
        self.flip_angle = true;
        self
    }

    fn full_width(mut self) -> Self {
        self.width_multiplier = 1.0;
        self
    }
}

fn map_shape(shape: ArrowheadShape) -> ShapeMapping {
    use target::ArrowheadShape as T;

    match shape {
        ArrowheadShape::None | ArrowheadShape::Custom => ShapeMapping::new(T::None),
        ArrowheadShape::Arrow => ShapeMapping::new(T::Triangle),
        ArrowheadShape::Circle => ShapeMapping::new(T::Circle),
        ArrowheadShape::ClosedFork | ArrowheadShape::Fork => {
            ShapeMapping::new(T::TriangleNoFill).flipped()
        }
        ArrowheadShape::DoubleArrow => ShapeMapping::new(T::DoubleTriangle).full_width(),
        ArrowheadShape::Losangle => ShapeMapping::new(T::DiamondNoFill),
        ArrowheadShape::Many => ShapeMapping::new(T::InvertedLineArrow),
        ArrowheadShape::ManyOptional => {
            ShapeMapping::new(T::InvertedLineArrowWithCircleNoFill).full_width()
        }
        ArrowheadShape::One => ShapeMapping::new(T::VerticalLine),
        ArrowheadShape::OneOptional => ShapeMapping::new(T::CircleNoFillVerticalLine)
            .flipped()
            .full_width(),
        ArrowheadShape::OneOrMany => {
            ShapeMapping::new(T::InvertedLineArrowWithVerticalLine).full_width()
        }
        ArrowheadShape::OpenedArrow => ShapeMapping::new(T::LineArrow),
        ArrowheadShape::QuillArrow | ArrowheadShape::SunkenArrow => {
            ShapeMapping::new(T::TriangleWithInwardCurveNoFill)
        }
    }
}

/// Translates a source arrowhead.
///
/// The fill of the arrowhead is dropped when it cannot be translated.
pub fn translate_arrowhead(arrowhead: &ArrowheadStyle, ctx: &StyleContext) -> Arrowhead {
    let mapping = map_shape(arrowhead.shape());
    let dpi = ctx.dpi();

    Arrowhead {
        shape: mapping.shape,
        flip_angle: mapping.flip_angle,
        fill: arrowhead
            .fill()
            .and_then(|fill| translate_fill(fill, ctx).ok()),
        stroke: arrowhead.stroke().map(|stroke| translate_stroke(stroke, ctx)),
        width: to_device_pixels(arrowhead.width(), dpi) * mapping.width_multiplier,
        height: to_device_pixels(arrowhead.height(), dpi),
    }
}
