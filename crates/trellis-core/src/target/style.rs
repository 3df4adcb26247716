//! Visual attributes of target items.
//!
//! Exported types:
//! - [`Fill`]: color, stock gradient, image or hatch fills
//! - [`Stroke`]: color, width and dash style of an outline
//! - [`Arrowhead`]: decoration at either end of a 1-D shape
//! - [`PredefinedCursor`]: the hover cursor of an item
//! - [`FontStyle`], [`TextAlign`], [`VerticalAlignment`]: text block formatting

use serde::{Deserialize, Serialize};

use crate::color::Color;

// =============================================================================
// Fill
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientStyle {
    Horizontal,
    Vertical,
    DiagonalUp,
    DiagonalDown,
    FromCorner,
    FromCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientVariant {
    Variant1,
    Variant2,
    Variant3,
    Variant4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// How a texture is placed inside the filled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mapping", rename_all = "snake_case")]
pub enum TextureMapping {
    Stretch,
    FitAndAlign,
    Align {
        horizontal: HorizontalAlignment,
        vertical: VerticalAlignment,
    },
    Tile,
    StretchXAlignY,
    StretchYAlignX,
}

/// An area fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Color {
        color: Color,
    },
    StockGradient {
        style: GradientStyle,
        variant: GradientVariant,
        begin: Color,
        end: Color,
    },
    /// An image fill with the encoded image embedded
    Image {
        data: Vec<u8>,
    },
    Hatch {
        style: u8,
        foreground: Color,
        background: Color,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mapping: Option<TextureMapping>,
    },
}

// =============================================================================
// Stroke
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    #[default]
    Solid,
    Dot,
    Dash,
    DashDot,
    DashDotDot,
    Custom,
}

/// An outline stroke. Widths and dash lengths are device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub dash_style: DashStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash_pattern: Option<Vec<f64>>,
}

// =============================================================================
// Arrowheads
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowheadShape {
    #[default]
    None,
    Triangle,
    TriangleNoFill,
    DoubleTriangle,
    Circle,
    CircleNoFillVerticalLine,
    DiamondNoFill,
    LineArrow,
    InvertedLineArrow,
    InvertedLineArrowWithCircleNoFill,
    InvertedLineArrowWithVerticalLine,
    VerticalLine,
    TriangleWithInwardCurveNoFill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrowhead {
    pub shape: ArrowheadShape,
    /// Mirror the shape so it points back along the line
    #[serde(default)]
    pub flip_angle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    pub width: f64,
    pub height: f64,
}

// =============================================================================
// Cursor
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredefinedCursor {
    AppStarting,
    Arrow,
    Cross,
    Hand,
    Help,
    HSplit,
    IBeam,
    No,
    NoMove2D,
    NoMoveH,
    NoMoveV,
    PanEast,
    PanNorthEast,
    PanNorth,
    PanNorthWest,
    PanSouthEast,
    PanSouth,
    PanSouthWest,
    PanWest,
    SizeAll,
    #[serde(rename = "size_nesw")]
    SizeNESW,
    #[serde(rename = "size_ns")]
    SizeNS,
    #[serde(rename = "size_nwse")]
    SizeNWSE,
    #[serde(rename = "size_we")]
    SizeWE,
    UpArrow,
    VSplit,
    Wait,
}

// =============================================================================
// Text formatting
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Font style flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
}

impl FontStyle {
    /// Decodes the packed bits bold = 1, italic = 2, underline = 4, strikeout = 8.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::target::FontStyle;
    /// let style = FontStyle::from_bits(0b0101);
    /// assert!(style.bold && style.underline);
    /// assert!(!style.italic && !style.strikeout);
    /// ```
    pub fn from_bits(bits: u8) -> Self {
        Self {
            bold: bits & 0x1 != 0,
            italic: bits & 0x2 != 0,
            underline: bits & 0x4 != 0,
            strikeout: bits & 0x8 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_from_bits() {
        assert_eq!(FontStyle::from_bits(0), FontStyle::default());
        let all = FontStyle::from_bits(0x0F);
        assert!(all.bold && all.italic && all.underline && all.strikeout);
        // Bits above strikeout are ignored
        assert_eq!(FontStyle::from_bits(0xF0), FontStyle::default());
    }

    #[test]
    fn test_fill_json_tag() {
        let fill = Fill::Color {
            color: Color::from_argb(0xFF00FF00),
        };
        let json = serde_json::to_value(&fill).unwrap();
        assert_eq!(json["type"], "color");
    }

    #[test]
    fn test_stroke_omits_absent_pattern() {
        let stroke = Stroke {
            color: Color::default(),
            width: 1.0,
            dash_style: DashStyle::Solid,
            dash_pattern: None,
        };
        let json = serde_json::to_value(&stroke).unwrap();
        assert!(json.get("dash_pattern").is_none());
    }
}
