//! Style attributes attached to source nodes and documents.
//!
//! Every [`SourceNode`](super::SourceNode) owns a [`StyleSheet`] whose entries are all optional.
//! The effective value of an attribute is found by walking the node's ancestor chain up to the
//! document sheet and taking the first sheet that defines it.

use serde::{Deserialize, Serialize};

use crate::color::Color;

// =============================================================================
// Lengths
// =============================================================================

/// The unit a [`Length`] is expressed in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    #[default]
    Pixel,
    Point,
    Inch,
    Millimeter,
    Centimeter,
}

impl MeasurementUnit {
    /// How many device pixels one unit spans at the given resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trellis_core::source::MeasurementUnit;
    /// assert_eq!(MeasurementUnit::Inch.pixels_per_unit(96.0), 96.0);
    /// assert_eq!(MeasurementUnit::Point.pixels_per_unit(96.0), 96.0 / 72.0);
    /// ```
    pub fn pixels_per_unit(self, dpi: f64) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Point => dpi / 72.0,
            Self::Inch => dpi,
            Self::Millimeter => dpi / 25.4,
            Self::Centimeter => dpi / 2.54,
        }
    }
}

/// A length with an explicit unit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    value: f64,
    #[serde(default)]
    unit: MeasurementUnit,
}

impl Length {
    pub fn new(value: f64, unit: MeasurementUnit) -> Self {
        Self { value, unit }
    }

    /// A length in device pixels
    pub fn pixels(value: f64) -> Self {
        Self::new(value, MeasurementUnit::Pixel)
    }

    /// A length in typographic points
    pub fn points(value: f64) -> Self {
        Self::new(value, MeasurementUnit::Point)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> MeasurementUnit {
        self.unit
    }
}

// =============================================================================
// Fill
// =============================================================================

/// Direction of a two-color gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientStyle {
    Horizontal,
    Vertical,
    DiagonalUp,
    DiagonalDown,
    FromCorner,
    FromCenter,
    StartToEnd,
}

/// One of the four variants each gradient style offers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientVariant {
    #[default]
    Variant1,
    Variant2,
    Variant3,
    Variant4,
}

/// How an image or pattern is laid out inside the filled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayout {
    Stretched,
    Fitted,
    CropFitted,
    Centered,
    Tiled,
    StretchedToWidth,
    StretchedToHeight,
}

/// Index of a predefined hatch pattern.
///
/// Both object models number their hatch patterns identically, so the index
/// passes through unchanged.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HatchStyle(pub u8);

/// An area fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillStyle {
    Color {
        color: Color,
    },
    Gradient {
        style: GradientStyle,
        #[serde(default)]
        variant: GradientVariant,
        begin: Color,
        end: Color,
    },
    /// An image referenced by file name or embedded as encoded bytes.
    Image {
        #[serde(default)]
        file_name: Option<String>,
        #[serde(default)]
        bitmap: Option<Vec<u8>>,
    },
    Hatch {
        style: HatchStyle,
        foreground: Color,
        background: Color,
        #[serde(default)]
        mapping: Option<MapLayout>,
    },
    /// Multi-stop gradient; the target model has no counterpart.
    AdvancedGradient,
}

impl FillStyle {
    /// A solid color fill
    pub fn color(color: Color) -> Self {
        Self::Color { color }
    }
}

// =============================================================================
// Stroke
// =============================================================================

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePattern {
    #[default]
    Solid,
    Dot,
    Dash,
    DashDot,
    DashDotDot,
    /// Bit pattern in [`StrokeStyle::custom_pattern`], least significant bit first
    Custom,
}

/// A line stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    color: Color,
    width: Length,
    #[serde(default)]
    pattern: LinePattern,
    #[serde(default)]
    custom_pattern: u32,
    #[serde(default = "default_pattern_factor")]
    factor: u32,
}

fn default_pattern_factor() -> u32 {
    1
}

impl StrokeStyle {
    /// A solid stroke
    pub fn new(color: Color, width: Length) -> Self {
        Self {
            color,
            width,
            pattern: LinePattern::Solid,
            custom_pattern: 0,
            factor: default_pattern_factor(),
        }
    }

    /// Sets the dash pattern
    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets a custom dash bit pattern and the length each bit spans.
    pub fn with_custom_pattern(mut self, bits: u32, factor: u32) -> Self {
        self.pattern = LinePattern::Custom;
        self.custom_pattern = bits;
        self.factor = factor;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn pattern(&self) -> LinePattern {
        self.pattern
    }

    pub fn custom_pattern(&self) -> u32 {
        self.custom_pattern
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }
}

// =============================================================================
// Arrowheads
// =============================================================================

/// Shape of an arrowhead at either end of a 1-D node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowheadShape {
    #[default]
    None,
    Custom,
    Arrow,
    Circle,
    ClosedFork,
    DoubleArrow,
    Fork,
    Losangle,
    Many,
    ManyOptional,
    One,
    OneOptional,
    OneOrMany,
    OpenedArrow,
    QuillArrow,
    SunkenArrow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowheadStyle {
    #[serde(default)]
    shape: ArrowheadShape,
    width: Length,
    height: Length,
    #[serde(default)]
    fill: Option<FillStyle>,
    #[serde(default)]
    stroke: Option<StrokeStyle>,
}

impl ArrowheadStyle {
    pub fn new(shape: ArrowheadShape, width: Length, height: Length) -> Self {
        Self {
            shape,
            width,
            height,
            fill: None,
            stroke: None,
        }
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn shape(&self) -> ArrowheadShape {
        self.shape
    }

    pub fn width(&self) -> Length {
        self.width
    }

    pub fn height(&self) -> Length {
        self.height
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }
}

// =============================================================================
// Text
// =============================================================================

/// How the text of a node is encoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFormat {
    #[default]
    Plain,
    /// Markup with paragraph and line-break tags
    Xml,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorzAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Font face, size and style bits (bold = 1, italic = 2, underline = 4, strikeout = 8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    name: String,
    em_size: Length,
    #[serde(default)]
    style: u8,
}

impl FontStyle {
    pub fn new(name: impl Into<String>, em_size: Length) -> Self {
        Self {
            name: name.into(),
            em_size,
            style: 0,
        }
    }

    pub fn with_style_bits(mut self, style: u8) -> Self {
        self.style = style;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn em_size(&self) -> Length {
        self.em_size
    }

    pub fn style_bits(&self) -> u8 {
        self.style
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StringFormat {
    #[serde(default)]
    pub horizontal: HorzAlign,
    #[serde(default)]
    pub vertical: VertAlign,
}

/// Margins, expressed in the unit of the lengths they are combined with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    format: TextFormat,
    #[serde(default)]
    font: Option<FontStyle>,
    #[serde(default)]
    fill: Option<FillStyle>,
    #[serde(default)]
    string_format: Option<StringFormat>,
    #[serde(default)]
    offset_x: Length,
    #[serde(default)]
    offset_y: Length,
    #[serde(default)]
    backplane_padding: Option<Margins>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_string_format(mut self, string_format: StringFormat) -> Self {
        self.string_format = Some(string_format);
        self
    }

    /// Sets the text offset relative to the text block's natural position.
    pub fn with_offset(mut self, offset_x: Length, offset_y: Length) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_backplane_padding(mut self, padding: Margins) -> Self {
        self.backplane_padding = Some(padding);
        self
    }

    pub fn format(&self) -> TextFormat {
        self.format
    }

    pub fn font(&self) -> Option<&FontStyle> {
        self.font.as_ref()
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }

    pub fn string_format(&self) -> Option<StringFormat> {
        self.string_format
    }

    pub fn offset_x(&self) -> Length {
        self.offset_x
    }

    pub fn offset_y(&self) -> Length {
        self.offset_y
    }

    pub fn backplane_padding(&self) -> Option<Margins> {
        self.backplane_padding
    }
}

// =============================================================================
// Interactivity
// =============================================================================

/// Mouse cursor shown while hovering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorType {
    Default,
    Alias,
    AppStarting,
    Arrow,
    Cell,
    Copy,
    Cross,
    Custom,
    Hand,
    Help,
    HSplit,
    IBeam,
    No,
    NoDrop,
    #[serde(rename = "no_move_2d")]
    NoMove2D,
    NoMoveHoriz,
    NoMoveVert,
    PanEast,
    #[serde(rename = "pan_ne")]
    PanNE,
    PanNorth,
    #[serde(rename = "pan_nw")]
    PanNW,
    #[serde(rename = "pan_se")]
    PanSE,
    PanSouth,
    #[serde(rename = "pan_sw")]
    PanSW,
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
    VText,
    WaitCursor,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractivityStyle {
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub cursor: Option<CursorType>,
}

// =============================================================================
// Style sheet
// =============================================================================

/// The optional style attributes a node or document defines.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    fill: Option<FillStyle>,
    #[serde(default)]
    stroke: Option<StrokeStyle>,
    #[serde(default)]
    start_arrowhead: Option<ArrowheadStyle>,
    #[serde(default)]
    end_arrowhead: Option<ArrowheadStyle>,
    #[serde(default)]
    text: Option<TextStyle>,
    #[serde(default)]
    interactivity: Option<InteractivityStyle>,
}

impl StyleSheet {
    /// An empty sheet that defines nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// The sheet a freshly created drawing document carries.
    ///
    /// White fill, one-pixel black solid stroke, no arrowheads and a 9pt
    /// centered plain text style.
    pub fn document_defaults() -> Self {
        let no_arrowhead =
            ArrowheadStyle::new(ArrowheadShape::None, Length::pixels(5.0), Length::pixels(5.0));
        Self {
            fill: Some(FillStyle::color(Color::from_argb(0xFFFFFFFF))),
            stroke: Some(StrokeStyle::new(
                Color::from_argb(0xFF000000),
                Length::pixels(1.0),
            )),
            start_arrowhead: Some(no_arrowhead.clone()),
            end_arrowhead: Some(no_arrowhead),
            text: Some(
                TextStyle::new()
                    .with_font(FontStyle::new("Arial", Length::points(9.0)))
                    .with_fill(FillStyle::color(Color::from_argb(0xFF000000)))
                    .with_string_format(StringFormat::default()),
            ),
            interactivity: None,
        }
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_start_arrowhead(mut self, arrowhead: ArrowheadStyle) -> Self {
        self.start_arrowhead = Some(arrowhead);
        self
    }

    pub fn with_end_arrowhead(mut self, arrowhead: ArrowheadStyle) -> Self {
        self.end_arrowhead = Some(arrowhead);
        self
    }

    pub fn with_text(mut self, text: TextStyle) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_interactivity(mut self, interactivity: InteractivityStyle) -> Self {
        self.interactivity = Some(interactivity);
        self
    }

    pub fn fill(&self) -> Option<&FillStyle> {
        self.fill.as_ref()
    }

    pub fn stroke(&self) -> Option<&StrokeStyle> {
        self.stroke.as_ref()
    }

    pub fn start_arrowhead(&self) -> Option<&ArrowheadStyle> {
        self.start_arrowhead.as_ref()
    }

    pub fn end_arrowhead(&self) -> Option<&ArrowheadStyle> {
        self.end_arrowhead.as_ref()
    }

    pub fn text(&self) -> Option<&TextStyle> {
        self.text.as_ref()
    }

    pub fn interactivity(&self) -> Option<&InteractivityStyle> {
        self.interactivity.as_ref()
    }
}
