//! Text style translation.

use trellis_core::{
    geometry::{Point, Size},
    source::{HorzAlign, TextStyle, VertAlign},
    target::{FontStyle, TextAlign, TextBlock, VerticalAlignment},
};

use crate::styles::{StyleContext, StyleError, fill::translate_fill, units::to_points};

/// Applies font, text fill and alignment to a text block.
///
/// Translated text always follows the shape's rotation, so `keep_upward` is
/// cleared.
///
/// # Errors
///
/// Returns the [`StyleError`] of a text fill that could not be translated. Every
/// other attribute has been applied by then and the block is left without fill.
pub fn apply_text_style(
    block: &mut TextBlock,
    style: &TextStyle,
    ctx: &StyleContext,
) -> Result<(), StyleError> {
    if let Some(font) = style.font() {
        block.set_font(
            font.name(),
            to_points(font.em_size(), ctx.dpi()),
            FontStyle::from_bits(font.style_bits()),
        );
    }

    if let Some(string_format) = style.string_format() {
        block.set_alignment(
            horizontal_alignment(string_format.horizontal),
            vertical_alignment(string_format.vertical),
        );
    }

    block.set_keep_upward(false);

    if let Some(fill) = style.fill() {
        match translate_fill(fill, ctx) {
            Ok(fill) => block.set_fill(Some(fill)),
            Err(err) => {
                block.set_fill(None);
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Moves the text block's location pin by the style's text offset.
///
/// The offset, minus the backplane padding on both sides of the axis, is
/// measured at the document `resolution` and expressed relative to the text
/// block size. Axes with no offset or a zero-sized block are left alone.
pub fn apply_text_position(block: &mut TextBlock, style: &TextStyle, size: Size, resolution: f64) {
    let padding = style.backplane_padding().unwrap_or_default();
    let mut loc_pin = block.loc_pin();

    let offset_x = style.offset_x();
    if offset_x.value() != 0.0 && size.width() != 0.0 {
        let factor = offset_x.unit().pixels_per_unit(resolution);
        let offset = (offset_x.value() - padding.left - padding.right) * factor;
        loc_pin = Point::new(loc_pin.x() - offset / size.width(), loc_pin.y());
    }

    let offset_y = style.offset_y();
    if offset_y.value() != 0.0 && size.height() != 0.0 {
        let factor = offset_y.unit().pixels_per_unit(resolution);
        let offset = (offset_y.value() - padding.top - padding.bottom) * factor;
        loc_pin = Point::new(loc_pin.x(), loc_pin.y() - offset / size.height());
    }

    block.set_loc_pin(loc_pin);
}

fn horizontal_alignment(align: HorzAlign) -> TextAlign {
    match align {
        HorzAlign::Left => TextAlign::Left,
        HorzAlign::Center => TextAlign::Center,
        HorzAlign::Right => TextAlign::Right,
    }
}

fn vertical_alignment(align: VertAlign) -> VerticalAlignment {
    match align {
        VertAlign::Top => VerticalAlignment::Top,
        VertAlign::Center => VerticalAlignment::Center,
        VertAlign::Bottom => VerticalAlignment::Bottom,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trellis_core::{
        color::Color,
        source::{FillStyle, FontStyle as SourceFont, Length, Margins, MeasurementUnit, StringFormat},
        target::Fill,
    };

    use super::*;

    #[test]
    fn test_font_and_alignment() {
        let style = TextStyle::new()
            .with_font(SourceFont::new("Verdana", Length::pixels(16.0)).with_style_bits(0b11))
            .with_string_format(StringFormat {
                horizontal: HorzAlign::Right,
                vertical: VertAlign::Bottom,
            })
            .with_fill(FillStyle::color(Color::from_argb(0xFF112233)));

        let mut block = TextBlock::new("label");
        apply_text_style(&mut block, &style, &StyleContext::new(96.0)).unwrap();

        assert_eq!(block.font_name(), Some("Verdana"));
        assert_approx_eq!(f64, block.font_size().unwrap(), 12.0);
        assert!(block.font_style().bold && block.font_style().italic);
        assert_eq!(block.horizontal_alignment(), TextAlign::Right);
        assert_eq!(block.vertical_alignment(), VerticalAlignment::Bottom);
        assert!(!block.keep_upward());
        assert_eq!(
            block.fill(),
            Some(&Fill::Color {
                color: Color::from_argb(0xFF112233)
            })
        );
    }

    #[test]
    fn test_failed_fill_keeps_other_attributes() {
        let style = TextStyle::new()
            .with_font(SourceFont::new("Arial", Length::points(10.0)))
            .with_fill(FillStyle::AdvancedGradient);

        let mut block = TextBlock::new("label");
        let result = apply_text_style(&mut block, &style, &StyleContext::new(96.0));

        assert!(result.is_err());
        assert_eq!(block.font_name(), Some("Arial"));
        assert!(block.fill().is_none());
    }

    #[test]
    fn test_position_offset_minus_padding() {
        let style = TextStyle::new()
            .with_offset(Length::pixels(30.0), Length::new(0.5, MeasurementUnit::Inch))
            .with_backplane_padding(Margins {
                left: 5.0,
                top: 0.0,
                right: 5.0,
                bottom: 0.25,
            });

        let mut block = TextBlock::new("label");
        apply_text_position(&mut block, &style, Size::new(100.0, 48.0), 96.0);

        // x: (30 - 10) px over 100 px
        assert_approx_eq!(f64, block.loc_pin().x(), 0.5 - 0.2);
        // y: (0.5 - 0.25) in = 24 px over 48 px
        assert_approx_eq!(f64, block.loc_pin().y(), 0.0);
    }

    #[test]
    fn test_position_ignores_zero_size() {
        let style = TextStyle::new().with_offset(Length::pixels(10.0), Length::pixels(10.0));

        let mut block = TextBlock::new("label");
        apply_text_position(&mut block, &style, Size::new(0.0, 0.0), 96.0);

        assert_eq!(block.loc_pin(), Point::new(0.5, 0.5));
    }
}
