//! Stroke translation.

use trellis_core::{
    source::{LinePattern, StrokeStyle},
    target::{DashStyle, Stroke},
};

use crate::styles::{StyleContext, units::to_device_pixels};

/// Translates a source stroke. Widths become device pixels.
pub fn translate_stroke(stroke: &StrokeStyle, ctx: &StyleContext) -> Stroke {
    let dash_pattern = (stroke.pattern() == LinePattern::Custom)
        .then(|| dash_pattern(stroke.custom_pattern(), stroke.factor()));

    Stroke {
        color: stroke.color(),
        width: to_device_pixels(stroke.width(), ctx.dpi()),
        dash_style: dash_style(stroke.pattern()),
        dash_pattern,
    }
}

fn dash_style(pattern: LinePattern) -> DashStyle {
    match pattern {
        LinePattern::Solid => DashStyle::Solid,
        LinePattern::Dot => DashStyle::Dot,
        LinePattern::Dash => DashStyle::Dash,
        LinePattern::DashDot => DashStyle::DashDot,
        LinePattern::DashDotDot => DashStyle::DashDotDot,
        LinePattern::Custom => DashStyle::Custom,
    }
}

/// Expands a dash bit pattern into alternating dash and gap lengths.
///
/// Bits are read from the least significant one up to the highest set bit; each
/// bit spans `factor` units, zero bits yielding zero-length entries. The result
/// always has an even number of entries.
///
/// # Examples
///
/// ```
/// # use trellis::styles::stroke::dash_pattern;
/// assert_eq!(dash_pattern(0b101, 2), vec![2.0, 0.0, 2.0, 0.0]);
/// assert_eq!(dash_pattern(0b11, 3), vec![3.0, 3.0]);
/// assert!(dash_pattern(0, 4).is_empty());
/// ```
pub fn dash_pattern(bits: u32, factor: u32) -> Vec<f64> {
    let mut pattern = Vec::new();
    let mut remaining = bits;
    while remaining != 0 {
        pattern.push(f64::from(remaining & 1) * f64::from(factor));
        remaining >>= 1;
    }

    if pattern.len() % 2 == 1 {
        if pattern.last() == Some(&0.0) {
            pattern.pop();
        } else {
            pattern.push(0.0);
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use trellis_core::{color::Color, source::Length};

    use super::*;

    #[test]
    fn test_solid_stroke() {
        let stroke = StrokeStyle::new(Color::from_argb(0xFF0000FF), Length::points(1.5));
        let translated = translate_stroke(&stroke, &StyleContext::new(96.0));

        assert_eq!(translated.color, Color::from_argb(0xFF0000FF));
        assert_approx_eq!(f64, translated.width, 2.0);
        assert_eq!(translated.dash_style, DashStyle::Solid);
        assert!(translated.dash_pattern.is_none());
    }

    #[test]
    fn test_custom_pattern() {
        let stroke = StrokeStyle::new(Color::default(), Length::pixels(1.0))
            .with_custom_pattern(0b1101, 1);
        let translated = translate_stroke(&stroke, &StyleContext::new(96.0));

        assert_eq!(translated.dash_style, DashStyle::Custom);
        assert_eq!(translated.dash_pattern, Some(vec![1.0, 0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_zero_factor_drops_trailing_zero() {
        // Three entries, all zero: the trailing zero is removed
        assert_eq!(dash_pattern(0b111, 0), vec![0.0, 0.0]);
    }

    #[test]
    fn test_high_bit_pattern() {
        let pattern = dash_pattern(u32::MAX, 1);
        assert_eq!(pattern.len(), 32);
        assert!(pattern.iter().all(|&v| v == 1.0));
    }
}
