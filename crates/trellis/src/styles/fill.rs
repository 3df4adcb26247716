//! Fill translation.

use std::path::Path;

use log::debug;

use trellis_core::{
    source::{FillStyle, GradientStyle, GradientVariant, MapLayout},
    target::{self, Fill, HorizontalAlignment, TextureMapping, VerticalAlignment},
};

use crate::styles::{StyleContext, StyleError};

/// Translates a source fill.
///
/// # Errors
///
/// Returns [`StyleError::UnsupportedFill`] for advanced gradients and the
/// image errors of [`StyleError`] when an image fill cannot be loaded. Callers
/// treat both as an absent fill.
pub fn translate_fill(fill: &FillStyle, ctx: &StyleContext) -> Result<Fill, StyleError> {
    match fill {
        FillStyle::Color { color } => Ok(Fill::Color { color: *color }),
        FillStyle::Gradient {
            style,
            variant,
            begin,
            end,
        } => Ok(Fill::StockGradient {
            style: gradient_style(*style),
            variant: gradient_variant(*style, *variant),
            begin: *begin,
            end: *end,
        }),
        FillStyle::Image { file_name, bitmap } => {
            image_fill(file_name.as_deref(), bitmap.as_deref(), ctx)
        }
        FillStyle::Hatch {
            style,
            foreground,
            background,
            mapping,
        } => Ok(Fill::Hatch {
            style: style.0,
            foreground: *foreground,
            background: *background,
            mapping: mapping.map(texture_mapping),
        }),
        FillStyle::AdvancedGradient => Err(StyleError::UnsupportedFill("advanced gradient")),
    }
}

fn image_fill(
    file_name: Option<&str>,
    bitmap: Option<&[u8]>,
    ctx: &StyleContext,
) -> Result<Fill, StyleError> {
    if let Some(file_name) = file_name.filter(|name| !name.is_empty()) {
        let path = ctx.resolve_image_path(Path::new(file_name))?;
        debug!(path:? = path; "Embedding image fill");
        let data = std::fs::read(&path).map_err(|source| StyleError::ImageLoad { path, source })?;
        return Ok(Fill::Image { data });
    }

    match bitmap {
        Some(bitmap) => Ok(Fill::Image {
            data: bitmap.to_vec(),
        }),
        None => Err(StyleError::MissingImage),
    }
}

fn gradient_style(style: GradientStyle) -> target::GradientStyle {
    match style {
        GradientStyle::Horizontal | GradientStyle::StartToEnd => target::GradientStyle::Horizontal,
        GradientStyle::Vertical => target::GradientStyle::Vertical,
        GradientStyle::DiagonalUp => target::GradientStyle::DiagonalUp,
        GradientStyle::DiagonalDown => target::GradientStyle::DiagonalDown,
        GradientStyle::FromCorner => target::GradientStyle::FromCorner,
        GradientStyle::FromCenter => target::GradientStyle::FromCenter,
    }
}

/// The first two variants of a center gradient run in opposite directions in
/// the two models.
fn gradient_variant(style: GradientStyle, variant: GradientVariant) -> target::GradientVariant {
    let from_center = style == GradientStyle::FromCenter;
    match variant {
        GradientVariant::Variant1 if from_center => target::GradientVariant::Variant2,
        GradientVariant::Variant1 => target::GradientVariant::Variant1,
        GradientVariant::Variant2 if from_center => target::GradientVariant::Variant1,
        GradientVariant::Variant2 => target::GradientVariant::Variant2,
        GradientVariant::Variant3 => target::GradientVariant::Variant3,
        GradientVariant::Variant4 => target::GradientVariant::Variant4,
    }
}

fn texture_mapping(layout: MapLayout) -> TextureMapping {
    match layout {
        MapLayout::Stretched => TextureMapping::Stretch,
        MapLayout::Fitted | MapLayout::CropFitted => TextureMapping::FitAndAlign,
        MapLayout::Centered => TextureMapping::Align {
            horizontal: HorizontalAlignment::Center,
            vertical: VerticalAlignment::Center,
        },
        MapLayout::Tiled => TextureMapping::Tile,
        MapLayout::StretchedToWidth => TextureMapping::StretchXAlignY,
        MapLayout::StretchedToHeight => TextureMapping::StretchYAlignX,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use trellis_core::{color::Color, source::HatchStyle};

    use super::*;

    fn ctx() -> StyleContext {
        StyleContext::new(96.0)
    }

    #[test]
    fn test_color_fill() {
        let red = Color::from_argb(0xFFFF0000);
        let fill = translate_fill(&FillStyle::color(red), &ctx()).unwrap();
        assert_eq!(fill, Fill::Color { color: red });
    }

    #[test]
    fn test_gradient_variant_swap_only_from_center() {
        let gradient = |style, variant| FillStyle::Gradient {
            style,
            variant,
            begin: Color::default(),
            end: Color::default(),
        };

        let Fill::StockGradient { style, variant, .. } = translate_fill(
            &gradient(GradientStyle::FromCenter, GradientVariant::Variant1),
            &ctx(),
        )
        .unwrap() else {
            panic!("expected a stock gradient");
        };
        assert_eq!(style, target::GradientStyle::FromCenter);
        assert_eq!(variant, target::GradientVariant::Variant2);

        let Fill::StockGradient { style, variant, .. } = translate_fill(
            &gradient(GradientStyle::StartToEnd, GradientVariant::Variant1),
            &ctx(),
        )
        .unwrap() else {
            panic!("expected a stock gradient");
        };
        assert_eq!(style, target::GradientStyle::Horizontal);
        assert_eq!(variant, target::GradientVariant::Variant1);
    }

    #[test]
    fn test_hatch_mapping() {
        let fill = FillStyle::Hatch {
            style: HatchStyle(7),
            foreground: Color::default(),
            background: Color::from_argb(0xFFFFFFFF),
            mapping: Some(MapLayout::Centered),
        };
        let Fill::Hatch { style, mapping, .. } = translate_fill(&fill, &ctx()).unwrap() else {
            panic!("expected a hatch");
        };
        assert_eq!(style, 7);
        assert_eq!(
            mapping,
            Some(TextureMapping::Align {
                horizontal: HorizontalAlignment::Center,
                vertical: VerticalAlignment::Center,
            })
        );
    }

    #[test]
    fn test_advanced_gradient_unsupported() {
        assert!(matches!(
            translate_fill(&FillStyle::AdvancedGradient, &ctx()),
            Err(StyleError::UnsupportedFill(_))
        ));
    }

    #[test]
    fn test_image_from_relative_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("tile.png")).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let ctx = StyleContext::new(96.0).with_image_base_dir(dir.path());
        let fill = FillStyle::Image {
            file_name: Some("tile.png".to_owned()),
            bitmap: Some(vec![0]),
        };
        assert_eq!(
            translate_fill(&fill, &ctx).unwrap(),
            Fill::Image {
                data: vec![0x89, b'P', b'N', b'G']
            }
        );
    }

    #[test]
    fn test_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = StyleContext::new(96.0).with_image_base_dir(dir.path());
        let fill = FillStyle::Image {
            file_name: Some("absent.png".to_owned()),
            bitmap: None,
        };
        assert!(matches!(
            translate_fill(&fill, &ctx),
            Err(StyleError::ImageLoad { .. })
        ));
    }

    #[test]
    fn test_image_from_bitmap() {
        let fill = FillStyle::Image {
            file_name: Some(String::new()),
            bitmap: Some(vec![1, 2]),
        };
        assert_eq!(
            translate_fill(&fill, &ctx()).unwrap(),
            Fill::Image { data: vec![1, 2] }
        );

        let empty = FillStyle::Image {
            file_name: None,
            bitmap: None,
        };
        assert!(matches!(
            translate_fill(&empty, &ctx()),
            Err(StyleError::MissingImage)
        ));
    }
}
