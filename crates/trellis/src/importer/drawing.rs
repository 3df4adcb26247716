//! Drawing conversion.

use log::{debug, info};

use trellis_core::{
    source::{Drawing, Layer, SourceNode},
    target::{DrawingDocument, Page},
};

use crate::{
    config::ConvertConfig,
    error::{Diagnostic, TrellisError},
    importer::{Conversion, Destination, Session},
    styles::fill::translate_fill,
};

/// Converts a drawing into a single-page target drawing.
///
/// Hidden layers are skipped unless the configuration includes them. Their
/// nodes are never materialized, so connectors attached to them stay unglued.
///
/// # Errors
///
/// Returns an error when the source tree is structurally broken: a node id used
/// twice, a path whose points and codes disagree, or a placement that cannot be
/// inverted.
///
/// # Examples
///
/// ```
/// # use trellis::{config::ConvertConfig, importer::drawing::import_drawing};
/// # use trellis_core::geometry::Rect;
/// # use trellis_core::source::Drawing;
/// let drawing = Drawing::new(Rect::new(0.0, 0.0, 800.0, 600.0));
/// let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();
/// assert_eq!(conversion.document.page().bounds().width(), 800.0);
/// assert!(conversion.diagnostics.is_empty());
/// ```
pub fn import_drawing(
    drawing: &Drawing,
    config: &ConvertConfig,
) -> Result<Conversion<DrawingDocument>, TrellisError> {
    let mut session = Session::new(
        config,
        drawing.style(),
        drawing.resolution(),
        Destination::Page,
    );
    let mut page = Page::new(drawing.bounds());

    if let Some(background) = drawing.background() {
        match translate_fill(background, &session.styles) {
            Ok(fill) => page.set_background(Some(fill)),
            Err(err) => session.diagnostics.emit(
                Diagnostic::warning(format!("page background dropped: {err}"))
                    .with_code(err.code()),
            ),
        }
    }

    let layers: Vec<&Layer> = drawing
        .layers()
        .iter()
        .filter(|layer| layer.is_visible() || config.include_hidden_layers())
        .collect();
    info!(
        layers = layers.len(),
        skipped = drawing.layers().len() - layers.len();
        "Converting drawing"
    );

    let mut top_level: Vec<(&SourceNode, _)> = Vec::new();
    for &layer in &layers {
        debug!(layer = layer.name(), nodes = layer.nodes().len(); "Materializing layer");
        for node in layer.nodes() {
            if let Some(handle) = session.materialize_top_level(node)? {
                page.add(handle);
                top_level.push((node, handle));
            }
        }
    }

    let chain = session.root_chain();
    for &(node, handle) in &top_level {
        session.post_process(node, handle, &chain, None)?;
    }

    session.connect(
        layers
            .iter()
            .copied()
            .flat_map(Layer::nodes)
            .flat_map(SourceNode::descendants),
    );

    let (items, diagnostics) = session.finish();
    info!(items = items.len(), diagnostics = diagnostics.len(); "Drawing converted");
    Ok(Conversion {
        document: DrawingDocument::from_parts(items, page),
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        color::Color,
        geometry::{Matrix, Point, Rect},
        identifier::NodeId,
        source::{FillStyle, Link, Model, ShapeDimension, SourceNodeKind, StyleSheet},
        target::{Fill, Glue},
    };

    use super::*;

    fn box_node(x: f64, y: f64) -> SourceNode {
        SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Model(Model::shape(ShapeDimension::TwoD)),
        )
        .with_model_bounds(Rect::new(0.0, 0.0, 40.0, 20.0))
        .with_scene_transform(Matrix::translation(x, y))
    }

    #[test]
    fn test_page_bounds_and_background() {
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 500.0, 400.0))
            .with_background(FillStyle::color(Color::from_argb(0xFFEEEEEE)));
        let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();

        let page = conversion.document.page();
        assert_eq!(page.bounds(), Rect::new(0.0, 0.0, 500.0, 400.0));
        assert_eq!(
            page.background(),
            Some(&Fill::Color {
                color: Color::from_argb(0xFFEEEEEE)
            })
        );
    }

    #[test]
    fn test_hidden_layers_skipped_by_default() {
        let hidden_box = box_node(0.0, 0.0);
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_layer(Layer::new("visible").with_node(box_node(10.0, 10.0)))
            .with_layer(Layer::new("hidden").hidden().with_node(hidden_box));

        let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();
        assert_eq!(conversion.document.page().items().len(), 1);

        let config = ConvertConfig::default().with_include_hidden_layers(true);
        let conversion = import_drawing(&drawing, &config).unwrap();
        assert_eq!(conversion.document.page().items().len(), 2);
    }

    #[test]
    fn test_top_level_items_tagged() {
        let node = box_node(0.0, 0.0).with_name("Server").with_tag("infra");
        let id = node.id();
        let drawing =
            Drawing::new(Rect::new(0.0, 0.0, 100.0, 100.0)).with_layer(Layer::new("l").with_node(node));

        let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();
        let document = conversion.document;
        let item = &document.items()[document.page().items()[0]];

        assert_eq!(item.name(), "Server");
        assert_eq!(item.user_id(), Some(id));
        assert_eq!(item.tag(), Some("infra"));
    }

    #[test]
    fn test_styles_composed_from_drawing_sheet() {
        let red = Color::from_argb(0xFFFF0000);
        let node = box_node(0.0, 0.0).with_style(StyleSheet::new().with_fill(FillStyle::color(red)));
        let plain = box_node(50.0, 0.0);
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_style(StyleSheet::document_defaults())
            .with_layer(Layer::new("l").with_node(node).with_node(plain));

        let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();
        let document = conversion.document;
        let fills: Vec<Option<&Fill>> = document
            .page()
            .items()
            .iter()
            .map(|&h| document.items()[h].shape().geometry().and_then(|g| g.fill()))
            .collect();

        assert_eq!(fills[0], Some(&Fill::Color { color: red }));
        assert_eq!(
            fills[1],
            Some(&Fill::Color {
                color: Color::from_argb(0xFFFFFFFF)
            })
        );
    }

    #[test]
    fn test_connector_glued_across_layers() {
        let target = box_node(100.0, 100.0);
        let line = SourceNode::new(NodeId::random(), SourceNodeKind::Model(Model::Line))
            .with_link(
                Link::new(Point::new(0.0, 0.0), Point::new(100.0, 110.0))
                    .with_to(target.id(), None),
            );
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 300.0, 300.0))
            .with_layer(Layer::new("connectors").with_node(line))
            .with_layer(Layer::new("shapes").with_node(target.clone()));

        let conversion = import_drawing(&drawing, &ConvertConfig::default()).unwrap();
        let document = conversion.document;
        let line_item = &document.items()[document.page().items()[0]];
        let target_handle = document.page().items()[1];

        assert_eq!(line_item.shape().begin_glue(), None);
        assert_eq!(
            line_item.shape().end_glue(),
            Some(Glue::Shape {
                shape: target_handle
            })
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let node = box_node(0.0, 0.0);
        let drawing = Drawing::new(Rect::new(0.0, 0.0, 100.0, 100.0))
            .with_layer(Layer::new("l").with_node(node.clone()).with_node(node));

        let err = import_drawing(&drawing, &ConvertConfig::default()).unwrap_err();
        assert!(matches!(err, TrellisError::DuplicateNode(_)));
    }
}
