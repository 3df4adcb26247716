//! Creation of target items from source nodes.

use log::{debug, trace};

use trellis_core::{
    source::{Model, RoutingType, SourceNode, SourceNodeKind},
    target::{ConnectorShape, Field, Formula, ItemHandle, Route, Routing, Shape, TargetItem},
};

use crate::{
    error::{Diagnostic, DiagnosticCode, TrellisError},
    importer::{Session, protections::apply_protections, text::import_text},
    styles::{StyleChain, interactivity::apply_interactivity},
};

impl<'s> Session<'s> {
    /// Creates the item for `node`, including the items of its children, which
    /// are attached to it and recorded in the identity map.
    ///
    /// Returns `None` for nodes the target model cannot represent.
    pub(super) fn create_item(
        &mut self,
        node: &'s SourceNode,
        parent_chain: &StyleChain<'s>,
    ) -> Result<Option<ItemHandle>, TrellisError> {
        let item = match node.kind() {
            SourceNodeKind::Group { .. } | SourceNodeKind::CompositeShape { .. } => {
                TargetItem::group()
            }
            SourceNodeKind::Model(model) => match self.create_model_item(node, model) {
                Some(item) => item,
                None => return Ok(None),
            },
            SourceNodeKind::Foreign { type_name } => {
                self.diagnostics.emit(
                    Diagnostic::warning(format!("`{type_name}` nodes have no counterpart"))
                        .with_code(DiagnosticCode::W100)
                        .with_node(node.id()),
                );
                return Ok(None);
            }
        };

        let chain = parent_chain.push(node.style());
        let handle = self.items.insert(item);
        self.import_shape_details(node, handle, &chain);

        for child in node.children() {
            if let Some(child_handle) = self.create_item(child, &chain)? {
                self.items.attach(handle, child_handle)?;
                self.identity.insert(child.id(), child_handle)?;
            }
        }

        trace!(node:? = node.id(), handle:? = handle; "Created item");
        Ok(Some(handle))
    }

    fn create_model_item(&mut self, node: &SourceNode, model: &Model) -> Option<TargetItem> {
        let shape = match model {
            Model::Line => Shape::new_connector(ConnectorShape::Line),
            Model::Step2Connector { first_vertical } => Shape::new_connector(if *first_vertical {
                ConnectorShape::TopBottomToSide
            } else {
                ConnectorShape::SideToTopBottom
            }),
            Model::Step3Connector {
                first_vertical,
                middle_percent,
            } => step3_connector(*first_vertical, *middle_percent),
            Model::RoutableConnector { routing, points } => {
                let routing = match routing {
                    RoutingType::DynamicHV => Routing::Orthogonal,
                    RoutingType::DynamicPolyline => Routing::Polyline,
                    RoutingType::DynamicCurve => {
                        self.diagnostics.emit(
                            Diagnostic::warning("curved routing has no counterpart")
                                .with_code(DiagnosticCode::W101)
                                .with_node(node.id())
                                .with_help("reroute the connector as orthogonal or polyline"),
                        );
                        return None;
                    }
                };
                return Some(TargetItem::routable_connector(Route {
                    routing,
                    points: points.clone(),
                }));
            }
            Model::Shape { .. } | Model::PathPrimitive { .. } | Model::TextPrimitive => {
                if model.is_one_d() {
                    Shape::new_1d_vector()
                } else {
                    Shape::new_2d()
                }
            }
        };
        Some(TargetItem::from_shape(shape))
    }

    /// Imports text, interactivity and protections of a freshly created item.
    fn import_shape_details(
        &mut self,
        node: &SourceNode,
        handle: ItemHandle,
        chain: &StyleChain<'s>,
    ) {
        let item = &mut self.items[handle];
        import_text(
            item.shape_mut(),
            node.id(),
            node.text(),
            chain.text(),
            &self.styles,
            &mut self.diagnostics,
        );
        if let Some(interactivity) = chain.interactivity() {
            apply_interactivity(item.shape_mut(), interactivity);
        }
        apply_protections(item, node.protection());
    }
}

/// A three-segment connector. A custom middle-segment position moves the middle
/// control along the outer segments' axis; without one the control stays
/// centered.
fn step3_connector(first_vertical: bool, middle_percent: Option<f64>) -> Shape {
    let mut shape = Shape::new_connector(if first_vertical {
        ConnectorShape::BottomToTop1
    } else {
        ConnectorShape::SideToSide1
    });

    if let Some(percent) = middle_percent {
        debug!(first_vertical, percent; "Custom middle segment");
        let position = Field::Derived(Formula::WidthFactor(percent / 100.0));
        if let Some(control) = shape.controls_mut().first_mut() {
            if first_vertical {
                control.y = position;
            } else {
                control.x = position;
            }
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        geometry::Point,
        identifier::NodeId,
        source::{
            CursorType, InteractivityStyle, Protection, ShapeDimension, StyleSheet, TextStyle,
        },
        target::{ItemArena, ItemKind, PredefinedCursor, ShapeType},
    };

    use super::*;
    use crate::{
        config::ConvertConfig,
        importer::{Destination, IdentityMap},
    };

    fn leaf(model: Model) -> SourceNode {
        SourceNode::new(NodeId::random(), SourceNodeKind::Model(model))
    }

    struct Created {
        items: ItemArena,
        identity: IdentityMap,
        diagnostics: Vec<Diagnostic>,
        handle: Option<ItemHandle>,
    }

    fn create(node: &SourceNode) -> Created {
        let root = StyleSheet::document_defaults();
        let mut session = Session::new(&ConvertConfig::default(), &root, 96.0, Destination::Page);
        let chain = StyleChain::new(&root);
        let handle = session.create_item(node, &chain).unwrap();
        Created {
            items: session.items,
            identity: session.identity,
            diagnostics: session.diagnostics.finish(),
            handle,
        }
    }

    #[test]
    fn test_2d_and_1d_shapes() {
        let created = create(&leaf(Model::shape(ShapeDimension::TwoD)));
        assert_eq!(
            created.items[created.handle.unwrap()].shape().shape_type(),
            ShapeType::Shape2D
        );

        let created = create(&leaf(Model::shape(ShapeDimension::OneD)));
        let shape = created.items[created.handle.unwrap()].shape();
        assert!(shape.is_1d());
        assert!(shape.width_field().is_derived());
        assert!(shape.connector().is_none());
    }

    #[test]
    fn test_step2_connector_variants() {
        let created = create(&leaf(Model::Step2Connector {
            first_vertical: true,
        }));
        assert_eq!(
            created.items[created.handle.unwrap()].shape().connector(),
            Some(ConnectorShape::TopBottomToSide)
        );

        let created = create(&leaf(Model::Step2Connector {
            first_vertical: false,
        }));
        assert_eq!(
            created.items[created.handle.unwrap()].shape().connector(),
            Some(ConnectorShape::SideToTopBottom)
        );
    }

    #[test]
    fn test_step3_custom_percent_binds_control() {
        let vertical = step3_connector(true, Some(30.0));
        assert_eq!(vertical.connector(), Some(ConnectorShape::BottomToTop1));
        assert_eq!(
            vertical.controls()[0].y,
            Field::Derived(Formula::WidthFactor(0.3))
        );
        assert_eq!(
            vertical.controls()[0].x,
            Field::Derived(Formula::WidthFactor(0.5))
        );

        let horizontal = step3_connector(false, Some(75.0));
        assert_eq!(horizontal.connector(), Some(ConnectorShape::SideToSide1));
        assert_eq!(
            horizontal.controls()[0].x,
            Field::Derived(Formula::WidthFactor(0.75))
        );
    }

    #[test]
    fn test_step3_without_percent_keeps_default_control() {
        let shape = step3_connector(true, None);
        assert_eq!(
            shape.controls(),
            Shape::new_connector(ConnectorShape::BottomToTop1).controls()
        );
    }

    #[test]
    fn test_routable_connector_routing() {
        let points = vec![Point::new(0.0, 0.0), Point::new(0.0, 50.0), Point::new(80.0, 50.0)];
        let created = create(&leaf(Model::RoutableConnector {
            routing: RoutingType::DynamicHV,
            points: points.clone(),
        }));
        let item = &created.items[created.handle.unwrap()];
        assert_eq!(
            item.kind(),
            &ItemKind::RoutableConnector {
                route: Route {
                    routing: Routing::Orthogonal,
                    points,
                }
            }
        );
        assert!(item.shape().is_1d());
    }

    #[test]
    fn test_curved_routing_dropped() {
        let created = create(&leaf(Model::RoutableConnector {
            routing: RoutingType::DynamicCurve,
            points: Vec::new(),
        }));
        assert!(created.handle.is_none());
        assert!(created.items.is_empty());

        let diagnostics = created.diagnostics;
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::W101));
    }

    #[test]
    fn test_foreign_node_dropped() {
        let node = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Foreign {
                type_name: "NTableShape".to_owned(),
            },
        );
        let created = create(&node);
        assert!(created.handle.is_none());
        let diagnostics = created.diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(DiagnosticCode::W100));
        assert_eq!(diagnostics[0].node(), Some(node.id()));
    }

    #[test]
    fn test_group_children_attached_and_mapped() {
        let first = leaf(Model::shape(ShapeDimension::TwoD));
        let second = leaf(Model::Line);
        let foreign = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Foreign {
                type_name: "Custom".to_owned(),
            },
        );
        let group = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::Group {
                children: vec![first.clone(), foreign.clone(), second.clone()],
            },
        );

        let created = create(&group);
        let handle = created.handle.unwrap();

        assert!(created.items[handle].is_group());
        assert_eq!(created.items[handle].children().len(), 2);
        let first_handle = created.identity.get(first.id()).unwrap();
        assert_eq!(created.items[first_handle].parent(), Some(handle));
        assert!(created.identity.get(second.id()).is_some());
        assert_eq!(created.identity.get(foreign.id()), None);
        // The container itself is mapped by its caller
        assert_eq!(created.identity.get(group.id()), None);
    }

    #[test]
    fn test_composite_becomes_group() {
        let composite = SourceNode::new(
            NodeId::random(),
            SourceNodeKind::CompositeShape {
                primitives: vec![leaf(Model::TextPrimitive).with_text("caption")],
            },
        );
        let created = create(&composite);
        let handle = created.handle.unwrap();

        let child = created.items[handle].children()[0];
        assert_eq!(
            created.items[child].shape().text_block().map(|t| t.text()),
            Some("caption")
        );
    }

    #[test]
    fn test_details_imported() {
        let node = leaf(Model::shape(ShapeDimension::TwoD))
            .with_text("Label")
            .with_style(
                StyleSheet::new()
                    .with_text(TextStyle::new())
                    .with_interactivity(InteractivityStyle {
                        tooltip: Some("Tip".to_owned()),
                        cursor: Some(CursorType::Hand),
                    }),
            )
            .with_protection(Protection {
                move_x: true,
                ..Protection::default()
            });

        let created = create(&node);
        let shape = created.items[created.handle.unwrap()].shape();

        assert_eq!(shape.text_block().unwrap().text(), "Label");
        assert_eq!(shape.tooltip(), Some("Tip"));
        assert_eq!(shape.cursor(), Some(PredefinedCursor::Hand));
        assert!(!shape.permissions().allow_move_x);
        assert!(shape.permissions().allow_move_y);
    }
}
