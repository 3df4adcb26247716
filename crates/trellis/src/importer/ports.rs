//! Connection port translation.

use log::debug;

use trellis_core::{
    identifier::{Id, NodeId},
    source::{PortKind, PortType, SourcePort},
    target::{GlueMode, Port, PortSet},
};

use crate::error::{Diagnostic, DiagnosticCode, DiagnosticCollector};

/// Translates the ports of a source node.
///
/// Bounds and rotated-bounds ports sit at `0.5 + percent / 100` of the shape box
/// on each axis. Ports of any other kind are left out with a note, as are ports
/// whose name repeats an earlier port of the same node.
pub fn translate_ports(
    node: NodeId,
    ports: &[SourcePort],
    diagnostics: &mut DiagnosticCollector,
) -> PortSet {
    let mut translated = PortSet::new();

    for source in ports {
        let Some(port) = translate_port(source) else {
            diagnostics.emit(
                Diagnostic::note(format!(
                    "port `{}` of kind {:?} has no counterpart and was left out",
                    source.name(),
                    source.kind()
                ))
                .with_code(DiagnosticCode::W200)
                .with_node(node),
            );
            continue;
        };

        if !translated.add(port) {
            diagnostics.emit(
                Diagnostic::warning(format!(
                    "port name `{}` is used more than once; keeping the first",
                    source.name()
                ))
                .with_code(DiagnosticCode::W201)
                .with_node(node),
            );
        }
    }

    debug!(node:? = node, count = translated.len(); "Translated ports");
    translated
}

/// Translates a single port, or returns `None` for kinds without a counterpart.
///
/// # Examples
///
/// ```
/// # use trellis::importer::ports::translate_port;
/// # use trellis_core::source::{PortKind, SourcePort};
/// let port = translate_port(&SourcePort::new("Right", PortKind::Bounds, 50.0, 0.0)).unwrap();
/// assert_eq!((port.x(), port.y()), (1.0, 0.5));
///
/// assert!(translate_port(&SourcePort::new("P", PortKind::Dynamic, 0.0, 0.0)).is_none());
/// ```
pub fn translate_port(source: &SourcePort) -> Option<Port> {
    match source.kind() {
        PortKind::Bounds | PortKind::RotatedBounds => {}
        PortKind::Point | PortKind::Dynamic | PortKind::Logical => return None,
    }

    let port = Port::relative(
        Id::new(source.name()),
        0.5 + source.percent_x() / 100.0,
        0.5 + source.percent_y() / 100.0,
        glue_mode(source.port_type()),
    );
    Some(match source.direction() {
        Some(direction) => port.with_direction(direction),
        None => port,
    })
}

fn glue_mode(port_type: PortType) -> GlueMode {
    match port_type {
        PortType::Inward => GlueMode::Inward,
        PortType::Outward => GlueMode::Outward,
        PortType::InwardAndOutward => GlueMode::InwardAndOutward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;

    #[test]
    fn test_bounds_ports_positions() {
        let mut diagnostics = DiagnosticCollector::new();
        let ports = translate_ports(
            NodeId::random(),
            &[
                SourcePort::new("Top", PortKind::Bounds, 0.0, -50.0).with_direction(270.0),
                SourcePort::new("Corner", PortKind::RotatedBounds, -50.0, 50.0)
                    .with_port_type(PortType::Outward),
            ],
            &mut diagnostics,
        );

        assert_eq!(ports.len(), 2);
        let top = ports.get(Id::new("Top")).unwrap();
        assert_eq!((top.x(), top.y()), (0.5, 0.0));
        assert_eq!(top.direction(), Some(270.0));
        assert_eq!(top.glue_mode(), GlueMode::InwardAndOutward);
        assert!(top.is_relative());

        let corner = ports.get(Id::new("Corner")).unwrap();
        assert_eq!((corner.x(), corner.y()), (0.0, 1.0));
        assert_eq!(corner.direction(), None);
        assert_eq!(corner.glue_mode(), GlueMode::Outward);

        assert!(diagnostics.finish().is_empty());
    }

    #[test]
    fn test_unsupported_kinds_rejected_with_note() {
        let node = NodeId::random();
        let mut diagnostics = DiagnosticCollector::new();
        let ports = translate_ports(
            node,
            &[
                SourcePort::new("Center", PortKind::Point, 0.0, 0.0),
                SourcePort::new("Auto", PortKind::Dynamic, 0.0, 0.0),
                SourcePort::new("Left", PortKind::Bounds, -50.0, 0.0),
            ],
            &mut diagnostics,
        );

        assert_eq!(ports.len(), 1);
        let diagnostics = diagnostics.finish();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.severity() == Severity::Note));
        assert!(diagnostics.iter().all(|d| d.code() == Some(DiagnosticCode::W200)));
        assert_eq!(diagnostics[0].node(), Some(node));
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut diagnostics = DiagnosticCollector::new();
        let ports = translate_ports(
            NodeId::random(),
            &[
                SourcePort::new("Port", PortKind::Bounds, -50.0, 0.0),
                SourcePort::new("Port", PortKind::Bounds, 50.0, 0.0),
            ],
            &mut diagnostics,
        );

        assert_eq!(ports.len(), 1);
        assert_eq!(ports.get(Id::new("Port")).unwrap().x(), 0.0);
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
