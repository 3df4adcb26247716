//! Conversion of source documents into target documents.
//!
//! A run goes through three passes over the source tree:
//!
//! 1. **Materialize** - every node gets a target item; containers get their
//!    children. Top-level items are attached to the page or library item.
//! 2. **Post-process** - placement, outline, ports, styles and text position
//!    are imported, parents before children.
//! 3. **Connect** - the ends of 1-D shapes are glued to the items their source
//!    ends were attached to.
//!
//! # Organization
//!
//! - [`drawing`] - Drawing conversion
//! - [`library`] - Library conversion
//! - [`geometry`] - Path normalization
//! - [`identity`] - Source node to target item lookup
//! - [`ports`] - Connection port translation
//! - [`protections`] - Editing permissions
//! - [`text`] - Text and markup flattening

pub mod drawing;
pub mod geometry;
pub mod identity;
pub mod library;
pub mod ports;
pub mod protections;
pub mod text;

mod factory;
mod transform;

pub use identity::IdentityMap;

use log::debug;

use trellis_core::{
    identifier::{Id, NodeId},
    source::{Plug, SourceNode, StyleSheet},
    target::{Glue, ItemArena, ItemHandle},
};

use crate::{
    config::ConvertConfig,
    error::{Diagnostic, DiagnosticCollector, TrellisError},
    styles::{
        StyleChain, StyleContext, arrowhead::translate_arrowhead, fill::translate_fill,
        stroke::translate_stroke, text::apply_text_position,
    },
};

/// The converted document together with everything that was lost on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    pub document: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Conversion<T> {
    /// Maps the document, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
        Conversion {
            document: f(self.document),
            diagnostics: self.diagnostics,
        }
    }
}

/// What the converted items end up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Page,
    Library,
}

/// State of one conversion run.
struct Session<'s> {
    items: ItemArena,
    identity: IdentityMap,
    diagnostics: DiagnosticCollector,
    styles: StyleContext,
    root_style: &'s StyleSheet,
    /// Resolution text offsets are measured at
    resolution: f64,
    destination: Destination,
}

impl<'s> Session<'s> {
    fn new(
        config: &ConvertConfig,
        root_style: &'s StyleSheet,
        resolution: f64,
        destination: Destination,
    ) -> Self {
        Self {
            items: ItemArena::new(),
            identity: IdentityMap::new(),
            diagnostics: DiagnosticCollector::new(),
            styles: StyleContext::from_config(config),
            root_style,
            resolution,
            destination,
        }
    }

    fn in_library(&self) -> bool {
        self.destination == Destination::Library
    }

    fn root_chain(&self) -> StyleChain<'s> {
        StyleChain::new(self.root_style)
    }

    /// Creates the item of a top-level node and tags it with the node's identity.
    fn materialize_top_level(
        &mut self,
        node: &'s SourceNode,
    ) -> Result<Option<ItemHandle>, TrellisError> {
        let chain = self.root_chain();
        let Some(handle) = self.create_item(node, &chain)? else {
            return Ok(None);
        };
        self.items[handle].set_identity(node.name(), node.id(), node.tag());
        self.identity.insert(node.id(), handle)?;
        Ok(Some(handle))
    }

    /// Imports everything but the item itself for `node` and its materialized
    /// descendants. `owner` is the source container of `node`.
    fn post_process(
        &mut self,
        node: &'s SourceNode,
        handle: ItemHandle,
        parent_chain: &StyleChain<'s>,
        owner: Option<&'s SourceNode>,
    ) -> Result<(), TrellisError> {
        let chain = parent_chain.push(node.style());

        self.import_transform(node, handle, owner)?;
        if node.is_one_d() {
            self.configure_1d_size(node, handle);
        }

        let page_transform = self.items.page_transform(handle);
        geometry::import_geometry(node, self.items[handle].shape_mut(), page_transform)?;

        if node.is_two_d_shape() {
            let ports = ports::translate_ports(node.id(), node.ports(), &mut self.diagnostics);
            self.items[handle].shape_mut().set_ports(ports);
        }

        if self.items[handle].shape().geometry().is_some() {
            self.apply_styles(node.id(), handle, &chain);
        }

        self.import_text_position(handle, &chain);

        for child in node.children() {
            if let Some(child_handle) = self.identity.get(child.id()) {
                self.post_process(child, child_handle, &chain, Some(node))?;
            }
        }
        Ok(())
    }

    /// Sets fill, stroke and arrowheads of the item's geometry from the composed style.
    fn apply_styles(&mut self, node: NodeId, handle: ItemHandle, chain: &StyleChain<'s>) {
        let fill = chain
            .fill()
            .and_then(|fill| match translate_fill(fill, &self.styles) {
                Ok(fill) => Some(fill),
                Err(err) => {
                    self.diagnostics.emit(
                        Diagnostic::warning(format!("fill dropped: {err}"))
                            .with_code(err.code())
                            .with_node(node),
                    );
                    None
                }
            });
        let stroke = chain
            .stroke()
            .map(|stroke| translate_stroke(stroke, &self.styles));
        let begin = chain
            .start_arrowhead()
            .map(|arrowhead| translate_arrowhead(arrowhead, &self.styles));
        let end = chain
            .end_arrowhead()
            .map(|arrowhead| translate_arrowhead(arrowhead, &self.styles));

        let geometry = self.items[handle].shape_mut().geometry_or_create();
        geometry.set_fill(fill);
        geometry.set_stroke(stroke);
        geometry.set_begin_arrowhead(begin);
        geometry.set_end_arrowhead(end);
    }

    fn import_text_position(&mut self, handle: ItemHandle, chain: &StyleChain<'s>) {
        let Some(style) = chain.text() else {
            return;
        };
        let shape = self.items[handle].shape_mut();
        let Some(size) = shape.text_block_size() else {
            return;
        };
        if let Some(block) = shape.text_block_mut() {
            apply_text_position(block, style, size, self.resolution);
        }
    }

    /// Glues the ends of every materialized 1-D node among `nodes`.
    fn connect(&mut self, nodes: impl IntoIterator<Item = &'s SourceNode>) {
        for node in nodes.into_iter().filter(|node| node.is_connectable()) {
            let (Some(handle), Some(link)) = (self.identity.get(node.id()), node.link()) else {
                continue;
            };

            let begin = link.from.as_ref().and_then(|plug| self.resolve(plug));
            let end = link.to.as_ref().and_then(|plug| self.resolve(plug));
            debug!(
                node:? = node.id(),
                begin:? = begin,
                end:? = end;
                "Connecting"
            );

            let shape = self.items[handle].shape_mut();
            if let Some(glue) = begin {
                shape.glue_begin(glue);
            }
            if let Some(glue) = end {
                shape.glue_end(glue);
            }
        }
    }

    /// Resolves the target of one end of a 1-D shape. Ends attached to nodes
    /// that were not materialized resolve to nothing; named ports the target
    /// lacks fall back to the shape itself.
    fn resolve(&self, plug: &Plug) -> Option<Glue> {
        let Some(shape) = self.identity.get(plug.shape) else {
            debug!(target_node:? = plug.shape; "Glue target was not converted");
            return None;
        };

        let port = plug
            .port
            .as_deref()
            .map(Id::new)
            .filter(|&port| self.items[shape].shape().ports().get(port).is_some());
        Some(match port {
            Some(port) => Glue::Port { shape, port },
            None => Glue::Shape { shape },
        })
    }

    fn finish(self) -> (ItemArena, Vec<Diagnostic>) {
        (self.items, self.diagnostics.finish())
    }
}
