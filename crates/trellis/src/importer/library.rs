//! Library conversion.
//!
//! Every master becomes one library item holding the items of its nodes. A
//! library carries no style sheet of its own, so nodes compose their styles
//! against the document defaults, and text offsets are measured at 96 dpi.

use log::{debug, info};

use trellis_core::{
    source::{Library, Master, StyleSheet},
    target::{LibraryDocument, LibraryItem},
};

use crate::{
    config::ConvertConfig,
    error::TrellisError,
    importer::{Conversion, Destination, IdentityMap, Session},
};

const LIBRARY_RESOLUTION: f64 = 96.0;

/// Converts a library into a target library with one item per master.
///
/// # Errors
///
/// Fails on the same structural problems as
/// [`import_drawing`](super::drawing::import_drawing).
pub fn import_library(
    library: &Library,
    config: &ConvertConfig,
) -> Result<Conversion<LibraryDocument>, TrellisError> {
    let defaults = StyleSheet::document_defaults();
    let mut session = Session::new(config, &defaults, LIBRARY_RESOLUTION, Destination::Library);

    info!(masters = library.masters().len(); "Converting library");
    let entries = library
        .masters()
        .iter()
        .map(|master| import_master(&mut session, master))
        .collect::<Result<Vec<_>, _>>()?;

    let (items, diagnostics) = session.finish();
    info!(items = items.len(), diagnostics = diagnostics.len(); "Library converted");
    Ok(Conversion {
        document: LibraryDocument::from_parts(items, entries),
        diagnostics,
    })
}

/// Runs all three passes over a single master.
///
/// Each master starts with an empty identity map, so glue never crosses
/// masters and masters may share node ids.
fn import_master<'s>(
    session: &mut Session<'s>,
    master: &'s Master,
) -> Result<LibraryItem, TrellisError> {
    debug!(master = master.name(), nodes = master.nodes().len(); "Importing master");
    session.identity = IdentityMap::new();

    let mut entry = LibraryItem::new(master.name());
    if let Some(icon) = master.icon() {
        entry = entry.with_image(icon.to_vec());
    }

    let mut top_level = Vec::new();
    for node in master.nodes() {
        if let Some(handle) = session.materialize_top_level(node)? {
            entry.add(handle);
            top_level.push((node, handle));
        }
    }

    let chain = session.root_chain();
    for (node, handle) in top_level {
        session.post_process(node, handle, &chain, None)?;
    }

    session.connect(master.descendants());
    Ok(entry)
}
