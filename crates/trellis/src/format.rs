//! Input sniffing and JSON persistence of documents.
//!
//! Only the JSON encoding of the source model can be loaded. The native markup
//! and binary encodings are recognized so they can be rejected with a clear error.

use std::{
    fmt,
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use log::{debug, info};

use trellis_core::{source::SourceDocument, target::TargetDocument};

use crate::TrellisError;

/// Number of leading bytes [`sniff`] looks at.
pub const SNIFF_LEN: usize = 64;

const MARKUP_PREFIX: &[u8] = b"<?xml ";

/// The encoding of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Markup,
    Json,
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Markup => write!(f, "markup"),
            Encoding::Json => write!(f, "json"),
            Encoding::Binary => write!(f, "binary"),
        }
    }
}

/// Detects the encoding from the start of a document.
///
/// Only the first [`SNIFF_LEN`] bytes are examined.
///
/// # Examples
///
/// ```
/// # use trellis::format::{sniff, Encoding};
/// assert_eq!(sniff(b"<?xml version=\"1.0\"?>"), Encoding::Markup);
/// assert_eq!(sniff(b"  \n{\"document\": \"drawing\"}"), Encoding::Json);
/// assert_eq!(sniff(&[0x50, 0x4b, 0x03, 0x04]), Encoding::Binary);
/// ```
pub fn sniff(bytes: &[u8]) -> Encoding {
    let header = &bytes[..bytes.len().min(SNIFF_LEN)];
    if header.starts_with(MARKUP_PREFIX) {
        return Encoding::Markup;
    }
    match header.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Encoding::Json,
        _ => Encoding::Binary,
    }
}

/// Reads the header of a file and detects its encoding.
pub fn sniff_file(path: impl AsRef<Path>) -> Result<Encoding, TrellisError> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    Ok(sniff(&header))
}

/// Parses a source document from bytes.
///
/// # Errors
///
/// Returns [`TrellisError::UnsupportedFormat`] for markup and binary input and
/// [`TrellisError::Json`] for malformed JSON.
pub fn parse_source(bytes: &[u8]) -> Result<SourceDocument, TrellisError> {
    match sniff(bytes) {
        Encoding::Json => {
            let document = serde_json::from_slice(bytes)?;
            debug!(bytes = bytes.len(); "Source document parsed");
            Ok(document)
        }
        encoding => Err(TrellisError::UnsupportedFormat(encoding)),
    }
}

/// Loads a source document from a file.
pub fn load_source(path: impl AsRef<Path>) -> Result<SourceDocument, TrellisError> {
    let path = path.as_ref();
    info!(path:? = path; "Loading source document");
    let bytes = std::fs::read(path)?;
    parse_source(&bytes)
}

/// Writes a target document as JSON.
pub fn write_target(
    document: &TargetDocument,
    writer: impl Write,
    pretty: bool,
) -> Result<(), TrellisError> {
    let mut writer = io::BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, document)?;
    } else {
        serde_json::to_writer(&mut writer, document)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Saves a target document to a file.
pub fn save_target(
    document: &TargetDocument,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), TrellisError> {
    let path = path.as_ref();
    info!(path:? = path; "Saving target document");
    write_target(document, File::create(path)?, pretty)
}
