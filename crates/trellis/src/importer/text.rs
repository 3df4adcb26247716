//! Shape text import.

use log::debug;
use quick_xml::{Reader, events::Event};

use trellis_core::{
    identifier::NodeId,
    source::{TextFormat, TextStyle},
    target::Shape,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector},
    styles::{StyleContext, text::apply_text_style},
};

/// Sets the text of `shape` from a node's text and composed text style.
///
/// Empty text leaves the shape without a text block. Markup text is flattened
/// to plain text first.
pub fn import_text(
    shape: &mut Shape,
    node: NodeId,
    text: Option<&str>,
    style: Option<&TextStyle>,
    ctx: &StyleContext,
    diagnostics: &mut DiagnosticCollector,
) {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return;
    };

    let text = match style.map(TextStyle::format) {
        Some(TextFormat::Xml) => flatten_markup(text),
        Some(TextFormat::Plain) | None => text.to_owned(),
    };
    let block = shape.set_text(text);

    let Some(style) = style else {
        return;
    };
    if let Err(err) = apply_text_style(block, style, ctx) {
        diagnostics.emit(
            Diagnostic::warning(format!("text fill dropped: {err}"))
                .with_code(err.code())
                .with_node(node),
        );
    }
}

/// Converts paragraph markup to plain text.
///
/// Tags and comments are removed; `<br>` and the end of a paragraph become
/// line breaks. Whitespace runs inside the markup collapse to single spaces the
/// way a renderer would show them, and entities are decoded last. Markup that
/// cannot be read is decoded as it is.
///
/// # Examples
///
/// ```
/// # use trellis::importer::text::flatten_markup;
/// assert_eq!(flatten_markup("<p>Hello <b>world</b></p><p>a &amp; b</p>"), "Hello world\na & b");
/// assert_eq!(flatten_markup("one<br/>two"), "one\ntwo");
/// ```
pub fn flatten_markup(markup: &str) -> String {
    match collect_text(markup) {
        Ok(plain) => htmlize::unescape(plain.trim_end_matches('\n')).into_owned(),
        Err(err) => {
            debug!(err:% = err; "Unreadable text markup, keeping it verbatim");
            htmlize::unescape(markup).into_owned()
        }
    }
}

/// Gathers the character data of `markup` with collapsed whitespace and
/// line breaks for `<br>` and closing paragraphs.
fn collect_text(markup: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(markup);
    reader.check_end_names(false);

    let mut text = FlatText::with_capacity(markup.len());
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) => {
                if is_named(tag.local_name().as_ref(), &["br"]) {
                    text.line_break();
                }
            }
            Event::End(tag) => {
                if is_named(tag.local_name().as_ref(), &["p", "div"]) {
                    text.line_break();
                }
            }
            Event::Text(chars) => text.push_str(&reader.decoder().decode(&chars)?),
            Event::CData(chars) => text.push_str(&reader.decoder().decode(&chars)?),
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }
    Ok(text.plain)
}

fn is_named(name: &[u8], names: &[&str]) -> bool {
    names
        .iter()
        .any(|candidate| name.eq_ignore_ascii_case(candidate.as_bytes()))
}

/// Plain text being assembled from markup character data.
struct FlatText {
    plain: String,
    pending_space: bool,
}

impl FlatText {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            plain: String::with_capacity(capacity),
            pending_space: false,
        }
    }

    fn line_break(&mut self) {
        self.plain.push('\n');
        self.pending_space = false;
    }

    fn push_str(&mut self, chars: &str) {
        for c in chars.chars() {
            if c.is_ascii_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.plain.is_empty() && !self.plain.ends_with('\n') {
                self.plain.push(' ');
            }
            self.pending_space = false;
            self.plain.push(c);
        }
    }
}
