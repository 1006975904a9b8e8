//! Content-control field extraction from `word/document.xml`.

use deckgen_core::{Error, Field, FieldMapping, Result};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// WordprocessingML main namespace.
const W_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Part holding the document body.
const DOCUMENT_PART: &str = "word/document.xml";

/// Extractor for the aliased content controls of a DOCX file.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the field mapping from a DOCX file on disk.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<FieldMapping> {
        let path = path.as_ref();
        log::debug!("Extracting fields from {}", path.display());
        let file = File::open(path)?;
        self.extract(BufReader::new(file))
    }

    /// Extract the field mapping from an in-memory DOCX file.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<FieldMapping> {
        self.extract(Cursor::new(data))
    }

    /// Extract the field mapping from a DOCX reader.
    pub fn extract<R: Read + Seek>(&self, reader: R) -> Result<FieldMapping> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::archive(format!("Failed to open ZIP: {}", e)))?;

        let xml = self.read_document_part(&mut archive)?;
        self.extract_xml(&xml)
    }

    /// Extract the field mapping from the XML of the document body part.
    ///
    /// Every `w:sdt` is visited in the order its start tag appears. The first
    /// `w:alias` found anywhere inside it names the control; if that alias is
    /// in the catalog, all `w:t` text inside the control (nested controls
    /// included) is concatenated, trimmed, and stored. A later control with
    /// the same alias replaces an earlier one.
    pub fn extract_xml(&self, xml: &str) -> Result<FieldMapping> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let controls = scan_content_controls(xml)?;

        let mut fields = FieldMapping::new();
        for control in controls {
            let Some(alias) = control.alias.value() else {
                continue;
            };
            match Field::from_alias(alias) {
                Some(field) => {
                    log::debug!("Content control '{}' -> {}", alias, field);
                    fields.insert(field, control.text.trim());
                }
                None => log::debug!("Ignoring content control with alias '{}'", alias),
            }
        }

        log::info!(
            "Extracted {} of {} fields",
            fields.filled_count(),
            Field::ALL.len()
        );
        Ok(fields)
    }

    /// Read the document body part from the ZIP archive.
    fn read_document_part<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<String> {
        let mut file = archive.by_name(DOCUMENT_PART).map_err(|e| {
            Error::archive(format!(
                "File not found in archive '{}': {}",
                DOCUMENT_PART, e
            ))
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| Error::archive(format!("Failed to read '{}': {}", DOCUMENT_PART, e)))?;

        String::from_utf8(bytes)
            .map_err(|e| Error::parse(format!("'{}' is not valid UTF-8: {}", DOCUMENT_PART, e)))
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Alias of a content control, as far as the scan has seen.
#[derive(Debug, Default)]
enum AliasState {
    /// No `w:alias` element inside the control yet.
    #[default]
    Unseen,
    /// First `w:alias` found; `None` if it had no `w:val`.
    Found(Option<String>),
}

impl AliasState {
    fn value(&self) -> Option<&str> {
        match self {
            AliasState::Found(Some(value)) => Some(value),
            _ => None,
        }
    }
}

/// A `w:sdt` element collected during the scan.
#[derive(Debug, Default)]
struct ContentControl {
    /// Position of the start tag among all `w:sdt` elements.
    order: usize,
    alias: AliasState,
    text: String,
}

/// Collect every `w:sdt` of the document, ordered by start tag.
fn scan_content_controls(xml: &str) -> Result<Vec<ContentControl>> {
    let mut reader = NsReader::from_str(xml);

    let mut open: Vec<ContentControl> = Vec::new();
    let mut done: Vec<ContentControl> = Vec::new();
    let mut next_order = 0;
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut in_text = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| Error::parse(format!("Error parsing '{}': {}", DOCUMENT_PART, e)))?;
        let is_w = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == W_NS);
        let unbound = match ns {
            ResolveResult::Unknown(prefix) => Some(prefix),
            _ => None,
        };

        match event {
            Event::Start(ref e) => {
                check_prefixes(&reader, unbound.as_deref(), e)?;
                if depth == 0 && seen_root {
                    return Err(Error::parse("Document has more than one root element"));
                }
                seen_root = true;
                depth += 1;

                match e.local_name().as_ref() {
                    b"sdt" if is_w => {
                        open.push(ContentControl {
                            order: next_order,
                            ..Default::default()
                        });
                        next_order += 1;
                    }
                    b"alias" if is_w => {
                        let value = alias_value(&reader, e)?;
                        record_alias(&mut open, value);
                    }
                    b"t" if is_w => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                check_prefixes(&reader, unbound.as_deref(), e)?;
                if depth == 0 && seen_root {
                    return Err(Error::parse("Document has more than one root element"));
                }
                seen_root = true;

                match e.local_name().as_ref() {
                    b"sdt" if is_w => next_order += 1,
                    b"alias" if is_w => {
                        let value = alias_value(&reader, e)?;
                        record_alias(&mut open, value);
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::parse(format!("Invalid text in '{}': {}", DOCUMENT_PART, e)))?;
                for control in open.iter_mut() {
                    control.text.push_str(&text);
                }
            }
            Event::CData(ref e) if in_text => {
                let text = String::from_utf8_lossy(e);
                for control in open.iter_mut() {
                    control.text.push_str(&text);
                }
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"sdt" if is_w => {
                        if let Some(control) = open.pop() {
                            done.push(control);
                        }
                    }
                    b"t" if is_w => in_text = false,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::parse(format!("'{}' has no root element", DOCUMENT_PART)));
    }
    if depth != 0 {
        return Err(Error::parse(format!(
            "Unexpected end of '{}': {} unclosed elements",
            DOCUMENT_PART, depth
        )));
    }

    done.sort_by_key(|control| control.order);
    log::debug!("Found {} content controls", done.len());
    Ok(done)
}

fn unbound_prefix(prefix: &[u8]) -> Error {
    Error::parse(format!(
        "Unbound namespace prefix '{}' in '{}'",
        String::from_utf8_lossy(prefix),
        DOCUMENT_PART
    ))
}

/// Reject an element whose own prefix or any attribute prefix has no `xmlns` declaration in scope.
fn check_prefixes(
    reader: &NsReader<&[u8]>,
    unbound: Option<&[u8]>,
    element: &quick_xml::events::BytesStart,
) -> Result<()> {
    if let Some(prefix) = unbound {
        return Err(unbound_prefix(prefix));
    }
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::parse(format!("Invalid attribute: {}", e)))?;
        match attr.key.prefix() {
            None => continue,
            Some(prefix) if matches!(prefix.as_ref(), b"xml" | b"xmlns") => continue,
            Some(_) => {}
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(unbound_prefix(&prefix));
        }
    }
    Ok(())
}

/// Read `w:val` from a `w:alias` element.
fn alias_value(
    reader: &NsReader<&[u8]>,
    element: &quick_xml::events::BytesStart,
) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::parse(format!("Invalid attribute: {}", e)))?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        let is_w = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == W_NS);
        if is_w && local.as_ref() == b"val" {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(format!("Invalid alias value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Give the alias to every open control that has not found one yet.
fn record_alias(open: &mut [ContentControl], value: Option<String>) {
    for control in open.iter_mut() {
        if matches!(control.alias, AliasState::Unseen) {
            control.alias = AliasState::Found(value.clone());
        }
    }
}
