//! WASM bindings for pitch deck generation.
//!
//! Exposes field extraction, the template's layout catalog and full deck
//! generation to JavaScript. Everything works on in-memory bytes.

use deckgen_docx::DocxExtractor;
use deckgen_pptx::{LayoutCatalog, Presentation};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Extract the content-control fields of a Word document.
///
/// # Arguments
/// * `document` - The raw bytes of the DOCX file
///
/// # Returns
/// A plain object mapping every field key (`theme`, `solution`, ...) to its
/// text, or throws on error.
#[wasm_bindgen]
pub fn extract_fields(document: &[u8]) -> Result<JsValue, JsValue> {
    let fields = DocxExtractor::new()
        .extract_bytes(document)
        .map_err(|e| JsValue::from_str(&format!("DOCX error: {}", e)))?;

    to_js(&fields)
}

/// List the layouts of a PowerPoint template.
///
/// # Returns
/// A plain object mapping each layout name to the names of its placeholders.
#[wasm_bindgen]
pub fn layout_catalog(template: &[u8]) -> Result<JsValue, JsValue> {
    let catalog = layout_catalog_impl(template).map_err(|e| JsValue::from_str(&e))?;
    to_js(&catalog)
}

fn layout_catalog_impl(template: &[u8]) -> Result<LayoutCatalog, String> {
    Presentation::from_bytes(template)
        .map(|presentation| presentation.layout_catalog())
        .map_err(|e| format!("PPTX error: {}", e))
}

/// Generate the pitch deck.
///
/// # Arguments
/// * `document` - The raw bytes of the DOCX file
/// * `template` - The raw bytes of the PPTX template
///
/// # Returns
/// The bytes of the finished `.pptx`, or throws on error.
#[wasm_bindgen]
pub fn generate_deck(document: &[u8], template: &[u8]) -> Result<js_sys::Uint8Array, JsValue> {
    let deck = generate_deck_impl(document, template).map_err(|e| JsValue::from_str(&e))?;
    Ok(js_sys::Uint8Array::from(deck.as_slice()))
}

fn generate_deck_impl(document: &[u8], template: &[u8]) -> Result<Vec<u8>, String> {
    deckgen::generate(document, template).map_err(|e| format!("Generation error: {}", e))
}

/// Serialize to plain JS objects rather than `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn archive(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_layout_catalog_rejects_non_zip() {
        let err = layout_catalog_impl(b"not a template").unwrap_err();
        assert!(err.starts_with("PPTX error: Archive error"));
    }

    #[test]
    fn test_layout_catalog_requires_presentation_part() {
        let template = archive(&[("[Content_Types].xml", "<Types/>")]);
        let err = layout_catalog_impl(&template).unwrap_err();
        assert!(err.contains("ppt/_rels/presentation.xml.rels"));
    }

    #[test]
    fn test_generate_deck_reports_document_errors() {
        let document = archive(&[("word/styles.xml", "<w:styles/>")]);
        let err = generate_deck_impl(&document, b"unused").unwrap_err();
        assert!(err.starts_with("Generation error: Archive error"));
        assert!(err.contains("word/document.xml"));
    }
}
