//! Small XML helpers shared by the part parsers.

use deckgen_core::Error;
use quick_xml::events::BytesStart;

/// PresentationML main namespace.
pub(crate) const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

/// DrawingML main namespace.
pub(crate) const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Office document relationships namespace (the `r:` prefix).
pub(crate) const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Package relationships namespace (root of `.rels` parts).
pub(crate) const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Content types namespace (root of `[Content_Types].xml`).
pub(crate) const CT_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// XML declaration written at the top of generated parts.
pub(crate) const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Prefix of a qualified name (`"p"` for `p:sldId`), if any.
pub(crate) fn prefix(name: &[u8]) -> Option<&[u8]> {
    name.iter().position(|&b| b == b':').map(|pos| &name[..pos])
}

/// Value of the unprefixed attribute `key`, unescaped.
pub(crate) fn attr(element: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::parse(format!("Invalid attribute: {}", e)))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(format!("Invalid attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Value of the relationship reference `r:id` (any prefix), unescaped.
pub(crate) fn rel_id_attr(element: &BytesStart) -> Result<Option<String>, Error> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::parse(format!("Invalid attribute: {}", e)))?;
        let key = attr.key.as_ref();
        if prefix(key).is_some() && local_name(key) == b"id" {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::parse(format!("Invalid attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Escape text for use in element content or attribute values.
pub(crate) fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}
