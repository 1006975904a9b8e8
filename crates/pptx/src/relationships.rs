//! Relationship (`.rels`) parts.

use crate::package::resolve_part_name;
use crate::xml::{attr, escape, local_name, PKG_REL_NS, XML_DECL};
use deckgen_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Relationship type of the main presentation part.
pub const RT_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Relationship type from the presentation to a slide.
pub const RT_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

/// Relationship type from a slide (or master) to a slide layout.
pub const RT_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

/// A single relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// The relationships of one source part, in document order.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: Vec<Relationship>,
}

impl Relationships {
    /// Parse a `.rels` part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut rels = Vec::new();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let id = attr(e, b"Id")?.unwrap_or_default();
                    let rel_type = attr(e, b"Type")?.unwrap_or_default();
                    let target = attr(e, b"Target")?.unwrap_or_default();
                    let external = attr(e, b"TargetMode")?.as_deref() == Some("External");
                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                        external,
                    });
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(Self { rels })
    }

    /// Look up a relationship by id.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.id == id)
    }

    /// All relationships in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Part name targeted by relationship `id`, resolved against `source_part`.
    ///
    /// External targets have no part name.
    pub fn target_part(&self, id: &str, source_part: &str) -> Option<String> {
        self.get(id)
            .filter(|rel| !rel.external)
            .map(|rel| resolve_part_name(source_part, &rel.target))
    }

    /// First part of the given relationship type, resolved against `source_part`.
    pub fn first_of_type(&self, rel_type: &str, source_part: &str) -> Option<String> {
        self.rels
            .iter()
            .find(|rel| rel.rel_type == rel_type && !rel.external)
            .map(|rel| resolve_part_name(source_part, &rel.target))
    }

    /// Add an internal relationship under the first unused `rIdN` and return that id.
    pub fn add(&mut self, rel_type: &str, target: impl Into<String>) -> String {
        let id = (1..)
            .map(|n| format!("rId{}", n))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_default();

        self.rels.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.into(),
            external: false,
        });
        id
    }

    /// Serialize as a `.rels` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, PKG_REL_NS));
        for rel in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}""#,
                escape(&rel.id),
                escape(&rel.rel_type),
                escape(&rel.target)
            ));
            if rel.external {
                xml.push_str(r#" TargetMode="External""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</Relationships>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESENTATION_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_parse_and_resolve() {
        let rels = Relationships::parse(PRESENTATION_RELS).unwrap();
        assert_eq!(rels.iter().count(), 3);
        assert_eq!(
            rels.target_part("rId1", "ppt/presentation.xml"),
            Some("ppt/slideMasters/slideMaster1.xml".to_string())
        );
        assert_eq!(rels.target_part("rId9", "ppt/presentation.xml"), None);
        assert_eq!(rels.get("rId9").unwrap().target, "https://example.com/?a=1&b=2");
        assert_eq!(rels.target_part("rId42", "ppt/presentation.xml"), None);
    }

    #[test]
    fn test_add_uses_first_unused_id() {
        let mut rels = Relationships::parse(PRESENTATION_RELS).unwrap();
        assert_eq!(rels.add(RT_SLIDE, "slides/slide1.xml"), "rId2");
        assert_eq!(rels.add(RT_SLIDE, "slides/slide2.xml"), "rId4");
        assert_eq!(
            rels.first_of_type(RT_SLIDE, "ppt/presentation.xml"),
            Some("ppt/slides/slide1.xml".to_string())
        );
    }

    #[test]
    fn test_to_xml_roundtrip() {
        let mut rels = Relationships::parse(PRESENTATION_RELS).unwrap();
        rels.add(RT_SLIDE, "slides/slide1.xml");

        let reparsed = Relationships::parse(&rels.to_xml()).unwrap();
        let original: Vec<&Relationship> = rels.iter().collect();
        let roundtrip: Vec<&Relationship> = reparsed.iter().collect();
        assert_eq!(original, roundtrip);
    }

    #[test]
    fn test_malformed_rels_is_parse_error() {
        let err = Relationships::parse("<Relationships><Relationship></Relationships>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
