//! The `[Content_Types].xml` part.

use crate::xml::{attr, escape, local_name, CT_NS, XML_DECL};
use deckgen_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Content type of a slide part.
pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// Default (by extension) and override (by part name) content types.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Parse a `[Content_Types].xml` part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut types = Self::default();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"Default" => {
                            let extension = attr(e, b"Extension")?.unwrap_or_default();
                            let content_type = attr(e, b"ContentType")?.unwrap_or_default();
                            types.defaults.push((extension, content_type));
                        }
                        b"Override" => {
                            let part_name = attr(e, b"PartName")?.unwrap_or_default();
                            let content_type = attr(e, b"ContentType")?.unwrap_or_default();
                            types.overrides.push((part_name, content_type));
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "Error parsing content types: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(types)
    }

    /// Content type of a part (no leading slash), override first, then extension default.
    pub fn content_type(&self, part_name: &str) -> Option<&str> {
        let absolute = format!("/{}", part_name);
        if let Some((_, content_type)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&absolute))
        {
            return Some(content_type.as_str());
        }

        let extension = part_name.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, content_type)| content_type.as_str())
    }

    /// Register (or replace) the override for a part (no leading slash).
    pub fn add_override(&mut self, part_name: &str, content_type: &str) {
        let absolute = format!("/{}", part_name);
        self.overrides
            .retain(|(name, _)| !name.eq_ignore_ascii_case(&absolute));
        self.overrides.push((absolute, content_type.to_string()));
    }

    /// Serialize as a `[Content_Types].xml` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, CT_NS));
        for (extension, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape(extension),
                escape(content_type)
            ));
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape(part_name),
                escape(content_type)
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#;

    #[test]
    fn test_lookup_prefers_override() {
        let types = ContentTypes::parse(CONTENT_TYPES).unwrap();
        assert_eq!(
            types.content_type("ppt/presentation.xml"),
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml")
        );
        assert_eq!(types.content_type("ppt/slides/slide1.xml"), Some("application/xml"));
        assert_eq!(types.content_type("media/image1.png"), None);
    }

    #[test]
    fn test_add_override_survives_roundtrip() {
        let mut types = ContentTypes::parse(CONTENT_TYPES).unwrap();
        types.add_override("ppt/slides/slide1.xml", CT_SLIDE);
        types.add_override("ppt/slides/slide1.xml", CT_SLIDE);

        let reparsed = ContentTypes::parse(&types.to_xml()).unwrap();
        assert_eq!(reparsed.content_type("ppt/slides/slide1.xml"), Some(CT_SLIDE));
        assert_eq!(reparsed.overrides.len(), 2);
        assert_eq!(reparsed.defaults.len(), 2);
    }
}
