//! Read slides back out of a `.pptx`: layout name and the text of every shape.

use crate::layout::SlideLayout;
use crate::package::{rels_part_name, Package};
use crate::presentation::{main_part_name, PresentationInfo};
use crate::relationships::{Relationships, RT_SLIDE_LAYOUT};
use crate::xml::{attr, local_name};
use deckgen_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// A shape on a slide and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeText {
    /// `p:cNvPr/@name`.
    pub name: String,
    /// Paragraphs joined by `\n`; line breaks within a paragraph are `\u{b}`.
    pub text: String,
    /// Whether the shape is a placeholder (`p:nvPr/p:ph`).
    pub is_placeholder: bool,
}

/// One slide of a deck as read back from the file.
#[derive(Debug, Clone, Serialize)]
pub struct SlideContent {
    /// 1-based position in the slide list.
    pub number: usize,
    pub part_name: String,
    /// Name of the slide's layout, if it has one.
    pub layout: Option<String>,
    pub shapes: Vec<ShapeText>,
}

impl SlideContent {
    /// Shape with exactly this name.
    pub fn shape(&self, name: &str) -> Option<&ShapeText> {
        self.shapes.iter().find(|shape| shape.name == name)
    }
}

/// Reader for the slides of a `.pptx`.
pub struct DeckReader;

impl DeckReader {
    /// Create a new deck reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a deck from a file.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<SlideContent>> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Read a deck from in-memory bytes.
    pub fn read_bytes(&self, data: &[u8]) -> Result<Vec<SlideContent>> {
        self.read(Cursor::new(data))
    }

    /// Read every slide, in slide list order.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideContent>> {
        let package = Package::from_reader(reader)?;
        let presentation_part = main_part_name(&package)?;
        let relationships =
            Relationships::parse(package.read_xml(&rels_part_name(&presentation_part))?)?;
        let info = PresentationInfo::parse(package.read_xml(&presentation_part)?)?;

        let mut layout_names: HashMap<String, String> = HashMap::new();
        let mut slides = Vec::with_capacity(info.slides.len());

        for (index, (_, rel_id)) in info.slides.iter().enumerate() {
            let part_name = relationships
                .target_part(rel_id, &presentation_part)
                .ok_or_else(|| {
                    Error::archive(format!(
                        "Slide relationship '{}' not found in '{}'",
                        rel_id, presentation_part
                    ))
                })?;

            let layout = self.slide_layout_name(&package, &part_name, &mut layout_names)?;
            let shapes = self.extract_shapes_from_xml(package.read_xml(&part_name)?, &part_name)?;
            log::debug!("Read {} with {} shapes", part_name, shapes.len());

            slides.push(SlideContent {
                number: index + 1,
                part_name,
                layout,
                shapes,
            });
        }

        Ok(slides)
    }

    /// Name of the layout a slide part points to, caching parsed layouts by part.
    fn slide_layout_name(
        &self,
        package: &Package,
        slide_part: &str,
        cache: &mut HashMap<String, String>,
    ) -> Result<Option<String>> {
        let rels_part = rels_part_name(slide_part);
        if !package.contains(&rels_part) {
            return Ok(None);
        }

        let rels = Relationships::parse(package.read_xml(&rels_part)?)?;
        let Some(layout_part) = rels.first_of_type(RT_SLIDE_LAYOUT, slide_part) else {
            return Ok(None);
        };
        if let Some(name) = cache.get(&layout_part) {
            return Ok(Some(name.clone()));
        }
        if !package.contains(&layout_part) {
            log::warn!("{} points to missing layout {}", slide_part, layout_part);
            return Ok(None);
        }

        let layout = SlideLayout::parse(package.read_xml(&layout_part)?, &layout_part)?;
        cache.insert(layout_part, layout.name.clone());
        Ok(Some(layout.name))
    }

    /// Extract shapes with their name and text from slide XML.
    fn extract_shapes_from_xml(&self, xml_content: &str, part_name: &str) -> Result<Vec<ShapeText>> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        let mut current_shape: Option<ShapeText> = None;
        let mut in_text_body = false;
        let mut in_text = false;
        let mut paragraphs = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" | b"graphicFrame" | b"cxnSp" if current_shape.is_none() => {
                        current_shape = Some(ShapeText {
                            name: String::new(),
                            text: String::new(),
                            is_placeholder: false,
                        });
                        paragraphs = 0;
                    }
                    b"cNvPr" => set_shape_name(&mut current_shape, e)?,
                    b"txBody" => in_text_body = true,
                    b"p" if in_text_body => start_paragraph(&mut current_shape, &mut paragraphs),
                    b"t" if in_text_body => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"cNvPr" => set_shape_name(&mut current_shape, e)?,
                    b"ph" => {
                        if let Some(shape) = current_shape.as_mut() {
                            shape.is_placeholder = true;
                        }
                    }
                    b"p" if in_text_body => start_paragraph(&mut current_shape, &mut paragraphs),
                    b"br" if in_text_body => {
                        if let Some(shape) = current_shape.as_mut() {
                            shape.text.push('\u{b}');
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_text => {
                    let text = e.unescape().map_err(|err| {
                        Error::parse(format!("Error parsing slide '{}': {}", part_name, err))
                    })?;
                    if let Some(shape) = current_shape.as_mut() {
                        shape.text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" | b"graphicFrame" | b"cxnSp" => {
                        if let Some(shape) = current_shape.take() {
                            shapes.push(shape);
                        }
                        in_text_body = false;
                        in_text = false;
                    }
                    b"txBody" => in_text_body = false,
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "Error parsing slide '{}': {}",
                        part_name, e
                    )));
                }
                _ => {}
            }
        }

        Ok(shapes)
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Name the open shape from its `p:cNvPr`, first one wins.
fn set_shape_name(
    shape: &mut Option<ShapeText>,
    element: &quick_xml::events::BytesStart,
) -> Result<()> {
    if let Some(shape) = shape.as_mut().filter(|shape| shape.name.is_empty()) {
        shape.name = attr(element, b"name")?.unwrap_or_default();
    }
    Ok(())
}

fn start_paragraph(shape: &mut Option<ShapeText>, paragraphs: &mut usize) {
    if let Some(shape) = shape.as_mut() {
        if *paragraphs > 0 {
            shape.text.push('\n');
        }
        *paragraphs += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::populate::populate;
    use crate::presentation::fixtures::{deck_layouts, template};
    use crate::presentation::Presentation;
    use deckgen_core::{SlideSpec, THEME_LAYOUT, TITLE_AND_CONTENT_LAYOUT};

    #[test]
    fn test_reads_back_populated_slides() {
        let mut presentation = Presentation::from_bytes(&template(&deck_layouts(), 1)).unwrap();
        let rows = [
            SlideSpec::new(THEME_LAYOUT, "Minha Ideia", ""),
            SlideSpec::new(TITLE_AND_CONTENT_LAYOUT, "Solução", "Primeira\nSegunda\u{b}quebra"),
        ];
        populate(&mut presentation, &rows).unwrap();

        let slides = DeckReader::new()
            .read_bytes(&presentation.to_bytes().unwrap())
            .unwrap();
        assert_eq!(slides.len(), 3);

        assert_eq!(slides[0].part_name, "ppt/slides/slide1.xml");
        assert_eq!(slides[0].shape("Existing 1").unwrap().text, "Existing slide 1");
        assert!(!slides[0].shape("Existing 1").unwrap().is_placeholder);

        assert_eq!(slides[1].number, 2);
        assert_eq!(slides[1].layout.as_deref(), Some(THEME_LAYOUT));
        let title = slides[1].shape("Title 1").unwrap();
        assert_eq!(title.text, "Minha Ideia");
        assert!(title.is_placeholder);
        assert_eq!(slides[1].shape("Subtitle 2").unwrap().text, "");

        assert_eq!(slides[2].layout.as_deref(), Some(TITLE_AND_CONTENT_LAYOUT));
        assert_eq!(slides[2].shape("Title 1").unwrap().text, "Solução");
        assert_eq!(
            slides[2].shape("Content Placeholder 2").unwrap().text,
            "Primeira\nSegunda\u{b}quebra"
        );
    }

    #[test]
    fn test_follows_slide_list_order() {
        let data = template(&deck_layouts(), 2);
        let mut package = Package::from_reader(Cursor::new(data)).unwrap();
        let reordered = package
            .read_xml("ppt/presentation.xml")
            .unwrap()
            .replace(
                r#"<p:sldId id="256" r:id="rId2"/><p:sldId id="257" r:id="rId3"/>"#,
                r#"<p:sldId id="257" r:id="rId3"/><p:sldId id="256" r:id="rId2"/>"#,
            );
        package.set("ppt/presentation.xml", reordered);
        let data = package.write(Cursor::new(Vec::new())).unwrap().into_inner();

        let slides = DeckReader::new().read_bytes(&data).unwrap();
        let parts: Vec<&str> = slides.iter().map(|slide| slide.part_name.as_str()).collect();
        assert_eq!(parts, vec!["ppt/slides/slide2.xml", "ppt/slides/slide1.xml"]);
        assert_eq!(slides[0].shapes[0].text, "Existing slide 2");
    }

    #[test]
    fn test_preserves_whitespace_and_entities() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Box"/></p:nvSpPr><p:txBody><a:p><a:r><a:t>  A &amp; B</a:t></a:r><a:r><a:t> C</a:t></a:r></a:p><a:p/><a:p><a:r><a:t>D</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

        let shapes = DeckReader::new().extract_shapes_from_xml(xml, "slide").unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].name, "Box");
        assert_eq!(shapes[0].text, "  A & B C\n\nD");
    }

    #[test]
    fn test_malformed_slide_is_parse_error() {
        let err = DeckReader::new()
            .extract_shapes_from_xml("<p:sld><p:sp></p:sld>", "ppt/slides/slide1.xml")
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_not_a_zip_is_archive_error() {
        let err = DeckReader::new().read_bytes(b"plain text").unwrap_err();
        assert!(matches!(err, Error::Archive(_)));
    }
}
