//! Slides created from a layout, and their placeholder shapes.

use crate::layout::{LayoutPlaceholder, PlaceholderType, SlideLayout};
use crate::package::{relative_target, rels_part_name};
use crate::relationships::{Relationships, RT_SLIDE_LAYOUT};
use crate::xml::{escape, A_NS, P_NS, R_NS, XML_DECL};

/// A placeholder shape on a new slide.
#[derive(Debug, Clone)]
pub struct Placeholder {
    id: u32,
    name: String,
    kind: PlaceholderType,
    orient: Option<String>,
    size: Option<String>,
    idx: Option<u32>,
    text: Option<String>,
}

impl Placeholder {
    /// Shape id on the slide.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Shape name, e.g. `Title 1` or `Content Placeholder 2`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placeholder type inherited from the layout.
    pub fn kind(&self) -> &PlaceholderType {
        &self.kind
    }

    /// Text of the placeholder, or `None` if it has no text body.
    ///
    /// Paragraphs are separated by `\n`, line breaks inside a paragraph by `\u{b}`.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the text of the placeholder.
    ///
    /// Each `\n`-separated line becomes its own paragraph; a vertical tab
    /// becomes a line break within the paragraph.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    fn write_xml(&self, xml: &mut String) {
        xml.push_str("<p:sp><p:nvSpPr>");
        xml.push_str(&format!(
            r#"<p:cNvPr id="{}" name="{}"/>"#,
            self.id,
            escape(&self.name)
        ));
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph"#);
        if self.kind != PlaceholderType::Object {
            xml.push_str(&format!(r#" type="{}""#, escape(self.kind.as_str())));
        }
        if let Some(orient) = self.orient.as_deref().filter(|orient| *orient != "horz") {
            xml.push_str(&format!(r#" orient="{}""#, escape(orient)));
        }
        if let Some(size) = self.size.as_deref().filter(|size| *size != "full") {
            xml.push_str(&format!(r#" sz="{}""#, escape(size)));
        }
        if let Some(idx) = self.idx.filter(|idx| *idx != 0) {
            xml.push_str(&format!(r#" idx="{}""#, idx));
        }
        xml.push_str("/></p:nvPr></p:nvSpPr><p:spPr/>");

        if let Some(text) = &self.text {
            xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
            for paragraph in text.split('\n') {
                write_paragraph(xml, paragraph);
            }
            xml.push_str("</p:txBody>");
        }

        xml.push_str("</p:sp>");
    }
}

/// Write one `a:p`, turning vertical tabs into `a:br`.
fn write_paragraph(xml: &mut String, paragraph: &str) {
    if paragraph.is_empty() {
        xml.push_str("<a:p/>");
        return;
    }

    xml.push_str("<a:p>");
    for (n, line) in paragraph.split('\u{b}').enumerate() {
        if n > 0 {
            xml.push_str("<a:br/>");
        }
        if !line.is_empty() {
            xml.push_str(&format!("<a:r><a:t>{}</a:t></a:r>", escape(line)));
        }
    }
    xml.push_str("</a:p>");
}

/// A slide added to the presentation.
#[derive(Debug, Clone)]
pub struct Slide {
    part_name: String,
    slide_id: u32,
    rel_id: String,
    layout_name: String,
    layout_part: String,
    placeholders: Vec<Placeholder>,
}

impl Slide {
    /// Create a slide from a layout, cloning the layout's placeholders.
    ///
    /// Shape ids start at 2 and names are derived from the placeholder type
    /// (`Title 1`, `Content Placeholder 2`, ...), so callers can recognise
    /// placeholders regardless of how the layout named them.
    pub(crate) fn from_layout(
        layout: &SlideLayout,
        part_name: String,
        slide_id: u32,
        rel_id: String,
    ) -> Self {
        let mut placeholders: Vec<Placeholder> = Vec::new();
        let mut next_id = 2;

        for source in layout.placeholders.iter().filter(|ph| ph.kind.is_cloneable()) {
            let name = next_placeholder_name(source, next_id, &placeholders);
            placeholders.push(Placeholder {
                id: next_id,
                name,
                kind: source.kind.clone(),
                orient: source.orient.clone(),
                size: source.size.clone(),
                idx: source.idx,
                text: source.kind.has_text_frame().then(String::new),
            });
            next_id += 1;
        }

        Self {
            part_name,
            slide_id,
            rel_id,
            layout_name: layout.name.clone(),
            layout_part: layout.part_name.clone(),
            placeholders,
        }
    }

    /// Part name, e.g. `ppt/slides/slide3.xml`.
    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    /// Id in the presentation's slide list (`p:sldId/@id`).
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Relationship id from the presentation part to this slide.
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    /// Name of the layout the slide was created from.
    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    /// Placeholders in shape-tree order.
    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Mutable access to the placeholders, in shape-tree order.
    pub fn placeholders_mut(&mut self) -> impl Iterator<Item = &mut Placeholder> {
        self.placeholders.iter_mut()
    }

    /// Placeholder with exactly this name.
    pub fn placeholder(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|ph| ph.name == name)
    }

    /// Part name of the slide's relationships.
    pub(crate) fn rels_part_name(&self) -> String {
        rels_part_name(&self.part_name)
    }

    /// Serialize the slide part.
    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            A_NS, R_NS, P_NS
        ));
        xml.push_str(concat!(
            "<p:cSld><p:spTree>",
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
            "<p:grpSpPr/>"
        ));
        for placeholder in &self.placeholders {
            placeholder.write_xml(&mut xml);
        }
        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
        xml
    }

    /// Serialize the slide's relationships part.
    pub(crate) fn rels_xml(&self) -> String {
        let mut rels = Relationships::default();
        rels.add(
            RT_SLIDE_LAYOUT,
            relative_target(&self.part_name, &self.layout_part),
        );
        rels.to_xml()
    }
}

/// `"<base> <n>"` with n starting at `id - 1`, bumped until unused on the slide.
fn next_placeholder_name(source: &LayoutPlaceholder, id: u32, taken: &[Placeholder]) -> String {
    let base = if source.is_vertical() {
        format!("Vertical {}", source.kind.base_name())
    } else {
        source.kind.base_name().to_string()
    };

    let mut number = id - 1;
    loop {
        let name = format!("{} {}", base, number);
        if !taken.iter().any(|ph| ph.name == name) {
            return name;
        }
        number += 1;
    }
}
