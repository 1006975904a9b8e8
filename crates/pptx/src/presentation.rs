//! A presentation template loaded into memory and extended with new slides.

use crate::content_types::{ContentTypes, CT_SLIDE};
use crate::layout::SlideLayout;
use crate::package::{rels_part_name, relative_target, Package, CONTENT_TYPES_PART};
use crate::relationships::{Relationships, RT_OFFICE_DOCUMENT, RT_SLIDE, RT_SLIDE_LAYOUT};
use crate::slide::Slide;
use crate::xml::{attr, local_name, prefix, rel_id_attr, R_NS};
use deckgen_core::{Error, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

/// Default location of the main presentation part.
const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Layout name -> names of the placeholders that layout defines.
pub type LayoutCatalog = BTreeMap<String, Vec<String>>;

/// A slide that was already part of the template.
#[derive(Debug, Clone)]
pub struct TemplateSlide {
    /// Id in the slide list (`p:sldId/@id`).
    pub slide_id: u32,
    /// Relationship id from the presentation part.
    pub rel_id: String,
    /// Part name of the slide, if the relationship resolves.
    pub part_name: Option<String>,
}

/// A presentation template held in memory.
///
/// Slides are appended with [`Presentation::add_slide`]; the template's own
/// parts, including any slides it already had, are written back unchanged
/// apart from the bookkeeping needed to register the new slides.
#[derive(Debug, Clone)]
pub struct Presentation {
    package: Package,
    presentation_part: String,
    relationships: Relationships,
    content_types: ContentTypes,
    layouts: Vec<SlideLayout>,
    template_slides: Vec<TemplateSlide>,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Load a presentation from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading template {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Load a presentation from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Load a presentation from a reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let package = Package::from_reader(reader)?;
        let presentation_part = main_part_name(&package)?;
        let relationships =
            Relationships::parse(package.read_xml(&rels_part_name(&presentation_part))?)?;
        let content_types = ContentTypes::parse(package.read_xml(CONTENT_TYPES_PART)?)?;

        let info = PresentationInfo::parse(package.read_xml(&presentation_part)?)?;

        // Only the first master's layouts are addressable by name.
        let layouts = match info.master_rel_ids.first() {
            Some(master_rel) => {
                let master_part = relationships
                    .target_part(master_rel, &presentation_part)
                    .ok_or_else(|| {
                        Error::archive(format!(
                            "Slide master relationship '{}' not found in '{}'",
                            master_rel, presentation_part
                        ))
                    })?;
                load_master_layouts(&package, &master_part)?
            }
            None => {
                log::warn!("{} lists no slide master", presentation_part);
                Vec::new()
            }
        };
        if info.master_rel_ids.len() > 1 {
            log::debug!(
                "Ignoring layouts of {} further slide masters",
                info.master_rel_ids.len() - 1
            );
        }

        let template_slides = info
            .slides
            .iter()
            .map(|(slide_id, rel_id)| TemplateSlide {
                slide_id: *slide_id,
                rel_id: rel_id.clone(),
                part_name: relationships.target_part(rel_id, &presentation_part),
            })
            .collect::<Vec<_>>();

        log::info!(
            "Loaded template with {} layouts and {} slides",
            layouts.len(),
            template_slides.len()
        );

        Ok(Self {
            package,
            presentation_part,
            relationships,
            content_types,
            layouts,
            template_slides,
            slides: Vec::new(),
        })
    }

    /// Layouts of the first slide master, in `p:sldLayoutIdLst` order.
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    /// Find a layout by exact, case-sensitive name; the first match wins.
    pub fn resolve_layout(&self, name: &str) -> Result<&SlideLayout> {
        Ok(&self.layouts[self.layout_index(name)?])
    }

    fn layout_index(&self, name: &str) -> Result<usize> {
        self.layouts
            .iter()
            .position(|layout| layout.name == name)
            .ok_or_else(|| Error::LayoutNotFound(name.to_string()))
    }

    /// Every layout name with the names of its placeholders.
    ///
    /// Diagnostic only; slide creation resolves layouts by name directly.
    pub fn layout_catalog(&self) -> LayoutCatalog {
        self.layouts
            .iter()
            .map(|layout| (layout.name.clone(), layout.placeholder_names()))
            .collect()
    }

    /// Slides the template already contained.
    pub fn template_slides(&self) -> &[TemplateSlide] {
        &self.template_slides
    }

    /// Slides added since the template was loaded, in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Total number of slides, template slides included.
    pub fn slide_count(&self) -> usize {
        self.template_slides.len() + self.slides.len()
    }

    /// Create a slide from the named layout and append it to the deck.
    pub fn add_slide(&mut self, layout_name: &str) -> Result<&mut Slide> {
        let layout_index = self.layout_index(layout_name)?;

        let part_name = self.next_slide_part_name();
        let slide_id = self.next_slide_id();
        let target = relative_target(&self.presentation_part, &part_name);
        let rel_id = self.relationships.add(RT_SLIDE, target);
        let slide = Slide::from_layout(&self.layouts[layout_index], part_name, slide_id, rel_id);

        self.content_types.add_override(slide.part_name(), CT_SLIDE);
        log::debug!(
            "Added {} (id {}, {}) from layout '{}'",
            slide.part_name(),
            slide.slide_id(),
            slide.rel_id(),
            layout_name
        );

        self.slides.push(slide);
        let index = self.slides.len() - 1;
        Ok(&mut self.slides[index])
    }

    /// First `ppt/slides/slideN.xml` not used by the package or a new slide.
    fn next_slide_part_name(&self) -> String {
        let taken = self.package.slide_part_numbers();
        (1..)
            .map(|n: u32| (n, format!("ppt/slides/slide{}.xml", n)))
            .find(|(n, name)| {
                !taken.contains(n)
                    && !self.package.contains(name)
                    && !self.slides.iter().any(|slide| slide.part_name() == name)
            })
            .map(|(_, name)| name)
            .unwrap_or_default()
    }

    /// One past the largest slide id in use, never below 256.
    fn next_slide_id(&self) -> u32 {
        self.template_slides
            .iter()
            .map(|slide| slide.slide_id)
            .chain(self.slides.iter().map(Slide::slide_id))
            .max()
            .unwrap_or(255)
            .max(255)
            + 1
    }

    /// Serialize the presentation as a `.pptx` into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Serialize the presentation as a `.pptx` into a writer.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut package = self.package.clone();

        if !self.slides.is_empty() {
            let new_ids: Vec<(u32, &str)> = self
                .slides
                .iter()
                .map(|slide| (slide.slide_id(), slide.rel_id()))
                .collect();
            let presentation_xml =
                append_slide_ids(self.package.read_xml(&self.presentation_part)?, &new_ids)?;

            package.set(self.presentation_part.as_str(), presentation_xml);
            package.set(
                rels_part_name(&self.presentation_part),
                self.relationships.to_xml(),
            );
            package.set(CONTENT_TYPES_PART, self.content_types.to_xml());

            for slide in &self.slides {
                package.set(slide.part_name(), slide.to_xml());
                package.set(slide.rels_part_name(), slide.rels_xml());
            }
        }

        package.write(writer)
    }

    /// Write the presentation to a file.
    ///
    /// The deck is fully serialized before the file is created, so a failure
    /// never leaves a partial file behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        log::info!("Saved {} slides to {}", self.slide_count(), path.display());
        Ok(())
    }
}

/// Main presentation part named by the package relationships.
pub(crate) fn main_part_name(package: &Package) -> Result<String> {
    let root_rels = rels_part_name("");
    if package.contains(&root_rels) {
        let rels = Relationships::parse(package.read_xml(&root_rels)?)?;
        if let Some(part) = rels.first_of_type(RT_OFFICE_DOCUMENT, "") {
            return Ok(part);
        }
    }
    Ok(DEFAULT_PRESENTATION_PART.to_string())
}

/// Layouts of one slide master, in `p:sldLayoutIdLst` order.
fn load_master_layouts(package: &Package, master_part: &str) -> Result<Vec<SlideLayout>> {
    let master_rels = Relationships::parse(package.read_xml(&rels_part_name(master_part))?)?;

    let mut layout_rel_ids = Vec::new();
    let mut reader = Reader::from_str(package.read_xml(master_part)?);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldLayoutId" =>
            {
                if let Some(rel_id) = rel_id_attr(e)? {
                    layout_rel_ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::parse(format!(
                    "Error parsing slide master '{}': {}",
                    master_part, e
                )));
            }
            _ => {}
        }
    }

    let layout_parts: Vec<String> = if layout_rel_ids.is_empty() {
        master_rels
            .iter()
            .filter(|rel| rel.rel_type == RT_SLIDE_LAYOUT && !rel.external)
            .filter_map(|rel| master_rels.target_part(&rel.id, master_part))
            .collect()
    } else {
        layout_rel_ids
            .iter()
            .filter_map(|rel_id| {
                let part = master_rels.target_part(rel_id, master_part);
                if part.is_none() {
                    log::warn!(
                        "Slide master '{}' lists unknown layout relationship '{}'",
                        master_part,
                        rel_id
                    );
                }
                part
            })
            .collect()
    };

    layout_parts
        .iter()
        .map(|part| SlideLayout::parse(package.read_xml(part)?, part))
        .collect()
}

/// Master and slide references read from the presentation part.
#[derive(Debug, Default)]
pub(crate) struct PresentationInfo {
    /// Relationship ids of `p:sldMasterId` entries, in order.
    pub master_rel_ids: Vec<String>,
    /// `(id, relationship id)` of `p:sldId` entries, in order.
    pub slides: Vec<(u32, String)>,
}

impl PresentationInfo {
    pub(crate) fn parse(xml: &str) -> Result<Self> {
        let mut info = Self::default();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    match local_name(e.name().as_ref()) {
                        b"sldMasterId" => {
                            if let Some(rel_id) = rel_id_attr(e)? {
                                info.master_rel_ids.push(rel_id);
                            }
                        }
                        b"sldId" => {
                            let id = attr(e, b"id")?
                                .and_then(|id| id.parse().ok())
                                .unwrap_or_default();
                            if let Some(rel_id) = rel_id_attr(e)? {
                                info.slides.push((id, rel_id));
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "Error parsing presentation: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(info)
    }
}

/// Elements of the presentation part that precede `p:sldIdLst`.
fn precedes_slide_list(local: &[u8]) -> bool {
    matches!(
        local,
        b"sldMasterIdLst" | b"notesMasterIdLst" | b"handoutMasterIdLst"
    )
}

/// Append `p:sldId` entries to the slide list of a presentation part.
///
/// The list is created right after the master id lists when the template
/// has none. Everything else in the part is copied through unchanged.
fn append_slide_ids(xml: &str, new_ids: &[(u32, &str)]) -> Result<String> {
    let xml_error = |e: quick_xml::Error| Error::parse(format!("Error rewriting presentation: {}", e));

    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    let mut names = SlideListNames::default();
    let mut depth = 0usize;
    let mut done = false;

    loop {
        let event = reader.read_event().map_err(xml_error)?;
        match event {
            Event::Start(ref e) => {
                if depth == 0 {
                    names = SlideListNames::from_root(e)?;
                } else if depth == 1 && !done {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"sldIdLst" {
                        writer.write_event(Event::Start(e.clone())).map_err(xml_error)?;
                        depth += 1;
                        continue;
                    }
                    if !precedes_slide_list(local) {
                        names.write_list(&mut writer, new_ids).map_err(xml_error)?;
                        done = true;
                    }
                }
                depth += 1;
                writer.write_event(Event::Start(e.clone())).map_err(xml_error)?;
            }
            Event::Empty(ref e) => {
                if depth == 1 && !done {
                    let name = e.name();
                    let local = local_name(name.as_ref());
                    if local == b"sldIdLst" {
                        names.write_list(&mut writer, new_ids).map_err(xml_error)?;
                        done = true;
                        continue;
                    }
                    if !precedes_slide_list(local) {
                        names.write_list(&mut writer, new_ids).map_err(xml_error)?;
                        done = true;
                    }
                }
                writer.write_event(Event::Empty(e.clone())).map_err(xml_error)?;
            }
            Event::End(ref e) => {
                depth = depth.saturating_sub(1);
                if !done {
                    if depth == 1 && local_name(e.name().as_ref()) == b"sldIdLst" {
                        names.write_entries(&mut writer, new_ids).map_err(xml_error)?;
                        done = true;
                    } else if depth == 0 {
                        names.write_list(&mut writer, new_ids).map_err(xml_error)?;
                        done = true;
                    }
                }
                writer.write_event(Event::End(e.clone())).map_err(xml_error)?;
            }
            Event::Eof => break,
            other => writer.write_event(other).map_err(xml_error)?,
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| Error::parse(format!("Rewritten presentation is not UTF-8: {}", e)))
}

/// Qualified names used when writing slide list entries.
#[derive(Debug)]
struct SlideListNames {
    list: String,
    entry: String,
    rel_attr: String,
    declare_rel_ns: bool,
}

impl Default for SlideListNames {
    fn default() -> Self {
        Self {
            list: "p:sldIdLst".to_string(),
            entry: "p:sldId".to_string(),
            rel_attr: "r:id".to_string(),
            declare_rel_ns: false,
        }
    }
}

impl SlideListNames {
    /// Take the element prefix and the relationships prefix from the root element.
    fn from_root(root: &BytesStart) -> Result<Self> {
        let qualify = |local: &str| match prefix(root.name().as_ref()) {
            Some(p) => format!("{}:{}", String::from_utf8_lossy(p), local),
            None => local.to_string(),
        };

        let mut rel_prefix = None;
        for attribute in root.attributes() {
            let attribute =
                attribute.map_err(|e| Error::parse(format!("Invalid attribute: {}", e)))?;
            let key = attribute.key.as_ref();
            if prefix(key) == Some(&b"xmlns"[..]) && &*attribute.value == R_NS.as_bytes() {
                rel_prefix = Some(String::from_utf8_lossy(local_name(key)).into_owned());
            }
        }

        Ok(Self {
            list: qualify("sldIdLst"),
            entry: qualify("sldId"),
            rel_attr: format!("{}:id", rel_prefix.as_deref().unwrap_or("r")),
            declare_rel_ns: rel_prefix.is_none(),
        })
    }

    fn write_list(
        &self,
        writer: &mut Writer<Vec<u8>>,
        new_ids: &[(u32, &str)],
    ) -> std::result::Result<(), quick_xml::Error> {
        writer.write_event(Event::Start(BytesStart::new(self.list.as_str())))?;
        self.write_entries(writer, new_ids)?;
        writer.write_event(Event::End(BytesEnd::new(self.list.as_str())))
    }

    fn write_entries(
        &self,
        writer: &mut Writer<Vec<u8>>,
        new_ids: &[(u32, &str)],
    ) -> std::result::Result<(), quick_xml::Error> {
        for (slide_id, rel_id) in new_ids {
            let id = slide_id.to_string();
            let mut entry = BytesStart::new(self.entry.as_str());
            if self.declare_rel_ns {
                entry.push_attribute(("xmlns:r", R_NS));
            }
            entry.push_attribute(("id", id.as_str()));
            entry.push_attribute((self.rel_attr.as_str(), *rel_id));
            writer.write_event(Event::Empty(entry))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Minimal templates built in memory.

    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

    /// `(shape name, ph type, idx)` of one layout placeholder.
    pub type PlaceholderDef<'a> = (&'a str, Option<&'a str>, Option<u32>);

    pub fn layout_xml(name: &str, placeholders: &[PlaceholderDef]) -> String {
        let shapes: String = placeholders
            .iter()
            .enumerate()
            .map(|(n, (shape_name, kind, idx))| {
                let mut ph = String::from("<p:ph");
                if let Some(kind) = kind {
                    ph.push_str(&format!(r#" type="{}""#, kind));
                }
                if let Some(idx) = idx {
                    ph.push_str(&format!(r#" idx="{}""#, idx));
                }
                ph.push_str("/>");
                format!(
                    r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>Layout text</a:t></a:r></a:p></p:txBody></p:sp>"#,
                    n + 2,
                    shape_name,
                    ph
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout {}><p:cSld name="{}"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
            NS, name, shapes
        )
    }

    /// The two layouts of the pitch deck template, in that order.
    pub fn deck_layouts() -> Vec<(String, String)> {
        vec![
            (
                "Layout_Tema_Padrao".to_string(),
                layout_xml(
                    "Layout_Tema_Padrao",
                    &[
                        ("Título 1", Some("ctrTitle"), None),
                        ("Subtítulo 2", Some("subTitle"), Some(1)),
                    ],
                ),
            ),
            (
                "Layout_Titulo_e_Conteudo".to_string(),
                layout_xml(
                    "Layout_Titulo_e_Conteudo",
                    &[
                        ("Título 1", Some("title"), None),
                        ("Espaço Reservado para Conteúdo 2", None, Some(1)),
                        ("Espaço Reservado para Data 3", Some("dt"), Some(10)),
                        ("Espaço Reservado para Rodapé 4", Some("ftr"), Some(11)),
                        ("Espaço Reservado para Número de Slide 5", Some("sldNum"), Some(12)),
                    ],
                ),
            ),
        ]
    }

    /// Build a `.pptx` whose single master owns `layouts` (name, xml), plus
    /// `slides` pre-existing blank slides on the first layout.
    pub fn template(layouts: &[(String, String)], slides: usize) -> Vec<u8> {
        let mut parts: Vec<(String, String)> = Vec::new();

        let mut overrides = String::from(
            r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#,
        );
        for n in 1..=layouts.len() {
            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/slideLayouts/slideLayout{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
                n
            ));
        }
        for n in 1..=slides {
            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                n
            ));
        }
        parts.push((
            "[Content_Types].xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
                overrides
            ),
        ));
        parts.push((
            "_rels/.rels".to_string(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#.to_string(),
        ));

        let mut slide_ids = String::new();
        let mut pres_rels = String::from(
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#,
        );
        for n in 1..=slides {
            slide_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1));
            pres_rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
                n + 1,
                n
            ));
            parts.push((
                format!("ppt/slides/slide{}.xml", n),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Existing {}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>Existing slide {}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
                    NS, n, n
                ),
            ));
            parts.push((
                format!("ppt/slides/_rels/slide{}.xml.rels", n),
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#.to_string(),
            ));
        }
        let slide_list = if slides > 0 {
            format!("<p:sldIdLst>{}</p:sldIdLst>", slide_ids)
        } else {
            String::new()
        };

        parts.push((
            "ppt/presentation.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>{}<p:sldSz cx="12192000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#,
                NS, slide_list
            ),
        ));
        parts.push((
            "ppt/_rels/presentation.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                pres_rels
            ),
        ));

        let mut layout_ids = String::new();
        let mut master_rels = String::new();
        for (n, (_, xml)) in layouts.iter().enumerate() {
            let n = n + 1;
            layout_ids.push_str(&format!(
                r#"<p:sldLayoutId id="{}" r:id="rId{}"/>"#,
                2147483648u64 + n as u64,
                n
            ));
            master_rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout{}.xml"/>"#,
                n, n
            ));
            parts.push((format!("ppt/slideLayouts/slideLayout{}.xml", n), xml.clone()));
            parts.push((
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", n),
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#.to_string(),
            ));
        }
        parts.push((
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster {}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:sldLayoutIdLst>{}</p:sldLayoutIdLst></p:sldMaster>"#,
                NS, layout_ids
            ),
        ));
        parts.push((
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
                master_rels
            ),
        ));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in &parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}
