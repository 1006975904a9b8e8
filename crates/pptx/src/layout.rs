//! Slide layouts and the placeholder shapes they define.

use crate::xml::{attr, local_name};
use deckgen_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

/// Placeholder type (`p:ph/@type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PlaceholderType {
    Title,
    CenterTitle,
    Subtitle,
    Body,
    Object,
    Chart,
    Table,
    ClipArt,
    Diagram,
    Media,
    Picture,
    Date,
    Footer,
    Header,
    SlideNumber,
    SlideImage,
    Other(String),
}

impl PlaceholderType {
    /// Parse the `type` attribute; a missing attribute means `obj`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.unwrap_or("obj") {
            "title" => Self::Title,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::Subtitle,
            "body" => Self::Body,
            "obj" => Self::Object,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::Diagram,
            "media" => Self::Media,
            "pic" => Self::Picture,
            "dt" => Self::Date,
            "ftr" => Self::Footer,
            "hdr" => Self::Header,
            "sldNum" => Self::SlideNumber,
            "sldImg" => Self::SlideImage,
            other => Self::Other(other.to_string()),
        }
    }

    /// Attribute value as written in `p:ph/@type`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Body => "body",
            Self::Object => "obj",
            Self::Chart => "chart",
            Self::Table => "tbl",
            Self::ClipArt => "clipArt",
            Self::Diagram => "dgm",
            Self::Media => "media",
            Self::Picture => "pic",
            Self::Date => "dt",
            Self::Footer => "ftr",
            Self::Header => "hdr",
            Self::SlideNumber => "sldNum",
            Self::SlideImage => "sldImg",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Base of the shape name given to this placeholder on a new slide.
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::Title | Self::CenterTitle => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body => "Text Placeholder",
            Self::Object => "Content Placeholder",
            Self::Chart => "Chart Placeholder",
            Self::Table => "Table Placeholder",
            Self::ClipArt => "ClipArt Placeholder",
            Self::Diagram => "SmartArt Placeholder",
            Self::Media => "Media Placeholder",
            Self::Picture => "Picture Placeholder",
            Self::Date => "Date Placeholder",
            Self::Footer => "Footer Placeholder",
            Self::Header => "Header Placeholder",
            Self::SlideNumber => "Slide Number Placeholder",
            Self::SlideImage => "Slide Image Placeholder",
            Self::Other(_) => "Placeholder",
        }
    }

    /// Whether a new slide inherits this placeholder from its layout.
    ///
    /// Date, footer and slide number placeholders stay on the layout.
    pub fn is_cloneable(&self) -> bool {
        !matches!(self, Self::Date | Self::Footer | Self::SlideNumber)
    }

    /// Whether a new slide gives this placeholder an empty text body.
    pub fn has_text_frame(&self) -> bool {
        matches!(
            self,
            Self::Title | Self::CenterTitle | Self::Subtitle | Self::Body | Self::Object
        )
    }
}

/// A placeholder shape defined on a layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutPlaceholder {
    /// Shape id (`p:cNvPr/@id`).
    pub id: u32,

    /// Shape name (`p:cNvPr/@name`).
    pub name: String,

    /// Placeholder type.
    pub kind: PlaceholderType,

    /// Orientation (`vert` or `horz`), if given.
    pub orient: Option<String>,

    /// Size (`full`, `half`, `quarter`), if given.
    pub size: Option<String>,

    /// Placeholder index, if given.
    pub idx: Option<u32>,
}

impl LayoutPlaceholder {
    /// Whether the placeholder is laid out vertically.
    pub fn is_vertical(&self) -> bool {
        self.orient.as_deref() == Some("vert")
    }
}

/// A slide layout of the template.
#[derive(Debug, Clone, Serialize)]
pub struct SlideLayout {
    /// Layout name (`p:cSld/@name`), empty if unnamed.
    pub name: String,

    /// Part name of the layout, e.g. `ppt/slideLayouts/slideLayout2.xml`.
    pub part_name: String,

    /// Placeholder shapes in document order.
    pub placeholders: Vec<LayoutPlaceholder>,
}

impl SlideLayout {
    /// Parse a slide layout part.
    pub fn parse(xml: &str, part_name: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut name = String::new();
        let mut placeholders = Vec::new();
        let mut stack: Vec<Vec<u8>> = Vec::new();
        let mut shape: Option<ShapeScan> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    scan_element(e, &stack, &mut name, &mut shape)?;
                    stack.push(local_name(e.name().as_ref()).to_vec());
                }
                Ok(Event::Empty(ref e)) => {
                    scan_element(e, &stack, &mut name, &mut shape)?;
                }
                Ok(Event::End(ref e)) => {
                    stack.pop();
                    let element = e.name();
                    let local = local_name(element.as_ref());
                    if is_shape(local) && stack.last().map(Vec::as_slice) == Some(&b"spTree"[..]) {
                        if let Some(placeholder) = shape.take().and_then(ShapeScan::finish) {
                            placeholders.push(placeholder);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::parse(format!(
                        "Error parsing layout '{}': {}",
                        part_name, e
                    )));
                }
                _ => {}
            }
        }

        log::debug!(
            "Layout '{}' ({}) has {} placeholders",
            name,
            part_name,
            placeholders.len()
        );

        Ok(Self {
            name,
            part_name: part_name.to_string(),
            placeholders,
        })
    }

    /// Names of the layout's placeholders, in document order.
    pub fn placeholder_names(&self) -> Vec<String> {
        self.placeholders.iter().map(|ph| ph.name.clone()).collect()
    }
}

/// Shape elements that may carry a placeholder.
fn is_shape(local: &[u8]) -> bool {
    matches!(local, b"sp" | b"pic" | b"graphicFrame" | b"cxnSp")
}

/// State collected for the top-level shape being read.
#[derive(Debug, Default)]
struct ShapeScan {
    id: u32,
    name: Option<String>,
    placeholder: Option<(PlaceholderType, Option<String>, Option<String>, Option<u32>)>,
}

impl ShapeScan {
    fn finish(self) -> Option<LayoutPlaceholder> {
        let (kind, orient, size, idx) = self.placeholder?;
        Some(LayoutPlaceholder {
            id: self.id,
            name: self.name.unwrap_or_default(),
            kind,
            orient,
            size,
            idx,
        })
    }
}

/// Handle an opening or empty element of a layout part.
fn scan_element(
    e: &BytesStart,
    stack: &[Vec<u8>],
    layout_name: &mut String,
    shape: &mut Option<ShapeScan>,
) -> Result<()> {
    let name = e.name();
    let local = local_name(name.as_ref());
    let parent = stack.last().map(Vec::as_slice);

    match local {
        b"cSld" => {
            *layout_name = attr(e, b"name")?.unwrap_or_default();
        }
        _ if is_shape(local) && parent == Some(&b"spTree"[..]) => {
            *shape = Some(ShapeScan::default());
        }
        b"cNvPr" => {
            if let Some(shape) = shape.as_mut().filter(|shape| shape.name.is_none()) {
                shape.id = attr(e, b"id")?
                    .and_then(|id| id.parse().ok())
                    .unwrap_or_default();
                shape.name = Some(attr(e, b"name")?.unwrap_or_default());
            }
        }
        b"ph" => {
            if let Some(shape) = shape.as_mut() {
                let kind = PlaceholderType::from_attr(attr(e, b"type")?.as_deref());
                let orient = attr(e, b"orient")?;
                let size = attr(e, b"sz")?;
                let idx = attr(e, b"idx")?.and_then(|idx| idx.parse().ok());
                shape.placeholder = Some((kind, orient, size, idx));
            }
        }
        _ => {}
    }

    Ok(())
}
