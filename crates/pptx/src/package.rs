//! In-memory OPC package: every part of the ZIP container, in archive order.

use deckgen_core::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::io::{Read, Seek, Write};
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Part names of slides created by PowerPoint and by this crate.
static SLIDE_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// All parts of an OPC package, keyed by part name (no leading slash).
#[derive(Debug, Clone, Default)]
pub struct Package {
    parts: Vec<(String, Vec<u8>)>,
}

impl Package {
    /// Read every part of a ZIP container into memory.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::archive(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::archive(format!("Failed to read entry {}: {}", index, e)))?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().trim_start_matches('/').to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::archive(format!("Failed to read '{}': {}", name, e)))?;
            parts.push((name, data));
        }

        log::debug!("Loaded package with {} parts", parts.len());
        Ok(Self { parts })
    }

    /// Raw bytes of a part.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Whether the package holds a part with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Content of an XML part as text.
    pub fn read_xml(&self, name: &str) -> Result<&str> {
        let data = self
            .get(name)
            .ok_or_else(|| Error::archive(format!("File not found in archive '{}'", name)))?;
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::parse(format!("'{}' is not valid UTF-8: {}", name, e)))?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }

    /// Replace a part, or append it if the package does not hold it yet.
    pub fn set(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let name = name.into();
        let data = data.into();
        match self.parts.iter_mut().find(|(part, _)| *part == name) {
            Some((_, existing)) => *existing = data,
            None => self.parts.push((name, data)),
        }
    }

    /// Part names in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    /// Numbers already taken by `ppt/slides/slideN.xml` parts.
    pub(crate) fn slide_part_numbers(&self) -> BTreeSet<u32> {
        self.part_names()
            .filter_map(|name| SLIDE_PART_REGEX.captures(name))
            .filter_map(|caps| caps[1].parse().ok())
            .collect()
    }

    /// Write every part to a ZIP container, `[Content_Types].xml` first.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let ordered = self
            .parts
            .iter()
            .filter(|(name, _)| name == CONTENT_TYPES_PART)
            .chain(self.parts.iter().filter(|(name, _)| name != CONTENT_TYPES_PART));

        for (name, data) in ordered {
            zip.start_file(name.as_str(), options)
                .map_err(|e| Error::archive(format!("Failed to write '{}': {}", name, e)))?;
            zip.write_all(data)?;
        }

        zip.finish()
            .map_err(|e| Error::archive(format!("Failed to finish ZIP: {}", e)))
    }
}

/// Name of the content types part.
pub(crate) const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Relationships part belonging to `part` (`""` for the package itself).
pub(crate) fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns the relationship.
pub(crate) fn resolve_part_name(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source_part.split('/').collect();
    segments.pop();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }
    segments.retain(|segment| !segment.is_empty());
    segments.join("/")
}

/// Relative target from `source_part` to `target_part`, as written in a `.rels` part.
pub(crate) fn relative_target(source_part: &str, target_part: &str) -> String {
    let source_dir: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target: Vec<&str> = target_part.split('/').collect();

    let common = source_dir
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    // The file name itself is never part of the shared prefix.
    let common = common.min(target.len().saturating_sub(1));

    let mut segments: Vec<&str> = vec![".."; source_dir.len() - common];
    segments.extend_from_slice(&target[common..]);
    segments.join("/")
}
