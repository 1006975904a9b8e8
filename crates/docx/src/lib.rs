//! DOCX (WordprocessingML) backend: reads the aliased content controls of a
//! Word document into a [`FieldMapping`].

pub mod extractor;

pub use extractor::DocxExtractor;

use deckgen_core::{FieldMapping, Result};
use std::path::Path;

/// Extract the field mapping from the DOCX file at `path`.
pub fn extract(path: impl AsRef<Path>) -> Result<FieldMapping> {
    DocxExtractor::new().extract_path(path)
}
