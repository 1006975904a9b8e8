//! Pitch deck generation: read the content controls of a Word document and
//! lay them out over the fixed ten-slide structure of a PowerPoint template.
//!
//! ```no_run
//! let path = deckgen::generate_in("ideia.docx", "modelo.pptx", ".")?;
//! println!("Saved {}", path.display());
//! # Ok::<(), deckgen::Error>(())
//! ```

use deckgen_docx::DocxExtractor;
use deckgen_pptx::{populate, Presentation};
use std::path::{Path, PathBuf};

pub use deckgen_core::{
    deck_plan, Error, Field, FieldMapping, Result, SlideSpec, DEFAULT_OUTPUT_FILENAME,
};

/// Fill `template` with the fields of `document` and return the finished deck.
///
/// Both inputs and the output are complete `.pptx`/`.docx` archives in memory.
pub fn generate(document: &[u8], template: &[u8]) -> Result<Vec<u8>> {
    let fields = DocxExtractor::new().extract_bytes(document)?;
    let mut presentation = Presentation::from_bytes(template)?;
    populate(&mut presentation, &deck_plan(&fields))?;
    presentation.to_bytes()
}

/// Load both files and build the populated presentation without saving it.
pub fn build_deck(
    document_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
) -> Result<Presentation> {
    let fields = deckgen_docx::extract(document_path)?;
    let mut presentation = Presentation::open(template_path)?;
    populate(&mut presentation, &deck_plan(&fields))?;
    Ok(presentation)
}

/// Build the deck and write it to `output_path`.
pub fn generate_to(
    document_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    build_deck(document_path, template_path)?.save(output_path)
}

/// Build the deck and write it as [`DEFAULT_OUTPUT_FILENAME`] inside `dir`.
pub fn generate_in(
    document_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let output_path = dir.as_ref().join(DEFAULT_OUTPUT_FILENAME);
    generate_to(document_path, template_path, &output_path)?;
    Ok(output_path)
}
