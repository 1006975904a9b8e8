//! PPTX (Office Open XML) template handling.
//!
//! Loads a presentation template into memory, resolves its slide layouts by
//! name, appends slides created from those layouts and writes the result
//! back out as a `.pptx`. [`DeckReader`] reads the slides of any deck back.

mod xml;

pub mod content_types;
pub mod layout;
pub mod package;
pub mod populate;
pub mod presentation;
pub mod reader;
pub mod relationships;
pub mod slide;

pub use layout::{LayoutPlaceholder, PlaceholderType, SlideLayout};
pub use package::Package;
pub use populate::{fill_placeholders, populate, CONTENT_PREFIX, TITLE_PREFIX};
pub use presentation::{LayoutCatalog, Presentation, TemplateSlide};
pub use reader::{DeckReader, ShapeText, SlideContent};
pub use slide::{Placeholder, Slide};
