//! Core domain types for pitch deck generation: the field catalog, the
//! extracted field mapping, and the fixed slide structure of the deck.

pub mod error;
pub mod fields;
pub mod plan;

pub use error::{Error, Result};
pub use fields::{Field, FieldMapping};
pub use plan::{
    deck_plan, SlideSpec, DEFAULT_OUTPUT_FILENAME, THEME_LAYOUT, TITLE_AND_CONTENT_LAYOUT,
};
