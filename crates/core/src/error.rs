//! Error types for pitch deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting fields or building a deck.
///
/// Every variant is terminal for the current run: nothing is retried and no
/// partial output is written.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read an input file or write the output deck.
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a readable ZIP archive, or a required part is missing.
    #[error("Archive error: {0}")]
    Archive(String),

    /// A part of the container holds malformed XML.
    #[error("XML parsing error: {0}")]
    Parse(String),

    /// The presentation template has no slide layout with this name.
    #[error("Layout '{0}' not found in template")]
    LayoutNotFound(String),
}

impl Error {
    /// Build an [`Error::Archive`] from anything displayable.
    pub fn archive(msg: impl std::fmt::Display) -> Self {
        Self::Archive(msg.to_string())
    }

    /// Build an [`Error::Parse`] from anything displayable.
    pub fn parse(msg: impl std::fmt::Display) -> Self {
        Self::Parse(msg.to_string())
    }
}
