//! Error types for samhita operations.

use thiserror::Error;

/// Errors that can abort a conversion.
///
/// Missing optional elements and unparsable numeric attributes are not
/// errors: they fall back to documented defaults during the walk.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// The mandatory top-level container is absent.
    #[error("{0}")]
    Structure(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn book_not_found() -> Self {
        Error::Structure("book container not found".to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
