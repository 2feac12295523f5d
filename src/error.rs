//! Error types for invoice generation.
//!
//! Internal stages report fine-grained variants. The public entry points in
//! [`crate::export`] log those and collapse them into [`Error::GenerationFailed`]
//! or [`Error::PrintFailed`].

/// Result type alias for invoice generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating invoice documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Barcode symbol could not be rendered
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// Image decoding or encoding failed
    #[error("Image error: {0}")]
    Image(String),

    /// Capturing the visual surface failed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// The byte sink reported a failure
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// The host print facility reported a failure
    #[error("Print host failed: {0}")]
    PrintHost(String),

    /// Input data could not be used
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Coarse error returned by the document export entry points
    #[error("PDF:n luonti epäonnistui: {0}")]
    GenerationFailed(String),

    /// Coarse error returned by the print entry point
    #[error("Tulostus epäonnistui: {0}")]
    PrintFailed(String),
}

impl Error {
    /// Collapse any error into the coarse export error.
    ///
    /// Already-coarse errors pass through unchanged.
    pub fn into_generation_failure(self) -> Self {
        match self {
            Error::GenerationFailed(_) | Error::PrintFailed(_) => self,
            other => Error::GenerationFailed(other.to_string()),
        }
    }

    /// Collapse any error into the coarse print error.
    pub fn into_print_failure(self) -> Self {
        match self {
            Error::GenerationFailed(_) | Error::PrintFailed(_) => self,
            other => Error::PrintFailed(other.to_string()),
        }
    }

    /// Whether this is one of the coarse errors exposed at the public boundary.
    pub fn is_coarse(&self) -> bool {
        matches!(self, Error::GenerationFailed(_) | Error::PrintFailed(_))
    }
}
