//! Error types for the nbprint library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for nbprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during notebook conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the notebook or writing the artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input could not be parsed as structured notebook data.
    #[error("Malformed notebook: {0}")]
    MalformedInput(String),

    /// Internal invariant violation detected while composing the document,
    /// e.g. an outline anchor with no matching heading in the body.
    #[error("Composition error: {0}")]
    Composition(String),

    /// The typesetting runtime did not signal completion within the bound.
    ///
    /// Only surfaced when strict typesetting is requested; the default
    /// behavior is to paginate anyway and log a warning.
    #[error("Typesetting did not complete within {waited:?}")]
    RenderTimeout {
        /// How long the adapter waited for the completion signal.
        waited: Duration,
    },

    /// The rendering engine failed to start or crashed mid-session.
    #[error("Render engine error: {0}")]
    RenderEngine(String),

    /// The accent color is not a valid hex color string.
    #[error("Invalid accent color {0:?}: expected \"#rrggbb\" or \"#rgb\"")]
    InvalidColor(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(err.to_string())
    }
}
