//! Error types for the import flow

use blockkit_document::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("An import is already in progress")]
    ImportInProgress,

    #[error("Invalid structured update file: {0}")]
    InvalidUpdates(#[from] serde_json::Error),

    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stylesheet error: {0}")]
    Stylesheet(#[from] ParseError),
}
