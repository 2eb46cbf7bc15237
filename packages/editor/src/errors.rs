//! Error types for the editor

use blockkit_document::ParseError;
use blockkit_import::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
