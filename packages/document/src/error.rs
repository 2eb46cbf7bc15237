use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Structural errors found while parsing stylesheet text.
///
/// Markup parsing is lenient and never produces one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unclosed block starting at offset {offset}")]
    UnclosedBlock { offset: usize },

    #[error("Unexpected '}}' at offset {offset}")]
    UnexpectedClose { offset: usize },

    #[error("Unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },

    #[error("Expected a selector before '{{' at offset {offset}")]
    MissingSelector { offset: usize },
}

impl ParseError {
    /// Byte offset in the source where the error was detected
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnclosedBlock { offset }
            | ParseError::UnexpectedClose { offset }
            | ParseError::UnterminatedComment { offset }
            | ParseError::MissingSelector { offset } => *offset,
        }
    }
}
