pub mod sprite;
pub mod style_doc;

pub use sprite::*;
pub use style_doc::*;

/// Errors for style-document and sprite payload handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    Corrupt(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Corrupt(msg) => write!(f, "malformed payload: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}
