pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

/// Failures of the geometry-identify exchange.
///
/// Transport and parse failures are logged by the caller and never surface
/// to the user; an empty result set is not an error (see
/// [`IdentifyResponse::first_match`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    Transport(String),
    Malformed(String),
}

impl std::fmt::Display for IdentifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifyError::Transport(msg) => write!(f, "identify request failed: {msg}"),
            IdentifyError::Malformed(msg) => write!(f, "identify response malformed: {msg}"),
        }
    }
}

impl std::error::Error for IdentifyError {}
