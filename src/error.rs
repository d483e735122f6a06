//! Crate error type.
//!
//! Every variant describes a feature that could not be set up or an action
//! that could not be completed. Callers log these and carry on; none of them
//! is fatal to the page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page configuration is malformed or out of range.
    #[error("invalid page config: {0}")]
    Config(String),
    /// A countdown duration attribute did not start with a number.
    #[error("invalid countdown duration {0:?}")]
    InvalidDuration(String),
    /// A media query could not be parsed.
    #[error("unsupported media query {0:?}")]
    MediaQuery(String),
    /// An element the feature depends on is not in the document.
    #[error("element not found: {0}")]
    MissingElement(String),
    /// A tree mutation or DOM call failed.
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The media-capture capability failed.
    #[error("camera unavailable: {0}")]
    Camera(String),
}
