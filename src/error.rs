use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid cascade: {0}")]
    Structural(String),

    #[error("malformed feature: expected 10 or 15 rectangle values, got {found}")]
    FeatureArity { found: usize },
}

impl Error {
    /// A required element is absent at its expected nesting level.
    pub fn missing(element: &str, context: impl std::fmt::Display) -> Self {
        Error::Structural(format!("missing <{}> in {}", element, context))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
