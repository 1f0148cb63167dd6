/// Convenience result type used across camlkit.
pub type CamlResult<T> = Result<T, CamlError>;

/// Error taxonomy of the codec and document APIs.
#[derive(thiserror::Error, Debug)]
pub enum CamlError {
    /// Malformed or structurally unusable CAML markup, or a writer failure.
    #[error("xml error: {0}")]
    Xml(String),

    /// A layer tree or document that cannot be encoded as given.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing the JSON document form.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failures while loading or saving documents.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CamlError {
    /// Build a [`CamlError::Xml`] value.
    pub fn xml(msg: impl Into<String>) -> Self {
        Self::Xml(msg.into())
    }

    /// Build a [`CamlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CamlError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CamlError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
