/// Convenience result type used across hyperslice.
pub type HyperResult<T> = Result<T, HyperError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum HyperError {
    /// Invalid caller-provided data, such as an unknown preset key.
    #[error("validation error: {0}")]
    Validation(String),

    /// The session document could not be parsed at all.
    #[error("import error: {0}")]
    Import(String),

    /// Errors when serializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HyperError {
    /// Build a [`HyperError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HyperError::Import`] value.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`HyperError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for the error a collaborator shows as a failed import.
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
