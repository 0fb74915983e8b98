use thiserror::Error;

/// Core error types for Graft contributions
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid type name: {0}")]
    InvalidTypeName(String),

    #[error("Invalid global id '{id}': {reason}")]
    InvalidGlobalId { id: String, reason: String },

    #[error("Node fetch failed for {type_name}/{id}: {message}")]
    NodeFetch {
        type_name: String,
        id: String,
        message: String,
    },

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),
}

impl CoreError {
    /// Create a new InvalidTypeName error
    pub fn invalid_type_name(name: impl Into<String>) -> Self {
        Self::InvalidTypeName(name.into())
    }

    /// Create a new InvalidGlobalId error
    pub fn invalid_global_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGlobalId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a new NodeFetch error
    pub fn node_fetch(
        type_name: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::NodeFetch {
            type_name: type_name.into(),
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
