//! Error types for schema composition.
//!
//! Errors fall in two groups. Construction-time errors make the schema fail
//! to build and are fatal to schema availability. Request-time errors are
//! raised while resolving the `node` field and are returned to the caller of
//! that field only.

use async_graphql::ErrorExtensions;
use graft_core::CoreError;
use thiserror::Error;

/// Errors that can occur while composing or serving the schema.
#[derive(Debug, Clone, Error)]
pub enum ComposeError {
    /// Two modifications rename the same type to different names.
    #[error("Conflicting renames for type {type_name}: '{first}' and '{second}'")]
    ConflictingRename {
        type_name: String,
        first: String,
        second: String,
    },

    /// Two types share a name after modifications were applied.
    #[error("Duplicate type name '{0}' after applying modifications")]
    DuplicateTypeName(String),

    /// Two distinct fields with the same name were contributed to one root.
    #[error("Duplicate field '{field}' on root type {root}")]
    DuplicateField { root: String, field: String },

    /// Two node fetchers were registered for the same type.
    #[error("Duplicate node fetcher registered for type={0}")]
    DuplicateNodeFetcher(String),

    /// A type or root name does not follow the GraphQL name grammar.
    #[error("Invalid type name: {0}")]
    InvalidTypeName(String),

    /// The type registry rejected its inputs.
    #[error("Type registry error: {0}")]
    Registry(String),

    /// The schema library rejected the combined type graph.
    #[error("Failed to build GraphQL schema: {0}")]
    SchemaBuildFailed(String),

    /// Invalid composer configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A global id decoded to a type with no registered fetcher.
    #[error("Relay Node fetcher not implemented for type={type_name}")]
    UnresolvedNode { type_name: String },

    /// A global id could not be decoded.
    #[error("Invalid global id '{id}': {reason}")]
    InvalidGlobalId { id: String, reason: String },

    /// A node fetcher failed.
    #[error("Node fetch failed: {0}")]
    NodeFetch(String),
}

impl ComposeError {
    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictingRename { .. } => "CONFLICTING_RENAME",
            Self::DuplicateTypeName(_) => "DUPLICATE_TYPE_NAME",
            Self::DuplicateField { .. } => "DUPLICATE_FIELD",
            Self::DuplicateNodeFetcher(_) => "DUPLICATE_NODE_FETCHER",
            Self::InvalidTypeName(_) => "INVALID_TYPE_NAME",
            Self::Registry(_) => "REGISTRY_ERROR",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnresolvedNode { .. } => "UNRESOLVED_NODE",
            Self::InvalidGlobalId { .. } => "INVALID_GLOBAL_ID",
            Self::NodeFetch(_) => "NODE_FETCH_FAILED",
        }
    }

    /// Returns true for construction-time errors, which prevent any schema
    /// from being served.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnresolvedNode { .. } | Self::InvalidGlobalId { .. } | Self::NodeFetch(_)
        )
    }

    /// Converts a request-time error into a GraphQL field error carrying
    /// the error code as an extension.
    #[must_use]
    pub fn into_graphql_error(self) -> async_graphql::Error {
        let code = self.error_code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}

impl From<CoreError> for ComposeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTypeName(name) => Self::InvalidTypeName(name),
            CoreError::InvalidGlobalId { id, reason } => Self::InvalidGlobalId { id, reason },
            other @ CoreError::NodeFetch { .. } => Self::NodeFetch(other.to_string()),
            other => Self::Registry(other.to_string()),
        }
    }
}
