//! # graft-graphql
//!
//! Composes a single GraphQL schema from contributions registered
//! independently by many schema modules.
//!
//! Each module may contribute query fields, mutation fields, type
//! modifications such as renames, schema descriptors and per-type node
//! fetchers. This crate merges them into one consistent async-graphql
//! dynamic schema, exactly once per process:
//!
//! - Type renames are propagated into every query field that referenced the
//!   old name
//! - A Relay `node(id: ID!)` field dispatches global ids to the fetcher
//!   registered for the embedded type, when the registry defines `Node`
//! - The Mutation root exists only when mutation fields were contributed
//!
//! ## Configuration
//!
//! ```toml
//! query_type_name = "QueryType"
//! mutation_type_name = "MutationType"
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`rename`] - Rename index built from type modifications
//! - [`rewrite`] - Rename propagation into query fields
//! - [`node`] - Global id dispatch and the node field
//! - [`registry`] - Type registry contract and in-memory registry
//! - [`schema`] - Root assembly, composition and lazy loading
//! - [`error`] - Error types for composition

pub mod config;
pub mod error;
pub mod node;
pub mod registry;
pub mod rename;
pub mod rewrite;
pub mod schema;

// Re-export main types
pub use config::ComposerConfig;
pub use error::ComposeError;
pub use node::{NodeDispatcher, ResolvedNode};
pub use registry::{
    FieldDefinition, InMemoryTypeRegistry, RegisteredTypes, TypeDefinition, TypeKind,
    TypeRegistry, RELAY_NODE,
};
pub use rename::RenameIndex;
pub use rewrite::{rewrite_field, rewrite_query_fields};
pub use schema::{LazySchema, SchemaComposer, SchemaState};

/// Result type for composition operations.
pub type Result<T> = std::result::Result<T, ComposeError>;
