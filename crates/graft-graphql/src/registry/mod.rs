//! Type registry contract.
//!
//! The type registry turns the contributed schema descriptors and type
//! modifications into the named types of the final schema. Composition only
//! needs three things from it: the types themselves, their names, and whether
//! a Relay `Node` interface is among them.

mod memory;

use std::collections::HashSet;
use std::fmt;

use async_graphql::dynamic::Type;
use graft_core::{FileDescriptor, TypeModification};

use crate::error::ComposeError;

pub use memory::{FieldDefinition, InMemoryTypeRegistry, TypeDefinition, TypeKind};

/// Name of the Relay node interface.
pub const RELAY_NODE: &str = "Node";

/// Builds the schema's named types from descriptors and modifications.
pub trait TypeRegistry: Send + Sync {
    /// Builds the type set.
    ///
    /// Receives every modification, including kinds composition itself
    /// ignores.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::Registry` if the inputs cannot be converted.
    fn build(
        &self,
        descriptors: &[FileDescriptor],
        modifications: &[TypeModification],
    ) -> Result<RegisteredTypes, ComposeError>;
}

/// Named types produced by a [`TypeRegistry`].
#[derive(Default)]
pub struct RegisteredTypes {
    types: Vec<(String, Type)>,
    relay_node: Option<String>,
}

impl RegisteredTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named type.
    pub fn register(&mut self, name: impl Into<String>, ty: impl Into<Type>) {
        self.types.push((name.into(), ty.into()));
    }

    /// Marks `name` as the Relay node interface.
    pub fn set_relay_node(&mut self, name: impl Into<String>) {
        self.relay_node = Some(name.into());
    }

    /// Name of the Relay node interface, if the type set has one.
    pub fn relay_node(&self) -> Option<&str> {
        self.relay_node.as_deref()
    }

    pub fn has_relay_node(&self) -> bool {
        self.relay_node.is_some()
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Checks that no two types share a name.
    ///
    /// A rename whose target collides with an existing type shows up here.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::DuplicateTypeName` naming the first collision.
    pub fn ensure_unique_names(&self) -> Result<(), ComposeError> {
        let mut seen = HashSet::with_capacity(self.types.len());
        for name in self.type_names() {
            if !seen.insert(name) {
                return Err(ComposeError::DuplicateTypeName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Consumes the set, yielding the types for schema registration.
    pub fn into_types(self) -> impl Iterator<Item = Type> {
        self.types.into_iter().map(|(_, ty)| ty)
    }
}

impl fmt::Debug for RegisteredTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTypes")
            .field("types", &self.type_names().collect::<Vec<_>>())
            .field("relay_node", &self.relay_node)
            .finish()
    }
}
