//! In-memory type registry.
//!
//! This module provides `InMemoryTypeRegistry`, a registry holding plain type
//! definitions grouped by descriptor file name. Building it for a set of
//! descriptors selects the types those files declare, applies the type
//! modifications and produces dynamic object and interface types whose fields
//! read straight from the parent object value.
//!
//! It is suitable for hosting processes that describe their types in code and
//! for exercising the composer without a protobuf toolchain.

use std::collections::{HashMap, HashSet};

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, Interface, InterfaceField, Object, TypeRef};
use graft_core::{FileDescriptor, TypeModification};
use tracing::{debug, trace};

use super::{RELAY_NODE, RegisteredTypes, TypeRegistry};
use crate::error::ComposeError;
use crate::rename::RenameIndex;

/// Kind of a registry type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Object type implementing the listed interfaces.
    Object { implements: Vec<String> },
    /// Interface type.
    Interface,
}

/// Field of a registry type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    /// Named type of the field, or of its items for list fields.
    pub type_name: String,
    /// Non-null field (and non-null items for lists).
    pub required: bool,
    pub list: bool,
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            required: false,
            list: false,
            description: None,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn type_ref(&self) -> TypeRef {
        match (self.list, self.required) {
            (false, false) => TypeRef::named(self.type_name.clone()),
            (false, true) => TypeRef::named_nn(self.type_name.clone()),
            (true, false) => TypeRef::named_list(self.type_name.clone()),
            (true, true) => TypeRef::named_nn_list_nn(self.type_name.clone()),
        }
    }
}

/// Plain description of a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object {
                implements: Vec::new(),
            },
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Interface,
            description: None,
            fields: Vec::new(),
        }
    }

    /// The Relay `Node` interface with its `id: ID!` field.
    pub fn relay_node() -> Self {
        Self::interface(RELAY_NODE).field(FieldDefinition::new("id", TypeRef::ID).required())
    }

    /// Declares that this object implements `interface`. No-op for interfaces.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        if let TypeKind::Object { implements } = &mut self.kind {
            implements.push(interface.into());
        }
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn apply_renames(&mut self, renames: &RenameIndex) {
        if let Some(new_name) = renames.get(&self.name) {
            trace!(from = %self.name, to = new_name, "Renaming registry type");
            self.name = new_name.to_string();
        }
        for field in &mut self.fields {
            if let Some(new_name) = renames.get(&field.type_name) {
                field.type_name = new_name.to_string();
            }
        }
        if let TypeKind::Object { implements } = &mut self.kind {
            for interface in implements.iter_mut() {
                if let Some(new_name) = renames.get(interface) {
                    *interface = new_name.to_string();
                }
            }
        }
    }

    fn remove_field(&mut self, field_name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|field| field.name != field_name);
        self.fields.len() != before
    }

    fn register_into(self, types: &mut RegisteredTypes) {
        match self.kind {
            TypeKind::Object { implements } => {
                let mut object = Object::new(self.name.clone());
                if let Some(description) = self.description {
                    object = object.description(description);
                }
                for interface in implements {
                    object = object.implement(interface);
                }
                for field in self.fields {
                    object = object.field(parent_value_field(field));
                }
                types.register(self.name, object);
            }
            TypeKind::Interface => {
                let mut interface = Interface::new(self.name.clone());
                if let Some(description) = self.description {
                    interface = interface.description(description);
                }
                for field in self.fields {
                    let ty = field.type_ref();
                    let mut interface_field = InterfaceField::new(field.name, ty);
                    if let Some(description) = field.description {
                        interface_field = interface_field.description(description);
                    }
                    interface = interface.field(interface_field);
                }
                types.register(self.name, interface);
            }
        }
    }
}

/// Creates an object field resolved from the parent object's entry of the
/// same name.
fn parent_value_field(definition: FieldDefinition) -> Field {
    let ty = definition.type_ref();
    let key = definition.name.clone();
    let field = Field::new(definition.name, ty, move |ctx| {
        let key = key.clone();
        FieldFuture::new(async move {
            if let Some(Value::Object(obj)) = ctx.parent_value.as_value()
                && let Some(value) = obj.get(key.as_str())
            {
                return Ok(Some(value.clone()));
            }
            Ok(None)
        })
    });
    match definition.description {
        Some(description) => field.description(description),
        None => field,
    }
}

/// Drops `implements` entries naming interfaces outside the type set and
/// returns the interface names that are present.
///
/// `Node` is opted into by including the descriptor that declares it.
fn retain_known_interfaces(definitions: &mut [TypeDefinition]) -> HashSet<String> {
    let interfaces: HashSet<String> = definitions
        .iter()
        .filter(|definition| definition.kind == TypeKind::Interface)
        .map(|definition| definition.name.clone())
        .collect();
    for definition in definitions.iter_mut() {
        if let TypeKind::Object { implements } = &mut definition.kind {
            implements.retain(|interface| interfaces.contains(interface));
        }
    }
    interfaces
}

/// In-memory type registry keyed by descriptor file name.
///
/// # Example
///
/// ```ignore
/// let registry = InMemoryTypeRegistry::new()
///     .with_file("relay.proto", vec![TypeDefinition::relay_node()])
///     .with_file(
///         "user.proto",
///         vec![TypeDefinition::object("UserRef")
///             .implements("Node")
///             .field(FieldDefinition::new("id", TypeRef::ID).required())],
///     );
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTypeRegistry {
    files: HashMap<String, Vec<TypeDefinition>>,
}

impl InMemoryTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the types declared by descriptor file `name`.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, types: Vec<TypeDefinition>) -> Self {
        self.add_file(name, types);
        self
    }

    pub fn add_file(&mut self, name: impl Into<String>, types: Vec<TypeDefinition>) {
        self.files.entry(name.into()).or_default().extend(types);
    }

    /// Collects the definitions declared by `descriptors`, each file once.
    fn select(&self, descriptors: &[FileDescriptor]) -> Result<Vec<TypeDefinition>, ComposeError> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for descriptor in descriptors {
            if !seen.insert(descriptor.name.as_str()) {
                continue;
            }
            let types = self.files.get(&descriptor.name).ok_or_else(|| {
                ComposeError::Registry(format!("unknown descriptor file '{}'", descriptor.name))
            })?;
            selected.extend(types.iter().cloned());
        }
        Ok(selected)
    }
}

impl TypeRegistry for InMemoryTypeRegistry {
    fn build(
        &self,
        descriptors: &[FileDescriptor],
        modifications: &[TypeModification],
    ) -> Result<RegisteredTypes, ComposeError> {
        let mut definitions = self.select(descriptors)?;

        // Field removals address types by their original names.
        for modification in modifications {
            if let TypeModification::RemoveField {
                type_name,
                field_name,
            } = modification
            {
                let removed = definitions
                    .iter_mut()
                    .filter(|definition| &definition.name == type_name)
                    .fold(false, |removed, definition| {
                        definition.remove_field(field_name) || removed
                    });
                if !removed {
                    return Err(ComposeError::Registry(format!(
                        "cannot remove {type_name}.{field_name}: no such field"
                    )));
                }
            }
        }

        let renames = RenameIndex::from_modifications(modifications);
        for definition in &mut definitions {
            definition.apply_renames(&renames);
        }

        let interfaces = retain_known_interfaces(&mut definitions);

        let mut types = RegisteredTypes::new();
        if interfaces.contains(RELAY_NODE) {
            types.set_relay_node(RELAY_NODE);
        }
        for definition in definitions {
            definition.register_into(&mut types);
        }

        debug!(
            descriptors = descriptors.len(),
            types = types.len(),
            relay_node = types.has_relay_node(),
            "Built in-memory type registry"
        );
        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> InMemoryTypeRegistry {
        InMemoryTypeRegistry::new()
            .with_file("relay.proto", vec![TypeDefinition::relay_node()])
            .with_file(
                "user.proto",
                vec![
                    TypeDefinition::object("UserRef")
                        .implements(RELAY_NODE)
                        .field(FieldDefinition::new("id", TypeRef::ID).required())
                        .field(FieldDefinition::new("name", TypeRef::STRING))
                        .field(FieldDefinition::new("password", TypeRef::STRING)),
                    TypeDefinition::object("Team")
                        .field(FieldDefinition::new("members", "UserRef").list().required()),
                ],
            )
    }

    fn names(types: &RegisteredTypes) -> Vec<&str> {
        let mut names: Vec<&str> = types.type_names().collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn test_selects_only_requested_files() {
        let types = registry()
            .build(&[FileDescriptor::new("user.proto", "acme.user")], &[])
            .unwrap();

        assert_eq!(names(&types), ["Team", "UserRef"]);
        assert!(!types.has_relay_node());
    }

    #[test]
    fn test_missing_interfaces_are_not_implemented() {
        let mut definitions = registry().select(&[FileDescriptor::new("user.proto", "acme.user")]).unwrap();
        let interfaces = retain_known_interfaces(&mut definitions);

        assert!(interfaces.is_empty());
        assert_eq!(definitions[0].kind, TypeKind::Object { implements: vec![] });

        let mut definitions = registry()
            .select(&[
                FileDescriptor::new("relay.proto", "relay"),
                FileDescriptor::new("user.proto", "acme.user"),
            ])
            .unwrap();
        let interfaces = retain_known_interfaces(&mut definitions);

        assert!(interfaces.contains(RELAY_NODE));
        assert_eq!(
            definitions[1].kind,
            TypeKind::Object {
                implements: vec![RELAY_NODE.to_string()]
            }
        );
    }

    #[test]
    fn test_relay_node_detected() {
        let types = registry()
            .build(
                &[
                    FileDescriptor::new("relay.proto", "relay"),
                    FileDescriptor::new("user.proto", "acme.user"),
                ],
                &[],
            )
            .unwrap();

        assert_eq!(types.relay_node(), Some(RELAY_NODE));
    }

    #[test]
    fn test_duplicate_descriptor_selected_once() {
        let user = FileDescriptor::new("user.proto", "acme.user");
        let types = registry().build(&[user.clone(), user], &[]).unwrap();
        assert_eq!(types.len(), 2);
        assert!(types.ensure_unique_names().is_ok());
    }

    #[test]
    fn test_unknown_descriptor_fails() {
        let err = registry()
            .build(&[FileDescriptor::new("missing.proto", "acme")], &[])
            .unwrap_err();
        assert!(matches!(err, ComposeError::Registry(msg) if msg.contains("missing.proto")));
    }

    #[test]
    fn test_renames_apply_to_types_and_references() {
        let mut definitions = registry().select(&[FileDescriptor::new("user.proto", "acme.user")]).unwrap();
        let renames = RenameIndex::from_modifications(&[TypeModification::rename("UserRef", "User")]);
        for definition in &mut definitions {
            definition.apply_renames(&renames);
        }

        assert_eq!(definitions[0].name, "User");
        assert_eq!(definitions[1].fields[0].type_name, "User");
    }

    #[test]
    fn test_remove_field() {
        let mut definitions = registry().select(&[FileDescriptor::new("user.proto", "acme.user")]).unwrap();
        assert!(definitions[0].remove_field("password"));
        assert!(!definitions[0].remove_field("password"));
        assert_eq!(definitions[0].fields.len(), 2);

        let err = registry()
            .build(
                &[FileDescriptor::new("user.proto", "acme.user")],
                &[TypeModification::remove_field("UserRef", "nickname")],
            )
            .unwrap_err();
        assert!(matches!(err, ComposeError::Registry(msg) if msg.contains("UserRef.nickname")));
    }

    #[test]
    fn test_field_type_refs() {
        assert_eq!(FieldDefinition::new("a", "User").type_ref(), TypeRef::named("User"));
        assert_eq!(
            FieldDefinition::new("a", "User").required().type_ref(),
            TypeRef::named_nn("User")
        );
        assert_eq!(
            FieldDefinition::new("a", "User").list().type_ref(),
            TypeRef::named_list("User")
        );
        assert_eq!(
            FieldDefinition::new("a", "User").list().required().type_ref(),
            TypeRef::named_nn_list_nn("User")
        );
    }
}
