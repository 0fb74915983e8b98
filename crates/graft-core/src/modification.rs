//! Structural type modifications contributed by schema modules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A structural edit applied to the contributed type graph.
///
/// Only [`TypeModification::Rename`] is interpreted during composition; every
/// variant is handed to the type registry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeModification {
    /// Renames a type. Field references to `old_name` follow the rename.
    Rename { old_name: String, new_name: String },

    /// Removes a field from a type.
    RemoveField {
        type_name: String,
        field_name: String,
    },
}

impl TypeModification {
    pub fn rename(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self::Rename {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }

    pub fn remove_field(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self::RemoveField {
            type_name: type_name.into(),
            field_name: field_name.into(),
        }
    }

    /// Name of the type this modification targets.
    pub fn target_type(&self) -> &str {
        match self {
            Self::Rename { old_name, .. } => old_name,
            Self::RemoveField { type_name, .. } => type_name,
        }
    }

    /// Returns `(old_name, new_name)` for rename modifications.
    pub fn as_rename(&self) -> Option<(&str, &str)> {
        match self {
            Self::Rename { old_name, new_name } => Some((old_name, new_name)),
            Self::RemoveField { .. } => None,
        }
    }
}

impl fmt::Display for TypeModification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rename { old_name, new_name } => write!(f, "rename {old_name} -> {new_name}"),
            Self::RemoveField {
                type_name,
                field_name,
            } => write!(f, "remove {type_name}.{field_name}"),
        }
    }
}
