//! Old-name to new-name lookup derived from type modifications.

use std::collections::HashMap;

use graft_core::{TypeModification, validate_type_name};
use tracing::debug;

use crate::error::ComposeError;

/// Mapping from original type names to their replacement names.
///
/// Built from rename modifications only; other modification kinds are
/// ignored. Building never fails: conflicting renames are recorded and
/// reported by [`RenameIndex::ensure_consistent`] before the index is applied.
#[derive(Debug, Clone, Default)]
pub struct RenameIndex {
    renames: HashMap<String, String>,
    conflicts: Vec<RenameConflict>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenameConflict {
    type_name: String,
    first: String,
    second: String,
}

impl RenameIndex {
    /// Builds the index from the full modification set.
    pub fn from_modifications(modifications: &[TypeModification]) -> Self {
        let mut index = Self::default();
        for modification in modifications {
            match modification {
                TypeModification::Rename { old_name, new_name } => {
                    index.insert(old_name, new_name);
                }
                TypeModification::RemoveField { .. } => {}
            }
        }
        debug!(
            renames = index.renames.len(),
            conflicts = index.conflicts.len(),
            "Built rename index"
        );
        index
    }

    fn insert(&mut self, old_name: &str, new_name: &str) {
        match self.renames.get(old_name) {
            // The same rename contributed twice is harmless.
            Some(existing) if existing == new_name => {}
            Some(existing) => self.conflicts.push(RenameConflict {
                type_name: old_name.to_string(),
                first: existing.clone(),
                second: new_name.to_string(),
            }),
            None => {
                self.renames.insert(old_name.to_string(), new_name.to_string());
            }
        }
    }

    /// Returns the replacement name for `old_name`, if it is renamed.
    pub fn get(&self, old_name: &str) -> Option<&str> {
        self.renames.get(old_name).map(String::as_str)
    }

    pub fn contains(&self, old_name: &str) -> bool {
        self.renames.contains_key(old_name)
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Iterates over `(old_name, new_name)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames.iter().map(|(old, new)| (old.as_str(), new.as_str()))
    }

    /// Checks that the renames form a consistent mapping.
    ///
    /// # Errors
    ///
    /// - `ConflictingRename` if one type is renamed to two different names
    /// - `DuplicateTypeName` if two types are renamed to the same name
    /// - `InvalidTypeName` if a replacement name is not a valid GraphQL name
    pub fn ensure_consistent(&self) -> Result<(), ComposeError> {
        if let Some(conflict) = self.conflicts.first() {
            return Err(ComposeError::ConflictingRename {
                type_name: conflict.type_name.clone(),
                first: conflict.first.clone(),
                second: conflict.second.clone(),
            });
        }

        let mut targets: HashMap<&str, &str> = HashMap::with_capacity(self.renames.len());
        for (old_name, new_name) in self.iter() {
            validate_type_name(new_name)?;
            if targets.insert(new_name, old_name).is_some() {
                return Err(ComposeError::DuplicateTypeName(new_name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_renames_are_indexed() {
        let index = RenameIndex::from_modifications(&[
            TypeModification::rename("UserRef", "User"),
            TypeModification::remove_field("User", "password"),
            TypeModification::rename("OrderRef", "Order"),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("UserRef"), Some("User"));
        assert_eq!(index.get("OrderRef"), Some("Order"));
        assert!(!index.contains("User"));
        assert!(index.ensure_consistent().is_ok());
    }

    #[test]
    fn test_empty_modifications() {
        let index = RenameIndex::from_modifications(&[]);
        assert!(index.is_empty());
        assert!(index.ensure_consistent().is_ok());
    }

    #[test]
    fn test_repeated_identical_rename_is_accepted() {
        let index = RenameIndex::from_modifications(&[
            TypeModification::rename("UserRef", "User"),
            TypeModification::rename("UserRef", "User"),
        ]);
        assert_eq!(index.len(), 1);
        assert!(index.ensure_consistent().is_ok());
    }

    #[test]
    fn test_conflicting_renames_detected_on_check() {
        let index = RenameIndex::from_modifications(&[
            TypeModification::rename("UserRef", "User"),
            TypeModification::rename("UserRef", "Account"),
        ]);

        // First rename wins in the mapping; the conflict surfaces on check.
        assert_eq!(index.get("UserRef"), Some("User"));
        let err = index.ensure_consistent().unwrap_err();
        assert!(matches!(
            err,
            ComposeError::ConflictingRename { ref type_name, ref first, ref second }
                if type_name == "UserRef" && first == "User" && second == "Account"
        ));
    }

    #[test]
    fn test_two_types_renamed_to_same_name() {
        let index = RenameIndex::from_modifications(&[
            TypeModification::rename("UserRef", "User"),
            TypeModification::rename("Person", "User"),
        ]);
        assert!(matches!(
            index.ensure_consistent(),
            Err(ComposeError::DuplicateTypeName(name)) if name == "User"
        ));
    }

    #[test]
    fn test_invalid_target_name() {
        let index = RenameIndex::from_modifications(&[TypeModification::rename("UserRef", "user-v2")]);
        assert!(matches!(
            index.ensure_consistent(),
            Err(ComposeError::InvalidTypeName(_))
        ));
    }
}
