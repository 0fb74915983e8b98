//! Composer configuration.
//!
//! Configuration can be loaded from TOML; every key is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! query_type_name = "QueryType"
//! mutation_type_name = "MutationType"
//! node_field_name = "node"
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```

use graft_core::validate_type_name;
use serde::{Deserialize, Serialize};

use crate::error::ComposeError;

/// Schema composer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposerConfig {
    /// Name of the Query root object.
    /// Default: "QueryType"
    #[serde(default = "default_query_type_name")]
    pub query_type_name: String,

    /// Name of the Mutation root object, when one is built.
    /// Default: "MutationType"
    #[serde(default = "default_mutation_type_name")]
    pub mutation_type_name: String,

    /// Name of the global id lookup field on the Query root.
    /// Default: "node"
    #[serde(default = "default_node_field_name")]
    pub node_field_name: String,

    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,
}

fn default_query_type_name() -> String {
    "QueryType".to_string()
}

fn default_mutation_type_name() -> String {
    "MutationType".to_string()
}

fn default_node_field_name() -> String {
    "node".to_string()
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            query_type_name: default_query_type_name(),
            mutation_type_name: default_mutation_type_name(),
            node_field_name: default_node_field_name(),
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
        }
    }
}

impl ComposerConfig {
    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::InvalidConfig` if the document cannot be parsed
    /// or the resulting configuration is invalid.
    pub fn from_toml(source: &str) -> Result<Self, ComposeError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ComposeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.max_depth == 0 {
            return Err(ComposeError::InvalidConfig("max_depth must be > 0".into()));
        }
        if self.max_complexity == 0 {
            return Err(ComposeError::InvalidConfig("max_complexity must be > 0".into()));
        }
        for name in [
            &self.query_type_name,
            &self.mutation_type_name,
            &self.node_field_name,
        ] {
            validate_type_name(name)?;
        }
        if self.query_type_name == self.mutation_type_name {
            return Err(ComposeError::InvalidConfig(
                "query_type_name and mutation_type_name must differ".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComposerConfig::default();
        assert_eq!(config.query_type_name, "QueryType");
        assert_eq!(config.mutation_type_name, "MutationType");
        assert_eq!(config.node_field_name, "node");
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_depth() {
        let config = ComposerConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ComposeError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_max_complexity() {
        let config = ComposerConfig {
            max_complexity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_root_names() {
        let config = ComposerConfig {
            mutation_type_name: "QueryType".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ComposerConfig {
            query_type_name: "Query Type".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ComposeError::InvalidTypeName(_))));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            query_type_name = "Query"
            max_depth = 20
            introspection = false
        "#;

        let config = ComposerConfig::from_toml(toml).unwrap();
        assert_eq!(config.query_type_name, "Query");
        assert_eq!(config.mutation_type_name, "MutationType");
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.max_complexity, 500);
        assert!(!config.introspection);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(ComposerConfig::from_toml("max_depth = 0").is_err());
        assert!(ComposerConfig::from_toml("max_depth = \"deep\"").is_err());
    }
}
