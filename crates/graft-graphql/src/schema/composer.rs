//! Schema composer.
//!
//! This module provides `SchemaComposer`, which merges the contributions of
//! all schema modules into one async-graphql dynamic schema. The composer
//! reconciles renames across modules, wires global id resolution and
//! assembles the root types around the registry's type set.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use graft_core::{Contributions, GlobalIdCodec, RelayGlobalIdCodec};
use tracing::{debug, info};

use super::roots::{build_mutation_root, build_query_root};
use crate::config::ComposerConfig;
use crate::error::ComposeError;
use crate::node::NodeDispatcher;
use crate::registry::TypeRegistry;
use crate::rename::RenameIndex;
use crate::rewrite::rewrite_query_fields;

/// Composes a GraphQL schema from module contributions.
///
/// The composition process:
/// 1. Rename modifications are indexed and checked for conflicts
/// 2. Query field references to renamed types are rewritten
/// 3. The type registry builds the named types
/// 4. If the registry has a `Node` interface, the node dispatcher is built
///    and a `node(id: ID!)` field is added to the Query root
/// 5. The Mutation root is built only when mutation fields exist
/// 6. Everything is registered and validated by async-graphql
///
/// # Example
///
/// ```ignore
/// let contributions = Contributions::from_modules(&modules);
/// let composer = SchemaComposer::new(
///     contributions,
///     Arc::new(registry),
///     ComposerConfig::default(),
/// );
///
/// let schema = composer.build()?;
/// ```
pub struct SchemaComposer {
    contributions: Contributions,
    registry: Arc<dyn TypeRegistry>,
    codec: Arc<dyn GlobalIdCodec>,
    config: ComposerConfig,
}

impl SchemaComposer {
    /// Creates a composer using the Relay global id codec.
    #[must_use]
    pub fn new(
        contributions: Contributions,
        registry: Arc<dyn TypeRegistry>,
        config: ComposerConfig,
    ) -> Self {
        Self {
            contributions,
            registry,
            codec: Arc::new(RelayGlobalIdCodec),
            config,
        }
    }

    /// Replaces the global id codec used by the node field.
    #[must_use]
    pub fn with_codec(mut self, codec: Arc<dyn GlobalIdCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn contributions(&self) -> &Contributions {
        &self.contributions
    }

    /// Builds the schema.
    ///
    /// # Errors
    ///
    /// Every inconsistency is fatal and aborts the build. This includes
    /// conflicting renames, duplicate type names and root fields, duplicate
    /// node fetchers (whether or not the node field is built), registry
    /// failures and schema validation failures.
    pub fn build(&self) -> Result<Schema, ComposeError> {
        self.config.validate()?;
        info!(
            queries = self.contributions.queries().len(),
            mutations = self.contributions.mutations().len(),
            modifications = self.contributions.modifications().len(),
            descriptors = self.contributions.descriptors().len(),
            "Composing GraphQL schema"
        );

        let renames = RenameIndex::from_modifications(self.contributions.modifications());
        renames.ensure_consistent()?;
        let queries = rewrite_query_fields(self.contributions.queries(), &renames);

        let types = self.registry.build(
            self.contributions.descriptors(),
            self.contributions.modifications(),
        )?;
        types.ensure_unique_names()?;
        let mut roots = vec![&self.config.query_type_name];
        if !self.contributions.mutations().is_empty() {
            roots.push(&self.config.mutation_type_name);
        }
        for root in roots {
            if types.type_names().any(|name| name == root.as_str()) {
                return Err(ComposeError::DuplicateTypeName(root.clone()));
            }
        }

        // Fetchers must be unique per type even when the node field is omitted.
        let dispatcher =
            NodeDispatcher::new(self.contributions.node_fetchers(), Arc::clone(&self.codec))?;
        let node_field = match types.relay_node() {
            Some(node_interface) => {
                Some(dispatcher.into_field(&self.config.node_field_name, node_interface))
            }
            None => {
                debug!(
                    ignored_fetchers = self.contributions.node_fetchers().len(),
                    "No Node interface registered, omitting node field"
                );
                None
            }
        };

        let query = build_query_root(
            &self.config.query_type_name,
            &queries,
            node_field.map(|field| (self.config.node_field_name.as_str(), field)),
        )?;
        let mutation =
            build_mutation_root(&self.config.mutation_type_name, self.contributions.mutations())?;

        let mut schema_builder = Schema::build(
            &self.config.query_type_name,
            mutation.as_ref().map(|_| self.config.mutation_type_name.as_str()),
            None,
        );

        let type_count = types.len();
        for ty in types.into_types() {
            schema_builder = schema_builder.register(ty);
        }
        schema_builder = schema_builder.register(query);
        if let Some(mutation) = mutation {
            schema_builder = schema_builder.register(mutation);
        }

        // Configure limits
        schema_builder = schema_builder
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);

        if !self.config.introspection {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| ComposeError::SchemaBuildFailed(e.to_string()))?;

        info!(types = type_count, "GraphQL schema composed");
        Ok(schema)
    }
}
