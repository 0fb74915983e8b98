//! Global id resolution through the Relay `node` field.
//!
//! The dispatcher maps type names to node resolvers. A lookup decodes the
//! global id, picks the resolver registered for the embedded type tag and
//! invokes it with the type-local id. A tag without a resolver fails loudly
//! instead of resolving to `null`.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, TypeRef};
use graft_core::{GlobalIdCodec, NodeDataFetcher, NodeResolver};
use tracing::{debug, trace};

use crate::error::ComposeError;

/// An object resolved through a global id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    /// Concrete type of the object, taken from the global id.
    pub type_name: String,
    /// Object data.
    pub value: serde_json::Value,
}

impl ResolvedNode {
    /// Converts the object into a GraphQL value tagged with its concrete type.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::NodeFetch` if the data is not representable as
    /// a GraphQL value.
    pub fn into_field_value<'a>(self) -> Result<FieldValue<'a>, ComposeError> {
        let value = Value::from_json(self.value)
            .map_err(|e| ComposeError::NodeFetch(format!("invalid {} data: {e}", self.type_name)))?;
        Ok(FieldValue::value(value).with_type(self.type_name))
    }
}

/// Dispatches global id lookups to per-type resolvers.
#[derive(Clone)]
pub struct NodeDispatcher {
    resolvers: HashMap<String, Arc<dyn NodeResolver>>,
    codec: Arc<dyn GlobalIdCodec>,
}

impl NodeDispatcher {
    /// Builds the dispatch table from node fetcher contributions.
    ///
    /// # Errors
    ///
    /// Returns `ComposeError::DuplicateNodeFetcher` if two fetchers are
    /// registered for the same type.
    pub fn new(
        fetchers: &[NodeDataFetcher],
        codec: Arc<dyn GlobalIdCodec>,
    ) -> Result<Self, ComposeError> {
        let mut resolvers: HashMap<String, Arc<dyn NodeResolver>> =
            HashMap::with_capacity(fetchers.len());
        for fetcher in fetchers {
            let previous = resolvers.insert(
                fetcher.type_name().to_string(),
                Arc::clone(fetcher.resolver()),
            );
            if previous.is_some() {
                return Err(ComposeError::DuplicateNodeFetcher(
                    fetcher.type_name().to_string(),
                ));
            }
        }
        debug!(fetchers = resolvers.len(), "Built node dispatcher");
        Ok(Self { resolvers, codec })
    }

    /// Returns true if a resolver is registered for `type_name`.
    pub fn handles(&self, type_name: &str) -> bool {
        self.resolvers.contains_key(type_name)
    }

    /// Resolves the object identified by `global_id`.
    ///
    /// Returns `Ok(None)` when the resolver reports no such object.
    ///
    /// # Errors
    ///
    /// - `InvalidGlobalId` if the id cannot be decoded
    /// - `UnresolvedNode` if no resolver is registered for the type tag
    /// - `NodeFetch` if the resolver fails
    pub async fn resolve(&self, global_id: &str) -> Result<Option<ResolvedNode>, ComposeError> {
        let resolved = self.codec.decode(global_id)?;
        let resolver = self.resolvers.get(&resolved.type_name).ok_or_else(|| {
            ComposeError::UnresolvedNode {
                type_name: resolved.type_name.clone(),
            }
        })?;

        trace!(
            type_name = %resolved.type_name,
            id = %resolved.id,
            "Dispatching node lookup"
        );

        let value = resolver.resolve(&resolved.id).await?;
        Ok(value.map(|value| ResolvedNode {
            type_name: resolved.type_name,
            value,
        }))
    }

    /// Creates the `node(id: ID!)` field returning the given interface.
    pub fn into_field(self, field_name: &str, node_interface: &str) -> Field {
        let dispatcher = Arc::new(self);
        Field::new(field_name, TypeRef::named(node_interface), move |ctx| {
            let dispatcher = Arc::clone(&dispatcher);
            FieldFuture::new(async move {
                let id = ctx.args.try_get("id")?.string()?;
                dispatcher
                    .resolve(id)
                    .await
                    .and_then(|node| node.map(ResolvedNode::into_field_value).transpose())
                    .map_err(ComposeError::into_graphql_error)
            })
        })
        .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)).description("The ID of an object"))
        .description("Fetches an object given its ID")
    }
}
