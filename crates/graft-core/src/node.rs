//! Per-type resolvers for global id lookups.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Resolves an object of one type from its type-local id.
///
/// Returning `Ok(None)` means the object does not exist; the `node` field
/// then yields `null`.
#[async_trait]
pub trait NodeResolver: Send + Sync {
    async fn resolve(&self, local_id: &str) -> Result<Option<serde_json::Value>>;
}

#[async_trait]
impl<F> NodeResolver for F
where
    F: Fn(&str) -> Result<Option<serde_json::Value>> + Send + Sync,
{
    async fn resolve(&self, local_id: &str) -> Result<Option<serde_json::Value>> {
        self(local_id)
    }
}

/// Associates a type name with the resolver for objects of that type.
#[derive(Clone)]
pub struct NodeDataFetcher {
    type_name: String,
    resolver: Arc<dyn NodeResolver>,
}

impl NodeDataFetcher {
    pub fn new(type_name: impl Into<String>, resolver: Arc<dyn NodeResolver>) -> Self {
        Self {
            type_name: type_name.into(),
            resolver,
        }
    }

    /// Creates a fetcher from a synchronous closure.
    pub fn from_fn<F>(type_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> Result<Option<serde_json::Value>> + Send + Sync + 'static,
    {
        Self::new(type_name, Arc::new(f))
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn resolver(&self) -> &Arc<dyn NodeResolver> {
        &self.resolver
    }
}

impl fmt::Debug for NodeDataFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDataFetcher")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
