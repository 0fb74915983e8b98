//! Lazy schema loading implementation.
//!
//! This module provides `LazySchema`, a thread-safe holder that composes the
//! schema on first access and shares it for the rest of the process. The
//! schema is composed at most once: concurrent first callers wait for the
//! in-flight build, and a failed build is remembered and reported to every
//! later caller.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::SchemaComposer;
use crate::error::ComposeError;

/// State of the lazy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema has not been built yet.
    Uninitialized,
    /// Schema is currently being built.
    Building,
    /// Schema is ready for use.
    Ready,
    /// Schema build failed. The failure is permanent.
    Failed,
}

/// Thread-safe, build-once schema holder.
///
/// # Example
///
/// ```ignore
/// let lazy_schema = LazySchema::new(composer);
///
/// // First access triggers the build
/// let schema = lazy_schema.get_or_build().await?;
///
/// // Subsequent accesses share the same schema
/// let again = lazy_schema.get_or_build().await?;
/// assert!(Arc::ptr_eq(&schema, &again));
/// ```
pub struct LazySchema {
    /// The cached schema (None until built).
    schema: RwLock<Option<Arc<Schema>>>,

    /// Build lock to ensure only one build runs.
    build_lock: Mutex<()>,

    /// Current state of the schema.
    state: RwLock<SchemaState>,

    /// The schema composer.
    composer: Arc<SchemaComposer>,

    /// Build error, kept once a build has failed.
    last_error: RwLock<Option<ComposeError>>,
}

impl LazySchema {
    /// Creates a new lazy schema with the given composer.
    #[must_use]
    pub fn new(composer: SchemaComposer) -> Self {
        Self {
            schema: RwLock::new(None),
            build_lock: Mutex::new(()),
            state: RwLock::new(SchemaState::Uninitialized),
            composer: Arc::new(composer),
            last_error: RwLock::new(None),
        }
    }

    /// Returns the current state of the schema.
    pub async fn state(&self) -> SchemaState {
        *self.state.read().await
    }

    /// Gets the schema, building it if necessary.
    ///
    /// If a build is in progress, waits for it to complete and returns its
    /// result. Every caller observes the same schema instance.
    ///
    /// # Errors
    ///
    /// Returns the build error if composition failed, now or on an earlier
    /// call.
    pub async fn get_or_build(&self) -> Result<Arc<Schema>, ComposeError> {
        // Fast path: schema already built
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        // Acquire build lock and wait for it
        let _guard = self.build_lock.lock().await;

        // Double-check after acquiring lock
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        // A failed build is not retried
        if let Some(err) = self.last_error.read().await.as_ref() {
            return Err(err.clone());
        }

        // Mark as building
        *self.state.write().await = SchemaState::Building;
        info!("Building GraphQL schema...");

        match self.composer.build() {
            Ok(schema) => {
                let schema = Arc::new(schema);
                *self.schema.write().await = Some(Arc::clone(&schema));
                *self.state.write().await = SchemaState::Ready;
                info!("GraphQL schema built successfully");
                Ok(schema)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Failed to build GraphQL schema");
                *self.state.write().await = SchemaState::Failed;
                *self.last_error.write().await = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Gets the schema if it's already built, without triggering a build.
    pub async fn get(&self) -> Option<Arc<Schema>> {
        self.schema.read().await.clone()
    }

    /// Returns the build error, if the build failed.
    pub async fn last_error(&self) -> Option<ComposeError> {
        self.last_error.read().await.clone()
    }

    /// Returns whether the schema is ready for use.
    pub async fn is_ready(&self) -> bool {
        *self.state.read().await == SchemaState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComposerConfig;
    use crate::registry::{InMemoryTypeRegistry, RegisteredTypes, TypeRegistry};
    use async_graphql::Value;
    use async_graphql::dynamic::{FieldFuture, TypeRef};
    use graft_core::{
        Contributions, FieldContribution, FileDescriptor, OutputType, TypeModification,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Registry wrapper counting how often the type set is built.
    struct CountingRegistry {
        inner: InMemoryTypeRegistry,
        builds: Arc<AtomicUsize>,
    }

    impl TypeRegistry for CountingRegistry {
        fn build(
            &self,
            descriptors: &[FileDescriptor],
            modifications: &[TypeModification],
        ) -> Result<RegisteredTypes, ComposeError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            self.inner.build(descriptors, modifications)
        }
    }

    fn lazy_schema(contributions: Contributions, builds: Arc<AtomicUsize>) -> LazySchema {
        let registry = CountingRegistry {
            inner: InMemoryTypeRegistry::new(),
            builds,
        };
        LazySchema::new(SchemaComposer::new(
            contributions,
            Arc::new(registry),
            ComposerConfig::default(),
        ))
    }

    fn ping_contributions() -> Contributions {
        let mut contributions = Contributions::new();
        contributions.add_query(FieldContribution::new(
            "ping",
            OutputType::resolved(TypeRef::named_nn(TypeRef::STRING)),
            |_| FieldFuture::new(async { Ok(Some(Value::from("pong"))) }),
        ));
        contributions
    }

    #[test]
    fn test_schema_state_enum() {
        assert_ne!(SchemaState::Uninitialized, SchemaState::Building);
        assert_ne!(SchemaState::Building, SchemaState::Ready);
        assert_ne!(SchemaState::Ready, SchemaState::Failed);
    }

    #[tokio::test]
    async fn test_builds_once_and_shares_schema() {
        let builds = Arc::new(AtomicUsize::new(0));
        let lazy = lazy_schema(ping_contributions(), Arc::clone(&builds));

        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(lazy.get().await.is_none());

        let first = lazy.get_or_build().await.unwrap();
        let second = lazy.get_or_build().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(lazy.is_ready().await);
        assert!(lazy.last_error().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_builds_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let lazy = Arc::new(lazy_schema(ping_contributions(), Arc::clone(&builds)));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                tokio::spawn(async move { lazy.get_or_build().await })
            })
            .collect();

        let mut schemas = Vec::new();
        for handle in handles {
            schemas.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(schemas.iter().all(|schema| Arc::ptr_eq(schema, &schemas[0])));
    }

    #[tokio::test]
    async fn test_failure_is_cached() {
        let builds = Arc::new(AtomicUsize::new(0));
        let mut contributions = ping_contributions();
        contributions
            .add_modification(TypeModification::rename("UserRef", "User"))
            .add_modification(TypeModification::rename("UserRef", "Account"));
        let lazy = lazy_schema(contributions, Arc::clone(&builds));

        let Err(first) = lazy.get_or_build().await else {
            panic!("conflicting renames should fail the build");
        };
        let Err(second) = lazy.get_or_build().await else {
            panic!("a failed build should stay failed");
        };

        assert!(matches!(first, ComposeError::ConflictingRename { .. }));
        assert_eq!(first.to_string(), second.to_string());
        assert_eq!(lazy.state().await, SchemaState::Failed);
        assert!(lazy.get().await.is_none());
        assert!(lazy.last_error().await.is_some());
        // Rename conflicts are caught before the registry is consulted.
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }
}
