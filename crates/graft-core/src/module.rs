//! Schema modules and the aggregated contribution set.
//!
//! Feature modules implement [`SchemaModule`] and register their fields,
//! modifications, descriptors and node fetchers into a shared
//! [`Contributions`] value. Modules have no visibility into each other; the
//! composer reconciles their naming decisions afterwards.

use std::sync::Arc;

use tracing::debug;

use crate::descriptor::FileDescriptor;
use crate::field::FieldContribution;
use crate::modification::TypeModification;
use crate::node::NodeDataFetcher;

/// A feature module contributing to the composed schema.
pub trait SchemaModule: Send + Sync {
    /// Module name, used for diagnostics.
    fn name(&self) -> &str;

    /// Registers this module's contributions.
    fn register(&self, contributions: &mut Contributions);
}

/// Every contribution registered by the schema modules.
///
/// Order of registration is preserved. Duplicates are kept as-is and are
/// reported by the composer, not here.
#[derive(Debug, Clone, Default)]
pub struct Contributions {
    queries: Vec<FieldContribution>,
    mutations: Vec<FieldContribution>,
    modifications: Vec<TypeModification>,
    descriptors: Vec<FileDescriptor>,
    node_fetchers: Vec<NodeDataFetcher>,
}

impl Contributions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the contributions of every module, in order.
    pub fn from_modules(modules: &[Arc<dyn SchemaModule>]) -> Self {
        let mut contributions = Self::new();
        for module in modules {
            let mut registered = Self::new();
            module.register(&mut registered);
            debug!(
                module = module.name(),
                queries = registered.queries.len(),
                mutations = registered.mutations.len(),
                modifications = registered.modifications.len(),
                descriptors = registered.descriptors.len(),
                node_fetchers = registered.node_fetchers.len(),
                "Registered schema module"
            );
            contributions.extend(registered);
        }
        contributions
    }

    pub fn add_query(&mut self, field: FieldContribution) -> &mut Self {
        self.queries.push(field);
        self
    }

    pub fn add_mutation(&mut self, field: FieldContribution) -> &mut Self {
        self.mutations.push(field);
        self
    }

    pub fn add_modification(&mut self, modification: TypeModification) -> &mut Self {
        self.modifications.push(modification);
        self
    }

    pub fn add_descriptor(&mut self, descriptor: FileDescriptor) -> &mut Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn add_node_fetcher(&mut self, fetcher: NodeDataFetcher) -> &mut Self {
        self.node_fetchers.push(fetcher);
        self
    }

    /// Appends all contributions of `other`.
    pub fn extend(&mut self, other: Contributions) {
        self.queries.extend(other.queries);
        self.mutations.extend(other.mutations);
        self.modifications.extend(other.modifications);
        self.descriptors.extend(other.descriptors);
        self.node_fetchers.extend(other.node_fetchers);
    }

    pub fn queries(&self) -> &[FieldContribution] {
        &self.queries
    }

    pub fn mutations(&self) -> &[FieldContribution] {
        &self.mutations
    }

    pub fn modifications(&self) -> &[TypeModification] {
        &self.modifications
    }

    pub fn descriptors(&self) -> &[FileDescriptor] {
        &self.descriptors
    }

    pub fn node_fetchers(&self) -> &[NodeDataFetcher] {
        &self.node_fetchers
    }
}
