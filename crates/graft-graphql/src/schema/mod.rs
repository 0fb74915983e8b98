//! Schema composition and lazy loading.
//!
//! ## Components
//!
//! - [`SchemaComposer`] - Merges module contributions into one schema
//! - [`LazySchema`] - Build-once, shared schema holder
//! - [`build_query_root`] / [`build_mutation_root`] - Root type assembly
//!
//! ## Architecture
//!
//! The schema building process:
//! 1. The hosting process collects contributions from all schema modules
//! 2. The first request for the schema triggers composition
//! 3. Concurrent requests wait for that single build
//! 4. The schema, or the build error, is cached for the process lifetime

mod composer;
mod lazy;
mod roots;

pub use composer::SchemaComposer;
pub use lazy::{LazySchema, SchemaState};
pub use roots::{build_mutation_root, build_query_root};
