pub mod descriptor;
pub mod error;
pub mod field;
pub mod global_id;
pub mod modification;
pub mod module;
pub mod name;
pub mod node;

pub use descriptor::FileDescriptor;
pub use error::{CoreError, Result};
pub use field::{ArgumentDefinition, FieldContribution, FieldResolverFn, OutputType};
pub use global_id::{GlobalIdCodec, RelayGlobalIdCodec, ResolvedGlobalId};
pub use modification::TypeModification;
pub use module::{Contributions, SchemaModule};
pub use name::{is_valid_type_name, validate_type_name};
pub use node::{NodeDataFetcher, NodeResolver};
