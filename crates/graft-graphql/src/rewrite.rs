//! Propagation of type renames into query field references.
//!
//! Modules declare query fields against the type names they know about. When
//! another module renames one of those types, every forward reference to the
//! old name must follow, otherwise the composed schema would point at a type
//! that no longer exists.

use graft_core::{FieldContribution, OutputType};
use tracing::{debug, trace};

use crate::rename::RenameIndex;

/// Rewrites a single field against the rename index.
///
/// Only fields whose output is an unresolved forward reference to a renamed
/// type are changed; everything else is returned as an identical copy.
pub fn rewrite_field(field: &FieldContribution, renames: &RenameIndex) -> FieldContribution {
    match field.output().reference_name().and_then(|name| renames.get(name)) {
        Some(new_name) => {
            trace!(
                field = field.name(),
                from = %field.output(),
                to = new_name,
                "Rewriting field type reference"
            );
            field.with_output(OutputType::reference(new_name))
        }
        None => field.clone(),
    }
}

/// Rewrites every query field against the rename index.
///
/// The output has the same length and order as the input. Duplicates are
/// preserved.
pub fn rewrite_query_fields(
    fields: &[FieldContribution],
    renames: &RenameIndex,
) -> Vec<FieldContribution> {
    let rewritten: Vec<FieldContribution> =
        fields.iter().map(|field| rewrite_field(field, renames)).collect();

    debug!(
        fields = fields.len(),
        rewritten = rewritten
            .iter()
            .zip(fields)
            .filter(|(new, old)| new.output() != old.output())
            .count(),
        "Applied renames to query fields"
    );
    rewritten
}
