//! Query and Mutation root assembly.

use async_graphql::dynamic::{Field, Object};
use graft_core::FieldContribution;
use tracing::debug;

use crate::error::ComposeError;

/// Drops exact duplicates and rejects distinct fields sharing a name.
///
/// A module registered twice contributes the same field twice; that is
/// collapsed. Two different definitions under one name are a configuration
/// error.
fn distinct_fields<'a>(
    root: &str,
    fields: &'a [FieldContribution],
) -> Result<Vec<&'a FieldContribution>, ComposeError> {
    let mut distinct: Vec<&FieldContribution> = Vec::with_capacity(fields.len());
    for field in fields {
        match distinct.iter().find(|existing| existing.name() == field.name()) {
            Some(existing) if *existing == field => {}
            Some(_) => {
                return Err(ComposeError::DuplicateField {
                    root: root.to_string(),
                    field: field.name().to_string(),
                });
            }
            None => distinct.push(field),
        }
    }
    Ok(distinct)
}

/// Builds the Query root from the rewritten query fields.
///
/// The node lookup field, when given, is added after the contributed fields.
///
/// # Errors
///
/// Returns `ComposeError::DuplicateField` if two distinct fields share a name,
/// including a contributed field named like the node field.
pub fn build_query_root(
    name: &str,
    fields: &[FieldContribution],
    node_field: Option<(&str, Field)>,
) -> Result<Object, ComposeError> {
    let distinct = distinct_fields(name, fields)?;
    let mut query = Object::new(name);
    for field in &distinct {
        query = query.field(field.to_field());
    }
    if let Some((node_field_name, node_field)) = node_field {
        if distinct.iter().any(|field| field.name() == node_field_name) {
            return Err(ComposeError::DuplicateField {
                root: name.to_string(),
                field: node_field_name.to_string(),
            });
        }
        query = query.field(node_field);
    }
    debug!(root = name, fields = distinct.len(), "Built query root");
    Ok(query)
}

/// Builds the Mutation root, or `None` when no mutation fields exist.
///
/// Mutation fields are used exactly as contributed; renames are not applied
/// to them.
///
/// # Errors
///
/// Returns `ComposeError::DuplicateField` if two distinct fields share a name.
pub fn build_mutation_root(
    name: &str,
    fields: &[FieldContribution],
) -> Result<Option<Object>, ComposeError> {
    if fields.is_empty() {
        debug!("No mutation fields contributed, omitting mutation root");
        return Ok(None);
    }
    let distinct = distinct_fields(name, fields)?;
    let mut mutation = Object::new(name);
    for field in &distinct {
        mutation = mutation.field(field.to_field());
    }
    debug!(root = name, fields = distinct.len(), "Built mutation root");
    Ok(Some(mutation))
}
