//! Global object identifiers.
//!
//! A global id is an opaque string that encodes a type tag and a type-local
//! id, so any object can be fetched through a single `node(id:)` field. The
//! default codec follows the Relay convention: standard base64 of
//! `"<Type>:<id>"`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{CoreError, Result};

/// Decoded form of a global id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGlobalId {
    pub type_name: String,
    pub id: String,
}

/// Encodes and decodes global ids.
pub trait GlobalIdCodec: Send + Sync {
    fn encode(&self, type_name: &str, id: &str) -> String;

    fn decode(&self, global_id: &str) -> Result<ResolvedGlobalId>;
}

/// Relay-compatible base64 global id codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayGlobalIdCodec;

impl GlobalIdCodec for RelayGlobalIdCodec {
    fn encode(&self, type_name: &str, id: &str) -> String {
        STANDARD.encode(format!("{type_name}:{id}"))
    }

    fn decode(&self, global_id: &str) -> Result<ResolvedGlobalId> {
        let bytes = STANDARD
            .decode(global_id)
            .map_err(|e| CoreError::invalid_global_id(global_id, format!("invalid base64: {e}")))?;
        let decoded = String::from_utf8(bytes)
            .map_err(|_| CoreError::invalid_global_id(global_id, "payload is not UTF-8"))?;

        // Split on the first separator only; local ids may contain ':'.
        let (type_name, id) = decoded
            .split_once(':')
            .ok_or_else(|| CoreError::invalid_global_id(global_id, "missing type separator"))?;
        if type_name.is_empty() {
            return Err(CoreError::invalid_global_id(global_id, "empty type name"));
        }

        Ok(ResolvedGlobalId {
            type_name: type_name.to_string(),
            id: id.to_string(),
        })
    }
}
