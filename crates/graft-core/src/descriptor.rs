use serde::{Deserialize, Serialize};

/// Opaque protobuf schema unit contributed by a module.
///
/// Composition never inspects the encoded descriptor; it is aggregated and
/// handed to the type registry, which identifies files by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// File name, e.g. `acme/user.proto`.
    pub name: String,
    /// Protobuf package, e.g. `acme.user.v1`.
    pub package: String,
    /// Serialized `FileDescriptorProto`.
    #[serde(default)]
    pub encoded: Vec<u8>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            encoded: Vec::new(),
        }
    }

    pub fn with_encoded(mut self, encoded: Vec<u8>) -> Self {
        self.encoded = encoded;
        self
    }
}
