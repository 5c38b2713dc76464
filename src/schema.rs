//! Typed schema model, decoded from the JSON schema description.
//!
//! Every tagged union is an internally tagged serde enum keyed on `_type`:
//! the discriminator is read first, then the rest of the node is decoded
//! against the matching variant. Unknown discriminators fail the decode.
//!
//! Keyed sections use [`IndexMap`] so the document's own order is the
//! order every later stage observes.
pub mod directive;
pub mod input;
pub mod object;

use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use crate::error::{DecodeError, LoadError};

pub use directive::{DirectiveLocation, DirectiveSchema};
pub use input::{InputFieldSchema, InputFieldSpec, InputSchema, InputTypeKind, InputTypeSpec};
pub use object::{
    CallableFieldSpec, ObjectFieldSchema, ObjectFieldSpec, ObjectNonCallableFieldSpec, ObjectSchema,
    ObjectTypeKind, ObjectTypeSpec,
};

// ------------------------------ Shared specs ------------------------------ //

/// `{"_type": "literal", "type": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiteralFieldSpec<T> {
    #[serde(rename = "type")]
    pub ty: T,
}

/// `{"_type": "array", "nullable": ..., "type": ...}`
///
/// `nullable` describes the elements, not the array itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArrayFieldSpec<T> {
    #[serde(rename = "type")]
    pub ty: T,
    pub nullable: bool,
}

// -------------------------------- Entities -------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumSchema {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnionSchema {
    pub name: String,
    pub items: IndexMap<String, String>,
}

impl UnionSchema {
    /// Member object names.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSchema {
    pub objects: IndexMap<String, ObjectSchema>,
    pub directives: IndexMap<String, DirectiveSchema>,
    pub unions: IndexMap<String, UnionSchema>,
    pub enums: IndexMap<String, EnumSchema>,
    pub scalars: IndexSet<String>,
    pub inputs: IndexMap<String, InputSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub server: ServerSchema,
}

impl Schema {
    pub fn from_json_str(src: &str) -> Result<Self, DecodeError> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DecodeError> {
        crate::path_de::from_value_with_path(value)
    }
}

/// Read and decode a schema document. Any failure here is terminal for the run.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let schema = crate::path_de::from_slice_with_path::<Schema>(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        enums = schema.server.enums.len(),
        unions = schema.server.unions.len(),
        objects = schema.server.objects.len(),
        inputs = schema.server.inputs.len(),
        "loaded schema"
    );
    Ok(schema)
}
