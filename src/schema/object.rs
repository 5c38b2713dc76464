use indexmap::IndexMap;
use serde::Deserialize;

use super::{ArrayFieldSpec, InputFieldSchema, LiteralFieldSpec};

/// What an object field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ObjectTypeKind {
    #[serde(rename = "ObjectType")]
    Object,
    #[serde(rename = "InterfaceType")]
    Interface,
    Scalar,
    Union,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectTypeSpec {
    #[serde(rename = "_type")]
    pub kind: ObjectTypeKind,
    pub name: String,
}

/// Return type of a callable field. Callables never return callables.
///
/// The discriminator is checked when the field is resolved, so a bad tag here
/// only fails the declaration that owns the field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum ObjectNonCallableFieldSpec {
    Literal(LiteralFieldSpec<ObjectTypeSpec>),
    Array(ArrayFieldSpec<ObjectTypeSpec>),
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallableFieldSpec {
    #[serde(rename = "returnType")]
    pub return_type: ObjectNonCallableFieldSpec,
    #[serde(default)]
    pub arguments: IndexMap<String, InputFieldSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum ObjectFieldSpec {
    Literal(LiteralFieldSpec<ObjectTypeSpec>),
    Array(ArrayFieldSpec<ObjectTypeSpec>),
    Callable(CallableFieldSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectFieldSchema {
    pub nullable: bool,
    pub spec: ObjectFieldSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectSchema {
    pub name: String,
    /// interface name → interface name
    #[serde(default)]
    pub implements: IndexMap<String, String>,
    pub fields: IndexMap<String, ObjectFieldSchema>,
}
