use indexmap::IndexMap;
use serde::Deserialize;

use super::{ArrayFieldSpec, LiteralFieldSpec};

/// What an input field refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum InputTypeKind {
    #[serde(rename = "InputType")]
    Input,
    Enum,
    Scalar,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputTypeSpec {
    #[serde(rename = "_type")]
    pub kind: InputTypeKind,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum InputFieldSpec {
    Literal(LiteralFieldSpec<InputTypeSpec>),
    Array(ArrayFieldSpec<InputTypeSpec>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputFieldSchema {
    pub nullable: bool,
    pub spec: InputFieldSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSchema {
    pub name: String,
    pub fields: IndexMap<String, InputFieldSchema>,
}
