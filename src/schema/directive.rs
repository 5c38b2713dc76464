use serde::Deserialize;

/// Carried in the model for completeness; generation doesn't read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DirectiveLocation {
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectiveSchema {
    pub name: String,
    pub locations: Vec<DirectiveLocation>,
}
