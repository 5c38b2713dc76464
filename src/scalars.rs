//! Scalar registry: scalar name → target-type rules.
//!
//! The registry is a plain value built once at startup and passed down the
//! pipeline. [`ScalarRegistry::default`] carries the built-ins; callers merge
//! their own handlers over it (later entries win).
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{GenerateError, ScalarConfigError};
use crate::ir::{Builtin, TypeRef};

/// How a scalar shows up in generated code.
pub trait ScalarSpec: std::fmt::Debug + Send + Sync {
    /// Type in object (output) position. The scalar decides how nullability looks.
    fn object_type(&self, nullable: bool) -> TypeRef;
    /// Type in input position. Nullability is applied by the caller.
    fn input_type(&self) -> TypeRef;
}

/// Maps to a fixed base type, wrapped when nullable in object position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainScalar {
    pub base: TypeRef,
}

impl PlainScalar {
    pub fn new(base: TypeRef) -> Self {
        Self { base }
    }
}

impl ScalarSpec for PlainScalar {
    fn object_type(&self, nullable: bool) -> TypeRef {
        self.base.clone().wrap_if(nullable)
    }
    fn input_type(&self) -> TypeRef {
        self.base.clone()
    }
}

/// Always the optional placeholder, whatever nullability was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidScalar {
    pub placeholder: TypeRef,
}

impl Default for VoidScalar {
    fn default() -> Self {
        Self { placeholder: TypeRef::Builtin(Builtin::String) }
    }
}

impl ScalarSpec for VoidScalar {
    fn object_type(&self, _nullable: bool) -> TypeRef {
        TypeRef::optional(self.placeholder.clone())
    }
    fn input_type(&self) -> TypeRef {
        TypeRef::optional(self.placeholder.clone())
    }
}

// ------------------------------- Registry -------------------------------- //

#[derive(Debug, Clone)]
pub struct ScalarRegistry {
    specs: IndexMap<String, Arc<dyn ScalarSpec>>,
}

impl Default for ScalarRegistry {
    fn default() -> Self {
        Self::empty()
            .with("String", PlainScalar::new(TypeRef::Builtin(Builtin::String)))
            .with("Boolean", PlainScalar::new(TypeRef::Builtin(Builtin::Bool)))
            .with("Int", PlainScalar::new(TypeRef::Builtin(Builtin::Int32)))
            .with("Int64", PlainScalar::new(TypeRef::Builtin(Builtin::Int64)))
            .with("Float", PlainScalar::new(TypeRef::Builtin(Builtin::Float32)))
            .with("Void", VoidScalar::default())
    }
}

impl ScalarRegistry {
    pub fn empty() -> Self {
        Self { specs: IndexMap::new() }
    }

    pub fn with(mut self, name: impl Into<String>, spec: impl ScalarSpec + 'static) -> Self {
        self.insert(name, spec);
        self
    }

    /// Replaces any handler already registered under `name`.
    pub fn insert(&mut self, name: impl Into<String>, spec: impl ScalarSpec + 'static) {
        self.specs.insert(name.into(), Arc::new(spec));
    }

    pub fn get(&self, name: &str) -> Result<&dyn ScalarSpec, GenerateError> {
        self.specs
            .get(name)
            .map(|spec| &**spec)
            .ok_or_else(|| GenerateError::UnknownScalar(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Entries of `other` override entries of `self`; no conflict is reported.
    pub fn merge(mut self, other: ScalarRegistry) -> Self {
        for (name, spec) in other.specs {
            self.specs.insert(name, spec);
        }
        self
    }

    pub fn merged(registries: impl IntoIterator<Item = ScalarRegistry>) -> Self {
        registries.into_iter().fold(Self::empty(), Self::merge)
    }

    /// Parse a JSON scalar mapping (see [`ScalarMapping`]).
    pub fn from_mapping_str(src: &str) -> Result<Self, ScalarConfigError> {
        let mappings: IndexMap<String, ScalarMapping> = crate::path_de::from_str_with_path(src)?;
        let mut registry = Self::empty();
        for (name, mapping) in mappings {
            let base = mapping.target_type(&name)?;
            if mapping.always_nullable {
                registry.insert(name, VoidScalar { placeholder: base });
            } else {
                registry.insert(name, PlainScalar::new(base));
            }
        }
        Ok(registry)
    }

    pub fn from_mapping_file(path: impl AsRef<Path>) -> Result<Self, ScalarConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ScalarConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_mapping_str(&src)?;
        tracing::debug!(path = %path.display(), scalars = registry.len(), "loaded scalar mapping");
        Ok(registry)
    }
}

/// One entry of a scalar mapping file:
///
/// ```json
/// { "Datetime": { "type": "Time", "import": "time" }, "UUID": { "type": "string" } }
/// ```
///
/// `alias` names the imported package when its path doesn't end in it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScalarMapping {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub import: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub always_nullable: bool,
}

impl ScalarMapping {
    fn target_type(&self, scalar: &str) -> Result<TypeRef, ScalarConfigError> {
        let type_name = self.type_name.trim();
        if type_name.is_empty() {
            return Err(ScalarConfigError::EmptyType(scalar.to_string()));
        }
        if let Some(import) = &self.import {
            return Ok(TypeRef::Qualified {
                import: import.clone(),
                alias: self.alias.clone(),
                name: type_name.to_string(),
            });
        }
        if self.alias.is_some() {
            return Err(ScalarConfigError::AliasWithoutImport(scalar.to_string()));
        }
        let builtin = match type_name {
            "string" => Builtin::String,
            "bool" => Builtin::Bool,
            "int32" => Builtin::Int32,
            "int64" => Builtin::Int64,
            "float32" => Builtin::Float32,
            "float64" => Builtin::Float64,
            other => return Ok(TypeRef::named(other)),
        };
        Ok(TypeRef::Builtin(builtin))
    }
}
