// Strongly-typed IR between the generator and the emission backend.
// Nothing schema-specific lives here: only names, type descriptors and declaration shapes.

/// Target primitives a scalar handler can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    String,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
}

/// Type descriptor produced by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Builtin(Builtin),
    /// Referenced by name only (schema types, verbatim target types).
    Named(String),
    /// A type that lives in another package and needs an import. `alias`
    /// overrides the package name derived from the import path.
    Qualified { import: String, alias: Option<String>, name: String },
    /// Ownership/optionality wrapper.
    Optional(Box<TypeRef>),
    List(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }
    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }
    /// Wrap in [`TypeRef::Optional`] when `nullable`.
    pub fn wrap_if(self, nullable: bool) -> Self {
        if nullable { TypeRef::optional(self) } else { self }
    }
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeRef::Optional(_))
    }
}

/// Serialization key of a data member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationKey {
    pub name: String,
    pub omit_if_absent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Schema field name; the backend applies its own casing.
    pub name: String,
    pub ty: TypeRef,
    pub key: SerializationKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
}

/// A parameterless method signature. `returns: None` is a marker method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub returns: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    pub name: String,
    pub methods: Vec<MethodSig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `type <name> <underlying>`
    Named { name: String, underlying: TypeRef },
    /// String constants of type `ty`, in order.
    Constants { ty: String, constants: Vec<Constant> },
    /// Ordered collection literal of previously declared identifiers.
    Collection { name: String, element: TypeRef, items: Vec<String> },
    /// Decode routine for `target`: read a plain string, reject anything
    /// outside the `known_values` collection, otherwise assign it.
    Decoder { target: String, known_values: String },
    Struct(StructDecl),
    Interface(InterfaceDecl),
    /// Trivial implementation of a marker method on `receiver`.
    MarkerImpl { receiver: String, method: String },
}

impl Declaration {
    /// Name of the declared item, recorded in trace events as it is emitted.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Named { name, .. } => name,
            Declaration::Constants { ty, .. } => ty,
            Declaration::Collection { name, .. } => name,
            Declaration::Decoder { target, .. } => target,
            Declaration::Struct(decl) => &decl.name,
            Declaration::Interface(decl) => &decl.name,
            Declaration::MarkerImpl { method, .. } => method,
        }
    }
}
