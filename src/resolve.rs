//! Field spec → [`TypeRef`] resolution.
//!
//! Two paths:
//! - object (output) position: scalars decide their own nullable form through
//!   the registry, other kinds are wrapped when nullable, unions never are.
//! - input position: scalars and named types resolve bare; the wrapper is
//!   applied at the field site.
//!
//! Array fields carry two independent nullability bits: the field's own bit
//! wraps the whole list, the array spec's bit applies to its elements.
use crate::error::GenerateError;
use crate::ir::TypeRef;
use crate::scalars::ScalarRegistry;
use crate::schema::{
    InputFieldSchema, InputFieldSpec, InputTypeKind, InputTypeSpec, ObjectFieldSpec, ObjectNonCallableFieldSpec,
    ObjectTypeKind, ObjectTypeSpec,
};

// ---------------------------- Object position ----------------------------- //

pub fn resolve_object_type(
    scalars: &ScalarRegistry,
    spec: &ObjectTypeSpec,
    nullable: bool,
) -> Result<TypeRef, GenerateError> {
    match spec.kind {
        ObjectTypeKind::Scalar => Ok(scalars.get(&spec.name)?.object_type(nullable)),
        // unions are reference-like already
        ObjectTypeKind::Union => Ok(TypeRef::named(&spec.name)),
        ObjectTypeKind::Object | ObjectTypeKind::Interface | ObjectTypeKind::Enum => {
            Ok(TypeRef::named(&spec.name).wrap_if(nullable))
        }
    }
}

/// `field` names the owning field in errors.
pub fn resolve_non_callable_field(
    scalars: &ScalarRegistry,
    field: &str,
    spec: &ObjectNonCallableFieldSpec,
    nullable: bool,
) -> Result<TypeRef, GenerateError> {
    match spec {
        ObjectNonCallableFieldSpec::Literal(literal) => resolve_object_type(scalars, &literal.ty, nullable),
        ObjectNonCallableFieldSpec::Array(array) => {
            let element = resolve_object_type(scalars, &array.ty, array.nullable)?;
            Ok(TypeRef::list(element).wrap_if(nullable))
        }
        ObjectNonCallableFieldSpec::Unrecognized => Err(GenerateError::UnrecognizedFieldSpec {
            field: field.to_string(),
        }),
    }
}

/// Callables resolve to their return type; arguments don't affect the type.
pub fn resolve_object_field(
    scalars: &ScalarRegistry,
    field: &str,
    spec: &ObjectFieldSpec,
    nullable: bool,
) -> Result<TypeRef, GenerateError> {
    match spec {
        ObjectFieldSpec::Literal(literal) => resolve_object_type(scalars, &literal.ty, nullable),
        ObjectFieldSpec::Array(array) => {
            let element = resolve_object_type(scalars, &array.ty, array.nullable)?;
            Ok(TypeRef::list(element).wrap_if(nullable))
        }
        ObjectFieldSpec::Callable(callable) => {
            resolve_non_callable_field(scalars, field, &callable.return_type, nullable)
        }
    }
}

// ----------------------------- Input position ----------------------------- //

pub fn resolve_input_type(scalars: &ScalarRegistry, spec: &InputTypeSpec) -> Result<TypeRef, GenerateError> {
    match spec.kind {
        InputTypeKind::Scalar => Ok(scalars.get(&spec.name)?.input_type()),
        InputTypeKind::Input | InputTypeKind::Enum => Ok(TypeRef::named(&spec.name)),
    }
}

pub fn resolve_input_field(scalars: &ScalarRegistry, field: &InputFieldSchema) -> Result<TypeRef, GenerateError> {
    let base = match &field.spec {
        InputFieldSpec::Literal(literal) => resolve_input_type(scalars, &literal.ty)?,
        InputFieldSpec::Array(array) => {
            let element = resolve_input_type(scalars, &array.ty)?.wrap_if(array.nullable);
            TypeRef::list(element)
        }
    };
    Ok(base.wrap_if(field.nullable))
}
