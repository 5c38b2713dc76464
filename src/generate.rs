//! Per-entity declaration builders and the run orchestrator.
//!
//! Pass order is enums, unions, objects, inputs. The [`UnionMembership`]
//! index is complete before the first object is built. Each entity is
//! built into a complete declaration list before anything reaches the
//! emitter, so a failing entity contributes nothing to the output.
use std::fmt;

use crate::binder::UnionMembership;
use crate::codegen::Emitter;
use crate::error::GenerateError;
use crate::ir::{
    Builtin, Constant, Declaration, InterfaceDecl, MethodSig, SerializationKey, StructDecl, StructField, TypeRef,
};
use crate::resolve::{resolve_input_field, resolve_object_field};
use crate::scalars::ScalarRegistry;
use crate::schema::{EnumSchema, InputSchema, ObjectSchema, Schema, UnionSchema};

/// Object names that denote the server's entry points rather than data shapes.
pub const ROOT_OPERATIONS: [&str; 3] = ["Query", "Mutation", "Subscription"];

pub fn is_root_operation(name: &str) -> bool {
    ROOT_OPERATIONS.contains(&name)
}

// -------------------------------- Report --------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Enum,
    Union,
    Object,
    Input,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Enum => "enum",
            EntityKind::Union => "union",
            EntityKind::Object => "object",
            EntityKind::Input => "input",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{name}`: {error}")]
pub struct EntityFailure {
    pub kind: EntityKind,
    pub name: String,
    #[source]
    pub error: GenerateError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub emitted: usize,
    pub failures: Vec<EntityFailure>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// ------------------------------ Orchestrator ----------------------------- //

/// Run every pass over `schema`, handing finished declarations to `emitter`.
///
/// Never stops at the first failure: every entity that can be generated is,
/// and each one that can't is listed in the returned [`Report`].
pub fn generate(schema: &Schema, scalars: &ScalarRegistry, emitter: &mut impl Emitter) -> Report {
    let server = &schema.server;
    let mut run = Run { emitter, report: Report::default() };

    for schema in server.enums.values() {
        run.commit(EntityKind::Enum, &schema.name, Ok(enum_declarations(schema)));
    }

    let membership = UnionMembership::build(server.unions.values());
    tracing::debug!(objects = membership.len(), "union membership indexed");
    for schema in server.unions.values() {
        run.commit(EntityKind::Union, &schema.name, Ok(union_declarations(schema)));
    }

    for schema in server.objects.values() {
        run.commit(EntityKind::Object, &schema.name, object_declarations(schema, scalars, &membership));
    }

    for schema in server.inputs.values() {
        run.commit(EntityKind::Input, &schema.name, input_declarations(schema, scalars));
    }

    let report = run.report;
    tracing::info!(emitted = report.emitted, failed = report.failures.len(), "generation finished");
    report
}

struct Run<'a, E> {
    emitter: &'a mut E,
    report: Report,
}

impl<E: Emitter> Run<'_, E> {
    fn commit(&mut self, kind: EntityKind, name: &str, built: Result<Vec<Declaration>, GenerateError>) {
        match built {
            Ok(decls) => {
                for decl in &decls {
                    tracing::trace!(declaration = decl.name(), "emit");
                    self.emitter.emit(decl);
                }
                self.report.emitted += 1;
                tracing::debug!(%kind, name, declarations = decls.len(), "emitted");
            }
            Err(error) => {
                tracing::warn!(%kind, name, %error, "skipped");
                self.report.failures.push(EntityFailure { kind, name: name.to_string(), error });
            }
        }
    }
}

// ------------------------------- Builders -------------------------------- //

/// Named string type, one constant per value, the known-values collection and
/// a decoder that rejects anything outside it.
#[tracing::instrument(level = "trace", skip_all, fields(name = %schema.name))]
pub fn enum_declarations(schema: &EnumSchema) -> Vec<Declaration> {
    let name = &schema.name;
    let constants = schema
        .values
        .iter()
        .map(|value| Constant { name: format!("{name}{value}"), value: value.clone() })
        .collect::<Vec<_>>();
    let items = constants.iter().map(|c| c.name.clone()).collect();
    let known_values = format!("allValuesOf{name}");
    vec![
        Declaration::Named { name: name.clone(), underlying: TypeRef::Builtin(Builtin::String) },
        Declaration::Constants { ty: name.clone(), constants },
        Declaration::Collection { name: known_values.clone(), element: TypeRef::named(name), items },
        Declaration::Decoder { target: name.clone(), known_values },
    ]
}

pub fn marker_method(union: &str) -> String {
    format!("Is{union}")
}

#[tracing::instrument(level = "trace", skip_all, fields(name = %schema.name))]
pub fn union_declarations(schema: &UnionSchema) -> Vec<Declaration> {
    vec![Declaration::Interface(InterfaceDecl {
        name: schema.name.clone(),
        methods: vec![MethodSig { name: marker_method(&schema.name), returns: None }],
    })]
}

/// Root operations become interfaces; everything else a struct plus one
/// marker implementation per union the object belongs to.
#[tracing::instrument(level = "trace", skip_all, fields(name = %schema.name))]
pub fn object_declarations(
    schema: &ObjectSchema,
    scalars: &ScalarRegistry,
    membership: &UnionMembership,
) -> Result<Vec<Declaration>, GenerateError> {
    if is_root_operation(&schema.name) {
        let methods = schema
            .fields
            .iter()
            .map(|(field, spec)| {
                let returns = resolve_object_field(scalars, field, &spec.spec, spec.nullable)?;
                Ok(MethodSig { name: field.clone(), returns: Some(returns) })
            })
            .collect::<Result<Vec<_>, GenerateError>>()?;
        return Ok(vec![Declaration::Interface(InterfaceDecl { name: schema.name.clone(), methods })]);
    }

    let fields = schema
        .fields
        .iter()
        .map(|(field, spec)| {
            let ty = resolve_object_field(scalars, field, &spec.spec, spec.nullable)?;
            Ok(struct_field(field, ty, spec.nullable))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let mut decls = vec![Declaration::Struct(StructDecl { name: schema.name.clone(), fields })];
    decls.extend(membership.unions_of(&schema.name).map(|union| Declaration::MarkerImpl {
        receiver: schema.name.clone(),
        method: marker_method(union),
    }));
    Ok(decls)
}

#[tracing::instrument(level = "trace", skip_all, fields(name = %schema.name))]
pub fn input_declarations(schema: &InputSchema, scalars: &ScalarRegistry) -> Result<Vec<Declaration>, GenerateError> {
    let fields = schema
        .fields
        .iter()
        .map(|(field, spec)| Ok(struct_field(field, resolve_input_field(scalars, spec)?, spec.nullable)))
        .collect::<Result<Vec<_>, GenerateError>>()?;
    Ok(vec![Declaration::Struct(StructDecl { name: schema.name.clone(), fields })])
}

fn struct_field(name: &str, ty: TypeRef, nullable: bool) -> StructField {
    StructField {
        name: name.to_string(),
        ty,
        key: SerializationKey { name: name.to_string(), omit_if_absent: nullable },
    }
}
