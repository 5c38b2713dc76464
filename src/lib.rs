//! Go type declarations from a JSON GraphQL schema description.
//!
//! Pipeline: [`schema::load_schema`] → [`generate::generate`] (which calls
//! into [`resolve`], [`scalars`] and [`binder`]) → an [`codegen::Emitter`].
//!
//! ```
//! use gql_codegen::{generate_go_source, scalars::ScalarRegistry, schema::Schema};
//!
//! let schema = Schema::from_json_str(
//!     r#"{ "server": { "enums": { "Color": { "name": "Color", "values": ["RED", "GREEN"] } } } }"#,
//! ).unwrap();
//! let (src, report) = generate_go_source(&schema, &ScalarRegistry::default(), "graphql");
//! assert!(report.is_success());
//! assert!(src.contains("ColorGREEN Color = \"GREEN\""));
//! ```
pub mod binder;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod generate;
pub mod ir;
pub mod path_de;
pub mod resolve;
pub mod scalars;
pub mod schema;

pub use error::{DecodeError, GenerateError, LoadError, ScalarConfigError};
pub use generate::{EntityFailure, EntityKind, Report, generate};
pub use scalars::{ScalarRegistry, ScalarSpec};
pub use schema::{Schema, load_schema};

/// Run the whole pipeline into a Go source file for `package`.
///
/// The source holds every entity that generated; the report lists the rest.
pub fn generate_go_source(schema: &Schema, scalars: &ScalarRegistry, package: &str) -> (String, Report) {
    let mut cg = codegen::Codegen::with_package(package);
    let report = generate(schema, scalars, &mut cg);
    (cg.into_string(), report)
}
