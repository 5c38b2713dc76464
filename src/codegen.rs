//! Emission backend: declarations in, Go source text out.
//!
//! The generator only sees [`Emitter`]. Everything about physical syntax
//! lives here: identifier casing, `json:"..."` tags, column alignment and the
//! import block.
use std::collections::BTreeSet;

use crate::ir::{Builtin, Constant, Declaration, InterfaceDecl, MethodSig, StructDecl, TypeRef};

pub const DEFAULT_PACKAGE: &str = "graphql";

const HEADER: &str = "// Code generated by gql-codegen. DO NOT EDIT.";

pub trait Emitter {
    fn emit(&mut self, decl: &Declaration);
}

/// Collects declarations as-is.
impl Emitter for Vec<Declaration> {
    fn emit(&mut self, decl: &Declaration) {
        self.push(decl.clone());
    }
}

/// Go source backend.
///
/// ```
/// use gql_codegen::codegen::{Codegen, Emitter};
/// use gql_codegen::ir::{Builtin, Declaration, TypeRef};
///
/// let mut cg = Codegen::new();
/// cg.emit(&Declaration::Named { name: "Color".into(), underlying: TypeRef::Builtin(Builtin::String) });
/// assert!(cg.into_string().contains("type Color string"));
/// ```
#[derive(Debug, Clone)]
pub struct Codegen {
    package: String,
    imports: BTreeSet<GoImport>,
    blocks: Vec<String>,
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for Codegen {
    fn emit(&mut self, decl: &Declaration) {
        let block = self.render(decl);
        self.blocks.push(block);
    }
}

impl Codegen {
    pub fn new() -> Self {
        Self::with_package(DEFAULT_PACKAGE)
    }

    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: BTreeSet::new(),
            blocks: Vec::new(),
        }
    }

    pub fn emit_all<'a>(&mut self, decls: impl IntoIterator<Item = &'a Declaration>) {
        for decl in decls {
            self.emit(decl);
        }
    }

    pub fn into_string(self) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("package {}\n", self.package));
        if !self.imports.is_empty() {
            out.push_str("\nimport (\n");
            for GoImport { path, alias } in &self.imports {
                match alias {
                    Some(alias) => out.push_str(&format!("\t{alias} {}\n", quote(path))),
                    None => out.push_str(&format!("\t{}\n", quote(path))),
                }
            }
            out.push_str(")\n");
        }
        for block in &self.blocks {
            out.push('\n');
            out.push_str(block);
            out.push('\n');
        }
        out
    }

    // ------------------------------ Rendering ------------------------------ //

    fn render(&mut self, decl: &Declaration) -> String {
        match decl {
            Declaration::Named { name, underlying } => {
                format!("type {name} {}", self.type_name(underlying))
            }
            Declaration::Constants { ty, constants } => render_constants(ty, constants),
            Declaration::Collection { name, element, items } => {
                format!("var {name} = []{}{{{}}}", self.type_name(element), items.join(", "))
            }
            Declaration::Decoder { target, known_values } => {
                self.imports.extend(["encoding/json", "fmt", "slices"].map(GoImport::plain));
                render_decoder(target, known_values)
            }
            Declaration::Struct(decl) => self.render_struct(decl),
            Declaration::Interface(decl) => self.render_interface(decl),
            Declaration::MarkerImpl { receiver, method } => {
                format!("func ({receiver}) {}() {{}}", title_case(method))
            }
        }
    }

    fn render_struct(&mut self, decl: &StructDecl) -> String {
        if decl.fields.is_empty() {
            return format!("type {} struct{{}}", decl.name);
        }
        let rows = decl
            .fields
            .iter()
            .map(|field| {
                let tag = if field.key.omit_if_absent {
                    format!("`json:\"{},omitempty\"`", field.key.name)
                } else {
                    format!("`json:\"{}\"`", field.key.name)
                };
                [title_case(&field.name), self.type_name(&field.ty), tag]
            })
            .collect::<Vec<_>>();
        let name_width = column_width(rows.iter().map(|[name, _, _]| name));
        let type_width = column_width(rows.iter().map(|[_, ty, _]| ty));

        let mut out = format!("type {} struct {{\n", decl.name);
        for [name, ty, tag] in &rows {
            out.push_str(&format!("\t{name:<name_width$} {ty:<type_width$} {tag}\n"));
        }
        out.push('}');
        out
    }

    fn render_interface(&mut self, decl: &InterfaceDecl) -> String {
        if decl.methods.is_empty() {
            return format!("type {} interface{{}}", decl.name);
        }
        let mut out = format!("type {} interface {{\n", decl.name);
        for MethodSig { name, returns } in &decl.methods {
            match returns {
                Some(ty) => out.push_str(&format!("\t{}() {}\n", title_case(name), self.type_name(ty))),
                None => out.push_str(&format!("\t{}()\n", title_case(name))),
            }
        }
        out.push('}');
        out
    }

    /// Go spelling of `ty`; qualified types register their import.
    fn type_name(&mut self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Builtin(builtin) => builtin_name(*builtin).to_string(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Qualified { import, alias, name } => {
                self.imports.insert(GoImport { path: import.clone(), alias: alias.clone() });
                let qualifier = alias.as_deref().unwrap_or_else(|| package_name(import));
                format!("{qualifier}.{name}")
            }
            TypeRef::Optional(inner) => format!("*{}", self.type_name(inner)),
            TypeRef::List(inner) => format!("[]{}", self.type_name(inner)),
        }
    }
}

/// One line of the import block. Ordered by path, so the block comes out sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GoImport {
    path: String,
    alias: Option<String>,
}

impl GoImport {
    fn plain(path: &str) -> Self {
        Self { path: path.to_string(), alias: None }
    }
}

/// Default package name of an import path: the last segment, skipping a
/// major-version segment (`/v5`) and dropping a `.vN` suffix (`gopkg.in/yaml.v3`).
pub fn package_name(path: &str) -> &str {
    let mut segments = path.rsplit('/').filter(|segment| !segment.is_empty());
    let last = segments.next().unwrap_or(path);
    let last = if is_major_version(last) { segments.next().unwrap_or(last) } else { last };
    match last.rsplit_once('.') {
        Some((base, version)) if is_major_version(version) && !base.is_empty() => base,
        _ => last,
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn builtin_name(builtin: Builtin) -> &'static str {
    match builtin {
        Builtin::String => "string",
        Builtin::Bool => "bool",
        Builtin::Int32 => "int32",
        Builtin::Int64 => "int64",
        Builtin::Float32 => "float32",
        Builtin::Float64 => "float64",
    }
}

fn render_constants(ty: &str, constants: &[Constant]) -> String {
    if constants.is_empty() {
        return "const ()".to_string();
    }
    let width = column_width(constants.iter().map(|c| &c.name));
    let mut out = String::from("const (\n");
    for Constant { name, value } in constants {
        out.push_str(&format!("\t{name:<width$} {ty} = {}\n", quote(value)));
    }
    out.push(')');
    out
}

fn render_decoder(target: &str, known_values: &str) -> String {
    [
        format!("func (self *{target}) UnmarshalJSON(data []byte) error {{"),
        "\tvar value string".to_string(),
        "\tif err := json.Unmarshal(data, &value); err != nil {".to_string(),
        "\t\treturn err".to_string(),
        "\t}".to_string(),
        format!("\tif !slices.Contains({known_values}, {target}(value)) {{"),
        format!("\t\treturn fmt.Errorf(\"invalid {target} value: %q\", value)"),
        "\t}".to_string(),
        format!("\t*self = {target}(value)"),
        "\treturn nil".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

fn column_width<'a>(cells: impl Iterator<Item = &'a String>) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0)
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Upper-cases the first letter of every word. Underscores and alphanumerics
/// don't break words, so `first_name` becomes `First_name`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut word_start = true;
    for ch in name.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{SerializationKey, StructField};

    /// Tabs expanded so snapshots read the same in every editor.
    fn render(decls: &[Declaration]) -> String {
        let mut cg = Codegen::new();
        cg.emit_all(decls);
        cg.into_string().replace('\t', "    ")
    }

    fn qualified(import: &str, alias: Option<&str>, name: &str) -> TypeRef {
        TypeRef::Qualified { import: import.into(), alias: alias.map(String::from), name: name.into() }
    }

    fn field(name: &str, ty: TypeRef, omit_if_absent: bool) -> StructField {
        StructField {
            name: name.into(),
            ty,
            key: SerializationKey { name: name.into(), omit_if_absent },
        }
    }

    #[test]
    fn title_case_rules() {
        assert_eq!(title_case("id"), "Id");
        assert_eq!(title_case("createdAt"), "CreatedAt");
        assert_eq!(title_case("first_name"), "First_name");
        assert_eq!(title_case("a-b c"), "A-B C");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn renders_an_enum() {
        let out = render(&[
            Declaration::Named { name: "Color".into(), underlying: TypeRef::Builtin(Builtin::String) },
            Declaration::Constants {
                ty: "Color".into(),
                constants: vec![
                    Constant { name: "ColorRED".into(), value: "RED".into() },
                    Constant { name: "ColorGREEN".into(), value: "GREEN".into() },
                ],
            },
            Declaration::Collection {
                name: "allValuesOfColor".into(),
                element: TypeRef::named("Color"),
                items: vec!["ColorRED".into(), "ColorGREEN".into()],
            },
            Declaration::Decoder { target: "Color".into(), known_values: "allValuesOfColor".into() },
        ]);
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package graphql

        import (
            "encoding/json"
            "fmt"
            "slices"
        )

        type Color string

        const (
            ColorRED   Color = "RED"
            ColorGREEN Color = "GREEN"
        )

        var allValuesOfColor = []Color{ColorRED, ColorGREEN}

        func (self *Color) UnmarshalJSON(data []byte) error {
            var value string
            if err := json.Unmarshal(data, &value); err != nil {
                return err
            }
            if !slices.Contains(allValuesOfColor, Color(value)) {
                return fmt.Errorf("invalid Color value: %q", value)
            }
            *self = Color(value)
            return nil
        }
        "###);
    }

    #[test]
    fn renders_aligned_struct_fields() {
        let out = render(&[Declaration::Struct(StructDecl {
            name: "User".into(),
            fields: vec![
                field("id", TypeRef::Builtin(Builtin::String), false),
                field("groups", TypeRef::optional(TypeRef::list(TypeRef::named("Group"))), true),
                field("age", TypeRef::optional(TypeRef::Builtin(Builtin::Int32)), true),
            ],
        })]);
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package graphql

        type User struct {
            Id     string   `json:"id"`
            Groups *[]Group `json:"groups,omitempty"`
            Age    *int32   `json:"age,omitempty"`
        }
        "###);
    }

    #[test]
    fn renders_interfaces_and_markers() {
        let out = render(&[
            Declaration::Interface(InterfaceDecl {
                name: "SearchResult".into(),
                methods: vec![MethodSig { name: "IsSearchResult".into(), returns: None }],
            }),
            Declaration::Interface(InterfaceDecl {
                name: "Query".into(),
                methods: vec![
                    MethodSig { name: "me".into(), returns: Some(TypeRef::named("User")) },
                    MethodSig { name: "search".into(), returns: Some(TypeRef::list(TypeRef::named("SearchResult"))) },
                ],
            }),
            Declaration::MarkerImpl { receiver: "User".into(), method: "IsSearchResult".into() },
        ]);
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package graphql

        type SearchResult interface {
            IsSearchResult()
        }

        type Query interface {
            Me() User
            Search() []SearchResult
        }

        func (User) IsSearchResult() {}
        "###);
    }

    #[test]
    fn empty_shapes() {
        let out = render(&[
            Declaration::Constants { ty: "Nothing".into(), constants: vec![] },
            Declaration::Collection { name: "allValuesOfNothing".into(), element: TypeRef::named("Nothing"), items: vec![] },
            Declaration::Struct(StructDecl { name: "Empty".into(), fields: vec![] }),
            Declaration::Interface(InterfaceDecl { name: "Marker".into(), methods: vec![] }),
        ]);
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package graphql

        const ()

        var allValuesOfNothing = []Nothing{}

        type Empty struct{}

        type Marker interface{}
        "###);
    }

    #[test]
    fn qualified_types_are_imported_once() {
        let datetime = qualified("time", None, "Time");
        let decimal = qualified("github.com/shopspring/decimal", None, "Decimal");
        let mut cg = Codegen::with_package("api");
        cg.emit(&Declaration::Struct(StructDecl {
            name: "Order".into(),
            fields: vec![
                field("placedAt", datetime.clone(), false),
                field("shippedAt", TypeRef::optional(datetime), true),
                field("total", decimal, false),
            ],
        }));
        let out = cg.into_string().replace('\t', "    ");
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package api

        import (
            "github.com/shopspring/decimal"
            "time"
        )

        type Order struct {
            PlacedAt  time.Time       `json:"placedAt"`
            ShippedAt *time.Time      `json:"shippedAt,omitempty"`
            Total     decimal.Decimal `json:"total"`
        }
        "###);
    }

    #[test]
    fn package_names_skip_version_suffixes() {
        assert_eq!(package_name("time"), "time");
        assert_eq!(package_name("github.com/shopspring/decimal"), "decimal");
        assert_eq!(package_name("github.com/gofrs/uuid/v5"), "uuid");
        assert_eq!(package_name("gopkg.in/guregu/null.v4"), "null");
        assert_eq!(package_name("gopkg.in/yaml.v3"), "yaml");
        assert_eq!(package_name("example.com/pkg/version"), "version");
        assert_eq!(package_name("example.com/v2go"), "v2go");
    }

    #[test]
    fn versioned_and_aliased_imports() {
        let mut cg = Codegen::new();
        cg.emit(&Declaration::Struct(StructDecl {
            name: "Note".into(),
            fields: vec![
                field("id", qualified("github.com/gofrs/uuid/v5", None, "UUID"), false),
                field("text", TypeRef::optional(qualified("gopkg.in/guregu/null.v4", None, "String")), true),
                field("raw", qualified("github.com/example/jsonx/v2", Some("jx"), "Raw"), false),
            ],
        }));
        let out = cg.into_string().replace('\t', "    ");
        insta::assert_snapshot!(out, @r###"
        // Code generated by gql-codegen. DO NOT EDIT.

        package graphql

        import (
            jx "github.com/example/jsonx/v2"
            "github.com/gofrs/uuid/v5"
            "gopkg.in/guregu/null.v4"
        )

        type Note struct {
            Id   uuid.UUID    `json:"id"`
            Text *null.String `json:"text,omitempty"`
            Raw  jx.Raw       `json:"raw"`
        }
        "###);
    }

    #[test]
    fn constant_values_are_quoted() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn collecting_into_a_vec() {
        let decl = Declaration::MarkerImpl { receiver: "User".into(), method: "IsX".into() };
        let mut sink: Vec<Declaration> = Vec::new();
        sink.emit(&decl);
        assert_eq!(sink, [decl]);
    }
}
