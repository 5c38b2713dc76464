use std::path::PathBuf;

use gql_codegen::{EntityKind, GenerateError, ScalarRegistry, generate_go_source, load_schema};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn expand_tabs(src: &str) -> String {
    src.replace('\t', "    ")
}

#[test]
fn blog_schema() {
    let schema = load_schema(fixture("blog.json")).unwrap();
    let (src, report) = generate_go_source(&schema, &ScalarRegistry::default(), "graphql");

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.emitted, 7);
    insta::assert_snapshot!(expand_tabs(&src), @r###"
    // Code generated by gql-codegen. DO NOT EDIT.

    package graphql

    import (
        "encoding/json"
        "fmt"
        "slices"
    )

    type Role string

    const (
        RoleADMIN  Role = "ADMIN"
        RoleAUTHOR Role = "AUTHOR"
        RoleREADER Role = "READER"
    )

    var allValuesOfRole = []Role{RoleADMIN, RoleAUTHOR, RoleREADER}

    func (self *Role) UnmarshalJSON(data []byte) error {
        var value string
        if err := json.Unmarshal(data, &value); err != nil {
            return err
        }
        if !slices.Contains(allValuesOfRole, Role(value)) {
            return fmt.Errorf("invalid Role value: %q", value)
        }
        *self = Role(value)
        return nil
    }

    type SearchResult interface {
        IsSearchResult()
    }

    type User struct {
        Id    string  `json:"id"`
        Name  *string `json:"name,omitempty"`
        Role  Role    `json:"role"`
        Posts *[]Post `json:"posts,omitempty"`
    }

    func (User) IsSearchResult() {}

    type Post struct {
        Title  string `json:"title"`
        Likes  int32  `json:"likes"`
        Author User   `json:"author"`
    }

    func (Post) IsSearchResult() {}

    type Query interface {
        Me() *User
        Search() []SearchResult
    }

    type Mutation interface {
        Publish() *string
    }

    type PostInput struct {
        Title    string     `json:"title"`
        Tags     *[]*string `json:"tags,omitempty"`
        Audience *Role      `json:"audience,omitempty"`
    }
    "###);
}

#[test]
fn output_is_identical_across_runs() {
    let schema = load_schema(fixture("blog.json")).unwrap();
    let scalars = ScalarRegistry::default();
    let (first, _) = generate_go_source(&schema, &scalars, "graphql");
    let (second, _) = generate_go_source(&schema, &scalars, "graphql");
    assert_eq!(first, second);
}

#[test]
fn unknown_scalars_only_drop_their_entity() {
    let schema = load_schema(fixture("custom_scalars.json")).unwrap();
    let (src, report) = generate_go_source(&schema, &ScalarRegistry::default(), "graphql");

    assert_eq!(report.emitted, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, EntityKind::Object);
    assert_eq!(report.failures[0].name, "Event");
    assert_eq!(report.failures[0].error, GenerateError::UnknownScalar("UUID".into()));
    assert!(src.contains("type Tag struct {"));
    assert!(!src.contains("Event"));
}

#[test]
fn scalar_mapping_fills_the_gaps() {
    let schema = load_schema(fixture("custom_scalars.json")).unwrap();
    let mapping = ScalarRegistry::from_mapping_file(fixture("custom_scalars.scalars.json")).unwrap();
    let scalars = ScalarRegistry::default().merge(mapping);
    let (src, report) = generate_go_source(&schema, &scalars, "events");

    assert!(report.is_success(), "{:?}", report.failures);
    insta::assert_snapshot!(expand_tabs(&src), @r###"
    // Code generated by gql-codegen. DO NOT EDIT.

    package events

    import (
        "time"
    )

    type Event struct {
        Id string     `json:"id"`
        At *time.Time `json:"at,omitempty"`
    }

    type Tag struct {
        Label string `json:"label"`
    }
    "###);
}

#[test]
fn versioned_import_paths_use_the_package_name() {
    let schema = gql_codegen::Schema::from_json_str(indoc::indoc! {r#"
        { "server": { "objects": { "Note": { "name": "Note", "fields": {
            "id": { "nullable": false, "spec": { "_type": "literal", "type": { "_type": "Scalar", "name": "UUID" } } },
            "note": { "nullable": true, "spec": { "_type": "literal", "type": { "_type": "Scalar", "name": "Text" } } }
        } } } } }
    "#})
    .unwrap();
    let mapping = ScalarRegistry::from_mapping_str(
        r#"{
            "UUID": { "type": "UUID", "import": "github.com/gofrs/uuid/v5" },
            "Text": { "type": "String", "import": "gopkg.in/guregu/null.v4" }
        }"#,
    )
    .unwrap();
    let (src, report) = generate_go_source(&schema, &ScalarRegistry::default().merge(mapping), "graphql");

    assert!(report.is_success(), "{:?}", report.failures);
    insta::assert_snapshot!(expand_tabs(&src), @r###"
    // Code generated by gql-codegen. DO NOT EDIT.

    package graphql

    import (
        "github.com/gofrs/uuid/v5"
        "gopkg.in/guregu/null.v4"
    )

    type Note struct {
        Id   uuid.UUID    `json:"id"`
        Note *null.String `json:"note,omitempty"`
    }
    "###);
}
