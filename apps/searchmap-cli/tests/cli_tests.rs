use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use searchmap_cli::{compile_file, parse_args, read_source};
use searchmap_core::config::Config;

const CONFIG: &str = r#"
[i18n]
languages = ["en", "fr"]

[introspection]
actor = [{ name = "id", primary_key = true }, "authorizedFormOfName"]
otherName = [{ name = "id", primary_key = true }, "name", "note"]
"#;

const SOURCE: &str = r#"
mapping:
  actor:
    _attributes:
      i18n: true
      timestamp: true
    _foreign_types:
      otherNames: other_name
    properties:
      slug: { type: string, index: not_analyzed }
      entity_type_id: { type: integer }
  other_name:
    _attributes:
      i18n: true
      nested_only: true
    properties:
      type_id: { type: integer }
"#;

#[test]
fn compiles_yaml_source_with_config_collaborators() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), CONFIG).unwrap();
    let source = tmp.path().join("mapping.yml");
    fs::write(&source, SOURCE).unwrap();

    let config = Config::load_in(tmp.path(), "test").expect("config");
    let mapping = compile_file(&config, &source).expect("compile");

    let types: Vec<&String> = mapping.as_object().expect("types").keys().collect();
    assert_eq!(types, ["actor"]);

    let actor = &mapping["actor"]["properties"];
    let names: Vec<&String> = actor.as_object().expect("properties").keys().collect();
    assert_eq!(
        names,
        ["slug", "entityTypeId", "sourceCulture", "i18n", "createdAt", "updatedAt", "otherNames"]
    );
    assert_eq!(
        actor["i18n"]["properties"]["fr"]["properties"],
        json!({
            "authorizedFormOfName": { "type": "string", "index": "not_analyzed", "include_in_all": false }
        })
    );
    let other_names_en = &actor["otherNames"]["properties"]["i18n"]["properties"]["en"]["properties"];
    assert_eq!(
        other_names_en.as_object().expect("fields").keys().collect::<Vec<_>>(),
        ["name", "note"]
    );
    assert!(actor["otherNames"].get("_attributes").is_none());
}

#[test]
fn json_sources_are_read_as_json() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("mapping.json");
    fs::write(&source, r#"{"mapping": {"term": {"properties": {"code": {"type": "string"}}}}}"#).unwrap();

    let value = read_source(&source).expect("read");
    assert_eq!(value["mapping"]["term"]["properties"]["code"]["type"], "string");
}

#[test]
fn empty_source_compiles_to_empty_mapping() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("mapping.yml");
    fs::write(&source, "\n").unwrap();

    assert_eq!(read_source(&source).expect("read"), Value::Null);
    let mapping = compile_file(&Config::from_toml_str(CONFIG), &source).expect("compile");
    assert_eq!(mapping, json!({}));
}

#[test]
fn malformed_source_reports_shape_error() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("mapping.yml");
    fs::write(&source, "mapping: {}\nextra: {}\n").unwrap();

    let err = compile_file(&Config::from_toml_str(CONFIG), &source).expect_err("two roots");
    assert!(err.to_string().contains("exactly one root entry"), "{err}");
}

#[test]
fn missing_source_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(read_source(&tmp.path().join("absent.yml")).is_err());
}

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn parses_compile_arguments() {
    let args = parse_args(argv(&["compile", "mapping.yml", "--pretty", "--out", "out.json"])).expect("args");
    assert_eq!(args.source, PathBuf::from("mapping.yml"));
    assert_eq!(args.out, Some(PathBuf::from("out.json")));
    assert!(args.pretty);
    assert!(args.config_dir.is_none());
}

#[test]
fn flags_without_values_are_rejected() {
    let err = parse_args(argv(&["compile", "mapping.yml", "--out"])).expect_err("missing out");
    assert_eq!(err, "Missing value for --out");

    let err = parse_args(argv(&["compile", "mapping.yml", "--config-dir"])).expect_err("missing dir");
    assert_eq!(err, "Missing value for --config-dir");
}

#[test]
fn other_argument_errors_are_rejected() {
    assert!(parse_args(argv(&[])).is_err());
    assert!(parse_args(argv(&["build", "mapping.yml"])).is_err());
    assert!(parse_args(argv(&["compile"])).is_err());
    assert!(parse_args(argv(&["compile", "a.yml", "b.yml"])).is_err());
}
