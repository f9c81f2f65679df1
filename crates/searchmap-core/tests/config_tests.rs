use std::fs;
use std::path::Path;
use tempfile::TempDir;

use searchmap_core::config::{resolve_with_base, Config};
use searchmap_core::{
    CollisionPolicy, CompileOptions, EmbedOrder, Error, FieldIntrospector, Locale, LocaleProvider,
};

const BASE: &str = r#"
[i18n]
languages = ["en", "fr"]

[introspection]
actor = ["authorizedFormOfName", { name = "id", primary_key = true }, { name = "parentId", foreign_key = true }, "history"]
otherName = ["name"]

[compiler]
embed_order = "dependencies"
"#;

#[test]
fn languages_come_from_i18n_section() {
    let config = Config::from_toml_str(BASE);
    let locales = config.locales().expect("locales");
    assert_eq!(locales, vec![Locale::from("en"), Locale::from("fr")]);
}

#[test]
fn introspector_skips_key_columns() {
    let introspector = Config::from_toml_str(BASE).introspector().expect("introspector");
    assert_eq!(
        introspector.translatable_fields("actor").expect("actor"),
        ["authorizedFormOfName", "history"]
    );
    assert_eq!(introspector.translatable_fields("otherName").expect("otherName"), ["name"]);
}

#[test]
fn introspector_rejects_unknown_types() {
    let introspector = Config::from_toml_str(BASE).introspector().expect("introspector");
    let err = introspector.translatable_fields("term").expect_err("term");
    assert!(matches!(err, Error::UnknownIntrospectionTarget(ref name) if name == "term"));
}

#[test]
fn compiler_options_fill_missing_keys_with_defaults() {
    let options = Config::from_toml_str(BASE).compile_options().expect("options");
    assert_eq!(
        options,
        CompileOptions {
            collision_policy: CollisionPolicy::PreferRenamed,
            embed_order: EmbedOrder::Dependencies,
        }
    );
}

#[test]
fn empty_config_means_no_locales_and_default_options() {
    let config = Config::from_toml_str("");
    assert!(config.languages().expect("languages").is_empty());
    assert_eq!(config.compile_options().expect("options"), CompileOptions::default());
    let err = config.introspector().expect("introspector").translatable_fields("actor");
    assert!(err.is_err());
}

#[test]
fn invalid_policy_is_a_config_error() {
    let config = Config::from_toml_str("[compiler]\ncollision_policy = \"keep_middle\"\n");
    let err = config.compile_options().expect_err("unknown policy");
    assert!(matches!(err, Error::InvalidConfig(_)));
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write config");
}

#[test]
fn env_overlay_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "config.toml", BASE);
    write(tmp.path(), "config.test.toml", "[i18n]\nlanguages = [\"de\"]\n");

    let test = Config::load_in(tmp.path(), "test").expect("test config");
    assert_eq!(test.languages().expect("languages"), vec![Locale::from("de")]);

    let dev = Config::load_in(tmp.path(), "dev").expect("dev config");
    assert_eq!(dev.languages().expect("languages").len(), 2, "dev overlay is absent");
}

#[test]
fn locales_follow_config_file_edits() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "config.toml", "[i18n]\nlanguages = [\"en\"]\n");

    let config = Config::load_in(tmp.path(), "test").expect("config");
    assert_eq!(config.locales().expect("locales"), vec![Locale::from("en")]);

    write(tmp.path(), "config.toml", "[i18n]\nlanguages = [\"en\", \"fr\"]\n");
    assert_eq!(
        config.locales().expect("locales"),
        vec![Locale::from("en"), Locale::from("fr")]
    );
}

#[test]
fn production_requires_locales() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "config.toml", "[compiler]\nembed_order = \"declaration\"\n");
    assert!(Config::load_in(tmp.path(), "prod").is_err());
}

#[test]
fn get_reads_raw_keys() {
    let config = Config::from_toml_str(BASE);
    let order: String = config.get("compiler.embed_order").expect("embed order");
    assert_eq!(order, "dependencies");
    assert!(config.get::<String>("compiler.missing").is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/mappings");
    assert_eq!(resolve_with_base(base, "actor.yml"), base.join("actor.yml"));
    assert_eq!(resolve_with_base(base, "/etc/mapping.yml"), Path::new("/etc/mapping.yml"));
}
