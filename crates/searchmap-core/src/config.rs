//! Configuration loader, path helpers and the config-backed locale provider.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_I18N__LANGUAGES='[en, fr]'`).
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::de::DeserializeOwned;
use std::env;
use std::path::{Path, PathBuf};

use crate::introspect::ColumnIntrospector;
use crate::options::CompileOptions;
use crate::traits::LocaleProvider;
use crate::types::Locale;
use crate::{Error, Result};

pub const LANGUAGES_KEY: &str = "i18n.languages";
pub const INTROSPECTION_KEY: &str = "introspection";
pub const COMPILER_KEY: &str = "compiler";

pub struct Config {
    figment: Figment,
    source: Option<Source>,
}

/// Where a file-backed configuration came from, so it can be re-read.
struct Source {
    dir: PathBuf,
    env_name: String,
}

impl Source {
    fn figment(&self) -> Figment {
        let dir = &self.dir;
        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match self.env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment.merge(Env::prefixed("APP_").split("__"))
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_in(Path::new("."), &env_name)
    }

    /// Loads `config.toml` and the overlay for `env_name` from `dir`.
    /// Missing files are skipped.
    pub fn load_in(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let source = Source {
            dir: dir.to_path_buf(),
            env_name: env_name.to_string(),
        };
        let config = Self {
            figment: source.figment(),
            source: Some(source),
        };
        config.validate_for_env(env_name)?;
        tracing::debug!(dir = %dir.display(), env = env_name, "configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(toml: &str) -> Self {
        Self {
            figment: Figment::new().merge(Toml::string(toml)),
            source: None,
        }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Current `i18n.languages`; an absent key means no locales.
    ///
    /// File-backed configurations re-read their files and `APP_*` variables
    /// on every call.
    pub fn languages(&self) -> Result<Vec<Locale>> {
        match &self.source {
            Some(source) => extract_or_default(&source.figment(), LANGUAGES_KEY),
            None => self.get_or_default(LANGUAGES_KEY),
        }
    }

    pub fn compile_options(&self) -> Result<CompileOptions> {
        self.get_or_default(COMPILER_KEY)
    }

    pub fn introspector(&self) -> Result<ColumnIntrospector> {
        Ok(ColumnIntrospector::new(self.get_or_default(INTROSPECTION_KEY)?))
    }

    fn get_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        extract_or_default(&self.figment, key)
    }

    fn validate_for_env(&self, env: &str) -> anyhow::Result<()> {
        match env {
            "prod" | "production" => {
                if self.languages()?.is_empty() {
                    anyhow::bail!("'{}' must list at least one locale in production", LANGUAGES_KEY);
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }
}

fn extract_or_default<T>(figment: &Figment, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match figment.extract_inner(key) {
        Ok(value) => Ok(value),
        Err(e) if e.missing() => Ok(T::default()),
        Err(e) => Err(Error::InvalidConfig(format!("'{key}': {e}"))),
    }
}

impl LocaleProvider for Config {
    fn locales(&self) -> Result<Vec<Locale>> {
        self.languages()
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
