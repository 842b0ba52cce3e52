//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `REDSEARCH_*` env vars.
//! Typed sections (`[expansion]`, `[analyzer]`, `[search]`) fall back to their
//! defaults when absent, so an empty configuration is always valid.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("REDSEARCH_").split("__"));

        let config = Self { figment };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an inline TOML document. Environment
    /// variables are not consulted.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let config = Self { figment: Figment::new().merge(Toml::string(toml)) };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    fn section<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.figment.contains(key) { self.get(key) } else { Ok(T::default()) }
    }

    pub fn expansion(&self) -> anyhow::Result<ExpansionConfig> { self.section("expansion") }

    pub fn analyzer(&self) -> anyhow::Result<AnalyzerConfig> { self.section("analyzer") }

    pub fn search(&self) -> anyhow::Result<SearchConfig> { self.section("search") }

    fn validate(&self) -> anyhow::Result<()> {
        self.expansion()?.validate()?;
        let analyzer = self.analyzer()?;
        if analyzer.max_token_len == 0 {
            return Err(Error::InvalidConfig("analyzer.max_token_len must be positive".into()).into());
        }
        Ok(())
    }
}

/// Where feedback documents take their term statistics from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatistics {
    /// An ephemeral index holding only the feedback documents.
    #[default]
    SubIndex,
    /// The full index, summing frequencies over the feedback documents.
    Corpus,
}

/// Rocchio weights and term-selection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub max_added_terms: usize,
    pub threshold: f64,
    pub field: String,
    pub statistics: FeedbackStatistics,
    /// Resubmit `term^weight` clauses instead of bare terms.
    pub boost: bool,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.75,
            gamma: 0.15,
            max_added_terms: 5,
            threshold: 0.0,
            field: "text".to_string(),
            statistics: FeedbackStatistics::SubIndex,
            boost: false,
        }
    }
}

impl ExpansionConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("expansion.{name} must be a finite non-negative number, got {value}")));
            }
        }
        if !self.threshold.is_finite() {
            return Err(Error::InvalidConfig(format!("expansion.threshold must be finite, got {}", self.threshold)));
        }
        if self.boost && self.threshold < 0.0 {
            return Err(Error::InvalidConfig(format!("expansion.boost needs a non-negative threshold, got {}", self.threshold)));
        }
        if self.field.is_empty() {
            return Err(Error::InvalidConfig("expansion.field must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub stop_words: Vec<String>,
    pub max_token_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self { Self { stop_words: Vec::new(), max_token_len: 40 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub top: usize,
    pub default_field: String,
    pub result_fields: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top: 10,
            default_field: "text".to_string(),
            result_fields: vec!["subreddit".to_string(), "author".to_string(), "text".to_string()],
        }
    }
}

/// Expand a user-provided path string. The CLI takes data and index folders
/// as typed in shells and config files, so `~` and `$VAR` are honoured.
///
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
