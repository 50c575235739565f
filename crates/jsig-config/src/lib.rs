//! Configuration for jsig reification and its logging.
//!
//! Config files are TOML (`jsig.toml`):
//!
//! ```toml
//! [reflect]
//! unresolved_type_variables = "error"
//! missing_classes = "defer"
//!
//! [logging]
//! level = "debug"
//! json = true
//! file = "jsig.log"
//! ```

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

mod logging;
mod schema;

pub use logging::init_tracing;
pub use schema::json_schema;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "jsig.toml";

/// What a reifying factory produces for a type-variable name no enclosing scope declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedTypeVariablePolicy {
    /// Produce an "unresolved" placeholder type and keep going.
    #[default]
    Ignore,
    /// Fail the reification request.
    Error,
}

/// What a reifying factory does when a named class cannot be loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MissingClassPolicy {
    /// Fail with a "type not present" error.
    #[default]
    Error,
    /// Produce a deferred, uninterpreted named type.
    Defer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct ReflectConfig {
    #[serde(default)]
    pub unresolved_type_variables: UnresolvedTypeVariablePolicy,
    #[serde(default)]
    pub missing_classes: MissingClassPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A level (`info`, `debug`, ...) or a full `EnvFilter` directive string.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json: bool,

    /// Write logs to stderr. When disabled the subscriber still filters but discards output.
    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Also append logs to this file. A file that cannot be opened is skipped.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    const DEFAULT_LEVEL: &'static str = "info";

    fn default_level() -> String {
        Self::DEFAULT_LEVEL.to_string()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Lower-cases bare level names (accepting `warning`); directive strings pass through.
    pub(crate) fn normalize_level_directives(input: &str) -> String {
        let level = input.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        let lowered = level.to_ascii_lowercase();
        match lowered.as_str() {
            "warning" => "warn".to_string(),
            "trace" | "debug" | "info" | "warn" | "error" | "off" => lowered,
            _ => level.to_string(),
        }
    }

    /// The effective filter: the configured level, with `RUST_LOG` merged on top when set.
    ///
    /// An unparsable combination falls back to `RUST_LOG` alone, then to the configured level,
    /// then to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        let configured = Self::normalize_level_directives(&self.level);
        let from_env = std::env::var("RUST_LOG")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let mut candidates = Vec::with_capacity(3);
        if let Some(env) = from_env {
            candidates.push(format!("{configured},{}", env.trim()));
            candidates.push(env.trim().to_string());
        }
        candidates.push(configured);

        candidates
            .into_iter()
            .find_map(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(Self::DEFAULT_LEVEL))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(deny_unknown_fields)]
pub struct JsigConfig {
    #[serde(default)]
    pub reflect: ReflectConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid jsig config: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        // Keep the message without the source snippet `Display` would add.
        ConfigError::Toml(error.message().to_string())
    }
}

impl JsigConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::load_from_str(&text),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load `jsig.toml` from `dir` if it exists, otherwise the defaults.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(
                target: "jsig.config",
                path = %path.display(),
                "no config file found; using defaults"
            );
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }
}
