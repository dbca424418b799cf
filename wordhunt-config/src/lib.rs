//! Loader for wordhunt configuration with YAML + environment overlays.
//!
//! Every field is optional; with no file and no `WORDHUNT__*` variables the
//! defaults below apply. Precedence, lowest first: built-in defaults, file and
//! inline YAML sources in the order they were added, environment variables.
//!
//! ```yaml
//! http:
//!   timeout_secs: 30
//!   connect_timeout_secs: 5
//!   user_agent: "wordhunt/0.1"
//! query:
//!   tie_break: lexical      # lexical | unspecified
//! logging:
//!   dir: "~/.local/share/wordhunt"
//!   format: text            # text | json
//!   stderr: false
//!   filter: info
//! ```
//!
//! Environment overrides use `__` between path segments, for example
//! `WORDHUNT__HTTP__TIMEOUT_SECS=10`. String values may reference other
//! variables as `${VAR}`; expansion happens after all sources are merged.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use wordhunt_common::TieBreak;
use wordhunt_common::observability::{LogConfig, LogFormat};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "WORDHUNT";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WordhuntConfig {
    pub http: HttpConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request budget (connect, send and body).
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 5,
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub tie_break: TieBreak,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            stderr: false,
            filter: "info".into(),
        }
    }
}

impl LoggingConfig {
    /// Settings for [`wordhunt_common::observability::init_logging`].
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
            ..LogConfig::default()
        }
    }
}

fn default_user_agent() -> String {
    concat!("wordhunt/", env!("CARGO_PKG_VERSION")).into()
}

impl WordhuntConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.http.connect_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "http.connect_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Message("http.user_agent must not be empty".into()));
        }
        Ok(())
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct WordhuntConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for WordhuntConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl WordhuntConfigLoader {
    /// Start from the built-in defaults plus `WORDHUNT__` env overrides.
    ///
    /// ```
    /// use wordhunt_common::TieBreak;
    /// use wordhunt_config::WordhuntConfigLoader;
    ///
    /// let config = WordhuntConfigLoader::new().load().expect("defaults are valid");
    ///
    /// assert_eq!(config.http.timeout_secs, 30);
    /// assert_eq!(config.query.tie_break, TieBreak::Lexical);
    /// assert!(!config.logging.stderr);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when it does not exist.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use wordhunt_common::TieBreak;
    /// use wordhunt_config::WordhuntConfigLoader;
    ///
    /// let cfg = WordhuntConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// http:
    ///   timeout_secs: 5
    /// query:
    ///   tie_break: unspecified
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.http.timeout_secs, 5);
    /// assert_eq!(cfg.http.connect_timeout_secs, 5);
    /// assert_eq!(cfg.query.tie_break, TieBreak::Unspecified);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// Sources merge in the order they were attached and `WORDHUNT__`
    /// variables are layered on top of all of them. `${VAR}` placeholders are
    /// expanded afterwards and the result is validated.
    pub fn load(self) -> Result<WordhuntConfig, ConfigError> {
        let builder = self.builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        let cfg = builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: WordhuntConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}
