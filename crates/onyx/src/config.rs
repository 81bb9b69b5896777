//! Runtime configuration.
//!
//! Values are merged from, in order of precedence: explicit [`Options`],
//! environment variables, a JSON config file and built-in defaults. Every
//! resolved value remembers where it came from.

use onyx_core::{Error, Result};
use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_SCHEMA_PATH: &str = "onyx.schema.json";

const ENV_DATABASE_ID: &str = "ONYX_DATABASE_ID";
const ENV_SCHEMA_PATH: &str = "ONYX_SCHEMA_PATH";
const ENV_RESOLVE_TIMEOUT_MS: &str = "ONYX_RESOLVE_TIMEOUT_MS";
const ENV_CONFIG_PATH: &str = "ONYX_CONFIG_PATH";

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Explicit,
    Env(&'static str),
    File(PathBuf),
    Default,
}

/// A configuration value and its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting<T> {
    pub value: T,
    pub source: Source,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_id: Option<Setting<String>>,

    pub schema_path: Setting<PathBuf>,

    /// Default deadline for a resolution
    pub resolve_timeout: Option<Setting<Duration>>,

    /// Fail `Db` construction when a resolver does not compile
    pub strict_resolvers: Setting<bool>,

    /// Config file that was read, if any
    pub config_file: Option<PathBuf>,
}

/// Values that outrank the environment and config files.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub database_id: Option<String>,
    pub schema_path: Option<PathBuf>,
    pub resolve_timeout: Option<Duration>,
    pub strict_resolvers: Option<bool>,

    /// Config file to read instead of searching for one
    pub config_path: Option<PathBuf>,

    /// Directory config files are searched in; defaults to the current
    /// directory
    pub work_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    database_id: Option<String>,
    schema_path: Option<PathBuf>,
    resolve_timeout_ms: Option<u64>,
    strict_resolvers: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_id: None,
            schema_path: Setting::new(PathBuf::from(DEFAULT_SCHEMA_PATH), Source::Default),
            resolve_timeout: None,
            strict_resolvers: Setting::new(true, Source::Default),
            config_file: None,
        }
    }
}

impl Config {
    /// Resolves the configuration from `options`, the process environment
    /// and config files.
    pub fn load(options: Options) -> Result<Config> {
        Config::load_with_env(options, |var| std::env::var(var).ok())
    }

    /// Like [`Config::load`], reading environment variables through `env`.
    pub fn load_with_env(
        options: Options,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config> {
        let env = |var: &'static str| {
            env(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (var, value))
        };

        let mut database_id = options.database_id.map(Setting::explicit).or_else(|| {
            env(ENV_DATABASE_ID).map(|(var, value)| Setting::new(value, Source::Env(var)))
        });

        let mut schema_path = options.schema_path.map(Setting::explicit).or_else(|| {
            env(ENV_SCHEMA_PATH)
                .map(|(var, value)| Setting::new(PathBuf::from(value), Source::Env(var)))
        });

        let mut resolve_timeout = match options.resolve_timeout {
            Some(timeout) => Some(Setting::explicit(timeout)),
            None => env(ENV_RESOLVE_TIMEOUT_MS)
                .map(|(var, value)| {
                    let millis = value.trim().parse::<u64>().map_err(|_| {
                        Error::invalid_config(format!(
                            "{var} must be a number of milliseconds, got `{value}`"
                        ))
                    })?;
                    Ok::<_, Error>(Setting::new(Duration::from_millis(millis), Source::Env(var)))
                })
                .transpose()?,
        };

        let mut strict_resolvers = options.strict_resolvers.map(Setting::explicit);

        let work_dir = match options.work_dir {
            Some(work_dir) => work_dir,
            None => std::env::current_dir()?,
        };

        let config_path = options
            .config_path
            .or_else(|| env(ENV_CONFIG_PATH).map(|(_, value)| PathBuf::from(value)));

        let file = match config_path {
            Some(path) => match read_file(&path) {
                Ok(file) => Some((path, file)),
                Err(err) => {
                    return Err(err.context(Error::invalid_config(format!(
                        "failed to read config file `{}`",
                        path.display()
                    ))))
                }
            },
            None => {
                let database_id = database_id.as_ref().map(|setting| setting.value.as_str());
                search_order(&work_dir, database_id)
                    .into_iter()
                    .find_map(|path| read_file(&path).ok().map(|file| (path, file)))
            }
        };

        let config_file = file.as_ref().map(|(path, _)| path.clone());

        if let Some((path, file)) = file {
            tracing::debug!(path = %path.display(), "read config file");

            let source = Source::File(path.clone());

            database_id = database_id.or_else(|| {
                file.database_id
                    .map(|value| Setting::new(value, source.clone()))
            });
            schema_path = schema_path.or_else(|| {
                file.schema_path.map(|schema_path| {
                    // Relative schema paths are relative to the config file.
                    let base = path.parent().unwrap_or(Path::new(""));
                    Setting::new(base.join(schema_path), source.clone())
                })
            });
            resolve_timeout = resolve_timeout.or_else(|| {
                file.resolve_timeout_ms
                    .map(|millis| Setting::new(Duration::from_millis(millis), source.clone()))
            });
            strict_resolvers = strict_resolvers.or_else(|| {
                file.strict_resolvers
                    .map(|value| Setting::new(value, source.clone()))
            });
        }

        let defaults = Config::default();

        Ok(Config {
            database_id,
            schema_path: schema_path.unwrap_or(defaults.schema_path),
            resolve_timeout,
            strict_resolvers: strict_resolvers.unwrap_or(defaults.strict_resolvers),
            config_file,
        })
    }
}

impl<T> Setting<T> {
    pub fn new(value: T, source: Source) -> Self {
        Setting { value, source }
    }

    fn explicit(value: T) -> Self {
        Setting::new(value, Source::Explicit)
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let src = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&src)?)
}

fn search_order(work_dir: &Path, database_id: Option<&str>) -> Vec<PathBuf> {
    let mut paths = vec![];

    if let Some(database_id) = database_id {
        paths.push(work_dir.join(format!("onyx-database-{database_id}.json")));
    }

    paths.push(work_dir.join("onyx-database.json"));
    paths.push(work_dir.join("config").join("onyx-database.json"));
    paths
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Explicit => f.write_str("explicit"),
            Source::Env(var) => write!(f, "env:{var}"),
            Source::File(path) => write!(f, "config:{}", path.display()),
            Source::Default => f.write_str("default"),
        }
    }
}
