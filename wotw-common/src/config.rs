//! Configuration loading and resolution
//!
//! Every key is resolved independently in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the database connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable holding the application secret key
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
pub const HOST_ENV: &str = "WOTW_HOST";
pub const PORT_ENV: &str = "WOTW_PORT";
pub const STATIC_DIR_ENV: &str = "WOTW_STATIC_DIR";
pub const SEED_FILE_ENV: &str = "WOTW_SEED_FILE";
pub const CONFIG_FILE_ENV: &str = "WOTW_CONFIG";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const APP_DIR_NAME: &str = "weed-of-the-week";

/// Rewrite the first `postgres://` prefix to `postgresql://`.
///
/// Some hosting providers hand out `postgres://` URLs while database drivers
/// expect `postgresql://`. URLs without the short prefix (including every
/// `sqlite:` URL) are returned unchanged.
pub fn normalize_database_url(url: &str) -> String {
    url.replacen("postgres://", "postgresql://", 1)
}

/// Application secret key
///
/// Never printed: `Debug` and `Display` both render as `***`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Bootstrap configuration loaded from TOML file
///
/// All keys are optional; anything missing falls through to the compiled
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default)]
    pub secret_key: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    /// Directory served under `/static/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// TOML seed set replacing the built-in catalog
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse TOML config from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load TOML config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Read TOML failed ({}): {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub secret_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub seed_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved site configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Normalized database URL
    pub database_url: String,
    pub secret_key: Option<SecretKey>,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub seed_file: Option<PathBuf>,
}

impl SiteConfig {
    /// Resolve configuration from CLI overrides, environment, TOML file and defaults
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let toml_config = match locate_config_file(overrides.config_file.as_deref())? {
            Some(path) => {
                info!("Loading config file: {}", path.display());
                TomlConfig::load(&path)?
            }
            None => TomlConfig::default(),
        };

        Self::resolve_with(overrides, &toml_config)
    }

    /// Resolve configuration against an already-loaded TOML config
    pub fn resolve_with(overrides: &ConfigOverrides, toml_config: &TomlConfig) -> Result<Self> {
        let database_url = pick(
            overrides.database_url.clone(),
            env_string(DATABASE_URL_ENV),
            toml_config.database_url.clone(),
        )
        .unwrap_or_else(default_database_url);

        let secret_key = pick(
            overrides.secret_key.clone(),
            env_string(SECRET_KEY_ENV),
            toml_config.secret_key.clone(),
        )
        .map(SecretKey::new);

        let host = pick(
            overrides.host.clone(),
            env_string(HOST_ENV),
            toml_config.host.clone(),
        )
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let env_port = match env_string(PORT_ENV) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|e| {
                Error::Config(format!("{} must be a port number, got '{}': {}", PORT_ENV, raw, e))
            })?),
            None => None,
        };
        let port = pick(overrides.port, env_port, toml_config.port).unwrap_or(DEFAULT_PORT);

        let static_dir = pick(
            overrides.static_dir.clone(),
            env_string(STATIC_DIR_ENV).map(PathBuf::from),
            toml_config.static_dir.clone(),
        )
        .unwrap_or_else(|| PathBuf::from("static"));

        let seed_file = pick(
            overrides.seed_file.clone(),
            env_string(SEED_FILE_ENV).map(PathBuf::from),
            toml_config.seed_file.clone(),
        );

        Ok(Self {
            database_url: normalize_database_url(&database_url),
            secret_key,
            host,
            port,
            static_dir,
            seed_file,
        })
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log a warning for settings the site can run without but should have
    pub fn warn_missing(&self) {
        if self.secret_key.is_none() {
            warn!("{} is not set", SECRET_KEY_ENV);
        }
    }
}

fn pick<T>(cli: Option<T>, env: Option<T>, toml: Option<T>) -> Option<T> {
    cli.or(env).or(toml)
}

/// Read an environment variable, treating empty values as unset
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Find the TOML config file to load
///
/// An explicitly named file (CLI or `WOTW_CONFIG`) must exist. The
/// platform default location is optional.
fn locate_config_file(cli_path: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = cli_path
        .map(Path::to_path_buf)
        .or_else(|| env_string(CONFIG_FILE_ENV).map(PathBuf::from));

    if let Some(path) = explicit {
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(Error::Config(format!("Config file not found: {}", path.display())));
    }

    Ok(default_config_path().filter(|p| p.exists()))
}

/// Platform config file location (`~/.config/weed-of-the-week/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

/// Compiled default database URL: a SQLite file in the platform data directory
pub fn default_database_url() -> String {
    let dir = dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./wotw_data"));
    format!("sqlite://{}", dir.join("wotw.db").display())
}
