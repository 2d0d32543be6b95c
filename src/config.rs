//! Runtime configuration from environment variables and secret files
//!
//! | Variable                   | Default                          |
//! |----------------------------|----------------------------------|
//! | `AGILITY_BACKEND_URL`      | unset (in-memory collaborators)  |
//! | `AGILITY_BACKEND_KEY`      | `$AGILITY_SECRETS_DIR/backend_key` |
//! | `AGILITY_SECRETS_DIR`      | `/run/secrets`                   |
//! | `AGILITY_SNAPSHOT_PATH`    | `edited.parquet`                 |
//! | `AGILITY_MAX_DOGS`         | `4`                              |
//! | `AGILITY_MIN_PASSWORD_LEN` | `6`                              |
//! | `AGILITY_SEED_NAMES`       | `フェリーチェ,カーロ,ディーノ`   |

use crate::registry::MAX_DOGS;
use crate::{Error, Result};
use std::fmt::Display;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Default score table rows.
pub const DEFAULT_SEED_NAMES: [&str; 3] = ["フェリーチェ", "カーロ", "ディーノ"];

/// Default minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hosted backend endpoint and API key.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL
    pub url: String,
    /// API key (never logged)
    pub key: String,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote backend; `None` runs against in-memory collaborators
    pub backend: Option<BackendConfig>,
    /// Score snapshot destination
    pub snapshot_path: PathBuf,
    /// Per-owner dog cap
    pub max_dogs: usize,
    /// Minimum sign-up password length
    pub min_password_len: usize,
    /// Score table rows seeded per session
    pub seed_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            snapshot_path: PathBuf::from("edited.parquet"),
            max_dogs: MAX_DOGS,
            min_password_len: MIN_PASSWORD_LEN,
            seed_names: DEFAULT_SEED_NAMES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a variable is malformed or the backend key is missing
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a variable is malformed or the backend key is missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secrets_dir = lookup("AGILITY_SECRETS_DIR")
            .map_or_else(|| PathBuf::from("/run/secrets"), PathBuf::from);

        let backend = match lookup("AGILITY_BACKEND_URL") {
            Some(url) => {
                let key = match lookup("AGILITY_BACKEND_KEY") {
                    Some(key) => key,
                    None => read_secret(&secrets_dir, "backend_key")?,
                };
                Some(BackendConfig { url, key })
            }
            None => {
                info!("AGILITY_BACKEND_URL not set, using in-memory collaborators");
                None
            }
        };

        let snapshot_path = lookup("AGILITY_SNAPSHOT_PATH")
            .map_or(defaults.snapshot_path, PathBuf::from);

        let max_dogs = try_load(&lookup, "AGILITY_MAX_DOGS", defaults.max_dogs)?;
        let min_password_len =
            try_load(&lookup, "AGILITY_MIN_PASSWORD_LEN", defaults.min_password_len)?;

        let seed_names = match lookup("AGILITY_SEED_NAMES") {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(ToString::to_string)
                    .collect();
                if names.is_empty() {
                    return Err(Error::Config(
                        "AGILITY_SEED_NAMES must name at least one row".to_string(),
                    ));
                }
                names
            }
            None => defaults.seed_names,
        };

        Ok(Self {
            backend,
            snapshot_path,
            max_dogs,
            min_password_len,
            seed_names,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            Error::Config(format!("Invalid {key} value '{raw}': {e}"))
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn read_secret(dir: &Path, secret_name: &str) -> Result<String> {
    let path = dir.join(secret_name);
    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
            Error::Config(format!(
                "Secret {secret_name} unavailable at {}: {e}",
                path.display()
            ))
        })
}
