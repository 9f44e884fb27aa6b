use crate::output::Format;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ConfigFile {
    pub format: Option<Format>,
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Logical name to use for a given table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Entry {
    pub table_name: String,
    pub logical_name: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A broken config file only costs the defaults it would have set.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            warn!("{err}, ignoring it");
            Self::default()
        })
    }
}
