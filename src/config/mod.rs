use crate::output::Format;
use crate::ENV_CONFIG_PATH;

use std::collections::HashMap;
use std::env;
use std::path::Path;

mod file;

use file::ConfigFile;
pub use file::{ConfigError, Entry};

/// Defaults that apply when the command line leaves them out.
#[derive(Debug, Default)]
pub struct Config {
    format: Option<Format>,
    description: Option<String>,
    entries: Vec<Entry>,
}

impl Config {
    /// Loads the file named by `DYNAMO_CFN_CONFIG`, if any.
    pub fn new() -> Self {
        Self::load(env::var(ENV_CONFIG_PATH).ok())
    }

    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Self {
        let file = path.map(ConfigFile::load_or_default).unwrap_or_default();
        Self {
            format: file.format,
            description: file.description,
            entries: file.entries,
        }
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn description(&self) -> Option<String> {
        self.description.clone()
    }

    /// Logical names keyed by table name. Later entries win.
    pub fn logical_names(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.table_name.clone(), entry.logical_name.clone()))
            .collect()
    }
}
