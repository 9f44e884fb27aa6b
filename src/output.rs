use crate::template::Template;
use crate::{Error, Result};

use serde::Deserialize;
use std::fmt;
use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;
use tempfile::Builder;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn render(template: &Template, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(template)
            .map(|text| text + "\n")
            .map_err(|err| Error::Render(format!("{err}"))),
        Format::Yaml => {
            serde_yaml::to_string(template).map_err(|err| Error::Render(format!("{err}")))
        }
    }
}

/// Writes `contents` to `path` through a sibling temp file so that a
/// failed write never leaves a truncated template behind.
///
/// An existing target keeps its permissions. A new one gets the same mode a
/// plain `fs::write` would give it under the current umask.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = Builder::new();
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }
    let mut file = builder.tempfile_in(dir).map_err(|err| Error::io(dir, err))?;

    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|err| Error::io(file.path(), err))?;
    }
    file.write_all(contents.as_bytes())
        .map_err(|err| Error::io(file.path(), err))?;
    file.persist(path)
        .map_err(|err| Error::io(path, err.error))?;

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

// The mode is passed to open(2), so the umask still applies.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
