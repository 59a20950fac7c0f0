//! File-backed connection store.
//!
//! Each connection is one pretty-printed JSON file,
//! `<root>/connections/<name>.connection.json`. Writes go through a
//! temporary file and a rename so a reader never sees a half-written record.

use super::dirs::CONNECTIONS_DIR_NAME;
use crate::config::ConnectionConfig;
use crate::error::{DataValidationError, ErrorContext, Result, StoreErrorKind};
use std::path::{Path, PathBuf};

/// File name suffix identifying connection records.
pub const CONNECTION_FILE_SUFFIX: &str = ".connection.json";

/// First characters that mark a connection argument as inline JSON.
pub const JSON_LEADERS: [char; 3] = ['{', '[', '"'];

/// Resolves connection names to stored records.
///
/// Implemented by [`ConnectionStore`] and by callers that open the store only
/// when a name actually has to be looked up.
pub trait ConnectionLookup {
    fn lookup(&self, name: &str) -> Result<ConnectionConfig>;
}

/// Handle to the on-disk connection store.
#[derive(Debug, Clone)]
pub struct ConnectionStore {
    dir: PathBuf,
}

impl ConnectionStore {
    /// Open a store under `config_home`; records live in its `connections/`
    /// subdirectory, created on first write.
    pub fn new(config_home: impl Into<PathBuf>) -> Self {
        Self {
            dir: config_home.into().join(CONNECTIONS_DIR_NAME),
        }
    }

    /// Directory holding the connection records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{CONNECTION_FILE_SUFFIX}"))
    }

    /// Persist `config` under `name`, replacing any existing record.
    pub fn store(&self, name: &str, config: &ConnectionConfig) -> Result<PathBuf> {
        validate_connection_name(name)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| DataValidationError::io(&self.dir, e))?;

        let path = self.record_path(name);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(config)
            .with_context(|| format!("serializing connection '{name}'"))?;

        std::fs::write(&tmp, content).map_err(|e| DataValidationError::io(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| DataValidationError::io(&path, e))?;

        tracing::info!("Stored connection '{}' at {}", name, path.display());
        Ok(path)
    }

    /// Load the record stored under `name`.
    pub fn load(&self, name: &str) -> Result<ConnectionConfig> {
        validate_connection_name(name)?;
        let path = self.record_path(name);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataValidationError::store(
                    format!("loading from {}", self.dir.display()),
                    StoreErrorKind::NotFound(name.to_string()),
                ));
            }
            Err(e) => return Err(DataValidationError::io(&path, e)),
        };

        tracing::debug!("Loaded connection '{}' from {}", name, path.display());
        serde_json::from_str(&content).map_err(|e| {
            DataValidationError::store(
                format!("reading {}", path.display()),
                StoreErrorKind::Corrupt {
                    name: name.to_string(),
                    reason: e.to_string(),
                },
            )
        })
    }

    /// Names of all stored connections, sorted.
    ///
    /// A store that has never been written to is empty, not an error.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DataValidationError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DataValidationError::io(&self.dir, e))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(CONNECTION_FILE_SUFFIX) {
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

impl ConnectionLookup for ConnectionStore {
    fn lookup(&self, name: &str) -> Result<ConnectionConfig> {
        self.load(name)
    }
}

/// Check that `name` can be used as a connection record name.
///
/// Names become file names, so path separators, NUL and the special
/// directory names are rejected. A name must also be usable as a
/// `--source-conn`/`--target-conn` value: no surrounding whitespace, and no
/// leading `{`, `[` or `"` (those values are decoded as inline JSON).
pub fn validate_connection_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name != name.trim()
        || name.starts_with(JSON_LEADERS)
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(DataValidationError::store(
            "validating connection name",
            StoreErrorKind::InvalidName(name.to_string()),
        ));
    }
    Ok(())
}
