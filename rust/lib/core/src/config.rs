//! Checker configuration.
//!
//! Reads a TOML file shaped like:
//!
//! ```toml
//! [database]
//! path = "swcheck.sqlite"
//!
//! [tables]
//! sw_versions = "sw_versions"
//! top_models = "top_models"
//!
//! [columns.sw_versions]
//! serial_number = "serial_number"
//! date_added = "date_added"
//!
//! [columns.top_models]
//! top_model = "top_model"
//!
//! [files]
//! validity_file = "sw_validity.txt"
//! top_models_file = "top_models.txt"
//! ```
//!
//! Every key is optional and defaults to its role name. The loaded value is
//! immutable and handed to each component's constructor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CheckError;

/// Directory that bare context names resolve into.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/swcheck";

/// Top-level checker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckerConfig {
    pub database: DatabaseConfig,
    pub tables: TablesConfig,
    pub columns: ColumnsConfig,
    pub files: FilesConfig,
}

/// Relational store holding installed-version records and model mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,

    /// Open the database without write access. The checker never writes.
    pub read_only: bool,

    /// How long a query waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("swcheck.sqlite"),
            read_only: true,
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Per-unit installed version records.
    pub sw_versions: String,
    /// PBA code to top model mapping.
    pub top_models: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            sw_versions: "sw_versions".into(),
            top_models: "top_models".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColumnsConfig {
    pub sw_versions: SwVersionsColumns,
    pub top_models: TopModelsColumns,
}

/// Column names of the installed-versions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwVersionsColumns {
    pub serial_number: String,
    pub sw1: String,
    pub sw2: String,
    pub sw3: String,
    pub sw4: String,
    pub sw5: String,
    pub sw6: String,
    pub date_added: String,
}

impl Default for SwVersionsColumns {
    fn default() -> Self {
        Self {
            serial_number: "serial_number".into(),
            sw1: "sw1".into(),
            sw2: "sw2".into(),
            sw3: "sw3".into(),
            sw4: "sw4".into(),
            sw5: "sw5".into(),
            sw6: "sw6".into(),
            date_added: "date_added".into(),
        }
    }
}

impl SwVersionsColumns {
    /// The six version columns in slot order.
    pub fn versions(&self) -> [&str; 6] {
        [
            &self.sw1, &self.sw2, &self.sw3, &self.sw4, &self.sw5, &self.sw6,
        ]
    }
}

/// Column names of the model mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopModelsColumns {
    /// Holds a PBA code, despite the name.
    pub serial_number: String,
    pub top_model: String,
}

impl Default for TopModelsColumns {
    fn default() -> Self {
        Self {
            serial_number: "serial_number".into(),
            top_model: "top_model".into(),
        }
    }
}

/// Flat reference datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// `model,_,version,_,start,end` rows.
    pub validity_file: PathBuf,
    /// `pba,model,...` rows consulted when the store has no mapping.
    pub top_models_file: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            validity_file: PathBuf::from("sw_validity.txt"),
            top_models_file: PathBuf::from("top_models.txt"),
        }
    }
}

impl CheckerConfig {
    /// Resolve a context name or explicit path to a config file path.
    ///
    /// Anything containing `/` or `.` is taken as a path; a bare name maps to
    /// `/etc/swcheck/<name>.toml`.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            Path::new(DEFAULT_CONFIG_DIR).join(format!("{}.toml", name_or_path))
        }
    }

    /// Load and validate a config file. Relative database and reference file
    /// paths are rebased onto the directory holding the config file.
    pub fn load(path: &Path) -> Result<Self, CheckError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CheckError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text without touching the filesystem.
    pub fn from_toml(content: &str) -> Result<Self, CheckError> {
        toml::from_str(content).map_err(|e| CheckError::Config(e.to_string()))
    }

    /// Make relative paths relative to `base`.
    pub fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.database.path,
            &mut self.files.validity_file,
            &mut self.files.top_models_file,
        ] {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }

    /// Reject empty paths and names that cannot be spliced into SQL text.
    pub fn validate(&self) -> Result<(), CheckError> {
        let paths = [
            ("database.path", &self.database.path),
            ("files.validity_file", &self.files.validity_file),
            ("files.top_models_file", &self.files.top_models_file),
        ];
        for (key, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(CheckError::Config(format!("{} is empty", key)));
            }
        }

        let sw = &self.columns.sw_versions;
        let tm = &self.columns.top_models;
        let identifiers = [
            ("tables.sw_versions", self.tables.sw_versions.as_str()),
            ("tables.top_models", self.tables.top_models.as_str()),
            ("columns.sw_versions.serial_number", sw.serial_number.as_str()),
            ("columns.sw_versions.sw1", sw.sw1.as_str()),
            ("columns.sw_versions.sw2", sw.sw2.as_str()),
            ("columns.sw_versions.sw3", sw.sw3.as_str()),
            ("columns.sw_versions.sw4", sw.sw4.as_str()),
            ("columns.sw_versions.sw5", sw.sw5.as_str()),
            ("columns.sw_versions.sw6", sw.sw6.as_str()),
            ("columns.sw_versions.date_added", sw.date_added.as_str()),
            ("columns.top_models.serial_number", tm.serial_number.as_str()),
            ("columns.top_models.top_model", tm.top_model.as_str()),
        ];
        for (key, name) in identifiers {
            if !is_sql_identifier(name) {
                return Err(CheckError::Config(format!(
                    "{} = {:?} is not a valid SQL identifier",
                    key, name
                )));
            }
        }
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_.]*`
fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
