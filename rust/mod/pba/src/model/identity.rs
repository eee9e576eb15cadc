use std::fmt;

use serde::{Deserialize, Serialize};

/// Product board assembly code, `XXXX-XXXXXX`, cut from a serial number.
///
/// Only [`crate::sn::decode_pba`] builds one from a serial; [`PbaCode::new`]
/// wraps an already-normalized code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PbaCode(String);

impl PbaCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PbaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a model identity was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelSource {
    Store,
    File,
}

/// Canonical ("top") model of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIdentity {
    pub name: String,
    pub source: ModelSource,

    /// Reserved fields following the model in the fallback file, passed
    /// through uninterpreted. Always empty for store results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved: Vec<String>,
}

impl ModelIdentity {
    pub fn from_store(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ModelSource::Store,
            reserved: Vec::new(),
        }
    }

    pub fn from_file(name: impl Into<String>, reserved: Vec<String>) -> Self {
        Self {
            name: name.into(),
            source: ModelSource::File,
            reserved,
        }
    }
}
