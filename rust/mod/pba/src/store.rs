//! Read-only client over the unit database.
//!
//! Configured table and column names are spliced into the query text here
//! and aliased back to fixed role names, so rows are read through typed
//! accessors everywhere else.

use swcheck_core::{CheckError, CheckerConfig};
use swcheck_sql::{Row, SQLStore, Value};
use tracing::debug;

use crate::model::{InstalledVersionSet, ModelIdentity, PbaCode, VersionSlot};

/// Installed-version records and PBA-to-model mappings.
pub struct VersionStore {
    sql: Box<dyn SQLStore>,
    versions_sql: String,
    model_sql: String,
}

impl VersionStore {
    /// Build the queries from `config`. Names must already be validated.
    pub fn new(sql: Box<dyn SQLStore>, config: &CheckerConfig) -> Self {
        let cols = &config.columns.sw_versions;
        let mut select: Vec<String> = cols
            .versions()
            .iter()
            .zip(VersionSlot::ALL)
            .map(|(col, slot)| format!("{} AS {}", col, slot.column()))
            .collect();
        select.push(format!("{} AS date_added", cols.date_added));

        let versions_sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {} DESC LIMIT 1",
            select.join(", "),
            config.tables.sw_versions,
            cols.serial_number,
            cols.date_added,
        );

        let tm = &config.columns.top_models;
        let model_sql = format!(
            "SELECT {} AS top_model FROM {} WHERE {} = ?1 LIMIT 1",
            tm.top_model, config.tables.top_models, tm.serial_number,
        );

        Self {
            sql,
            versions_sql,
            model_sql,
        }
    }

    /// Versions from the newest record for `serial`. Older records are
    /// history and never surface.
    pub fn fetch_installed_versions(
        &self,
        serial: &str,
    ) -> Result<Option<InstalledVersionSet>, CheckError> {
        let row = self
            .sql
            .query_one(&self.versions_sql, &[Value::Text(serial.to_string())])
            .map_err(|e| CheckError::Storage(e.to_string()))?;

        let Some(row) = row else {
            debug!(serial, "no installed-version record");
            return Ok(None);
        };

        Ok(Some(InstalledVersionSet {
            serial_number: serial.to_string(),
            versions: VersionSlot::ALL.map(|slot| version_text(&row, slot)),
            recorded_at: row.get_text("date_added"),
        }))
    }

    /// Model mapped to `pba`. A row whose model is NULL or empty counts as
    /// no mapping.
    pub fn fetch_model(&self, pba: &PbaCode) -> Result<Option<ModelIdentity>, CheckError> {
        let row = self
            .sql
            .query_one(&self.model_sql, &[Value::Text(pba.to_string())])
            .map_err(|e| CheckError::Storage(e.to_string()))?;

        Ok(row
            .and_then(|r| r.get_text("top_model"))
            .filter(|m| !m.is_empty())
            .map(ModelIdentity::from_store))
    }
}

/// NULL versions read as empty strings.
fn version_text(row: &Row, slot: VersionSlot) -> String {
    row.get_text(slot.column()).unwrap_or_default()
}
