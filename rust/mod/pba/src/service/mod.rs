pub mod report;
pub mod resolver;
pub mod validity;

use std::time::Duration;

use swcheck_core::{CheckError, CheckerConfig};
use swcheck_sql::{SQLStore, SqliteStore};
use tracing::debug;

use crate::reference::{ModelFile, ValidityFile};
use crate::store::VersionStore;

pub use validity::ValidityTable;

/// PBA software check service. Holds the store client and reference files
/// and answers lookups. Holds no mutable state, so one instance can serve
/// concurrent lookups.
pub struct PbaService {
    pub(crate) store: VersionStore,
    pub(crate) model_file: ModelFile,
    pub(crate) validity_file: ValidityFile,
}

impl PbaService {
    /// Build a service over an already-open store.
    pub fn new(sql: Box<dyn SQLStore>, config: &CheckerConfig) -> Result<Self, CheckError> {
        config.validate()?;
        Ok(Self {
            store: VersionStore::new(sql, config),
            model_file: ModelFile::new(&config.files.top_models_file),
            validity_file: ValidityFile::new(&config.files.validity_file),
        })
    }

    /// Open the configured SQLite database and build a service over it.
    pub fn open(config: &CheckerConfig) -> Result<Self, CheckError> {
        config.validate()?;
        let db = &config.database;
        let busy_timeout = Duration::from_millis(db.busy_timeout_ms);
        let opened = if db.read_only {
            SqliteStore::open_read_only(&db.path, busy_timeout)
        } else {
            SqliteStore::open_read_write(&db.path, busy_timeout)
        };
        let sql = opened.map_err(|e| CheckError::Storage(e.to_string()))?;
        debug!(path = %db.path.display(), read_only = db.read_only, "unit database opened");
        Self::new(Box::new(sql), config)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::io::Write;
    use std::path::Path;

    use swcheck_core::CheckerConfig;
    use swcheck_sql::{SqliteStore, Value};

    use super::PbaService;

    /// In-memory store with the default schema.
    pub fn store() -> SqliteStore {
        let sql = SqliteStore::open_in_memory().unwrap();
        sql.exec(
            "CREATE TABLE sw_versions (
                serial_number TEXT, sw1 TEXT, sw2 TEXT, sw3 TEXT,
                sw4 TEXT, sw5 TEXT, sw6 TEXT, date_added TEXT
            )",
            &[],
        )
        .unwrap();
        sql.exec(
            "CREATE TABLE top_models (serial_number TEXT, top_model TEXT)",
            &[],
        )
        .unwrap();
        sql
    }

    pub fn insert_versions(sql: &SqliteStore, serial: &str, versions: [&str; 6], date_added: &str) {
        let mut params = vec![Value::Text(serial.into())];
        params.extend(versions.iter().map(|v| Value::Text(v.to_string())));
        params.push(Value::Text(date_added.into()));
        sql.exec(
            "INSERT INTO sw_versions VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            &params,
        )
        .unwrap();
    }

    pub fn insert_model(sql: &SqliteStore, pba: &str, model: Option<&str>) {
        let model = model.map_or(Value::Null, |m| Value::Text(m.into()));
        sql.exec(
            "INSERT INTO top_models VALUES (?1, ?2)",
            &[Value::Text(pba.into()), model],
        )
        .unwrap();
    }

    pub fn write(dir: &Path, name: &str, content: &str) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(content.as_bytes()).unwrap();
    }

    /// Service over `sql` with reference files written into `dir`.
    pub fn service(
        sql: SqliteStore,
        dir: &Path,
        top_models: &str,
        validity: &str,
    ) -> PbaService {
        write(dir, "top_models.txt", top_models);
        write(dir, "sw_validity.txt", validity);
        let mut config = CheckerConfig::default();
        config.rebase(dir);
        PbaService::new(Box::new(sql), &config).unwrap()
    }
}
