//! Errors from the SQL layer. Messages carry the backend's own text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    /// The database file could not be opened or configured.
    #[error("cannot open database: {0}")]
    Connection(String),

    /// A query failed to prepare, bind or step.
    #[error("query failed: {0}")]
    Query(String),

    /// A write statement failed. Only fixture loading writes.
    #[error("statement failed: {0}")]
    Execution(String),
}
