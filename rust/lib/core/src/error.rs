use thiserror::Error;

// ── Error codes ─────────────────────────────────────────────────────
//
// Stable, machine-readable identifiers. Callers match on these,
// never on the human-readable message string.

/// Stable error code constants.
pub mod error_code {
    pub const SERIAL_NOT_FOUND: &str = "SERIAL_NOT_FOUND";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const REFERENCE_ERROR: &str = "REFERENCE_ERROR";
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
}

// ── CheckError ──────────────────────────────────────────────────────

/// Failures surfaced by a lookup.
///
/// A serial number that cannot be decoded, or a unit whose model cannot be
/// resolved, is not an error: those produce a degraded report. Malformed
/// reference lines are skipped and logged.
#[derive(Error, Debug)]
pub enum CheckError {
    /// No installed-version record exists for the serial number.
    #[error("serial number '{0}' not found")]
    SerialNotFound(String),

    /// Relational store failure.
    #[error("{0}")]
    Storage(String),

    /// A reference file could not be opened or read.
    #[error("{0}")]
    Reference(String),

    /// Configuration is missing or invalid.
    #[error("{0}")]
    Config(String),
}

impl CheckError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckError::SerialNotFound(_) => error_code::SERIAL_NOT_FOUND,
            CheckError::Storage(_) => error_code::STORAGE_ERROR,
            CheckError::Reference(_) => error_code::REFERENCE_ERROR,
            CheckError::Config(_) => error_code::CONFIG_INVALID,
        }
    }

    /// Process exit code for command-line callers.
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckError::SerialNotFound(_) => 2,
            CheckError::Config(_) => 3,
            CheckError::Storage(_) | CheckError::Reference(_) => 1,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CheckError::SerialNotFound(_))
    }
}
