//! Validity file: `model,_,versionCode,_,startDate,endDate` per line.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{LineError, ReferenceError, ReferenceLines};
use crate::model::ValidityRecord;

/// Fields per valid line.
pub const FIELD_COUNT: usize = 6;

/// endDate text of the label row.
pub const HEADER_TOKEN: &str = "EXPIRY DATE";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Approved version dataset.
#[derive(Debug, Clone)]
pub struct ValidityFile {
    path: PathBuf,
}

impl ValidityFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazily read records in file order, starting from the top on every call.
    pub fn scan(&self) -> Result<ValidityRecords, ReferenceError> {
        Ok(ValidityRecords {
            lines: ReferenceLines::open(&self.path)?,
        })
    }
}

/// Records of one scan. Header, blank and malformed lines never appear.
pub struct ValidityRecords {
    lines: ReferenceLines,
}

impl Iterator for ValidityRecords {
    type Item = Result<ValidityRecord, ReferenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_no, text) = match self.lines.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };
            match text.and_then(|line| parse_line(&line, line_no)) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    warn!(path = %self.lines.path().display(), line = line_no, "skipping validity line: {}", e);
                }
            }
        }
    }
}

/// Parse one trimmed line. `Ok(None)` for blank and header lines.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ValidityRecord>, LineError> {
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(LineError::FieldCount {
            expected: FIELD_COUNT,
            actual: fields.len(),
        });
    }

    let end_date = match fields[5] {
        HEADER_TOKEN => {
            debug!(line = line_no, "header row");
            return Ok(None);
        }
        "" => None,
        text => Some(parse_date("endDate", text)?),
    };

    Ok(Some(ValidityRecord {
        model: fields[0].to_string(),
        version_code: fields[2].to_string(),
        start_date: fields[4].to_string(),
        end_date,
        line: line_no,
    }))
}

fn parse_date(field: &'static str, text: &str) -> Result<NaiveDate, LineError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| LineError::InvalidDate {
        field,
        value: text.to_string(),
    })
}
