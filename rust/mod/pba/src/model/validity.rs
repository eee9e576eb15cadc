use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One approved version row of the validity reference file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityRecord {
    pub model: String,
    pub version_code: String,

    /// Kept as written; never evaluated.
    pub start_date: String,

    /// `None` when the file leaves the end date blank.
    pub end_date: Option<NaiveDate>,

    /// 1-based line number in the reference file.
    pub line: usize,
}

impl ValidityRecord {
    pub fn matches(&self, model: &str, version_code: &str) -> bool {
        self.model == model && self.version_code == version_code
    }
}

/// `9999-12-31` marks a version that never expires.
pub fn is_open_ended(date: NaiveDate) -> bool {
    date.year() == 9999 && date.month() == 12 && date.day() == 31
}

/// Validity of one installed version for a resolved model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "endDate", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    NotExpired(NaiveDate),
    Expired(NaiveDate),
    NoExpirationDate,
    NotFound,
}

impl VersionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VersionStatus::NotExpired(_) => "Not Expired",
            VersionStatus::Expired(_) => "Expired",
            VersionStatus::NoExpirationDate => "No Expiration Date",
            VersionStatus::NotFound => "Not Found",
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        match self {
            VersionStatus::NotExpired(d) | VersionStatus::Expired(d) => Some(*d),
            VersionStatus::NoExpirationDate | VersionStatus::NotFound => None,
        }
    }

    /// True for statuses that let the unit ship.
    pub fn is_valid(&self) -> bool {
        matches!(self, VersionStatus::NotExpired(_) | VersionStatus::NoExpirationDate)
    }

    /// Not expired and never will be.
    pub fn is_open_ended(&self) -> bool {
        matches!(self, VersionStatus::NotExpired(d) if is_open_ended(*d))
    }
}
