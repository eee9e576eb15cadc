//! Expiration of installed versions.
//!
//! The first validity record matching both model and version decides the
//! status; later duplicates are never looked at. A dated record stays valid
//! while `endDate - 3 days >= today`.

use chrono::{Days, NaiveDate};
use swcheck_core::CheckError;
use tracing::debug;

use crate::model::{is_open_ended, ValidityRecord, VersionStatus};
use crate::reference::ValidityFile;

use super::PbaService;

/// Days before the end date at which a version already counts as expired.
pub const GRACE_DAYS: u64 = 3;

/// Status of one matched record on `today`.
pub fn record_status(record: &ValidityRecord, today: NaiveDate) -> VersionStatus {
    let Some(end) = record.end_date else {
        return VersionStatus::NoExpirationDate;
    };
    if is_open_ended(end) {
        return VersionStatus::NotExpired(end);
    }
    let still_valid = end
        .checked_sub_days(Days::new(GRACE_DAYS))
        .is_some_and(|cutoff| cutoff >= today);
    if still_valid {
        VersionStatus::NotExpired(end)
    } else {
        VersionStatus::Expired(end)
    }
}

/// First-match evaluation over records in file order.
pub fn evaluate<'a>(
    records: impl IntoIterator<Item = &'a ValidityRecord>,
    model: &str,
    version_code: &str,
    today: NaiveDate,
) -> VersionStatus {
    records
        .into_iter()
        .find(|r| r.matches(model, version_code))
        .map_or(VersionStatus::NotFound, |r| record_status(r, today))
}

/// Validity records read once and held for the duration of one report.
#[derive(Debug, Clone, Default)]
pub struct ValidityTable {
    records: Vec<ValidityRecord>,
}

impl ValidityTable {
    pub fn load(file: &ValidityFile) -> Result<Self, CheckError> {
        let records = file.scan()?.collect::<Result<Vec<_>, _>>()?;
        debug!(path = %file.path().display(), records = records.len(), "validity table loaded");
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<ValidityRecord>) -> Self {
        Self { records }
    }

    pub fn evaluate(&self, model: &str, version_code: &str, today: NaiveDate) -> VersionStatus {
        evaluate(&self.records, model, version_code, today)
    }

    /// Every record for `model`, in file order.
    pub fn records_for_model(&self, model: &str) -> Vec<ValidityRecord> {
        self.records
            .iter()
            .filter(|r| r.model == model)
            .cloned()
            .collect()
    }
}

impl PbaService {
    /// Evaluate one version with a fresh scan of the validity file. The scan
    /// stops at the first matching record.
    pub fn evaluate(
        &self,
        model: &str,
        version_code: &str,
        today: NaiveDate,
    ) -> Result<VersionStatus, CheckError> {
        for record in self.validity_file.scan()? {
            let record = record?;
            if record.matches(model, version_code) {
                return Ok(record_status(&record, today));
            }
        }
        Ok(VersionStatus::NotFound)
    }

    /// Load the validity file once for repeated evaluation.
    pub fn load_validity_table(&self) -> Result<ValidityTable, CheckError> {
        ValidityTable::load(&self.validity_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testutil;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(model: &str, version: &str, end: Option<NaiveDate>) -> ValidityRecord {
        ValidityRecord {
            model: model.into(),
            version_code: version.into(),
            start_date: "2023-01-01".into(),
            end_date: end,
            line: 1,
        }
    }

    #[test]
    fn grace_window_boundary() {
        let today = date(2024, 1, 1);
        assert_eq!(
            record_status(&record("M", "V", Some(date(2024, 1, 4))), today),
            VersionStatus::NotExpired(date(2024, 1, 4))
        );
        assert_eq!(
            record_status(&record("M", "V", Some(date(2024, 1, 3))), today),
            VersionStatus::Expired(date(2024, 1, 3))
        );
    }

    #[test]
    fn past_end_date_is_expired() {
        let today = date(2024, 6, 1);
        assert_eq!(
            record_status(&record("M", "V", Some(date(2023, 12, 31))), today),
            VersionStatus::Expired(date(2023, 12, 31))
        );
    }

    #[test]
    fn sentinel_never_expires() {
        let end = date(9999, 12, 31);
        for today in [date(2024, 1, 1), date(9999, 12, 30), date(9999, 12, 31)] {
            let status = record_status(&record("M", "V", Some(end)), today);
            assert_eq!(status, VersionStatus::NotExpired(end));
            assert!(status.is_open_ended());
        }
    }

    #[test]
    fn blank_end_date() {
        assert_eq!(
            record_status(&record("M", "V", None), date(2024, 1, 1)),
            VersionStatus::NoExpirationDate
        );
    }

    #[test]
    fn first_match_wins() {
        let records = vec![
            record("M", "V1", Some(date(2020, 1, 1))),
            record("M", "V1", Some(date(2030, 1, 1))),
        ];
        assert_eq!(
            evaluate(&records, "M", "V1", date(2024, 1, 1)),
            VersionStatus::Expired(date(2020, 1, 1))
        );
    }

    #[test]
    fn version_must_belong_to_model() {
        let records = vec![
            record("OTHER", "V1", Some(date(2030, 1, 1))),
            record("M", "V2", Some(date(2030, 1, 1))),
        ];
        assert_eq!(evaluate(&records, "M", "V1", date(2024, 1, 1)), VersionStatus::NotFound);
        assert_eq!(evaluate(&records, "M", "V", date(2024, 1, 1)), VersionStatus::NotFound);
    }

    #[test]
    fn table_keeps_file_order() {
        let table = ValidityTable::from_records(vec![
            record("M", "V2", None),
            record("X", "V1", None),
            record("M", "V1", None),
        ]);
        let versions: Vec<_> = table
            .records_for_model("M")
            .into_iter()
            .map(|r| r.version_code)
            .collect();
        assert_eq!(versions, ["V2", "V1"]);
    }

    const VALIDITY: &str = "\
MODEL,TYPE,SW VERSION,MICOM,START DATE,EXPIRY DATE
OLED55C3,MAIN,V1.00,x,2023-01-01,2024-01-04
OLED55C3,SUB,S2.00,x,2023-01-01,2024-01-03
OLED55C3,FW,F3.00,x,2023-01-01,9999-12-31
OLED55C3,FW,F3.00,x,2023-01-01,2000-01-01
OLED55C3,TCON,EXPIRY DATE,x,2023-01-01,EXPIRY DATE
";

    #[test]
    fn streaming_evaluate_matches_table() {
        let dir = tempfile::tempdir().unwrap();
        let svc = testutil::service(testutil::store(), dir.path(), "", VALIDITY);
        let table = svc.load_validity_table().unwrap();
        let today = date(2024, 1, 1);

        for version in ["V1.00", "S2.00", "F3.00", "EXPIRY DATE", "Z9.99"] {
            assert_eq!(
                svc.evaluate("OLED55C3", version, today).unwrap(),
                table.evaluate("OLED55C3", version, today),
                "version {}",
                version
            );
        }
        assert_eq!(
            svc.evaluate("OLED55C3", "V1.00", today).unwrap(),
            VersionStatus::NotExpired(date(2024, 1, 4))
        );
        assert_eq!(
            svc.evaluate("OLED55C3", "S2.00", today).unwrap(),
            VersionStatus::Expired(date(2024, 1, 3))
        );
        assert_eq!(
            svc.evaluate("OLED55C3", "F3.00", today).unwrap(),
            VersionStatus::NotExpired(date(9999, 12, 31))
        );
    }

    #[test]
    fn header_rows_never_match() {
        let dir = tempfile::tempdir().unwrap();
        let svc = testutil::service(testutil::store(), dir.path(), "", VALIDITY);
        let today = date(2024, 1, 1);
        assert_eq!(
            svc.evaluate("OLED55C3", "EXPIRY DATE", today).unwrap(),
            VersionStatus::NotFound
        );
        assert_eq!(svc.evaluate("MODEL", "SW VERSION", today).unwrap(), VersionStatus::NotFound);
    }

    #[test]
    fn missing_validity_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let svc = testutil::service(testutil::store(), dir.path(), "", "");
        std::fs::remove_file(dir.path().join("sw_validity.txt")).unwrap();
        assert!(svc.evaluate("M", "V", date(2024, 1, 1)).is_err());
        assert!(svc.load_validity_table().is_err());
    }
}
