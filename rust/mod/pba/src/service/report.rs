use chrono::{Local, NaiveDate};
use swcheck_core::CheckError;
use tracing::{info, warn};

use crate::model::{Report, SlotStatus};
use crate::sn::decode_pba;

use super::PbaService;

impl PbaService {
    /// Build the report for `serial` as of today's local date.
    pub fn build_report(&self, serial: &str) -> Result<Report, CheckError> {
        self.build_report_on(serial, Local::now().date_naive())
    }

    /// Build the report for `serial`, evaluating expiration on `today`.
    ///
    /// Fails only when the serial has no installed-version record or a
    /// backing source cannot be read. An unresolvable model gives a degraded
    /// report with no statuses.
    pub fn build_report_on(&self, serial: &str, today: NaiveDate) -> Result<Report, CheckError> {
        let installed = self
            .store
            .fetch_installed_versions(serial)?
            .ok_or_else(|| CheckError::SerialNotFound(serial.to_string()))?;

        let pba_code = decode_pba(serial).ok();
        let model = match &pba_code {
            Some(pba) => self.resolve_model_for_pba(pba)?,
            None => None,
        };

        let Some(identity) = model else {
            warn!(serial, pba = ?pba_code.as_ref().map(|p| p.as_str()), "no top model found");
            return Ok(Report {
                serial_number: serial.to_string(),
                pba_code,
                installed,
                model: None,
                statuses: Vec::new(),
                approved: Vec::new(),
                evaluated_on: today,
            });
        };

        let table = self.load_validity_table()?;
        let statuses: Vec<SlotStatus> = installed
            .iter()
            .map(|(slot, version)| SlotStatus {
                slot,
                version: version.to_string(),
                status: table.evaluate(&identity.name, version, today),
            })
            .collect();
        let approved = table.records_for_model(&identity.name);

        let valid = statuses.iter().filter(|s| s.status.is_valid()).count();
        info!(
            serial,
            model = %identity.name,
            valid,
            total = statuses.len(),
            "report built"
        );

        Ok(Report {
            serial_number: serial.to_string(),
            pba_code,
            installed,
            model: Some(identity),
            statuses,
            approved,
            evaluated_on: today,
        })
    }
}
