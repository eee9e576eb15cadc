//! Plain-text rendering of reports.

use std::fmt::Write;

use pba::{ModelSource, Report, SlotStatus, ValidityRecord, VersionStatus};

const LABEL_WIDTH: usize = 15;

pub fn report_table(report: &Report) -> String {
    let mut out = String::new();
    field(&mut out, "Serial Number", &report.serial_number);
    field(
        &mut out,
        "PBA Code",
        report.pba_code.as_ref().map_or("-", |p| p.as_str()),
    );
    for (slot, version) in report.installed.iter() {
        field(&mut out, slot.label(), version);
    }

    match &report.model {
        Some(model) => {
            let source = match model.source {
                ModelSource::Store => "database",
                ModelSource::File => "fallback file",
            };
            field(&mut out, "Top Model", &format!("{} ({})", model.name, source));
        }
        None => field(&mut out, "Top Model", "No top model found"),
    }

    if !report.statuses.is_empty() {
        out.push('\n');
        for status in &report.statuses {
            let _ = writeln!(out, "{}", slot_line(status));
        }
    }

    if !report.approved.is_empty() {
        out.push('\n');
        out.push_str(&approved_table(&report.approved));
    }
    out
}

/// One check line per slot, numbered SW1..SW6.
pub fn slot_line(status: &SlotStatus) -> String {
    let n = status.slot.index() + 1;
    match status.status {
        VersionStatus::NotFound => format!(
            "SW{}: {} - Incorrect or expire check with PIC",
            n, status.version
        ),
        VersionStatus::NoExpirationDate => format!(
            "SW{}: {} - {}",
            n,
            status.version,
            status.status.label()
        ),
        VersionStatus::NotExpired(end) | VersionStatus::Expired(end) => format!(
            "SW{}: {} (End Date: {}) - {}",
            n,
            status.version,
            end.format("%Y-%m-%d"),
            status.status.label()
        ),
    }
}

pub fn approved_table(records: &[ValidityRecord]) -> String {
    const HEADERS: [&str; 3] = ["SW Version", "Start Date", "End Date"];
    let version_width = records
        .iter()
        .map(|r| r.version_code.len())
        .chain([HEADERS[0].len()])
        .max()
        .unwrap_or_default();
    let start_width = records
        .iter()
        .map(|r| r.start_date.len())
        .chain([HEADERS[1].len()])
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<vw$}  {:<sw$}  {}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        vw = version_width,
        sw = start_width
    );
    for r in records {
        let end = r
            .end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<vw$}  {:<sw$}  {}",
            r.version_code,
            r.start_date,
            end,
            vw = version_width,
            sw = start_width
        );
    }
    out
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<width$}{}", format!("{}:", label), value, width = LABEL_WIDTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pba::{InstalledVersionSet, ModelIdentity, PbaCode, VersionSlot};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(slot: VersionSlot, version: &str, status: VersionStatus) -> SlotStatus {
        SlotStatus {
            slot,
            version: version.into(),
            status,
        }
    }

    #[test]
    fn slot_lines() {
        assert_eq!(
            slot_line(&slot(VersionSlot::MainMicom, "M1", VersionStatus::NotExpired(date(2024, 1, 4)))),
            "SW1: M1 (End Date: 2024-01-04) - Not Expired"
        );
        assert_eq!(
            slot_line(&slot(VersionSlot::SubMicom, "S1", VersionStatus::Expired(date(2024, 1, 3)))),
            "SW2: S1 (End Date: 2024-01-03) - Expired"
        );
        assert_eq!(
            slot_line(&slot(VersionSlot::SubOtp, "P1", VersionStatus::NoExpirationDate)),
            "SW4: P1 - No Expiration Date"
        );
        assert_eq!(
            slot_line(&slot(VersionSlot::Firmware, "F1", VersionStatus::NotFound)),
            "SW6: F1 - Incorrect or expire check with PIC"
        );
    }

    fn installed() -> InstalledVersionSet {
        InstalledVersionSet {
            serial_number: "406KEBR1111111ZZ".into(),
            versions: ["M1", "S1", "O1", "P1", "T1", "F1"].map(String::from),
            recorded_at: None,
        }
    }

    #[test]
    fn degraded_report_table() {
        let report = Report {
            serial_number: "406KEBR1111111ZZ".into(),
            pba_code: Some(PbaCode::new("EBR1-111111")),
            installed: installed(),
            model: None,
            statuses: Vec::new(),
            approved: Vec::new(),
            evaluated_on: date(2024, 1, 1),
        };
        let text = report_table(&report);
        assert!(text.contains("PBA Code:      EBR1-111111\n"));
        assert!(text.contains("TCON DATA:     T1\n"));
        assert!(text.contains("Top Model:     No top model found\n"));
        assert!(!text.contains("SW1:"));
    }

    #[test]
    fn full_report_table() {
        let report = Report {
            serial_number: "406KEBR1111111ZZ".into(),
            pba_code: Some(PbaCode::new("EBR1-111111")),
            installed: installed(),
            model: Some(ModelIdentity::from_store("OLED55C3")),
            statuses: VersionSlot::ALL
                .iter()
                .map(|s| slot(*s, "x", VersionStatus::NotFound))
                .collect(),
            approved: vec![ValidityRecord {
                model: "OLED55C3".into(),
                version_code: "M1".into(),
                start_date: "2023-01-01".into(),
                end_date: Some(date(9999, 12, 31)),
                line: 2,
            }],
            evaluated_on: date(2024, 1, 1),
        };
        let text = report_table(&report);
        assert!(text.contains("Top Model:     OLED55C3 (database)\n"));
        assert!(text.contains("SW6: x - Incorrect or expire check with PIC\n"));
        assert!(text.contains("SW Version  Start Date  End Date\n"));
        assert!(text.contains("M1          2023-01-01  9999-12-31\n"));
    }
}
