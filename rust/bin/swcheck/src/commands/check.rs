//! Full unit check.

use anyhow::Result;
use chrono::NaiveDate;
use pba::PbaService;
use swcheck_core::CheckerConfig;

use crate::render;
use crate::OutputFormat;

pub fn run(
    config: &CheckerConfig,
    serial: &str,
    today: Option<NaiveDate>,
    output: OutputFormat,
) -> Result<()> {
    let serial = serial.trim();
    if serial.is_empty() {
        anyhow::bail!("Please enter a serial number.");
    }

    let service = PbaService::open(config)?;
    let report = match today {
        Some(day) => service.build_report_on(serial, day)?,
        None => service.build_report(serial)?,
    };

    match output {
        OutputFormat::Table => print!("{}", render::report_table(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
