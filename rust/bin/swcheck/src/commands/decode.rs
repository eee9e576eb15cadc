//! PBA code extraction only; touches neither the database nor the files.

use anyhow::Result;

use crate::OutputFormat;

pub fn run(serial: &str, output: OutputFormat) -> Result<()> {
    let pba = pba::decode_pba(serial.trim())?;
    match output {
        OutputFormat::Table => println!("{}", pba),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "serialNumber": serial.trim(), "pbaCode": pba })
        ),
    }
    Ok(())
}
