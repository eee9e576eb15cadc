//! Approved-version listing for one model.

use anyhow::Result;
use pba::reference::ValidityFile;
use pba::ValidityTable;
use swcheck_core::CheckerConfig;

use crate::render;
use crate::OutputFormat;

pub fn run(config: &CheckerConfig, model: &str, output: OutputFormat) -> Result<()> {
    let table = ValidityTable::load(&ValidityFile::new(&config.files.validity_file))?;
    let records = table.records_for_model(model);

    match output {
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No approved versions for {}.", model);
            } else {
                print!("{}", render::approved_table(&records));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}
