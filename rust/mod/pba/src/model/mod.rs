pub mod identity;
pub mod report;
pub mod validity;
pub mod version;

pub use identity::{ModelIdentity, ModelSource, PbaCode};
pub use report::{Report, SlotStatus};
pub use validity::{is_open_ended, ValidityRecord, VersionStatus};
pub use version::{InstalledVersionSet, VersionSlot};
