use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::identity::{ModelIdentity, PbaCode};
use super::validity::{ValidityRecord, VersionStatus};
use super::version::{InstalledVersionSet, VersionSlot};

/// Validity of the version installed in one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub slot: VersionSlot,
    pub version: String,
    pub status: VersionStatus,
}

/// Everything one lookup knows about a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub serial_number: String,

    /// Absent when the serial is too short to carry one.
    pub pba_code: Option<PbaCode>,

    pub installed: InstalledVersionSet,

    /// Absent when neither the store nor the fallback file knows the unit.
    pub model: Option<ModelIdentity>,

    /// One entry per slot in slot order, or empty when `model` is absent.
    pub statuses: Vec<SlotStatus>,

    /// Every validity row for the resolved model, in file order.
    pub approved: Vec<ValidityRecord>,

    pub evaluated_on: NaiveDate,
}

impl Report {
    /// The model could not be resolved, so nothing was evaluated.
    pub fn is_degraded(&self) -> bool {
        self.model.is_none()
    }

    /// Every slot was evaluated and is currently valid.
    pub fn all_valid(&self) -> bool {
        !self.statuses.is_empty() && self.statuses.iter().all(|s| s.status.is_valid())
    }

    pub fn status(&self, slot: VersionSlot) -> Option<&SlotStatus> {
        self.statuses.iter().find(|s| s.slot == slot)
    }
}
