use serde::{Deserialize, Serialize};

/// One of the six firmware/software components recorded per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionSlot {
    MainMicom,
    SubMicom,
    OcSubMicom,
    SubOtp,
    TconData,
    Firmware,
}

impl VersionSlot {
    /// All slots in storage order (`sw1`..`sw6`).
    pub const ALL: [VersionSlot; 6] = [
        VersionSlot::MainMicom,
        VersionSlot::SubMicom,
        VersionSlot::OcSubMicom,
        VersionSlot::SubOtp,
        VersionSlot::TconData,
        VersionSlot::Firmware,
    ];

    /// Zero-based position in the version tuple.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Role name of the store column (`sw1`..`sw6`).
    pub fn column(self) -> &'static str {
        match self {
            VersionSlot::MainMicom => "sw1",
            VersionSlot::SubMicom => "sw2",
            VersionSlot::OcSubMicom => "sw3",
            VersionSlot::SubOtp => "sw4",
            VersionSlot::TconData => "sw5",
            VersionSlot::Firmware => "sw6",
        }
    }

    /// Operator-facing label.
    pub fn label(self) -> &'static str {
        match self {
            VersionSlot::MainMicom => "Main Micom",
            VersionSlot::SubMicom => "SUB MICOM",
            VersionSlot::OcSubMicom => "OC SUB MICOM",
            VersionSlot::SubOtp => "SUB OTP",
            VersionSlot::TconData => "TCON DATA",
            VersionSlot::Firmware => "FW",
        }
    }
}

/// The installed versions of one unit, taken from its newest record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledVersionSet {
    pub serial_number: String,

    /// Slot-ordered, see [`VersionSlot::ALL`].
    pub versions: [String; 6],

    /// Timestamp of the record as the store holds it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

impl InstalledVersionSet {
    pub fn get(&self, slot: VersionSlot) -> &str {
        &self.versions[slot.index()]
    }

    /// `(slot, version)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (VersionSlot, &str)> + '_ {
        VersionSlot::ALL
            .iter()
            .map(move |slot| (*slot, self.versions[slot.index()].as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_matches_columns() {
        let columns: Vec<&str> = VersionSlot::ALL.iter().map(|s| s.column()).collect();
        assert_eq!(columns, ["sw1", "sw2", "sw3", "sw4", "sw5", "sw6"]);
        for (i, slot) in VersionSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn iter_pairs_slots_with_versions() {
        let set = InstalledVersionSet {
            serial_number: "SN".into(),
            versions: ["a", "b", "c", "d", "e", "f"].map(String::from),
            recorded_at: None,
        };
        assert_eq!(set.get(VersionSlot::TconData), "e");
        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(pairs[0], (VersionSlot::MainMicom, "a"));
        assert_eq!(pairs[5], (VersionSlot::Firmware, "f"));
    }
}
