//! PBA software checker.
//!
//! Given a unit serial number, reports which firmware/software versions the
//! unit runs, its canonical model, and whether each version is still
//! approved:
//!
//! ```text
//! serial ─► sn::decode_pba ─► PBA code ─► store mapping, else model file ─► model
//!    │                                                                       │
//!    └─► store: newest installed versions ───────► validity file ◄───────────┘
//!                                                       │
//!                                                       ▼
//!                                                    Report
//! ```
//!
//! [`PbaService`] is the entry point. Everything is read-only.

pub mod model;
pub mod reference;
pub mod service;
pub mod sn;
pub mod store;

pub use model::{
    InstalledVersionSet, ModelIdentity, ModelSource, PbaCode, Report, SlotStatus, ValidityRecord,
    VersionSlot, VersionStatus,
};
pub use service::{PbaService, ValidityTable};
pub use sn::{decode_pba, DecodeError};
