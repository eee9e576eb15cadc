//! Serial number handling.
//!
//! A unit serial embeds its PBA code at a fixed position; see [`decoder`].

pub mod decoder;

pub use decoder::{decode_pba, DecodeError, MIN_SERIAL_LEN};
