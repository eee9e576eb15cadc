//! PBA decoder: cuts the board assembly code out of a unit serial number.
//!
//! ```text
//! ABCD 1234 567890 XYZ
//! skip ─┬── ──┬───
//!       │     └── 6 chars
//!       └── 4 chars          → "1234-567890"
//! ```
//!
//! This is plain text slicing. No character set or checksum is checked.

use crate::model::PbaCode;

/// Characters skipped at the start of the serial.
pub const PBA_OFFSET: usize = 4;

/// Characters taken after the offset.
pub const PBA_LEN: usize = 10;

/// Where the hyphen goes inside the extracted window.
pub const PBA_SPLIT: usize = 4;

/// Shortest serial that carries a PBA code.
pub const MIN_SERIAL_LEN: usize = PBA_OFFSET + PBA_LEN;

/// Errors during PBA decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("serial number '{serial}' has {actual} characters, need at least {required}")]
    TooShort {
        serial: String,
        actual: usize,
        required: usize,
    },
}

/// Extract the PBA code from a serial number.
///
/// Works on characters, not bytes. Anything past the window is ignored.
pub fn decode_pba(serial: &str) -> Result<PbaCode, DecodeError> {
    let window: Vec<char> = serial.chars().skip(PBA_OFFSET).take(PBA_LEN).collect();
    if window.len() < PBA_LEN {
        return Err(DecodeError::TooShort {
            serial: serial.to_string(),
            actual: serial.chars().count(),
            required: MIN_SERIAL_LEN,
        });
    }

    let mut code = String::with_capacity(PBA_LEN + 1);
    code.extend(&window[..PBA_SPLIT]);
    code.push('-');
    code.extend(&window[PBA_SPLIT..]);
    Ok(PbaCode::new(code))
}
