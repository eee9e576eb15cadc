//! Flat reference datasets.
//!
//! Both files are comma-separated text read top to bottom. Every scan opens
//! the file afresh, so concurrent lookups never share a cursor. Malformed
//! lines, including lines that are not UTF-8, are logged and skipped; only an
//! unreadable file is an error.

pub mod model_file;
pub mod validity_file;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use swcheck_core::CheckError;

pub use model_file::ModelFile;
pub use validity_file::{ValidityFile, ValidityRecords};

/// A reference file could not be opened or read.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ReferenceError> for CheckError {
    fn from(e: ReferenceError) -> Self {
        CheckError::Reference(e.to_string())
    }
}

/// Why a single reference line was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("expected {expected} fields, found {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("invalid {field} '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("no model after PBA code")]
    MissingModel,

    #[error("invalid UTF-8 after byte {valid_up_to}")]
    Encoding { valid_up_to: usize },
}

/// Numbered, whitespace-trimmed lines of a reference file.
///
/// A line that is not valid UTF-8 comes back as a [`LineError`] so the
/// caller can skip it; only a failed read ends the scan with an error.
pub(crate) struct ReferenceLines {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_no: usize,
}

impl ReferenceLines {
    pub(crate) fn open(path: &Path) -> Result<Self, ReferenceError> {
        let file = File::open(path).map_err(|source| ReferenceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            buf: Vec::new(),
            line_no: 0,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for ReferenceLines {
    type Item = Result<(usize, Result<String, LineError>), ReferenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(source) => {
                return Some(Err(ReferenceError::Io {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
        self.line_no += 1;
        let text = std::str::from_utf8(&self.buf)
            .map(|line| line.trim().to_string())
            .map_err(|e| LineError::Encoding {
                valid_up_to: e.valid_up_to(),
            });
        Some(Ok((self.line_no, text)))
    }
}
