//! Model fallback file: `pbaCode,model[,reserved...]` per line.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{LineError, ReferenceError, ReferenceLines};
use crate::model::{ModelIdentity, PbaCode};

/// Reserved fields carried after the model, at most.
pub const MAX_RESERVED_FIELDS: usize = 13;

/// PBA code to model mapping consulted when the store has none.
#[derive(Debug, Clone)]
pub struct ModelFile {
    path: PathBuf,
}

impl ModelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the model for `pba`. The first line whose field 0 equals the code
    /// exactly wins; later lines are never read.
    pub fn find_model(&self, pba: &PbaCode) -> Result<Option<ModelIdentity>, ReferenceError> {
        let lines = ReferenceLines::open(&self.path)?;
        for entry in lines {
            let (line_no, text) = entry?;
            let line = match text {
                Ok(line) => line,
                Err(e) => {
                    warn!(path = %self.path.display(), line = line_no, "skipping model line: {}", e);
                    continue;
                }
            };
            let mut fields = line.split(',');
            if fields.next() != Some(pba.as_str()) {
                continue;
            }
            match parse_mapping(fields) {
                Ok(identity) => {
                    debug!(pba = %pba, model = %identity.name, line = line_no, "model found in fallback file");
                    return Ok(Some(identity));
                }
                Err(e) => {
                    warn!(path = %self.path.display(), line = line_no, "skipping model line: {}", e);
                }
            }
        }
        Ok(None)
    }
}

/// Fields after the PBA code: the model, then reserved pass-through fields.
fn parse_mapping<'a>(mut fields: impl Iterator<Item = &'a str>) -> Result<ModelIdentity, LineError> {
    let model = match fields.next() {
        Some(m) if !m.is_empty() => m,
        _ => return Err(LineError::MissingModel),
    };
    let reserved = fields
        .take(MAX_RESERVED_FIELDS)
        .map(String::from)
        .collect();
    Ok(ModelIdentity::from_file(model, reserved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSource;
    use std::io::Write;

    fn model_file(content: &str) -> (tempfile::NamedTempFile, ModelFile) {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(content.as_bytes()).unwrap();
        let file = ModelFile::new(tmp.path());
        (tmp, file)
    }

    #[test]
    fn find_first_match() {
        let (_tmp, file) = model_file(
            "EBR1-111111,OLED55C3\n\
             EBR2-222222,OLED65G3\n\
             EBR2-222222,SHADOWED\n",
        );
        let identity = file.find_model(&PbaCode::new("EBR2-222222")).unwrap().unwrap();
        assert_eq!(identity.name, "OLED65G3");
        assert_eq!(identity.source, ModelSource::File);
        assert!(identity.reserved.is_empty());
    }

    #[test]
    fn find_not_found() {
        let (_tmp, file) = model_file("EBR1-111111,OLED55C3\n");
        assert!(file.find_model(&PbaCode::new("EBR9-999999")).unwrap().is_none());
    }

    #[test]
    fn match_is_exact() {
        let (_tmp, file) = model_file("EBR1-1111110,LONGER\nebr1-111111,LOWER\n");
        assert!(file.find_model(&PbaCode::new("EBR1-111111")).unwrap().is_none());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let extra: Vec<String> = (0..20).map(|i| format!("f{}", i)).collect();
        let (_tmp, file) = model_file(&format!("EBR1-111111,OLED55C3,{}\r\n", extra.join(",")));
        let identity = file.find_model(&PbaCode::new("EBR1-111111")).unwrap().unwrap();
        assert_eq!(identity.name, "OLED55C3");
        assert_eq!(identity.reserved.len(), MAX_RESERVED_FIELDS);
        assert_eq!(identity.reserved[0], "f0");
        assert_eq!(identity.reserved[12], "f12");
    }

    #[test]
    fn line_without_model_is_skipped() {
        let (_tmp, file) = model_file(
            "EBR1-111111\n\
             EBR1-111111,\n\
             EBR1-111111,OLED55C3\n",
        );
        let identity = file.find_model(&PbaCode::new("EBR1-111111")).unwrap().unwrap();
        assert_eq!(identity.name, "OLED55C3");
    }

    #[test]
    fn non_utf8_line_is_skipped() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"EBR1-111111,Caf\xe9\nEBR1-111111,OLED55C3\n").unwrap();
        let file = ModelFile::new(tmp.path());
        let identity = file.find_model(&PbaCode::new("EBR1-111111")).unwrap().unwrap();
        assert_eq!(identity.name, "OLED55C3");
    }

    #[test]
    fn missing_file_is_error() {
        let file = ModelFile::new("/nonexistent/top_models.txt");
        let err = file.find_model(&PbaCode::new("EBR1-111111")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/top_models.txt"));
    }
}
