use swcheck_core::CheckError;
use tracing::debug;

use crate::model::{ModelIdentity, PbaCode};
use crate::sn::decode_pba;

use super::PbaService;

impl PbaService {
    /// Resolve the canonical model of the unit behind `serial`.
    ///
    /// A serial too short to carry a PBA code resolves to `None`.
    pub fn resolve_model(&self, serial: &str) -> Result<Option<ModelIdentity>, CheckError> {
        match decode_pba(serial) {
            Ok(pba) => self.resolve_model_for_pba(&pba),
            Err(e) => {
                debug!("model not resolvable: {}", e);
                Ok(None)
            }
        }
    }

    /// The store is authoritative: the fallback file is read only when the
    /// store has no mapping for `pba`.
    pub fn resolve_model_for_pba(&self, pba: &PbaCode) -> Result<Option<ModelIdentity>, CheckError> {
        if let Some(model) = self.store.fetch_model(pba)? {
            debug!(pba = %pba, model = %model.name, "model resolved from store");
            return Ok(Some(model));
        }
        Ok(self.model_file.find_model(pba)?)
    }
}
