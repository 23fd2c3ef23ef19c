//! Dependent-resource loading with tri-state outcomes
//!
//! Every screen resolves its view model through the same contract: a chain of
//! sequential GETs where later steps depend on fields extracted from earlier
//! responses, reported as exactly one of pending / ready / failed.

use crate::api::{ApiClient, ApiError};
use crate::models::{Farmer, Fpo, KycRecord, ProofOfAddress, ProofOfIdentity};
use tracing::{debug, info};

/// Outcome of one resolution attempt.
///
/// `Ready` and `Failed` are terminal and mutually exclusive for the attempt;
/// a new attempt restarts from `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A [`LoadState`] guarded by a generation counter.
///
/// Re-triggering a resolution while one is in flight is legal; each call to
/// [`Tracked::begin`] invalidates every earlier attempt, and a stale attempt's
/// late result is ignored rather than allowed to clobber the newer one.
#[derive(Debug)]
pub struct Tracked<T> {
    state: LoadState<T>,
    generation: u64,
}

impl<T> Tracked<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Pending,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Start a new resolution attempt. The returned token must be handed back
    /// to [`Tracked::finish`].
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Pending;
        self.generation
    }

    /// Record the outcome of the attempt identified by `token`. Returns false
    /// (and changes nothing) when a newer attempt has started since.
    pub fn finish<E: std::fmt::Display>(&mut self, token: u64, result: Result<T, E>) -> bool {
        if token != self.generation {
            debug!(
                "Discarding stale resolution result (token {}, current {})",
                token, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully resolved farmer view model: the primary record plus every KYC
/// sub-entity the chain was able to reach. Skipped steps stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerDossier {
    pub farmer: Farmer,
    pub kyc: Option<KycRecord>,
    pub poi: Option<ProofOfIdentity>,
    pub poa: Option<ProofOfAddress>,
}

/// Resolve a farmer dossier: farmer -> KYC history -> POI / POA documents.
///
/// Steps are strictly sequential because each request is parameterized by a
/// field of the previous response. A null or empty prerequisite field skips
/// the dependent step without failing; the first request failure aborts the
/// rest of the chain and the whole resolution.
pub async fn load_farmer_dossier(
    api: &ApiClient,
    farmer_id: &str,
) -> Result<FarmerDossier, ApiError> {
    if farmer_id.is_empty() {
        return Err(ApiError::MissingIdentifier);
    }

    info!("Resolving dossier for farmer record {}", farmer_id);
    let farmer = api.fetch_farmer(farmer_id).await?;

    let mut dossier = FarmerDossier {
        farmer,
        kyc: None,
        poi: None,
        poa: None,
    };

    // The KYC subtree keys off the platform-assigned farmer_id, not the
    // record id the screen was opened with.
    if dossier.farmer.farmer_id.is_empty() {
        debug!("Farmer has no platform id; skipping KYC subtree");
        return Ok(dossier);
    }

    let kyc = api.fetch_kyc_history(&dossier.farmer.farmer_id).await?;

    if let Some(poi_version_id) = present(kyc.poi_version_id.as_deref()) {
        dossier.poi = Some(api.fetch_poi(poi_version_id).await?);
    } else {
        debug!("No POI version on KYC record; skipping POI fetch");
    }

    if let Some(poa_version_id) = present(kyc.poa_version_id.as_deref()) {
        dossier.poa = Some(api.fetch_poa(poa_version_id).await?);
    } else {
        debug!("No POA version on KYC record; skipping POA fetch");
    }

    dossier.kyc = Some(kyc);
    Ok(dossier)
}

/// Fetch one page of the FPO directory and project out the record with the
/// given id. A page that does not contain the id is a distinct not-found
/// failure, not a transport error.
pub async fn find_fpo(api: &ApiClient, id: &str, page_limit: usize) -> Result<Fpo, ApiError> {
    if id.is_empty() {
        return Err(ApiError::MissingIdentifier);
    }

    let fpos = api.list_fpos(0, page_limit).await?;
    fpos.into_iter()
        .find(|fpo| fpo.id == id)
        .ok_or_else(|| ApiError::FpoNotFound(id.to_string()))
}

/// A prerequisite field counts as present only when non-null and non-empty.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_accessors() {
        let pending: LoadState<i32> = LoadState::Pending;
        assert!(pending.is_pending());
        assert!(pending.ready().is_none());
        assert!(pending.error().is_none());

        let ready = LoadState::Ready(7);
        assert_eq!(ready.ready(), Some(&7));

        let failed: LoadState<i32> = LoadState::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn test_tracked_applies_current_generation() {
        let mut tracked: Tracked<i32> = Tracked::new();
        let token = tracked.begin();
        assert!(tracked.state().is_pending());

        assert!(tracked.finish::<ApiError>(token, Ok(42)));
        assert_eq!(tracked.state().ready(), Some(&42));
    }

    #[test]
    fn test_tracked_ignores_stale_result() {
        let mut tracked: Tracked<i32> = Tracked::new();
        let stale = tracked.begin();
        let current = tracked.begin();

        // The older attempt resolves after the newer one started.
        assert!(!tracked.finish::<ApiError>(stale, Ok(1)));
        assert!(tracked.state().is_pending());

        assert!(tracked.finish::<ApiError>(current, Ok(2)));
        assert_eq!(tracked.state().ready(), Some(&2));
    }

    #[test]
    fn test_tracked_stale_failure_cannot_clobber_ready() {
        let mut tracked: Tracked<i32> = Tracked::new();
        let stale = tracked.begin();
        let current = tracked.begin();

        assert!(tracked.finish::<ApiError>(current, Ok(2)));
        assert!(!tracked.finish(stale, Err(ApiError::MissingToken)));
        assert_eq!(tracked.state().ready(), Some(&2));
    }

    #[test]
    fn test_tracked_failure_message_carries_detail() {
        let mut tracked: Tracked<i32> = Tracked::new();
        let token = tracked.begin();
        tracked.finish(token, Err(ApiError::FpoNotFound("fpo-7".to_string())));
        let message = tracked.state().error().unwrap();
        assert!(message.contains("fpo-7"));
    }

    #[test]
    fn test_present_filters_null_and_empty() {
        assert_eq!(present(Some("poi-1")), Some("poi-1"));
        assert_eq!(present(Some("")), None);
        assert_eq!(present(None), None);
    }
}
