use crate::api::ApiError;
use crate::inventory::{ProjectChoice, Variant};
use serde_json::Value;

/// Where grid payloads come from. The router only ever sees this trait, so
/// tests can wire in canned payloads.
pub trait GridSource: Send + Sync {
    fn project_choices(&self, variant: Variant) -> Result<Vec<ProjectChoice>, ApiError>;

    /// Raw grid payload for one project; shaping is left to the normalizer.
    fn fetch_grid(
        &self,
        variant: Variant,
        project_id: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError>;
}

/// Used when no sales API is configured. Every call reports the backend as
/// unavailable, so screens run on demo data (or show the offline notice).
pub struct OfflineSource;

impl GridSource for OfflineSource {
    fn project_choices(&self, _variant: Variant) -> Result<Vec<ProjectChoice>, ApiError> {
        Err(ApiError::Offline)
    }

    fn fetch_grid(
        &self,
        _variant: Variant,
        _project_id: &str,
        _query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        Err(ApiError::Offline)
    }
}
