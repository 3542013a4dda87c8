use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CanonMapsRequest {
    /// One list of names per data source, most authoritative first
    pub collections: Vec<Vec<String>>,
    #[serde(default)]
    pub allow_ambiguous: bool,
    pub max_edit_distance: Option<usize>,
    /// Defaults to `max_edit_distance`
    pub max_last_edit_distance: Option<usize>,
    pub large_last_name_threshold: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CanonMapsResponse {
    /// One map per collection: normalized name → canonical name
    pub maps: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplyMapRequest {
    pub records: Vec<BTreeMap<String, String>>,
    /// Columns holding person names
    pub fields: Vec<String>,
    /// A map produced by `/reconcile/maps`
    pub map: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApplyMapResponse {
    pub records: Vec<BTreeMap<String, String>>,
}
