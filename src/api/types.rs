//! API request and response bodies not already covered by report types.

use serde::Serialize;

/// Acknowledgement for `POST /ingest`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub message: String,
    /// Updates that matched a zone.
    pub applied: usize,
    /// Zone names that matched nothing and were skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
}
