use serde::Deserialize;

/// Query string for `GET /records`. Unrecognized `sort` values fall back to
/// newest-first rather than erroring.
#[derive(Debug, Deserialize)]
pub struct RecordQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpsertRecordRequest {
    pub date: Option<String>,
    pub weight: Option<f64>,
    pub feeling: Option<String>,
    pub notes: Option<String>,
}
