use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of one import run: whole-batch counts plus one human-readable
/// error per failed record, in input order.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ImportReport {
    pub success: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}
