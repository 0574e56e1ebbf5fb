use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One product row. Field names are the csv header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub name: String,
    pub id: u64,
    pub brand_id: u64,
    pub supplier_id: u64,
    pub feedback_count: u64,
    /// Kept as the api sent it, so `5` is written as `5` and `4.7` as `4.7`.
    pub rating: Number,
}

/// Header row, in the order `ProductRecord` serializes its fields.
pub(crate) const HEADER: [&str; 6] = [
    "name",
    "id",
    "brandId",
    "supplierId",
    "feedbackCount",
    "rating",
];
