use serde::Deserialize;
use serde_json::{Number, Value};

use crate::{Error, ProductRecord, Result};

#[derive(Debug, Deserialize)]
struct SizingResponse {
    data: Option<SizingData>,
}

#[derive(Debug, Deserialize)]
struct SizingData {
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    data: Option<CatalogData>,
}

#[derive(Debug, Deserialize)]
struct CatalogData {
    products: Option<Vec<Value>>,
}

/// The projected subset of a catalog product, everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    name: String,
    id: u64,
    brand_id: u64,
    supplier_id: u64,
    feedbacks: u64,
    rating: Number,
}

impl From<RawProduct> for ProductRecord {
    fn from(raw: RawProduct) -> Self {
        ProductRecord {
            name: raw.name,
            id: raw.id,
            brand_id: raw.brand_id,
            supplier_id: raw.supplier_id,
            feedback_count: raw.feedbacks,
            rating: raw.rating,
        }
    }
}

/// Extracts `data.total` from a sizing response.
/// Anything that doesn't carry a non-negative integer total is a `MalformedResponse`.
pub(crate) fn parse_total(body: &str) -> Result<u64> {
    let res: SizingResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("sizing response: {e}")))?;

    res.data
        .ok_or_else(|| Error::MalformedResponse("sizing response has no `data`".into()))?
        .total
        .ok_or_else(|| Error::MalformedResponse("sizing response has no `data.total`".into()))
}

/// Extracts the products of a catalog page.
/// A page without a product list (past the last real page, or garbage) yields no products.
/// Single products missing one of the projected fields are skipped.
pub(crate) fn parse_products(body: &str, page: usize) -> Vec<ProductRecord> {
    let products = match serde_json::from_str::<CatalogResponse>(body) {
        Ok(CatalogResponse {
            data: Some(CatalogData {
                products: Some(products),
            }),
        }) => products,
        Ok(_) => {
            tracing::debug!(page, "catalog page has no product list");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(page, error = %e, "catalog page isn't valid json");
            return Vec::new();
        }
    };

    let mut records = Vec::with_capacity(products.len());
    for product in products {
        match serde_json::from_value::<RawProduct>(product) {
            Ok(raw) => records.push(raw.into()),
            Err(e) => tracing::warn!(page, error = %e, "skipping product"),
        }
    }
    records
}
