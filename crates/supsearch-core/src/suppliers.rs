use serde::{Deserialize, Serialize};

/// One supplier entry returned by the search backend.
///
/// Every text field is passed through exactly as the source site displayed
/// it. Nothing here is validated; the rank engine degrades gracefully on
/// unparseable price and rating text instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub product_name: String,
    pub product_url: String,
    /// Free-text price, e.g. `"US$ 12.50"` or `"Price not available"`.
    /// Absent in the payload deserializes to the empty string.
    #[serde(default)]
    pub price: String,
    /// More specific price text, preferred for display when usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_price: Option<String>,
    /// Minimum order quantity, e.g. `"100 Pieces"` or `"Not available"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moq: Option<String>,
    /// Free-text rating, e.g. `"4 out of 5 stars"` or `"No rating"`.
    #[serde(default)]
    pub rating: String,
    pub store_name: String,
    pub store_url: String,
    #[serde(default)]
    pub orders: String,
}

impl SupplierRecord {
    /// Returns the outbound link for this record: the product page when one
    /// is known, otherwise the store page.
    #[must_use]
    pub fn link(&self) -> &str {
        if self.product_url.trim().is_empty() {
            &self.store_url
        } else {
            &self.product_url
        }
    }
}

/// Top-level body of `GET <base>/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub suppliers: Vec<SupplierRecord>,
    /// The query as the backend received it.
    #[serde(default)]
    pub query: String,
}
