use serde::{Deserialize, Serialize};

use crate::enums::ProductStatus;

/// A synced marketplace product, keyed by `{ITEM_ID}-{SHOP_ID}-{REGION}`.
/// Always linked to an existing [`OnlineStore`](super::super::online_store::aggregate::OnlineStore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineProduct {
    pub id: String,

    #[serde(rename = "integrationKey")]
    pub integration_key: String,

    /// Record id of the owning store
    #[serde(rename = "storeRef")]
    pub store_ref: String,

    #[serde(rename = "platformItemId")]
    pub platform_item_id: String,

    #[serde(rename = "productName")]
    pub product_name: Option<String>,

    pub status: Option<ProductStatus>,

    pub currency: Option<String>,

    #[serde(rename = "currentPrice")]
    pub current_price: Option<f64>,

    #[serde(rename = "originalPrice")]
    pub original_price: Option<f64>,

    #[serde(rename = "stockQty")]
    pub stock_qty: Option<i64>,

    #[serde(rename = "primaryImageUrl")]
    pub primary_image_url: Option<String>,

    /// Readable attribute lines rendered from the marketplace attribute list
    #[serde(rename = "specificationText")]
    pub specification_text: Option<String>,

    #[serde(rename = "lastSyncedAt")]
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "rawPayloadJson")]
    pub raw_payload_json: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl OnlineProduct {
    /// Natural key formula: `{item_id}-{shop_id}-{region}`.
    pub fn key_for(item_id: &str, shop_id: &str, region: &str) -> String {
        format!("{}-{}-{}", item_id, shop_id, region)
    }
}
