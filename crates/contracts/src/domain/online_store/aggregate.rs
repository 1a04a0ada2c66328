use serde::{Deserialize, Serialize};

/// Marketplace platform used when a payload does not name one explicitly.
pub const DEFAULT_PLATFORM: &str = "shopee";

/// A connected marketplace store, keyed by its integration key
/// (`{PLATFORM}:{REGION}:{SHOP_ID}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineStore {
    pub id: String,

    /// Stable natural key, unique per store. Immutable once assigned.
    #[serde(rename = "integrationKey")]
    pub integration_key: String,

    pub platform: String,

    pub region: Option<String>,

    /// Shop identifier assigned by the marketplace
    #[serde(rename = "platformShopId")]
    pub platform_shop_id: Option<String>,

    #[serde(rename = "storeName")]
    pub store_name: String,

    #[serde(rename = "storeUrl")]
    pub store_url: Option<String>,

    #[serde(rename = "lastSyncedAt")]
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,

    /// Verbatim snapshot of the last payload received for this store
    #[serde(rename = "rawPayloadJson")]
    pub raw_payload_json: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl OnlineStore {
    /// Natural key formula used when resolving the store a product or order
    /// belongs to: `SHOPEE:{region}:{shop_id}`.
    pub fn key_for(region: &str, shop_id: &str) -> String {
        format!("SHOPEE:{}:{}", region, shop_id)
    }
}
