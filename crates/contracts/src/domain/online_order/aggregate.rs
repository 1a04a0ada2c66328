use serde::{Deserialize, Serialize};

use crate::enums::OrderStatus;

/// A synced marketplace sales order, keyed by
/// `SHOPEE:{REGION}:{SHOP_ID}:order:{ORDER_ID}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineOrder {
    pub id: String,

    #[serde(rename = "integrationKey")]
    pub integration_key: String,

    /// Record id of the owning store
    #[serde(rename = "storeRef")]
    pub store_ref: String,

    #[serde(rename = "platformOrderId")]
    pub platform_order_id: String,

    pub status: Option<OrderStatus>,

    pub currency: Option<String>,

    #[serde(rename = "totalAmount")]
    pub total_amount: Option<f64>,

    /// Creation time reported by the marketplace (epoch seconds on the wire)
    #[serde(rename = "orderCreatedAt")]
    pub order_created_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "lastSyncedAt")]
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "rawPayloadJson")]
    pub raw_payload_json: Option<String>,

    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl OnlineOrder {
    /// Natural key formula: `SHOPEE:{region}:{shop_id}:order:{order_id}`.
    pub fn key_for(region: &str, shop_id: &str, order_id: &str) -> String {
        format!("SHOPEE:{}:{}:order:{}", region, shop_id, order_id)
    }
}
