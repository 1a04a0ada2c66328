use chrono::Utc;
use contracts::domain::online_order::aggregate::OnlineOrder;
use contracts::domain::online_store::aggregate::OnlineStore;
use contracts::enums::OrderStatus;
use contracts::integration::UpsertOutcome;

use super::repository::{self, OrderFields, OrderTarget};
use crate::domain::online_store;
use crate::shared::data::upsert::upsert_by_key;
use crate::shared::error::ApiError;
use crate::shared::payload::{epoch_field, float_field, string_field, Payload};

/// Normalize a marketplace order payload and upsert it by integration key.
/// The owning store must already exist.
pub async fn upsert_from_payload(payload: &Payload) -> Result<UpsertOutcome, ApiError> {
    let identity = resolve_identity(payload)?;

    let store_key = OnlineStore::key_for(&identity.region, &identity.shop_id);
    let store_ref = online_store::repository::find_id_by_key(&store_key)
        .await?
        .ok_or_else(|| {
            ApiError::StoreNotFound(format!(
                "shop_id={}, region={}",
                identity.shop_id, identity.region
            ))
        })?;

    let fields = OrderFields {
        store_ref,
        platform_order_id: identity.order_id.clone(),
        status: string_field(payload, "order_status")
            .as_deref()
            .and_then(map_order_status),
        currency: string_field(payload, "currency"),
        total_amount: float_field(payload, "total_amount"),
        order_created_at: epoch_field(payload, "create_time"),
        last_synced_at: Utc::now(),
        raw_payload_json: serde_json::Value::Object(payload.clone()).to_string(),
    };

    let outcome = upsert_by_key(&OrderTarget, &identity.integration_key, &fields).await?;
    Ok(outcome)
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineOrder>> {
    repository::list_all().await
}

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineOrder>> {
    repository::get_by_key(integration_key).await
}

#[derive(Debug)]
struct OrderIdentity {
    integration_key: String,
    region: String,
    shop_id: String,
    order_id: String,
}

/// Assemble the order identity from the payload, backfilling missing pieces
/// from a supplied integration key only when the key matches the
/// five-segment layout `PLATFORM:REGION:SHOP:order:ORDER_ID`. A key with
/// any other shape contributes nothing; unresolvable pieces are a
/// MissingField error, never guessed.
fn resolve_identity(payload: &Payload) -> Result<OrderIdentity, ApiError> {
    let supplied_key = string_field(payload, "integration_key");

    let mut region = string_field(payload, "region");
    let mut shop_id = string_field(payload, "shop_id");
    let mut order_id =
        string_field(payload, "order_sn").or_else(|| string_field(payload, "order_id"));

    if let Some(key) = supplied_key.as_deref() {
        let parts: Vec<&str> = key.split(':').collect();
        if parts.len() == 5 && parts[3] == "order" {
            region = region.or_else(|| non_empty(parts[1]));
            shop_id = shop_id.or_else(|| non_empty(parts[2]));
            order_id = order_id.or_else(|| non_empty(parts[4]));
        }
    }

    match (region, shop_id, order_id) {
        (Some(region), Some(shop_id), Some(order_id)) => {
            let integration_key = supplied_key
                .unwrap_or_else(|| OnlineOrder::key_for(&region, &shop_id, &order_id));
            Ok(OrderIdentity {
                integration_key,
                region,
                shop_id,
                order_id,
            })
        }
        _ => Err(ApiError::MissingField(
            "integration_key or region, shop_id, order_id".into(),
        )),
    }
}

fn non_empty(segment: &str) -> Option<String> {
    (!segment.is_empty()).then(|| segment.to_string())
}

/// Marketplace order statuses onto the fixed lifecycle. Unmapped values
/// fall through to a case-insensitive match against the lifecycle spelling
/// itself; anything else leaves the status unset.
fn map_order_status(raw: &str) -> Option<OrderStatus> {
    let mapped = match raw {
        "PENDING" => Some(OrderStatus::Pending),
        "PROCESSING" | "READY_TO_SHIP" => Some(OrderStatus::Processing),
        "SHIPPED" => Some(OrderStatus::Shipped),
        "COMPLETED" => Some(OrderStatus::Completed),
        "CANCELLED" | "CANCELED" => Some(OrderStatus::Cancelled),
        "REFUNDED" | "RETURNED" => Some(OrderStatus::Refunded),
        _ => None,
    };
    mapped.or_else(|| OrderStatus::from_str_lenient(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn identity_derived_from_parts_when_key_absent() {
        let identity = resolve_identity(&payload(json!({
            "region": "SG",
            "shop_id": 70000101,
            "order_sn": "OD123",
        })))
        .unwrap();
        assert_eq!(identity.integration_key, "SHOPEE:SG:70000101:order:OD123");
        assert_eq!(identity.order_id, "OD123");
    }

    #[test]
    fn order_sn_wins_over_order_id() {
        let identity = resolve_identity(&payload(json!({
            "region": "SG",
            "shop_id": "S1",
            "order_sn": "SN1",
            "order_id": "ID1",
        })))
        .unwrap();
        assert_eq!(identity.order_id, "SN1");
    }

    #[test]
    fn well_formed_key_backfills_missing_pieces() {
        let identity = resolve_identity(&payload(json!({
            "integration_key": "SHOPEE:MY:70000202:order:OD9",
        })))
        .unwrap();
        assert_eq!(identity.region, "MY");
        assert_eq!(identity.shop_id, "70000202");
        assert_eq!(identity.order_id, "OD9");
        assert_eq!(identity.integration_key, "SHOPEE:MY:70000202:order:OD9");
    }

    #[test]
    fn malformed_key_contributes_nothing() {
        // Four segments: not the order-key layout, and no payload fallback
        let err = resolve_identity(&payload(json!({
            "integration_key": "SHOPEE:MY:70000202:OD9",
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingField(_)));

        // Payload fields still rescue a malformed key
        let identity = resolve_identity(&payload(json!({
            "integration_key": "legacy-key-shape",
            "region": "SG",
            "shop_id": "S1",
            "order_id": "OD1",
        })))
        .unwrap();
        assert_eq!(identity.integration_key, "legacy-key-shape");
    }

    #[test]
    fn missing_everything_is_a_missing_field_error() {
        let err = resolve_identity(&payload(json!({}))).unwrap_err();
        assert!(
            matches!(err, ApiError::MissingField(f) if f == "integration_key or region, shop_id, order_id")
        );
    }

    #[test]
    fn status_table_and_pass_through() {
        assert_eq!(map_order_status("READY_TO_SHIP"), Some(OrderStatus::Processing));
        assert_eq!(map_order_status("RETURNED"), Some(OrderStatus::Refunded));
        assert_eq!(map_order_status("CANCELED"), Some(OrderStatus::Cancelled));
        // pass-through of already-normalized spellings, any case
        assert_eq!(map_order_status("Shipped"), Some(OrderStatus::Shipped));
        // unrecognized leaves status unset
        assert_eq!(map_order_status("IN_TRANSIT"), None);
    }
}
