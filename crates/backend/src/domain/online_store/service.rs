use chrono::Utc;
use contracts::domain::online_store::aggregate::{OnlineStore, DEFAULT_PLATFORM};
use contracts::integration::UpsertOutcome;

use super::repository::{self, StoreFields, StoreTarget};
use crate::shared::data::upsert::upsert_by_key;
use crate::shared::error::ApiError;
use crate::shared::payload::{string_field, Payload};

/// Normalize a marketplace store payload and upsert it by integration key.
pub async fn upsert_from_payload(payload: &Payload) -> Result<UpsertOutcome, ApiError> {
    let (key, fields) = normalize(payload)?;
    let outcome = upsert_by_key(&StoreTarget, &key, &fields).await?;
    Ok(outcome)
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineStore>> {
    repository::list_all().await
}

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineStore>> {
    repository::get_by_key(integration_key).await
}

/// Build the flat field set from an arbitrary store payload. The key is the
/// one required input; everything else degrades to absent.
fn normalize(payload: &Payload) -> Result<(String, StoreFields), ApiError> {
    let integration_key = string_field(payload, "integration_key")
        .ok_or_else(|| ApiError::MissingField("integration_key".into()))?;

    let platform = derive_platform(payload, &integration_key);

    let store_name = string_field(payload, "store_name")
        .or_else(|| string_field(payload, "shop_name"))
        .unwrap_or_else(|| format!("Store {}", integration_key));

    let fields = StoreFields {
        platform,
        region: string_field(payload, "region"),
        platform_shop_id: string_field(payload, "shop_id"),
        store_name,
        store_url: string_field(payload, "store_url"),
        last_synced_at: Utc::now(),
        raw_payload_json: serde_json::Value::Object(payload.clone()).to_string(),
    };

    Ok((integration_key, fields))
}

/// Platform comes from the payload, else from the key's first colon segment
/// (e.g. "SHOPEE:SG:70000101" -> "shopee"), else the fixed default.
fn derive_platform(payload: &Payload, integration_key: &str) -> String {
    if let Some(platform) = string_field(payload, "platform") {
        return platform;
    }
    if let Some((prefix, _)) = integration_key.split_once(':') {
        if !prefix.is_empty() {
            return prefix.to_lowercase();
        }
    }
    DEFAULT_PLATFORM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn key_is_required_and_trimmed() {
        let err = normalize(&payload(json!({"shop_id": 1}))).unwrap_err();
        assert!(matches!(err, ApiError::MissingField(f) if f == "integration_key"));

        let (key, _) = normalize(&payload(json!({"integration_key": " SHOPEE:SG:70000101 "})))
            .unwrap();
        assert_eq!(key, "SHOPEE:SG:70000101");
    }

    #[test]
    fn platform_inferred_from_key_prefix() {
        let p = payload(json!({"integration_key": "SHOPEE:SG:70000101"}));
        assert_eq!(derive_platform(&p, "SHOPEE:SG:70000101"), "shopee");

        let explicit = payload(json!({"platform": "lazada"}));
        assert_eq!(derive_platform(&explicit, "SHOPEE:SG:1"), "lazada");

        let bare = payload(json!({}));
        assert_eq!(derive_platform(&bare, "no-colons-here"), "shopee");
    }

    #[test]
    fn store_name_falls_back_to_key() {
        let (_, fields) = normalize(&payload(json!({
            "integration_key": "SHOPEE:SG:1",
            "shop_name": "My Shop",
        })))
        .unwrap();
        assert_eq!(fields.store_name, "My Shop");

        let (_, fields) = normalize(&payload(json!({"integration_key": "SHOPEE:SG:1"}))).unwrap();
        assert_eq!(fields.store_name, "Store SHOPEE:SG:1");
    }

    #[test]
    fn shop_id_is_stringified() {
        let (_, fields) = normalize(&payload(json!({
            "integration_key": "SHOPEE:SG:70000101",
            "shop_id": 70000101,
        })))
        .unwrap();
        assert_eq!(fields.platform_shop_id.as_deref(), Some("70000101"));
    }

    #[test]
    fn raw_payload_is_kept_verbatim() {
        let p = payload(json!({"integration_key": "K", "extra": {"nested": true}}));
        let (_, fields) = normalize(&p).unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&fields.raw_payload_json).unwrap();
        assert_eq!(snapshot["extra"]["nested"], true);
    }
}
