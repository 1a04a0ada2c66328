use chrono::Utc;
use contracts::domain::online_product::aggregate::OnlineProduct;
use contracts::domain::online_store::aggregate::OnlineStore;
use contracts::enums::ProductStatus;
use contracts::integration::UpsertOutcome;

use super::repository::{self, ProductFields, ProductTarget};
use crate::domain::online_store;
use crate::shared::data::upsert::upsert_by_key;
use crate::shared::error::ApiError;
use crate::shared::payload::{
    embedded_array, embedded_object, float_value, int_value, string_field, string_value, Payload,
};

/// Normalize a marketplace product payload and upsert it by integration key.
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

    let fields = build_fields(payload, store_ref, identity.item_id.clone());
    let outcome = upsert_by_key(&ProductTarget, &identity.integration_key, &fields).await?;
    Ok(outcome)
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineProduct>> {
    repository::list_all().await
}

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineProduct>> {
    repository::get_by_key(integration_key).await
}

#[derive(Debug)]
struct ProductIdentity {
    item_id: String,
    shop_id: String,
    region: String,
    integration_key: String,
}

/// The three identifying fields are all required; the error names all of
/// them so the caller can fix the payload in one round trip.
fn resolve_identity(payload: &Payload) -> Result<ProductIdentity, ApiError> {
    let item_id = string_field(payload, "item_id");
    let shop_id = string_field(payload, "shop_id");
    let region = string_field(payload, "region");

    match (item_id, shop_id, region) {
        (Some(item_id), Some(shop_id), Some(region)) => {
            let integration_key = OnlineProduct::key_for(&item_id, &shop_id, &region);
            Ok(ProductIdentity {
                item_id,
                shop_id,
                region,
                integration_key,
            })
        }
        _ => Err(ApiError::MissingField("item_id, shop_id, region".into())),
    }
}

fn build_fields(payload: &Payload, store_ref: String, item_id: String) -> ProductFields {
    let prices = extract_prices(payload);

    ProductFields {
        store_ref,
        platform_item_id: item_id,
        product_name: string_field(payload, "item_name"),
        status: map_item_status(string_field(payload, "item_status").as_deref()),
        currency: prices.currency,
        current_price: prices.current,
        original_price: prices.original,
        stock_qty: extract_stock_qty(payload),
        primary_image_url: first_image_url(payload),
        specification_text: attributes_to_text(payload),
        last_synced_at: Utc::now(),
        raw_payload_json: serde_json::Value::Object(payload.clone()).to_string(),
    }
}

/// Marketplace item status codes collapse onto the three-state lifecycle;
/// anything unrecognized counts as live.
fn map_item_status(item_status: Option<&str>) -> ProductStatus {
    match item_status {
        Some("BANNED") | Some("DELETED") | Some("UNLIST") => ProductStatus::Delisted,
        Some("REVIEWING") => ProductStatus::Inactive,
        _ => ProductStatus::Active,
    }
}

struct PriceBits {
    currency: Option<String>,
    original: Option<f64>,
    current: Option<f64>,
}

/// `price_info_json` is a list; the first entry wins. An empty or
/// unparseable list falls back to the top-level currency and no prices.
fn extract_prices(payload: &Payload) -> PriceBits {
    let price_list = embedded_array(payload, "price_info_json");

    if let Some(first) = price_list.first().and_then(|v| v.as_object()) {
        return PriceBits {
            currency: first
                .get("currency")
                .and_then(string_value)
                .or_else(|| string_field(payload, "currency")),
            original: first.get("original_price").and_then(float_value),
            current: first.get("current_price").and_then(float_value),
        };
    }

    PriceBits {
        currency: string_field(payload, "currency"),
        original: None,
        current: None,
    }
}

/// `stock_info_v2_json` nests the usable number under
/// `summary_info.total_available_stock`.
fn extract_stock_qty(payload: &Payload) -> Option<i64> {
    let stock = embedded_object(payload, "stock_info_v2_json");
    let summary = stock.get("summary_info")?.as_object()?;
    int_value(summary.get("total_available_stock")?)
}

fn first_image_url(payload: &Payload) -> Option<String> {
    let image = embedded_object(payload, "image_json");
    let urls = image.get("image_url_list")?.as_array()?;
    urls.first().and_then(string_value)
}

/// Render `attribute_list_json` into readable lines, one per attribute:
/// `Name: value1unit, value2unit`. Attributes without a usable name or any
/// usable value are skipped.
fn attributes_to_text(payload: &Payload) -> Option<String> {
    let attrs = embedded_array(payload, "attribute_list_json");

    let mut lines = Vec::new();
    for attr in attrs.iter().filter_map(|a| a.as_object()) {
        let name = attr
            .get("original_attribute_name")
            .and_then(string_value)
            .or_else(|| attr.get("attribute_name").and_then(string_value))
            .or_else(|| attr.get("attribute_id").and_then(string_value));

        let values: Vec<String> = attr
            .get("attribute_value_list")
            .and_then(|v| v.as_array())
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_object())
                    .filter_map(|v| {
                        let value = v
                            .get("original_value_name")
                            .and_then(string_value)
                            .or_else(|| v.get("value_name").and_then(string_value))
                            .or_else(|| v.get("value_id").and_then(string_value))?;
                        let unit = v.get("value_unit").and_then(string_value).unwrap_or_default();
                        Some(format!("{}{}", value, unit))
                    })
                    .collect()
            })
            .unwrap_or_default();

        if let Some(name) = name {
            if !values.is_empty() {
                lines.push(format!("{}: {}", name, values.join(", ")));
            }
        }
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}
