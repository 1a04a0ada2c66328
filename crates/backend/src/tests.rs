//! End-to-end upsert scenario against an in-memory database.
//!
//! Kept as a single sequential test: the global connection is initialized
//! once and every step builds on the records left by the previous one.

use contracts::enums::{OrderStatus, ProductStatus};
use contracts::integration::UpsertAction;
use serde_json::json;

use crate::domain::{online_order, online_product, online_store};
use crate::shared::data::db;
use crate::shared::error::ApiError;
use crate::shared::payload::Payload;

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn upsert_flow_end_to_end() {
    db::initialize_database(Some(":memory:")).await.unwrap();

    // A product cannot arrive before its store
    let err = online_product::service::upsert_from_payload(&payload(json!({
        "item_id": "I1", "shop_id": "S1", "region": "SG",
    })))
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::StoreNotFound(_)));

    // First store upsert creates
    let first = online_store::service::upsert_from_payload(&payload(json!({
        "integration_key": "SHOPEE:SG:S1",
        "shop_id": "S1",
        "region": "SG",
        "store_name": "Store One",
        "store_url": "https://shop.example/s1",
    })))
    .await
    .unwrap();
    assert_eq!(first.action, UpsertAction::Created);

    // Second upsert with the same key updates the same record and an absent
    // store_url does not clear the stored one
    let second = online_store::service::upsert_from_payload(&payload(json!({
        "integration_key": "SHOPEE:SG:S1",
        "store_name": "Store One Renamed",
    })))
    .await
    .unwrap();
    assert_eq!(second.action, UpsertAction::Updated);
    assert_eq!(first.name, second.name);

    let store = online_store::service::get_by_key("SHOPEE:SG:S1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(store.store_name, "Store One Renamed");
    assert_eq!(store.store_url.as_deref(), Some("https://shop.example/s1"));
    assert_eq!(store.platform, "shopee");
    assert!(store.last_synced_at.is_some());

    // Product upsert with the store in place
    let created = online_product::service::upsert_from_payload(&payload(json!({
        "item_id": "I1",
        "shop_id": "S1",
        "region": "SG",
        "item_name": "Widget",
        "item_status": "BANNED",
        "price_info_json": "[{\"currency\":\"SGD\",\"original_price\":25.0,\"current_price\":19.9}]",
        "stock_info_v2_json": "{\"summary_info\":{\"total_available_stock\":\"42\"}}",
        "image_json": "{\"image_url_list\":[\"https://cdn/img1.jpg\"]}",
    })))
    .await
    .unwrap();
    assert_eq!(created.action, UpsertAction::Created);

    let product = online_product::service::get_by_key("I1-S1-SG")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.store_ref, store.id);
    assert_eq!(product.status, Some(ProductStatus::Delisted));
    assert_eq!(product.currency.as_deref(), Some("SGD"));
    assert_eq!(product.current_price, Some(19.9));
    assert_eq!(product.stock_qty, Some(42));
    assert_eq!(product.primary_image_url.as_deref(), Some("https://cdn/img1.jpg"));

    // Sparse re-sync: name and prices survive, status recomputes to active
    let updated = online_product::service::upsert_from_payload(&payload(json!({
        "item_id": "I1", "shop_id": "S1", "region": "SG",
    })))
    .await
    .unwrap();
    assert_eq!(updated.action, UpsertAction::Updated);

    let product = online_product::service::get_by_key("I1-S1-SG")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.product_name.as_deref(), Some("Widget"));
    assert_eq!(product.current_price, Some(19.9));
    assert_eq!(product.status, Some(ProductStatus::Active));

    // Order with derived key; unrecognized status stays unset
    let created = online_order::service::upsert_from_payload(&payload(json!({
        "region": "SG",
        "shop_id": "S1",
        "order_sn": "OD123",
        "order_status": "IN_TRANSIT",
        "currency": "SGD",
        "total_amount": 39.8,
        "create_time": 1700000000,
    })))
    .await
    .unwrap();
    assert_eq!(created.action, UpsertAction::Created);

    let order = online_order::service::get_by_key("SHOPEE:SG:S1:order:OD123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, None);
    assert_eq!(order.total_amount, Some(39.8));
    assert_eq!(
        order.order_created_at,
        chrono::DateTime::from_timestamp(1700000000, 0)
    );

    // Status arrives on a later sync and maps through the table
    let updated = online_order::service::upsert_from_payload(&payload(json!({
        "integration_key": "SHOPEE:SG:S1:order:OD123",
        "order_status": "READY_TO_SHIP",
    })))
    .await
    .unwrap();
    assert_eq!(updated.action, UpsertAction::Updated);

    let order = online_order::service::get_by_key("SHOPEE:SG:S1:order:OD123")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, Some(OrderStatus::Processing));
    // earlier values survived the sparse update
    assert_eq!(order.currency.as_deref(), Some("SGD"));

    // The read surface sees exactly one record per kind
    assert_eq!(online_store::service::list_all().await.unwrap().len(), 1);
    assert_eq!(online_product::service::list_all().await.unwrap().len(), 1);
    assert_eq!(online_order::service::list_all().await.unwrap().len(), 1);
}
