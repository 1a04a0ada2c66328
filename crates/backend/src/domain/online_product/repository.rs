use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::online_product::aggregate::OnlineProduct;
use contracts::enums::ProductStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::upsert::{set_if_present, UpsertTarget};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "online_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub integration_key: String,
    pub store_ref: String,
    pub platform_item_id: String,
    pub product_name: Option<String>,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub current_price: Option<f64>,
    pub original_price: Option<f64>,
    pub stock_qty: Option<i64>,
    pub primary_image_url: Option<String>,
    pub specification_text: Option<String>,
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,
    pub raw_payload_json: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OnlineProduct {
    fn from(m: Model) -> Self {
        OnlineProduct {
            id: m.id,
            integration_key: m.integration_key,
            store_ref: m.store_ref,
            platform_item_id: m.platform_item_id,
            product_name: m.product_name,
            status: m.status.as_deref().and_then(ProductStatus::from_str),
            currency: m.currency,
            current_price: m.current_price,
            original_price: m.original_price,
            stock_qty: m.stock_qty,
            primary_image_url: m.primary_image_url,
            specification_text: m.specification_text,
            last_synced_at: m.last_synced_at,
            raw_payload_json: m.raw_payload_json,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Normalized product fields. Optional members never clobber stored values;
/// status is always derived by the normalizer and always written.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub store_ref: String,
    pub platform_item_id: String,
    pub product_name: Option<String>,
    pub status: ProductStatus,
    pub currency: Option<String>,
    pub current_price: Option<f64>,
    pub original_price: Option<f64>,
    pub stock_qty: Option<i64>,
    pub primary_image_url: Option<String>,
    pub specification_text: Option<String>,
    pub last_synced_at: chrono::DateTime<chrono::Utc>,
    pub raw_payload_json: String,
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn find_id_by_key(integration_key: &str) -> anyhow::Result<Option<String>> {
    let result = Entity::find()
        .filter(Column::IntegrationKey.eq(integration_key))
        .one(conn())
        .await?;
    Ok(result.map(|m| m.id))
}

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineProduct>> {
    let result = Entity::find()
        .filter(Column::IntegrationKey.eq(integration_key))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineProduct>> {
    let items: Vec<OnlineProduct> = Entity::find()
        .order_by_asc(Column::IntegrationKey)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(integration_key: &str, fields: &ProductFields) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(id.clone()),
        integration_key: Set(integration_key.to_string()),
        store_ref: Set(fields.store_ref.clone()),
        platform_item_id: Set(fields.platform_item_id.clone()),
        product_name: Set(fields.product_name.clone()),
        status: Set(Some(fields.status.as_str().to_string())),
        currency: Set(fields.currency.clone()),
        current_price: Set(fields.current_price),
        original_price: Set(fields.original_price),
        stock_qty: Set(fields.stock_qty),
        primary_image_url: Set(fields.primary_image_url.clone()),
        specification_text: Set(fields.specification_text.clone()),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    active.insert(conn()).await?;
    Ok(id)
}

pub async fn update(id: &str, fields: &ProductFields) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(id.to_string()),
        integration_key: sea_orm::ActiveValue::NotSet,
        store_ref: Set(fields.store_ref.clone()),
        platform_item_id: Set(fields.platform_item_id.clone()),
        product_name: set_if_present(&fields.product_name),
        status: Set(Some(fields.status.as_str().to_string())),
        currency: set_if_present(&fields.currency),
        current_price: set_if_present(&fields.current_price),
        original_price: set_if_present(&fields.original_price),
        stock_qty: set_if_present(&fields.stock_qty),
        primary_image_url: set_if_present(&fields.primary_image_url),
        specification_text: set_if_present(&fields.specification_text),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(Utc::now())),
    };
    active.update(conn()).await?;
    Ok(())
}

/// Adapter for the generic upsert executor
pub struct ProductTarget;

#[async_trait]
impl UpsertTarget for ProductTarget {
    type Fields = ProductFields;

    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<String>> {
        find_id_by_key(key).await
    }

    async fn insert(&self, key: &str, fields: &ProductFields) -> anyhow::Result<String> {
        insert(key, fields).await
    }

    async fn update(&self, id: &str, fields: &ProductFields) -> anyhow::Result<()> {
        update(id, fields).await
    }
}
