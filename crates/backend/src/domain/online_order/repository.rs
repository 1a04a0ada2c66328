use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::online_order::aggregate::OnlineOrder;
use contracts::enums::OrderStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::upsert::{set_if_present, UpsertTarget};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "online_sales_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub integration_key: String,
    pub store_ref: String,
    pub platform_order_id: String,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub total_amount: Option<f64>,
    pub order_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,
    pub raw_payload_json: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OnlineOrder {
    fn from(m: Model) -> Self {
        OnlineOrder {
            id: m.id,
            integration_key: m.integration_key,
            store_ref: m.store_ref,
            platform_order_id: m.platform_order_id,
            status: m.status.as_deref().and_then(OrderStatus::from_str_lenient),
            currency: m.currency,
            total_amount: m.total_amount,
            order_created_at: m.order_created_at,
            last_synced_at: m.last_synced_at,
            raw_payload_json: m.raw_payload_json,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Normalized order fields. A `None` status means the marketplace value was
/// unrecognized; the stored status is then left alone.
#[derive(Debug, Clone)]
pub struct OrderFields {
    pub store_ref: String,
    pub platform_order_id: String,
    pub status: Option<OrderStatus>,
    pub currency: Option<String>,
    pub total_amount: Option<f64>,
    pub order_created_at: Option<chrono::DateTime<chrono::Utc>>,
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

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineOrder>> {
    let result = Entity::find()
        .filter(Column::IntegrationKey.eq(integration_key))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineOrder>> {
    let items: Vec<OnlineOrder> = Entity::find()
        .order_by_asc(Column::IntegrationKey)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(integration_key: &str, fields: &OrderFields) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(id.clone()),
        integration_key: Set(integration_key.to_string()),
        store_ref: Set(fields.store_ref.clone()),
        platform_order_id: Set(fields.platform_order_id.clone()),
        status: Set(fields.status.map(|s| s.as_str().to_string())),
        currency: Set(fields.currency.clone()),
        total_amount: Set(fields.total_amount),
        order_created_at: Set(fields.order_created_at),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    active.insert(conn()).await?;
    Ok(id)
}

pub async fn update(id: &str, fields: &OrderFields) -> anyhow::Result<()> {
    let status = fields.status.map(|s| s.as_str().to_string());
    let active = ActiveModel {
        id: Set(id.to_string()),
        integration_key: sea_orm::ActiveValue::NotSet,
        store_ref: Set(fields.store_ref.clone()),
        platform_order_id: Set(fields.platform_order_id.clone()),
        status: set_if_present(&status),
        currency: set_if_present(&fields.currency),
        total_amount: set_if_present(&fields.total_amount),
        order_created_at: set_if_present(&fields.order_created_at),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(Utc::now())),
    };
    active.update(conn()).await?;
    Ok(())
}

/// Adapter for the generic upsert executor
pub struct OrderTarget;

#[async_trait]
impl UpsertTarget for OrderTarget {
    type Fields = OrderFields;

    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<String>> {
        find_id_by_key(key).await
    }

    async fn insert(&self, key: &str, fields: &OrderFields) -> anyhow::Result<String> {
        insert(key, fields).await
    }

    async fn update(&self, id: &str, fields: &OrderFields) -> anyhow::Result<()> {
        update(id, fields).await
    }
}
