use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::online_store::aggregate::OnlineStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;
use crate::shared::data::upsert::{set_if_present, UpsertTarget};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "online_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub integration_key: String,
    pub platform: String,
    pub region: Option<String>,
    pub platform_shop_id: Option<String>,
    pub store_name: String,
    pub store_url: Option<String>,
    pub last_synced_at: Option<chrono::DateTime<chrono::Utc>>,
    pub raw_payload_json: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OnlineStore {
    fn from(m: Model) -> Self {
        OnlineStore {
            id: m.id,
            integration_key: m.integration_key,
            platform: m.platform,
            region: m.region,
            platform_shop_id: m.platform_shop_id,
            store_name: m.store_name,
            store_url: m.store_url,
            last_synced_at: m.last_synced_at,
            raw_payload_json: m.raw_payload_json,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Normalized store fields ready for persistence. Optional members are
/// dropped on update so an absent payload value never clears a stored one.
#[derive(Debug, Clone)]
pub struct StoreFields {
    pub platform: String,
    pub region: Option<String>,
    pub platform_shop_id: Option<String>,
    pub store_name: String,
    pub store_url: Option<String>,
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

pub async fn get_by_key(integration_key: &str) -> anyhow::Result<Option<OnlineStore>> {
    let result = Entity::find()
        .filter(Column::IntegrationKey.eq(integration_key))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn list_all() -> anyhow::Result<Vec<OnlineStore>> {
    let items: Vec<OnlineStore> = Entity::find()
        .order_by_asc(Column::IntegrationKey)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(integration_key: &str, fields: &StoreFields) -> anyhow::Result<String> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();
    let active = ActiveModel {
        id: Set(id.clone()),
        integration_key: Set(integration_key.to_string()),
        platform: Set(fields.platform.clone()),
        region: Set(fields.region.clone()),
        platform_shop_id: Set(fields.platform_shop_id.clone()),
        store_name: Set(fields.store_name.clone()),
        store_url: Set(fields.store_url.clone()),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
    };
    active.insert(conn()).await?;
    Ok(id)
}

pub async fn update(id: &str, fields: &StoreFields) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(id.to_string()),
        integration_key: sea_orm::ActiveValue::NotSet,
        platform: Set(fields.platform.clone()),
        region: set_if_present(&fields.region),
        platform_shop_id: set_if_present(&fields.platform_shop_id),
        store_name: Set(fields.store_name.clone()),
        store_url: set_if_present(&fields.store_url),
        last_synced_at: Set(Some(fields.last_synced_at)),
        raw_payload_json: Set(Some(fields.raw_payload_json.clone())),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(Utc::now())),
    };
    active.update(conn()).await?;
    Ok(())
}

/// Adapter for the generic upsert executor
pub struct StoreTarget;

#[async_trait]
impl UpsertTarget for StoreTarget {
    type Fields = StoreFields;

    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<String>> {
        find_id_by_key(key).await
    }

    async fn insert(&self, key: &str, fields: &StoreFields) -> anyhow::Result<String> {
        insert(key, fields).await
    }

    async fn update(&self, id: &str, fields: &StoreFields) -> anyhow::Result<()> {
        update(id, fields).await
    }
}
