use axum::{extract::Path, Json};
use contracts::domain::online_store::aggregate::OnlineStore;
use contracts::integration::UpsertOutcome;

use crate::domain::online_store;
use crate::shared::error::ApiError;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/integration/upsert-store
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    body: String,
) -> Result<Json<UpsertOutcome>, ApiError> {
    let payload = super::parse_body(&body)?;
    let outcome = online_store::service::upsert_from_payload(&payload).await?;
    tracing::info!(
        user = %claims.username,
        action = ?outcome.action,
        name = %outcome.name,
        "online store upsert"
    );
    Ok(Json(outcome))
}

/// GET /api/online-store
pub async fn list_all() -> Result<Json<Vec<OnlineStore>>, ApiError> {
    let stores = online_store::service::list_all().await?;
    Ok(Json(stores))
}

/// GET /api/online-store/:key
pub async fn get_by_key(Path(key): Path<String>) -> Result<Json<OnlineStore>, ApiError> {
    match online_store::service::get_by_key(&key).await? {
        Some(store) => Ok(Json(store)),
        None => Err(ApiError::NotFound("Online Store".into())),
    }
}
