use axum::{extract::Path, Json};
use contracts::domain::online_order::aggregate::OnlineOrder;
use contracts::integration::UpsertOutcome;

use crate::domain::online_order;
use crate::shared::error::ApiError;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/integration/upsert-order
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    body: String,
) -> Result<Json<UpsertOutcome>, ApiError> {
    let payload = super::parse_body(&body)?;
    let outcome = online_order::service::upsert_from_payload(&payload).await?;
    tracing::info!(
        user = %claims.username,
        action = ?outcome.action,
        name = %outcome.name,
        "online order upsert"
    );
    Ok(Json(outcome))
}

/// GET /api/online-order
pub async fn list_all() -> Result<Json<Vec<OnlineOrder>>, ApiError> {
    let orders = online_order::service::list_all().await?;
    Ok(Json(orders))
}

/// GET /api/online-order/:key
pub async fn get_by_key(Path(key): Path<String>) -> Result<Json<OnlineOrder>, ApiError> {
    match online_order::service::get_by_key(&key).await? {
        Some(order) => Ok(Json(order)),
        None => Err(ApiError::NotFound("Online Sales Order".into())),
    }
}
