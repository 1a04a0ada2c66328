use axum::{extract::Path, Json};
use contracts::domain::online_product::aggregate::OnlineProduct;
use contracts::integration::UpsertOutcome;

use crate::domain::online_product;
use crate::shared::error::ApiError;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/integration/upsert-product
pub async fn upsert(
    CurrentUser(claims): CurrentUser,
    body: String,
) -> Result<Json<UpsertOutcome>, ApiError> {
    let payload = super::parse_body(&body)?;
    let outcome = online_product::service::upsert_from_payload(&payload).await?;
    tracing::info!(
        user = %claims.username,
        action = ?outcome.action,
        name = %outcome.name,
        "online product upsert"
    );
    Ok(Json(outcome))
}

/// GET /api/online-product
pub async fn list_all() -> Result<Json<Vec<OnlineProduct>>, ApiError> {
    let products = online_product::service::list_all().await?;
    Ok(Json(products))
}

/// GET /api/online-product/:key
pub async fn get_by_key(Path(key): Path<String>) -> Result<Json<OnlineProduct>, ApiError> {
    match online_product::service::get_by_key(&key).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::NotFound("Online Product".into())),
    }
}
