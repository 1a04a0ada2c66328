pub mod online_order;
pub mod online_product;
pub mod online_store;

use crate::shared::error::ApiError;
use crate::shared::payload::Payload;

/// Request-gate body parsing: empty body means an empty payload, anything
/// non-empty must decode to a JSON object.
pub(crate) fn parse_body(body: &str) -> Result<Payload, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Payload::new());
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        _ => Err(ApiError::InvalidBody),
    }
}
