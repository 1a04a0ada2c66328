use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::shared::error::ApiError;

/// Middleware for the integration endpoints: requires a valid bearer JWT
/// carrying the admin capability.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = super::jwt::validate_token(token).map_err(|_| ApiError::Unauthorized)?;

    if !claims.is_admin {
        return Err(ApiError::PermissionDenied);
    }

    // Make the caller identity available to handlers via the extractor
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::require_admin;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::{middleware, routing::get, Router};
    use contracts::system::auth::TokenClaims;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tower::ServiceExt;

    const SECRET: &str = "gate-test-secret";

    fn bearer(is_admin: bool) -> String {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = TokenClaims {
            sub: "u1".into(),
            username: "ops".into(),
            is_admin,
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    fn gated_app() -> Router {
        Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .layer(middleware::from_fn(require_admin))
    }

    async fn status_for(request: Request<Body>) -> StatusCode {
        gated_app().oneshot(request).await.unwrap().status()
    }

    // One sequential test: the secret is a process-global set once
    #[tokio::test]
    async fn gate_maps_token_states_to_statuses() {
        crate::system::auth::jwt::initialize_auth(SECRET.to_string()).unwrap();

        // no Authorization header at all
        let no_token = Request::builder()
            .uri("/guarded")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_for(no_token).await, StatusCode::UNAUTHORIZED);

        // header present but not a decodable token
        let garbage = Request::builder()
            .uri("/guarded")
            .header("Authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_for(garbage).await, StatusCode::UNAUTHORIZED);

        // authenticated caller without the admin capability
        let non_admin = Request::builder()
            .uri("/guarded")
            .header("Authorization", bearer(false))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_for(non_admin).await, StatusCode::FORBIDDEN);

        // admin passes through to the handler
        let admin = Request::builder()
            .uri("/guarded")
            .header("Authorization", bearer(true))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_for(admin).await, StatusCode::OK);
    }
}
