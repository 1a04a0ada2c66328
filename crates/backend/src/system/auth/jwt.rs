use anyhow::{Context, Result};
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, DecodingKey, Validation};
use once_cell::sync::OnceCell;

/// Shared secret the issuer signs tokens with, set once at startup from
/// config. Token issuance itself lives outside this service.
static JWT_SECRET: OnceCell<String> = OnceCell::new();

pub fn initialize_auth(secret: String) -> Result<()> {
    JWT_SECRET
        .set(secret)
        .map_err(|_| anyhow::anyhow!("JWT secret already initialized"))
}

fn get_jwt_secret() -> Result<&'static str> {
    JWT_SECRET
        .get()
        .map(String::as_str)
        .context("JWT secret has not been initialized")
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret()?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}
