pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::middleware;
    use axum::{
        routing::{get, post},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep SQL statement logging out of the application log
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;

    system::auth::jwt::initialize_auth(config.auth.jwt_secret.clone())?;

    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(Some(&db_path.to_string_lossy()))
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::header::AUTHORIZATION,
        ]);

    let require_admin = || middleware::from_fn(system::auth::middleware::require_admin);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // INTEGRATION UPSERT ROUTES (admin only)
        // ========================================
        .route(
            "/api/integration/upsert-store",
            post(handlers::online_store::upsert).layer(require_admin()),
        )
        .route(
            "/api/integration/upsert-product",
            post(handlers::online_product::upsert).layer(require_admin()),
        )
        .route(
            "/api/integration/upsert-order",
            post(handlers::online_order::upsert).layer(require_admin()),
        )
        // ========================================
        // READ ROUTES (admin only)
        // ========================================
        .route(
            "/api/online-store",
            get(handlers::online_store::list_all).layer(require_admin()),
        )
        .route(
            "/api/online-store/:key",
            get(handlers::online_store::get_by_key).layer(require_admin()),
        )
        .route(
            "/api/online-product",
            get(handlers::online_product::list_all).layer(require_admin()),
        )
        .route(
            "/api/online-product/:key",
            get(handlers::online_product::get_by_key).layer(require_admin()),
        )
        .route(
            "/api/online-order",
            get(handlers::online_order::list_all).layer(require_admin()),
        )
        .route(
            "/api/online-order/:key",
            get(handlers::online_order::get_by_key).layer(require_admin()),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
