use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/integration.db");

    let conn = if db_file == ":memory:" {
        // Single pooled connection, otherwise every checkout would get its
        // own empty in-memory database
        let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
        opts.max_connections(1);
        Database::connect(opts).await?
    } else {
        if let Some(parent) = std::path::Path::new(db_file).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if std::path::Path::new(db_file).is_absolute() {
            std::path::PathBuf::from(db_file)
        } else {
            std::env::current_dir()?.join(db_file)
        };
        // Normalize path separators and ensure proper URL form on Windows
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
        Database::connect(&db_url).await?
    };

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Minimal schema bootstrap: create the integration tables when missing.
/// The unique index on integration_key backstops near-simultaneous creates
/// for the same natural key.
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(
        conn,
        "online_store",
        r#"
        CREATE TABLE online_store (
            id TEXT PRIMARY KEY NOT NULL,
            integration_key TEXT NOT NULL UNIQUE,
            platform TEXT NOT NULL DEFAULT 'shopee',
            region TEXT,
            platform_shop_id TEXT,
            store_name TEXT NOT NULL,
            store_url TEXT,
            last_synced_at TEXT,
            raw_payload_json TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        "online_product",
        r#"
        CREATE TABLE online_product (
            id TEXT PRIMARY KEY NOT NULL,
            integration_key TEXT NOT NULL UNIQUE,
            store_ref TEXT NOT NULL,
            platform_item_id TEXT NOT NULL,
            product_name TEXT,
            status TEXT,
            currency TEXT,
            current_price REAL,
            original_price REAL,
            stock_qty INTEGER,
            primary_image_url TEXT,
            specification_text TEXT,
            last_synced_at TEXT,
            raw_payload_json TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    ensure_table(
        conn,
        "online_sales_order",
        r#"
        CREATE TABLE online_sales_order (
            id TEXT PRIMARY KEY NOT NULL,
            integration_key TEXT NOT NULL UNIQUE,
            store_ref TEXT NOT NULL,
            platform_order_id TEXT NOT NULL,
            status TEXT,
            currency TEXT,
            total_amount REAL,
            order_created_at TEXT,
            last_synced_at TEXT,
            raw_payload_json TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    Ok(())
}

async fn ensure_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }

    Ok(())
}
