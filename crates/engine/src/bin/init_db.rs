//! Create the address table in the configured database and exit.

use addrbook_engine::infrastructure::sqlite;
use addrbook_engine::config::load_dotenv_from_repo_root;
use addrbook_engine::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root before logging so RUST_LOG in .env applies
    load_dotenv_from_repo_root();
    addrbook_engine::init_tracing();
    let config = AppConfig::from_env();

    tracing::info!(url = %config.database_url, "Initializing database");

    let result = async {
        let pool = sqlite::connect(&config.database_url, 1).await?;
        sqlite::ensure_schema(&pool).await?;
        pool.close().await;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match &result {
        Ok(()) => tracing::info!("Database tables created successfully"),
        Err(e) => tracing::error!(error = %e, "Database initialization failed"),
    }
    result
}
