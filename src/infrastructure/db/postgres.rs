use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

/// Opens the shared connection pool. Queries beyond `max_connections` wait for
/// a free connection instead of failing.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    match PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
    {
        Ok(pool) => {
            info!(max_connections, "Database connection established.");
            Ok(pool)
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            Err(e)
        }
    }
}
