use std::{path::Path, sync::Arc};

use sqlx::PgPool;
use tracing::info;

use crate::{
    db::postgres::create_pool,
    repositories::{
        contact::ContactRepository,
        json_repo::{JsonContactRepo, JsonProjectRepo},
        project::ProjectRepository,
        sqlx_repo::{SqlxContactRepo, SqlxProjectRepo},
    },
    settings::{AppConfig, StorageBackend},
};

pub type DynProjectRepo = Arc<dyn ProjectRepository>;
pub type DynContactRepo = Arc<dyn ContactRepository>;

/// Process-wide storage handles, built once at startup and injected into the handlers.
#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: DynProjectRepo,
    pub contact_repo: DynContactRepo,
}

impl SharedRepositories {
    pub fn postgres(pool: PgPool) -> Self {
        SharedRepositories {
            project_repo: Arc::new(SqlxProjectRepo::new(pool.clone())),
            contact_repo: Arc::new(SqlxContactRepo::new(pool)),
        }
    }

    pub fn json_file(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        SharedRepositories {
            project_repo: Arc::new(JsonProjectRepo::new(data_dir)),
            contact_repo: Arc::new(JsonContactRepo::new(data_dir)),
        }
    }

    pub async fn from_config(config: &AppConfig) -> Result<Self, sqlx::Error> {
        match config.storage_backend {
            StorageBackend::File => {
                info!(data_dir = %config.data_dir, "Using JSON file storage");
                Ok(Self::json_file(&config.data_dir))
            }
            StorageBackend::Postgres => {
                let pool = create_pool(&config.database_url, config.database_max_connections).await?;
                info!("Using Postgres storage");
                Ok(Self::postgres(pool))
            }
        }
    }
}
