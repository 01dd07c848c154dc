use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use portfolio_api::{
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, StorageBackend},
    shared_repos::SharedRepositories,
    AppState,
};
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::{net::TcpListener, path::PathBuf, sync::Arc, time::Duration};
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
    // Dropping the TempDir removes the data files.
    pub data_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");
        let config = test_config(data_dir.path().to_path_buf());

        let state = Arc::new(AppState::new(SharedRepositories::json_file(&config.data_dir)));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::from(state.clone()))
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self {
            address,
            client,
            config,
            data_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn projects_file(&self) -> PathBuf {
        self.data_dir.path().join("projects.json")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request")
    }

    /// Creates a project and returns the `data` object of the response.
    #[allow(dead_code)]
    pub async fn create_project(&self, body: &Value) -> Value {
        let response = self.post_json("/api/projects", body).await;
        assert_eq!(response.status().as_u16(), 201, "project creation failed");
        let envelope: Value = response.json().await.unwrap();
        envelope["data"].clone()
    }
}

fn test_config(data_dir: PathBuf) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio API Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        storage_backend: StorageBackend::File,
        data_dir: data_dir.to_string_lossy().into_owned(),
        database_url: String::new(),
        database_max_connections: 1,
        cors_allowed_origins: vec!["*".to_string()],
    }
}

#[allow(dead_code)]
pub fn valid_project(titulo: &str) -> Value {
    json!({
        "titulo": titulo,
        "descripcion": "A project used in tests",
        "categoria": "frontend",
        "tecnologias": ["rust", "actix"],
        "github_url": "https://github.com/example/project"
    })
}

#[allow(dead_code)]
pub fn valid_contact() -> Value {
    json!({
        "nombre": "Ana",
        "email": "ana@example.com",
        "mensaje": "Hola, me interesa tu trabajo"
    })
}
