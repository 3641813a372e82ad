//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::PathBuf;

use speed_registry::config::RegistryConfig;
use speed_registry::lifecycle::{self, Shutdown};
use speed_registry::HttpServer;
use tempfile::TempDir;

/// A registry served on an ephemeral port over a throwaway database.
pub struct TestRegistry {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub database_path: PathBuf,
    shutdown: Shutdown,
    _dir: TempDir,
}

impl TestRegistry {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start with extra settings applied over the test defaults.
    pub async fn start_with(configure: impl FnOnce(&mut RegistryConfig)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RegistryConfig::default();
        config.server.bind_address = "127.0.0.1:0".into();
        config.storage.database_path = dir.path().join("infractions.db");
        configure(&mut config);

        let (gateway, listener) = lifecycle::prepare(&config).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        let server = HttpServer::new(&config, gateway);
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .unwrap();

        Self {
            addr,
            client,
            database_path: config.storage.database_path.clone(),
            shutdown,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to /infractions.
    pub async fn create(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/infractions"))
            .json(&body)
            .send()
            .await
            .expect("registry unreachable")
    }

    /// GET /infractions, decoded.
    #[allow(dead_code)]
    pub async fn list(&self) -> Vec<serde_json::Value> {
        let res = self
            .client
            .get(self.url("/infractions"))
            .send()
            .await
            .expect("registry unreachable");
        assert_eq!(res.status(), 200);
        res.json().await.unwrap()
    }
}

impl Drop for TestRegistry {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
