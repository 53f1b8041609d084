//! Common test utilities.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::net::TcpListener;

use canvas_relay::{
    auth, Block, CanvasServerBuilder, Config, MemoryCanvasClient, MemoryPackageStore, PackageRow,
};

/// Test server wrapper holding the in-memory collaborators.
pub struct TestServer {
    pub base_url: String,
    pub signing_secret: String,
    pub store: Arc<MemoryPackageStore>,
    pub canvas: Arc<MemoryCanvasClient>,
}

impl TestServer {
    /// Creates and starts a test server on a random port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = Config {
            host: "127.0.0.1".to_string(),
            port,
            ..Config::default()
        };
        let signing_secret = config.signing_secret.clone();
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryPackageStore::new());
        let canvas = Arc::new(MemoryCanvasClient::new());

        let server = CanvasServerBuilder::new()
            .config(config)
            .packages(store.clone())
            .canvas(canvas.clone())
            .build();

        tokio::spawn(async move {
            server.run().await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            base_url,
            signing_secret,
            store,
            canvas,
        }
    }

    /// Seeds an entry with a package of `count` files.
    pub fn seed_entry(&self, entry_id: &str, package_name: &str, count: usize) {
        self.store.insert_entry(entry_id, package_name);
        self.store.insert_package(
            package_name,
            (0..count)
                .map(|i| PackageRow {
                    name: format!("file_{i:03}.csv"),
                    size: 1024 + i as u64,
                })
                .collect(),
            BTreeMap::from([("version".to_string(), "1".to_string())]),
        );
    }

    /// Posts a correctly signed webhook delivery.
    pub async fn post_webhook(&self, body: &serde_json::Value) -> reqwest::Response {
        let body = serde_json::to_vec(body).unwrap();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = auth::sign(&self.signing_secret, &timestamp, &body);

        reqwest::Client::new()
            .post(format!("{}/webhook", self.base_url))
            .header("x-relay-signature", signature)
            .header("x-relay-timestamp", timestamp)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    /// Waits for the background task to publish to a canvas.
    pub async fn wait_for_publish(&self, canvas_id: &str) -> Vec<Block> {
        for _ in 0..50 {
            if let Some(blocks) = self.canvas.last_for(canvas_id) {
                return blocks;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        }
        panic!("no blocks published to {canvas_id}");
    }
}
