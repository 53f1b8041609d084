//! HTTP server for the canvas webhook service.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::{CanvasClient, HttpCanvasClient};
use crate::config::Config;
use crate::manager::NavigationManager;
use crate::router::{create_router, AppState};
use crate::store::{MemoryPackageStore, PackageStore};

/// Canvas webhook server.
pub struct CanvasServer {
    config: Arc<Config>,
    packages: Arc<dyn PackageStore>,
    canvas: Arc<dyn CanvasClient>,
}

impl CanvasServer {
    /// Creates a server with an in-memory package store and the HTTP
    /// canvas client from the configuration.
    pub fn new(config: Config) -> Self {
        let canvas: Arc<dyn CanvasClient> = Arc::new(HttpCanvasClient::new(
            config.platform_url.clone(),
            config.api_token.clone(),
        ));
        Self {
            config: Arc::new(config),
            packages: Arc::new(MemoryPackageStore::new()),
            canvas,
        }
    }

    /// Creates a server with custom collaborators.
    pub fn with_collaborators(
        config: Config,
        packages: Arc<dyn PackageStore>,
        canvas: Arc<dyn CanvasClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            packages,
            canvas,
        }
    }

    /// Runs the server.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_address().parse()?;

        let manager = Arc::new(NavigationManager::new(
            self.packages.clone(),
            self.config.page_size,
        ));
        let state = AppState {
            config: self.config.clone(),
            manager,
            canvas: self.canvas.clone(),
        };

        let app = create_router(state)
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .layer(TraceLayer::new_for_http());

        info!("canvas-relay is starting at http://{}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Returns the bind address.
    pub fn bind_address(&self) -> String {
        self.config.bind_address()
    }

    /// Returns the base URL for the service.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.bind_address())
    }
}

/// Builder for creating a canvas server.
pub struct CanvasServerBuilder {
    config: Config,
    packages: Option<Arc<dyn PackageStore>>,
    canvas: Option<Arc<dyn CanvasClient>>,
}

impl CanvasServerBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            packages: None,
            canvas: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the service port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the webhook signing secret.
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.signing_secret = secret.into();
        self
    }

    /// Sets the package store.
    pub fn packages(mut self, packages: Arc<dyn PackageStore>) -> Self {
        self.packages = Some(packages);
        self
    }

    /// Sets the canvas client.
    pub fn canvas(mut self, canvas: Arc<dyn CanvasClient>) -> Self {
        self.canvas = Some(canvas);
        self
    }

    /// Builds the server.
    pub fn build(self) -> CanvasServer {
        let packages = self
            .packages
            .unwrap_or_else(|| Arc::new(MemoryPackageStore::new()));
        let canvas = self.canvas.unwrap_or_else(|| {
            Arc::new(HttpCanvasClient::new(
                self.config.platform_url.clone(),
                self.config.api_token.clone(),
            ))
        });

        CanvasServer::with_collaborators(self.config, packages, canvas)
    }
}

impl Default for CanvasServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
