//! canvas-relay: webhook-driven notebook canvas service.
//!
//! Turns lab-notebook entries into browsable versioned data packages
//! and renders an interactive canvas inside the notebook UI. The
//! platform offers no server-side session storage, so pagination,
//! subject, and action are all round-tripped inside opaque button
//! identifiers; see [`nav`] for the wire format.
//!
//! # Example
//!
//! ```no_run
//! use canvas_relay::{CanvasServer, Config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = CanvasServer::new(Config::default());
//!     server.run().await.unwrap();
//! }
//! ```

pub mod auth;
pub mod canvas;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod manager;
pub mod nav;
pub mod router;
pub mod server;
pub mod store;

// Re-exports for convenience
pub use canvas::Block;
pub use client::{CanvasClient, HttpCanvasClient, MemoryCanvasClient};
pub use config::{Args, Config, DEFAULT_PAGE_SIZE, DEFAULT_PORT, DEFAULT_SIGNING_SECRET};
pub use error::{NavError, NavResult, WebhookError};
pub use manager::NavigationManager;
pub use nav::PageState;
pub use server::{CanvasServer, CanvasServerBuilder};
pub use store::{MemoryPackageStore, PackageRow, PackageStore};
