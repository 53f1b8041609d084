//! Server configuration.

use clap::Parser;

/// Default service port.
pub const DEFAULT_PORT: u16 = 8085;

/// Default canvas page size.
pub const DEFAULT_PAGE_SIZE: u64 = 15;

/// Development signing secret.
pub const DEFAULT_SIGNING_SECRET: &str = "dev-secret";

/// Command-line arguments for the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "canvas-relay")]
#[command(about = "Webhook service rendering interactive notebook canvases")]
#[command(version)]
pub struct Args {
    /// Host address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Shared secret for webhook signature verification.
    #[arg(long, default_value = DEFAULT_SIGNING_SECRET)]
    pub signing_secret: String,

    /// Base URL of the platform API for canvas updates.
    #[arg(long, default_value = "https://platform.invalid/api/v2")]
    pub platform_url: String,

    /// API token for canvas updates.
    #[arg(long, default_value = "")]
    pub api_token: String,

    /// Items per canvas page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Enable debug logging.
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Enable silent mode (minimal logging).
    #[arg(long, short = 's')]
    pub silent: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            signing_secret: DEFAULT_SIGNING_SECRET.to_string(),
            platform_url: "https://platform.invalid/api/v2".to_string(),
            api_token: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            debug: false,
            silent: false,
        }
    }
}

/// Server configuration derived from command-line arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Shared secret for webhook signature verification.
    pub signing_secret: String,
    /// Base URL of the platform API.
    pub platform_url: String,
    /// API token for canvas updates.
    pub api_token: String,
    /// Items per canvas page.
    pub page_size: u64,
    /// Enable debug logging.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::from(Args::default())
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            signing_secret: args.signing_secret,
            platform_url: args.platform_url,
            api_token: args.api_token,
            page_size: args.page_size.max(1),
            debug: args.debug,
        }
    }
}

impl Config {
    /// Returns the bind address for the service.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
