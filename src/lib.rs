//! authflow - OAuth 2.0 / OpenID Connect Authorization Code flow demo harness
//!
//! Shows integrators how to wire the four legs of the authorization-code
//! flow against a Keycloak-style identity provider:
//! - `/login` redirects to the provider's authorization endpoint
//! - `/callback` exchanges the code for tokens and establishes a session
//! - `/api/status` reports authentication state to the dashboard
//! - `/logout` tears the session down and redirects to the provider logout
//!
//! Sessions live in a process-local map; tokens are held verbatim and never
//! verified. This is demo plumbing, not a production authentication layer.
//!
//! # Example
//!
//! ```rust,no_run
//! use authflow::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     authflow::http::start_server(config).await?;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod constants;
pub mod error;

// The authorization-code flow
pub mod auth;

// Infrastructure
pub mod config;
pub mod logs;

// Interface layer
pub mod http;

// Re-exports for convenience
pub use config::Config;
pub use error::{AuthFlowError, Result};

/// Initialize logging for the application
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "authflow=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
