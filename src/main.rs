//! authflow demo server
//!
//! Run with: cargo run --bin authflow
//! Configuration comes from the environment (see the README / .env).

#[tokio::main]
async fn main() {
    // Load .env as early as possible so the config sees it
    let _ = dotenvy::dotenv();

    // Initialize logging
    authflow::init_logging();

    let config = authflow::Config::from_env();

    if let Err(e) = authflow::http::start_server(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
