//! Example to run the Kalah server standalone
//!
//! Run with: cargo run -p kalah-server --example run_server

use kalah_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting Kalah server on port {}", config.port);
    println!("Static files from: {}", config.static_dir);
    println!("Start a game with: curl -X POST localhost:{}/api/game/start -H 'content-type: application/json' -d '{{\"mode\":\"PlayerVsAi\"}}'", config.port);

    run_server(config).await
}
