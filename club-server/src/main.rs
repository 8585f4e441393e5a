use club_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    init_logger();

    tracing::info!("LAN Club Server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Server state (database, migrations, seed, JWT)
    let state = ServerState::initialize(&config).await;

    // 4. HTTP server (registers the rental sweeper on startup)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
