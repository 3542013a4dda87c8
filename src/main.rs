use dotenvy::dotenv;
use tracing::{info, warn, Level};

use ppgcc_metrics::{create_app, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = Config::from_env()?;
    if config.api_tokens.is_empty() {
        warn!("API_TOKENS is not set; the API accepts unauthenticated requests");
    }

    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server is running on http://{}", addr);
    axum::serve(listener, create_app(config)).await?;

    Ok(())
}
