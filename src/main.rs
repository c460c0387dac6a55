use std::env;

use dotenvy::dotenv;
use hr_ledger::api::{AppState, create_router};
use hr_ledger::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/hr";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Non-fatal: variables may come from the real environment
    dotenv().ok();

    let config_dir = env::var("HR_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("HR_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let loader = ConfigLoader::load(&config_dir)
        .inspect_err(|e| error!(config_dir = %config_dir, "Failed to load configuration: {}", e))?;
    info!(
        config_dir = %config_dir,
        employees = loader.employees().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::from_config(loader));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .inspect_err(|e| error!(bind_addr = %bind_addr, "Failed to bind: {}", e))?;
    info!(bind_addr = %bind_addr, "HR ledger listening");

    axum::serve(listener, router).await?;
    Ok(())
}
