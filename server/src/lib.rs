pub mod app;
pub mod config;
pub mod server;
pub mod services;

use config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load configuration from `.env` and the process environment.
pub fn init_config() -> AppConfig {
    load_dotenv();
    let config = AppConfig::load();
    tracing::info!(
        "Settings loaded (bind={}:{}, max_upload_bytes={})",
        config.bind_address,
        config.server_port,
        config.max_upload_bytes
    );
    config
}
