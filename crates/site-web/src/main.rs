//! Bright City web server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p site-web
//! ```
//!
//! Configuration is loaded from the environment (and `.env`).

use site_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Keep the guards alive so file logs are flushed on exit
    let _guards = match try_init_tracing_with_config(TracingConfig::from_logging(
        &config.logging,
        config.app.env.is_production(),
    )) {
        Ok(guards) => Some(guards),
        Err(e) => {
            eprintln!("Warning: Failed to initialize tracing: {e}");
            None
        }
    };

    info!(
        env = ?config.app.env,
        debug = config.app.debug,
        address = %config.server.address(),
        "Configuration loaded"
    );

    if let Err(e) = site_web::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
