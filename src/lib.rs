pub mod api;
pub mod app;
pub mod core;
pub mod floorplan;
pub mod page;
pub mod reservation;

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use api::client::SiteApiClient;
use app::SiteApp;
use crate::core::{
    config::SiteConfig,
    errors::{AppError, AppResult},
};

fn log_level_from_env() -> LevelFilter {
    match std::env::var("TABLESITE_LOG")
        .unwrap_or_else(|_| "info".to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

fn http_debug_enabled() -> bool {
    matches!(
        std::env::var("TABLESITE_HTTP_DEBUG")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Installs the fmt subscriber. Safe to call more than once; later calls are
/// ignored.
pub fn init_logging() {
    let level = log_level_from_env();
    let directives = if http_debug_enabled() {
        level.to_string()
    } else {
        format!("{level},hyper=warn,hyper_util=warn,reqwest=warn")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loads the site described by the environment and prints the populated page
/// model as JSON on stdout.
pub fn run() -> AppResult<()> {
    init_logging();
    let config = SiteConfig::from_env()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let client = SiteApiClient::new(config)?;
        let app = SiteApp::load(client).await;
        let rendered = serde_json::to_string_pretty(app.body())
            .map_err(|err| AppError::Internal(err.to_string()))?;
        println!("{rendered}");
        Ok(())
    })
}
