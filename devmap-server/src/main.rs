use std::sync::Arc;

use devmap_server::configs::settings::Settings;
use devmap_server::run;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let settings = Arc::new(Settings::new().expect("Failed to load settings."));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
        EnvFilter::new(settings.logger.directives(&app_name))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        source = %settings.source.url,
        interval_ms = settings.refresh.interval_ms,
        "device map service starting"
    );

    run(&settings).await;
}
