use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::*;
use crate::services::{
    HttpDeviceSource, MarkerBuilder, MarkerLayer, RefreshScheduler, RefreshService, StatusPolicy,
};

pub fn create_router(map_state: MapState, refresh_state: RefreshState) -> Router {
    Router::new()
        .merge(map_router(map_state))
        .merge(refresh_router(refresh_state))
        .merge(docs_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn create_app(
    settings: &Arc<Settings>,
) -> Result<(Router, RefreshScheduler), Box<dyn Error>> {
    let layer = Arc::new(RwLock::new(MarkerLayer::mount(
        settings.map.initial_bounds(),
        settings.map.fit_padding,
    )));

    let source = Arc::new(HttpDeviceSource::new(&settings.source)?);
    tracing::info!("polling devices from {}", source.url());

    let builder = MarkerBuilder::new(StatusPolicy::new(&settings.status))?;
    let refresh_service = Arc::new(RefreshService::new(source, builder, layer.clone()));

    let scheduler = refresh_service.spawn(
        Duration::from_millis(settings.refresh.interval_ms),
        settings.refresh.run_on_start,
    );

    let router = create_router(
        MapState {
            layer,
            map_config: Arc::new(settings.map.to_response(&settings.refresh)),
        },
        RefreshState {
            refresh_service,
        },
    );

    Ok((router, scheduler))
}
