use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use devmap_api::models::DeviceFeed;
use devmap_server::app::create_router;
use devmap_server::configs::{Map, Refresh, Status};
use devmap_server::errors::RefreshError;
use devmap_server::handles::{MapState, RefreshState};
use devmap_server::services::{
    DeviceSource, MarkerBuilder, MarkerLayer, RefreshService, StatusPolicy,
};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;

/// Serves the same upstream body on every fetch.
pub struct StaticSource {
    body: Value,
}

#[async_trait]
impl DeviceSource for StaticSource {
    async fn fetch(&self) -> Result<DeviceFeed, RefreshError> {
        Ok(DeviceFeed::from_value(self.body.clone()))
    }
}

pub struct MockApp {
    pub router: Router,
    pub refresh_service: Arc<RefreshService>,
    pub layer: Arc<RwLock<MarkerLayer>>,
}

impl MockApp {
    pub fn new(source: Arc<dyn DeviceSource>) -> Self {
        let map = Map::default();
        let refresh = Refresh::default();

        let layer = Arc::new(RwLock::new(MarkerLayer::mount(
            map.initial_bounds(),
            map.fit_padding,
        )));
        let builder = MarkerBuilder::new(StatusPolicy::new(&Status::default())).unwrap();
        let refresh_service = Arc::new(RefreshService::new(source, builder, layer.clone()));

        let router = create_router(
            MapState {
                layer: layer.clone(),
                map_config: Arc::new(map.to_response(&refresh)),
            },
            RefreshState {
                refresh_service: refresh_service.clone(),
            },
        );

        Self {
            router,
            refresh_service,
            layer,
        }
    }

    pub fn with_body(body: Value) -> Self {
        Self::new(Arc::new(StaticSource { body }))
    }
}

pub fn hours_ago(hours: i64) -> String {
    (OffsetDateTime::now_utc() - Duration::hours(hours))
        .format(&Rfc3339)
        .unwrap()
}
