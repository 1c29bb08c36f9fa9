use std::sync::Arc;
use std::time::Duration;

use devmap_api::models::{DeviceFeed, DeviceRecord, RefreshOutcome, RefreshStatusResponse};
use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::services::{DeviceSource, MarkerBuilder, MarkerLayer};

/// Runs device refresh cycles against a marker layer.
///
/// Only one cycle runs at a time: a trigger that arrives while another cycle
/// is fetching or rendering is dropped and reported as
/// [`RefreshOutcome::Skipped`].
pub struct RefreshService {
    source: Arc<dyn DeviceSource>,
    builder: MarkerBuilder,
    layer: Arc<RwLock<MarkerLayer>>,
    cycle: Mutex<()>,
    status: RwLock<RefreshStatusResponse>,
}

impl RefreshService {
    pub fn new(
        source: Arc<dyn DeviceSource>,
        builder: MarkerBuilder,
        layer: Arc<RwLock<MarkerLayer>>,
    ) -> Self {
        Self {
            source,
            builder,
            layer,
            cycle: Mutex::new(()),
            status: RwLock::new(RefreshStatusResponse::default()),
        }
    }

    pub fn layer(&self) -> &Arc<RwLock<MarkerLayer>> {
        &self.layer
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresh_at(OffsetDateTime::now_utc()).await
    }

    /// One cycle with `now` as the reference for status colors.
    pub async fn refresh_at(&self, now: OffsetDateTime) -> RefreshOutcome {
        let Ok(_cycle) = self.cycle.try_lock() else {
            tracing::debug!("refresh already in flight, trigger dropped");
            return RefreshOutcome::Skipped;
        };

        let outcome = match self.source.fetch().await {
            Ok(DeviceFeed::Rows(rows)) => self.render(rows, now).await,
            Ok(DeviceFeed::NoData) => {
                tracing::debug!("device feed carried no rows, markers kept");
                RefreshOutcome::NoData
            }
            Err(e) => {
                tracing::error!("Device refresh failed: {}", e);
                RefreshOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        self.record(&outcome, now).await;

        outcome
    }

    async fn render(&self, rows: Vec<Value>, now: OffsetDateTime) -> RefreshOutcome {
        let total = rows.len();

        let markers: Vec<_> = rows
            .into_iter()
            .filter_map(DeviceRecord::from_row)
            .filter_map(|device| self.builder.build(device, now))
            .collect();

        let placed = markers.len();
        let skipped_rows = total - placed;

        if let Err(e) = self.layer.write().await.replace(markers, now) {
            tracing::warn!("Markers not rendered: {}", e);
            return RefreshOutcome::Failed {
                reason: e.to_string(),
            };
        }

        if skipped_rows > 0 {
            tracing::debug!("skipped {} rows without a usable location", skipped_rows);
        }
        tracing::info!("rendered {} device markers", placed);

        RefreshOutcome::Rendered {
            markers: placed,
            skipped_rows,
        }
    }

    async fn record(&self, outcome: &RefreshOutcome, now: OffsetDateTime) {
        let mut status = self.status.write().await;

        status.cycles += 1;
        status.last_attempt_at = Some(now);
        if outcome.is_rendered() {
            status.last_success_at = Some(now);
        }
        status.last_outcome = Some(outcome.clone());
    }

    pub async fn status(&self) -> RefreshStatusResponse {
        let mut status = self.status.read().await.clone();
        status.in_flight = self.cycle.try_lock().is_err();
        status
    }

    /// Starts the periodic refresh. Ticks missed while a cycle runs are
    /// delayed rather than bunched up.
    pub fn spawn(self: &Arc<Self>, period: Duration, run_on_start: bool) -> RefreshScheduler {
        let service = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            if !run_on_start {
                ticker.tick().await;
            }

            loop {
                ticker.tick().await;
                let outcome = service.refresh().await;
                tracing::debug!("scheduled refresh: {:?}", outcome);
            }
        });

        RefreshScheduler {
            handle,
            layer: Arc::clone(&self.layer),
        }
    }
}

/// Handle on the periodic refresh task.
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
    layer: Arc<RwLock<MarkerLayer>>,
}

impl RefreshScheduler {
    /// Stops the timer and disposes the marker layer.
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;

        self.layer.write().await.dispose();

        tracing::info!("device refresh stopped, marker layer disposed");
    }
}
