use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use devmap_api::geo::{LatLng, ViewBounds};
use devmap_api::models::{DeviceStatus, EquipmentKind, RefreshOutcome};
use devmap_server::configs::Source;
use devmap_server::services::HttpDeviceSource;
use serde_json::json;

mod common;
use common::mock_app::{MockApp, hours_ago};
use common::mock_upstream::{MockUpstream, closed_address};

fn http_source(url: &str, cookie: Option<&str>) -> Arc<HttpDeviceSource> {
    source_with_timeout(url, cookie, 5_000)
}

fn source_with_timeout(url: &str, cookie: Option<&str>, timeout_ms: u64) -> Arc<HttpDeviceSource> {
    Arc::new(
        HttpDeviceSource::new(&Source {
            url: url.to_string(),
            cookie: cookie.map(str::to_string),
            timeout_ms: Some(timeout_ms),
        })
        .unwrap(),
    )
}

fn paris_gateway() -> String {
    json!({
        "success": true,
        "rows": [{
            "devEUI": "70B3D57ED0000001",
            "nom_equipement": "Paris gateway",
            "type_equipement": "gateway",
            "localisation_gps": "POINT(48.85 2.35)",
            "derniere_comm": hours_ago(1),
            "network": "TTN",
            "indice_signal": 5,
            "site_nom": "Paris"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_render_from_upstream() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(http_source(&upstream.url, None));

    let outcome = app.refresh_service.refresh().await;
    assert_eq!(
        outcome,
        RefreshOutcome::Rendered {
            markers: 1,
            skipped_rows: 0
        }
    );

    let layer = app.layer.read().await;
    let marker = &layer.markers()[0];
    assert_eq!(marker.position, LatLng::new(48.85, 2.35));
    assert_eq!(marker.status, DeviceStatus::Healthy);
    assert_eq!(marker.icon.kind, EquipmentKind::Gateway);
    assert_eq!(marker.icon.glyph, "fa-tower-broadcast");
    assert_eq!(marker.icon.color, "#459329ff");
    assert!(marker.popup.contains("<strong>Paris gateway</strong>"));
    assert!(marker.popup.contains(r#"src="5.png""#));

    let viewport = layer.viewport().unwrap();
    assert_eq!(viewport.bounds, ViewBounds::from_point(LatLng::new(48.85, 2.35)));
    assert_eq!(viewport.padding, [20, 20]);
}

#[tokio::test]
async fn test_status_colors_from_upstream() {
    let upstream = MockUpstream::start().await;
    upstream.respond(
        StatusCode::OK,
        json!({
            "success": true,
            "rows": [
                { "devEUI": "fresh", "localisation_gps": "POINT(45.0 5.0)", "derniere_comm": hours_ago(2) },
                { "devEUI": "late", "localisation_gps": "POINT(45.1 5.1)", "derniere_comm": hours_ago(10) },
                { "devEUI": "lost", "localisation_gps": "POINT(45.2 5.2)", "derniere_comm": hours_ago(48) },
                { "devEUI": "odd", "localisation_gps": "POINT(45.3 5.3)", "derniere_comm": "not a date" }
            ]
        })
        .to_string(),
    );
    let app = MockApp::new(http_source(&upstream.url, None));

    app.refresh_service.refresh().await;

    let layer = app.layer.read().await;
    let status_of = |id: &str| layer.find(id).unwrap().status;
    assert_eq!(status_of("fresh"), DeviceStatus::Healthy);
    assert_eq!(status_of("late"), DeviceStatus::Warning);
    assert_eq!(status_of("lost"), DeviceStatus::Stale);
    assert_eq!(status_of("odd"), DeviceStatus::Unknown);
    assert_eq!(layer.find("odd").unwrap().icon.color, "gray");
    assert_eq!(layer.find("odd").unwrap().icon.glyph, "fa-address-card");
}

#[tokio::test]
async fn test_http_error_keeps_markers() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(http_source(&upstream.url, None));
    app.refresh_service.refresh().await;

    upstream.respond(StatusCode::INTERNAL_SERVER_ERROR, "oops");
    let outcome = app.refresh_service.refresh().await;

    assert_eq!(
        outcome,
        RefreshOutcome::Failed {
            reason: String::from("Upstream responded with HTTP 500")
        }
    );
    assert_eq!(app.layer.read().await.markers().len(), 1);
}

#[tokio::test]
async fn test_invalid_body_keeps_markers() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(http_source(&upstream.url, None));
    app.refresh_service.refresh().await;

    upstream.respond(StatusCode::OK, "<html>login required</html>");
    let outcome = app.refresh_service.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
    assert_eq!(app.layer.read().await.markers().len(), 1);
}

#[tokio::test]
async fn test_shape_mismatch_keeps_markers() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(http_source(&upstream.url, None));
    app.refresh_service.refresh().await;

    for body in [
        json!({ "success": false }),
        json!({ "success": true }),
        json!({ "rows": [] }),
    ] {
        upstream.respond(StatusCode::OK, body.to_string());
        assert_eq!(app.refresh_service.refresh().await, RefreshOutcome::NoData);
    }

    let layer = app.layer.read().await;
    assert_eq!(layer.markers().len(), 1);
    assert_eq!(layer.generation(), 1);
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let address = closed_address().await;
    let app = MockApp::new(http_source(&format!("http://{address}/devices"), None));

    let outcome = app.refresh_service.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
    assert!(app.layer.read().await.markers().is_empty());
    assert_eq!(app.refresh_service.status().await.cycles, 1);
}

#[tokio::test]
async fn test_cookie_is_forwarded() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(http_source(&upstream.url, Some("PHPSESSID=abc123")));

    app.refresh_service.refresh().await;

    assert_eq!(upstream.cookies(), vec![Some(String::from("PHPSESSID=abc123"))]);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let upstream = MockUpstream::start().await;
    upstream.respond(StatusCode::OK, paris_gateway());
    let app = MockApp::new(source_with_timeout(&upstream.url, None, 200));
    app.refresh_service.refresh().await;

    upstream.delay(Duration::from_secs(5));
    let started = std::time::Instant::now();
    let outcome = app.refresh_service.refresh().await;

    assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(app.layer.read().await.markers().len(), 1);
    assert_eq!(app.layer.read().await.generation(), 1);
}
