use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use tokio::net::TcpListener;

#[derive(Default)]
struct Upstream {
    status: Option<StatusCode>,
    body: String,
    cookies: Vec<Option<String>>,
    delay: Option<Duration>,
}

/// Device inventory stand-in listening on a random local port.
pub struct MockUpstream {
    pub url: String,
    state: Arc<Mutex<Upstream>>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(Upstream::default()));

        let router = Router::new()
            .route("/stores/devices.php", get(serve_devices))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{address}/stores/devices.php"),
            state,
        }
    }

    pub fn respond(&self, status: StatusCode, body: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.status = Some(status);
        state.body = body.into();
    }

    /// Holds every following response for `delay` before answering.
    pub fn delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn cookies(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().cookies.clone()
    }
}

async fn serve_devices(
    State(state): State<Arc<Mutex<Upstream>>>,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let (status, body, delay) = {
        let mut state = state.lock().unwrap();

        let cookie = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        state.cookies.push(cookie);

        (
            state.status.unwrap_or(StatusCode::OK),
            state.body.clone(),
            state.delay,
        )
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

/// An address nothing listens on.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
