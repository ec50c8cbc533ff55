//! Throwaway upstream server for tests. Records every inbound request and
//! answers from a fixed route table; unknown paths get a 404.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Router,
};
use reqwest::Url;

use super::UpstreamClient;
use crate::config::Secret;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone, Default)]
struct UpstreamState {
    routes: Arc<HashMap<String, (u16, String)>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeUpstream {
    pub base_url: Url,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<UpstreamState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.recorded.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });

    match state.routes.get(uri.path()) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap(),
            body.clone(),
        ),
        None => (StatusCode::NOT_FOUND, "not found".to_string()),
    }
}

/// Starts a server on an ephemeral port. Route paths include the `/api` prefix
/// of the returned base URL.
pub async fn spawn_upstream(routes: &[(&str, u16, &str)]) -> FakeUpstream {
    let state = UpstreamState {
        routes: Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
                .collect(),
        ),
        recorded: Arc::default(),
    };
    let recorded = state.recorded.clone();

    let app = Router::new().fallback(record).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream {
        base_url: Url::parse(&format!("http://{addr}/api")).unwrap(),
        recorded,
    }
}

pub fn client_for(upstream: &FakeUpstream, secret: &str) -> UpstreamClient {
    UpstreamClient::new(
        upstream.base_url.clone(),
        Secret::new(secret),
        Duration::from_secs(5),
    )
    .unwrap()
}
