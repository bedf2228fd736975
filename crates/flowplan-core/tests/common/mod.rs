//! Stub FlowPlan backend for integration tests.
//!
//! Serves canned responses keyed by method and path on a random local port
//! and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct StubState {
    routes: Arc<HashMap<(Method, String), (StatusCode, String)>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Default)]
pub struct StubBackend {
    routes: HashMap<(Method, String), (StatusCode, String)>,
}

pub struct RunningStub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.routes
            .insert((method, path.to_string()), (status, body.to_string()));
        self
    }

    pub async fn start(self) -> RunningStub {
        let state = StubState {
            routes: Arc::new(self.routes),
            requests: Arc::default(),
        };
        let requests = state.requests.clone();
        let app = Router::new().fallback(handle).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        RunningStub {
            base_url: format!("http://{}", addr),
            requests,
        }
    }
}

impl RunningStub {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("at least one request")
    }
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().expect("requests lock").push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body,
    });

    match state.routes.get(&(method, uri.path().to_string())) {
        Some((status, body)) => (*status, body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"detail": "Not Found"}"#).into_response(),
    }
}
