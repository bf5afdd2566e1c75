//! In-process backend double for API and page tests. Records every request
//! it receives.

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{any, MethodRouter},
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::api::ApiClient;

#[derive(Debug, Clone)]
struct Call {
    line: String,
    body: String,
}

type Calls = Arc<Mutex<Vec<Call>>>;

pub struct FakeBackend {
    base_url: String,
    calls: Calls,
}

impl FakeBackend {
    pub async fn start(routes: Router) -> Self {
        let calls: Calls = Arc::default();
        let app = routes.layer(middleware::from_fn_with_state(calls.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            calls,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url)
    }

    /// `"METHOD /path?query"` per request, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.line.clone()).collect()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|c| serde_json::from_str(&c.body).ok())
    }
}

async fn record(State(calls): State<Calls>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    calls.lock().unwrap().push(Call {
        line: format!("{} {}", parts.method, parts.uri),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// A route answering every method with a canned JSON body.
pub fn respond(status: StatusCode, body: Value) -> MethodRouter {
    any(move || {
        let body = body.clone();
        async move { (status, Json(body)) }
    })
}
