//! Local stand-in for the upstream APIs and the CORS relay.
//!
//! One axum server plays both roles: `/relay?url=<encoded>` answers from the
//! relayed fixture table (keyed by the decoded target's path), every other
//! path answers from the direct table. Unregistered paths answer 404. Every
//! request is recorded so tests can assert on the attempt sequence.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a fixture path answers with.
#[derive(Debug, Clone)]
pub enum Fixture {
    Json(Value),
    Status(u16),
    Body(&'static str),
    Delayed(Duration, Value),
}

/// One request seen by the server, by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Direct(String),
    Relayed(String),
}

#[derive(Clone, Default)]
struct Shared {
    direct: Arc<Mutex<HashMap<String, Fixture>>>,
    relayed: Arc<Mutex<HashMap<String, Fixture>>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct FixtureServer {
    base: String,
    shared: Shared,
}

impl FixtureServer {
    pub async fn start() -> Self {
        let shared = Shared::default();
        let app = Router::new()
            .route("/relay", get(relay))
            .fallback(direct)
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{addr}"),
            shared,
        }
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Relay prefix pointing at this server.
    pub fn proxy_base(&self) -> String {
        format!("{}/relay?url=", self.base)
    }

    pub fn direct(&self, path: &str, fixture: Fixture) {
        self.shared.direct.lock().unwrap().insert(path.to_string(), fixture);
    }

    pub fn relayed(&self, path: &str, fixture: Fixture) {
        self.shared.relayed.lock().unwrap().insert(path.to_string(), fixture);
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.shared.hits.lock().unwrap().clone()
    }

    pub fn clear_hits(&self) {
        self.shared.hits.lock().unwrap().clear();
    }
}

async fn direct(State(shared): State<Shared>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    shared.hits.lock().unwrap().push(Hit::Direct(path.clone()));
    let fixture = shared.direct.lock().unwrap().get(&path).cloned();
    respond(fixture).await
}

async fn relay(State(shared): State<Shared>, Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(path) = params
        .get("url")
        .and_then(|target| target.parse::<Uri>().ok())
        .map(|target| target.path().to_string())
    else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    shared.hits.lock().unwrap().push(Hit::Relayed(path.clone()));
    let fixture = shared.relayed.lock().unwrap().get(&path).cloned();
    respond(fixture).await
}

async fn respond(fixture: Option<Fixture>) -> Response {
    match fixture {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(Fixture::Json(body)) => Json(body).into_response(),
        Some(Fixture::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Some(Fixture::Body(body)) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Some(Fixture::Delayed(delay, body)) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
    }
}
