//! In-process stand-in for the PostgREST-style project service.
//!
//! Serves `GET/POST/PATCH/DELETE /{table}` for the `project` and `location`
//! tables, honouring `column=eq.value` filters. Ids are assigned as integers,
//! like a serial primary key would be. Every request is recorded so tests can
//! assert on what the client sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

/// A request as the mock saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub table: String,
    pub query: HashMap<String, String>,
    pub prefer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Default)]
struct MockState {
    tables: HashMap<String, Vec<Value>>,
    next_id: i64,
    /// When set, every request answers with this status.
    fail_with: Option<u16>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

/// Mock project service on a random localhost port. Shut down on drop.
pub struct MockService {
    base_url: String,
    abort_handle: tokio::task::AbortHandle,
    state: SharedState,
}

impl MockService {
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState {
            next_id: 1,
            ..MockState::default()
        }));
        let app = Router::new()
            .route(
                "/{table}",
                get(handle).post(handle).patch(handle).delete(handle),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            abort_handle: handle.abort_handle(),
            state,
        }
    }

    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    /// Put a raw row into `table`, as if another client had written it.
    pub fn insert_row(&self, table: &str, row: Value) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tables.entry(table.to_string()).or_default().push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tables.get(table).cloned().unwrap_or_default()
    }

    pub fn fail_with(&self, status: u16) {
        self.state.lock().expect("mock state poisoned").fail_with = Some(status);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .requests
            .clone()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters
        .iter()
        .all(|(column, wanted)| row.get(column).map(as_text).as_deref() == Some(wanted.as_str()))
}

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Option<Json<Value>>,
) -> Response {
    let mut state = state.lock().expect("mock state poisoned");
    state.requests.push(RecordedRequest {
        method: method.clone(),
        table: table.clone(),
        query: query.clone(),
        prefer: headers
            .get("prefer")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.as_ref().map(|Json(v)| v.clone()),
    });

    if let Some(status) = state.fail_with {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(serde_json::json!({"message": "mock failure"}))).into_response();
    }
    if table != "project" && table != "location" {
        return StatusCode::NOT_FOUND.into_response();
    }

    let filters: Vec<(String, String)> = query
        .iter()
        .filter_map(|(column, value)| {
            value
                .strip_prefix("eq.")
                .map(|wanted| (column.clone(), wanted.to_string()))
        })
        .collect();

    match method {
        Method::GET => {
            let rows: Vec<Value> = state
                .tables
                .get(&table)
                .map(|rows| rows.iter().filter(|row| matches(row, &filters)).cloned().collect())
                .unwrap_or_default();
            Json(rows).into_response()
        }
        Method::POST => {
            let Some(Json(Value::Object(mut row))) = body else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            let id = state.next_id;
            state.next_id += 1;
            row.insert("id".to_string(), Value::from(id));
            let row = Value::Object(row);
            state.tables.entry(table).or_default().push(row.clone());
            (StatusCode::CREATED, Json(vec![row])).into_response()
        }
        Method::PATCH => {
            let Some(Json(Value::Object(changes))) = body else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            let mut updated = Vec::new();
            for row in state.tables.entry(table).or_default().iter_mut() {
                if !matches(row, &filters) {
                    continue;
                }
                if let Value::Object(fields) = &mut *row {
                    for (key, value) in &changes {
                        fields.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
            Json(updated).into_response()
        }
        Method::DELETE => {
            let rows = state.tables.entry(table).or_default();
            rows.retain(|row| !matches(row, &filters));
            StatusCode::NO_CONTENT.into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
