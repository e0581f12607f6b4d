//! Integration tests for Orderdesk.
//!
//! The tests in `tests/` drive the console library against [`FakeBackend`],
//! an in-process `axum` server that speaks the backend admin API contract.
//! It keeps records in memory, checks bearer tokens, records every request,
//! and can inject failures or hold status updates open.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p orderdesk-integration-tests
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use orderdesk_console::{Console, ConsoleConfig, Credentials};
use serde_json::{Value, json};
use tokio::sync::Notify;

/// Path prefix of the backend admin API.
pub const API_PREFIX: &str = "/admin/api";

/// Operator email accepted by the fake backend.
pub const OPERATOR_EMAIL: &str = "ops@example.com";

/// Operator password accepted by the fake backend.
pub const OPERATOR_PASSWORD: &str = "correct-horse";

/// A request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below [`API_PREFIX`], e.g. `/orders/7/status`.
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Collection {
    Categories,
    Stores,
    MenuItems,
    Orders,
}

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

struct BackendState {
    token: Mutex<String>,
    token_serial: Mutex<u32>,
    requests: Mutex<Vec<RecordedRequest>>,
    records: Mutex<HashMap<Collection, Vec<Value>>>,
    failures: Mutex<HashMap<String, u16>>,
    status_gate: Mutex<Option<Arc<Gate>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process fake of the backend admin API.
pub struct FakeBackend {
    base_url: String,
    state: Arc<BackendState>,
}

impl FakeBackend {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::unwrap_used)]
    pub async fn start() -> Self {
        let state = Arc::new(BackendState {
            token: Mutex::new("token-1".to_string()),
            token_serial: Mutex::new(1),
            requests: Mutex::default(),
            records: Mutex::default(),
            failures: Mutex::default(),
            status_gate: Mutex::default(),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = router(Arc::clone(&state));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}{API_PREFIX}"),
            state,
        }
    }

    /// Base URL to configure the console with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials the fake backend accepts.
    #[must_use]
    pub fn credentials() -> Credentials {
        Credentials::new(OPERATOR_EMAIL, OPERATOR_PASSWORD)
    }

    /// A console pointed at this backend, not yet logged in.
    ///
    /// # Panics
    ///
    /// Panics if the console cannot be built.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn console(&self) -> Console {
        Console::new(ConsoleConfig::for_api_url(&self.base_url).unwrap()).unwrap()
    }

    /// A console pointed at this backend and logged in.
    ///
    /// # Panics
    ///
    /// Panics if the login fails.
    #[allow(clippy::unwrap_used)]
    pub async fn logged_in_console(&self) -> Console {
        let console = self.console();
        console
            .gateway()
            .login(&Self::credentials())
            .await
            .unwrap();
        console
    }

    // =========================================================================
    // Seeding and inspection
    // =========================================================================

    pub fn seed_categories(&self, records: Vec<Value>) {
        self.seed(Collection::Categories, records);
    }

    pub fn seed_stores(&self, records: Vec<Value>) {
        self.seed(Collection::Stores, records);
    }

    pub fn seed_menu_items(&self, records: Vec<Value>) {
        self.seed(Collection::MenuItems, records);
    }

    pub fn seed_orders(&self, records: Vec<Value>) {
        self.seed(Collection::Orders, records);
    }

    fn seed(&self, collection: Collection, records: Vec<Value>) {
        lock(&self.state.records).insert(collection, records);
    }

    /// The stored order with the given id.
    #[must_use]
    pub fn order(&self, id: &str) -> Option<Value> {
        self.state.find(Collection::Orders, id)
    }

    /// The stored menu item with the given id.
    #[must_use]
    pub fn menu_item(&self, id: &str) -> Option<Value> {
        self.state.find(Collection::MenuItems, id)
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received for `method path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> usize {
        lock(&self.state.requests)
            .iter()
            .filter(|r| &r.method == method && r.path == path)
            .count()
    }

    // =========================================================================
    // Fault injection
    // =========================================================================

    /// Answer every request to `path` with `status` until cleared.
    pub fn fail(&self, path: &str, status: u16) {
        lock(&self.state.failures).insert(path.to_string(), status);
    }

    pub fn clear_failures(&self) {
        lock(&self.state.failures).clear();
    }

    /// Rotate the server-side token so the one clients hold is rejected.
    pub fn expire_token(&self) {
        let mut serial = lock(&self.state.token_serial);
        *serial += 1;
        *lock(&self.state.token) = format!("token-{serial}");
    }

    /// Hold the next order status update open until released. Later
    /// updates are not held.
    #[must_use]
    pub fn hold_status_updates(&self) -> StatusGate {
        let gate = Arc::new(Gate::default());
        *lock(&self.state.status_gate) = Some(Arc::clone(&gate));
        StatusGate { gate }
    }
}

/// Handle to a held order status update.
pub struct StatusGate {
    gate: Arc<Gate>,
}

impl StatusGate {
    /// Wait until a status update has reached the backend and is being held.
    pub async fn entered(&self) {
        self.gate.entered.notified().await;
    }

    /// Let the held update complete.
    pub fn release(self) {
        self.gate.release.notify_one();
    }
}

impl BackendState {
    fn find(&self, collection: Collection, id: &str) -> Option<Value> {
        lock(&self.records)
            .get(&collection)
            .and_then(|records| records.iter().find(|r| id_matches(r, id)).cloned())
    }

    fn list(&self, collection: Collection) -> Vec<Value> {
        lock(&self.records)
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn insert(&self, collection: Collection, mut record: Value) -> Value {
        let mut records = lock(&self.records);
        let entries = records.entry(collection).or_default();
        let next_id = entries
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0)
            + 1;
        if let Some(obj) = record.as_object_mut() {
            obj.insert("id".to_string(), json!(next_id));
        }
        entries.push(record.clone());
        record
    }

    fn update(&self, collection: Collection, id: &str, changes: &Value) -> Option<Value> {
        let mut records = lock(&self.records);
        let record = records
            .get_mut(&collection)?
            .iter_mut()
            .find(|r| id_matches(r, id))?;
        if let (Some(target), Some(changes)) = (record.as_object_mut(), changes.as_object()) {
            for (key, value) in changes {
                if key != "id" {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        Some(record.clone())
    }

    fn remove(&self, collection: Collection, id: &str) -> bool {
        let mut records = lock(&self.records);
        let Some(entries) = records.get_mut(&collection) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|r| !id_matches(r, id));
        entries.len() < before
    }
}

fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::Number(n)) => n.to_string() == id,
        Some(Value::String(s)) => s == id,
        _ => false,
    }
}

// =============================================================================
// Routes
// =============================================================================

type Shared = State<Arc<BackendState>>;

fn router(state: Arc<BackendState>) -> Router {
    let api = |path: &str| format!("{API_PREFIX}{path}");

    Router::new()
        .route(&api("/auth/login"), post(login))
        .route(&api("/orders"), get(list_orders))
        .route(&api("/orders/{id}"), get(get_order))
        .route(&api("/orders/{id}/status"), put(update_order_status))
        .route(&api("/categories"), get(list_categories).post(create_category))
        .route(
            &api("/categories/{id}"),
            put(update_category).delete(delete_category),
        )
        .route(&api("/stores"), get(list_stores).post(create_store))
        .route(
            &api("/stores/{id}"),
            get(get_store).put(update_store).delete(delete_store),
        )
        .route(
            &api("/stores/{id}/menu"),
            get(list_store_menu).post(create_menu_item),
        )
        .route(
            &api("/menu/{id}"),
            put(update_menu_item).delete(delete_menu_item),
        )
        .route(&api("/menus"), get(list_menu_items))
        .route(&api("/menus/{id}"), get(get_menu_item))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), gatekeeper))
        .with_state(state)
}

/// Record the request, enforce bearer auth, and apply injected failures.
async fn gatekeeper(State(state): Shared, request: Request, next: Next) -> Response {
    let path = request
        .uri()
        .path()
        .trim_start_matches(API_PREFIX)
        .to_string();
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    lock(&state.requests).push(RecordedRequest {
        method: request.method().clone(),
        path: path.clone(),
        authorization: authorization.clone(),
    });

    if path != "/auth/login" {
        let expected = format!("Bearer {}", lock(&state.token));
        if authorization.as_deref() != Some(expected.as_str()) {
            return (StatusCode::UNAUTHORIZED, "invalid or expired token").into_response();
        }
    }

    let failure = lock(&state.failures).get(&path).copied();
    if let Some(status) = failure {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, "injected failure").into_response();
    }

    next.run(request).await
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email != Some(OPERATOR_EMAIL) || password != Some(OPERATOR_PASSWORD) {
        return (StatusCode::UNAUTHORIZED, "invalid credentials").into_response();
    }
    let token = lock(&state.token).clone();
    Json(json!({"token": token, "user": {"email": OPERATOR_EMAIL}})).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "not found").into_response()
}

fn found(record: Option<Value>) -> Response {
    record.map_or_else(not_found, |r| Json(r).into_response())
}

// Orders: list and detail use the `data` envelope.

async fn list_orders(State(state): Shared) -> Json<Value> {
    Json(json!({"data": state.list(Collection::Orders)}))
}

async fn get_order(State(state): Shared, Path(id): Path<String>) -> Response {
    state
        .find(Collection::Orders, &id)
        .map_or_else(not_found, |order| Json(json!({"data": order})).into_response())
}

async fn update_order_status(
    State(state): Shared,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let gate = lock(&state.status_gate).take();
    if let Some(gate) = gate {
        gate.entered.notify_one();
        gate.release.notified().await;
    }

    let Some(status) = body.get("status").cloned() else {
        return (StatusCode::BAD_REQUEST, "status is required").into_response();
    };
    match state.update(Collection::Orders, &id, &json!({"status": status})) {
        Some(_) => Json(json!({"message": "Order status updated"})).into_response(),
        None => not_found(),
    }
}

// Categories: list uses the `data` envelope; there is no detail endpoint.

async fn list_categories(State(state): Shared) -> Json<Value> {
    Json(json!({"data": state.list(Collection::Categories)}))
}

async fn create_category(State(state): Shared, Json(body): Json<Value>) -> Response {
    let record = state.insert(Collection::Categories, body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_category(
    State(state): Shared,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    found(state.update(Collection::Categories, &id, &body))
}

async fn delete_category(State(state): Shared, Path(id): Path<String>) -> Response {
    if state.remove(Collection::Categories, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}

// Stores: bare arrays and records.

async fn list_stores(State(state): Shared) -> Json<Value> {
    Json(Value::Array(state.list(Collection::Stores)))
}

async fn get_store(State(state): Shared, Path(id): Path<String>) -> Response {
    found(state.find(Collection::Stores, &id))
}

async fn create_store(State(state): Shared, Json(body): Json<Value>) -> Response {
    let record = state.insert(Collection::Stores, body);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update_store(
    State(state): Shared,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    found(state.update(Collection::Stores, &id, &body))
}

async fn delete_store(State(state): Shared, Path(id): Path<String>) -> Response {
    if state.remove(Collection::Stores, &id) {
        Json(json!({"message": "Store deleted"})).into_response()
    } else {
        not_found()
    }
}

// Menu items.

async fn list_store_menu(State(state): Shared, Path(store_id): Path<String>) -> Json<Value> {
    let items: Vec<Value> = state
        .list(Collection::MenuItems)
        .into_iter()
        .filter(|item| {
            item.get("store_id")
                .is_some_and(|s| id_matches(&json!({"id": s}), &store_id))
        })
        .collect();
    Json(json!({"data": items}))
}

async fn list_menu_items(State(state): Shared) -> Json<Value> {
    Json(Value::Array(state.list(Collection::MenuItems)))
}

async fn get_menu_item(State(state): Shared, Path(id): Path<String>) -> Response {
    found(state.find(Collection::MenuItems, &id))
}

async fn create_menu_item(
    State(state): Shared,
    Path(store_id): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    if state.find(Collection::Stores, &store_id).is_none() {
        return not_found();
    }
    if let Some(obj) = body.as_object_mut() {
        let store_id = store_id
            .parse::<i64>()
            .map_or_else(|_| json!(store_id), |n| json!(n));
        obj.insert("store_id".to_string(), store_id);
    }
    let record = state.insert(Collection::MenuItems, body);
    (StatusCode::CREATED, Json(json!({"data": record}))).into_response()
}

async fn update_menu_item(
    State(state): Shared,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    found(state.update(Collection::MenuItems, &id, &body))
}

async fn delete_menu_item(State(state): Shared, Path(id): Path<String>) -> Response {
    if state.remove(Collection::MenuItems, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found()
    }
}
