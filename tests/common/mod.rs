//! Test support: an in-process stand-in for the hosted Supabase platform.
//!
//! [`MockSupabase`] serves the auth endpoints (`/auth/v1/*`) and the REST
//! layer (`/rest/v1/{table}`) from in-memory tables on an ephemeral port, so
//! the integration tests can drive the real router end to end without a
//! network. A hit counter on the REST layer lets tests assert that rejected
//! requests never touched the store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

use lvlup_api::config::cors::CorsConfig;
use lvlup_api::config::supabase::SupabaseConfig;
use lvlup_api::router::init_router;
use lvlup_api::state::AppState;
use lvlup_api::supabase::SupabaseClient;

#[derive(Default)]
struct MockDb {
    /// bearer token -> (user id, email)
    tokens: HashMap<String, (Uuid, String)>,
    /// email -> (password, user id)
    accounts: HashMap<String, (String, Uuid)>,
    profiles: Vec<Value>,
    products: Vec<Value>,
    orders: Vec<Value>,
    order_items: Vec<Value>,
}

impl MockDb {
    fn table(&self, name: &str) -> &[Value] {
        match name {
            "profiles" => &self.profiles,
            "products" => &self.products,
            "orders" => &self.orders,
            "order_items" => &self.order_items,
            _ => &[],
        }
    }

    fn table_mut(&mut self, name: &str) -> &mut Vec<Value> {
        match name {
            "profiles" => &mut self.profiles,
            "products" => &mut self.products,
            "orders" => &mut self.orders,
            "order_items" => &mut self.order_items,
            other => panic!("unknown table: {other}"),
        }
    }
}

struct MockInner {
    db: Mutex<MockDb>,
    rest_hits: AtomicUsize,
    next_id: AtomicI64,
    signup_returns_session: AtomicBool,
}

impl MockInner {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct MockSupabase {
    pub base_url: String,
    inner: Arc<MockInner>,
}

impl MockSupabase {
    pub async fn spawn() -> Self {
        let inner = Arc::new(MockInner {
            db: Mutex::new(MockDb::default()),
            rest_hits: AtomicUsize::new(0),
            next_id: AtomicI64::new(1),
            signup_returns_session: AtomicBool::new(true),
        });

        let router = Router::new()
            .route("/auth/v1/user", get(auth_get_user))
            .route("/auth/v1/token", post(auth_token))
            .route("/auth/v1/signup", post(auth_signup))
            .route(
                "/rest/v1/{table}",
                get(rest_get)
                    .post(rest_post)
                    .patch(rest_patch)
                    .delete(rest_delete),
            )
            .with_state(inner.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            inner,
        }
    }

    /// Register a known bearer token for `user_id` without an account.
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.inner
            .db
            .lock()
            .unwrap()
            .tokens
            .insert(token.clone(), (user_id, email.to_string()));
        token
    }

    /// Register a password account with the identity provider.
    pub fn seed_account(&self, email: &str, password: &str) -> Uuid {
        let user_id = Uuid::new_v4();
        self.inner
            .db
            .lock()
            .unwrap()
            .accounts
            .insert(email.to_string(), (password.to_string(), user_id));
        user_id
    }

    pub fn seed_profile(&self, user_id: Uuid, email: &str, role: &str, name: Option<&str>) {
        self.inner.db.lock().unwrap().profiles.push(json!({
            "id": user_id,
            "email": email,
            "role": role,
            "name": name,
        }));
    }

    pub fn seed_product(&self, name: &str, price: f64) -> i64 {
        let id = self.inner.next_id();
        self.inner.db.lock().unwrap().products.push(json!({
            "id": id,
            "name": name,
            "description": null,
            "price": price,
            "stock": 10,
            "image_url": null,
            "created_at": "2026-01-01T00:00:00Z",
        }));
        id
    }

    /// Number of requests the store (REST layer) has answered.
    pub fn rest_hits(&self) -> usize {
        self.inner.rest_hits.load(Ordering::SeqCst)
    }

    /// Whether signup answers with a full session or a bare user.
    pub fn set_signup_returns_session(&self, value: bool) {
        self.inner
            .signup_returns_session
            .store(value, Ordering::SeqCst);
    }
}

/// Token-validated subject with a profile record, ready to call the API.
pub fn seed_user(mock: &MockSupabase, email: &str, role: &str) -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    let token = mock.issue_token(user_id, email);
    mock.seed_profile(user_id, email, role, Some("Test"));
    (user_id, token)
}

/// Build the real application router pointed at the mock platform.
pub async fn setup_test_app(mock: &MockSupabase) -> Router {
    let config = SupabaseConfig {
        url: mock.base_url.clone(),
        service_role_key: SecretString::from("service-role-test-key".to_string()),
    };

    let state = AppState {
        supabase: SupabaseClient::new(&config).expect("mock supabase client"),
        cors_config: CorsConfig::from_env(),
    };

    init_router(state)
}

pub async fn read_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

// ---- mock handlers -------------------------------------------------------

async fn auth_get_user(State(inner): State<Arc<MockInner>>, headers: HeaderMap) -> Response {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .unwrap_or_default();

    let db = inner.db.lock().unwrap();
    match db.tokens.get(token) {
        Some((id, email)) => Json(json!({
            "id": id,
            "email": email,
            "aud": "authenticated",
        }))
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )
            .into_response(),
    }
}

async fn auth_token(State(inner): State<Arc<MockInner>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut db = inner.db.lock().unwrap();
    let Some((stored_password, user_id)) = db.accounts.get(&email).cloned() else {
        return invalid_grant();
    };
    if stored_password != password {
        return invalid_grant();
    }

    let token = format!("token-{}", Uuid::new_v4());
    db.tokens.insert(token.clone(), (user_id, email.clone()));

    Json(json!({
        "access_token": token,
        "token_type": "bearer",
        "user": { "id": user_id, "email": email },
    }))
    .into_response()
}

fn invalid_grant() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error_description": "Invalid login credentials" })),
    )
        .into_response()
}

async fn auth_signup(State(inner): State<Arc<MockInner>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    let mut db = inner.db.lock().unwrap();
    if email.is_empty() || db.accounts.contains_key(&email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "msg": "User already registered" })),
        )
            .into_response();
    }

    let user_id = Uuid::new_v4();
    db.accounts.insert(email.clone(), (password, user_id));

    if inner.signup_returns_session.load(Ordering::SeqCst) {
        let token = format!("token-{}", Uuid::new_v4());
        db.tokens.insert(token.clone(), (user_id, email.clone()));
        Json(json!({
            "access_token": token,
            "token_type": "bearer",
            "user": { "id": user_id, "email": email },
        }))
        .into_response()
    } else {
        // Email confirmation pending: bare user, no session.
        Json(json!({
            "id": user_id,
            "aud": "authenticated",
            "email": email,
        }))
        .into_response()
    }
}

async fn rest_get(
    State(inner): State<Arc<MockInner>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    inner.rest_hits.fetch_add(1, Ordering::SeqCst);
    let filters = parse_query(query.as_deref().unwrap_or_default());

    let db = inner.db.lock().unwrap();
    let matched: Vec<Value> = db
        .table(&table)
        .iter()
        .filter(|row| row_matches(row, &filters))
        .cloned()
        .collect();

    respond_rows(matched, wants_single(&headers), StatusCode::OK)
}

async fn rest_post(
    State(inner): State<Arc<MockInner>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    inner.rest_hits.fetch_add(1, Ordering::SeqCst);

    let rows_in: Vec<Value> = match body {
        Value::Array(rows) => rows,
        row => vec![row],
    };

    let mut stored = Vec::new();
    {
        let mut db = inner.db.lock().unwrap();
        for mut row in rows_in {
            let object = row.as_object_mut().unwrap();
            if !object.contains_key("id") {
                object.insert("id".to_string(), json!(inner.next_id()));
            }
            if !object.contains_key("created_at") {
                object.insert("created_at".to_string(), json!("2026-01-01T00:00:00Z"));
            }
            db.table_mut(&table).push(row.clone());
            stored.push(row);
        }
    }

    respond_rows(stored, wants_single(&headers), StatusCode::CREATED)
}

async fn rest_patch(
    State(inner): State<Arc<MockInner>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    Json(changes): Json<Value>,
) -> Response {
    inner.rest_hits.fetch_add(1, Ordering::SeqCst);
    let filters = parse_query(query.as_deref().unwrap_or_default());
    let changes = changes.as_object().cloned().unwrap_or_default();

    let mut db = inner.db.lock().unwrap();
    let mut updated = Vec::new();
    for row in db.table_mut(&table).iter_mut() {
        if row_matches(row, &filters) {
            let object = row.as_object_mut().unwrap();
            for (key, value) in changes.clone() {
                object.insert(key, value);
            }
            updated.push(row.clone());
        }
    }

    respond_rows(updated, wants_single(&headers), StatusCode::OK)
}

async fn rest_delete(
    State(inner): State<Arc<MockInner>>,
    Path(table): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    inner.rest_hits.fetch_add(1, Ordering::SeqCst);
    let filters = parse_query(query.as_deref().unwrap_or_default());

    let mut db = inner.db.lock().unwrap();
    let rows = db.table_mut(&table);
    let (removed, kept): (Vec<Value>, Vec<Value>) = rows
        .drain(..)
        .partition(|row| row_matches(row, &filters));
    *rows = kept;

    Json(Value::Array(removed)).into_response()
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

fn wants_single(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("vnd.pgrst.object+json"))
}

fn respond_rows(rows: Vec<Value>, single: bool, status: StatusCode) -> Response {
    if single {
        match rows.into_iter().next() {
            Some(row) => (status, Json(row)).into_response(),
            None => (
                StatusCode::NOT_ACCEPTABLE,
                Json(json!({
                    "message": "JSON object requested, multiple (or no) rows returned"
                })),
            )
                .into_response(),
        }
    } else {
        (status, Json(Value::Array(rows))).into_response()
    }
}

fn row_matches(row: &Value, filters: &[(String, String)]) -> bool {
    filters.iter().all(|(key, expr)| {
        if key == "select" || key == "order" {
            return true;
        }

        let field = value_to_string(row.get(key.as_str()));
        if let Some(expected) = expr.strip_prefix("eq.") {
            field == expected
        } else if let Some(list) = expr
            .strip_prefix("in.(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            list.split(',').any(|candidate| field == candidate.trim())
        } else {
            true
        }
    })
}

fn value_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => "null".to_string(),
    }
}
