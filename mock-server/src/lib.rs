use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Prefix every fake API route is mounted under.
pub const API_PREFIX: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Clone, Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub user: User,
}

/// Issued bearer token -> user id.
pub type Sessions = Arc<RwLock<HashMap<Uuid, Uuid>>>;

#[derive(Clone)]
struct AppState {
    accounts: Arc<Vec<Account>>,
    sessions: Sessions,
}

fn seed_accounts() -> Vec<Account> {
    [
        ("test@example.com", "password123", "Test User"),
        ("admin@example.com", "AdminPassword123!", "Admin User"),
    ]
    .into_iter()
    .map(|(email, password, name)| Account {
        user: User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
        },
        password: password.to_string(),
    })
    .collect()
}

/// Fake of the API under test, mounted under `/api`.
pub fn app() -> Router {
    let state = AppState {
        accounts: Arc::new(seed_accounts()),
        sessions: Arc::new(RwLock::new(HashMap::new())),
    };
    let api = Router::new()
        .route("/auth", get(current_user))
        .route("/auth/login", post(login))
        .route("/health", get(health))
        .route("/users", get(list_users))
        .with_state(state);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.accounts.iter().map(|a| a.user.clone()).collect())
}

async fn login(State(state): State<AppState>, Json(input): Json<LoginRequest>) -> Response {
    let (Some(email), Some(password)) = (
        input.email.filter(|e| !e.is_empty()),
        input.password.filter(|p| !p.is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing credentials" })),
        )
            .into_response();
    };

    let Some(account) = state
        .accounts
        .iter()
        .find(|a| a.user.email == email && a.password == password)
    else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response();
    };

    let token = Uuid::new_v4();
    state.sessions.write().await.insert(token, account.user.id);
    log::debug!("issued token for {}", account.user.email);
    Json(LoginResponse {
        token,
        user: account.user.clone(),
    })
    .into_response()
}

async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<User>, StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let user_id = *state
        .sessions
        .read()
        .await
        .get(&token)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    state
        .accounts
        .iter()
        .find(|a| a.user.id == user_id)
        .map(|a| Json(a.user.clone()))
        .ok_or(StatusCode::UNAUTHORIZED)
}

/// A canned response served for one method + path.
#[derive(Clone, Debug)]
pub struct StubRoute {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Vec<u8>,
}

impl StubRoute {
    /// Route answering with `status` and an empty body, no content type.
    pub fn new(method: Method, path: &str, status: StatusCode) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Route answering with a JSON body and `Content-Type: application/json`.
    pub fn json(method: Method, path: &str, status: StatusCode, body: &str) -> Self {
        Self::new(method, path, status)
            .content_type("application/json")
            .body(body)
    }

    pub fn content_type(mut self, value: &'static str) -> Self {
        self.content_type = Some(HeaderValue::from_static(value));
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }

    fn respond(&self) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(value) = &self.content_type {
            headers.insert(header::CONTENT_TYPE, value.clone());
        }
        (self.status, headers, Body::from(self.body.clone())).into_response()
    }
}

/// Server answering only the given canned routes; anything else is a bare 404.
pub fn stub(routes: Vec<StubRoute>) -> Router {
    Router::new()
        .fallback(serve_stub)
        .with_state(Arc::new(routes))
}

async fn serve_stub(State(routes): State<Arc<Vec<StubRoute>>>, request: Request) -> Response {
    let path = request.uri().path();
    match routes.iter().find(|r| r.matches(request.method(), path)) {
        Some(route) => route.respond(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
