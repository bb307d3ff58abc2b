use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub email: String,
}

/// Accounts, issued tokens, and per-user todo lists.
#[derive(Default)]
pub struct Store {
    passwords: HashMap<String, String>,
    sessions: HashMap<String, String>,
    todos: HashMap<String, Vec<Todo>>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/todos", get(list_todos).post(create_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn signup(
    State(db): State<Db>,
    Json(input): Json<Credentials>,
) -> Result<(StatusCode, Json<SignupResponse>), StatusCode> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    if store.passwords.contains_key(&input.email) {
        return Err(StatusCode::CONFLICT);
    }
    store.passwords.insert(input.email.clone(), input.password);
    tracing::info!("account created");
    Ok((StatusCode::CREATED, Json(SignupResponse { email: input.email })))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<Credentials>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let mut store = db.write().await;
    if store.passwords.get(&input.email) != Some(&input.password) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let token = Uuid::new_v4().simple().to_string();
    store.sessions.insert(token.clone(), input.email);
    Ok(Json(LoginResponse { access_token: token }))
}

async fn list_todos(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Todo>>, StatusCode> {
    let store = db.read().await;
    let email = authorize(&store, &headers)?;
    Ok(Json(store.todos.get(&email).cloned().unwrap_or_default()))
}

async fn create_todo(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<Todo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let mut store = db.write().await;
    let email = authorize(&store, &headers)?;
    store.todos.entry(email).or_default().push(input.clone());
    Ok((StatusCode::CREATED, Json(input)))
}

/// Resolve `Authorization: Bearer <token>` to the owning account.
fn authorize(store: &Store, headers: &HeaderMap) -> Result<String, StatusCode> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .and_then(|token| store.sessions.get(token))
        .cloned()
        .ok_or(StatusCode::UNAUTHORIZED)
}
