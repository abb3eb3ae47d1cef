//! HTTP routes.
//!
//! | Method | Path                          | Success             |
//! |--------|-------------------------------|---------------------|
//! | GET    | `/health`                     | `{"status":"ok"}`   |
//! | GET    | `/api/eposnow/auth-url`       | `{"authUrl": ...}`  |
//! | POST   | `/api/eposnow/authorize`      | token response      |
//! | POST   | `/api/eposnow/refresh`        | token response      |
//! | GET    | `/api/eposnow/products`       | product list        |
//! | GET    | `/api/eposnow/products/{id}`  | product or 404      |
//! | GET    | `/api/eposnow/customers`      | customer list       |
//! | GET    | `/api/eposnow/customers/{id}` | customer or 404     |
//! | GET    | `/api/eposnow/sales`          | sale list           |
//!
//! Resource routes require `Authorization: Bearer <token>`; the token is
//! passed through to the provider untouched.

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use poddle_core::json::fold_keys;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::service::EposNowService;

/// Prefix of the Epos Now routes.
pub const API_PREFIX: &str = "/api/eposnow";

const BEARER_PREFIX: &str = "Bearer ";

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    service: EposNowService,
}

/// Builds the application router.
pub fn router(service: EposNowService) -> Router {
    let api = Router::new()
        .route("/auth-url", get(auth_url))
        .route("/authorize", post(authorize))
        .route("/refresh", post(refresh))
        .route("/products", get(products))
        .route("/products/{id}", get(product))
        .route("/customers", get(customers))
        .route("/customers/{id}", get(customer))
        .route("/sales", get(sales));

    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Returns the token from an `Authorization` header value, if it is a
/// non-empty bearer credential.
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

/// Caller's bearer token, or a 401 before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .map(|token| Self(token.to_string()))
            .ok_or((StatusCode::UNAUTHORIZED, "Bearer token required"))
    }
}

#[derive(Debug, Deserialize)]
struct AuthUrlQuery {
    scopes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthUrlResponse {
    auth_url: String,
}

// Request bodies are matched on folded keys, so `Code`, `CODE` and
// `refresh_token` bind like `code` and `refreshToken`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthorizeRequest {
    code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshTokenRequest {
    #[serde(rename = "refreshtoken")]
    refresh_token: String,
}

/// Decodes a request body on folded keys. A body of the wrong shape binds as
/// empty and fails the handler's required-field check.
fn fold_request<T>(body: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(fold_keys(body)).unwrap_or_default()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn auth_url(
    State(state): State<AppState>,
    Query(query): Query<AuthUrlQuery>,
) -> Json<AuthUrlResponse> {
    Json(AuthUrlResponse {
        auth_url: state.service.authorization_url(query.scopes.as_deref()),
    })
}

async fn authorize(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let request: AuthorizeRequest = fold_request(body);
    if request.code.is_empty() {
        return (StatusCode::BAD_REQUEST, "Authorization code is required").into_response();
    }

    match state.service.authorize(&request.code).await {
        Some(token) => Json(token).into_response(),
        None => (StatusCode::BAD_REQUEST, "Failed to get access token").into_response(),
    }
}

async fn refresh(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let request: RefreshTokenRequest = fold_request(body);
    if request.refresh_token.is_empty() {
        return (StatusCode::BAD_REQUEST, "Refresh token is required").into_response();
    }

    match state.service.refresh_token(&request.refresh_token).await {
        Some(token) => Json(token).into_response(),
        None => (StatusCode::BAD_REQUEST, "Failed to refresh token").into_response(),
    }
}

async fn products(State(state): State<AppState>, BearerToken(token): BearerToken) -> Response {
    Json(state.service.products(&token).await).into_response()
}

async fn product(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<i32>,
) -> Response {
    found_or_404(state.service.product(id, &token).await)
}

async fn customers(State(state): State<AppState>, BearerToken(token): BearerToken) -> Response {
    Json(state.service.customers(&token).await).into_response()
}

async fn customer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<i32>,
) -> Response {
    found_or_404(state.service.customer(id, &token).await)
}

async fn sales(State(state): State<AppState>, BearerToken(token): BearerToken) -> Response {
    Json(state.service.sales(&token).await).into_response()
}

fn found_or_404<T: Serialize>(value: Option<T>) -> Response {
    match value {
        Some(value) => Json(value).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
