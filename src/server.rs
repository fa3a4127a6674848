// src/server.rs

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tokio::task;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::session::{Session, SpecOverview, SuggestedRequest};
use crate::{AppError, Result};

/// State shared across handlers: the session and its one-time interpretation
#[derive(Clone)]
struct AppState {
    session: Arc<Session>,
    overview: Arc<SpecOverview>,
}

#[derive(Debug, Deserialize)]
struct DraftRequest {
    path: String,
    method: String,
}

#[derive(Debug, Deserialize)]
struct ProxyRequest {
    path: String,
    method: String,
    body: String,
}

type HandlerError = (StatusCode, String);

/// Serve the session over HTTP until the process is killed
pub async fn run(session: Session, overview: SpecOverview, port: u16) -> Result<()> {
    let state = AppState {
        session: Arc::new(session),
        overview: Arc::new(overview),
    };

    let app = Router::new()
        .route("/info", get(info_handler))
        .route("/generate-request-body", post(generate_request_body))
        .route("/send-request", post(send_request))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Serving on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| AppError::ServerError(err.to_string()))
}

async fn info_handler(State(state): State<AppState>) -> Json<SpecOverview> {
    Json((*state.overview).clone())
}

async fn generate_request_body(
    State(state): State<AppState>,
    Json(draft): Json<DraftRequest>,
) -> std::result::Result<Json<SuggestedRequest>, HandlerError> {
    let session = state.session.clone();
    let method = draft.method.to_uppercase();

    let suggested = task::spawn_blocking(move || session.suggest_body(&draft.path, &method))
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
        .map_err(|err| (StatusCode::BAD_GATEWAY, err.to_string()))?;

    Ok(Json(suggested))
}

async fn send_request(
    State(state): State<AppState>,
    Json(proxied): Json<ProxyRequest>,
) -> std::result::Result<Json<Value>, HandlerError> {
    let session = state.session.clone();

    let response = task::spawn_blocking(move || {
        session.send_request(&proxied.path, &proxied.method, &proxied.body)
    })
    .await
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?
    .map_err(|err| (StatusCode::BAD_GATEWAY, err.to_string()))?;

    // `null` marks an upstream rejection, as opposed to an unreachable upstream
    Ok(Json(response.unwrap_or(Value::Null)))
}
