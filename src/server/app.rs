use std::any::Any;

use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router, ApiResponse};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use routes::QuizRules;

use super::{error::ApiError, routes};

const ALLOWED_METHODS: &str = "GET,PATCH,POST,DELETE,OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type,Authorization,true";

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    quiz_rules: QuizRules,
}

impl AppState {
    pub fn new(pool: SqlitePool, quiz_rules: QuizRules) -> Self {
        Self { pool, quiz_rules }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(AnyOrigin);

    Router::new()
        .route("/error", get(trigger_fault))
        .route("/metrics", get(metrics))
        .merge(category_router())
        .merge(questions_router())
        .merge(quizzes_router())
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound
        })
        .method_not_allowed_fallback(|| async { ApiError::MethodNotAllowed })
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Handler panicked: {details}");
    ApiError::Internal.into_response()
}

async fn trigger_fault() -> ApiResponse<()> {
    Err(ApiError::Internal)
}

async fn metrics() -> ApiResponse<Response> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf)?;
    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        buf,
    )
        .into_response())
}
