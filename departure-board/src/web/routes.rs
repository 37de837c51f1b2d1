//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::future::join_all;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(board_page))
        .route("/health", get(health))
        .route("/widgets/:id", get(widget_fragment))
        .route("/api/widgets/:id", get(widget_json))
        .route("/api/widgets/:id/hidden", post(set_hidden))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every widget on one page.
async fn board_page(State(state): State<AppState>) -> impl IntoResponse {
    let widgets = join_all(state.widgets.iter().map(WidgetView::from_handle)).await;

    Html(
        BoardTemplate {
            refresh_secs: state.refresh_secs,
            widgets,
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// One widget as an HTML fragment.
async fn widget_fragment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let handle = state.widget(&id).ok_or_else(|| AppError::unknown_widget(&id))?;
    let widget = WidgetView::from_handle(handle).await;

    WidgetTemplate { widget }
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })
}

/// One widget as JSON.
async fn widget_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WidgetResponse>, AppError> {
    let handle = state.widget(&id).ok_or_else(|| AppError::unknown_widget(&id))?;

    Ok(Json(WidgetResponse {
        id: handle.id.clone(),
        hidden: handle.is_hidden(),
        view: handle.view().await,
    }))
}

/// Show or hide a widget. Hidden widgets stop polling.
async fn set_hidden(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<HiddenRequest>,
) -> Result<StatusCode, AppError> {
    let handle = state.widget(&id).ok_or_else(|| AppError::unknown_widget(&id))?;

    handle.set_hidden(req.hidden);
    info!(widget = %handle.id, hidden = req.hidden, "widget visibility changed");

    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl AppError {
    fn unknown_widget(id: &str) -> Self {
        AppError::NotFound {
            message: format!("No widget with id {id}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, "{message}");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
