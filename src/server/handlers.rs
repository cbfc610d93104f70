use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::location::{suggest, Geocoder, LookupError, LookupRequest, Suggestion};
use crate::report::WeatherCard;
use crate::weather::WeatherSource;

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        let status = match e {
            LookupError::EmptyQuery => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Api(_) => StatusCode::BAD_GATEWAY,
        };
        ApiError(status, e.to_string())
    }
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        static_files::STYLE_CSS,
    )
        .into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub q: Option<String>,
}

pub async fn suggestions<P>(
    State(state): State<Arc<AppState<P>>>,
    Query(params): Query<SuggestQuery>,
) -> Json<Vec<Suggestion>>
where
    P: Geocoder + WeatherSource + Send + Sync + 'static,
{
    let input = params.q.unwrap_or_default();
    Json(suggest(&input, state.resolver.data()))
}

// ─── GET /api/weather ────────────────────────────────────────────

/// Either `q` (typed text) or `search` + `display` (a picked suggestion).
#[derive(Deserialize)]
pub struct WeatherQuery {
    pub q: Option<String>,
    pub search: Option<String>,
    pub display: Option<String>,
}

impl WeatherQuery {
    fn into_request(self) -> LookupRequest {
        match self.search {
            Some(search) => LookupRequest::Selected(Suggestion {
                display: self.display.unwrap_or_default(),
                search,
            }),
            None => LookupRequest::Typed(self.q.unwrap_or_default()),
        }
    }
}

pub async fn weather<P>(
    State(state): State<Arc<AppState<P>>>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherCard>, ApiError>
where
    P: Geocoder + WeatherSource + Send + Sync + 'static,
{
    let start = Instant::now();
    let request = params.into_request();
    let logged = match &request {
        LookupRequest::Typed(q) => q.clone(),
        LookupRequest::Selected(s) => s.search.clone(),
    };

    // Provider calls block; run them off the async workers, one at a time.
    let result = tokio::task::spawn_blocking(move || {
        let _gate = state
            .lookup_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        state
            .resolver
            .resolve(&request)
            .map(|resolved| WeatherCard::build(&resolved, &state.clock))
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, format!("lookup task failed: {}", e)))?;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    match result {
        Ok(card) => {
            tracing::info!(query = %logged, label = %card.display_label, elapsed_ms, "GET /api/weather");
            Ok(Json(card))
        }
        Err(e) => {
            tracing::warn!(query = %logged, error = %e, elapsed_ms, "GET /api/weather failed");
            Err(e.into())
        }
    }
}
