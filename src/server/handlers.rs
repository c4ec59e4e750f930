use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::{journal::service::DayView, utils::time::key_to_date};

use super::{render, AppState};

/// Handler-level failures, converted to responses at the boundary. Store
/// detail is logged, never sent to the client.
pub(crate) enum ApiError {
    Validation(String),
    NotFound(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response(),
        }
    }
}

#[derive(Serialize)]
struct SavedResponse {
    message: &'static str,
    time: String,
}

fn render_view(state: &AppState, view: &DayView) -> Response {
    let page = render::page(view, state.service.daily_target(), state.service.today());
    Html(page.into_string()).into_response()
}

pub(crate) async fn index_handler(State(state): State<AppState>) -> Response {
    let today = state.service.today();
    match state.service.render_day(today).await {
        Ok(view) => render_view(&state, &view),
        Err(e) => {
            error!("rendering today failed: {e}");
            ApiError::Internal.into_response()
        }
    }
}

pub(crate) async fn day_handler(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
) -> Response {
    let Ok(date) = key_to_date(&raw_date) else {
        warn!("invalid date segment {raw_date:?}");
        return ApiError::NotFound(format!("No such day: {raw_date:?}\n")).into_response();
    };

    // Future days don't exist yet and today is only editable at its canonical
    // URL, both bounce back to `/`.
    if date >= state.service.today() {
        return Redirect::temporary("/").into_response();
    }

    match state.service.render_day(date).await {
        Ok(view) => render_view(&state, &view),
        Err(e) => {
            error!("rendering {date} failed: {e}");
            ApiError::Internal.into_response()
        }
    }
}

pub(crate) async fn save_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: HashMap<String, String> = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => return ApiError::Validation(e.to_string()).into_response(),
    };

    let Some(text) = payload.get("text") else {
        return ApiError::Validation("Missing field 'text'".into()).into_response();
    };

    let now = state.service.now();
    match state.service.save_entry(now.date_naive(), text.clone()).await {
        Ok(()) => Json(SavedResponse {
            message: "saved post",
            time: now.to_rfc3339(),
        })
        .into_response(),
        Err(e) => {
            error!("saving entry failed: {e}");
            ApiError::Internal.into_response()
        }
    }
}
