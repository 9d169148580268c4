use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::{Value, json};

use crate::error::RelayError;
use crate::notion::NewPage;
use crate::state::SharedState;
use crate::submission::{BodySource, Submission};

/// Record one widget submission as a Notion page.
pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let fields = BodySource::from_request(&headers, body).await?.resolve()?;
    let submission = Submission::from_fields(&fields);

    let credentials = state.config.notion.credentials()?;

    let page = NewPage::new(&credentials.database_id, &submission, Utc::now());
    let created = state.sink.create_page(&credentials, &page).await?;

    tracing::info!(
        page_id = %created.id,
        source = %submission.source,
        "Recorded submission: {}",
        page.title()
    );

    Ok(Json(json!({ "ok": true, "id": created.id })))
}

/// CORS preflight. The allow-* headers are added for every response by the router.
pub async fn preflight() -> impl IntoResponse {
    (
        [(header::ACCESS_CONTROL_MAX_AGE, "86400")],
        StatusCode::NO_CONTENT,
    )
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        [(header::ALLOW, "POST, OPTIONS")],
        RelayError::MethodNotAllowed,
    )
}
