//! Request handlers for the dashboard API.
//!
//! Control flow per request: open a connection, run one query, map the rows,
//! respond. Failures surface as HTTP 500 with the classified message; see
//! the `IntoResponse` impl in the parent module.

use crate::catalog::RecordQuery;
use crate::error::ApiError;
use crate::export;
use crate::mapper::{map_rows, ProductionRecord};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct RawDataParams {
    start_date: Option<String>,
    end_date: Option<String>,
    line: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProductionDataParams {
    start_date: Option<String>,
    end_date: Option<String>,
    save: Option<String>,
}

/// `GET /api/health` — liveness only, never touches the database.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /api/test-connection` — runs the probe query against the AS/400.
pub async fn test_connection(State(state): State<AppState>) -> Response {
    match state.database.probe().await {
        Ok(()) => Json(json!({
            "success": true,
            "message": "AS/400 connection established",
        }))
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// `GET /api/raw-data?start_date&end_date&line` — records with the synthetic
/// `id` and `note` fields, for the dashboard grid.
pub async fn raw_data(
    State(state): State<AppState>,
    Query(params): Query<RawDataParams>,
) -> Result<Json<Vec<ProductionRecord>>, ApiError> {
    let query = RecordQuery::new(params.start_date, params.end_date, params.line);
    info!(
        start_date = %query.start_date,
        end_date = %query.end_date,
        line = query.line.as_deref().unwrap_or("-"),
        "fetching raw data"
    );

    let rows = state.database.fetch_records(query.clone()).await?;
    let records = map_rows(&rows, true, query.line.as_deref());
    Ok(Json(records))
}

/// `GET /api/lines` — distinct trimmed line names, ascending.
pub async fn lines(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let lines = state.database.list_lines().await?;
    Ok(Json(lines))
}

/// `GET /api/production-data?start_date&end_date&save` — records without the
/// synthetic fields. Dates may carry `-` separators; they are stripped before
/// use. With `save=true` the result set is written to the snapshot file and
/// a summary is returned instead of the array.
pub async fn production_data(
    State(state): State<AppState>,
    Query(params): Query<ProductionDataParams>,
) -> Result<Response, ApiError> {
    let query = RecordQuery::new(
        params.start_date.map(|d| d.replace('-', "")),
        params.end_date.map(|d| d.replace('-', "")),
        None,
    );
    let save = params
        .save
        .is_some_and(|s| s.eq_ignore_ascii_case("true"));
    info!(
        start_date = %query.start_date,
        end_date = %query.end_date,
        save,
        "fetching production data"
    );

    let rows = state.database.fetch_records(query).await?;
    let records = map_rows(&rows, false, None);

    if save {
        let saved = export::write_snapshot(&state.export_path, &records)?;
        let message = format!(
            "Saved {} records to {}",
            saved,
            state.export_path.display()
        );
        return Ok(Json(json!({
            "success": true,
            "saved": saved,
            "message": message,
        }))
        .into_response());
    }

    Ok(Json(records).into_response())
}
