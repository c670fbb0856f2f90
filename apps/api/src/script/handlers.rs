//! Axum route handlers for the Script API.
//!
//! Every endpoint takes the same `{cover, pages}` body and formats it first;
//! validation and exports run on the formatted script.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::comic::ComicPage;
use crate::models::script::CoverMetadata;
use crate::script::export::{export_json, export_text};
use crate::script::formatter::{format_script, FormattedComicScript};
use crate::script::validator::{validate_script, ValidationReport};

#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub cover: CoverMetadata,
    #[serde(default)]
    pub pages: Vec<ComicPage>,
}

impl ScriptRequest {
    fn format(self) -> FormattedComicScript {
        format_script(self.cover, self.pages)
    }
}

/// POST /api/v1/scripts/format
pub async fn handle_format(Json(request): Json<ScriptRequest>) -> Json<FormattedComicScript> {
    Json(request.format())
}

/// POST /api/v1/scripts/validate
///
/// Always 200; an invalid script is reported in the body.
pub async fn handle_validate(Json(request): Json<ScriptRequest>) -> Json<ValidationReport> {
    Json(validate_script(&request.format()))
}

/// POST /api/v1/scripts/export/text
pub async fn handle_export_text(Json(request): Json<ScriptRequest>) -> Response {
    let text = export_text(&request.format());
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    )
        .into_response()
}

/// POST /api/v1/scripts/export/json
pub async fn handle_export_json(
    Json(request): Json<ScriptRequest>,
) -> Result<Response, AppError> {
    let json = export_json(&request.format()).map_err(|e| AppError::Internal(e.into()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json).into_response())
}
