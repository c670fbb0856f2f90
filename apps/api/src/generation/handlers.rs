//! Axum route handlers for the Panel Generation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::pipeline::{generate_panels, GeneratedPanels};
use crate::models::beat::{Beat, GenerationOptions};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePanelsRequest {
    pub beat: Beat,
    #[serde(default)]
    pub options: Option<GenerationOptions>,
}

/// POST /api/v1/panels/generate
///
/// Beat → moments → selection → per-panel composition → packed pages.
/// Orchestration failures never surface here; they show up as fallback panels.
pub async fn handle_generate_panels(
    State(state): State<AppState>,
    Json(request): Json<GeneratePanelsRequest>,
) -> Result<Json<GeneratedPanels>, AppError> {
    let options = request.options.unwrap_or_default();
    validate_request(&request.beat, &options)?;

    // Cancelled with the server's shutdown token.
    let cancel = state.shutdown.child_token();
    let generated = generate_panels(&request.beat, &options, &state.synthesizer, &cancel).await;

    Ok(Json(generated))
}

fn validate_request(beat: &Beat, options: &GenerationOptions) -> Result<(), AppError> {
    if beat.description.trim().is_empty() && beat.explicit_moments().is_none() {
        return Err(AppError::Validation(
            "beat must have a description or at least one moment".to_string(),
        ));
    }
    if let Some(moments) = beat.explicit_moments() {
        if let Some(idx) = moments
            .iter()
            .position(|m| !(0.0..=1.0).contains(&m.importance))
        {
            return Err(AppError::Validation(format!(
                "moments[{idx}].importance must be between 0.0 and 1.0"
            )));
        }
    }
    if options.target_pages == 0 {
        return Err(AppError::Validation(
            "targetPages must be at least 1".to_string(),
        ));
    }
    if options.panels_per_page == 0 {
        return Err(AppError::Validation(
            "panelsPerPage must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_beat_rejected() {
        let beat = Beat {
            description: "  ".to_string(),
            ..Default::default()
        };
        let err = validate_request(&beat, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_zero_panels_per_page_rejected() {
        let beat = Beat {
            description: "Mara waits.".to_string(),
            ..Default::default()
        };
        let options = GenerationOptions {
            panels_per_page: 0,
            ..Default::default()
        };
        assert!(validate_request(&beat, &options).is_err());
    }

    #[test]
    fn test_out_of_range_importance_rejected() {
        let moment: crate::models::beat::Moment =
            serde_json::from_str(r#"{"description": "Mara waits", "importance": 7.0}"#).unwrap();
        let beat = Beat {
            moments: Some(vec![moment]),
            ..Default::default()
        };
        let err = validate_request(&beat, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("moments[0]")));
    }

    #[test]
    fn test_defaults_accepted() {
        let beat = Beat {
            description: "Mara waits.".to_string(),
            ..Default::default()
        };
        assert!(validate_request(&beat, &GenerationOptions::default()).is_ok());
    }
}
