//! Composition Synthesizer — camera and framing for one moment.
//!
//! One orchestration call per moment, bounded by a timeout and the caller's
//! cancellation token. Any failure (transport, API status, timeout, payload
//! that is not a JSON object, cancellation) yields the fixed fallback
//! composition instead of an error. The outcome is reported explicitly in
//! `CompositionSource` so callers can tell the two paths apart.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::generation::assembler::{
    build_dialogue, build_sound_effects, place_characters, FacingMode,
};
use crate::models::beat::{ComicStyle, Moment};
use crate::models::comic::{
    CameraAngle, ComicCharacter, Dialogue, Lighting, PanelComposition, Perspective, Point,
    ShotType, SoundEffect,
};
use crate::orchestrator::prompts::COMPOSITION_TASK;
use crate::orchestrator::{OrchestrationContext, OrchestrationRequest, Orchestrator};

const DEFAULT_LIGHTING_DIRECTION: f64 = 0.0;
const DEFAULT_LIGHTING_INTENSITY: f64 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Outcome types
// ────────────────────────────────────────────────────────────────────────────

/// Why the fallback composition was used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FallbackReason {
    #[error("orchestration timed out after {0:?}")]
    Timeout(Duration),

    #[error("generation was cancelled")]
    Cancelled,

    #[error("orchestrator call failed: {0}")]
    Orchestrator(String),

    #[error("malformed composition payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompositionSource {
    Orchestrated,
    Fallback(FallbackReason),
}

/// Everything the synthesizer produces for one moment.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedPanel {
    pub composition: PanelComposition,
    pub source: CompositionSource,
    pub art_direction: String,
    pub characters: Vec<ComicCharacter>,
    pub dialogue: Vec<Dialogue>,
    pub sfx: Vec<SoundEffect>,
}

impl SynthesizedPanel {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CompositionSource::Fallback(_))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Synthesizer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CompositionSynthesizer {
    orchestrator: Arc<dyn Orchestrator>,
    timeout: Duration,
    max_agents: u32,
}

impl CompositionSynthesizer {
    pub fn new(orchestrator: Arc<dyn Orchestrator>, timeout: Duration, max_agents: u32) -> Self {
        Self {
            orchestrator,
            timeout,
            max_agents,
        }
    }

    /// Produces composition, art direction, characters, dialogue and SFX for a moment.
    /// Never fails.
    pub async fn synthesize(
        &self,
        moment: &Moment,
        style: ComicStyle,
        panel_number: u32,
        cancel: &CancellationToken,
    ) -> SynthesizedPanel {
        let (composition, source) = match self
            .request_composition(moment, style, panel_number, cancel)
            .await
        {
            Ok(composition) => {
                debug!("Panel {panel_number}: orchestrated composition {:?}", composition.shot_type);
                (composition, CompositionSource::Orchestrated)
            }
            Err(reason) => {
                warn!("Panel {panel_number}: using fallback composition ({reason})");
                (PanelComposition::default(), CompositionSource::Fallback(reason))
            }
        };

        let facing = match source {
            CompositionSource::Orchestrated => FacingMode::Forward,
            CompositionSource::Fallback(_) => FacingMode::Alternating,
        };

        SynthesizedPanel {
            art_direction: compose_art_direction(style, &composition),
            characters: place_characters(moment, facing),
            dialogue: build_dialogue(moment),
            sfx: build_sound_effects(moment),
            composition,
            source,
        }
    }

    async fn request_composition(
        &self,
        moment: &Moment,
        style: ComicStyle,
        panel_number: u32,
        cancel: &CancellationToken,
    ) -> Result<PanelComposition, FallbackReason> {
        if cancel.is_cancelled() {
            return Err(FallbackReason::Cancelled);
        }

        let request = self.build_request(moment, style, panel_number);
        let call = tokio::time::timeout(self.timeout, self.orchestrator.orchestrate(&request));

        let outcome = tokio::select! {
            _ = cancel.cancelled() => return Err(FallbackReason::Cancelled),
            outcome = call => outcome,
        };

        let response = outcome
            .map_err(|_| FallbackReason::Timeout(self.timeout))?
            .map_err(|e| FallbackReason::Orchestrator(e.to_string()))?;
        let payload = response
            .payload()
            .map_err(|e| FallbackReason::MalformedPayload(e.to_string()))?;

        parse_composition(&payload)
    }

    fn build_request(&self, moment: &Moment, style: ComicStyle, panel_number: u32) -> OrchestrationRequest {
        OrchestrationRequest {
            task: COMPOSITION_TASK.to_string(),
            context: OrchestrationContext {
                description: moment.description.clone(),
                characters: moment.characters.clone(),
                action: moment.action.clone(),
                emotion: moment.emotion.clone(),
                style: style.as_str().to_string(),
                panel_number,
            },
            max_agents: self.max_agents,
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payload parsing
// ────────────────────────────────────────────────────────────────────────────

/// Reads a composition out of an orchestration payload.
///
/// Only a non-object payload is an error. Each field is optional and lenient:
/// unknown shot types and angles become medium-shot / eye-level, a missing
/// focal point is the frame center, a missing perspective is two-point.
pub fn parse_composition(payload: &Value) -> Result<PanelComposition, FallbackReason> {
    if !payload.is_object() {
        return Err(FallbackReason::MalformedPayload(
            "payload is not a JSON object".to_string(),
        ));
    }

    let shot_type = field(payload, "shot_type", "shotType")
        .and_then(Value::as_str)
        .and_then(ShotType::parse)
        .unwrap_or_default();
    let angle = payload
        .get("angle")
        .and_then(Value::as_str)
        .and_then(CameraAngle::parse)
        .unwrap_or_default();
    let perspective = payload
        .get("perspective")
        .and_then(Value::as_str)
        .and_then(Perspective::parse)
        .unwrap_or_default();
    let focal_point = field(payload, "focal_point", "focalPoint")
        .map(parse_point)
        .unwrap_or(Point::CENTER);
    let lighting = payload.get("lighting").and_then(parse_lighting);

    Ok(PanelComposition {
        shot_type,
        angle,
        perspective,
        focal_point,
        lighting,
    })
}

fn field<'a>(payload: &'a Value, snake: &str, camel: &str) -> Option<&'a Value> {
    payload.get(snake).or_else(|| payload.get(camel))
}

fn parse_point(value: &Value) -> Point {
    let coord = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(0.5)
    };
    Point::new(coord("x"), coord("y"))
}

fn parse_lighting(value: &Value) -> Option<Lighting> {
    let kind = value.get("type").and_then(Value::as_str)?.trim();
    if kind.is_empty() {
        return None;
    }
    let direction = value
        .get("direction")
        .and_then(Value::as_f64)
        .map(|d| d.rem_euclid(360.0))
        .unwrap_or(DEFAULT_LIGHTING_DIRECTION);
    let intensity = value
        .get("intensity")
        .and_then(Value::as_f64)
        .map(|i| i.clamp(0.0, 1.0))
        .unwrap_or(DEFAULT_LIGHTING_INTENSITY);
    Some(Lighting {
        kind: kind.to_string(),
        direction,
        intensity,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Art direction
// ────────────────────────────────────────────────────────────────────────────

fn style_opening(style: ComicStyle) -> &'static str {
    match style {
        ComicStyle::Manga => "Manga style with expressive linework and dynamic screentones",
        ComicStyle::European => {
            "European ligne claire style with clean outlines and detailed backgrounds"
        }
        ComicStyle::Indie => "Indie style with loose personal linework and textured inks",
        ComicStyle::Traditional => {
            "Traditional American comic style with bold inks and dynamic poses"
        }
    }
}

/// Style opening, then "<Shot>, <angle>", then lighting if any; joined with ". ".
pub fn compose_art_direction(style: ComicStyle, composition: &PanelComposition) -> String {
    let mut parts = vec![
        style_opening(style).to_string(),
        format!(
            "{}, {}",
            composition.shot_type.label(),
            composition.angle.label()
        ),
    ];
    if let Some(lighting) = &composition.lighting {
        parts.push(format!(
            "{} lighting from {:.0} degrees at {:.0}% intensity",
            capitalize(&lighting.kind),
            lighting.direction,
            lighting.intensity * 100.0
        ));
    }
    format!("{}.", parts.join(". "))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
