//! Panel Generation — runs the full beat-to-pages pipeline.
//!
//! Flow: extract_moments → select_moments → (synthesize → assemble_panel) per
//!       moment, in narrative order → pack_pages → GeneratedPanels.
//!
//! The orchestration call is the only await point. Calls are made one at a
//! time so panel numbering and page order follow the beat exactly.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::generation::assembler::{assemble_panel, SceneContext};
use crate::generation::composition::CompositionSynthesizer;
use crate::generation::moments::extract_moments;
use crate::generation::selector::select_moments;
use crate::layout::packer::pack_pages;
use crate::models::beat::{Beat, ComicStyle, GenerationOptions};
use crate::models::comic::ComicPage;

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPanels {
    pub pages: Vec<ComicPage>,
    pub total_panels: usize,
    pub average_panels_per_page: f64,
    pub style: ComicStyle,
    pub orchestrated_panels: usize,
    pub fallback_panels: usize,
}

/// Converts a beat into packed comic pages. Never fails: orchestration faults
/// and cancellation turn into fallback compositions.
pub async fn generate_panels(
    beat: &Beat,
    options: &GenerationOptions,
    synthesizer: &CompositionSynthesizer,
    cancel: &CancellationToken,
) -> GeneratedPanels {
    let moments = extract_moments(beat);
    let selected = select_moments(moments, options.target_panel_count());
    info!(
        "Generating {} panels ({} style, {} pages)",
        selected.len(),
        options.style.as_str(),
        options.target_pages
    );

    let scene = SceneContext::from_beat(beat);
    let mut panels = Vec::with_capacity(selected.len());
    let mut fallback_panels = 0usize;

    for (moment, number) in selected.iter().zip(1u32..) {
        let synthesized = synthesizer
            .synthesize(moment, options.style, number, cancel)
            .await;
        if synthesized.is_fallback() {
            fallback_panels += 1;
        }
        panels.push(assemble_panel(moment, synthesized, number, &scene));
    }

    let total_panels = panels.len();
    let pages = pack_pages(panels, options.target_pages);
    let average_panels_per_page = if pages.is_empty() {
        0.0
    } else {
        total_panels as f64 / pages.len() as f64
    };

    info!(
        "Generated {} panels on {} pages ({} fallback)",
        total_panels,
        pages.len(),
        fallback_panels
    );

    GeneratedPanels {
        pages,
        total_panels,
        average_panels_per_page,
        style: options.style,
        orchestrated_panels: total_panels - fallback_panels,
        fallback_panels,
    }
}
