//! Script Formatter — turns authored pages plus cover metadata into a
//! `FormattedComicScript` with its derived metrics.
//!
//! The script's fields are private and only this module constructs it, so
//! totals, word counts and art-time estimates always agree with the pages.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::layout::suggestion::layout_suggestion_for;
use crate::models::comic::{ComicPage, ComicPanel, PanelSize, ShotType};
use crate::models::script::{CoverBlock, CoverMetadata};

const BASE_HOURS_PER_PAGE: f64 = 4.0;
const HOURS_PER_PANEL: f64 = 0.5;
const HOURS_PER_CHARACTER: f64 = 0.25;
const HOURS_PER_DETAILED_PANEL: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedComicScript {
    cover: CoverBlock,
    pages: Vec<ComicPage>,
    total_pages: usize,
    total_panels: usize,
    dialogue_word_count: usize,
    estimated_art_hours: f64,
}

impl FormattedComicScript {
    pub fn cover(&self) -> &CoverBlock {
        &self.cover
    }

    pub fn pages(&self) -> &[ComicPage] {
        &self.pages
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_panels(&self) -> usize {
        self.total_panels
    }

    pub fn dialogue_word_count(&self) -> usize {
        self.dialogue_word_count
    }

    pub fn estimated_art_hours(&self) -> f64 {
        self.estimated_art_hours
    }
}

/// Formats with today's UTC date as the default cover date.
pub fn format_script(cover: CoverMetadata, pages: Vec<ComicPage>) -> FormattedComicScript {
    format_script_on(cover, pages, Utc::now().date_naive())
}

pub fn format_script_on(
    cover: CoverMetadata,
    pages: Vec<ComicPage>,
    today: NaiveDate,
) -> FormattedComicScript {
    let pages: Vec<ComicPage> = pages.into_iter().map(with_layout_suggestion).collect();

    let total_panels = pages.iter().map(|p| p.panels.len()).sum();
    let dialogue_word_count = pages.iter().map(page_word_count).sum();
    let estimated_art_hours = round_tenths(pages.iter().map(page_art_hours).sum());

    debug!(
        "Formatted script: {} pages, {} panels, {} words, {} art hours",
        pages.len(),
        total_panels,
        dialogue_word_count,
        estimated_art_hours
    );

    FormattedComicScript {
        cover: CoverBlock::resolve(cover, today),
        total_pages: pages.len(),
        pages,
        total_panels,
        dialogue_word_count,
        estimated_art_hours,
    }
}

fn with_layout_suggestion(mut page: ComicPage) -> ComicPage {
    let has_suggestion = page
        .layout_suggestion
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty());
    if !has_suggestion {
        page.layout_suggestion = Some(layout_suggestion_for(page.panels.len()));
    }
    page
}

fn page_word_count(page: &ComicPage) -> usize {
    page.panels
        .iter()
        .flat_map(|panel| {
            panel
                .dialogue
                .iter()
                .map(|d| d.text.as_str())
                .chain(panel.captions.iter().map(String::as_str))
        })
        .map(|text| text.split_whitespace().count())
        .sum()
}

/// 4h base + 0.5h per panel + 0.25h per character appearance + 1h per detailed panel.
fn page_art_hours(page: &ComicPage) -> f64 {
    let panels = page.panels.len() as f64;
    let appearances: usize = page.panels.iter().map(|p| p.characters.len()).sum();
    let detailed = page.panels.iter().filter(|p| is_detailed(p)).count();

    BASE_HOURS_PER_PAGE
        + HOURS_PER_PANEL * panels
        + HOURS_PER_CHARACTER * appearances as f64
        + HOURS_PER_DETAILED_PANEL * detailed as f64
}

fn is_detailed(panel: &ComicPanel) -> bool {
    panel.composition.shot_type == ShotType::EstablishingShot
        || matches!(panel.size, PanelSize::FullPage | PanelSize::DoublePageSpread)
}

/// Half away from zero, one decimal place.
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
